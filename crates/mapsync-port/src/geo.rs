// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Geographic value types shared by viewport and camera.

use serde::{Deserialize, Serialize};

/// Longitude/latitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude (degrees east).
    pub lng: f64,
    /// Latitude (degrees north).
    pub lat: f64,
}

impl LngLat {
    /// Construct from longitude and latitude.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Axis-aligned geographic box given by its south-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    /// South-west corner.
    pub sw: LngLat,
    /// North-east corner.
    pub ne: LngLat,
}

impl LngLatBounds {
    /// Construct from the two corners.
    pub const fn new(sw: LngLat, ne: LngLat) -> Self {
        Self { sw, ne }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.sw.lng + self.ne.lng) / 2.0,
            (self.sw.lat + self.ne.lat) / 2.0,
        )
    }

    /// Longitudinal extent in degrees.
    pub fn width(&self) -> f64 {
        self.ne.lng - self.sw.lng
    }

    /// Latitudinal extent in degrees.
    pub fn height(&self) -> f64 {
        self.ne.lat - self.sw.lat
    }
}

/// Four-sided screen inset in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top inset.
    pub top: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
    /// Right inset.
    pub right: f64,
}

impl Padding {
    /// Zero on all sides.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Same inset on all four sides.
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_center_and_extent() {
        let b = LngLatBounds::new(LngLat::new(-10.0, 40.0), LngLat::new(10.0, 50.0));
        assert_eq!(b.center(), LngLat::new(0.0, 45.0));
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn padding_zero_is_default() {
        assert_eq!(Padding::ZERO, Padding::default());
        assert_eq!(Padding::uniform(4.0).left, 4.0);
    }
}
