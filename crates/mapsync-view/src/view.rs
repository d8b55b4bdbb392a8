// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `MapView`: owns the engine handle and drives every reconciliation effect.

use std::fmt;

use mapsync_app_core::color_scheme::ColorSchemeMonitor;
use mapsync_app_core::settings::MapSettings;
use mapsync_port::{
    DebugFlags, MapError, MapEvent, MapOptions, MapPort, Projection, TransitionMode,
};
use mapsync_style::{resolve, StyleCatalog, StyleDocument, StyleRef};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::bindings::{EventBindingRegistry, HandlerSet};
use crate::reconcile::ViewportReconciler;
use crate::style_sync::StyleSync;
use crate::transition::{TransitionEvent, TransitionState};
use crate::viewport::{ContainerId, OriginToken, Viewport};

/// Caller callback receiving viewport reports.
pub type ViewportCallback = Box<dyn FnMut(Viewport)>;

/// Declarative inputs of a [`MapView`].
pub struct MapProps {
    /// Container id; generated when absent.
    pub id: Option<String>,
    /// Desired viewport.
    pub viewport: Option<Viewport>,
    /// Light (default) style.
    pub style: Option<StyleRef>,
    /// Style used while the color scheme is dark.
    pub dark_style: Option<StyleRef>,
    /// Default movement primitive.
    pub transition: TransitionMode,
    /// Engine debug overlays.
    pub debug_flags: DebugFlags,
    /// Canvas cursor.
    pub cursor: Option<String>,
    /// Map projection.
    pub projection: Option<Projection>,
    /// Declared event handlers.
    pub handlers: HandlerSet,
    /// Ignore container resizes.
    pub disable_resize: bool,
    /// Log prop-driven updates.
    pub debug: bool,
    /// Prefix of caller-owned style content. Read once at mount.
    pub foreign_prefix: String,
    /// Engine options passed through at construction.
    pub options: Map<String, Value>,
    /// Receives viewport reports. The engine is interactive only when this
    /// is set at mount.
    pub on_viewport_change: Option<ViewportCallback>,
}

impl Default for MapProps {
    fn default() -> Self {
        Self::from_settings(&MapSettings::default())
    }
}

impl MapProps {
    /// Props seeded from persisted settings.
    pub fn from_settings(settings: &MapSettings) -> Self {
        Self {
            id: None,
            viewport: None,
            style: None,
            dark_style: None,
            transition: settings.transition,
            debug_flags: settings.debug_flags,
            cursor: settings.cursor.clone(),
            projection: None,
            handlers: HandlerSet::default(),
            disable_resize: settings.disable_resize,
            debug: settings.debug,
            foreign_prefix: settings.foreign_prefix.clone(),
            options: Map::new(),
            on_viewport_change: None,
        }
    }
}

impl fmt::Debug for MapProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapProps")
            .field("id", &self.id)
            .field("viewport", &self.viewport)
            .field("transition", &self.transition)
            .field("handlers", &self.handlers)
            .field("on_viewport_change", &self.on_viewport_change.is_some())
            .finish_non_exhaustive()
    }
}

/// A mounted map container.
///
/// The host pumps engine events into [`handle_event`](Self::handle_event)
/// and pushes prop changes through the setters or [`update`](Self::update).
pub struct MapView<M: MapPort> {
    map: M,
    ready: bool,
    reconciler: ViewportReconciler,
    transition: TransitionState,
    style_sync: StyleSync,
    bindings: EventBindingRegistry,
    scheme: ColorSchemeMonitor,
    scheme_version: u64,
    catalog: StyleCatalog,
    viewport: Option<Viewport>,
    light: Option<StyleRef>,
    dark: Option<StyleRef>,
    debug_flags: DebugFlags,
    cursor: Option<String>,
    projection: Option<Projection>,
    handlers: HandlerSet,
    disable_resize: bool,
    debug: bool,
    on_viewport_change: Option<ViewportCallback>,
}

impl<M: MapPort> MapView<M> {
    /// Build the engine through `factory` and install the initial props.
    ///
    /// The initial viewport is placed by the constructor; it is not
    /// re-applied as a movement.
    #[instrument(skip_all, fields(id = ?props.id))]
    pub fn mount<F>(
        props: MapProps,
        scheme: ColorSchemeMonitor,
        catalog: StyleCatalog,
        factory: F,
    ) -> Result<Self, MapError>
    where
        F: FnOnce(MapOptions) -> Result<M, MapError>,
    {
        let container = props
            .id
            .map_or_else(ContainerId::fresh, ContainerId::from);
        let style = resolve(
            props.style.as_ref(),
            props.dark_style.as_ref(),
            scheme.is_dark(),
            &catalog,
        );
        let initial = props.viewport.clone().unwrap_or_default();
        let mut map = factory(MapOptions {
            style: style.clone(),
            center: initial.center,
            bounds: initial.bounds,
            fit_padding: initial.padding,
            zoom: initial.zoom,
            pitch: initial.pitch,
            bearing: initial.bearing,
            interactive: props.on_viewport_change.is_some(),
            projection: props.projection.clone(),
            extra: props.options,
        })?;

        if props.debug_flags != DebugFlags::default() {
            map.set_debug_flags(&props.debug_flags);
        }
        if let Some(cursor) = props.cursor.as_deref() {
            map.set_cursor(Some(cursor));
        }
        let mut bindings = EventBindingRegistry::new();
        bindings.sync(&mut map, &props.handlers);

        debug!(container = %container, "map mounted");
        Ok(Self {
            map,
            ready: false,
            reconciler: ViewportReconciler::new(container, initial.bounds),
            transition: TransitionState::new(props.transition),
            style_sync: StyleSync::new(props.foreign_prefix, Some(style)),
            bindings,
            scheme_version: scheme.version(),
            scheme,
            catalog,
            viewport: props.viewport,
            light: props.style,
            dark: props.dark_style,
            debug_flags: props.debug_flags,
            cursor: props.cursor,
            projection: props.projection,
            handlers: props.handlers,
            disable_resize: props.disable_resize,
            debug: props.debug,
            on_viewport_change: props.on_viewport_change,
        })
    }

    /// Engine handle, available once the load signal arrived.
    pub fn map(&self) -> Option<&M> {
        self.ready.then_some(&self.map)
    }

    /// Whether the load signal arrived.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Container id stamped on reports.
    pub fn container(&self) -> &ContainerId {
        self.reconciler.container()
    }

    /// Token stamped on reports; viewports carrying it are never applied.
    pub fn origin(&self) -> OriginToken {
        self.reconciler.origin()
    }

    /// Primitive the next programmatic movement uses.
    pub fn transition(&self) -> TransitionMode {
        self.transition.current()
    }

    /// Last viewport supplied by the caller.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Last resolved style handed to the engine.
    pub fn style(&self) -> Option<&StyleDocument> {
        self.style_sync.applied()
    }

    /// React to one engine event.
    pub fn handle_event(&mut self, event: &MapEvent) {
        self.sync_color_scheme();
        match event {
            MapEvent::Load => {
                self.ready = true;
                debug!(container = %self.container(), "map ready");
            }
            MapEvent::StyleData => {
                self.style_sync.on_style_data(&mut self.map);
            }
            MapEvent::Move(ev) => {
                let report = self.reconciler.on_move(
                    &self.map,
                    ev,
                    self.viewport.as_ref(),
                    &mut self.transition,
                );
                self.emit(report);
            }
            MapEvent::MoveEnd(ev) => {
                let report = self.reconciler.on_move_end(
                    &self.map,
                    ev,
                    self.viewport.as_ref(),
                    &mut self.transition,
                );
                self.emit(report);
            }
            MapEvent::ContainerResized => {
                if !self.disable_resize {
                    self.map.resize();
                }
            }
            MapEvent::Error(message) => {
                warn!(container = %self.container(), %message, "map engine error");
            }
        }
    }

    /// Re-resolve the style if the color scheme flipped since the last check.
    pub fn sync_color_scheme(&mut self) {
        let version = self.scheme.version();
        if version != self.scheme_version {
            self.scheme_version = version;
            self.log_update("color scheme", &self.scheme.is_dark());
            self.restyle();
        }
    }

    /// Push a caller viewport: report a changed bounds box, then move the
    /// camera unless the viewport is this view's own echo.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
        let Some(vp) = self.viewport.clone() else {
            return;
        };
        let fitted = self.reconciler.on_bounds_change(&self.map, &vp);
        self.emit(fitted);
        self.log_update("viewport", &vp);
        self.reconciler
            .apply_external(&mut self.map, &vp, self.transition.current());
    }

    /// Light style reference.
    pub fn set_style(&mut self, style: Option<StyleRef>) {
        self.light = style;
        self.restyle();
    }

    /// Dark style reference.
    pub fn set_dark_style(&mut self, style: Option<StyleRef>) {
        self.dark = style;
        self.restyle();
    }

    /// Default movement primitive.
    pub fn set_transition(&mut self, mode: TransitionMode) {
        if mode == self.transition.default_mode() {
            return;
        }
        self.log_update("transition", &mode);
        self.transition.apply(TransitionEvent::DefaultChanged(mode));
    }

    /// Debug overlays.
    pub fn set_debug_flags(&mut self, flags: DebugFlags) {
        if flags == self.debug_flags {
            return;
        }
        self.log_update("debug flags", &flags);
        self.map.set_debug_flags(&flags);
        self.debug_flags = flags;
    }

    /// Canvas cursor.
    pub fn set_cursor(&mut self, cursor: Option<String>) {
        if cursor == self.cursor {
            return;
        }
        self.log_update("cursor", &cursor);
        self.map.set_cursor(cursor.as_deref());
        self.cursor = cursor;
    }

    /// Map projection.
    pub fn set_projection(&mut self, projection: Option<Projection>) {
        if projection == self.projection {
            return;
        }
        self.log_update("projection", &projection.as_ref().map(|p| &p.name));
        self.map.set_projection(projection.as_ref());
        self.projection = projection;
    }

    /// Replace the declared handlers and resubscribe.
    pub fn set_handlers(&mut self, handlers: HandlerSet) {
        self.bindings.sync(&mut self.map, &handlers);
        self.handlers = handlers;
    }

    /// Stop or resume forwarding container resizes.
    pub fn set_disable_resize(&mut self, disable: bool) {
        self.disable_resize = disable;
    }

    /// Toggle prop update logging.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Replace the report callback. Interactivity stays as mounted.
    pub fn set_on_viewport_change(&mut self, callback: Option<ViewportCallback>) {
        self.on_viewport_change = callback;
    }

    /// Apply a full prop set, touching only what changed.
    ///
    /// `id` and `foreign_prefix` are fixed at mount and ignored here. The
    /// report callback is always replaced by `props.on_viewport_change`:
    /// omitting it stops reports while the engine stays interactive, since
    /// interactivity is decided once at mount.
    pub fn update(&mut self, props: MapProps) {
        self.debug = props.debug;
        self.disable_resize = props.disable_resize;
        self.on_viewport_change = props.on_viewport_change;
        self.set_transition(props.transition);
        self.set_debug_flags(props.debug_flags);
        self.set_cursor(props.cursor);
        self.set_projection(props.projection);
        if !props.handlers.same_as(&self.handlers) {
            self.set_handlers(props.handlers);
        }
        if props.style != self.light || props.dark_style != self.dark {
            self.light = props.style;
            self.dark = props.dark_style;
            self.restyle();
        }
        if props.viewport != self.viewport {
            self.set_viewport(props.viewport);
        }
        self.sync_color_scheme();
    }

    /// Remove every subscription and hand the engine back.
    pub fn unmount(mut self) -> M {
        self.bindings.clear(&mut self.map);
        debug!(container = %self.container(), "map unmounted");
        self.map
    }

    fn restyle(&mut self) {
        let doc = resolve(
            self.light.as_ref(),
            self.dark.as_ref(),
            self.scheme.is_dark(),
            &self.catalog,
        );
        if self.style_sync.applied() != Some(&doc) {
            self.log_update("style", &doc.extra.get("name"));
        }
        self.style_sync.apply(&mut self.map, doc);
    }

    fn emit(&mut self, report: Option<Viewport>) {
        if let (Some(report), Some(callback)) = (report, self.on_viewport_change.as_mut()) {
            callback(report);
        }
    }

    fn log_update(&self, what: &str, value: &dyn fmt::Debug) {
        if self.debug {
            debug!(container = %self.container(), what, ?value, "prop update");
        }
    }
}
