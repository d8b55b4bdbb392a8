// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Keyed JSON persistence behind a storage port.
//!
//! Keys are short logical names (`map-settings`, `style-catalog`) that a
//! store maps onto files or entries. [`validate_key`] runs before every
//! store call so no adapter ever sees a key that could leave its namespace.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Longest accepted key.
pub const MAX_KEY_LEN: usize = 64;

/// Storage port for raw config blobs.
pub trait ConfigStore {
    /// Load the blob for `key`. [`ConfigError::NotFound`] when absent.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist the blob for `key`, replacing any previous one.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
    /// Drop the blob for `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), ConfigError>;
}

/// Config failures, each naming the key involved where there is one.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing stored under the key.
    #[error("no stored value for `{0}`")]
    NotFound(String),
    /// Key is empty, too long, or uses characters outside `[a-z0-9_-]`.
    #[error("invalid config key `{0}`")]
    InvalidKey(String),
    /// Stored bytes are not the expected JSON shape.
    #[error("stored value for `{key}` does not decode: {source}")]
    Decode {
        /// Key being loaded.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// Value could not be turned into JSON.
    #[error("value for `{key}` does not encode: {source}")]
    Encode {
        /// Key being saved.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// Filesystem or OS failure inside a store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Store-specific failure with no better variant.
    #[error("backend: {0}")]
    Backend(String),
}

/// Accept `[a-z0-9_-]{1,64}`.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Typed JSON access over a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wrap `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Hand the store back.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Typed value under `key`.
    ///
    /// Absent keys and blank blobs load as `Ok(None)`; bytes that do not
    /// decode as `T` are an error naming the key.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Decode {
                key: key.to_owned(),
                source,
            })
    }

    /// Store `value` under `key` as pretty JSON.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        validate_key(key)?;
        let data = serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.store.save_raw(key, &data)
    }

    /// Load (or default), edit, save, and return the edited value.
    ///
    /// Nothing is written when the load fails.
    pub fn update<T, F>(&self, key: &str, edit: F) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T),
    {
        let mut value = self.load(key)?.unwrap_or_default();
        edit(&mut value);
        self.save(key, &value)?;
        Ok(value)
    }

    /// Forget `key`.
    pub fn remove(&self, key: &str) -> Result<(), ConfigError> {
        validate_key(key)?;
        self.store.remove(key)
    }
}
