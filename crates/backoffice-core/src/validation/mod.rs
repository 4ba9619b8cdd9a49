//! Generic validator and common validation rules.
use crate::{error::Error, extension::JsonObjectExt, Map, SharedString};
use smallvec::SmallVec;
use std::fmt;

mod validator;

pub use validator::{FloatValidator, Validator};

/// A record of validation results.
#[derive(Debug, Default)]
pub struct Validation {
    failed_entries: SmallVec<[(SharedString, Error); 4]>,
}

impl Validation {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            failed_entries: SmallVec::new(),
        }
    }

    /// Records an entry with the supplied message.
    #[inline]
    pub fn record(&mut self, key: impl Into<SharedString>, message: impl Into<SharedString>) {
        self.failed_entries.push((key.into(), Error::new(message)));
    }

    /// Returns `true` if the validation contains a value for the specified key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.failed_entries.iter().any(|(field, _)| field == key)
    }

    /// Returns `true` if the validation is success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failed_entries.is_empty()
    }

    /// Returns a list of invalid params.
    #[inline]
    pub fn invalid_params(&self) -> Vec<&str> {
        self.failed_entries
            .iter()
            .map(|entry| entry.0.as_ref())
            .collect()
    }

    /// Consumes the validation and returns as a json object.
    #[must_use]
    pub fn into_map(self) -> Map {
        let mut map = Map::new();
        for (key, err) in self.failed_entries {
            let message = err.message();
            tracing::warn!("invalid value for `{key}`: {message}");
            map.upsert(key, message);
        }
        map
    }
}

impl fmt::Display for Validation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let failed_entries = &self.failed_entries;
        let mut errors = Vec::with_capacity(failed_entries.len());
        for (key, err) in failed_entries {
            let message = format!("invalid value for `{key}`: {}", err.message());
            errors.push(message);
        }
        write!(f, "{}", errors.join(","))
    }
}
