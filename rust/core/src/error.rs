// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model construction, lookup and component inputs.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or editing an energy model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named resource is not present in the library.
    #[error("{kind} \"{name}\" was not found in the library")]
    Lookup { kind: &'static str, name: String },

    /// An input value is not one of the accepted object kinds.
    #[error("input must be a {expected}, not {found}")]
    UnsupportedObjectKind { expected: &'static str, found: String },

    /// An input value violates a model constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reading a library or model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with a formatted message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
