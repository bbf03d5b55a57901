// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Elkron library.
//!
//! This module provides the error hierarchy used across the library:
//! panel communication, payload parsing, and configuration loading.
//!
//! An indeterminate alarm state is *not* an error: it is reported as
//! [`ResolvedState::Unknown`](crate::state::ResolvedState::Unknown).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the alarm panel.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a panel payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The panel configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to communication with the panel.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The panel answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The panel rejected the credentials or the session expired.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Login was attempted without credentials.
    #[error("no credentials configured")]
    MissingCredentials,
}

/// Errors related to parsing panel payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the payload.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected payload format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to the panel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A zone identifier could not be parsed.
    #[error("invalid zone '{value}' in state '{state}'")]
    InvalidZone {
        /// The state whose zone list is invalid.
        state: String,
        /// The offending token.
        value: String,
    },

    /// A required configuration field is missing or empty.
    #[error("missing configuration field: {0}")]
    MissingField(&'static str),

    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
