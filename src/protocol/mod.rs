// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with Elkron panels.
//!
//! The [`Gateway`] trait is the boundary between the panel adapter and the
//! network. [`HttpGateway`] implements it over the panel's JSON web API;
//! tests and alternative transports provide their own implementations.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{Credentials, HttpConfig, HttpGateway};

use std::future::Future;

use serde_json::Value;

use crate::error::Error;
use crate::response::{DetailedState, PlantStructure};
use crate::types::ZoneSet;

/// Client side of the alarm panel.
///
/// Implementations perform blocking network work inside the returned
/// futures; the adapter never holds a lock across them.
pub trait Gateway: Send + Sync {
    /// Opens a session with the panel.
    ///
    /// # Errors
    ///
    /// Returns error if the panel is unreachable or rejects the credentials.
    fn login(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Fetches the detailed state, which carries the active zones.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload is not JSON.
    fn fetch_detailed_state(&self) -> impl Future<Output = Result<DetailedState, Error>> + Send;

    /// Fetches the system information.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload is not JSON.
    fn fetch_system_info(&self) -> impl Future<Output = Result<Value, Error>> + Send;

    /// Fetches the zone layout of the installation.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload has no zone list.
    fn fetch_structure(&self) -> impl Future<Output = Result<PlantStructure, Error>> + Send;

    /// Arms the given zones.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the panel rejects the code.
    fn activate(
        &self,
        code: Option<&str>,
        zones: &ZoneSet,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Disarms the given zones.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the panel rejects the code.
    fn deactivate(
        &self,
        code: Option<&str>,
        zones: &ZoneSet,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}
