// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payloads returned by Elkron panels.
//!
//! The panel answers with loosely structured JSON. Only the fields the
//! library relies on are typed; everything else is kept verbatim so it can
//! be exposed for diagnostics.

mod detailed_state;
mod login;
mod structure;

pub use detailed_state::DetailedState;
pub use login::LoginResponse;
pub use structure::{PlantStructure, ZoneEntry};
