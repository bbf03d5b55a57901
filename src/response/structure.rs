// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plant structure parsing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::ZoneId;

/// Zone layout of the installation.
///
/// # Examples
///
/// ```
/// use elkron_lib::response::PlantStructure;
///
/// let json = r#"{"cfgzone": [{"NAME": "Garage", "NID": 1}, {"NAME": "Hall", "NID": "2"}]}"#;
/// let structure: PlantStructure = serde_json::from_str(json).unwrap();
/// assert_eq!(structure.zones.len(), 2);
/// assert_eq!(structure.zones[1].zone_id, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PlantStructure {
    /// Configured zones.
    #[serde(rename = "cfgzone")]
    pub zones: Vec<ZoneEntry>,
}

impl PlantStructure {
    /// Field of the structure payload listing the zones.
    pub const ZONE_LIST_FIELD: &'static str = "cfgzone";

    /// Parses a structure payload.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the payload is not an
    /// object, `ParseError::MissingField` if it has no `cfgzone` list and
    /// `ParseError::Json` if a zone entry is malformed.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ParseError::UnexpectedFormat(format!(
                    "structure should be an object, got {other}"
                )));
            }
        };

        let zones = fields
            .remove(Self::ZONE_LIST_FIELD)
            .filter(|zones| !zones.is_null())
            .ok_or_else(|| ParseError::MissingField(Self::ZONE_LIST_FIELD.to_string()))?;

        Ok(Self {
            zones: serde_json::from_value(zones)?,
        })
    }
}

/// A single configured zone.
///
/// Serialized as `{"name", "zoneId"}` when exposed as an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ZoneEntry {
    /// Display name of the zone.
    #[serde(rename(deserialize = "NAME", serialize = "name"))]
    pub name: String,

    /// Zone identifier.
    #[serde(
        rename(deserialize = "NID", serialize = "zoneId"),
        deserialize_with = "zone_id_lenient"
    )]
    pub zone_id: ZoneId,
}

/// Some firmwares report `NID` as a string.
fn zone_id_lenient<'de, D>(deserializer: D) -> Result<ZoneId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(ZoneId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid zone id: {text}"))),
    }
}
