// This file is part of the tf-gamefabric project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`RawValue`] module

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};

/// Encode a plan or state with either Message Pack or JSON encoding
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RawValue {
    /// Message Pack encoded value
    MessagePack(Vec<u8>),
    /// JSON encoded value
    Json(Vec<u8>),
}

const NULL_MESSAGE_PACK: [u8; 1] = [0xc0_u8];
const NULL_JSON: &str = "null";

impl RawValue {
    /// Check if the encoded value is null
    pub fn is_null(&self) -> bool {
        match self {
            RawValue::MessagePack(mp) => mp.is_empty() || mp.as_slice() == NULL_MESSAGE_PACK,
            RawValue::Json(json) => json.is_empty() || json.as_slice() == NULL_JSON.as_bytes(),
        }
    }

    /// Deserialize a [`RawValue`] into a concrete type
    ///
    /// # Arguments
    ///
    /// * `diags` - diagnostics where deserialization errors and warnings are reported
    ///
    /// # Remarks
    ///
    /// Returns [`None`] iff there is an error reported in diagnostics
    pub fn deserialize<'a, T>(&'a self, diags: &mut Diagnostics) -> Option<T>
    where
        T: Deserialize<'a>,
    {
        let decoded = match self {
            Self::MessagePack(mp) => {
                let slice = if mp.is_empty() {
                    &NULL_MESSAGE_PACK
                } else {
                    mp.as_slice()
                };
                rmp_serde::from_slice::<T>(slice).map_err(|err| err.to_string())
            }
            Self::Json(json) => {
                let slice = if json.is_empty() {
                    NULL_JSON.as_bytes()
                } else {
                    json.as_slice()
                };
                serde_json::from_slice::<T>(slice).map_err(|err| err.to_string())
            }
        };
        match decoded {
            Ok(value) => Some(value),
            Err(err) => {
                diags.root_error("Invalid prior value", err);
                None
            }
        }
    }

    /// Serialize `value` into a Message Pack encoded [`RawValue`]
    ///
    /// # Arguments
    ///
    /// * `diags` - diagnostics where serialization errors and warnings are reported
    /// * `value` - object to encode
    ///
    /// # Remarks
    ///
    /// Returns [`None`] iff there is an error reported in diagnostics
    pub fn serialize<T>(diags: &mut Diagnostics, value: &T) -> Option<RawValue>
    where
        T: Serialize,
    {
        match rmp_serde::to_vec_named(value) {
            Ok(value) => Some(Self::MessagePack(value)),
            Err(err) => {
                diags.root_error("Invalid state value", err.to_string());
                None
            }
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::MessagePack(NULL_MESSAGE_PACK.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        dynamic::Dynamic,
        value::{Value, ValueString},
    };

    #[test]
    fn empty_buffers_are_null() {
        assert!(RawValue::default().is_null());
        assert!(RawValue::Json(vec![]).is_null());
        assert!(RawValue::MessagePack(vec![]).is_null());
        assert!(!RawValue::Json(b"{}".to_vec()).is_null());
    }

    #[test]
    fn message_pack_keeps_field_names() {
        let mut diags = Diagnostics::default();
        let value: Dynamic =
            serde_json::from_str(r#"{"name": "eu", "replicas": 2, "labels": null}"#).unwrap();
        let raw = RawValue::serialize(&mut diags, &value).unwrap();
        let decoded: Dynamic = raw.deserialize(&mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(decoded, value);
    }

    #[test]
    fn unknown_values_are_decoded() {
        // {"id": <unknown>}
        let raw = RawValue::MessagePack(vec![0x81, 0xa2, b'i', b'd', 0xd4, 0x00, 0x00]);
        let mut diags = Diagnostics::default();

        let decoded: Dynamic = raw.deserialize(&mut diags).unwrap();
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(
            decoded,
            Dynamic::Map(BTreeMap::from([("id".to_owned(), Dynamic::Unknown)]))
        );

        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct Plan {
            id: ValueString,
            name: ValueString,
        }
        let decoded: Plan = raw.deserialize(&mut diags).unwrap();
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(decoded.id, Value::Unknown);
        assert_eq!(decoded.name, Value::Null);
    }

    #[test]
    fn decode_errors_are_reported() {
        let mut diags = Diagnostics::default();
        let raw = RawValue::Json(b"{not json".to_vec());
        assert!(raw.deserialize::<Dynamic>(&mut diags).is_none());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "Invalid prior value");
    }
}
