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

//! [`Dynamic`] module

use std::{collections::BTreeMap, fmt::Debug, str::from_utf8};

use serde::{
    de::Visitor,
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Serialize,
};

use crate::value::skip_extension;

/// Untyped value as found in a Terraform plan or state
///
/// Objects and maps are both decoded as [`Dynamic::Map`]: the wire formats do not tell them apart.
#[derive(Clone, PartialEq, Default)]
pub enum Dynamic {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Dynamic>),
    Map(BTreeMap<String, Dynamic>),
    #[default]
    Null,
    Unknown,
}

impl Dynamic {
    /// Check if the value is null
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
    /// Check if the value is unknown
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
    /// Name of the kind of value, used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Dynamic::String(_) => "string",
            Dynamic::Int(_) => "int",
            Dynamic::Float(_) => "float",
            Dynamic::Bool(_) => "bool",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Null => "null",
            Dynamic::Unknown => "unknown",
        }
    }

    /// Dump the json representation of the value
    pub fn json(&self) -> String {
        serde_json::to_string(self).unwrap_or("<invalid>".into())
    }
}

impl Debug for Dynamic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(x) => x.fmt(f),
            Self::Int(x) => x.fmt(f),
            Self::Float(x) => x.fmt(f),
            Self::Bool(x) => x.fmt(f),
            Self::List(x) => x.fmt(f),
            Self::Map(x) => x.fmt(f),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::String(x) => serializer.serialize_str(x),
            Dynamic::Int(x) => serializer.serialize_i64(*x),
            Dynamic::Float(x) => serializer.serialize_f64(*x),
            Dynamic::Bool(x) => serializer.serialize_bool(*x),
            Dynamic::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Dynamic::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    ser.serialize_entry(key, item)?;
                }
                ser.end()
            }
            Dynamic::Null => serializer.serialize_none(),
            Dynamic::Unknown => Err(serde::ser::Error::custom(
                "unknown values cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "any value")
            }
            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::Bool(v))
            }
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::Int(v))
            }
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(match i64::try_from(v) {
                    Ok(v) => Dynamic::Int(v),
                    Err(_) => Dynamic::Float(v as f64),
                })
            }
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::Float(v))
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::String(v.to_owned()))
            }
            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::String(v))
            }
            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::String(
                    from_utf8(v).map_err(serde::de::Error::custom)?.to_owned(),
                ))
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::Null)
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Dynamic::Null)
            }
            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Dynamic::deserialize(deserializer)
            }
            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                skip_extension(deserializer).and(Ok(Dynamic::Unknown))
            }
            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                Vec::<Dynamic>::deserialize(serde::de::value::SeqAccessDeserializer::new(seq))
                    .map(Dynamic::List)
            }
            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                BTreeMap::<String, Dynamic>::deserialize(
                    serde::de::value::MapAccessDeserializer::new(map),
                )
                .map(Dynamic::Map)
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}
