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

//! [`Value`] module

use std::{collections::BTreeMap, fmt::Debug, marker::PhantomData, mem};

use serde::{
    de::{IgnoredAny, Visitor},
    Deserialize, Serialize,
};

/// Encode either a known value, a null value, or an unknown value as specified by the Terraform protocol.
///
/// [`Value`] is closely modeled after [`Option`] where:
/// - [`Value::Value`] is equivalent to [`Option::Some`],
/// - [`Value::Null`] is equivalent to [`Option::None`],
/// - [`Value::Unknown`] has no option counterpart and represent a value that is currently unknown, but will be known later on.
///
/// A known zero value (`""`, `0`, `false`) is *not* null: `Value::Value(String::new())` and
/// `Value::Null` are two different states, and telling them apart is the whole point of
/// [`normalize`](crate::normalize::normalize).
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub enum Value<T> {
    /// Value is present
    Value(T),
    /// No value is present
    #[default]
    Null,
    /// Value is unknown
    Unknown,
}

pub type ValueString = Value<String>;
pub type ValueInt = Value<i64>;
pub type ValueInt32 = Value<i32>;
pub type ValueFloat = Value<f64>;
pub type ValueBool = Value<bool>;
pub type ValueList<T> = Value<Vec<T>>;
pub type ValueMap<T> = Value<BTreeMap<String, T>>;

impl<T> Value<T> {
    /////////////////////////////////////////////////////////////////////////
    // Querying the contained values
    /////////////////////////////////////////////////////////////////////////

    /// Check if the value is known and present
    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Check if the value is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is unknown
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /////////////////////////////////////////////////////////////////////////
    // Adapter for working with references
    /////////////////////////////////////////////////////////////////////////

    /// Converts from `&Value<T>` to `Value<&T>`
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// let text: Value<String> = Value::Value("Hello, world!".to_string());
    /// let text_length: Value<usize> = text.as_ref().map(|s| s.len());
    /// assert_eq!(text_length, Value::Value(13));
    /// ```
    #[inline]
    pub const fn as_ref(&self) -> Value<&T> {
        match *self {
            Self::Value(ref x) => Value::Value(x),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Converts from `&mut Value<T>` to `Value<&mut T>`
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// let mut x = Value::Value(2);
    /// if let Value::Value(v) = x.as_mut() {
    ///     *v = 42;
    /// }
    /// assert_eq!(x, Value::Value(42));
    /// ```
    #[inline]
    pub fn as_mut(&mut self) -> Value<&mut T> {
        match *self {
            Self::Value(ref mut x) => Value::Value(x),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Converts from `&Value<T>` to `Option<&T>`, unknown values being mapped to [`None`]
    #[inline]
    pub const fn as_ref_option(&self) -> Option<&T> {
        match *self {
            Self::Value(ref x) => Some(x),
            _ => None,
        }
    }

    /// Converts from `&mut Value<T>` to `Option<&mut T>`, unknown values being mapped to [`None`]
    #[inline]
    pub fn as_mut_option(&mut self) -> Option<&mut T> {
        match *self {
            Self::Value(ref mut x) => Some(x),
            _ => None,
        }
    }

    /// Converts from `Value<T>` to `Option<T>`, unknown values being mapped to [`None`]
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// assert_eq!(Value::Value(3).as_option(), Some(3));
    /// assert_eq!(Value::<i32>::Null.as_option(), None);
    /// assert_eq!(Value::<i32>::Unknown.as_option(), None);
    /// ```
    #[inline]
    pub fn as_option(self) -> Option<T> {
        match self {
            Self::Value(x) => Some(x),
            _ => None,
        }
    }

    /////////////////////////////////////////////////////////////////////////
    // Getting to contained values
    /////////////////////////////////////////////////////////////////////////

    /// Returns the contained [`Value::Value`] value or a provided default.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Value(x) => x,
            _ => default,
        }
    }

    /// Returns the contained [`Value::Value`] value or a default.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// let x: Value<u32> = Value::Value(12);
    /// let y: Value<u32> = Value::Unknown;
    /// assert_eq!(x.unwrap_or_default(), 12);
    /// assert_eq!(y.unwrap_or_default(), 0);
    /// ```
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Value(x) => x,
            _ => Default::default(),
        }
    }

    /////////////////////////////////////////////////////////////////////////
    // Transforming contained values
    /////////////////////////////////////////////////////////////////////////

    /// Maps a `Value<T>` to `Value<U>` by applying a function to a contained value.
    /// [`Value::Null`] and [`Value::Unknown`] are kept as is.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Value<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(x) => Value::Value(f(x)),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Returns the provided default (if not [`Value::Value`]),
    /// or applies a function to the contained value.
    #[inline]
    pub fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(x) => f(x),
            _ => default,
        }
    }

    /////////////////////////////////////////////////////////////////////////
    // Misc
    /////////////////////////////////////////////////////////////////////////

    /// Takes the value out, leaving a [`Value::Null`] in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// let mut x = Value::Value(2);
    /// let y = x.take();
    /// assert_eq!(x, Value::Null);
    /// assert_eq!(y, Value::Value(2));
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Value::Null)
    }

    /// Replaces the actual value by the value given in parameter,
    /// returning the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tf_gamefabric::value::Value;
    /// let mut x = Value::Unknown;
    /// let old = x.replace(3);
    /// assert_eq!(x, Value::Value(3));
    /// assert_eq!(old, Value::Unknown);
    /// ```
    #[inline]
    pub fn replace(&mut self, val: T) -> Self {
        mem::replace(self, Value::Value(val))
    }
}

impl Value<String> {
    /// Get the string slice, empty if the value is not known
    pub fn as_str(&self) -> &str {
        match self {
            Value::Value(s) => s.as_str(),
            _ => "",
        }
    }
}

impl<T: Debug> Debug for Value<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl<T> From<T> for Value<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Value<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Value(value) => serializer.serialize_some(value),
            Value::Null => serializer.serialize_none(),
            Value::Unknown => Err(serde::ser::Error::custom(
                "unknown values cannot be persisted into the state",
            )),
        }
    }
}

macro_rules! forward_visit {
    ([ -> ]) => {
        serde::de::IntoDeserializer::into_deserializer
    };
    ([ -> $de:ident]) => {
        serde::de::value::$de::new
    };
    ($($visit:ident($value:ty)$(-> $de:ident)?),*$(,)?) => {
        $(
            fn $visit<E>(self, v: $value) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                T::deserialize(forward_visit!([-> $($de)?])(v)).map(Value::Value)
            }
        )*
    };
}

macro_rules! forward_visit_trait {
    ([ ($v:ident) ]) => {
        $v
    };
    ([ $de:ident($v:ident)]) => {
        serde::de::value::$de::new($v)
    };
    ($($visit:ident($($trait:tt)*)$(-> $de:ident)?),*$(,)?) => {
        $(
            fn $visit<E>(self, v: E) -> Result<Self::Value, E::Error>
            where
                E: $($trait)*,
            {
                T::deserialize(forward_visit_trait!([$($de)?(v)])).map(Value::Value)
            }
        )*
    };
}

/// Unknown values are encoded by Terraform as a Message Pack extension,
/// handed over to visitors as a newtype struct
pub(crate) fn skip_extension<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    IgnoredAny::deserialize(deserializer).map(|_| ())
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Value<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ValueVisitor<T>(PhantomData<T>);
        impl<'de, T: Deserialize<'de>> Visitor<'de> for ValueVisitor<T> {
            type Value = Value<T>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "any value")
            }

            forward_visit!(
                visit_bool(bool),
                visit_borrowed_bytes(&'de [u8]) -> BorrowedBytesDeserializer,
                visit_borrowed_str(&'de str) -> BorrowedStrDeserializer,
                visit_bytes(&[u8]),
                visit_f32(f32),
                visit_f64(f64),
                visit_i8(i8),
                visit_i16(i16),
                visit_i32(i32),
                visit_i64(i64),
                visit_u8(u8),
                visit_u16(u16),
                visit_u32(u32),
                visit_u64(u64),
                visit_str(&str),
                visit_string(String),
            );
            forward_visit_trait!(
                visit_enum(serde::de::EnumAccess<'de>) -> EnumAccessDeserializer,
                visit_map(serde::de::MapAccess<'de>) -> MapAccessDeserializer,
                visit_seq(serde::de::SeqAccess<'de>) -> SeqAccessDeserializer,
                visit_some(serde::Deserializer<'de>),
            );

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                skip_extension(deserializer).and(Ok(Value::Unknown))
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::Null)
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::Null)
            }
        }
        deserializer.deserialize_any(ValueVisitor(PhantomData))
    }
}
