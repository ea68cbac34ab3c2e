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

use std::collections::BTreeMap;

use crate::{attribute_path::AttributePathStep, dynamic::Dynamic, value::Value};

/// Mutable view on a node of a model, as seen by the normalizer
///
/// The set of kinds is closed: anything that is not one of the supported kinds
/// is exposed as [`Node::Unsupported`] and reported when walked.
pub enum Node<'a> {
    /// Wrapped primitive (`Value<String>`, `Value<i64>`, ...)
    Scalar(&'a mut dyn Scalar),
    /// Nested model that may be absent (`Option<M>`)
    Optional(&'a mut dyn OptionalModel),
    /// Nested model that is always present
    Struct(&'a mut dyn Model),
    /// `Value<BTreeMap<String, V>>`
    Map(&'a mut dyn Collection),
    /// `Value<Vec<V>>`
    List(&'a mut dyn Collection),
    /// Anything else, with the name of its type
    Unsupported(&'static str),
}

impl Node<'_> {
    /// Name of the kind of the node, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(scalar) => scalar.kind(),
            Node::Optional(_) => "optional",
            Node::Struct(_) => "struct",
            Node::Map(_) => "map",
            Node::List(_) => "list",
            Node::Unsupported(kind) => *kind,
        }
    }

    /// Check if the node holds the zero value of its kind
    ///
    /// Null scalars and collections, absent optionals, and structs whose fields are all zero.
    /// A known `""` or `0` is *not* zero here: it is a value.
    pub fn is_zero(&mut self) -> bool {
        match self {
            Node::Scalar(scalar) => scalar.is_null(),
            Node::Optional(optional) => optional.is_absent(),
            Node::Struct(model) => model.is_zero(),
            Node::Map(collection) | Node::List(collection) => collection.is_null(),
            Node::Unsupported(_) => false,
        }
    }
}

/// Conversion of a model field into a [`Node`]
pub trait AsNode {
    fn as_node(&mut self) -> Node<'_>;
}

/// Model made of named fields
///
/// Implement it with the [`model!`](crate::model) macro.
pub trait Model {
    /// Fields of the model in declaration order, with their attribute name
    fn fields(&mut self) -> Vec<(&'static str, Node<'_>)>;

    /// Check if all the fields of the model are zero
    fn is_zero(&mut self) -> bool {
        self.fields().into_iter().all(|(_, mut node)| node.is_zero())
    }
}

/// Primitive type that can be wrapped in a [`Value`] and normalized
pub trait Primitive: Sized {
    /// Name of the primitive kind
    const KIND: &'static str;

    /// Check if the value is the zero value of the kind.
    /// Kinds without a zero value are never zero.
    fn is_zero(&self) -> bool {
        false
    }

    /// Extract a value of this kind from a reference value
    fn from_dynamic(value: &Dynamic) -> Option<Self>;
}

impl Primitive for String {
    const KIND: &'static str = "string";
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        match value {
            Dynamic::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Primitive for i64 {
    const KIND: &'static str = "int64";
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        match *value {
            Dynamic::Int(i) => Some(i),
            Dynamic::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
            _ => None,
        }
    }
}

impl Primitive for i32 {
    const KIND: &'static str = "int32";
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        i64::from_dynamic(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl Primitive for f64 {
    const KIND: &'static str = "float64";
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        match *value {
            Dynamic::Float(f) => Some(f),
            Dynamic::Int(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl Primitive for f32 {
    const KIND: &'static str = "float32";
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        f64::from_dynamic(value).map(|f| f as f32)
    }
}

impl Primitive for bool {
    const KIND: &'static str = "bool";
    fn is_zero(&self) -> bool {
        !*self
    }
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        match *value {
            Dynamic::Bool(b) => Some(b),
            _ => None,
        }
    }
}

/// Wrapped primitive
pub trait Scalar {
    fn kind(&self) -> &'static str;
    fn is_null(&self) -> bool;
    /// Check if the value is known and equal to the zero value of its kind
    fn is_zero_value(&self) -> bool;
    fn set_null(&mut self);
    /// Overwrite the value with the one held by `reference`
    fn restore(&mut self, reference: &Dynamic) -> Result<(), String>;
}

impl<T: Primitive> Scalar for Value<T> {
    fn kind(&self) -> &'static str {
        T::KIND
    }
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
    fn is_zero_value(&self) -> bool {
        self.as_ref().map_or(false, |value| value.is_zero())
    }
    fn set_null(&mut self) {
        *self = Value::Null;
    }
    fn restore(&mut self, reference: &Dynamic) -> Result<(), String> {
        let value = T::from_dynamic(reference).ok_or_else(|| {
            format!(
                "expected a {} but the reference holds a {}",
                T::KIND,
                reference.kind()
            )
        })?;
        *self = Value::Value(value);
        Ok(())
    }
}

/// Model that may be absent
pub trait OptionalModel {
    fn is_absent(&self) -> bool;
    fn set_absent(&mut self);
    fn present_mut(&mut self) -> Option<&mut dyn Model>;
    /// Replace the content with a zero-valued model and return it
    fn allocate(&mut self) -> &mut dyn Model;
}

impl<M: Model + Default> OptionalModel for Option<M> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
    fn set_absent(&mut self) {
        *self = None;
    }
    fn present_mut(&mut self) -> Option<&mut dyn Model> {
        match self {
            Some(model) => Some(model as &mut dyn Model),
            None => None,
        }
    }
    fn allocate(&mut self) -> &mut dyn Model {
        self.insert(M::default())
    }
}

impl<M: Model + Default> AsNode for Option<M> {
    fn as_node(&mut self) -> Node<'_> {
        Node::Optional(self)
    }
}

/// Map or list that can be null, empty, or filled
pub trait Collection {
    fn is_null(&self) -> bool;
    fn is_unknown(&self) -> bool;
    /// Number of elements, zero if the collection is not known
    fn len(&self) -> usize;
    fn set_null(&mut self);
    /// Replace the collection with a known, empty one
    fn set_empty(&mut self);
    /// Elements with the step to reach them
    fn children(&mut self) -> Vec<(AttributePathStep, Node<'_>)>;
}

impl<V: AsNode> Collection for Value<Vec<V>> {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
    fn is_unknown(&self) -> bool {
        Value::is_unknown(self)
    }
    fn len(&self) -> usize {
        self.as_ref().map_or(0, Vec::len)
    }
    fn set_null(&mut self) {
        *self = Value::Null;
    }
    fn set_empty(&mut self) {
        *self = Value::Value(Vec::new());
    }
    fn children(&mut self) -> Vec<(AttributePathStep, Node<'_>)> {
        match self {
            Value::Value(list) => list
                .iter_mut()
                .enumerate()
                .map(|(idx, item)| (AttributePathStep::Index(idx as i64), item.as_node()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl<V: AsNode> AsNode for Value<Vec<V>> {
    fn as_node(&mut self) -> Node<'_> {
        Node::List(self)
    }
}

impl<V: AsNode> Collection for Value<BTreeMap<String, V>> {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
    fn is_unknown(&self) -> bool {
        Value::is_unknown(self)
    }
    fn len(&self) -> usize {
        self.as_ref().map_or(0, BTreeMap::len)
    }
    fn set_null(&mut self) {
        *self = Value::Null;
    }
    fn set_empty(&mut self) {
        *self = Value::Value(BTreeMap::new());
    }
    fn children(&mut self) -> Vec<(AttributePathStep, Node<'_>)> {
        match self {
            Value::Value(map) => map
                .iter_mut()
                .map(|(key, item)| (AttributePathStep::Key(key.clone().into()), item.as_node()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl<V: AsNode> AsNode for Value<BTreeMap<String, V>> {
    fn as_node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

/// Expose `Value<T>` as a scalar node for each primitive `T`
///
/// `T` must implement [`Primitive`].
#[macro_export]
macro_rules! scalar_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::normalize::AsNode for $crate::value::Value<$ty> {
                fn as_node(&mut self) -> $crate::normalize::Node<'_> {
                    $crate::normalize::Node::Scalar(self)
                }
            }
        )+
    };
}

scalar_node!(String, i64, i32, f64, f32, bool);

macro_rules! unsupported_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsNode for $ty {
                fn as_node(&mut self) -> Node<'_> {
                    Node::Unsupported(std::any::type_name::<$ty>())
                }
            }
        )+
    };
}

unsupported_node!(String, i64, i32, f64, f32, bool, Dynamic);

/// Declare the fields of a model and their attribute names
///
/// Fields that are not listed are ignored by the normalizer.
///
/// # Examples
///
/// ```
/// use tf_gamefabric::{model, value::{ValueInt, ValueString}};
///
/// #[derive(Default)]
/// struct SiteModel {
///     name: ValueString,
///     capacity: ValueInt,
///     etag: String,
/// }
///
/// model!(SiteModel {
///     name => "name",
///     capacity => "capacity",
/// });
/// ```
#[macro_export]
macro_rules! model {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::normalize::Model for $ty {
            fn fields(
                &mut self,
            ) -> ::std::vec::Vec<(&'static str, $crate::normalize::Node<'_>)> {
                ::std::vec![
                    $(($name, $crate::normalize::AsNode::as_node(&mut self.$field)),)*
                ]
            }
        }

        impl $crate::normalize::AsNode for $ty {
            fn as_node(&mut self) -> $crate::normalize::Node<'_> {
                $crate::normalize::Node::Struct(self)
            }
        }
    };
}
