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

//! State normalization for the GameFabric Terraform provider
//!
//! The GameFabric API does not keep track of which fields were set by the user:
//! a resource read back from it has `""`, `0`, `false` or `{}` wherever the user wrote nothing,
//! and canonical quantities (`"1"`) wherever the user wrote another form (`"1000m"`).
//! Storing such a model as is would make Terraform report a diff on every plan.
//!
//! This crate reconciles a model read from the API with the prior plan or state:
//!
//! - [`normalize`] decides, field by field, between null and the zero value,
//! - [`preserve_quantities`] keeps the planned text of numerically equal quantities,
//! - [`reconcile`] chains both from the raw prior value handed over by Terraform.
//!
//! Models are declared with the [`model!`] macro, and the GameFabric ones live in [`models`].

mod attribute_path;
mod diagnostics;
mod dynamic;
mod logging;
mod preserve;
mod quantity;
mod raw;
mod reconcile;
mod reference;

pub mod models;
pub mod normalize;
pub mod value;

pub use attribute_path::{AttributePath, AttributePathStep};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use dynamic::Dynamic;
pub use logging::{init_logging, LogConfig};
pub use normalize::normalize;
pub use preserve::{preserve_quantities, ContainerLike, QuantityField};
pub use quantity::{Quantity, QuantityError};
pub use raw::RawValue;
pub use reconcile::reconcile;
pub use reference::ReferenceState;

#[macro_export]
/// Build a map
///
/// # Examples
///
/// ```
/// # use tf_gamefabric::{map, value::{ValueMap, ValueString}};
/// # use std::collections::BTreeMap;
/// let labels: BTreeMap<String, ValueString> = map!{
///     "team" => "core",
///     "tier" => "gold",
/// };
/// let labels: ValueMap<ValueString> = labels.into();
/// ```
///
/// # Remarks
///
/// Keys and Values are converted with [`Into::into`] to build the map.
/// Because of that, type annotations are usually required.
macro_rules! map {
    {$($key:expr => $value:expr),*} => {
        ::std::iter::FromIterator::from_iter([
            $(($key.into(), $value.into()),)*
        ])
    };

    {$($key:expr => $value:expr),+ ,} => { $crate::map!{$($key => $value),+} };
}
