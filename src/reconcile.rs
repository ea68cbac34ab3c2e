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

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    diagnostics::Diagnostics, dynamic::Dynamic, models::WithContainers, normalize::normalize,
    normalize::AsNode, preserve::preserve_quantities, raw::RawValue,
};

/// Reconcile a model read from the backend with the prior plan or state of the resource
///
/// The model is normalized against `prior`, then the quantities of its containers are
/// aligned on the ones of `prior`. A null `prior` (import, first read) leaves the model untouched.
///
/// Quantities are not aligned if normalization failed.
pub fn reconcile<M>(model: &mut M, prior: &RawValue) -> Diagnostics
where
    M: AsNode + WithContainers + DeserializeOwned,
{
    let mut diags = Diagnostics::default();
    if prior.is_null() {
        debug!("no prior value to reconcile with");
        return diags;
    }

    let Some(reference) = prior.deserialize::<Dynamic>(&mut diags) else {
        return diags;
    };
    diags.add_diagnostics(normalize(model, &reference));
    if diags.has_errors() {
        return diags;
    }

    let Some(planned) = prior.deserialize::<M>(&mut diags) else {
        return diags;
    };
    for (state, plan) in model
        .container_lists_mut()
        .into_iter()
        .zip(planned.container_lists())
    {
        diags.add_diagnostics(preserve_quantities(state, plan));
    }
    diags
}
