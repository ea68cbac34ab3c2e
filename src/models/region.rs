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

use serde::{Deserialize, Serialize};

use crate::{
    model,
    value::{ValueList, ValueString},
};

use super::common::{EnvVarModel, MetadataModel};

/// Region: a named group of locations, split into region types
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionModel {
    pub metadata: MetadataModel,
    pub display_name: ValueString,
    pub description: ValueString,
    pub types: ValueList<RegionTypeModel>,
}

model!(RegionModel {
    metadata => "metadata",
    display_name => "display_name",
    description => "description",
    types => "types",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionTypeModel {
    pub name: ValueString,
    pub locations: ValueList<ValueString>,
    pub envs: ValueList<EnvVarModel>,
    /// `Packed` or `Distributed`
    pub scheduling: ValueString,
}

model!(RegionTypeModel {
    name => "name",
    locations => "locations",
    envs => "envs",
    scheduling => "scheduling",
});
