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

use crate::{model, value::ValueString};

use super::common::MetadataModel;

/// Image updater: rolls an armada or a formation when a new image is pushed to a branch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageUpdaterModel {
    pub metadata: MetadataModel,
    pub branch: ValueString,
    pub image: ValueString,
    pub target: ImageUpdaterTargetModel,
}

model!(ImageUpdaterModel {
    metadata => "metadata",
    branch => "branch",
    image => "image",
    target => "target",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageUpdaterTargetModel {
    /// `Armada`, `ArmadaSet` or `Formation`
    #[serde(rename = "type")]
    pub kind: ValueString,
    pub name: ValueString,
}

model!(ImageUpdaterTargetModel {
    kind => "type",
    name => "name",
});
