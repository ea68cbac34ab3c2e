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
    value::{ValueBool, ValueList, ValueMap, ValueString},
};

use super::{
    common::{HealthChecksModel, MetadataModel, TerminationConfigurationModel, VolumeModel},
    container::ContainerModel,
    containers, containers_mut, WithContainers,
};

/// Vessel: a single long running game server
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselModel {
    pub metadata: MetadataModel,
    pub region: ValueString,
    pub description: ValueString,
    pub suspend: ValueBool,
    pub gameserver_labels: ValueMap<ValueString>,
    pub gameserver_annotations: ValueMap<ValueString>,
    pub containers: ValueList<ContainerModel>,
    pub health_checks: Option<HealthChecksModel>,
    pub termination_configuration: Option<TerminationConfigurationModel>,
    pub volumes: ValueList<VolumeModel>,
    pub gateway_policies: ValueList<ValueString>,
    pub profiling_enabled: ValueBool,
}

model!(VesselModel {
    metadata => "metadata",
    region => "region",
    description => "description",
    suspend => "suspend",
    gameserver_labels => "gameserver_labels",
    gameserver_annotations => "gameserver_annotations",
    containers => "containers",
    health_checks => "health_checks",
    termination_configuration => "termination_configuration",
    volumes => "volumes",
    gateway_policies => "gateway_policies",
    profiling_enabled => "profiling_enabled",
});

impl WithContainers for VesselModel {
    fn container_lists(&self) -> Vec<&[ContainerModel]> {
        vec![containers(&self.containers)]
    }
    fn container_lists_mut(&mut self) -> Vec<&mut [ContainerModel]> {
        vec![containers_mut(&mut self.containers)]
    }
}
