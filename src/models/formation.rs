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
    common::{
        EnvVarModel, HealthChecksModel, MetadataModel, TerminationConfigurationModel, VolumeModel,
    },
    container::ContainerModel,
    containers, containers_mut, WithContainers,
};

/// Formation: a group of vessels sharing a template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationModel {
    pub metadata: MetadataModel,
    pub description: ValueString,
    pub vessels: ValueList<FormationVesselModel>,
    pub template: VesselTemplateModel,
}

model!(FormationModel {
    metadata => "metadata",
    description => "description",
    vessels => "vessels",
    template => "template",
});

/// Vessel spawned by a formation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationVesselModel {
    pub name: ValueString,
    pub region: ValueString,
    pub description: ValueString,
    pub suspend: ValueBool,
    #[serde(rename = "override")]
    pub overrides: Option<VesselOverrideModel>,
}

model!(FormationVesselModel {
    name => "name",
    region => "region",
    description => "description",
    suspend => "suspend",
    overrides => "override",
});

/// Per vessel changes applied on top of the template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselOverrideModel {
    pub gameserver_labels: ValueMap<ValueString>,
    pub containers: ValueList<ContainerOverrideModel>,
}

model!(VesselOverrideModel {
    gameserver_labels => "gameserver_labels",
    containers => "containers",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOverrideModel {
    pub args: ValueList<ValueString>,
    pub envs: ValueList<EnvVarModel>,
}

model!(ContainerOverrideModel {
    args => "args",
    envs => "envs",
});

/// Template of the vessels of a formation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselTemplateModel {
    pub gameserver_labels: ValueMap<ValueString>,
    pub gameserver_annotations: ValueMap<ValueString>,
    pub containers: ValueList<ContainerModel>,
    pub health_checks: Option<HealthChecksModel>,
    pub termination_configuration: Option<TerminationConfigurationModel>,
    pub volumes: ValueList<VolumeModel>,
    pub gateway_policies: ValueList<ValueString>,
    pub profiling_enabled: ValueBool,
}

model!(VesselTemplateModel {
    gameserver_labels => "gameserver_labels",
    gameserver_annotations => "gameserver_annotations",
    containers => "containers",
    health_checks => "health_checks",
    termination_configuration => "termination_configuration",
    volumes => "volumes",
    gateway_policies => "gateway_policies",
    profiling_enabled => "profiling_enabled",
});

impl WithContainers for FormationModel {
    fn container_lists(&self) -> Vec<&[ContainerModel]> {
        vec![containers(&self.template.containers)]
    }
    fn container_lists_mut(&mut self) -> Vec<&mut [ContainerModel]> {
        vec![containers_mut(&mut self.template.containers)]
    }
}
