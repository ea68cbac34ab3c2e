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
    value::{ValueBool, ValueInt32, ValueList, ValueMap, ValueString},
};

use super::{
    common::{HealthChecksModel, MetadataModel, TerminationConfigurationModel, VolumeModel},
    container::ContainerModel,
    containers, containers_mut, WithContainers,
};

/// Armada: a set of game servers deployed in a region, scaled per region type
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmadaModel {
    pub metadata: MetadataModel,
    pub region: ValueString,
    pub description: ValueString,
    pub autoscaling: Option<AutoscalingModel>,
    pub replicas: ValueList<ReplicaModel>,
    pub gameserver_labels: ValueMap<ValueString>,
    pub gameserver_annotations: ValueMap<ValueString>,
    pub containers: ValueList<ContainerModel>,
    pub health_checks: Option<HealthChecksModel>,
    pub termination_configuration: Option<TerminationConfigurationModel>,
    pub strategy: Option<StrategyModel>,
    pub volumes: ValueList<VolumeModel>,
    pub gateway_policies: ValueList<ValueString>,
    pub profiling_enabled: ValueBool,
}

model!(ArmadaModel {
    metadata => "metadata",
    region => "region",
    description => "description",
    autoscaling => "autoscaling",
    replicas => "replicas",
    gameserver_labels => "gameserver_labels",
    gameserver_annotations => "gameserver_annotations",
    containers => "containers",
    health_checks => "health_checks",
    termination_configuration => "termination_configuration",
    strategy => "strategy",
    volumes => "volumes",
    gateway_policies => "gateway_policies",
    profiling_enabled => "profiling_enabled",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscalingModel {
    pub fixed_interval_seconds: ValueInt32,
}

model!(AutoscalingModel {
    fixed_interval_seconds => "fixed_interval_seconds",
});

/// Replica bounds for one region type
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicaModel {
    pub region_type: ValueString,
    pub min_replicas: ValueInt32,
    pub max_replicas: ValueInt32,
    pub buffer_size: ValueString,
}

model!(ReplicaModel {
    region_type => "region_type",
    min_replicas => "min_replicas",
    max_replicas => "max_replicas",
    buffer_size => "buffer_size",
});

/// Rollout strategy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyModel {
    pub recreate: Option<RecreateModel>,
    pub rolling_update: Option<RollingUpdateModel>,
}

model!(StrategyModel {
    recreate => "recreate",
    rolling_update => "rolling_update",
});

/// Marker block: its presence selects the strategy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecreateModel {}

model!(RecreateModel {});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingUpdateModel {
    pub max_surge: ValueString,
    pub max_unavailable: ValueString,
}

model!(RollingUpdateModel {
    max_surge => "max_surge",
    max_unavailable => "max_unavailable",
});

impl WithContainers for ArmadaModel {
    fn container_lists(&self) -> Vec<&[ContainerModel]> {
        vec![containers(&self.containers)]
    }
    fn container_lists_mut(&mut self) -> Vec<&mut [ContainerModel]> {
        vec![containers_mut(&mut self.containers)]
    }
}
