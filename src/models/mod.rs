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

//! Models of the GameFabric resources
//!
//! Every model is the Terraform view of a resource: attribute names match the schema,
//! and every field is nullable.

mod armada;
mod branch;
mod common;
mod configfile;
mod container;
mod environment;
mod formation;
mod imageupdater;
mod region;
mod secret;
mod vessel;

pub use armada::{
    ArmadaModel, AutoscalingModel, RecreateModel, ReplicaModel, RollingUpdateModel, StrategyModel,
};
pub use branch::{BranchModel, RetentionPolicyRuleModel};
pub use common::{
    EnvVarModel, EnvVarSourceModel, HealthChecksModel, MetadataModel, PortModel, Protocol,
    TerminationConfigurationModel, VolumeModel,
};
pub use configfile::ConfigFileModel;
pub use container::{
    ConfigFileMountModel, ContainerModel, ImageRefModel, ResourceListModel, ResourcesModel,
    VolumeMountModel,
};
pub use environment::EnvironmentModel;
pub use formation::{
    ContainerOverrideModel, FormationModel, FormationVesselModel, VesselOverrideModel,
    VesselTemplateModel,
};
pub use imageupdater::{ImageUpdaterModel, ImageUpdaterTargetModel};
pub use region::{RegionModel, RegionTypeModel};
pub use secret::SecretModel;
pub use vessel::VesselModel;

use crate::value::{Value, ValueList};

/// Model holding container lists
///
/// Lists are returned in a stable order, so the lists of two instances
/// of the same model can be paired by position.
pub trait WithContainers {
    fn container_lists(&self) -> Vec<&[ContainerModel]>;
    fn container_lists_mut(&mut self) -> Vec<&mut [ContainerModel]>;
}

macro_rules! without_containers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl WithContainers for $ty {
                fn container_lists(&self) -> Vec<&[ContainerModel]> {
                    Vec::new()
                }
                fn container_lists_mut(&mut self) -> Vec<&mut [ContainerModel]> {
                    Vec::new()
                }
            }
        )+
    };
}

without_containers!(
    BranchModel,
    ConfigFileModel,
    EnvironmentModel,
    ImageUpdaterModel,
    RegionModel,
    SecretModel,
);

/// Containers of a list, none if the list is not known
fn containers(list: &ValueList<ContainerModel>) -> &[ContainerModel] {
    match list {
        Value::Value(list) => list,
        _ => &[],
    }
}

fn containers_mut(list: &mut ValueList<ContainerModel>) -> &mut [ContainerModel] {
    match list {
        Value::Value(list) => list,
        _ => &mut [],
    }
}
