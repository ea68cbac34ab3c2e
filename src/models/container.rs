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
    preserve::{ContainerLike, QuantityField},
    value::{ValueList, ValueString},
};

use super::common::{EnvVarModel, PortModel};

/// Game server container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerModel {
    pub name: ValueString,
    pub image_ref: ImageRefModel,
    pub command: ValueList<ValueString>,
    pub args: ValueList<ValueString>,
    pub envs: ValueList<EnvVarModel>,
    pub resources: Option<ResourcesModel>,
    pub ports: ValueList<PortModel>,
    pub volume_mounts: ValueList<VolumeMountModel>,
    pub config_files: ValueList<ConfigFileMountModel>,
}

model!(ContainerModel {
    name => "name",
    image_ref => "image_ref",
    command => "command",
    args => "args",
    envs => "envs",
    resources => "resources",
    ports => "ports",
    volume_mounts => "volume_mounts",
    config_files => "config_files",
});

/// Image of a container, resolved from a branch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRefModel {
    pub name: ValueString,
    pub branch: ValueString,
}

model!(ImageRefModel {
    name => "name",
    branch => "branch",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesModel {
    pub limits: Option<ResourceListModel>,
    pub requests: Option<ResourceListModel>,
}

model!(ResourcesModel {
    limits => "limits",
    requests => "requests",
});

/// CPU and memory quantities
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceListModel {
    pub cpu: ValueString,
    pub memory: ValueString,
}

model!(ResourceListModel {
    cpu => "cpu",
    memory => "memory",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMountModel {
    pub name: ValueString,
    pub mount_path: ValueString,
    pub sub_path: ValueString,
    pub sub_path_expr: ValueString,
}

model!(VolumeMountModel {
    name => "name",
    mount_path => "mount_path",
    sub_path => "sub_path",
    sub_path_expr => "sub_path_expr",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFileMountModel {
    pub name: ValueString,
    pub mount_path: ValueString,
}

model!(ConfigFileMountModel {
    name => "name",
    mount_path => "mount_path",
});

impl ContainerLike for ContainerModel {
    fn quantity(&self, field: QuantityField) -> Option<&ValueString> {
        let resources = self.resources.as_ref()?;
        match field {
            QuantityField::CpuLimit => resources.limits.as_ref().map(|limits| &limits.cpu),
            QuantityField::CpuRequest => resources.requests.as_ref().map(|requests| &requests.cpu),
        }
    }

    fn quantity_mut(&mut self, field: QuantityField) -> Option<&mut ValueString> {
        let resources = self.resources.as_mut()?;
        match field {
            QuantityField::CpuLimit => resources.limits.as_mut().map(|limits| &mut limits.cpu),
            QuantityField::CpuRequest => {
                resources.requests.as_mut().map(|requests| &mut requests.cpu)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn quantities_are_reached_through_resources() {
        let mut container = ContainerModel {
            resources: Some(ResourcesModel {
                limits: Some(ResourceListModel {
                    cpu: "1".into(),
                    memory: "1Gi".into(),
                }),
                requests: None,
            }),
            ..Default::default()
        };
        assert_eq!(
            container.quantity(QuantityField::CpuLimit),
            Some(&Value::Value("1".to_owned()))
        );
        assert_eq!(container.quantity(QuantityField::CpuRequest), None);

        if let Some(cpu) = container.quantity_mut(QuantityField::CpuLimit) {
            *cpu = "1000m".into();
        }
        assert_eq!(
            container.resources.unwrap().limits.unwrap().cpu,
            Value::Value("1000m".to_owned())
        );
        assert_eq!(
            ContainerModel::default().quantity(QuantityField::CpuLimit),
            None
        );
    }
}
