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

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    dynamic::Dynamic,
    model,
    normalize::Primitive,
    scalar_node,
    value::{Value, ValueBool, ValueInt, ValueInt32, ValueMap, ValueString},
};

/// Metadata shared by the namespaced resources
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataModel {
    pub name: ValueString,
    pub environment: ValueString,
    pub labels: ValueMap<ValueString>,
    pub annotations: ValueMap<ValueString>,
}

model!(MetadataModel {
    name => "name",
    environment => "environment",
    labels => "labels",
    annotations => "annotations",
});

/// Environment variable of a container or a region type
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarModel {
    pub name: ValueString,
    pub value: ValueString,
    pub value_from: Option<EnvVarSourceModel>,
}

model!(EnvVarModel {
    name => "name",
    value => "value",
    value_from => "value_from",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarSourceModel {
    /// Name of the config file whose content is the value
    pub config_file: ValueString,
    /// Path of a field of the game server, e.g. `metadata.name`
    pub field_path: ValueString,
}

model!(EnvVarSourceModel {
    config_file => "config_file",
    field_path => "field_path",
});

/// Network protocol of a port
///
/// Every protocol is a deliberate choice: none of them is a zero value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "TCPUDP")]
    TcpUdp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
            Protocol::TcpUdp => "TCPUDP",
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UDP" => Ok(Protocol::Udp),
            "TCP" => Ok(Protocol::Tcp),
            "TCPUDP" => Ok(Protocol::TcpUdp),
            _ => Err(format!("unknown protocol `{s}`")),
        }
    }
}

impl Primitive for Protocol {
    const KIND: &'static str = "protocol";

    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        match value {
            Dynamic::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

scalar_node!(Protocol);

/// Port exposed by a game server container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortModel {
    pub name: ValueString,
    pub policy: ValueString,
    pub container_port: ValueInt32,
    pub protocol: Value<Protocol>,
    pub protection_protocol: ValueString,
}

model!(PortModel {
    name => "name",
    policy => "policy",
    container_port => "container_port",
    protocol => "protocol",
    protection_protocol => "protection_protocol",
});

/// Health checks of the game servers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthChecksModel {
    pub disabled: ValueBool,
    pub initial_delay_seconds: ValueInt32,
    pub period_seconds: ValueInt32,
    pub failure_threshold: ValueInt32,
}

model!(HealthChecksModel {
    disabled => "disabled",
    initial_delay_seconds => "initial_delay_seconds",
    period_seconds => "period_seconds",
    failure_threshold => "failure_threshold",
});

/// Volume shared by the containers of a game server
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeModel {
    pub name: ValueString,
    pub empty_dir_size_limit: ValueString,
}

model!(VolumeModel {
    name => "name",
    empty_dir_size_limit => "empty_dir_size_limit",
});

/// Termination settings of the game servers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminationConfigurationModel {
    pub grace_period_seconds: ValueInt,
    pub maintenance_seconds: ValueInt,
    pub spec_change_seconds: ValueInt,
    pub user_initiated_seconds: ValueInt,
}

model!(TerminationConfigurationModel {
    grace_period_seconds => "grace_period_seconds",
    maintenance_seconds => "maintenance_seconds",
    spec_change_seconds => "spec_change_seconds",
    user_initiated_seconds => "user_initiated_seconds",
});
