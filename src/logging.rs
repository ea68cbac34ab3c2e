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

//! Log file of the provider
//!
//! Terraform owns the stdout and stderr of the provider, so logs are written to the file
//! named by `PLUGIN_LOG_FILE`, if any:
//!
//! - `PLUGIN_LOG_LEVEL`: maximum level, `TRACE` by default
//! - `PLUGIN_LOG_FORMAT`: `json` for one JSON object per event, human readable text otherwise

use std::{env, fs::File, path::PathBuf, sync::Mutex};

use anyhow::{bail, Context, Result};
use tracing::Level;

const LOG_FILE: &str = "PLUGIN_LOG_FILE";
const LOG_LEVEL: &str = "PLUGIN_LOG_LEVEL";
const LOG_FORMAT: &str = "PLUGIN_LOG_FORMAT";

/// Where and how to log
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// No log is written without a file
    pub file: Option<PathBuf>,
    pub level: Level,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: Level::TRACE,
            json: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from the environment of the process
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration from `lookup`, called with the name of each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let level = match non_empty(LOG_LEVEL) {
            Some(level) => level
                .parse::<Level>()
                .with_context(|| format!("invalid {LOG_LEVEL} `{level}`"))?,
            None => Level::TRACE,
        };
        let json = match non_empty(LOG_FORMAT).as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(format) => bail!("invalid {LOG_FORMAT} `{format}`: expected `text` or `json`"),
        };

        Ok(Self {
            file: non_empty(LOG_FILE).map(PathBuf::from),
            level,
            json,
        })
    }

    /// Install the global subscriber
    ///
    /// Returns `false` if there is no log file, or if a global subscriber is already installed.
    pub fn install(&self) -> Result<bool> {
        let Some(path) = &self.file else {
            return Ok(false);
        };
        let log_file = File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;

        let builder = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file));
        // The only failure left is a global subscriber installed beforehand
        let installed = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        Ok(installed.is_ok())
    }
}

/// Install the log file configured in the environment
pub fn init_logging() -> Result<bool> {
    LogConfig::from_env()?.install()
}
