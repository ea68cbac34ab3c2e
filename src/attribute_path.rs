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

use std::{borrow::Cow, fmt::Display};

/// Represent the path to an attribute
///
/// The builder methods consume the path and return the extended one,
/// so a walk can hand `path.clone().attribute(name)` to each child
/// without ever popping segments back.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    /// Create a new attribute path with the `root` attribute
    pub fn new<T: Into<Cow<'static, str>>>(root: T) -> Self {
        Self {
            steps: vec![AttributePathStep::Attribute(root.into())],
        }
    }
    /// Create a new attribute path where the attribute `.name` has been appended
    pub fn attribute<T: Into<Cow<'static, str>>>(mut self, name: T) -> Self {
        self.steps.push(AttributePathStep::Attribute(name.into()));
        self
    }
    /// Create a new attribute path where the access `["key"]` has been appended
    pub fn key<T: Into<Cow<'static, str>>>(mut self, key: T) -> Self {
        self.steps.push(AttributePathStep::Key(key.into()));
        self
    }
    /// Create a new attribute path where the access `[idx]` has been appended
    pub fn index<T: Into<i64>>(mut self, idx: T) -> Self {
        self.steps.push(AttributePathStep::Index(idx.into()));
        self
    }
    /// Create a new attribute path where `step` has been appended
    pub fn step(mut self, step: AttributePathStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Check if the path designates the root value
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for step in &self.steps {
            match step {
                AttributePathStep::Attribute(name) => {
                    f.write_fmt(format_args!("{}{}", sep, name))?
                }
                AttributePathStep::Key(key) => f.write_fmt(format_args!("[{:?}]", key))?,
                AttributePathStep::Index(idx) => f.write_fmt(format_args!("[{}]", idx))?,
            }
            sep = ".";
        }
        Ok(())
    }
}

impl std::ops::Add<AttributePathStep> for AttributePath {
    type Output = Self;
    fn add(self, rhs: AttributePathStep) -> Self::Output {
        self.step(rhs)
    }
}

/// Single accessor of an [`AttributePath`]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AttributePathStep {
    /// Field of an object (ie: `.name`)
    Attribute(Cow<'static, str>),
    /// Entry of a map (ie: `["key"]`)
    Key(Cow<'static, str>),
    /// Element of a list (ie: `[idx]`)
    Index(i64),
}

impl Display for AttributePathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributePathStep::Attribute(name) => f.write_str(name.as_ref()),
            AttributePathStep::Key(key) => f.write_fmt(format_args!("[{:?}]", key)),
            AttributePathStep::Index(idx) => f.write_fmt(format_args!("[{}]", idx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mixes_attributes_keys_and_indices() {
        let path = AttributePath::new("containers")
            .index(0)
            .attribute("envs")
            .key("GAME_MODE")
            .attribute("value");
        assert_eq!(path.to_string(), r#"containers[0].envs["GAME_MODE"].value"#);
    }

    #[test]
    fn builder_leaves_the_base_path_intact() {
        let base = AttributePath::new("resources");
        let limits = base.clone().attribute("limits");
        let requests = base.clone() + AttributePathStep::Attribute("requests".into());
        assert_eq!(base.steps.len(), 1);
        assert_eq!(limits.to_string(), "resources.limits");
        assert_eq!(requests.to_string(), "resources.requests");
    }

    #[test]
    fn default_path_is_root() {
        assert!(AttributePath::default().is_root());
        assert!(!AttributePath::new("id").is_root());
    }
}
