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

//! [`ReferenceState`] module

use std::borrow::Cow;

use crate::{
    attribute_path::{AttributePath, AttributePathStep},
    diagnostics::{Diagnostic, Diagnostics},
    dynamic::Dynamic,
};

/// Read access to a prior plan or state
///
/// The normalizer queries it at the path of every node it visits.
/// Calls must be side-effect free: the same path may be queried several times.
pub trait ReferenceState {
    /// Get the value stored at `path`
    ///
    /// Returns diagnostics if `path` does not exist in the schema of the reference.
    fn get_attribute(&self, path: &AttributePath) -> Result<Cow<'_, Dynamic>, Diagnostics>;
}

impl ReferenceState for Dynamic {
    fn get_attribute(&self, path: &AttributePath) -> Result<Cow<'_, Dynamic>, Diagnostics> {
        let mut current = self;
        for (depth, step) in path.steps.iter().enumerate() {
            current = match (current, step) {
                (Dynamic::Null, _) => return Ok(Cow::Owned(Dynamic::Null)),
                (Dynamic::Unknown, _) => return Ok(Cow::Owned(Dynamic::Unknown)),
                (Dynamic::Map(map), AttributePathStep::Attribute(name)) => {
                    match map.get(&**name) {
                        Some(value) => value,
                        None => {
                            return Err(invalid_path(
                                path,
                                depth,
                                format!("the reference has no attribute `{name}`"),
                            ))
                        }
                    }
                }
                (Dynamic::Map(map), AttributePathStep::Key(key)) => match map.get(&**key) {
                    Some(value) => value,
                    None => return Ok(Cow::Owned(Dynamic::Null)),
                },
                (Dynamic::List(list), AttributePathStep::Index(idx)) => {
                    match usize::try_from(*idx).ok().and_then(|idx| list.get(idx)) {
                        Some(value) => value,
                        None => return Ok(Cow::Owned(Dynamic::Null)),
                    }
                }
                (value, step) => {
                    return Err(invalid_path(
                        path,
                        depth,
                        format!("cannot access `{step}` on a {}", value.kind()),
                    ))
                }
            };
        }
        Ok(Cow::Borrowed(current))
    }
}

fn invalid_path(path: &AttributePath, depth: usize, detail: String) -> Diagnostics {
    let attribute = AttributePath {
        steps: path.steps[..=depth].to_vec(),
    };
    Diagnostic::new("Invalid Attribute Path", detail, attribute).into()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reference() -> Dynamic {
        serde_json::from_value(json!({
            "name": "my-armada",
            "labels": {"team": "core"},
            "autoscaling": null,
            "containers": [
                {"name": "game", "resources": {"limits": {"cpu": "1000m"}}}
            ],
        }))
        .unwrap()
    }

    #[test]
    fn root_path_returns_everything() {
        let reference = reference();
        let value = reference.get_attribute(&AttributePath::default()).unwrap();
        assert_eq!(&*value, &reference);
    }

    #[test]
    fn nested_lookup() {
        let reference = reference();
        let path = AttributePath::new("containers")
            .index(0)
            .attribute("resources")
            .attribute("limits")
            .attribute("cpu");
        let value = reference.get_attribute(&path).unwrap();
        assert_eq!(&*value, &Dynamic::String("1000m".into()));
    }

    #[test]
    fn missing_key_and_index_are_null() {
        let reference = reference();
        let key = AttributePath::new("labels").key("owner");
        assert!(reference.get_attribute(&key).unwrap().is_null());
        let index = AttributePath::new("containers").index(3).attribute("name");
        assert!(reference.get_attribute(&index).unwrap().is_null());
    }

    #[test]
    fn lookup_through_null_is_null() {
        let reference = reference();
        let path = AttributePath::new("autoscaling").attribute("fixed_interval_seconds");
        assert!(reference.get_attribute(&path).unwrap().is_null());
    }

    #[test]
    fn missing_attribute_is_an_error() {
        let reference = reference();
        let path = AttributePath::new("template").attribute("name");
        let diags = reference.get_attribute(&path).unwrap_err();
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "Invalid Attribute Path");
        assert_eq!(diags.errors[0].attribute, AttributePath::new("template"));
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        let reference = reference();
        let path = AttributePath::new("name").index(0);
        let diags = reference.get_attribute(&path).unwrap_err();
        assert_eq!(diags.errors[0].attribute, AttributePath::new("name").index(0));
    }
}
