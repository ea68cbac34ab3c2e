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

//! Null/zero reconciliation of a model against a prior plan or state
//!
//! A model built from a backend response cannot tell "the user did not set this" from
//! "the user set this to its zero value": the backend answers `""`, `0` or `false` in both cases,
//! and omits fields it does not care about.
//! [`normalize`] walks the model and asks the prior plan or state, at each path, which one it was:
//!
//! - a zero scalar whose reference is null becomes null,
//! - a null scalar whose reference is known gets the reference value back,
//! - an absent block whose reference is known is allocated and walked,
//! - a block left with only null fields whose reference is null is removed,
//! - an empty (or null) map or list follows the nullness of its reference.
//!
//! Maps and lists holding at least one element are not reconciled as a whole:
//! only their elements are walked.

mod node;
mod walk;

pub use node::{AsNode, Collection, Model, Node, OptionalModel, Primitive, Scalar};

use tracing::debug;

use crate::{attribute_path::AttributePath, diagnostics::Diagnostics, reference::ReferenceState};

use walk::Walker;

/// Normalize `value` in place against `reference`
///
/// # Arguments
///
/// * `value` - model freshly built from a backend response
/// * `reference` - prior plan or state of the same resource
///
/// # Panics
///
/// Panics if `value` is neither a model nor a present optional model:
/// this can only be caused by a model wired the wrong way.
pub fn normalize<T>(value: &mut T, reference: &dyn ReferenceState) -> Diagnostics
where
    T: AsNode + ?Sized,
{
    let root = AttributePath::default();
    let mut walker = Walker::new(reference);
    let result = match value.as_node() {
        Node::Struct(model) => walker.model(model, &root),
        Node::Optional(optional) => match optional.present_mut() {
            Some(model) => walker.model(model, &root),
            None => panic!("cannot normalize an absent model"),
        },
        node => panic!(
            "cannot normalize a value of kind `{}`: a model is expected at the root",
            node.kind()
        ),
    };

    let diags = result.err().unwrap_or_default();
    debug!(
        changes = walker.changes,
        errors = diags.errors.len(),
        "model normalized"
    );
    diags
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::{
        dynamic::Dynamic,
        model,
        value::{Value, ValueBool, ValueFloat, ValueInt, ValueList, ValueMap, ValueString},
    };

    #[derive(Clone, Debug, Default, PartialEq)]
    struct SubModel {
        age: ValueInt,
        city: ValueString,
    }

    model!(SubModel {
        age => "age",
        city => "city",
    });

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestModel {
        name: ValueString,
        sub_model: SubModel,
        ptr_sub_model: Option<SubModel>,
        enabled: ValueBool,
        ratio: ValueFloat,
        labels: ValueMap<ValueString>,
        tags: ValueList<ValueString>,
        etag: String,
    }

    model!(TestModel {
        name => "name",
        sub_model => "sub_model",
        ptr_sub_model => "ptr_sub_model",
        enabled => "enabled",
        ratio => "ratio",
        labels => "labels",
        tags => "tags",
    });

    fn reference(value: serde_json::Value) -> Dynamic {
        serde_json::from_value(value).unwrap()
    }

    fn null_reference() -> Dynamic {
        reference(json!({
            "name": null,
            "sub_model": {"age": null, "city": null},
            "ptr_sub_model": null,
            "enabled": null,
            "ratio": null,
            "labels": null,
            "tags": null,
        }))
    }

    fn zero_reference() -> Dynamic {
        reference(json!({
            "name": "",
            "sub_model": {"age": 0, "city": ""},
            "ptr_sub_model": {"age": 0, "city": ""},
            "enabled": false,
            "ratio": 0.0,
            "labels": {},
            "tags": [],
        }))
    }

    fn zero_model() -> TestModel {
        TestModel {
            name: Value::Value(String::new()),
            sub_model: SubModel {
                age: Value::Value(0),
                city: Value::Value(String::new()),
            },
            ptr_sub_model: Some(SubModel {
                age: Value::Value(0),
                city: Value::Value(String::new()),
            }),
            enabled: Value::Value(false),
            ratio: Value::Value(0.0),
            labels: Value::Value(BTreeMap::new()),
            tags: Value::Value(Vec::new()),
            etag: String::new(),
        }
    }

    #[test]
    fn zero_values_collapse_to_null() {
        let mut model = TestModel {
            ptr_sub_model: None,
            ..zero_model()
        };
        let diags = normalize(&mut model, &null_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model, TestModel::default());
    }

    #[test]
    fn null_values_are_restored() {
        let mut model = TestModel::default();
        let diags = normalize(&mut model, &zero_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model, zero_model());
    }

    #[test]
    fn absent_block_is_allocated_and_walked() {
        let mut model = TestModel::default();
        let reference = reference(json!({
            "name": null,
            "sub_model": {"age": null, "city": null},
            "ptr_sub_model": {"age": 0, "city": null},
            "enabled": null,
            "ratio": null,
            "labels": null,
            "tags": null,
        }));
        let diags = normalize(&mut model, &reference);
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(
            model.ptr_sub_model,
            Some(SubModel {
                age: Value::Value(0),
                city: Value::Null,
            })
        );
    }

    #[test]
    fn zero_block_is_removed_when_reference_is_null() {
        let mut model = TestModel {
            ptr_sub_model: Some(SubModel::default()),
            ..Default::default()
        };
        let diags = normalize(&mut model, &null_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model.ptr_sub_model, None);
    }

    #[test]
    fn block_collapsing_to_zero_is_removed() {
        let mut model = TestModel {
            ptr_sub_model: Some(SubModel {
                age: Value::Value(0),
                city: Value::Null,
            }),
            ..Default::default()
        };
        let diags = normalize(&mut model, &null_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model.ptr_sub_model, None);
    }

    #[test]
    fn block_with_values_is_kept_when_reference_is_null() {
        let mut model = TestModel {
            ptr_sub_model: Some(SubModel {
                age: Value::Value(0),
                city: "Paris".into(),
            }),
            ..Default::default()
        };
        let diags = normalize(&mut model, &null_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(
            model.ptr_sub_model,
            Some(SubModel {
                age: Value::Null,
                city: "Paris".into(),
            })
        );
    }

    #[test]
    fn non_zero_values_are_kept() {
        let mut model = TestModel {
            name: "armada".into(),
            enabled: Value::Value(true),
            ratio: Value::Value(0.5),
            ..Default::default()
        };
        let diags = normalize(&mut model, &null_reference());
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model.name, Value::Value("armada".to_owned()));
        assert_eq!(model.enabled, Value::Value(true));
        assert_eq!(model.ratio, Value::Value(0.5));
    }

    #[test]
    fn filled_collections_are_not_collapsed() {
        let mut model = TestModel {
            labels: Value::Value(BTreeMap::from([("team".to_owned(), "".into())])),
            tags: Value::Value(vec!["".into(), "b".into()]),
            ..Default::default()
        };
        let reference = reference(json!({
            "name": null,
            "sub_model": {"age": null, "city": null},
            "ptr_sub_model": null,
            "enabled": null,
            "ratio": null,
            "labels": null,
            "tags": [null, "b"],
        }));
        let diags = normalize(&mut model, &reference);
        assert!(diags.is_empty(), "{diags:?}");
        // labels stays a map, and its element is looked up through the null map
        assert_eq!(
            model.labels,
            Value::Value(BTreeMap::from([("team".to_owned(), Value::Null)]))
        );
        assert_eq!(model.tags, Value::Value(vec![Value::Null, "b".into()]));
    }

    #[test]
    fn unknown_reference_changes_nothing() {
        let mut model = TestModel::default();
        let reference = Dynamic::Unknown;
        let diags = normalize(&mut model, &reference);
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(model, TestModel::default());
    }

    #[test]
    fn reference_errors_stop_the_walk() {
        let mut model = zero_model();
        let reference = reference(json!({
            "name": null,
            "sub_model": {"age": null},
        }));
        let diags = normalize(&mut model, &reference);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "Invalid Attribute Path");
        assert_eq!(
            diags.errors[0].attribute,
            AttributePath::new("sub_model").attribute("city")
        );
        // fields visited before the error are normalized, the ones after are untouched
        assert_eq!(model.name, Value::Null);
        assert_eq!(model.sub_model.age, Value::Null);
        assert_eq!(model.enabled, Value::Value(false));
    }

    #[test]
    fn conversion_errors_are_reported() {
        let mut model = TestModel::default();
        let reference = reference(json!({
            "name": 12,
        }));
        let diags = normalize(&mut model, &reference);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "Value Conversion Error");
        assert_eq!(diags.errors[0].attribute, AttributePath::new("name"));
    }

    #[derive(Default)]
    struct RawModel {
        name: ValueString,
        replicas: i64,
    }

    model!(RawModel {
        name => "name",
        replicas => "replicas",
    });

    #[test]
    fn unsupported_fields_are_reported() {
        let mut model = RawModel {
            name: "".into(),
            replicas: 0,
        };
        let reference = reference(json!({"name": null, "replicas": null}));
        let diags = normalize(&mut model, &reference);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].summary, "Unsupported Type");
        assert_eq!(diags.errors[0].attribute, AttributePath::new("replicas"));
        assert!(diags.errors[0].detail.contains("i64"));
        assert_eq!(model.name, Value::Null);
    }

    #[test]
    fn optional_root_is_walked() {
        let mut model = Some(SubModel {
            age: Value::Value(0),
            city: Value::Null,
        });
        let reference = reference(json!({"age": null, "city": "Paris"}));
        let diags = normalize(&mut model, &reference);
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(
            model,
            Some(SubModel {
                age: Value::Null,
                city: "Paris".into(),
            })
        );
    }

    #[test]
    #[should_panic(expected = "a model is expected at the root")]
    fn scalar_root_panics() {
        let mut value = ValueString::Null;
        normalize(&mut value, &Dynamic::Null);
    }

    #[test]
    #[should_panic(expected = "cannot normalize an absent model")]
    fn absent_root_panics() {
        let mut value: Option<SubModel> = None;
        normalize(&mut value, &Dynamic::Null);
    }
}
