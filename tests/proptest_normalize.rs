//! Property-based tests for the normalizer and the quantity preserver.
//!
//! These tests verify the behavioral contracts of the reconciliation:
//! - Normalizing twice against the same reference is the same as normalizing once
//! - A model normalized against its own reference is unchanged
//! - Zero values collapse to null against a null reference
//! - Null values are restored from a known reference
//! - Numerically equal quantities take the planned text

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde::Serialize;
use tf_gamefabric::{
    model,
    models::{ContainerModel, ResourceListModel, ResourcesModel},
    normalize, preserve_quantities,
    value::{Value, ValueBool, ValueFloat, ValueInt, ValueInt32, ValueList, ValueMap, ValueString},
    Dynamic,
};

// =============================================================================
// Synthetic schema
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct Child {
    city: ValueString,
    size: ValueInt32,
}

model!(Child {
    city => "city",
    size => "size",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct Sample {
    name: ValueString,
    count: ValueInt,
    enabled: ValueBool,
    ratio: ValueFloat,
    tags: ValueList<ValueString>,
    labels: ValueMap<ValueString>,
    child: Option<Child>,
    children: ValueList<Child>,
}

model!(Sample {
    name => "name",
    count => "count",
    enabled => "enabled",
    ratio => "ratio",
    tags => "tags",
    labels => "labels",
    child => "child",
    children => "children",
});

fn reference<T: Serialize>(model: &T) -> Dynamic {
    serde_json::from_value(serde_json::to_value(model).unwrap()).unwrap()
}

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn nullable<T, S>(inner: S) -> impl Strategy<Value = Value<T>>
where
    T: Clone + std::fmt::Debug + 'static,
    S: Strategy<Value = T> + 'static,
{
    prop_oneof![1 => Just(Value::Null), 3 => inner.prop_map(Value::Value)]
}

fn value_string() -> impl Strategy<Value = ValueString> {
    // Short strings so that "" shows up often
    nullable("[a-z]{0,2}")
}

fn child_strategy() -> impl Strategy<Value = Child> {
    (value_string(), nullable(-1i32..3)).prop_map(|(city, size)| Child { city, size })
}

fn sample_strategy() -> impl Strategy<Value = Sample> {
    (
        value_string(),
        nullable(-2i64..3),
        nullable(any::<bool>()),
        nullable(prop_oneof![Just(0.0), Just(1.5), -10.0f64..10.0]),
        nullable(prop::collection::vec(value_string(), 0..3)),
        nullable(prop::collection::btree_map("[a-c]", value_string(), 0..3)),
        prop::option::of(child_strategy()),
        nullable(prop::collection::vec(child_strategy(), 0..3)),
    )
        .prop_map(
            |(name, count, enabled, ratio, tags, labels, child, children)| Sample {
                name,
                count,
                enabled,
                ratio,
                tags,
                labels,
                child,
                children,
            },
        )
}

// =============================================================================
// Expected results
// =============================================================================

fn collapse<T: Default + PartialEq>(value: Value<T>) -> Value<T> {
    if value == Value::Value(T::default()) {
        Value::Null
    } else {
        value
    }
}

fn collapse_child(child: Child) -> Child {
    Child {
        city: collapse(child.city),
        size: collapse(child.size),
    }
}

fn collapse_list<T>(list: ValueList<T>, f: impl Fn(T) -> T) -> ValueList<T> {
    match list {
        Value::Value(items) if items.is_empty() => Value::Null,
        Value::Value(items) => Value::Value(items.into_iter().map(f).collect()),
        other => other,
    }
}

/// Model normalized against a null reference
fn collapsed(sample: Sample) -> Sample {
    Sample {
        name: collapse(sample.name),
        count: collapse(sample.count),
        enabled: collapse(sample.enabled),
        ratio: collapse(sample.ratio),
        tags: collapse_list(sample.tags, collapse),
        labels: match sample.labels {
            Value::Value(map) if map.is_empty() => Value::Null,
            Value::Value(map) => Value::Value(
                map.into_iter()
                    .map(|(key, value)| (key, collapse(value)))
                    .collect(),
            ),
            other => other,
        },
        child: sample
            .child
            .map(collapse_child)
            .filter(|child| child != &Child::default()),
        children: collapse_list(sample.children, collapse_child),
    }
}

/// Null model normalized against the reference of `target`
fn restored(target: Sample) -> Sample {
    // Filled collections are not restored element by element
    fn emptied<T>(list: ValueList<T>) -> ValueList<T> {
        list.map(|_| Vec::new())
    }
    Sample {
        tags: emptied(target.tags),
        labels: target.labels.map(|_| BTreeMap::new()),
        children: emptied(target.children),
        ..target
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(model in sample_strategy(), planned in sample_strategy()) {
        let reference = reference(&planned);
        let mut once = model;
        let diags = normalize(&mut once, &reference);
        prop_assert!(diags.is_empty(), "{:?}", diags);

        let mut twice = once.clone();
        let diags = normalize(&mut twice, &reference);
        prop_assert!(diags.is_empty(), "{:?}", diags);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn agreement_is_a_no_op(model in sample_strategy()) {
        let mut normalized = model.clone();
        let diags = normalize(&mut normalized, &reference(&model));
        prop_assert!(diags.is_empty(), "{:?}", diags);
        prop_assert_eq!(normalized, model);
    }

    #[test]
    fn zero_values_collapse_against_null(model in sample_strategy()) {
        let mut normalized = model.clone();
        let diags = normalize(&mut normalized, &Dynamic::Null);
        prop_assert!(diags.is_empty(), "{:?}", diags);
        prop_assert_eq!(normalized, collapsed(model));
    }

    #[test]
    fn null_values_are_restored(planned in sample_strategy()) {
        let mut normalized = Sample::default();
        let diags = normalize(&mut normalized, &reference(&planned));
        prop_assert!(diags.is_empty(), "{:?}", diags);
        prop_assert_eq!(normalized, restored(planned));
    }

    #[test]
    fn equal_quantities_keep_the_planned_text(millis in 1u32..100_000) {
        let cores = format!("{}.{:03}", millis / 1000, millis % 1000);
        let planned = format!("{millis}m");
        let mut state = vec![container(&cores)];
        let plan = vec![container(&planned)];

        let diags = preserve_quantities(&mut state, &plan);
        prop_assert!(diags.is_empty());
        prop_assert_eq!(state, plan);
    }

    #[test]
    fn different_quantities_are_kept(millis in 1u32..100_000) {
        let cores = format!("{}.{:03}", millis / 1000, millis % 1000);
        let mut state = vec![container(&cores)];
        let plan = vec![container(&format!("{}m", millis + 1))];

        preserve_quantities(&mut state, &plan);
        prop_assert_eq!(state, vec![container(&cores)]);
    }
}

fn container(cpu: &str) -> ContainerModel {
    ContainerModel {
        name: "server".into(),
        resources: Some(ResourcesModel {
            limits: Some(ResourceListModel {
                cpu: cpu.into(),
                memory: "512Mi".into(),
            }),
            requests: Some(ResourceListModel {
                cpu: cpu.into(),
                memory: Value::Null,
            }),
        }),
        ..Default::default()
    }
}
