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

use std::borrow::Cow;

use tracing::trace;

use crate::{
    attribute_path::AttributePath,
    diagnostics::{Diagnostic, Diagnostics},
    dynamic::Dynamic,
    reference::ReferenceState,
};

use super::node::{Collection, Model, Node, OptionalModel, Scalar};

/// Depth-first walk of a model against a reference
///
/// The first error stops the walk: changes already applied to the nodes visited before are kept.
pub(super) struct Walker<'r> {
    reference: &'r dyn ReferenceState,
    pub(super) changes: usize,
}

impl<'r> Walker<'r> {
    pub(super) fn new(reference: &'r dyn ReferenceState) -> Self {
        Self {
            reference,
            changes: 0,
        }
    }

    fn expected(&self, path: &AttributePath) -> Result<Cow<'r, Dynamic>, Diagnostics> {
        let reference: &'r dyn ReferenceState = self.reference;
        reference.get_attribute(path)
    }

    pub(super) fn walk(&mut self, node: Node<'_>, path: &AttributePath) -> Result<(), Diagnostics> {
        match node {
            Node::Scalar(scalar) => self.scalar(scalar, path),
            Node::Optional(optional) => self.optional(optional, path),
            Node::Struct(model) => self.model(model, path),
            Node::Map(collection) | Node::List(collection) => self.collection(collection, path),
            Node::Unsupported(kind) => Err(Diagnostic::new(
                "Unsupported Type",
                format!("cannot normalize a value of type `{kind}`"),
                path.clone(),
            )
            .into()),
        }
    }

    pub(super) fn model(
        &mut self,
        model: &mut dyn Model,
        path: &AttributePath,
    ) -> Result<(), Diagnostics> {
        for (name, node) in model.fields() {
            self.walk(node, &path.clone().attribute(name))?;
        }
        Ok(())
    }

    fn scalar(&mut self, scalar: &mut dyn Scalar, path: &AttributePath) -> Result<(), Diagnostics> {
        let expected = self.expected(path)?;
        if expected.is_unknown() {
            return Ok(());
        }

        if expected.is_null() {
            if scalar.is_zero_value() {
                trace!(%path, kind = scalar.kind(), "zero value collapsed to null");
                scalar.set_null();
                self.changes += 1;
            }
        } else if scalar.is_null() {
            scalar.restore(&expected).map_err(|detail| {
                trace!(%path, reference = expected.json(), "reference not convertible");
                Diagnostics::from(Diagnostic::new("Value Conversion Error", detail, path.clone()))
            })?;
            trace!(%path, kind = scalar.kind(), "null value restored from reference");
            self.changes += 1;
        }
        Ok(())
    }

    fn optional(
        &mut self,
        optional: &mut dyn OptionalModel,
        path: &AttributePath,
    ) -> Result<(), Diagnostics> {
        let expected = self.expected(path)?;
        let expected_null = expected.is_null();
        let expected_unknown = expected.is_unknown();

        if optional.is_absent() {
            if expected_null || expected_unknown {
                return Ok(());
            }
            trace!(%path, "absent block allocated");
            self.changes += 1;
            return self.model(optional.allocate(), path);
        }

        if let Some(model) = optional.present_mut() {
            self.model(model, path)?;
        }
        // Checked once the fields are normalized: a block that only held zero values is zero now.
        if expected_null && optional.present_mut().is_some_and(|model| model.is_zero()) {
            trace!(%path, "zero block removed");
            optional.set_absent();
            self.changes += 1;
        }
        Ok(())
    }

    fn collection(
        &mut self,
        collection: &mut dyn Collection,
        path: &AttributePath,
    ) -> Result<(), Diagnostics> {
        // Filled collections are never reconciled as a whole, only their elements are.
        if collection.len() > 0 {
            for (step, node) in collection.children() {
                self.walk(node, &path.clone().step(step))?;
            }
            return Ok(());
        }
        if collection.is_unknown() {
            return Ok(());
        }

        let expected = self.expected(path)?;
        if expected.is_null() {
            if !collection.is_null() {
                trace!(%path, "empty collection collapsed to null");
                collection.set_null();
                self.changes += 1;
            }
        } else if !expected.is_unknown() && collection.is_null() {
            trace!(%path, "null collection replaced with an empty one");
            collection.set_empty();
            self.changes += 1;
        }
        Ok(())
    }
}
