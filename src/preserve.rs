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

//! Preservation of the textual form of resource quantities
//!
//! The backend canonicalizes quantities: a container planned with a `"1000m"` CPU limit
//! is read back as `"1"`. Both denote the same value, so the planned text is kept
//! to avoid a diff that no apply could ever resolve.

use tracing::{debug, trace};

use crate::{diagnostics::Diagnostics, quantity::Quantity, value::ValueString};

/// Quantity fields of a container that are reconciled
///
/// Memory is not part of it: only CPU quantities are rewritten by the backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QuantityField {
    CpuLimit,
    CpuRequest,
}

impl QuantityField {
    pub const ALL: [QuantityField; 2] = [QuantityField::CpuLimit, QuantityField::CpuRequest];

    /// Attribute path of the field, relative to the container
    pub fn attribute(self) -> &'static str {
        match self {
            QuantityField::CpuLimit => "resources.limits.cpu",
            QuantityField::CpuRequest => "resources.requests.cpu",
        }
    }
}

/// Container holding quantity fields
pub trait ContainerLike {
    /// Get the field, or [`None`] if a block holding it is absent
    fn quantity(&self, field: QuantityField) -> Option<&ValueString>;
    /// Get the field for update, or [`None`] if a block holding it is absent
    fn quantity_mut(&mut self, field: QuantityField) -> Option<&mut ValueString>;
}

/// Keep the planned text of every quantity that is numerically equal in `state`
///
/// Containers are paired by position. Containers beyond the shortest list are ignored,
/// and values that are not valid quantities are left as is.
/// The returned diagnostics are always empty: the pass is best effort.
pub fn preserve_quantities<C: ContainerLike>(state: &mut [C], plan: &[C]) -> Diagnostics {
    let mut preserved = 0usize;
    for (idx, (state, plan)) in state.iter_mut().zip(plan).enumerate() {
        for field in QuantityField::ALL {
            let Some(planned) = plan.quantity(field).and_then(|value| value.as_ref_option())
            else {
                continue;
            };
            let Some(current) = state.quantity_mut(field) else {
                continue;
            };
            let Some(read) = current.as_ref_option() else {
                continue;
            };
            if read == planned {
                continue;
            }

            match (read.parse::<Quantity>(), planned.parse::<Quantity>()) {
                (Ok(read_quantity), Ok(planned_quantity)) if read_quantity == planned_quantity => {
                    debug!(
                        container = idx,
                        field = field.attribute(),
                        read = read.as_str(),
                        planned = planned.as_str(),
                        "planned quantity kept"
                    );
                    *current = ValueString::Value(planned.clone());
                    preserved += 1;
                }
                (Ok(_), Ok(_)) => (),
                (read_quantity, planned_quantity) => {
                    trace!(
                        container = idx,
                        field = field.attribute(),
                        read = ?read_quantity.err(),
                        planned = ?planned_quantity.err(),
                        "quantity not comparable"
                    );
                }
            }
        }
    }
    trace!(preserved, "quantities reconciled");
    Diagnostics::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Container {
        cpu_limit: Option<ValueString>,
        cpu_request: Option<ValueString>,
        memory_limit: ValueString,
    }

    impl ContainerLike for Container {
        fn quantity(&self, field: QuantityField) -> Option<&ValueString> {
            match field {
                QuantityField::CpuLimit => self.cpu_limit.as_ref(),
                QuantityField::CpuRequest => self.cpu_request.as_ref(),
            }
        }
        fn quantity_mut(&mut self, field: QuantityField) -> Option<&mut ValueString> {
            match field {
                QuantityField::CpuLimit => self.cpu_limit.as_mut(),
                QuantityField::CpuRequest => self.cpu_request.as_mut(),
            }
        }
    }

    fn container(limit: &str, request: &str) -> Container {
        Container {
            cpu_limit: Some(limit.into()),
            cpu_request: Some(request.into()),
            memory_limit: Value::Null,
        }
    }

    #[test]
    fn equal_quantities_take_the_planned_text() {
        let mut state = vec![container("1", "2")];
        let plan = vec![container("1000m", "1000m")];
        let diags = preserve_quantities(&mut state, &plan);
        assert!(diags.is_empty());
        assert_eq!(state[0].cpu_limit, Some("1000m".into()));
        // 2 != 1000m
        assert_eq!(state[0].cpu_request, Some("2".into()));
    }

    #[test]
    fn memory_is_not_reconciled() {
        let mut state = vec![Container {
            memory_limit: "1Gi".into(),
            ..container("1", "1")
        }];
        let plan = vec![Container {
            memory_limit: "1024Mi".into(),
            ..container("1", "1")
        }];
        preserve_quantities(&mut state, &plan);
        assert_eq!(state[0].memory_limit, Value::Value("1Gi".to_owned()));
    }

    #[test]
    fn unparsable_and_missing_values_are_left_alone() {
        let mut state = vec![
            container("1", "garbage"),
            Container {
                cpu_limit: Some(Value::Null),
                cpu_request: None,
                ..Default::default()
            },
        ];
        let plan = vec![container("nonsense", "1"), container("500m", "500m")];
        let diags = preserve_quantities(&mut state, &plan);
        assert!(diags.is_empty());
        assert_eq!(state[0], container("1", "garbage"));
        assert_eq!(state[1].cpu_limit, Some(Value::Null));
        assert_eq!(state[1].cpu_request, None);
    }

    #[test]
    fn overflowing_quantities_are_left_alone() {
        let mut state = vec![container("10e2147483647", "1")];
        let plan = vec![container("1", "10e2147483647")];
        let diags = preserve_quantities(&mut state, &plan);
        assert!(diags.is_empty());
        assert_eq!(state[0], container("10e2147483647", "1"));
    }

    #[test]
    fn unknown_plan_values_are_ignored() {
        let mut state = vec![container("1", "1")];
        let plan = vec![Container {
            cpu_limit: Some(Value::Unknown),
            ..container("1", "1")
        }];
        preserve_quantities(&mut state, &plan);
        assert_eq!(state[0].cpu_limit, Some("1".into()));
    }

    #[test]
    fn containers_are_paired_by_position() {
        let mut state = vec![container("1", "1"), container("2", "2")];
        let plan = vec![container("1000m", "1000m")];
        preserve_quantities(&mut state, &plan);
        assert_eq!(state[0], container("1000m", "1000m"));
        assert_eq!(state[1], container("2", "2"));

        let mut state = vec![container("1", "1")];
        let plan = vec![container("1000m", "1"), container("2000m", "2000m")];
        preserve_quantities(&mut state, &plan);
        assert_eq!(state[0], container("1000m", "1"));
    }
}
