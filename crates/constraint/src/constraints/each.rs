//! Per-element application of constraints.

use serde_json::Value;

use super::{Constraint, Constraints};
use crate::foundation::Path;

/// Applies its constraints to every element of an array.
///
/// When the value is not an array the constraints are applied once to the
/// whole value, at the same path. Elements never bail on each other: every
/// element is evaluated even if earlier ones failed.
///
/// # Examples
///
/// ```
/// use nebula_constraint::constraints::{Each, Length};
/// use nebula_constraint::foundation::Path;
/// use serde_json::json;
///
/// let each = Each::new(Length::min(2));
/// let value = json!(["ab", "c"]);
///
/// let targets: Vec<String> = each
///     .targets(Some(&value), &Path::root())
///     .into_iter()
///     .map(|(_, path)| path.to_string())
///     .collect();
/// assert_eq!(targets, ["[0]", "[1]"]);
/// ```
#[derive(Debug, Clone)]
pub struct Each {
    constraints: Constraints,
}

impl Each {
    /// Identity of the node; `Each` never emits a violation of its own.
    pub const FQN: &'static str = "nebula-constraint/Each";

    /// Wraps the constraints applied to each element.
    pub fn new(constraints: impl Into<Constraints>) -> Self {
        Self {
            constraints: constraints.into(),
        }
    }

    /// The per-element constraints.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Positions the constraints apply to: one per element with the index
    /// appended, or the value itself with the path unchanged.
    pub fn targets<'v>(
        &self,
        value: Option<&'v Value>,
        path: &Path,
    ) -> Vec<(Option<&'v Value>, Path)> {
        match value {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (Some(item), path.child(index)))
                .collect(),
            other => vec![(other, path.clone())],
        }
    }
}
