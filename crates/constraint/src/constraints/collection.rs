//! Object structure: field names mapped to sub-constraints.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::{Constraint, Constraints};
use crate::foundation::{Path, REASON_UNSUPPORTED, Violation};

/// One field position produced by [`HasProperties::targets`].
pub type FieldTarget<'a, 'v> = (Option<&'v Value>, &'a [Constraint], Path);

/// Maps a fixed set of field names to the constraints for each field.
///
/// Applies only to objects. Any other value (including an absent one)
/// produces a single `unsupported` violation at the current path and no
/// field is evaluated. Fields are visited in declaration order; a declared
/// field missing from the object is visited as an absent value.
///
/// # Examples
///
/// ```
/// use nebula_constraint::constraints::{Constraint, Exists, HasProperties, Length};
///
/// let form = HasProperties::new()
///     .field("nickname", [Constraint::from(Exists), Length::min(4).into()])
///     .field("password", Length::min(6));
///
/// assert_eq!(form.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HasProperties {
    fields: Arc<IndexMap<String, Constraints>>,
}

impl HasProperties {
    /// Violation identity for non-object values.
    pub const FQN: &'static str = "nebula-constraint/HasProperties";

    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the constraints for `name`.
    ///
    /// A replaced field keeps its original position.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, constraints: impl Into<Constraints>) -> Self {
        Arc::make_mut(&mut self.fields).insert(name.into(), constraints.into());
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Constraint])> {
        self.fields
            .iter()
            .map(|(name, constraints)| (name.as_str(), constraints.as_ref()))
    }

    /// Constraints declared for `name`.
    pub fn get(&self, name: &str) -> Option<&[Constraint]> {
        self.fields.get(name).map(AsRef::as_ref)
    }

    /// Resolves every declared field against `value`.
    ///
    /// Returns the `unsupported` violation instead when `value` is not an
    /// object; in that case nothing below this node is evaluated.
    pub fn targets<'a, 'v>(
        &'a self,
        value: Option<&'v Value>,
        path: &Path,
    ) -> Result<Vec<FieldTarget<'a, 'v>>, Violation> {
        let Some(Value::Object(object)) = value else {
            return Err(Violation::new(value, path, Self::FQN).with_reason(REASON_UNSUPPORTED));
        };

        Ok(self
            .fields
            .iter()
            .map(|(name, constraints)| {
                (
                    object.get(name),
                    constraints.as_ref(),
                    path.child(name.as_str()),
                )
            })
            .collect())
    }
}

impl<K, C> FromIterator<(K, C)> for HasProperties
where
    K: Into<String>,
    C: Into<Constraints>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |node, (name, constraints)| node.field(name, constraints))
    }
}
