//! Validator for [`OneOf`].

use serde_json::Value;

use super::ConstraintValidator;
use crate::constraints::OneOf;
use crate::foundation::{Outcome, Path, Violation};

/// Checks a [`OneOf`] rule. The violation has no reason; its meta is the
/// allowed list.
#[derive(Debug, Clone, Copy)]
pub struct OneOfValidator<'c> {
    constraint: &'c OneOf,
}

impl<'c> OneOfValidator<'c> {
    /// Binds the validator to `constraint`.
    pub fn new(constraint: &'c OneOf) -> Self {
        Self { constraint }
    }
}

impl ConstraintValidator for OneOfValidator<'_> {
    fn validate(&self, value: Option<&Value>, path: &Path) -> Outcome {
        if self.constraint.contains(value) {
            return Outcome::pass();
        }

        Outcome::fail(
            Violation::new(value, path, OneOf::FQN)
                .with_meta(Value::Array(self.constraint.values().to_vec())),
        )
    }
}
