//! Validators for provider-resolved rules.
//!
//! A [`Rule`](crate::constraints::Rule) only states intent. The provider
//! chain turns it into a [`ConstraintValidator`] bound to that rule, and
//! the engine asks the validator for an [`Outcome`] at one position.
//!
//! # Writing a validator
//!
//! ```
//! use nebula_constraint::foundation::{Outcome, Path, Violation};
//! use nebula_constraint::validators::ConstraintValidator;
//! use serde_json::Value;
//!
//! struct NonEmpty;
//!
//! impl ConstraintValidator for NonEmpty {
//!     fn validate(&self, value: Option<&Value>, path: &Path) -> Outcome {
//!         match value {
//!             Some(Value::String(s)) if !s.is_empty() => Outcome::pass(),
//!             _ => Outcome::fail(Violation::new(value, path, "app/NonEmpty")),
//!         }
//!     }
//! }
//! ```

pub mod length;
pub mod one_of;

use serde_json::Value;

pub use length::LengthValidator;
pub use one_of::OneOfValidator;

use crate::foundation::{Outcome, Path};

/// Checks one value at one position for a specific rule.
///
/// Return [`Outcome::Deferred`] only when the check genuinely has to wait;
/// the synchronous engine refuses deferred outcomes.
pub trait ConstraintValidator: Send + Sync {
    /// Checks `value` (`None` when absent) located at `path`.
    fn validate(&self, value: Option<&Value>, path: &Path) -> Outcome;
}

impl<F> ConstraintValidator for F
where
    F: Fn(Option<&Value>, &Path) -> Outcome + Send + Sync,
{
    fn validate(&self, value: Option<&Value>, path: &Path) -> Outcome {
        self(value, path)
    }
}
