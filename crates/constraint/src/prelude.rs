//! Prelude module for convenient imports.
//!
//! ```
//! use nebula_constraint::prelude::*;
//!
//! let tags = Constraint::each(Length::range(1, 12));
//! let violations = Validator::new().validate_sync(&serde_json::json!(["ok", ""]), &tags)?;
//! assert_eq!(violations[0].path, path![1]);
//! # Ok::<(), ConstraintError>(())
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    ConstraintError, EvaluationResult, Outcome, Path, PathSegment, Rejection, Violation,
};

// ============================================================================
// VOCABULARY
// ============================================================================

pub use crate::assertions::{Assertion, HasLength, OneOfOptions};
pub use crate::constraints::{Constraint, Constraints, Each, Exists, HasProperties, Length, OneOf, Rule};
pub use crate::predicates::Predicate;

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::Validator;
pub use crate::config::{LengthMode, ValidatorConfig};
pub use crate::provider::{BuiltinProvider, Provider, ProviderChain};
pub use crate::validators::ConstraintValidator;

pub use crate::{has_properties, path};
