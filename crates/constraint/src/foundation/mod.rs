//! Core data types shared by every other module.
//!
//! - [`Path`] / [`PathSegment`]: where in the value something happened
//! - [`Violation`]: one failed constraint
//! - [`Outcome`]: immediate or deferred result of a leaf check
//! - [`ConstraintError`] / [`Rejection`]: fatal errors and failed deferred checks

pub mod error;
pub mod outcome;
pub mod path;
pub mod violation;

pub use error::{ConstraintError, Rejection};
pub use outcome::{DeferredCheck, Outcome};
pub use path::{Path, PathSegment};
pub use violation::{LIBRARY_FQN, REASON_REJECT, REASON_UNDEFINED, REASON_UNSUPPORTED, Violation};

/// Result of one evaluation: the ordered violations, or a fatal error.
pub type EvaluationResult = Result<Vec<Violation>, ConstraintError>;
