//! Fatal evaluation errors and deferred-check rejections.
//!
//! Violations are data and never travel through this module. What lives
//! here are the two other outcome classes: configuration mistakes that
//! abort a whole evaluation ([`ConstraintError`]) and failures of a single
//! deferred check ([`Rejection`]), which the concurrent engine turns back
//! into a violation.

use std::any::Any;
use std::fmt;

use serde_json::Value;

// ============================================================================
// CONSTRAINT ERROR
// ============================================================================

/// Errors that abort an evaluation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConstraintError {
    /// No provider in the chain resolves a validator for this rule.
    #[error("no validator for constraint {fqn}")]
    UnknownConstraint {
        /// Fully-qualified name of the unresolved rule.
        fqn: String,
    },

    /// A deferred check was reached from the synchronous entry point.
    #[error("found asynchronous validator for constraint {fqn}")]
    AsyncInSync {
        /// Fully-qualified name of the offending constraint.
        fqn: String,
    },

    /// A configuration document could not be parsed.
    #[error("invalid validator configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ConstraintError {
    /// Creates an [`UnknownConstraint`](Self::UnknownConstraint) error.
    pub fn unknown(fqn: impl Into<String>) -> Self {
        Self::UnknownConstraint { fqn: fqn.into() }
    }

    /// Creates an [`AsyncInSync`](Self::AsyncInSync) error.
    pub fn async_in_sync(fqn: impl Into<String>) -> Self {
        Self::AsyncInSync { fqn: fqn.into() }
    }
}

// ============================================================================
// REJECTION
// ============================================================================

/// Failure payload of a deferred check.
///
/// Returned as `Err` from an asynchronous check when it could not reach a
/// verdict. The concurrent engine reports it as a violation with reason
/// `reject` and the payload as meta.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    payload: Value,
}

impl Rejection {
    /// Wraps an arbitrary payload.
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Builds a rejection from a caught panic payload.
    ///
    /// `&str` and `String` payloads keep their message; anything else is
    /// reported as `"panic"`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map_or_else(|| "panic".to_owned(), |s| (*s).to_owned()),
        };
        Self::new(message)
    }

    /// The payload carried into the violation's `meta`.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consumes the rejection, returning its payload.
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

impl From<&str> for Rejection {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Rejection {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Value> for Rejection {
    fn from(payload: Value) -> Self {
        Self { payload }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Value::String(message) => write!(f, "check rejected: {message}"),
            other => write!(f, "check rejected: {other}"),
        }
    }
}

impl std::error::Error for Rejection {}
