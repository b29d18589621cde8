//! The violation record produced for every failed constraint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Path;

/// Identity stamped on synthetic violations created by the engine itself
/// (for example, a deferred check that was rejected).
pub const LIBRARY_FQN: &str = "nebula-constraint";

/// Reason attached to synthetic violations for rejected deferred checks.
pub const REASON_REJECT: &str = "reject";

/// Reason used when a constraint cannot be applied to the value's shape.
pub const REASON_UNSUPPORTED: &str = "unsupported";

/// Reason used when a required value is absent.
pub const REASON_UNDEFINED: &str = "undefined";

/// One failed constraint: what was checked, where, and why it failed.
///
/// `value` is `None` when the offending value was absent (a missing
/// field), which is distinct from a present JSON `null`.
///
/// # Examples
///
/// ```
/// use nebula_constraint::foundation::{Path, Violation};
/// use serde_json::json;
///
/// let violation = Violation::new(Some(&json!("")), &Path::root().child("nickname"), "app/Length")
///     .with_reason("min")
///     .with_meta(json!(4));
///
/// assert_eq!(violation.reason.as_deref(), Some("min"));
/// assert_eq!(violation.path.to_string(), "nickname");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The offending value, or `None` if it was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Location of the value from the validated root.
    pub path: Path,

    /// Fully-qualified name of the failing constraint.
    pub violates: String,

    /// Optional discriminator such as `min`, `max`, `unsupported`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Reason-specific payload, e.g. the violated threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Violation {
    /// Creates a violation without reason or meta.
    pub fn new(value: Option<&Value>, path: &Path, violates: impl Into<String>) -> Self {
        Self {
            value: value.cloned(),
            path: path.clone(),
            violates: violates.into(),
            reason: None,
            meta: None,
        }
    }

    /// Creates the synthetic violation reported for a rejected deferred check.
    pub fn rejected(value: Option<&Value>, path: &Path, payload: Value) -> Self {
        Self::new(value, path, LIBRARY_FQN)
            .with_reason(REASON_REJECT)
            .with_meta(payload)
    }

    /// Sets the reason.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the meta payload.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Replaces the identity, keeping value, path, reason and meta.
    #[must_use = "builder methods must be chained or built"]
    pub fn restamped(mut self, violates: impl Into<String>) -> Self {
        self.violates = violates.into();
        self
    }

    /// Returns `true` if this violation was synthesized from a rejected check.
    pub fn is_rejection(&self) -> bool {
        self.violates == LIBRARY_FQN && self.reason.as_deref() == Some(REASON_REJECT)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] violates {}", self.path, self.violates)?;
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        if let Some(meta) = &self.meta {
            write!(f, ": {meta}")?;
        }
        Ok(())
    }
}
