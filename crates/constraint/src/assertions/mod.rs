//! Self-executing leaf assertions.
//!
//! An [`Assertion`] carries everything needed to check a value on its own:
//! identity, bail policy, the reason and meta reported on failure, and the
//! check itself (a synchronous [`Predicate`] or an asynchronous function).
//! Assertions nest: [`Assertion::that`] attaches sub-assertions that run
//! only after the parent passed, and a failing sub-assertion is reported
//! under the parent's identity.
//!
//! ```
//! use nebula_constraint::assertions::{self, Assertion};
//! use nebula_constraint::foundation::{Outcome, Path};
//! use nebula_constraint::predicates;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let adult = Assertion::new("app/Adult", predicates::is_number)
//!     .with_bail(true)
//!     .that([Assertion::new("app/Adult[min]", |v: Option<&serde_json::Value>| {
//!         v.and_then(serde_json::Value::as_f64).is_some_and(|age| age >= 18.0)
//!     })
//!     .with_reason("min")
//!     .with_meta(18)]);
//!
//! let Outcome::Ready(Some(violation)) = assertions::check(&Arc::new(adult), Some(&json!(12)), &Path::root()) else {
//!     unreachable!()
//! };
//! assert_eq!(violation.violates, "app/Adult");
//! assert_eq!(violation.reason.as_deref(), Some("min"));
//! ```

mod builtin;
mod check;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

pub use builtin::{
    HasLength, OneOfOptions, has_length, is_boolean, is_defined, is_email, is_null, is_number,
    is_string, one_of,
};
pub use check::check;

use crate::foundation::{Path, Rejection, Violation};
use crate::predicates::Predicate;

/// Asynchronous check: resolves to whether the value conforms.
pub type AsyncCheck =
    Arc<dyn Fn(Option<Value>) -> BoxFuture<'static, Result<bool, Rejection>> + Send + Sync>;

/// How an assertion decides whether a value conforms.
#[derive(Clone)]
pub enum Check {
    /// Decided immediately.
    Immediate(Predicate),
    /// Decided by awaiting a future; usable only from the concurrent engine.
    Deferred(AsyncCheck),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(_) => f.write_str("Immediate(..)"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

// ============================================================================
// ASSERTION
// ============================================================================

/// An immutable, self-describing leaf check.
///
/// Every builder method returns a new value; an assertion already placed
/// in a tree is never changed.
#[derive(Debug, Clone)]
pub struct Assertion {
    fqn: Cow<'static, str>,
    bail: bool,
    reason: Option<Cow<'static, str>>,
    meta: Option<Value>,
    check: Check,
    also: Arc<[Arc<Assertion>]>,
}

impl Assertion {
    /// Creates a synchronous assertion.
    pub fn new(fqn: impl Into<Cow<'static, str>>, predicate: impl Into<Predicate>) -> Self {
        Self::with_check(fqn, Check::Immediate(predicate.into()))
    }

    /// Creates an asynchronous assertion.
    ///
    /// The function receives an owned copy of the value (`None` when
    /// absent). Returning `Err` rejects the check; the concurrent engine
    /// reports that as a `reject` violation.
    pub fn deferred<F, Fut>(fqn: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, Rejection>> + Send + 'static,
    {
        let check: AsyncCheck = Arc::new(move |value| Box::pin(check(value)));
        Self::with_check(fqn, Check::Deferred(check))
    }

    fn with_check(fqn: impl Into<Cow<'static, str>>, check: Check) -> Self {
        Self {
            fqn: fqn.into(),
            bail: false,
            reason: None,
            meta: None,
            check,
            also: Arc::new([]),
        }
    }

    /// Sets the bail flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_bail(mut self, bail: bool) -> Self {
        self.bail = bail;
        self
    }

    /// Sets the reason reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the meta reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Returns a copy whose sub-assertions are exactly `children`.
    ///
    /// Sub-assertions run in order against the same value once this
    /// assertion passes; the first failure is reported with this
    /// assertion's identity and the child's reason and meta.
    #[must_use = "builder methods must be chained or built"]
    pub fn that<I>(&self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<Assertion>>,
    {
        Self {
            also: children.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Fully-qualified name.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// Whether a failure stops later siblings.
    pub fn is_bail(&self) -> bool {
        self.bail
    }

    /// Reason reported on failure.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Meta reported on failure.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// The check deciding conformance.
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Sub-assertions run after this one passes.
    pub fn also(&self) -> &[Arc<Assertion>] {
        &self.also
    }

    /// Returns `true` if this assertion or any sub-assertion is asynchronous.
    pub fn is_deferred(&self) -> bool {
        matches!(self.check, Check::Deferred(_)) || self.also.iter().any(|a| a.is_deferred())
    }

    /// The violation reported when this assertion's own check fails.
    pub fn violation(&self, value: Option<&Value>, path: &Path) -> Violation {
        Violation {
            value: value.cloned(),
            path: path.clone(),
            violates: self.fqn.to_string(),
            reason: self.reason.as_ref().map(ToString::to_string),
            meta: self.meta.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates;
    use serde_json::json;

    #[test]
    fn builders_do_not_touch_the_original() {
        let base = Assertion::new("app/Text", predicates::is_string);
        let nested = base.that([Assertion::new("app/Text[x]", predicates::is_null)]);

        assert!(base.also().is_empty());
        assert_eq!(nested.also().len(), 1);
        assert_eq!(nested.fqn(), "app/Text");
    }

    #[test]
    fn that_replaces_children() {
        let base = Assertion::new("app/A", predicates::is_string)
            .that([Assertion::new("app/B", predicates::is_string)]);
        let replaced = base.that(Vec::<Assertion>::new());
        assert!(replaced.also().is_empty());
    }

    #[test]
    fn violation_carries_options() {
        let assertion = Assertion::new("app/Min", predicates::is_number)
            .with_reason("min")
            .with_meta(3);
        let violation = assertion.violation(Some(&json!(1)), &Path::root().child("n"));

        assert_eq!(violation.violates, "app/Min");
        assert_eq!(violation.reason.as_deref(), Some("min"));
        assert_eq!(violation.meta, Some(json!(3)));
        assert_eq!(violation.value, Some(json!(1)));
    }

    #[test]
    fn deferred_flag_bubbles_up() {
        let remote = Assertion::deferred("app/Remote", |_| async { Ok(true) });
        let outer = Assertion::new("app/Outer", predicates::is_string).that([remote]);

        assert!(outer.is_deferred());
        assert!(!Assertion::new("app/Local", predicates::is_string).is_deferred());
    }
}
