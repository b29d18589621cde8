//! Ready-made assertions for the common type and shape checks.
//!
//! Every type check bails: once a value has the wrong type, checks that
//! follow it in the same sibling list would only report noise.

use std::sync::Arc;

use serde_json::Value;

use super::Assertion;
use crate::config::LengthMode;
use crate::constraints::EqualTo;
use crate::foundation::{REASON_UNDEFINED, REASON_UNSUPPORTED};
use crate::predicates::{self, Predicate};

const IS_BOOLEAN: &str = "nebula-constraint/IsBoolean";
const IS_DEFINED: &str = "nebula-constraint/IsDefined";
const IS_EMAIL: &str = "nebula-constraint/IsEmail";
const IS_NULL: &str = "nebula-constraint/IsNull";
const IS_NUMBER: &str = "nebula-constraint/IsNumber";
const IS_STRING: &str = "nebula-constraint/IsString";
const HAS_LENGTH: &str = "nebula-constraint/HasLength";
const ONE_OF: &str = "nebula-constraint/OneOf";

/// Value must be a boolean.
pub fn is_boolean() -> Assertion {
    Assertion::new(IS_BOOLEAN, predicates::is_boolean).with_bail(true)
}

/// Value must be present. `null` counts as present.
pub fn is_defined() -> Assertion {
    Assertion::new(IS_DEFINED, predicates::not(predicates::is_undefined))
        .with_bail(true)
        .with_reason(REASON_UNDEFINED)
}

/// Value must be a string shaped like an email address.
pub fn is_email() -> Assertion {
    Assertion::new(IS_EMAIL, predicates::is_email).with_bail(true)
}

/// Value must be `null`.
pub fn is_null() -> Assertion {
    Assertion::new(IS_NULL, predicates::is_null).with_bail(true)
}

/// Value must be a number.
pub fn is_number() -> Assertion {
    Assertion::new(IS_NUMBER, predicates::is_number).with_bail(true)
}

/// Value must be a string.
pub fn is_string() -> Assertion {
    Assertion::new(IS_STRING, predicates::is_string).with_bail(true)
}

// ============================================================================
// HAS LENGTH
// ============================================================================

/// Options for [`has_length`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasLength {
    /// Required exact length.
    pub exact: Option<usize>,
    /// Inclusive upper bound.
    pub max: Option<usize>,
    /// Inclusive lower bound.
    pub min: Option<usize>,
    /// Stop later siblings on failure.
    pub bail: bool,
    /// String counting mode; characters when unset.
    pub mode: Option<LengthMode>,
}

/// Length bounds as a self-executing assertion.
///
/// Non-string, non-array values fail with reason `unsupported`. Otherwise
/// the bounds are checked as exact, then max, then min; the first failing
/// bound is reported under `nebula-constraint/HasLength` with the bound's
/// name as reason and its threshold as meta.
///
/// ```
/// use nebula_constraint::assertions::{HasLength, has_length};
/// use nebula_constraint::foundation::{Outcome, Path};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let short = Arc::new(has_length(HasLength { max: Some(3), ..HasLength::default() }));
/// let Outcome::Ready(Some(v)) = nebula_constraint::assertions::check(&short, Some(&json!("abcd")), &Path::root()) else {
///     unreachable!()
/// };
/// assert_eq!(v.reason.as_deref(), Some("max"));
/// assert_eq!(v.meta, Some(json!(3)));
/// ```
pub fn has_length(options: HasLength) -> Assertion {
    let mode = options.mode.unwrap_or_default();
    let bounds: [(&'static str, Option<usize>, fn(usize, usize) -> bool); 3] = [
        ("exact", options.exact, |len, n| len == n),
        ("max", options.max, |len, n| len <= n),
        ("min", options.min, |len, n| len >= n),
    ];

    let children: Vec<Assertion> = bounds
        .into_iter()
        .filter_map(|(name, threshold, holds)| {
            let threshold = threshold?;
            let predicate = Predicate::new(move |value| {
                measure(value, mode).is_some_and(|len| holds(len, threshold))
            });
            Some(
                Assertion::new(format!("{HAS_LENGTH}[{name}]"), predicate)
                    .with_reason(name)
                    .with_meta(threshold),
            )
        })
        .collect();

    Assertion::new(HAS_LENGTH, Predicate::new(predicates::is_string).or(predicates::is_array))
        .with_bail(options.bail)
        .with_reason(REASON_UNSUPPORTED)
        .that(children)
}

fn measure(value: Option<&Value>, mode: LengthMode) -> Option<usize> {
    match value? {
        Value::String(text) => Some(mode.measure(text)),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

// ============================================================================
// ONE OF
// ============================================================================

/// Options for [`one_of`].
#[derive(Clone, Default)]
pub struct OneOfOptions {
    /// Equality between an allowed entry and the value; strict when unset.
    pub equal_to: Option<EqualTo>,
    /// Stop later siblings on failure.
    pub bail: bool,
}

impl std::fmt::Debug for OneOfOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneOfOptions")
            .field("custom_equality", &self.equal_to.is_some())
            .field("bail", &self.bail)
            .finish()
    }
}

/// Membership in a fixed set as a self-executing assertion.
///
/// Fails without a reason; the allowed list is reported as meta.
pub fn one_of<I>(values: I, options: OneOfOptions) -> Assertion
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let allowed: Arc<[Value]> = values.into_iter().map(Into::into).collect();
    let meta = Value::Array(allowed.to_vec());
    let equal_to = options.equal_to;

    let predicate = Predicate::new(move |value| {
        allowed.iter().any(|entry| match &equal_to {
            Some(equal_to) => equal_to(entry, value),
            None => value == Some(entry),
        })
    });

    Assertion::new(ONE_OF, predicate)
        .with_bail(options.bail)
        .with_meta(meta)
}
