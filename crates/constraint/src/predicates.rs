//! Boolean classifiers over a possibly absent JSON value.
//!
//! Every classifier takes `Option<&Value>`, where `None` means the value
//! is absent (a missing field). Free functions cover the primitive checks;
//! [`Predicate`] wraps any classifier into a clonable value that composes
//! with [`all`], [`any`] and [`not`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\].,;:\s@"]+(\.[^<>()\[\].,;:\s@"]+)*)|(".+"))@(([^<>()\[\].,;:\s@"]+\.)+[^<>()\[\].,;:\s@"]{2,})$"#,
    )
    .expect("email pattern is valid")
});

// ============================================================================
// PREDICATE
// ============================================================================

/// A shareable, composable classifier.
///
/// # Examples
///
/// ```
/// use nebula_constraint::predicates::{self, Predicate};
/// use serde_json::json;
///
/// let text_or_list = Predicate::new(predicates::is_string).or(predicates::is_array);
/// assert!(text_or_list.test(Some(&json!("abc"))));
/// assert!(text_or_list.test(Some(&json!([1, 2]))));
/// assert!(!text_or_list.test(Some(&json!(3))));
/// assert!(!text_or_list.test(None));
/// ```
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a classifier.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Applies the classifier.
    #[inline]
    pub fn test(&self, value: Option<&Value>) -> bool {
        (self.0)(value)
    }

    /// Logical AND; `other` runs only if `self` holds.
    #[must_use]
    pub fn and(self, other: impl Into<Predicate>) -> Self {
        all([self, other.into()])
    }

    /// Logical OR; `other` runs only if `self` does not hold.
    #[must_use]
    pub fn or(self, other: impl Into<Predicate>) -> Self {
        any([self, other.into()])
    }

    /// Logical NOT.
    #[must_use]
    pub fn not(self) -> Self {
        not(self)
    }
}

impl<F> From<F> for Predicate
where
    F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// True iff every predicate holds. Evaluates left to right and stops at
/// the first `false`. An empty set holds.
pub fn all<I>(predicates: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Predicate>,
{
    let predicates: Vec<Predicate> = predicates.into_iter().map(Into::into).collect();
    Predicate::new(move |value| predicates.iter().all(|p| p.test(value)))
}

/// True iff at least one predicate holds. Evaluates left to right and
/// stops at the first `true`. An empty set does not hold.
pub fn any<I>(predicates: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Predicate>,
{
    let predicates: Vec<Predicate> = predicates.into_iter().map(Into::into).collect();
    Predicate::new(move |value| predicates.iter().any(|p| p.test(value)))
}

/// Negates a predicate.
pub fn not(predicate: impl Into<Predicate>) -> Predicate {
    let predicate = predicate.into();
    Predicate::new(move |value| !predicate.test(value))
}

// ============================================================================
// PRIMITIVE CLASSIFIERS
// ============================================================================

/// The value is absent.
pub fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

/// The value is a present JSON `null`.
pub fn is_null(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Null))
}

/// The value is a boolean.
pub fn is_boolean(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(_)))
}

/// The value is a number.
pub fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)))
}

/// The value is a number without a fractional part.
pub fn is_integer(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// The value is a string.
pub fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

/// The value is an array.
pub fn is_array(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(_)))
}

/// The value is an object.
pub fn is_object(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(_)))
}

/// The value is a plain keyed mapping.
///
/// JSON has a single mapping kind, so this is the same probe as
/// [`is_object`]; it exists to name the intent at structural call sites.
pub fn is_record(value: Option<&Value>) -> bool {
    is_object(value)
}

/// The value is a string shaped like an email address.
pub fn is_email(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if EMAIL_REGEX.is_match(s))
}

/// The value is a finite number, or a string that parses as one.
///
/// With `integer` set, only whole numbers qualify.
pub fn is_numeric(integer: bool) -> Predicate {
    Predicate::new(move |value| {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.is_some_and(|n| n.is_finite() && (!integer || n.fract() == 0.0))
    })
}

/// The value equals `expected` exactly.
pub fn is_exact(expected: impl Into<Value>) -> Predicate {
    let expected = expected.into();
    Predicate::new(move |value| value == Some(&expected))
}

/// The value is an object with its own field `key`.
pub fn has_property(key: impl Into<String>) -> Predicate {
    let key = key.into();
    Predicate::new(move |value| matches!(value, Some(Value::Object(map)) if map.contains_key(&key)))
}

/// The value is a string matching `pattern`.
pub fn matches(pattern: Regex) -> Predicate {
    Predicate::new(move |value| matches!(value, Some(Value::String(s)) if pattern.is_match(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    #[case(json!(null), false, true, false)]
    #[case(json!(true), false, false, true)]
    #[case(json!(1), false, false, false)]
    fn shape_probes(
        #[case] value: Value,
        #[case] undefined: bool,
        #[case] null: bool,
        #[case] boolean: bool,
    ) {
        assert_eq!(is_undefined(Some(&value)), undefined);
        assert_eq!(is_null(Some(&value)), null);
        assert_eq!(is_boolean(Some(&value)), boolean);
    }

    #[test]
    fn absent_is_only_undefined() {
        assert!(is_undefined(None));
        assert!(!is_null(None));
        assert!(!is_string(None));
        assert!(!is_record(None));
    }

    #[rstest]
    #[case(json!(1), true)]
    #[case(json!(-4), true)]
    #[case(json!(2.0), true)]
    #[case(json!(2.5), false)]
    #[case(json!("2"), false)]
    fn integer_probe(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_integer(Some(&value)), expected);
    }

    #[rstest]
    #[case(json!(12), false, true)]
    #[case(json!("12.5"), false, true)]
    #[case(json!("12.5"), true, false)]
    #[case(json!(" 7 "), true, true)]
    #[case(json!("abc"), false, false)]
    #[case(json!("inf"), false, false)]
    #[case(json!(null), false, false)]
    fn numeric_probe(#[case] value: Value, #[case] integer: bool, #[case] expected: bool) {
        assert_eq!(is_numeric(integer).test(Some(&value)), expected);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last@sub.example.org", true)]
    #[case("\"quoted name\"@example.com", true)]
    #[case("no-at-sign", false)]
    #[case("user@localhost", false)]
    #[case("user@example.c", false)]
    fn email_probe(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_email(Some(&json!(input))), expected);
    }

    #[test]
    fn exact_and_property() {
        assert!(is_exact(3).test(Some(&json!(3))));
        assert!(!is_exact(3).test(Some(&json!("3"))));
        assert!(!is_exact(3).test(None));

        assert!(has_property("a").test(Some(&json!({ "a": null }))));
        assert!(!has_property("a").test(Some(&json!({ "b": 1 }))));
        assert!(!has_property("a").test(Some(&json!(["a"]))));
    }

    #[test]
    fn pattern_probe() {
        let slug = matches(Regex::new("^[a-z-]+$").unwrap());
        assert!(slug.test(Some(&json!("hello-world"))));
        assert!(!slug.test(Some(&json!("Hello"))));
        assert!(!slug.test(Some(&json!(1))));
    }

    #[test]
    fn combinators_follow_boolean_logic() {
        let text_or_list = any([is_string, is_array]);
        assert!(text_or_list.test(Some(&json!("x"))));
        assert!(!text_or_list.test(Some(&json!({}))));

        let non_empty_text = all([Predicate::new(is_string), not(is_exact(""))]);
        assert!(non_empty_text.test(Some(&json!("x"))));
        assert!(!non_empty_text.test(Some(&json!(""))));

        assert!(all(Vec::<Predicate>::new()).test(None));
        assert!(!any(Vec::<Predicate>::new()).test(None));
        assert!(Predicate::new(is_null).not().test(None));
    }

    #[test]
    fn combinators_short_circuit_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = {
            let calls = Arc::clone(&calls);
            Predicate::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };

        assert!(!Predicate::new(is_string).and(counting.clone()).test(Some(&json!(1))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(Predicate::new(is_number).or(counting.clone()).test(Some(&json!(1))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(Predicate::new(is_string).or(counting).test(Some(&json!(1))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
