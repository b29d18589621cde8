//! Validator for [`Length`].

use serde_json::Value;

use super::ConstraintValidator;
use crate::config::LengthMode;
use crate::constraints::Length;
use crate::foundation::{Outcome, Path, REASON_UNSUPPORTED, Violation};

/// Checks a [`Length`] rule.
///
/// Strings are measured in the rule's counting mode, falling back to
/// `default_mode`; arrays by element count. Anything else is
/// `unsupported`. Bounds are checked exact, then max, then min.
#[derive(Debug, Clone, Copy)]
pub struct LengthValidator<'c> {
    constraint: &'c Length,
    default_mode: LengthMode,
}

impl<'c> LengthValidator<'c> {
    /// Binds the validator to `constraint`.
    pub fn new(constraint: &'c Length, default_mode: LengthMode) -> Self {
        Self {
            constraint,
            default_mode,
        }
    }

    fn measure(&self, value: Option<&Value>) -> Option<usize> {
        match value? {
            Value::String(text) => {
                Some(self.constraint.mode.unwrap_or(self.default_mode).measure(text))
            }
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    fn first_broken_bound(&self, len: usize) -> Option<(&'static str, usize)> {
        let Length { exact, max, min, .. } = *self.constraint;

        if let Some(exact) = exact.filter(|&n| len != n) {
            return Some(("exact", exact));
        }
        if let Some(max) = max.filter(|&n| len > n) {
            return Some(("max", max));
        }
        if let Some(min) = min.filter(|&n| len < n) {
            return Some(("min", min));
        }
        None
    }
}

impl ConstraintValidator for LengthValidator<'_> {
    fn validate(&self, value: Option<&Value>, path: &Path) -> Outcome {
        let Some(len) = self.measure(value) else {
            return Outcome::fail(
                Violation::new(value, path, Length::FQN).with_reason(REASON_UNSUPPORTED),
            );
        };

        match self.first_broken_bound(len) {
            Some((reason, threshold)) => Outcome::fail(
                Violation::new(value, path, Length::FQN)
                    .with_reason(reason)
                    .with_meta(threshold),
            ),
            None => Outcome::pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn run(length: Length, value: Option<&Value>) -> Option<Violation> {
        match LengthValidator::new(&length, LengthMode::Chars).validate(value, &Path::root()) {
            Outcome::Ready(violation) => violation,
            Outcome::Deferred(_) => panic!("length checks are synchronous"),
        }
    }

    #[rstest]
    #[case(json!("abcd"), None)]
    #[case(json!("abc"), Some(("min", 4)))]
    #[case(json!("abcdefghijk"), Some(("max", 10)))]
    #[case(json!(["a", "b", "c", "d"]), None)]
    #[case(json!([]), Some(("min", 4)))]
    fn range(#[case] value: Value, #[case] expected: Option<(&str, usize)>) {
        let violation = run(Length::range(4, 10), Some(&value));
        let got = violation.map(|v| {
            let threshold = v.meta.and_then(|m| m.as_u64()).unwrap() as usize;
            (v.reason.unwrap(), threshold)
        });
        assert_eq!(got, expected.map(|(r, n)| (r.to_string(), n)));
    }

    #[rstest]
    #[case(json!(12))]
    #[case(json!(null))]
    #[case(json!({ "length": 4 }))]
    fn unsupported_values(#[case] value: Value) {
        let violation = run(Length::min(1), Some(&value)).unwrap();
        assert_eq!(violation.violates, Length::FQN);
        assert_eq!(violation.reason.as_deref(), Some("unsupported"));
        assert_eq!(violation.meta, None);
    }

    #[test]
    fn absent_is_unsupported() {
        let violation = run(Length::min(1), None).unwrap();
        assert_eq!(violation.reason.as_deref(), Some("unsupported"));
        assert_eq!(violation.value, None);
    }

    #[test]
    fn exact_wins_over_other_bounds() {
        let length = Length {
            exact: Some(2),
            min: Some(5),
            ..Length::default()
        };
        let violation = run(length, Some(&json!("abc"))).unwrap();
        assert_eq!(violation.reason.as_deref(), Some("exact"));
        assert_eq!(violation.meta, Some(json!(2)));
    }

    #[test]
    fn rule_mode_overrides_default() {
        let length = Length::max(2).counting(LengthMode::Utf16);
        let validator = LengthValidator::new(&length, LengthMode::Chars);

        // one astral char is two UTF-16 units
        assert!(matches!(
            validator.validate(Some(&json!("😀")), &Path::root()),
            Outcome::Ready(None)
        ));
        assert!(matches!(
            validator.validate(Some(&json!("a😀")), &Path::root()),
            Outcome::Ready(Some(_))
        ));
    }

    #[test]
    fn default_mode_applies_when_rule_is_silent() {
        let length = Length::max(2);
        let validator = LengthValidator::new(&length, LengthMode::Bytes);
        assert!(matches!(
            validator.validate(Some(&json!("é😀")), &Path::root()),
            Outcome::Ready(Some(_))
        ));
    }
}
