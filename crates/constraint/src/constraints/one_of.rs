//! Membership in a fixed set of allowed values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Rule;

/// Equality used to compare an allowed entry with the (possibly absent)
/// validated value.
pub type EqualTo = Arc<dyn Fn(&Value, Option<&Value>) -> bool + Send + Sync>;

/// Requires the value to equal at least one allowed entry.
///
/// Resolved by the built-in provider to
/// [`OneOfValidator`](crate::validators::OneOfValidator). The default
/// equality is strict JSON equality; an absent value matches nothing.
///
/// # Examples
///
/// ```
/// use nebula_constraint::constraints::OneOf;
/// use serde_json::json;
///
/// let variant = OneOf::new(["filled", "outline", "tonal"]);
/// assert!(variant.contains(Some(&json!("tonal"))));
/// assert!(!variant.contains(Some(&json!(""))));
///
/// // Only the values of a keyed mapping form the allowed set.
/// let status = OneOf::from_value(json!({ "ON": 1, "OFF": 0 }));
/// assert_eq!(status.values(), &[json!(1), json!(0)]);
/// ```
#[derive(Clone)]
pub struct OneOf {
    values: Arc<[Value]>,
    equal_to: EqualTo,
    bail: bool,
}

impl OneOf {
    /// Violation identity.
    pub const FQN: &'static str = "nebula-constraint/OneOf";

    /// Allows exactly the given values.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            equal_to: Arc::new(strict_equal),
            bail: false,
        }
    }

    /// Builds the allowed set from a JSON value.
    ///
    /// An array contributes its elements, an object only its values, and
    /// any other value is a single allowed entry.
    pub fn from_value(values: Value) -> Self {
        match values {
            Value::Array(items) => Self::new(items),
            Value::Object(map) => Self::new(map.into_iter().map(|(_, value)| value)),
            scalar => Self::new([scalar]),
        }
    }

    /// Replaces the equality function.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_equality<F>(mut self, equal_to: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.equal_to = Arc::new(equal_to);
        self
    }

    /// Sets the bail flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_bail(mut self, bail: bool) -> Self {
        self.bail = bail;
        self
    }

    /// The allowed set, in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns `true` if `value` equals some allowed entry.
    pub fn contains(&self, value: Option<&Value>) -> bool {
        self.values
            .iter()
            .any(|allowed| (self.equal_to)(allowed, value))
    }
}

fn strict_equal(allowed: &Value, value: Option<&Value>) -> bool {
    value == Some(allowed)
}

impl fmt::Debug for OneOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf")
            .field("values", &self.values)
            .field("bail", &self.bail)
            .finish_non_exhaustive()
    }
}

impl Rule for OneOf {
    fn fqn(&self) -> &str {
        Self::FQN
    }

    fn bail(&self) -> bool {
        self.bail
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_equality_by_default() {
        let one_of = OneOf::new([json!(1), json!("1")]);

        assert!(one_of.contains(Some(&json!(1))));
        assert!(one_of.contains(Some(&json!("1"))));
        assert!(!one_of.contains(Some(&json!(1.5))));
        assert!(!one_of.contains(None));
    }

    #[test]
    fn custom_equality() {
        let case_insensitive = OneOf::new(["Red", "Green"]).with_equality(|allowed, value| {
            match (allowed.as_str(), value.and_then(Value::as_str)) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            }
        });

        assert!(case_insensitive.contains(Some(&json!("green"))));
        assert!(!case_insensitive.contains(Some(&json!("blue"))));
    }

    #[test]
    fn from_value_shapes() {
        assert_eq!(OneOf::from_value(json!([1, 2])).values(), &[json!(1), json!(2)]);
        assert_eq!(OneOf::from_value(json!("only")).values(), &[json!("only")]);
    }
}
