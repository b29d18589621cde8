//! Length bounds for strings and arrays.

use std::any::Any;

use super::Rule;
use crate::config::LengthMode;

/// Declares exact, minimum and/or maximum length bounds.
///
/// Resolved by the built-in provider to
/// [`LengthValidator`](crate::validators::LengthValidator). Only strings
/// and arrays are supported; strings are measured in the constraint's
/// [`LengthMode`], or the validator's configured default when unset.
///
/// # Examples
///
/// ```
/// use nebula_constraint::config::LengthMode;
/// use nebula_constraint::constraints::Length;
///
/// let nickname = Length::range(4, 16);
/// let token = Length::exact(32).counting(LengthMode::Bytes).with_bail(true);
///
/// assert_eq!(nickname.min, Some(4));
/// assert_eq!(token.exact, Some(32));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Length {
    /// Required exact length.
    pub exact: Option<usize>,
    /// Inclusive upper bound.
    pub max: Option<usize>,
    /// Inclusive lower bound.
    pub min: Option<usize>,
    /// Stop later siblings when this check fails.
    pub bail: bool,
    /// String counting mode; `None` defers to the validator configuration.
    pub mode: Option<LengthMode>,
}

impl Length {
    /// Violation identity.
    pub const FQN: &'static str = "nebula-constraint/Length";

    /// Length of at least `min`.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// Length of at most `max`.
    pub fn max(max: usize) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    /// Length of exactly `exact`.
    pub fn exact(exact: usize) -> Self {
        Self {
            exact: Some(exact),
            ..Self::default()
        }
    }

    /// Length between `min` and `max`, inclusive.
    pub fn range(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// Sets the bail flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_bail(mut self, bail: bool) -> Self {
        self.bail = bail;
        self
    }

    /// Counts strings in `mode` regardless of the validator configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn counting(mut self, mode: LengthMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl Rule for Length {
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
