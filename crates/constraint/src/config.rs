//! Validator configuration.
//!
//! Configuration is plain data: construct it in code with the `with_*`
//! builders, or deserialize it from whatever document the host
//! application already loads. Unknown keys are rejected so typos surface
//! early.
//!
//! ```
//! use nebula_constraint::config::{LengthMode, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_json(r#"{ "length_mode": "bytes", "max_in_flight": 8 }"#)?;
//! assert_eq!(config.length_mode, LengthMode::Bytes);
//! assert_eq!(config.max_in_flight.map(|n| n.get()), Some(8));
//! assert!(config.catch_panics);
//! # Ok::<(), nebula_constraint::foundation::ConstraintError>(())
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::foundation::ConstraintError;

// ============================================================================
// LENGTH MODE
// ============================================================================

/// How string length is counted.
///
/// The default counts Unicode scalar values. Choose [`LengthMode::Utf16`]
/// when lengths must agree with a JavaScript client's `String.length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-8 bytes.
    Bytes,
    /// UTF-16 code units, matching browser-side `String.length`.
    Utf16,
}

impl LengthMode {
    /// Measures `input` according to this mode.
    #[inline]
    pub fn measure(self, input: &str) -> usize {
        match self {
            Self::Chars => input.chars().count(),
            Self::Bytes => input.len(),
            Self::Utf16 => input.encode_utf16().count(),
        }
    }
}

// ============================================================================
// VALIDATOR CONFIG
// ============================================================================

/// Settings shared by every evaluation of a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Default counting mode for built-in length checks.
    pub length_mode: LengthMode,

    /// Upper bound on branches the concurrent engine keeps in flight per
    /// sibling list. `None` launches every branch at once.
    pub max_in_flight: Option<NonZeroUsize>,

    /// Convert panics inside deferred checks into `reject` violations.
    pub catch_panics: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            length_mode: LengthMode::Chars,
            max_in_flight: None,
            catch_panics: true,
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document; missing keys take defaults.
    pub fn from_json(document: &str) -> Result<Self, ConstraintError> {
        serde_json::from_str(document).map_err(|error| {
            debug!(%error, "rejected validator configuration");
            ConstraintError::from(error)
        })
    }

    /// Sets the default length counting mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    /// Bounds the number of in-flight branches per sibling list.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_in_flight(mut self, limit: NonZeroUsize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    /// Enables or disables panic recovery in deferred checks.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }
}
