//! Resolution of rules to validators.
//!
//! A [`Provider`] maps a [`Rule`] to the [`ConstraintValidator`] that
//! checks it, or declines with `None`. Providers are stacked into a
//! [`ProviderChain`]: an immutable linked list consulted head first, whose
//! tail is always the [`BuiltinProvider`]. Overriding a chain allocates a
//! new head and leaves the original untouched, so an override can add new
//! rule kinds or replace how a built-in kind is checked.
//!
//! ```
//! use std::any::Any;
//! use nebula_constraint::constraints::Rule;
//! use nebula_constraint::foundation::{Outcome, Path, Violation};
//! use nebula_constraint::provider::{Provider, ProviderChain};
//! use nebula_constraint::validators::ConstraintValidator;
//!
//! #[derive(Debug)]
//! struct Even;
//!
//! impl Rule for Even {
//!     fn fqn(&self) -> &str { "app/Even" }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! struct EvenProvider;
//!
//! impl Provider for EvenProvider {
//!     fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
//!         rule.as_any().downcast_ref::<Even>()?;
//!         Some(Box::new(|value: Option<&serde_json::Value>, path: &Path| {
//!             match value.and_then(serde_json::Value::as_i64) {
//!                 Some(n) if n % 2 == 0 => Outcome::pass(),
//!                 _ => Outcome::fail(Violation::new(value, path, "app/Even")),
//!             }
//!         }))
//!     }
//! }
//!
//! let builtin = ProviderChain::new();
//! let custom = builtin.override_with(EvenProvider);
//!
//! assert!(builtin.get(&Even).is_none());
//! assert!(custom.get(&Even).is_some());
//! assert_eq!(custom.depth(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::{LengthMode, ValidatorConfig};
use crate::constraints::{Length, OneOf, Rule};
use crate::validators::{ConstraintValidator, LengthValidator, OneOfValidator};

/// Resolves rules to validators.
pub trait Provider: Send + Sync {
    /// Returns a validator for `rule`, or `None` if this provider does not
    /// handle its kind.
    fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>>;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
        (**self).get(rule)
    }
}

// ============================================================================
// BUILTIN PROVIDER
// ============================================================================

/// Resolves [`Length`] and [`OneOf`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinProvider {
    /// Counting mode for length rules that do not choose one.
    pub length_mode: LengthMode,
}

impl BuiltinProvider {
    /// Creates the provider with the given default length mode.
    pub fn new(length_mode: LengthMode) -> Self {
        Self { length_mode }
    }
}

impl Provider for BuiltinProvider {
    fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
        let any = rule.as_any();

        if let Some(length) = any.downcast_ref::<Length>() {
            return Some(Box::new(LengthValidator::new(length, self.length_mode)));
        }
        if let Some(one_of) = any.downcast_ref::<OneOf>() {
            return Some(Box::new(OneOfValidator::new(one_of)));
        }
        None
    }
}

// ============================================================================
// PROVIDER CHAIN
// ============================================================================

/// Immutable linked list of providers, consulted head first.
#[derive(Clone)]
pub struct ProviderChain {
    head: Arc<dyn Provider>,
    fallback: Option<Arc<ProviderChain>>,
}

impl ProviderChain {
    /// A chain holding only the built-in provider with default settings.
    pub fn new() -> Self {
        Self::with_config(&ValidatorConfig::default())
    }

    /// A chain holding only the built-in provider, configured from `config`.
    pub fn with_config(config: &ValidatorConfig) -> Self {
        Self {
            head: Arc::new(BuiltinProvider::new(config.length_mode)),
            fallback: None,
        }
    }

    /// Returns a new chain that consults `provider` before this one.
    #[must_use = "override_with returns a new chain and leaves this one unchanged"]
    pub fn override_with(&self, provider: impl Provider + 'static) -> Self {
        Self {
            head: Arc::new(provider),
            fallback: Some(Arc::new(self.clone())),
        }
    }

    /// Number of providers in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut link = self.fallback.as_deref();
        while let Some(next) = link {
            depth += 1;
            link = next.fallback.as_deref();
        }
        depth
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for ProviderChain {
    fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
        let mut link = Some(self);
        while let Some(chain) = link {
            if let Some(validator) = chain.head.get(rule) {
                return Some(validator);
            }
            link = chain.fallback.as_deref();
        }
        None
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Outcome, Path, Violation};
    use serde_json::{Value, json};
    use std::any::Any;

    #[derive(Debug)]
    struct Unknown;

    impl Rule for Unknown {
        fn fqn(&self) -> &str {
            "test/Unknown"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Flags every length rule, whatever the value.
    struct StrictLength;

    impl Provider for StrictLength {
        fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
            rule.as_any().downcast_ref::<Length>()?;
            Some(Box::new(|value: Option<&Value>, path: &Path| {
                Outcome::fail(Violation::new(value, path, "test/Strict"))
            }))
        }
    }

    fn violates(chain: &ProviderChain, rule: &dyn Rule, value: Value) -> Option<String> {
        let validator = chain.get(rule)?;
        match validator.validate(Some(&value), &Path::root()) {
            Outcome::Ready(violation) => violation.map(|v| v.violates),
            Outcome::Deferred(_) => None,
        }
    }

    #[test]
    fn builtin_resolves_known_kinds() {
        let chain = ProviderChain::new();
        assert!(chain.get(&Length::min(1)).is_some());
        assert!(chain.get(&OneOf::new([1])).is_some());
        assert!(chain.get(&Unknown).is_none());
    }

    #[test]
    fn override_is_consulted_first() {
        let base = ProviderChain::new();
        let strict = base.override_with(StrictLength);

        assert_eq!(violates(&strict, &Length::min(1), json!("ok")).as_deref(), Some("test/Strict"));
        assert_eq!(violates(&base, &Length::min(1), json!("ok")), None);
        assert_eq!(
            violates(&strict, &OneOf::new([1]), json!(2)).as_deref(),
            Some(OneOf::FQN)
        );
    }

    #[test]
    fn depth_counts_links() {
        let base = ProviderChain::new();
        let twice = base.override_with(StrictLength).override_with(StrictLength);

        assert_eq!(base.depth(), 1);
        assert_eq!(twice.depth(), 3);
    }

    #[test]
    fn chains_nest_as_providers() {
        let inner = ProviderChain::new().override_with(StrictLength);
        let outer = ProviderChain::new().override_with(inner);

        assert_eq!(
            violates(&outer, &Length::min(1), json!("ok")).as_deref(),
            Some("test/Strict")
        );
    }

    #[test]
    fn configured_length_mode_reaches_builtin() {
        let config = ValidatorConfig::default().with_length_mode(LengthMode::Bytes);
        let chain = ProviderChain::with_config(&config);

        assert_eq!(
            violates(&chain, &Length::max(2), json!("é😀")).as_deref(),
            Some(Length::FQN)
        );
    }
}
