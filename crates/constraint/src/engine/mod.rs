//! Evaluation of constraint trees.
//!
//! [`Validator`] is the entry point. It pairs a [`ProviderChain`] with a
//! [`ValidatorConfig`] and offers two ways to walk a tree:
//!
//! - [`Validator::validate_sync`] runs depth-first on the calling thread
//!   and refuses asynchronous leaves with
//!   [`ConstraintError::AsyncInSync`];
//! - [`Validator::validate`] runs subtrees and asynchronous leaves
//!   concurrently and reports them in the same order.
//!
//! Both walkers share one traversal step, so for trees without
//! asynchronous leaves they return identical violation lists.
//!
//! # Examples
//!
//! ```
//! use nebula_constraint::prelude::*;
//! use serde_json::json;
//!
//! let form: Constraint = has_properties! {
//!     "nickname" => [Exists, Length::min(4)],
//!     "password" => [Exists, Length::min(6)],
//! }
//! .into();
//!
//! let validator = Validator::new();
//! let violations = validator.validate_sync(&json!({ "nickname": "neo" }), &form)?;
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].path.to_string(), "nickname");
//! assert_eq!(violations[0].reason.as_deref(), Some("min"));
//! assert_eq!(violations[1].path.to_string(), "password");
//! assert_eq!(violations[1].reason.as_deref(), Some("undefined"));
//! # Ok::<(), ConstraintError>(())
//! ```

mod concurrent;
mod step;
mod sync;

use serde_json::Value;
use tracing::instrument;

use crate::config::ValidatorConfig;
use crate::constraints::Constraint;
use crate::foundation::{ConstraintError, EvaluationResult, Path};
use crate::provider::{Provider, ProviderChain};

use concurrent::ConcurrentWalker;
use sync::SyncWalker;

/// Validates JSON values against constraint trees.
///
/// Cheap to clone and safe to share: the provider chain and configuration
/// are immutable. [`override_with`](Self::override_with) returns a new
/// validator and leaves this one untouched.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    provider: ProviderChain,
    config: ValidatorConfig,
}

impl Validator {
    /// A validator with the built-in provider and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with the built-in provider, configured from `config`.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            provider: ProviderChain::with_config(&config),
            config,
        }
    }

    /// A validator resolving rules through `provider`, configured from
    /// `config`.
    ///
    /// The chain's built-in provider keeps whatever settings it was built
    /// with; `config` governs the walk itself.
    pub fn with_provider(provider: ProviderChain, config: ValidatorConfig) -> Self {
        Self { provider, config }
    }

    /// Returns a validator whose chain consults `provider` first.
    #[must_use = "override_with returns a new validator and leaves this one unchanged"]
    pub fn override_with(&self, provider: impl Provider + 'static) -> Self {
        Self {
            provider: self.provider.override_with(provider),
            config: self.config.clone(),
        }
    }

    /// The provider chain.
    pub fn provider(&self) -> &ProviderChain {
        &self.provider
    }

    /// The configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `value` synchronously.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::UnknownConstraint`] when no provider handles a rule
    /// - [`ConstraintError::AsyncInSync`] when a leaf returns a deferred outcome
    pub fn validate_sync<C>(&self, value: &Value, constraints: &C) -> EvaluationResult
    where
        C: AsRef<[Constraint]> + ?Sized,
    {
        self.validate_sync_at(Some(value), constraints, Path::root())
    }

    /// Validates a possibly absent `value` located at `path`, synchronously.
    ///
    /// # Errors
    ///
    /// Same as [`validate_sync`](Self::validate_sync).
    #[instrument(
        level = "debug",
        skip_all,
        fields(mode = "sync", constraints = constraints.as_ref().len(), path = %path)
    )]
    pub fn validate_sync_at<C>(
        &self,
        value: Option<&Value>,
        constraints: &C,
        path: Path,
    ) -> EvaluationResult
    where
        C: AsRef<[Constraint]> + ?Sized,
    {
        let mut violations = Vec::new();
        let walked =
            SyncWalker::new(&self.provider).walk(value, constraints.as_ref(), &path, &mut violations);

        finish(walked.map(|()| violations))
    }

    /// Validates `value`, running asynchronous leaves concurrently.
    ///
    /// A deferred check that fails with a
    /// [`Rejection`](crate::foundation::Rejection), or panics while
    /// `catch_panics` is enabled, is reported as a `reject` violation in
    /// its place; evaluation continues.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::UnknownConstraint`] when no provider handles a rule.
    pub async fn validate<C>(&self, value: &Value, constraints: &C) -> EvaluationResult
    where
        C: AsRef<[Constraint]> + ?Sized,
    {
        self.validate_at(Some(value), constraints, Path::root()).await
    }

    /// Validates a possibly absent `value` located at `path`, concurrently.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    #[instrument(
        level = "debug",
        skip_all,
        fields(mode = "concurrent", constraints = constraints.as_ref().len(), path = %path)
    )]
    pub async fn validate_at<C>(
        &self,
        value: Option<&Value>,
        constraints: &C,
        path: Path,
    ) -> EvaluationResult
    where
        C: AsRef<[Constraint]> + ?Sized,
    {
        let walker = ConcurrentWalker::new(&self.provider, &self.config);
        finish(walker.walk(value, constraints.as_ref(), path).await)
    }
}

fn finish(result: EvaluationResult) -> EvaluationResult {
    match &result {
        Ok(violations) => tracing::debug!(violations = violations.len(), "evaluation finished"),
        Err(error) => tracing::debug!(%error, "evaluation aborted"),
    }
    result
}
