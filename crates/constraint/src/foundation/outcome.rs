//! Immediate or deferred result of a single leaf check.

use std::fmt;

use futures::future::BoxFuture;

use super::{Rejection, Violation};

/// Future returned by a deferred leaf check.
pub type DeferredCheck = BoxFuture<'static, Result<Option<Violation>, Rejection>>;

/// What a leaf check produced.
///
/// The shape is decided by the validator, not discovered by the engine:
/// the synchronous engine refuses `Deferred`, the concurrent engine awaits
/// it.
pub enum Outcome {
    /// The check finished; `None` means the value conforms.
    Ready(Option<Violation>),
    /// The check needs to be awaited.
    Deferred(DeferredCheck),
}

impl Outcome {
    /// A passing, immediate outcome.
    pub const fn pass() -> Self {
        Self::Ready(None)
    }

    /// A failing, immediate outcome.
    pub fn fail(violation: Violation) -> Self {
        Self::Ready(Some(violation))
    }

    /// Wraps a future as a deferred outcome.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Option<Violation>, Rejection>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Returns `true` if the outcome must be awaited.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Resolves the outcome, awaiting it if deferred.
    pub async fn settle(self) -> Result<Option<Violation>, Rejection> {
        match self {
            Self::Ready(violation) => Ok(violation),
            Self::Deferred(check) => check.await,
        }
    }
}

impl From<Option<Violation>> for Outcome {
    fn from(violation: Option<Violation>) -> Self {
        Self::Ready(violation)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(violation) => f.debug_tuple("Ready").field(violation).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
