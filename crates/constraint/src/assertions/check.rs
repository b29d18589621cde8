//! Evaluation of a single assertion and its sub-assertion chain.

use std::sync::Arc;

use serde_json::Value;

use super::{Assertion, Check};
use crate::foundation::{Outcome, Path, Rejection, Violation};

/// Checks `value` against `assertion`.
///
/// The assertion's own check runs first. If it passes, sub-assertions run
/// in order and the first failure is returned re-stamped with the outer
/// assertion's identity (so the outermost fqn wins across any depth of
/// nesting). The result stays [`Outcome::Ready`] as long as every check
/// reached is synchronous; the first asynchronous step turns the rest of
/// the chain into one [`Outcome::Deferred`].
pub fn check(assertion: &Arc<Assertion>, value: Option<&Value>, path: &Path) -> Outcome {
    match assertion.check() {
        Check::Immediate(predicate) => {
            if predicate.test(value) {
                check_also(assertion, value, path, 0)
            } else {
                Outcome::fail(assertion.violation(value, path))
            }
        }
        Check::Deferred(decide) => {
            let decide = Arc::clone(decide);
            let assertion = Arc::clone(assertion);
            let value = value.cloned();
            let path = path.clone();

            // The check function itself runs only once the outcome is polled.
            Outcome::deferred(async move {
                if !decide(value.clone()).await? {
                    return Ok(Some(assertion.violation(value.as_ref(), &path)));
                }
                settle_also(&assertion, value.as_ref(), &path, 0).await
            })
        }
    }
}

fn check_also(assertion: &Arc<Assertion>, value: Option<&Value>, path: &Path, from: usize) -> Outcome {
    for (index, child) in assertion.also().iter().enumerate().skip(from) {
        match check(child, value, path) {
            Outcome::Ready(None) => {}
            Outcome::Ready(Some(violation)) => {
                return Outcome::fail(violation.restamped(assertion.fqn()));
            }
            Outcome::Deferred(pending) => {
                let assertion = Arc::clone(assertion);
                let value = value.cloned();
                let path = path.clone();

                return Outcome::deferred(async move {
                    if let Some(violation) = pending.await? {
                        return Ok(Some(violation.restamped(assertion.fqn())));
                    }
                    settle_also(&assertion, value.as_ref(), &path, index + 1).await
                });
            }
        }
    }

    Outcome::pass()
}

async fn settle_also(
    assertion: &Assertion,
    value: Option<&Value>,
    path: &Path,
    from: usize,
) -> Result<Option<Violation>, Rejection> {
    for child in assertion.also().iter().skip(from) {
        if let Some(violation) = check(child, value, path).settle().await? {
            return Ok(Some(violation.restamped(assertion.fqn())));
        }
    }

    Ok(None)
}
