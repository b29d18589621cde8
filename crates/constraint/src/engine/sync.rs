//! Depth-first synchronous walk.

use serde_json::Value;

use super::step::{Step, step};
use crate::constraints::Constraint;
use crate::foundation::{ConstraintError, Outcome, Path, Violation};
use crate::provider::Provider;

/// Walks a constraint tree, appending violations to one shared list.
pub(crate) struct SyncWalker<'p> {
    provider: &'p dyn Provider,
}

impl<'p> SyncWalker<'p> {
    pub(crate) fn new(provider: &'p dyn Provider) -> Self {
        Self { provider }
    }

    /// Evaluates one sibling list at one position.
    pub(crate) fn walk(
        &self,
        value: Option<&Value>,
        constraints: &[Constraint],
        path: &Path,
        out: &mut Vec<Violation>,
    ) -> Result<(), ConstraintError> {
        for constraint in constraints {
            match step(constraint, value, path, self.provider)? {
                Step::Descend(branches) => {
                    for branch in branches {
                        self.walk(branch.value, branch.constraints, &branch.path, out)?;
                    }
                }
                Step::Emit(violation) => out.push(violation),
                Step::Halt(violation) => {
                    tracing::trace!(path = %path, "value absent, skipping remaining siblings");
                    out.push(violation);
                    return Ok(());
                }
                Step::Pass => {}
                Step::Leaf { outcome, bail, fqn } => match outcome {
                    Outcome::Ready(None) => {}
                    Outcome::Ready(Some(violation)) => {
                        out.push(violation);
                        if bail {
                            tracing::trace!(path = %path, fqn, "bail");
                            return Ok(());
                        }
                    }
                    Outcome::Deferred(_) => return Err(ConstraintError::async_in_sync(fqn)),
                },
            }
        }

        Ok(())
    }
}
