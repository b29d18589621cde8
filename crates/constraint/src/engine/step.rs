//! One constraint at one position: what the walkers must do next.

use serde_json::Value;

use crate::assertions;
use crate::constraints::Constraint;
use crate::foundation::{ConstraintError, Outcome, Path, Violation};
use crate::provider::Provider;

/// A sibling list to evaluate at a new position.
#[derive(Debug)]
pub(crate) struct Branch<'a> {
    pub value: Option<&'a Value>,
    pub constraints: &'a [Constraint],
    pub path: Path,
}

/// Result of looking at one constraint.
#[derive(Debug)]
pub(crate) enum Step<'a> {
    /// Evaluate each branch, in order, and append its violations.
    Descend(Vec<Branch<'a>>),
    /// Record the violation and continue with the next sibling.
    Emit(Violation),
    /// Record the violation and stop the sibling list.
    Halt(Violation),
    /// Nothing to record.
    Pass,
    /// A leaf check; a failure stops the sibling list when `bail` is set.
    Leaf {
        outcome: Outcome,
        bail: bool,
        fqn: &'a str,
    },
}

/// Computes the step for `constraint` applied to `value` at `path`.
///
/// Rules are resolved through `provider` here, so a missing validator is
/// reported before any of the rule's siblings further down the list run.
pub(crate) fn step<'a>(
    constraint: &'a Constraint,
    value: Option<&'a Value>,
    path: &Path,
    provider: &dyn Provider,
) -> Result<Step<'a>, ConstraintError> {
    let step = match constraint {
        Constraint::HasProperties(node) => match node.targets(value, path) {
            Ok(fields) => Step::Descend(
                fields
                    .into_iter()
                    .map(|(value, constraints, path)| Branch {
                        value,
                        constraints,
                        path,
                    })
                    .collect(),
            ),
            Err(unsupported) => Step::Emit(unsupported),
        },
        Constraint::Each(node) => Step::Descend(
            node.targets(value, path)
                .into_iter()
                .map(|(value, path)| Branch {
                    value,
                    constraints: node.constraints(),
                    path,
                })
                .collect(),
        ),
        Constraint::Exists(gate) => match gate.check(value, path) {
            Some(violation) => Step::Halt(violation),
            None => Step::Pass,
        },
        Constraint::Assert(assertion) => Step::Leaf {
            outcome: assertions::check(assertion, value, path),
            bail: constraint.bail(),
            fqn: constraint.fqn(),
        },
        Constraint::Rule(rule) => {
            let validator = provider
                .get(rule.as_ref())
                .ok_or_else(|| ConstraintError::unknown(rule.fqn()))?;
            Step::Leaf {
                outcome: validator.validate(value, path),
                bail: constraint.bail(),
                fqn: constraint.fqn(),
            }
        }
    };

    Ok(step)
}
