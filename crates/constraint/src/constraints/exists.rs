//! Absence gate.

use serde_json::Value;

use crate::foundation::{Path, REASON_UNDEFINED, Violation};

/// Fails when the value is absent and stops the remaining constraints in
/// its sibling list.
///
/// Place it first in a list to guard checks that only make sense for a
/// present value. A present `null` passes the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Exists;

impl Exists {
    /// Violation identity.
    pub const FQN: &'static str = "nebula-constraint/Exists";

    /// Returns the gate's violation if `value` is absent.
    pub fn check(self, value: Option<&Value>, path: &Path) -> Option<Violation> {
        value
            .is_none()
            .then(|| Violation::new(None, path, Self::FQN).with_reason(REASON_UNDEFINED))
    }
}
