//! The constraint vocabulary.
//!
//! A constraint tree is built from five kinds of node, modelled as the
//! closed [`Constraint`] enum:
//!
//! | variant | role |
//! |---|---|
//! | [`Constraint::Assert`] | self-executing leaf ([`Assertion`]) |
//! | [`Constraint::Rule`] | declarative leaf resolved by the provider chain |
//! | [`Constraint::HasProperties`] | maps object fields to sub-constraints |
//! | [`Constraint::Each`] | applies sub-constraints to every array element |
//! | [`Constraint::Exists`] | fails fast when the value is absent |
//!
//! New leaf kinds are added by implementing [`Rule`] and registering a
//! [`Provider`](crate::provider::Provider) for them; the enum itself stays
//! closed.

pub mod collection;
pub mod each;
pub mod exists;
pub mod length;
pub mod one_of;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use collection::HasProperties;
pub use each::Each;
pub use exists::Exists;
pub use length::Length;
pub use one_of::{EqualTo, OneOf};

use crate::assertions::Assertion;

// ============================================================================
// RULE
// ============================================================================

/// A declarative leaf constraint: it states intent, and a validator
/// resolved through the provider chain performs the check.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use nebula_constraint::constraints::Rule;
///
/// #[derive(Debug)]
/// struct Email;
///
/// impl Rule for Email {
///     fn fqn(&self) -> &str {
///         "app/Email"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Rule: fmt::Debug + Send + Sync + 'static {
    /// Fully-qualified name, used as the violation identity.
    fn fqn(&self) -> &str;

    /// Whether a failure stops evaluation of later siblings.
    fn bail(&self) -> bool {
        false
    }

    /// Enables providers to downcast to the concrete rule type.
    fn as_any(&self) -> &dyn Any;
}

// ============================================================================
// CONSTRAINT
// ============================================================================

/// One node of a constraint tree.
///
/// Cloning is cheap: leaves are reference-counted and structural nodes
/// hold their children in shared lists.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Self-executing leaf assertion.
    Assert(Arc<Assertion>),
    /// Leaf resolved through the provider chain.
    Rule(Arc<dyn Rule>),
    /// Field-to-constraints mapping for objects.
    HasProperties(HasProperties),
    /// Per-element constraints for arrays.
    Each(Each),
    /// Absence gate.
    Exists(Exists),
}

impl Constraint {
    /// Wraps a provider-resolved rule.
    pub fn rule(rule: impl Rule) -> Self {
        Self::Rule(Arc::new(rule))
    }

    /// Wraps a self-executing assertion.
    pub fn assert(assertion: Assertion) -> Self {
        Self::Assert(Arc::new(assertion))
    }

    /// The absence gate.
    pub fn exists() -> Self {
        Self::Exists(Exists)
    }

    /// Applies `constraints` to each element.
    pub fn each(constraints: impl Into<Constraints>) -> Self {
        Self::Each(Each::new(constraints))
    }

    /// Maps object fields to constraints, in iteration order.
    pub fn has_properties<I, K, C>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Constraints>,
    {
        Self::HasProperties(fields.into_iter().collect())
    }

    /// Fully-qualified name of this node.
    pub fn fqn(&self) -> &str {
        match self {
            Self::Assert(assertion) => assertion.fqn(),
            Self::Rule(rule) => rule.fqn(),
            Self::HasProperties(_) => HasProperties::FQN,
            Self::Each(_) => Each::FQN,
            Self::Exists(_) => Exists::FQN,
        }
    }

    /// Whether a failure of this node stops later siblings.
    ///
    /// Structural nodes never bail through this flag; the [`Exists`] gate
    /// halts its sibling list on its own terms.
    pub fn bail(&self) -> bool {
        match self {
            Self::Assert(assertion) => assertion.is_bail(),
            Self::Rule(rule) => rule.bail(),
            Self::HasProperties(_) | Self::Each(_) | Self::Exists(_) => false,
        }
    }
}

impl AsRef<[Constraint]> for Constraint {
    fn as_ref(&self) -> &[Constraint] {
        std::slice::from_ref(self)
    }
}

impl From<Assertion> for Constraint {
    fn from(assertion: Assertion) -> Self {
        Self::assert(assertion)
    }
}

impl From<Arc<Assertion>> for Constraint {
    fn from(assertion: Arc<Assertion>) -> Self {
        Self::Assert(assertion)
    }
}

impl From<Arc<dyn Rule>> for Constraint {
    fn from(rule: Arc<dyn Rule>) -> Self {
        Self::Rule(rule)
    }
}

impl From<HasProperties> for Constraint {
    fn from(node: HasProperties) -> Self {
        Self::HasProperties(node)
    }
}

impl From<Each> for Constraint {
    fn from(node: Each) -> Self {
        Self::Each(node)
    }
}

impl From<Exists> for Constraint {
    fn from(node: Exists) -> Self {
        Self::Exists(node)
    }
}

impl From<Length> for Constraint {
    fn from(rule: Length) -> Self {
        Self::rule(rule)
    }
}

impl From<OneOf> for Constraint {
    fn from(rule: OneOf) -> Self {
        Self::rule(rule)
    }
}

// ============================================================================
// CONSTRAINTS
// ============================================================================

/// A sibling list of constraints, evaluated in order.
///
/// Anything that can stand where "one constraint or several" is expected
/// converts into this list.
///
/// # Examples
///
/// ```
/// use nebula_constraint::constraints::{Constraint, Constraints, Exists, Length};
///
/// let single: Constraints = Length::min(4).into();
/// let several: Constraints = [Constraint::from(Exists), Length::min(4).into()].into();
///
/// assert_eq!(single.len(), 1);
/// assert_eq!(several.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constraints(Arc<[Constraint]>);

impl Constraints {
    /// Number of constraints in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.0.iter()
    }
}

impl AsRef<[Constraint]> for Constraints {
    fn as_ref(&self) -> &[Constraint] {
        &self.0
    }
}

impl std::ops::Deref for Constraints {
    type Target = [Constraint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Constraints {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Constraint> for Constraints {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Constraint>> for Constraints {
    fn from(list: Vec<Constraint>) -> Self {
        Self(list.into())
    }
}

impl<const N: usize> From<[Constraint; N]> for Constraints {
    fn from(list: [Constraint; N]) -> Self {
        list.into_iter().collect()
    }
}

impl From<Constraint> for Constraints {
    fn from(constraint: Constraint) -> Self {
        Self(Arc::new([constraint]))
    }
}

macro_rules! single_constraint {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Constraints {
                fn from(node: $ty) -> Self {
                    Constraint::from(node).into()
                }
            }
        )+
    };
}

single_constraint!(
    Assertion,
    Arc<Assertion>,
    Arc<dyn Rule>,
    HasProperties,
    Each,
    Exists,
    Length,
    OneOf,
);
