//! # nebula-constraint
//!
//! Declarative validation of JSON values against constraint trees.
//!
//! A tree is built from [`Constraint`](constraints::Constraint) nodes:
//! self-executing [assertions](assertions), declarative
//! [rules](constraints::Rule) resolved through a
//! [provider chain](provider), and the structural kinds
//! [`HasProperties`](constraints::HasProperties),
//! [`Each`](constraints::Each) and [`Exists`](constraints::Exists). A
//! [`Validator`] walks the tree and returns every
//! [`Violation`](foundation::Violation) in declaration order. Failing
//! values are reported, never raised; only a broken setup (an unknown
//! rule, an asynchronous check in the synchronous walk) is an error.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_constraint::prelude::*;
//! use serde_json::json;
//!
//! let form: Constraint = has_properties! {
//!     "nickname" => [Exists, Length::min(4)],
//!     "variant" => OneOf::new(["filled", "outline", "tonal"]),
//! }
//! .into();
//!
//! let value = json!({ "nickname": "neo", "variant": "ghost" });
//! let violations = Validator::new().validate_sync(&value, &form)?;
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].violates, "nebula-constraint/Length");
//! assert_eq!(violations[1].violates, "nebula-constraint/OneOf");
//! # Ok::<(), ConstraintError>(())
//! ```
//!
//! ## Asynchronous checks
//!
//! Assertions created with [`Assertion::deferred`](assertions::Assertion::deferred)
//! and validators returning [`Outcome::Deferred`](foundation::Outcome) need
//! [`Validator::validate`], which runs them concurrently and keeps the
//! reported order stable.
//!
//! ## Logging
//!
//! The crate emits `tracing` events and spans at `debug` and below; it
//! never installs a subscriber.

pub mod assertions;
pub mod config;
pub mod constraints;
mod engine;
pub mod foundation;
mod macros;
pub mod predicates;
pub mod prelude;
pub mod provider;
pub mod validators;

pub use engine::Validator;
