//! Fixtures shared by the synchronous and concurrent engine tests.

#![allow(dead_code)]

use std::any::Any;

use nebula_constraint::prelude::*;
use serde_json::{Value, json};

/// A lookup case: value, tree, and the expected `(path, violates, reason, meta)` rows.
pub struct Scenario {
    pub name: &'static str,
    pub value: Value,
    pub tree: Constraints,
    pub expected: Vec<Row>,
}

pub type Row = (String, &'static str, Option<&'static str>, Option<Value>);

pub fn rows(violations: &[Violation]) -> Vec<(String, String, Option<String>, Option<Value>)> {
    violations
        .iter()
        .map(|v| (v.path.to_string(), v.violates.clone(), v.reason.clone(), v.meta.clone()))
        .collect()
}

pub fn expected(rows: &[Row]) -> Vec<(String, String, Option<String>, Option<Value>)> {
    rows.iter()
        .map(|(path, violates, reason, meta)| {
            (
                path.clone(),
                (*violates).to_string(),
                reason.map(str::to_string),
                meta.clone(),
            )
        })
        .collect()
}

fn row(path: &str, violates: &'static str, reason: Option<&'static str>, meta: Option<Value>) -> Row {
    (path.to_string(), violates, reason, meta)
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "nested form",
            value: json!({ "form": { "nickname": "", "password": "" } }),
            tree: has_properties! {
                "form" => has_properties! {
                    "nickname" => Length::min(4),
                    "password" => Length::min(6),
                },
            }
            .into(),
            expected: vec![
                row("form.nickname", Length::FQN, Some("min"), Some(json!(4))),
                row("form.password", Length::FQN, Some("min"), Some(json!(6))),
            ],
        },
        Scenario {
            name: "one of at root",
            value: json!(""),
            tree: OneOf::new(["filled", "outline", "tonal"]).into(),
            expected: vec![row(
                "$",
                OneOf::FQN,
                None,
                Some(json!(["filled", "outline", "tonal"])),
            )],
        },
        Scenario {
            name: "path of a field",
            value: json!({ "a": "x" }),
            tree: has_properties! { "a" => Length::min(4) }.into(),
            expected: vec![row("a", Length::FQN, Some("min"), Some(json!(4)))],
        },
        Scenario {
            name: "unsupported short-circuits fields",
            value: json!("not an object"),
            tree: has_properties! {
                "a" => Length::min(4),
                "b" => Exists,
            }
            .into(),
            expected: vec![row("$", HasProperties::FQN, Some("unsupported"), None)],
        },
        Scenario {
            name: "exists stops its siblings",
            value: json!({}),
            tree: has_properties! {
                "profile" => [Exists, Constraint::from(has_properties! { "name" => Length::min(1) })],
            }
            .into(),
            expected: vec![row("profile", Exists::FQN, Some("undefined"), None)],
        },
        Scenario {
            name: "each over array",
            value: json!(["abcd", "a", "abcdefgh"]),
            tree: Constraint::each(Length::range(2, 6)).into(),
            expected: vec![
                row("[1]", Length::FQN, Some("min"), Some(json!(2))),
                row("[2]", Length::FQN, Some("max"), Some(json!(6))),
            ],
        },
        Scenario {
            name: "each falls back to the value",
            value: json!({ "name": "longEnough" }),
            tree: Constraint::each(has_properties! { "name" => Length::range(4, 6) }).into(),
            expected: vec![row("name", Length::FQN, Some("max"), Some(json!(6)))],
        },
        Scenario {
            name: "bail stops later siblings",
            value: json!("abc"),
            tree: [
                Constraint::from(Length::min(5).with_bail(true)),
                Constraint::from(Length::exact(1)),
            ]
            .into(),
            expected: vec![row("$", Length::FQN, Some("min"), Some(json!(5)))],
        },
        Scenario {
            name: "without bail every sibling reports",
            value: json!("abc"),
            tree: [Constraint::from(Length::min(5)), Constraint::from(Length::exact(1))].into(),
            expected: vec![
                row("$", Length::FQN, Some("min"), Some(json!(5))),
                row("$", Length::FQN, Some("exact"), Some(json!(1))),
            ],
        },
        Scenario {
            name: "conforming value",
            value: json!({ "tags": ["a", "bb"], "variant": "tonal" }),
            tree: has_properties! {
                "tags" => [Exists, Constraint::each(Length::max(2))],
                "variant" => OneOf::new(["filled", "outline", "tonal"]),
            }
            .into(),
            expected: vec![],
        },
    ]
}

/// A rule no built-in provider knows about.
#[derive(Debug)]
pub struct Email;

impl Email {
    pub const FQN: &'static str = "app/Email";
}

impl Rule for Email {
    fn fqn(&self) -> &str {
        Self::FQN
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Synchronously checks [`Email`] rules.
pub struct EmailProvider;

impl Provider for EmailProvider {
    fn get<'c>(&self, rule: &'c dyn Rule) -> Option<Box<dyn ConstraintValidator + 'c>> {
        rule.as_any().downcast_ref::<Email>()?;
        Some(Box::new(|value: Option<&Value>, path: &Path| {
            if nebula_constraint::predicates::is_email(value) {
                Outcome::pass()
            } else {
                Outcome::fail(Violation::new(value, path, Email::FQN))
            }
        }))
    }
}
