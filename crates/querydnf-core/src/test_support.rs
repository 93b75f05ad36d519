//! Shared fixtures for unit and property tests.

use crate::{
    predicate::{CustomParameter, FieldPresence, QueryPredicate, Row, SubjectParameter},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};

/// Named column comparison `<letter> = true`, used to spell out textbook
/// formulas like `A && (B || C)`.
pub(crate) fn param(letter: char) -> SubjectParameter {
    SubjectParameter::eq(letter.to_string(), true)
}

/// Conjunction of lettered parameters.
pub(crate) fn all(letters: &str) -> QueryPredicate {
    QueryPredicate::all_of(letters.chars().map(param))
}

/// Disjunction of lettered parameters.
pub(crate) fn any(letters: &str) -> QueryPredicate {
    QueryPredicate::any_of(letters.chars().map(param))
}

///
/// TestRow
///

#[derive(Clone, Debug, Default)]
pub(crate) struct TestRow {
    fields: BTreeMap<String, Value>,
    custom: BTreeSet<String>,
}

impl TestRow {
    pub(crate) fn new<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            custom: BTreeSet::new(),
        }
    }

    pub(crate) fn with_custom(mut self, name: &str) -> Self {
        self.custom.insert(name.to_string());
        self
    }
}

impl Row for TestRow {
    fn field(&self, name: &str) -> FieldPresence {
        match self.fields.get(name) {
            Some(value) => FieldPresence::Present(value.clone()),
            None => FieldPresence::Missing,
        }
    }

    fn custom(&self, parameter: &CustomParameter) -> bool {
        self.custom.contains(&parameter.name)
    }
}
