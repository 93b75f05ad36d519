use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Predicate model
///
/// Pure, schema-agnostic representation of entity-query predicates.
/// A node combines its own parameters and its children with one logical
/// operator: parameters of an AND node are conjuncts, parameters of an OR node
/// are disjuncts.
///

///
/// LogicalOperator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum LogicalOperator {
    And = 0x01,
    Or = 0x02,
}

impl LogicalOperator {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_and(self) -> bool {
        matches!(self, Self::And)
    }

    #[must_use]
    pub const fn is_or(self) -> bool {
        matches!(self, Self::Or)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Ne = 0x02,
    Lt = 0x03,
    Lte = 0x04,
    Gt = 0x05,
    Gte = 0x06,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

///
/// SubjectParameter
///
/// One column comparison, e.g. `age >= 18`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SubjectParameter {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl SubjectParameter {
    #[must_use]
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Gte, value)
    }
}

///
/// CustomParameter
///
/// Caller-supplied constraint. The predicate layer carries it opaquely;
/// its truth value is decided by the row being evaluated.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CustomParameter {
    pub name: String,
    pub value: Value,
}

impl CustomParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

///
/// QueryPredicate
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct QueryPredicate {
    pub operator: LogicalOperator,
    #[serde(default)]
    pub parameters: Vec<SubjectParameter>,
    #[serde(default)]
    pub custom_parameters: Vec<CustomParameter>,
    #[serde(default)]
    pub children: Vec<Self>,
}

impl QueryPredicate {
    #[must_use]
    pub const fn new(operator: LogicalOperator) -> Self {
        Self {
            operator,
            parameters: Vec::new(),
            custom_parameters: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Empty conjunction; evaluates to true.
    #[must_use]
    pub const fn and() -> Self {
        Self::new(LogicalOperator::And)
    }

    /// Empty disjunction; evaluates to false.
    #[must_use]
    pub const fn or() -> Self {
        Self::new(LogicalOperator::Or)
    }

    /// Conjunction of the given column comparisons.
    #[must_use]
    pub fn all_of(parameters: impl IntoIterator<Item = SubjectParameter>) -> Self {
        Self::and().with_parameters(parameters)
    }

    /// Disjunction of the given column comparisons.
    #[must_use]
    pub fn any_of(parameters: impl IntoIterator<Item = SubjectParameter>) -> Self {
        Self::or().with_parameters(parameters)
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: SubjectParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = SubjectParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    #[must_use]
    pub fn with_custom(mut self, parameter: CustomParameter) -> Self {
        self.custom_parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the tree, this one included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Number of parameters (column and custom) in the whole tree.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.parameters.len()
            + self.custom_parameters.len()
            + self
                .children
                .iter()
                .map(Self::constraint_count)
                .sum::<usize>()
    }

    /// Visit every column comparison in the tree, depth-first.
    pub fn for_each_parameter(&self, f: &mut impl FnMut(&SubjectParameter)) {
        for parameter in &self.parameters {
            f(parameter);
        }
        for child in &self.children {
            child.for_each_parameter(f);
        }
    }

    /// Visit every custom parameter in the tree, depth-first.
    pub fn for_each_custom(&self, f: &mut impl FnMut(&CustomParameter)) {
        for parameter in &self.custom_parameters {
            f(parameter);
        }
        for child in &self.children {
            child.for_each_custom(f);
        }
    }
}

impl From<SubjectParameter> for QueryPredicate {
    fn from(parameter: SubjectParameter) -> Self {
        Self::and().with_parameter(parameter)
    }
}

impl BitAnd for QueryPredicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and().with_children([self, rhs])
    }
}

impl BitAnd for &QueryPredicate {
    type Output = QueryPredicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone() & rhs.clone()
    }
}

impl BitOr for QueryPredicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or().with_children([self, rhs])
    }
}

impl BitOr for &QueryPredicate {
    type Output = QueryPredicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone() | rhs.clone()
    }
}

///
/// TESTS
///
