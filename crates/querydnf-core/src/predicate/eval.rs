use crate::{
    predicate::{CompareOp, CustomParameter, LogicalOperator, QueryPredicate, SubjectParameter},
    value::Value,
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read a column from a row during predicate
/// evaluation. This distinguishes between a missing column and a
/// present column whose value may be `Value::Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    /// Column exists and has a value (including `Value::Null`).
    Present(Value),

    /// Column is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose columns by name.
/// This decouples predicate evaluation from concrete record types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;

    /// Decide a caller-supplied parameter. Rows without custom semantics
    /// reject every custom parameter.
    fn custom(&self, _parameter: &CustomParameter) -> bool {
        false
    }
}

/// Evaluate `predicate` against `row`.
///
/// An AND node with no operands is true; an OR node with no operands is false.
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &QueryPredicate) -> bool {
    let mut operands = predicate
        .parameters
        .iter()
        .map(|parameter| eval_parameter(row, parameter))
        .chain(
            predicate
                .custom_parameters
                .iter()
                .map(|parameter| row.custom(parameter)),
        )
        .chain(predicate.children.iter().map(|child| eval(row, child)));

    match predicate.operator {
        LogicalOperator::And => operands.all(|operand| operand),
        LogicalOperator::Or => operands.any(|operand| operand),
    }
}

// Comparisons against a missing column are false.
fn eval_parameter<R: Row + ?Sized>(row: &R, parameter: &SubjectParameter) -> bool {
    match row.field(&parameter.column) {
        FieldPresence::Present(actual) => compare(&actual, parameter.op, &parameter.value),
        FieldPresence::Missing => false,
    }
}

fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    match op {
        CompareOp::Eq => actual.strict_cmp(expected) == Some(Ordering::Equal),
        CompareOp::Ne => matches!(
            actual.strict_cmp(expected),
            Some(Ordering::Less | Ordering::Greater)
        ),
        CompareOp::Lt => compare_order(actual, expected, Ordering::is_lt),
        CompareOp::Lte => compare_order(actual, expected, Ordering::is_le),
        CompareOp::Gt => compare_order(actual, expected, Ordering::is_gt),
        CompareOp::Gte => compare_order(actual, expected, Ordering::is_ge),
    }
}

// Ordering comparisons never hold for null operands.
fn compare_order(actual: &Value, expected: &Value, accept: fn(Ordering) -> bool) -> bool {
    if actual.is_null() || expected.is_null() {
        return false;
    }

    actual.strict_cmp(expected).is_some_and(accept)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRow;

    fn row() -> TestRow {
        TestRow::new([
            ("age", Value::Int(30)),
            ("name", Value::from("ada")),
            ("nickname", Value::Null),
        ])
    }

    #[test]
    fn empty_nodes_are_neutral_elements() {
        assert!(eval(&row(), &QueryPredicate::and()));
        assert!(!eval(&row(), &QueryPredicate::or()));
    }

    #[test]
    fn missing_columns_fail_every_comparison() {
        let row = row();

        assert!(!eval(&row, &QueryPredicate::all_of([SubjectParameter::eq("x", 1i64)])));
        assert!(!eval(&row, &QueryPredicate::all_of([SubjectParameter::ne("x", 1i64)])));
    }

    #[test]
    fn null_equals_null_but_never_orders() {
        let row = row();

        assert!(eval(
            &row,
            &QueryPredicate::all_of([SubjectParameter::eq("nickname", Value::Null)])
        ));
        assert!(!eval(
            &row,
            &QueryPredicate::all_of([SubjectParameter::lte("nickname", Value::Null)])
        ));
    }

    #[test]
    fn ordering_respects_operator() {
        let row = row();

        assert!(eval(&row, &QueryPredicate::all_of([SubjectParameter::gte("age", 30i64)])));
        assert!(eval(&row, &QueryPredicate::all_of([SubjectParameter::lt("age", 31u64)])));
        assert!(!eval(&row, &QueryPredicate::all_of([SubjectParameter::gt("age", 30i64)])));
        assert!(!eval(&row, &QueryPredicate::all_of([SubjectParameter::lt("name", 1i64)])));
    }

    #[test]
    fn custom_parameters_are_decided_by_the_row() {
        let row = row().with_custom("vip");
        let vip = QueryPredicate::and().with_custom(CustomParameter::new("vip", true));
        let staff = QueryPredicate::and().with_custom(CustomParameter::new("staff", true));

        assert!(eval(&row, &vip));
        assert!(!eval(&row, &staff));
    }
}
