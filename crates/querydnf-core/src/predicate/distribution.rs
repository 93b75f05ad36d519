use crate::{
    error::InternalError,
    predicate::expression::{Expression, Terms},
};
use derive_more::{Deref, IntoIterator};
use std::collections::VecDeque;

///
/// Disjuncts
///
/// AND branches produced by a distribution, in cartesian order
/// (left factor major).
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub(crate) struct Disjuncts(Vec<Terms>);

impl Disjuncts {
    pub(crate) fn into_expression(self) -> Expression {
        Expression::Or(Terms {
            children: self.0.into_iter().map(Expression::And).collect(),
            ..Terms::default()
        })
    }
}

///
/// Distribution
///
/// Applies the distributive law across the factors of one conjunction:
///
///     a && (b || c) && (d || e)
///       → (a && b && d) || (a && b && e) || (a && c && d) || (a && c && e)
///
/// Factors are kept in a queue. The two front factors are multiplied and the
/// product is pushed back to the front until a single factor remains.
///

#[derive(Debug)]
pub(crate) struct Distribution {
    queue: VecDeque<Vec<Terms>>,
    max_disjuncts: usize,
}

impl Distribution {
    pub(crate) fn new(factors: impl IntoIterator<Item = Expression>, max_disjuncts: usize) -> Self {
        Self {
            queue: factors.into_iter().map(Expression::into_disjuncts).collect(),
            max_disjuncts,
        }
    }

    pub(crate) fn factor_count(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn apply(mut self) -> Result<Disjuncts, InternalError> {
        loop {
            let Some(left) = self.queue.pop_front() else {
                return Err(InternalError::query_invariant(
                    "dnf distribution reached an empty factor queue",
                ));
            };

            let Some(right) = self.queue.pop_front() else {
                return Ok(Disjuncts(left));
            };

            let product = multiply(&left, &right, self.max_disjuncts)?;
            self.queue.push_front(product);
        }
    }
}

// Cartesian product of two disjunct lists, each pair conjoined.
fn multiply(left: &[Terms], right: &[Terms], max: usize) -> Result<Vec<Terms>, InternalError> {
    let len = left.len().checked_mul(right.len()).unwrap_or(usize::MAX);
    if len > max {
        return Err(InternalError::query_unsupported(format!(
            "dnf expansion of {} x {} disjuncts exceeds the limit of {max}",
            left.len(),
            right.len(),
        )));
    }

    let mut out = Vec::with_capacity(len);
    for l in left {
        for r in right {
            out.push(l.conjoin(r));
        }
    }

    Ok(out)
}

///
/// TESTS
///
