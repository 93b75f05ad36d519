//! Core runtime for querydnf: the entity-query predicate model, the
//! disjunctive-normal-form transform, predicate evaluation, fingerprints and
//! the observability hooks around them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod obs;
pub mod predicate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Default upper bound on the number of disjuncts one distribution may emit.
///
/// Distribution is exponential in the number of OR factors under an AND, so
/// the transform refuses inputs that would expand past this bound.
pub const DEFAULT_MAX_DISJUNCTS: usize = 4096;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        predicate::{
            CompareOp, CustomParameter, LogicalOperator, QueryPredicate, SubjectParameter,
        },
        value::Value,
    };
}
