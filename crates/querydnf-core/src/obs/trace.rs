//! Transform tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! transform results.

use crate::predicate::PredicateFingerprint;

///
/// TransformTraceSink
///

pub trait TransformTraceSink {
    fn on_event(&self, event: TransformTraceEvent);
}

///
/// TransformTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransformTraceEvent {
    Start {
        fingerprint: PredicateFingerprint,
        nodes: usize,
    },
    Distribute {
        factors: usize,
        disjuncts: usize,
    },
    Finish {
        fingerprint: PredicateFingerprint,
        disjuncts: usize,
    },
}
