//! Metrics sink boundary.
//!
//! Core transform logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::{error::ErrorClass, obs::metrics};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    TransformStart,
    TransformFinish { unchanged: bool },
    TransformFailed { class: ErrorClass },
    Distributed { disjuncts: usize },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::TransformStart => {
                metrics::with_state_mut(|m| {
                    m.ops.transforms = m.ops.transforms.saturating_add(1);
                });
            }

            MetricsEvent::TransformFinish { unchanged } => {
                if unchanged {
                    metrics::with_state_mut(|m| {
                        m.ops.transforms_unchanged = m.ops.transforms_unchanged.saturating_add(1);
                    });
                }
            }

            MetricsEvent::TransformFailed { class } => {
                metrics::with_state_mut(|m| {
                    m.ops.transform_failures = m.ops.transform_failures.saturating_add(1);
                    match class {
                        ErrorClass::InvariantViolation => {
                            m.ops.invariant_violations =
                                m.ops.invariant_violations.saturating_add(1);
                        }
                        ErrorClass::Unsupported => {
                            m.ops.unsupported_expansions =
                                m.ops.unsupported_expansions.saturating_add(1);
                        }
                        ErrorClass::Internal => {}
                    }
                });
            }

            MetricsEvent::Distributed { disjuncts } => {
                let disjuncts = u64::try_from(disjuncts).unwrap_or(u64::MAX);
                metrics::with_state_mut(|m| {
                    m.ops.distributions = m.ops.distributions.saturating_add(1);
                    m.ops.disjuncts_emitted = m.ops.disjuncts_emitted.saturating_add(disjuncts);
                    m.ops.max_disjuncts_seen = m.ops.max_disjuncts_seen.max(disjuncts);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    GLOBAL_METRICS_SINK.record(event);
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

///
/// TESTS
///
