//! Observability: transform tracing and process-local metrics.
//!
//! Transform logic never touches metrics state directly; all instrumentation
//! flows through `sink::MetricsEvent` and `trace::TransformTraceEvent`.

pub(crate) mod metrics;
pub(crate) mod sink;
pub mod trace;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
pub use trace::{TransformTraceEvent, TransformTraceSink};
