//! Lightweight in-process metrics.
//!
//! Counters and gauges are atomics keyed by label sets and rendered as
//! Prometheus text by the `/metrics` handler.

pub mod metrics;
