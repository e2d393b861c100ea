//! Lightweight in-process metrics.
//!
//! Counters and gauges are stored as atomics and rendered in Prometheus text
//! format on demand by the embedding application.

pub mod metrics;
