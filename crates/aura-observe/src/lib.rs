//! Observability setup for AURA: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
