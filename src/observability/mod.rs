//! Observability subsystem.
//!
//! Structured logs go to stderr through `tracing`; command results are
//! printed to stdout by the CLI so the two never interleave in pipes.

pub mod logging;

pub use logging::init;
