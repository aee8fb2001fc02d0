//! Simulation driver and trace input.
//!
//! Provides the [`Simulator`], which runs decoded accesses against a cache, and
//! the trace reader that decodes `<op> <address> <size>` lines into accesses.

/// Access-by-access simulation driver and cost model.
pub mod simulator;

/// Trace-line decoding.
pub mod trace;

pub use simulator::{AccessOutcome, Simulator};
pub use trace::{TraceReader, parse_line};
