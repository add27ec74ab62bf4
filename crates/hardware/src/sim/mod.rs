//! Simulation driver and trace input.

/// Trace line parsing and the streaming trace reader.
pub mod trace;

/// The orchestrator that owns both cache levels for one run.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{TraceEvent, TraceReader, parse_line};
