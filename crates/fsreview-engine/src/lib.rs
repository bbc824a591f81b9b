//! fsreview engine - comparison orchestration
//!
//! Coordinates the pure core (diff, classify, aggregate) with the store
//! (artifacts, Review Store):
//! - Operating modes (baseline vs explicit files)
//! - The per-comparison session state machine
//! - The human-in-the-loop gate in front of baseline updates

pub mod commands;
pub mod gate;
pub mod mode;
pub mod session;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use gate::{BaselineUpdateGate, ConfirmAll, DeclineAll};
pub use mode::{ComparisonMode, ModeInputs};
pub use session::{ComparisonSession, SessionState, UpdateOutcome};
