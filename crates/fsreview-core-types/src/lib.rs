//! Core types shared across fsreview facilities
//!
//! This crate provides the small vocabulary used by both the error and
//! logging facilities:
//!
//! - **Correlation types**: SessionId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, SessionId};
