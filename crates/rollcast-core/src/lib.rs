//! Rollcast Core Library
//!
//! This library provides the core functionality of rollcast:
//! - The hybrid prediction engine (classifier, transitions, metrics, factors)
//! - The observation log, session object and JSON log store
//! - Engine configuration loading and validation
//! - Structured logging, exit codes and output rendering
//! - JSON Schemas for the JSON output types
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod engine;
pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod output;
pub mod schema;
pub mod session;
pub mod store;

pub use engine::{Forecast, Observation, OutcomeClass, StateBand, Trend};
pub use exit_codes::ExitCode;
pub use session::Session;
pub use store::{JsonFileStore, LogStore, MemoryStore};
