//! Rollcast common types, IDs, and errors.
//!
//! This crate provides foundational types shared across rollcast crates:
//! - Observation identity
//! - Common error types with stable codes
//! - Output format specifications
//! - Output schema versioning

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use id::ObservationId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
