//! Schema version for machine-readable output and persisted logs.

/// Version stamped into every JSON payload emitted by the CLI.
///
/// Bump the minor version for additive changes and the major version for
/// breaking changes to field names or semantics.
pub const SCHEMA_VERSION: &str = "1.0.0";
