//! Core math modules.

pub mod percent;
pub mod summary;
