//! Rollcast math utilities.

pub mod math;

pub use math::percent::*;
pub use math::summary::*;
