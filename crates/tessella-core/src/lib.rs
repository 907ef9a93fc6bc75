//! Tessella Core
//!
//! Foundation utilities shared by the tessella renderer crates.

pub mod geometry;
pub mod logging;
pub mod profiling;
