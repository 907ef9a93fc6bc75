//! Test utilities for the tessella renderer crates.

pub mod recording;

pub use recording::{PaintEvent, RecordingPainter};
