//! Draw batching for the tessella client renderer.
//!
//! Game-world and UI code select a layer ([`PoolId`]), issue draw
//! primitives against the [`BatchingEngine`], and the engine coalesces
//! them into few GPU submissions: consecutive draws sharing a
//! [`RenderState`] merge into one batch, fully occluded quads are dropped,
//! and offscreen-cached layers whose content hash did not change since the
//! previous frame skip re-rendering entirely.
//!
//! The GPU abstraction itself stays behind the [`Painter`] trait; this
//! crate only decides *what* gets submitted, and in what order.

pub mod batch;
pub mod color;
pub mod command;
pub mod coords;
pub mod engine;
pub mod hash;
pub mod painter;
pub mod pool;
pub mod state;
pub mod texture;

pub use batch::Batch;
pub use color::Color;
pub use command::{DrawCommand, Topology};
pub use coords::{CoordsBuffer, Vertex};
pub use engine::{BatchingEngine, PoolStats};
pub use painter::{FrameTargetId, FrameTargetOptions, Painter};
pub use pool::PoolId;
pub use state::{CompositionMode, RenderState, ShaderId};
pub use texture::{Texture, TextureHandle};

pub use tessella_core::geometry::{Point, Rect, Size};
