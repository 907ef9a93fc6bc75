//! The painter seam: everything the batching core needs from the GPU
//! layer.

use tessella_core::geometry::Rect;

use crate::coords::CoordsBuffer;
use crate::command::Topology;
use crate::state::{CompositionMode, RenderState};

/// Handle to an offscreen render target allocated by the painter.
///
/// Each framed pool owns exactly one; nothing else writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTargetId(pub u64);

/// Creation options for a pool's offscreen target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTargetOptions {
    /// Sample the target with linear filtering when composited.
    pub smooth: bool,
    /// Blend draws while rendering into the target. The map layer turns
    /// this off: tiles arrive back-to-front and opaque.
    pub blend: bool,
    /// Composition mode applied when the target is composited.
    pub composition: CompositionMode,
}

impl Default for FrameTargetOptions {
    fn default() -> Self {
        Self {
            smooth: true,
            blend: true,
            composition: CompositionMode::Normal,
        }
    }
}

/// Interface to the GPU abstraction, which is out of scope for this
/// crate: it executes render state, owns frame-target lifecycles, and
/// turns assembled vertex streams into draw submissions.
///
/// One [`draw_vertices`](Painter::draw_vertices) call is one GPU
/// submission; the engine issues exactly one per non-empty batch. All
/// calls happen on the render thread, so implementations need no locking.
pub trait Painter {
    fn create_frame_target(&mut self, options: FrameTargetOptions) -> FrameTargetId;

    fn destroy_frame_target(&mut self, target: FrameTargetId);

    /// Redirect subsequent draws into the target.
    fn bind_frame_target(&mut self, target: FrameTargetId);

    /// Restore drawing to whatever target was bound before.
    fn release_frame_target(&mut self, target: FrameTargetId);

    /// Draw the target's color attachment as a single textured quad,
    /// sampling `src` into `dest`.
    fn composite_frame_target(&mut self, target: FrameTargetId, dest: Rect, src: Rect);

    /// Snapshot the global paint state and reset it to defaults, for the
    /// duration of one composite.
    fn save_and_reset_state(&mut self);

    fn restore_state(&mut self);

    /// Apply `state` (texture binding included) to subsequent submissions.
    fn execute_state(&mut self, state: &RenderState);

    /// Submit one batch's assembled vertices as a single draw.
    fn draw_vertices(&mut self, coords: &CoordsBuffer, topology: Topology);
}
