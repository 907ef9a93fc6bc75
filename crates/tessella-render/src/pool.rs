//! Pools: per-layer accumulation buffers.

use tessella_core::geometry::Rect;

use crate::batch::{Action, Batch};
use crate::painter::FrameTargetId;
use crate::state::RenderState;

/// Identifies one of the fixed rendering layers.
///
/// The declaration order is the registration order: both submission
/// phases iterate it unchanged, so layering is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolId {
    /// The game map, rendered into an offscreen target so unscrolled
    /// frames can reuse it.
    Map,
    /// Health bars, names and skulls drawn above creatures.
    CreatureInfo,
    /// The light overlay, composited over the map with light blending.
    Light,
    /// In-world text.
    Text,
    /// UI drawn over the world, offscreen-cached.
    Foreground,
    /// Catch-all layer; the engine starts with it selected.
    Fallback,
}

impl PoolId {
    /// Every pool, in registration (layering) order.
    pub const ALL: [PoolId; 6] = [
        PoolId::Map,
        PoolId::CreatureInfo,
        PoolId::Light,
        PoolId::Text,
        PoolId::Foreground,
        PoolId::Fallback,
    ];

    /// Whether this layer renders through an offscreen target.
    pub fn is_framed(self) -> bool {
        matches!(self, PoolId::Map | PoolId::Light | PoolId::Foreground)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Offscreen-target state owned by a framed pool.
pub(crate) struct FrameData {
    pub target: FrameTargetId,
    /// Where the target is composited, and which part of it.
    pub dest: Rect,
    pub src: Rect,
    /// Content hash accumulated for the frame being built.
    pub current_hash: u64,
    /// The hash the target's pixels currently correspond to.
    pub previous_hash: u64,
    /// Set when a shader participates this frame: shader side effects are
    /// invisible to the hash, so the comparison is skipped.
    pub always_refresh: bool,
    /// Set by an external invalidation (e.g. target resize); survives
    /// pool re-selection, cleared once the re-render is committed.
    pub force_refresh: bool,
    pub before_composite: Option<Action>,
    pub after_composite: Option<Action>,
}

impl FrameData {
    pub fn new(target: FrameTargetId) -> Self {
        Self {
            target,
            dest: Rect::default(),
            src: Rect::default(),
            current_hash: 0,
            previous_hash: 0,
            always_refresh: false,
            force_refresh: false,
            before_composite: None,
            after_composite: None,
        }
    }

    /// Does the offscreen target need re-rendering this frame?
    pub fn has_changed(&self) -> bool {
        self.always_refresh || self.force_refresh || self.current_hash != self.previous_hash
    }

    /// Record that the target now holds the current frame's content.
    pub fn commit_status(&mut self) {
        self.previous_hash = self.current_hash;
        self.force_refresh = false;
    }

    /// Start a fresh accumulation for the frame being built.
    pub fn reset_frame_status(&mut self) {
        self.current_hash = 0;
        self.always_refresh = false;
    }
}

/// One layer's accumulation buffer.
pub(crate) struct Pool {
    pub id: PoolId,
    pub batches: Vec<Batch>,
    /// Per-pool state snapshot seeding every batch created while this pool
    /// is current.
    pub seed_state: RenderState,
    /// Index where the repeated-path merge search starts. Reset to 0 on
    /// selection and after clearing; advanced by the boundary marker.
    pub search_start: usize,
    pub enabled: bool,
    pub frame: Option<FrameData>,
}

impl Pool {
    pub fn new(id: PoolId) -> Self {
        Self {
            id,
            batches: Vec::new(),
            seed_state: RenderState::default(),
            search_start: 0,
            enabled: true,
            frame: None,
        }
    }

    pub fn framed(id: PoolId, target: FrameTargetId) -> Self {
        Self {
            frame: Some(FrameData::new(target)),
            ..Self::new(id)
        }
    }

    /// Reset everything tied to "this pool is being selected": the seed
    /// state, the search index and, for framed pools, the accumulator.
    pub fn reset_transient(&mut self) {
        self.seed_state = RenderState::default();
        self.search_start = 0;
        if let Some(frame) = &mut self.frame {
            frame.reset_frame_status();
        }
    }

    /// Empty the batch list for the next frame's accumulation.
    pub fn clear(&mut self) {
        self.batches.clear();
        self.search_start = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_is_stable() {
        assert_eq!(PoolId::ALL[0], PoolId::Map);
        assert_eq!(PoolId::ALL[5], PoolId::Fallback);
        for (index, id) in PoolId::ALL.iter().enumerate() {
            assert_eq!(id.index(), index);
        }
    }

    #[test]
    fn test_framed_roster() {
        assert!(PoolId::Map.is_framed());
        assert!(PoolId::Light.is_framed());
        assert!(PoolId::Foreground.is_framed());
        assert!(!PoolId::CreatureInfo.is_framed());
        assert!(!PoolId::Text.is_framed());
        assert!(!PoolId::Fallback.is_framed());
    }

    #[test]
    fn test_frame_change_detection() {
        let mut frame = FrameData::new(FrameTargetId(1));
        assert!(!frame.has_changed());

        frame.current_hash = 42;
        assert!(frame.has_changed());

        frame.commit_status();
        assert!(!frame.has_changed());

        frame.reset_frame_status();
        frame.current_hash = 42;
        // Same content as what the target holds: nothing to do.
        assert!(!frame.has_changed());

        frame.force_refresh = true;
        assert!(frame.has_changed());
        frame.commit_status();
        assert!(!frame.has_changed());
    }
}
