//! Order-sensitive content hashing for framed pools.
//!
//! Every draw routed to a framed pool folds into a 64-bit accumulator.
//! Two frames fold to the same value only when they issued the same draws,
//! with the same parameters, in the same order, so an equal hash means
//! the offscreen target already holds this frame's image. A collision
//! costs one frame of visual staleness and self-corrects on the next
//! differing frame; it never corrupts data.

use std::hash::{Hash, Hasher};

use ahash::AHasher;

use crate::color::Color;
use crate::command::DrawCommand;
use crate::state::{CompositionMode, RenderState};

/// Golden-ratio increment for the combine fold.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Fold `value` into `seed`.
///
/// Order- and duplicate-sensitive: folding the same values in a different
/// order, or a different number of times, yields a different seed with
/// high probability.
pub fn combine(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(GOLDEN_GAMMA)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// 64-bit hash of one value, stable within a process run.
pub fn of<T: Hash>(value: &T) -> u64 {
    let mut hasher = AHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Fold one accepted draw into a frame hash.
///
/// Fields at their default contribute nothing, so the common case (white,
/// fully opaque, normal blending, no clip) folds only identity and
/// geometry. `extra` carries a caller-supplied override for draws whose
/// texture id is not stable frame to frame (animated textures).
pub fn fold_draw(
    mut seed: u64,
    state: &RenderState,
    command: &DrawCommand,
    extra: Option<u64>,
) -> u64 {
    if let Some(id) = state.texture_id() {
        seed = combine(seed, of(&id));
    }
    if state.opacity < 1.0 {
        seed = combine(seed, of(&state.opacity.to_bits()));
    }
    if state.color != Color::WHITE {
        seed = combine(seed, of(&state.color.to_bits()));
    }
    if state.composition != CompositionMode::Normal {
        seed = combine(seed, of(&state.composition));
    }
    if let Some(clip) = &state.clip {
        seed = combine(seed, of(clip));
    }

    match command {
        DrawCommand::FilledRect { dest } => {
            seed = combine(seed, of(dest));
        }
        DrawCommand::TexturedRect { dest, src }
        | DrawCommand::UpsideDownTexturedRect { dest, src }
        | DrawCommand::TiledTexturedRect { dest, src } => {
            seed = combine(seed, of(dest));
            seed = combine(seed, of(src));
        }
        DrawCommand::FilledTriangle { a, b, c } => {
            seed = combine(seed, of(a));
            seed = combine(seed, of(b));
            seed = combine(seed, of(c));
        }
        DrawCommand::BoundingRect { dest, inner_width } => {
            seed = combine(seed, of(dest));
            if *inner_width != 0 {
                seed = combine(seed, of(inner_width));
            }
        }
    }

    if let Some(extra) = extra {
        seed = combine(seed, extra);
    }

    seed
}
