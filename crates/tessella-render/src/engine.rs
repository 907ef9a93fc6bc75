//! The batching engine: pool registry, merge logic and the per-frame
//! submission driver.

use tessella_core::geometry::{Point, Rect};
use tessella_core::profiling::profile_scope;

use crate::batch::Batch;
use crate::color::Color;
use crate::command::{DrawCommand, Topology};
use crate::coords::CoordsBuffer;
use crate::hash;
use crate::painter::{FrameTargetOptions, Painter};
use crate::pool::{Pool, PoolId};
use crate::state::{CompositionMode, RenderState, ShaderId};
use crate::texture::TextureHandle;

/// Accumulation counters for one pool, for debug overlays and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub batches: usize,
    pub commands: usize,
    pub actions: usize,
}

/// Owns the fixed pool set and turns per-frame draw requests into few GPU
/// submissions.
///
/// One instance is owned by the rendering subsystem's top-level context;
/// collaborators reach it by `&mut`. Everything here runs on the render
/// thread: the current-pool cursor is plain mutable state, not a
/// concurrency-safe global.
///
/// A frame looks like: collaborators [`use_pool`](Self::use_pool) /
/// [`use_framed`](Self::use_framed) their layer and issue draw
/// primitives; the frame driver then calls [`draw`](Self::draw) exactly
/// once, after which every pool is empty again.
pub struct BatchingEngine {
    /// Indexed by `PoolId`; construction order is registration order.
    pools: Vec<Pool>,
    current: PoolId,
    coords: CoordsBuffer,
}

impl BatchingEngine {
    /// Create the fixed pool set, allocating offscreen targets for the
    /// framed layers through the painter.
    pub fn new(painter: &mut dyn Painter) -> Self {
        let pools = PoolId::ALL
            .iter()
            .map(|&id| {
                if id.is_framed() {
                    let target = painter.create_frame_target(Self::target_options(id));
                    Pool::framed(id, target)
                } else {
                    Pool::new(id)
                }
            })
            .collect();

        tracing::info!(pools = PoolId::ALL.len(), "batching engine initialized");

        Self {
            pools,
            current: PoolId::Fallback,
            coords: CoordsBuffer::new(),
        }
    }

    fn target_options(id: PoolId) -> FrameTargetOptions {
        match id {
            // Map tiles arrive back-to-front and opaque.
            PoolId::Map => FrameTargetOptions {
                blend: false,
                ..FrameTargetOptions::default()
            },
            PoolId::Light => FrameTargetOptions {
                composition: CompositionMode::Light,
                ..FrameTargetOptions::default()
            },
            _ => FrameTargetOptions::default(),
        }
    }

    /// Release every offscreen target. Must run before the GPU context is
    /// torn down.
    pub fn terminate(mut self, painter: &mut dyn Painter) {
        for pool in &mut self.pools {
            if let Some(frame) = pool.frame.take() {
                painter.destroy_frame_target(frame.target);
            }
        }
        tracing::info!("batching engine terminated");
    }

    // ---- pool selection ------------------------------------------------

    /// Make `id` the target of subsequent draw primitives, resetting its
    /// seed state, its repeat-search index and, for framed pools, its
    /// content-hash accumulator.
    pub fn use_pool(&mut self, id: PoolId) {
        self.current = id;
        self.pool_mut(id).reset_transient();
    }

    /// [`use_pool`](Self::use_pool), plus composite geometry for a framed
    /// pool: the target will be drawn sampling `src` into `dest`. Alpha
    /// writing is switched off on the newly selected pool.
    pub fn use_framed(&mut self, id: PoolId, dest: Rect, src: Rect) {
        self.use_pool(id);
        let pool = self.pool_mut(id);
        pool.seed_state.alpha_write = false;
        if let Some(frame) = &mut pool.frame {
            frame.dest = dest;
            frame.src = src;
        }
    }

    pub fn current_pool(&self) -> PoolId {
        self.current
    }

    // ---- current-pool seed state ---------------------------------------

    pub fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.current_pool_mut().seed_state.clip = clip;
    }

    pub fn set_composition_mode(&mut self, composition: CompositionMode) {
        self.current_pool_mut().seed_state.composition = composition;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.current_pool_mut().seed_state.opacity = opacity;
    }

    pub fn set_shader(&mut self, shader: Option<ShaderId>) {
        self.current_pool_mut().seed_state.shader = shader;
    }

    pub fn set_alpha_write(&mut self, enabled: bool) {
        self.current_pool_mut().seed_state.alpha_write = enabled;
    }

    // ---- per-pool control ----------------------------------------------

    /// A disabled pool is skipped by both submission phases; its offscreen
    /// target keeps whatever it last held.
    pub fn set_pool_enabled(&mut self, id: PoolId, enabled: bool) {
        self.pool_mut(id).enabled = enabled;
    }

    pub fn is_pool_enabled(&self, id: PoolId) -> bool {
        self.pools[id.index()].enabled
    }

    /// Run `action` just before `id`'s target is composited each frame.
    pub fn on_before_composite(&mut self, id: PoolId, action: impl FnMut() + 'static) {
        if let Some(frame) = &mut self.pool_mut(id).frame {
            frame.before_composite = Some(Box::new(action));
        }
    }

    /// Run `action` just after `id`'s target is composited each frame.
    pub fn on_after_composite(&mut self, id: PoolId, action: impl FnMut() + 'static) {
        if let Some(frame) = &mut self.pool_mut(id).frame {
            frame.after_composite = Some(Box::new(action));
        }
    }

    /// Force one re-render of a framed pool regardless of its content
    /// hash, e.g. after its target was resized externally.
    pub fn repaint(&mut self, id: PoolId) {
        if let Some(frame) = &mut self.pool_mut(id).frame {
            frame.force_refresh = true;
        }
    }

    /// Stop the repeated-path merge search from reaching batches created
    /// before this call.
    pub fn mark_repeat_boundary(&mut self) {
        let pool = self.current_pool_mut();
        pool.search_start = pool.batches.len();
    }

    /// The content hash accumulated so far this frame; `None` for
    /// immediate pools.
    pub fn content_hash(&self, id: PoolId) -> Option<u64> {
        self.pools[id.index()]
            .frame
            .as_ref()
            .map(|frame| frame.current_hash)
    }

    pub fn pool_stats(&self, id: PoolId) -> PoolStats {
        let pool = &self.pools[id.index()];
        let mut stats = PoolStats {
            batches: pool.batches.len(),
            ..PoolStats::default()
        };
        for batch in &pool.batches {
            if batch.is_action() {
                stats.actions += 1;
            } else {
                stats.commands += batch.command_count();
            }
        }
        stats
    }

    // ---- draw primitives -----------------------------------------------

    /// Draw the whole of `texture` into `dest`.
    pub fn add_texture(&mut self, dest: Rect, texture: &TextureHandle, color: Color) {
        self.add_textured_rect(dest, texture, texture.rect(), color);
    }

    /// Draw `src` of `texture` into `dest`.
    pub fn add_textured_rect(
        &mut self,
        dest: Rect,
        texture: &TextureHandle,
        src: Rect,
        color: Color,
    ) {
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let state = self.seeded_state(Some(texture.clone()), color);
        self.add(
            state,
            DrawCommand::TexturedRect { dest, src },
            Topology::TriangleStrip,
            None,
        );
    }

    /// [`add_textured_rect`](Self::add_textured_rect) with an explicit
    /// content-hash override, for textures whose id is not stable frame to
    /// frame (animated textures re-uploaded in place).
    pub fn add_textured_rect_with_hash(
        &mut self,
        dest: Rect,
        texture: &TextureHandle,
        src: Rect,
        color: Color,
        content_hash: u64,
    ) {
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let state = self.seeded_state(Some(texture.clone()), color);
        self.add(
            state,
            DrawCommand::TexturedRect { dest, src },
            Topology::TriangleStrip,
            Some(content_hash),
        );
    }

    /// Draw `src` of `texture` into `dest` with the v axis flipped.
    pub fn add_upside_down_textured_rect(
        &mut self,
        dest: Rect,
        texture: &TextureHandle,
        src: Rect,
        color: Color,
    ) {
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let state = self.seeded_state(Some(texture.clone()), color);
        self.add(
            state,
            DrawCommand::UpsideDownTexturedRect { dest, src },
            Topology::TriangleStrip,
            None,
        );
    }

    /// Textured rect routed through the repeated path: grouped with any
    /// same-state batch issued this frame, not just the last one. Use when
    /// the same texture/tint recurs many times per frame (tile sprites).
    pub fn add_repeated_textured_rect(
        &mut self,
        dest: Rect,
        texture: &TextureHandle,
        src: Rect,
        color: Color,
    ) {
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let state = self.seeded_state(Some(texture.clone()), color);
        self.add_repeated(state, DrawCommand::TexturedRect { dest, src }, None);
    }

    /// Tile `src` across `dest`, routed through the repeated path.
    pub fn add_tiled_textured_rect(
        &mut self,
        dest: Rect,
        texture: &TextureHandle,
        src: Rect,
        color: Color,
    ) {
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let state = self.seeded_state(Some(texture.clone()), color);
        self.add_repeated(state, DrawCommand::TiledTexturedRect { dest, src }, None);
    }

    /// Solid rectangle.
    pub fn add_filled_rect(&mut self, dest: Rect, color: Color) {
        if dest.is_empty() {
            return;
        }
        let state = self.seeded_state(None, color);
        self.add(
            state,
            DrawCommand::FilledRect { dest },
            Topology::Triangles,
            None,
        );
    }

    /// Solid rectangle routed through the repeated path.
    pub fn add_repeated_filled_rect(&mut self, dest: Rect, color: Color) {
        if dest.is_empty() {
            return;
        }
        let state = self.seeded_state(None, color);
        self.add_repeated(state, DrawCommand::FilledRect { dest }, None);
    }

    /// Solid triangle. Coincident vertices are a no-op.
    pub fn add_filled_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        if a == b || a == c || b == c {
            return;
        }
        let state = self.seeded_state(None, color);
        self.add(
            state,
            DrawCommand::FilledTriangle { a, b, c },
            Topology::Triangles,
            None,
        );
    }

    /// Rectangular outline of `inner_width` pixels. A zero width or empty
    /// rect is a no-op.
    pub fn add_bounding_rect(&mut self, dest: Rect, color: Color, inner_width: u32) {
        if dest.is_empty() || inner_width == 0 {
            return;
        }
        let state = self.seeded_state(None, color);
        self.add(
            state,
            DrawCommand::BoundingRect { dest, inner_width },
            Topology::Triangles,
            None,
        );
    }

    /// Queue a callback to run at this position in the draw order, letting
    /// collaborators inject side effects between submissions.
    pub fn add_action(&mut self, action: impl FnMut() + 'static) {
        self.current_pool_mut().batches.push(Batch::action(action));
    }

    // ---- merge paths ---------------------------------------------------

    /// Non-repeating insertion: O(1) against the last batch only.
    fn add(
        &mut self,
        state: RenderState,
        command: DrawCommand,
        topology: Topology,
        extra_hash: Option<u64>,
    ) {
        self.accumulate_hash(&state, &command, extra_hash);
        let pool = self.current_pool_mut();

        if let Some(Batch::Draws {
            state: last_state,
            topology: last_topology,
            commands,
        }) = pool.batches.last_mut()
        {
            let same_state = *last_state == state;

            // A stored command fully hidden by the new one is dropped:
            // either the new draw repeats it exactly, or an opaque texture
            // lands on one that declared itself superimposable.
            if let Some(dest) = command.dest_rect() {
                let occluded = commands.iter().position(|prev| {
                    prev.dest_rect() == Some(dest)
                        && ((same_state && prev.src_rect() == command.src_rect())
                            || (state.texture.as_ref().is_some_and(|t| t.is_opaque())
                                && last_state
                                    .texture
                                    .as_ref()
                                    .is_some_and(|t| t.can_superimpose())))
                });
                if let Some(index) = occluded {
                    commands.remove(index);
                }
            }

            if same_state {
                *last_topology = Topology::Triangles;
                commands.push(command);
                return;
            }
        }

        pool.batches.push(Batch::draws(state, topology, command));
    }

    /// Repeating insertion: scan forward from the pool's search index for
    /// any batch with this state; never reorders existing batches.
    fn add_repeated(&mut self, state: RenderState, command: DrawCommand, extra_hash: Option<u64>) {
        self.accumulate_hash(&state, &command, extra_hash);
        let pool = self.current_pool_mut();

        let start = pool.search_start.min(pool.batches.len());
        let found = pool.batches[start..].iter().position(
            |batch| matches!(batch, Batch::Draws { state: batch_state, .. } if *batch_state == state),
        );

        match found {
            Some(offset) => {
                if let Batch::Draws { commands, .. } = &mut pool.batches[start + offset] {
                    commands.push(command);
                }
            }
            None => pool
                .batches
                .push(Batch::draws(state, Topology::Triangles, command)),
        }
    }

    fn accumulate_hash(&mut self, state: &RenderState, command: &DrawCommand, extra: Option<u64>) {
        let pool = &mut self.pools[self.current.index()];
        let Some(frame) = &mut pool.frame else {
            return;
        };
        if state.shader.is_some() {
            frame.always_refresh = true;
        }
        frame.current_hash = hash::fold_draw(frame.current_hash, state, command, extra);
    }

    fn seeded_state(&self, texture: Option<TextureHandle>, color: Color) -> RenderState {
        let seed = &self.pools[self.current.index()].seed_state;
        RenderState {
            texture,
            color,
            opacity: seed.opacity,
            composition: seed.composition,
            clip: seed.clip,
            shader: seed.shader,
            alpha_write: seed.alpha_write,
        }
    }

    fn current_pool_mut(&mut self) -> &mut Pool {
        &mut self.pools[self.current.index()]
    }

    fn pool_mut(&mut self, id: PoolId) -> &mut Pool {
        &mut self.pools[id.index()]
    }

    // ---- per-frame submission ------------------------------------------

    /// Flush one frame: re-render enabled framed pools whose content
    /// changed, then composite every enabled pool in registration order,
    /// and finally clear every pool's batch list, enabled or not.
    pub fn draw(&mut self, painter: &mut dyn Painter) {
        profile_scope!("draw_pools");
        let Self { pools, coords, .. } = self;

        // Pre-draw: refresh offscreen targets.
        for pool in pools.iter_mut() {
            if !pool.enabled {
                continue;
            }
            let Some(frame) = &mut pool.frame else {
                continue;
            };
            if !frame.has_changed() {
                tracing::trace!(pool = ?pool.id, "content unchanged, reusing offscreen target");
                continue;
            }
            frame.commit_status();
            if pool.batches.is_empty() {
                continue;
            }
            tracing::trace!(pool = ?pool.id, batches = pool.batches.len(), "re-rendering offscreen target");
            painter.bind_frame_target(frame.target);
            for batch in &mut pool.batches {
                draw_batch(coords, painter, batch);
            }
            painter.release_frame_target(frame.target);
        }

        // Composite, in registration order.
        for pool in pools.iter_mut() {
            if pool.enabled {
                if let Some(frame) = &mut pool.frame {
                    painter.save_and_reset_state();
                    if let Some(before) = &mut frame.before_composite {
                        before();
                    }
                    painter.composite_frame_target(frame.target, frame.dest, frame.src);
                    if let Some(after) = &mut frame.after_composite {
                        after();
                    }
                    painter.restore_state();
                } else {
                    for batch in &mut pool.batches {
                        draw_batch(coords, painter, batch);
                    }
                }
            }
            pool.clear();
        }
    }
}

/// Replay one batch: run its action, or execute its state and submit its
/// assembled geometry as a single draw.
fn draw_batch(coords: &mut CoordsBuffer, painter: &mut dyn Painter, batch: &mut Batch) {
    match batch {
        Batch::Action(action) => action(),
        Batch::Draws {
            state,
            topology,
            commands,
        } => {
            if commands.is_empty() {
                return;
            }
            painter.execute_state(state);
            for command in commands.iter() {
                assemble(coords, command, *topology);
            }
            painter.draw_vertices(coords, *topology);
            coords.clear();
        }
    }
}

fn assemble(coords: &mut CoordsBuffer, command: &DrawCommand, topology: Topology) {
    match *command {
        DrawCommand::FilledRect { dest } => coords.add_rect(dest),
        DrawCommand::TexturedRect { dest, src } => match topology {
            Topology::Triangles => coords.add_textured_rect(dest, src),
            Topology::TriangleStrip => coords.add_textured_quad(dest, src),
        },
        DrawCommand::UpsideDownTexturedRect { dest, src } => match topology {
            Topology::Triangles => coords.add_upside_down_rect(dest, src),
            Topology::TriangleStrip => coords.add_upside_down_quad(dest, src),
        },
        DrawCommand::TiledTexturedRect { dest, src } => coords.add_tiled_rect(dest, src),
        DrawCommand::FilledTriangle { a, b, c } => coords.add_triangle(a, b, c),
        DrawCommand::BoundingRect { dest, inner_width } => {
            coords.add_bounding_rect(dest, inner_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use tessella_core::geometry::Size;

    use super::*;
    use crate::texture::Texture;

    struct NullPainter {
        next_target: u64,
    }

    impl NullPainter {
        fn new() -> Self {
            Self { next_target: 0 }
        }
    }

    impl Painter for NullPainter {
        fn create_frame_target(
            &mut self,
            _options: FrameTargetOptions,
        ) -> crate::painter::FrameTargetId {
            self.next_target += 1;
            crate::painter::FrameTargetId(self.next_target)
        }

        fn destroy_frame_target(&mut self, _target: crate::painter::FrameTargetId) {}
        fn bind_frame_target(&mut self, _target: crate::painter::FrameTargetId) {}
        fn release_frame_target(&mut self, _target: crate::painter::FrameTargetId) {}
        fn composite_frame_target(
            &mut self,
            _target: crate::painter::FrameTargetId,
            _dest: Rect,
            _src: Rect,
        ) {
        }
        fn save_and_reset_state(&mut self) {}
        fn restore_state(&mut self) {}
        fn execute_state(&mut self, _state: &RenderState) {}
        fn draw_vertices(&mut self, _coords: &CoordsBuffer, _topology: Topology) {}
    }

    fn engine() -> BatchingEngine {
        BatchingEngine::new(&mut NullPainter::new())
    }

    fn texture(id: u64) -> TextureHandle {
        Texture::new(id, Size::new(32, 32)).shared()
    }

    fn commands_of(engine: &BatchingEngine, id: PoolId) -> &[DrawCommand] {
        match &engine.pools[id.index()].batches[0] {
            Batch::Draws { commands, .. } => commands,
            Batch::Action(_) => panic!("expected a draw batch"),
        }
    }

    #[test]
    fn test_same_state_draws_stay_in_call_order() {
        let mut engine = engine();
        let tex = texture(1);
        for i in 0..4 {
            engine.add_textured_rect(
                Rect::new(i * 32, 0, 32, 32),
                &tex,
                tex.rect(),
                Color::WHITE,
            );
        }

        let stats = engine.pool_stats(PoolId::Fallback);
        assert_eq!(stats.batches, 1);
        assert_eq!(stats.commands, 4);

        let commands = commands_of(&engine, PoolId::Fallback);
        for (i, command) in commands.iter().enumerate() {
            assert_eq!(
                command.dest_rect(),
                Some(Rect::new(i as i32 * 32, 0, 32, 32))
            );
        }
    }

    #[test]
    fn test_merged_batch_switches_to_triangles() {
        let mut engine = engine();
        let tex = texture(1);
        engine.add_texture(Rect::new(0, 0, 32, 32), &tex, Color::WHITE);

        match &engine.pools[PoolId::Fallback.index()].batches[0] {
            Batch::Draws { topology, .. } => assert_eq!(*topology, Topology::TriangleStrip),
            Batch::Action(_) => unreachable!(),
        }

        engine.add_texture(Rect::new(32, 0, 32, 32), &tex, Color::WHITE);
        match &engine.pools[PoolId::Fallback.index()].batches[0] {
            Batch::Draws { topology, .. } => assert_eq!(*topology, Topology::Triangles),
            Batch::Action(_) => unreachable!(),
        }
    }

    #[test]
    fn test_overdraw_elimination_same_state() {
        let mut engine = engine();
        let tex = texture(1);
        let dest = Rect::new(10, 10, 32, 32);

        engine.add_texture(dest, &tex, Color::WHITE);
        engine.add_texture(dest, &tex, Color::WHITE);

        let stats = engine.pool_stats(PoolId::Fallback);
        assert_eq!(stats.batches, 1);
        assert_eq!(stats.commands, 1);
    }

    #[test]
    fn test_overdraw_elimination_keeps_different_src() {
        let mut engine = engine();
        let tex = texture(1);
        let dest = Rect::new(10, 10, 16, 16);

        engine.add_textured_rect(dest, &tex, Rect::new(0, 0, 16, 16), Color::WHITE);
        engine.add_textured_rect(dest, &tex, Rect::new(16, 0, 16, 16), Color::WHITE);

        assert_eq!(engine.pool_stats(PoolId::Fallback).commands, 2);
    }

    #[test]
    fn test_overdraw_elimination_removes_at_most_one() {
        let mut engine = engine();
        let tex = texture(1);
        let dest = Rect::new(0, 0, 32, 32);
        let src_a = Rect::new(0, 0, 16, 16);
        let src_b = Rect::new(16, 0, 16, 16);

        engine.add_textured_rect(dest, &tex, src_a, Color::WHITE);
        engine.add_textured_rect(dest, &tex, src_b, Color::WHITE);
        // Both stored commands target `dest`; only the first src_a match
        // is removed.
        engine.add_textured_rect(dest, &tex, src_a, Color::WHITE);

        let commands = commands_of(&engine, PoolId::Fallback);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].src_rect(), Some(src_b));
        assert_eq!(commands[1].src_rect(), Some(src_a));
    }

    #[test]
    fn test_degenerate_geometry_is_rejected() {
        let mut engine = engine();
        let tex = texture(1);

        engine.add_textured_rect(Rect::new(0, 0, 0, 32), &tex, tex.rect(), Color::WHITE);
        engine.add_textured_rect(Rect::new(0, 0, 32, 32), &tex, Rect::default(), Color::WHITE);
        engine.add_filled_rect(Rect::new(0, 0, -5, 10), Color::RED);
        engine.add_filled_triangle(
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(5, 5),
            Color::RED,
        );
        engine.add_bounding_rect(Rect::new(0, 0, 32, 32), Color::RED, 0);

        assert_eq!(engine.pool_stats(PoolId::Fallback), PoolStats::default());
        assert_eq!(engine.content_hash(PoolId::Fallback), None);
    }

    #[test]
    fn test_rejected_draws_leave_hash_untouched() {
        let mut engine = engine();
        let tex = texture(1);

        engine.use_framed(PoolId::Map, Rect::new(0, 0, 64, 64), Rect::new(0, 0, 64, 64));
        let clean = engine.content_hash(PoolId::Map);
        engine.add_textured_rect(Rect::new(0, 0, 0, 0), &tex, tex.rect(), Color::WHITE);
        assert_eq!(engine.content_hash(PoolId::Map), clean);
    }

    #[test]
    fn test_repeated_path_groups_across_batches() {
        let mut engine = engine();
        let tex = texture(1);

        engine.add_repeated_filled_rect(Rect::new(0, 0, 8, 8), Color::RED);
        engine.add_texture(Rect::new(0, 0, 32, 32), &tex, Color::WHITE);
        engine.add_repeated_filled_rect(Rect::new(8, 0, 8, 8), Color::RED);

        let stats = engine.pool_stats(PoolId::Fallback);
        assert_eq!(stats.batches, 2);
        assert_eq!(stats.commands, 3);

        let commands = commands_of(&engine, PoolId::Fallback);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_repeat_boundary_stops_grouping() {
        let mut engine = engine();

        engine.add_repeated_filled_rect(Rect::new(0, 0, 8, 8), Color::RED);
        engine.mark_repeat_boundary();
        engine.add_repeated_filled_rect(Rect::new(8, 0, 8, 8), Color::RED);

        assert_eq!(engine.pool_stats(PoolId::Fallback).batches, 2);
    }

    #[test]
    fn test_use_pool_resets_search_index_and_seed() {
        let mut engine = engine();
        engine.set_opacity(0.5);
        engine.add_repeated_filled_rect(Rect::new(0, 0, 8, 8), Color::RED);
        engine.mark_repeat_boundary();

        engine.use_pool(PoolId::Fallback);
        assert_eq!(engine.pools[PoolId::Fallback.index()].search_start, 0);
        assert_eq!(engine.pools[PoolId::Fallback.index()].seed_state.opacity, 1.0);
    }

    #[test]
    fn test_action_batches_never_merge() {
        let mut engine = engine();

        engine.add_filled_rect(Rect::new(0, 0, 8, 8), Color::RED);
        engine.add_action(|| {});
        engine.add_filled_rect(Rect::new(8, 0, 8, 8), Color::RED);

        let stats = engine.pool_stats(PoolId::Fallback);
        assert_eq!(stats.batches, 3);
        assert_eq!(stats.actions, 1);
        assert_eq!(stats.commands, 2);
    }

    #[test]
    fn test_seed_state_flows_into_batches() {
        let mut engine = engine();
        engine.use_pool(PoolId::Text);
        engine.set_clip_rect(Some(Rect::new(0, 0, 100, 100)));
        engine.set_opacity(0.25);
        engine.add_filled_rect(Rect::new(0, 0, 8, 8), Color::RED);

        match &engine.pools[PoolId::Text.index()].batches[0] {
            Batch::Draws { state, .. } => {
                assert_eq!(state.clip, Some(Rect::new(0, 0, 100, 100)));
                assert_eq!(state.opacity, 0.25);
                assert_eq!(state.color, Color::RED);
            }
            Batch::Action(_) => unreachable!(),
        }
    }
}
