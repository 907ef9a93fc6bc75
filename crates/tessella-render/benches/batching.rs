//! Batching throughput for a tile-map-sized draw stream.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tessella_render::{
    BatchingEngine, Color, CoordsBuffer, FrameTargetId, FrameTargetOptions, Painter, PoolId, Rect,
    RenderState, Size, Texture, Topology,
};

/// Discards everything; the engine's own work is what gets measured.
struct NullPainter {
    next_target: u64,
    draws: usize,
}

impl NullPainter {
    fn new() -> Self {
        Self {
            next_target: 0,
            draws: 0,
        }
    }
}

impl Painter for NullPainter {
    fn create_frame_target(&mut self, _options: FrameTargetOptions) -> FrameTargetId {
        self.next_target += 1;
        FrameTargetId(self.next_target)
    }

    fn destroy_frame_target(&mut self, _target: FrameTargetId) {}
    fn bind_frame_target(&mut self, _target: FrameTargetId) {}
    fn release_frame_target(&mut self, _target: FrameTargetId) {}
    fn composite_frame_target(&mut self, _target: FrameTargetId, _dest: Rect, _src: Rect) {}
    fn save_and_reset_state(&mut self) {}
    fn restore_state(&mut self) {}
    fn execute_state(&mut self, _state: &RenderState) {}

    fn draw_vertices(&mut self, coords: &CoordsBuffer, _topology: Topology) {
        self.draws += 1;
        black_box(coords.vertex_count());
    }
}

fn bench_tile_stream(c: &mut Criterion) {
    const COLUMNS: i32 = 100;
    const ROWS: i32 = 100;
    const TILE: i32 = 32;

    let mut painter = NullPainter::new();
    let mut engine = BatchingEngine::new(&mut painter);
    let textures: Vec<_> = (0..16)
        .map(|id| Texture::new(id, Size::new(TILE, TILE)).opaque(true).shared())
        .collect();

    c.bench_function("batch_10k_tile_draws", |b| {
        b.iter(|| {
            engine.use_framed(
                PoolId::Map,
                Rect::new(0, 0, COLUMNS * TILE, ROWS * TILE),
                Rect::new(0, 0, COLUMNS * TILE, ROWS * TILE),
            );
            for y in 0..ROWS {
                for x in 0..COLUMNS {
                    let tex = &textures[((x + y * COLUMNS) % 16) as usize];
                    engine.add_repeated_textured_rect(
                        Rect::new(x * TILE, y * TILE, TILE, TILE),
                        tex,
                        tex.rect(),
                        Color::WHITE,
                    );
                }
            }
            // Force a re-render so assembly and submission are measured
            // too, not just the hash-skip.
            engine.repaint(PoolId::Map);
            engine.draw(&mut painter);
        });
    });
}

criterion_group!(benches, bench_tile_stream);
criterion_main!(benches);
