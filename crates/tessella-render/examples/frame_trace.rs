//! Issues two identical frames and prints what would reach the GPU,
//! showing batch coalescing and the second frame's re-render skip.
//!
//! Run with: cargo run -p tessella-render --example frame_trace

use tessella_render::{BatchingEngine, Color, PoolId, Rect, Size, Texture};
use tessella_test_utils::RecordingPainter;

fn main() {
    tessella_core::logging::init();

    let mut painter = RecordingPainter::new();
    let mut engine = BatchingEngine::new(&mut painter);

    let grass = Texture::new(1, Size::new(32, 32)).opaque(true).shared();
    let water = Texture::new(2, Size::new(32, 32)).opaque(true).shared();

    for frame in 0..2 {
        painter.clear_events();

        let view = Rect::new(0, 0, 480, 352);
        engine.use_framed(PoolId::Map, view, view);
        for y in 0..11 {
            for x in 0..15 {
                let tex = if (x + y) % 4 == 0 { &water } else { &grass };
                engine.add_repeated_textured_rect(
                    Rect::new(x * 32, y * 32, 32, 32),
                    tex,
                    tex.rect(),
                    Color::WHITE,
                );
            }
        }

        engine.use_pool(PoolId::Text);
        engine.add_filled_rect(Rect::new(200, 8, 80, 14), Color::rgba(0.0, 0.0, 0.0, 0.6));

        engine.draw(&mut painter);

        println!(
            "frame {frame}: {} tile draws became {} submissions ({} offscreen re-renders)",
            11 * 15 + 1,
            painter.count_draws(),
            painter.count_binds(),
        );
    }
}
