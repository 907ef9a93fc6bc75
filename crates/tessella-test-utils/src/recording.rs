//! A painter that records every backend call for test assertions.
//!
//! No GPU is touched: the recorder hands out sequential frame-target ids
//! and stores everything the engine submits, including full vertex data,
//! so tests can assert exactly what would have reached the GPU.

use tessella_core::geometry::Rect;
use tessella_render::{
    CoordsBuffer, FrameTargetId, FrameTargetOptions, Painter, RenderState, Topology, Vertex,
};

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintEvent {
    CreateTarget {
        target: FrameTargetId,
        options: FrameTargetOptions,
    },
    DestroyTarget {
        target: FrameTargetId,
    },
    BindTarget {
        target: FrameTargetId,
    },
    ReleaseTarget {
        target: FrameTargetId,
    },
    Composite {
        target: FrameTargetId,
        dest: Rect,
        src: Rect,
    },
    SaveState,
    RestoreState,
    ExecuteState {
        state: RenderState,
    },
    DrawVertices {
        vertices: Vec<Vertex>,
        topology: Topology,
    },
}

/// Mock painter backing the batching engine in tests.
#[derive(Default)]
pub struct RecordingPainter {
    events: Vec<PaintEvent>,
    next_target: u64,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order.
    pub fn events(&self) -> &[PaintEvent] {
        &self.events
    }

    /// Forget recorded calls (useful between frames in a test).
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn count_binds(&self) -> usize {
        self.count(|event| matches!(event, PaintEvent::BindTarget { .. }))
    }

    pub fn count_composites(&self) -> usize {
        self.count(|event| matches!(event, PaintEvent::Composite { .. }))
    }

    pub fn count_draws(&self) -> usize {
        self.count(|event| matches!(event, PaintEvent::DrawVertices { .. }))
    }

    pub fn count_destroys(&self) -> usize {
        self.count(|event| matches!(event, PaintEvent::DestroyTarget { .. }))
    }

    /// The targets composited, in order.
    pub fn composited_targets(&self) -> Vec<FrameTargetId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PaintEvent::Composite { target, .. } => Some(*target),
                _ => None,
            })
            .collect()
    }

    /// The vertex submissions, in order.
    pub fn draws(&self) -> Vec<(Vec<Vertex>, Topology)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PaintEvent::DrawVertices { vertices, topology } => {
                    Some((vertices.clone(), *topology))
                }
                _ => None,
            })
            .collect()
    }

    /// The states executed, in order.
    pub fn executed_states(&self) -> Vec<RenderState> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PaintEvent::ExecuteState { state } => Some(state.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether `target` received any call at all.
    pub fn touched(&self, target: FrameTargetId) -> bool {
        self.events.iter().any(|event| match event {
            PaintEvent::CreateTarget { target: t, .. }
            | PaintEvent::DestroyTarget { target: t }
            | PaintEvent::BindTarget { target: t }
            | PaintEvent::ReleaseTarget { target: t }
            | PaintEvent::Composite { target: t, .. } => *t == target,
            _ => false,
        })
    }

    fn count(&self, predicate: impl Fn(&PaintEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl Painter for RecordingPainter {
    fn create_frame_target(&mut self, options: FrameTargetOptions) -> FrameTargetId {
        self.next_target += 1;
        let target = FrameTargetId(self.next_target);
        self.events.push(PaintEvent::CreateTarget { target, options });
        target
    }

    fn destroy_frame_target(&mut self, target: FrameTargetId) {
        self.events.push(PaintEvent::DestroyTarget { target });
    }

    fn bind_frame_target(&mut self, target: FrameTargetId) {
        self.events.push(PaintEvent::BindTarget { target });
    }

    fn release_frame_target(&mut self, target: FrameTargetId) {
        self.events.push(PaintEvent::ReleaseTarget { target });
    }

    fn composite_frame_target(&mut self, target: FrameTargetId, dest: Rect, src: Rect) {
        self.events.push(PaintEvent::Composite { target, dest, src });
    }

    fn save_and_reset_state(&mut self) {
        self.events.push(PaintEvent::SaveState);
    }

    fn restore_state(&mut self) {
        self.events.push(PaintEvent::RestoreState);
    }

    fn execute_state(&mut self, state: &RenderState) {
        self.events.push(PaintEvent::ExecuteState {
            state: state.clone(),
        });
    }

    fn draw_vertices(&mut self, coords: &CoordsBuffer, topology: Topology) {
        self.events.push(PaintEvent::DrawVertices {
            vertices: coords.vertices().to_vec(),
            topology,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_sequential() {
        let mut painter = RecordingPainter::new();
        let a = painter.create_frame_target(FrameTargetOptions::default());
        let b = painter.create_frame_target(FrameTargetOptions::default());
        assert_ne!(a, b);
        assert!(painter.touched(a));
        assert!(painter.touched(b));
    }

    #[test]
    fn test_records_draws_with_vertices() {
        let mut painter = RecordingPainter::new();
        let mut coords = CoordsBuffer::new();
        coords.add_rect(Rect::new(0, 0, 4, 4));

        painter.draw_vertices(&coords, Topology::Triangles);

        let draws = painter.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].0.len(), 6);
        assert_eq!(draws[0].1, Topology::Triangles);
    }

    #[test]
    fn test_clear_events() {
        let mut painter = RecordingPainter::new();
        painter.save_and_reset_state();
        assert_eq!(painter.events().len(), 1);
        painter.clear_events();
        assert!(painter.events().is_empty());
    }
}
