//! Draw command descriptors.

use tessella_core::geometry::{Point, Rect};

/// One accepted draw request, normalized to its geometry.
///
/// Commands are value types; the [`RenderState`] they are drawn with lives
/// on the batch. Rect-shaped variants never hold a degenerate destination
/// or source; the engine rejects those before anything is stored.
///
/// [`RenderState`]: crate::state::RenderState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawCommand {
    /// Solid rectangle filled with the state color.
    FilledRect { dest: Rect },
    /// `src` (texel space) stretched onto `dest`.
    TexturedRect { dest: Rect, src: Rect },
    /// Like [`DrawCommand::TexturedRect`] with the v axis flipped, for
    /// sampling render targets stored bottom-up.
    UpsideDownTexturedRect { dest: Rect, src: Rect },
    /// `src` tiled across `dest` in src-sized steps, trailing tiles
    /// clamped.
    TiledTexturedRect { dest: Rect, src: Rect },
    /// Solid triangle; the engine rejects coincident vertices.
    FilledTriangle { a: Point, b: Point, c: Point },
    /// Rectangular outline built from four edge strips of `inner_width`
    /// pixels.
    BoundingRect { dest: Rect, inner_width: u32 },
}

impl DrawCommand {
    /// The destination rectangle, for rect-shaped variants.
    ///
    /// Overdraw elimination keys on this: a stored command is dropped when
    /// a later command lands on the same destination and hides it.
    pub fn dest_rect(&self) -> Option<Rect> {
        match *self {
            DrawCommand::FilledRect { dest }
            | DrawCommand::TexturedRect { dest, .. }
            | DrawCommand::UpsideDownTexturedRect { dest, .. }
            | DrawCommand::TiledTexturedRect { dest, .. }
            | DrawCommand::BoundingRect { dest, .. } => Some(dest),
            DrawCommand::FilledTriangle { .. } => None,
        }
    }

    /// The source rectangle, for textured variants.
    pub fn src_rect(&self) -> Option<Rect> {
        match *self {
            DrawCommand::TexturedRect { src, .. }
            | DrawCommand::UpsideDownTexturedRect { src, .. }
            | DrawCommand::TiledTexturedRect { src, .. } => Some(src),
            DrawCommand::FilledRect { .. }
            | DrawCommand::FilledTriangle { .. }
            | DrawCommand::BoundingRect { .. } => None,
        }
    }
}

/// Primitive topology a batch is submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Four-vertex strip; used while a batch holds a single textured quad.
    TriangleStrip,
    /// Six-vertices-per-quad list; merged batches always use this.
    Triangles,
}

impl Topology {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let dest = Rect::new(0, 0, 32, 32);
        let src = Rect::new(8, 8, 16, 16);

        let textured = DrawCommand::TexturedRect { dest, src };
        assert_eq!(textured.dest_rect(), Some(dest));
        assert_eq!(textured.src_rect(), Some(src));

        let filled = DrawCommand::FilledRect { dest };
        assert_eq!(filled.dest_rect(), Some(dest));
        assert_eq!(filled.src_rect(), None);

        let triangle = DrawCommand::FilledTriangle {
            a: Point::new(0, 0),
            b: Point::new(4, 0),
            c: Point::new(0, 4),
        };
        assert_eq!(triangle.dest_rect(), None);
        assert_eq!(triangle.src_rect(), None);
    }

    #[test]
    fn test_topology_mapping() {
        assert_eq!(
            Topology::TriangleStrip.to_wgpu(),
            wgpu::PrimitiveTopology::TriangleStrip
        );
        assert_eq!(
            Topology::Triangles.to_wgpu(),
            wgpu::PrimitiveTopology::TriangleList
        );
    }
}
