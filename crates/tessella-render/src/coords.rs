//! Geometry assembly: draw commands become a GPU vertex stream.
//!
//! This is the only place per-command data turns into raw vertex data.
//! The engine assembles one batch at a time, submits it through the
//! painter, and clears the buffer so no geometry leaks into the next
//! batch.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use static_assertions::const_assert_eq;
use tessella_core::geometry::{Point, Rect};

/// One assembled vertex: pixel-space position plus texel-space texture
/// coordinates. The painter normalizes texcoords against the size of the
/// texture bound by the batch's state.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec2,
    pub tex_coord: Vec2,
}

const_assert_eq!(std::mem::size_of::<Vertex>(), 16);

impl Vertex {
    /// Size of the vertex in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// The wgpu vertex buffer layout for the assembled stream.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // location 0: position (vec2)
            0 => Float32x2,
            // location 1: tex_coord (vec2)
            1 => Float32x2,
        ];

        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

/// Accumulates one batch's vertices before submission.
#[derive(Debug, Default)]
pub struct CoordsBuffer {
    vertices: Vec<Vertex>,
}

impl CoordsBuffer {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    fn push(&mut self, x: i32, y: i32, u: i32, v: i32) {
        self.vertices.push(Vertex {
            position: Vec2::new(x as f32, y as f32),
            tex_coord: Vec2::new(u as f32, v as f32),
        });
    }

    /// Solid rectangle as a six-vertex triangle list.
    pub fn add_rect(&mut self, dest: Rect) {
        self.add_textured_rect(dest, Rect::default());
    }

    /// Textured rectangle as a six-vertex triangle list.
    pub fn add_textured_rect(&mut self, dest: Rect, src: Rect) {
        self.rect_triangles(dest, src.x, src.y, src.right(), src.bottom());
    }

    /// Textured rectangle as a four-vertex strip, for batches holding a
    /// single quad.
    pub fn add_textured_quad(&mut self, dest: Rect, src: Rect) {
        self.rect_strip(dest, src.x, src.y, src.right(), src.bottom());
    }

    /// Triangle-list rectangle sampling `src` with the v axis flipped.
    pub fn add_upside_down_rect(&mut self, dest: Rect, src: Rect) {
        self.rect_triangles(dest, src.x, src.bottom(), src.right(), src.y);
    }

    /// Strip rectangle sampling `src` with the v axis flipped.
    pub fn add_upside_down_quad(&mut self, dest: Rect, src: Rect) {
        self.rect_strip(dest, src.x, src.bottom(), src.right(), src.y);
    }

    /// Tile `src` across `dest` in src-sized steps; trailing tiles are
    /// clamped to the remaining extent.
    pub fn add_tiled_rect(&mut self, dest: Rect, src: Rect) {
        if src.is_empty() {
            return;
        }

        let mut y = 0;
        while y < dest.height {
            let tile_height = src.height.min(dest.height - y);
            let mut x = 0;
            while x < dest.width {
                let tile_width = src.width.min(dest.width - x);
                self.add_textured_rect(
                    Rect::new(dest.x + x, dest.y + y, tile_width, tile_height),
                    Rect::new(src.x, src.y, tile_width, tile_height),
                );
                x += src.width;
            }
            y += src.height;
        }
    }

    /// Rectangular outline as four edge strips of `inner_width` pixels.
    /// An outline too thick to leave a hole degenerates into a full fill.
    pub fn add_bounding_rect(&mut self, dest: Rect, inner_width: u32) {
        let line = inner_width as i32;
        if line * 2 >= dest.width || line * 2 >= dest.height {
            self.add_rect(dest);
            return;
        }

        // top, bottom, left, right
        self.add_rect(Rect::new(dest.x, dest.y, dest.width, line));
        self.add_rect(Rect::new(dest.x, dest.bottom() - line, dest.width, line));
        self.add_rect(Rect::new(
            dest.x,
            dest.y + line,
            line,
            dest.height - line * 2,
        ));
        self.add_rect(Rect::new(
            dest.right() - line,
            dest.y + line,
            line,
            dest.height - line * 2,
        ));
    }

    /// Solid triangle.
    pub fn add_triangle(&mut self, a: Point, b: Point, c: Point) {
        self.push(a.x, a.y, 0, 0);
        self.push(b.x, b.y, 0, 0);
        self.push(c.x, c.y, 0, 0);
    }

    fn rect_triangles(&mut self, dest: Rect, u0: i32, v0: i32, u1: i32, v1: i32) {
        let (left, top, right, bottom) = (dest.x, dest.y, dest.right(), dest.bottom());
        self.push(left, top, u0, v0);
        self.push(left, bottom, u0, v1);
        self.push(right, top, u1, v0);
        self.push(right, top, u1, v0);
        self.push(left, bottom, u0, v1);
        self.push(right, bottom, u1, v1);
    }

    fn rect_strip(&mut self, dest: Rect, u0: i32, v0: i32, u1: i32, v1: i32) {
        let (left, top, right, bottom) = (dest.x, dest.y, dest.right(), dest.bottom());
        self.push(left, top, u0, v0);
        self.push(left, bottom, u0, v1);
        self.push(right, top, u1, v0);
        self.push(right, bottom, u1, v1);
    }
}
