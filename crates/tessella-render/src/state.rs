//! Render state executed per batch.

use tessella_core::geometry::Rect;

use crate::color::Color;
use crate::texture::TextureHandle;

/// How a draw is blended into its target.
///
/// The batcher only compares and hashes the mode; the painter applies it.
/// The wgpu presets are provided for painter implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositionMode {
    /// Premultiplied source-over blending.
    #[default]
    Normal,
    /// Source multiplied with the destination.
    Multiply,
    /// Source added onto the destination.
    Add,
    /// Source replaces the destination.
    Replace,
    /// Blend weighted by the destination's alpha.
    DestBlending,
    /// Darkens the destination by the source color; used when the light
    /// overlay is composited over the map.
    Light,
}

impl CompositionMode {
    /// The wgpu blend preset for this mode.
    pub fn to_blend_state(self) -> wgpu::BlendState {
        match self {
            CompositionMode::Normal => wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            CompositionMode::Multiply => Self::symmetric(
                wgpu::BlendFactor::Dst,
                wgpu::BlendFactor::OneMinusSrcAlpha,
            ),
            CompositionMode::Add => {
                Self::symmetric(wgpu::BlendFactor::One, wgpu::BlendFactor::One)
            }
            CompositionMode::Replace => wgpu::BlendState::REPLACE,
            CompositionMode::DestBlending => Self::symmetric(
                wgpu::BlendFactor::OneMinusDstAlpha,
                wgpu::BlendFactor::DstAlpha,
            ),
            CompositionMode::Light => {
                Self::symmetric(wgpu::BlendFactor::Zero, wgpu::BlendFactor::Src)
            }
        }
    }

    fn symmetric(src_factor: wgpu::BlendFactor, dst_factor: wgpu::BlendFactor) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor,
            dst_factor,
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }
}

/// Identifier of a shader program owned by the GPU layer.
///
/// A bound shader makes a framed pool re-render every frame, since shader
/// side effects cannot be captured by the content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u64);

/// The GPU state attached to one draw command.
///
/// Two states are equal iff every field compares equal; textures compare
/// by stable id. Batch merging relies on this equality, so every field
/// that changes rendering output must live here.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub texture: Option<TextureHandle>,
    pub color: Color,
    pub opacity: f32,
    pub composition: CompositionMode,
    pub clip: Option<Rect>,
    pub shader: Option<ShaderId>,
    pub alpha_write: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            texture: None,
            color: Color::WHITE,
            opacity: 1.0,
            composition: CompositionMode::Normal,
            clip: None,
            shader: None,
            alpha_write: true,
        }
    }
}

impl RenderState {
    pub fn texture_id(&self) -> Option<u64> {
        self.texture.as_ref().map(|texture| texture.id())
    }
}

impl PartialEq for RenderState {
    fn eq(&self, other: &Self) -> bool {
        self.texture_id() == other.texture_id()
            && self.color == other.color
            && self.opacity == other.opacity
            && self.composition == other.composition
            && self.clip == other.clip
            && self.shader == other.shader
            && self.alpha_write == other.alpha_write
    }
}
