//! Shared texture resource handles.

use std::sync::Arc;

use tessella_core::geometry::{Rect, Size};

/// A texture handle shared between the graphics-resource layer and the
/// batching core. The handle lives as long as its longest holder.
pub type TextureHandle = Arc<Texture>;

/// A texture owned by the graphics-resource layer.
///
/// The batching core never touches texel data; it reads the stable id
/// (state equality and content hashing), the size (whole-texture source
/// rects) and the capability flags driving overdraw elimination. Both
/// flags are facts about the pixel contents that only the resource layer
/// can assert, so they are supplied at creation.
#[derive(Debug)]
pub struct Texture {
    id: u64,
    size: Size,
    opaque: bool,
    superimposable: bool,
}

impl Texture {
    pub fn new(id: u64, size: Size) -> Self {
        Self {
            id,
            size,
            opaque: false,
            superimposable: false,
        }
    }

    /// Declare every texel fully opaque.
    pub fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    /// Declare that a same-sized opaque draw on top of this texture fully
    /// hides it, letting the batcher drop the occluded draw.
    pub fn superimposable(mut self, superimposable: bool) -> Self {
        self.superimposable = superimposable;
        self
    }

    /// Finish construction and share the texture.
    pub fn shared(self) -> TextureHandle {
        Arc::new(self)
    }

    /// Stable identity, unique per texture resource.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole-texture source rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn can_superimpose(&self) -> bool {
        self.superimposable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let texture = Texture::new(7, Size::new(32, 64))
            .opaque(true)
            .superimposable(true)
            .shared();
        assert_eq!(texture.id(), 7);
        assert_eq!(texture.rect(), Rect::new(0, 0, 32, 64));
        assert!(texture.is_opaque());
        assert!(texture.can_superimpose());
    }

    #[test]
    fn test_defaults_are_conservative() {
        let texture = Texture::new(1, Size::new(8, 8));
        assert!(!texture.is_opaque());
        assert!(!texture.can_superimpose());
    }
}
