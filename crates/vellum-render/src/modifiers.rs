//! Caller-supplied overrides applied to a whole draw list.

use bitflags::bitflags;
use vellum_core::math::Vec4;

bitflags! {
    /// Status bits carried by [`RenderModifiers`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusBits: u32 {
        /// Replace texture coordinates with environment-mapped ones.
        const REFLECTION_MAP = 1 << 0;
        /// Draw back faces (disable face culling).
        const KEEP_BACK_FACES = 1 << 1;
        /// Draw unlit.
        const NULL_SHADER = 1 << 2;
    }
}

/// Overrides for one `draw_mesh_list` call.
///
/// The diffuse multiplier is applied component-wise (alpha included) to
/// every mesh's diffuse color, which is how a caller tints or fades a whole
/// batch without touching vertex data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderModifiers {
    pub status_bits: StatusBits,
    pub diffuse_color: Vec4,
}

impl RenderModifiers {
    /// No status bits, neutral multiplier.
    pub const DEFAULT: Self = Self {
        status_bits: StatusBits::empty(),
        diffuse_color: Vec4::ONE,
    };

    pub fn with_status_bits(mut self, bits: StatusBits) -> Self {
        self.status_bits |= bits;
        self
    }

    pub fn with_diffuse_color(mut self, color: Vec4) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Shorthand for a multiplier that only scales alpha.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.diffuse_color.w = alpha;
        self
    }

    #[inline]
    pub fn reflection_map(&self) -> bool {
        self.status_bits.contains(StatusBits::REFLECTION_MAP)
    }

    #[inline]
    pub fn keep_back_faces(&self) -> bool {
        self.status_bits.contains(StatusBits::KEEP_BACK_FACES)
    }

    #[inline]
    pub fn null_shader(&self) -> bool {
        self.status_bits.contains(StatusBits::NULL_SHADER)
    }
}

impl Default for RenderModifiers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let mods = RenderModifiers::default();

        assert!(mods.status_bits.is_empty());
        assert_eq!(mods.diffuse_color, Vec4::ONE);
        assert!(!mods.reflection_map());
    }

    #[test]
    fn test_builders_accumulate_bits() {
        let mods = RenderModifiers::default()
            .with_status_bits(StatusBits::KEEP_BACK_FACES)
            .with_status_bits(StatusBits::NULL_SHADER)
            .with_alpha(0.25);

        assert!(mods.keep_back_faces());
        assert!(mods.null_shader());
        assert!(!mods.reflection_map());
        assert_eq!(mods.diffuse_color, Vec4::new(1.0, 1.0, 1.0, 0.25));
    }
}
