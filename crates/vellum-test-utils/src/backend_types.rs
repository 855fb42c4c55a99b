//! Vocabulary types shared by the backend trait, the renderer and the mock.

use std::fmt;
use std::num::NonZeroU32;

/// A boolean backend toggle managed by the state cache.
///
/// The first four variants are client-side attribute streams
/// (`glEnableClientState`), the rest are render features (`glEnable`).
/// Fog is deliberately absent: nothing toggles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureFlag {
    VertexArray,
    NormalArray,
    ColorArray,
    TextureCoordArray,
    CullFace,
    AlphaTest,
    DepthTest,
    ColorMaterial,
    Texture2D,
    Blend,
    Lighting,
}

impl FeatureFlag {
    /// Number of flags, for fixed-size tables keyed by flag.
    pub const COUNT: usize = 11;

    /// Every flag, in declaration order (which is also [`index`](Self::index) order).
    pub const ALL: [FeatureFlag; Self::COUNT] = [
        FeatureFlag::VertexArray,
        FeatureFlag::NormalArray,
        FeatureFlag::ColorArray,
        FeatureFlag::TextureCoordArray,
        FeatureFlag::CullFace,
        FeatureFlag::AlphaTest,
        FeatureFlag::DepthTest,
        FeatureFlag::ColorMaterial,
        FeatureFlag::Texture2D,
        FeatureFlag::Blend,
        FeatureFlag::Lighting,
    ];

    /// Dense index in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this flag is a client-side attribute stream rather than a
    /// render feature.
    pub const fn is_client_state(self) -> bool {
        matches!(
            self,
            FeatureFlag::VertexArray
                | FeatureFlag::NormalArray
                | FeatureFlag::ColorArray
                | FeatureFlag::TextureCoordArray
        )
    }

    /// The backend's name for this toggle.
    pub const fn gl_name(self) -> &'static str {
        match self {
            FeatureFlag::VertexArray => "GL_VERTEX_ARRAY",
            FeatureFlag::NormalArray => "GL_NORMAL_ARRAY",
            FeatureFlag::ColorArray => "GL_COLOR_ARRAY",
            FeatureFlag::TextureCoordArray => "GL_TEXTURE_COORD_ARRAY",
            FeatureFlag::CullFace => "GL_CULL_FACE",
            FeatureFlag::AlphaTest => "GL_ALPHA_TEST",
            FeatureFlag::DepthTest => "GL_DEPTH_TEST",
            FeatureFlag::ColorMaterial => "GL_COLOR_MATERIAL",
            FeatureFlag::Texture2D => "GL_TEXTURE_2D",
            FeatureFlag::Blend => "GL_BLEND",
            FeatureFlag::Lighting => "GL_LIGHTING",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gl_name())
    }
}

/// Backend texture name. Zero is reserved for "no texture", so an unbound
/// unit is represented as `Option::<TextureHandle>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(NonZeroU32);

impl TextureHandle {
    /// Wrap a raw texture name. Returns `None` for the reserved name `0`.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture #{}", self.0)
    }
}

/// An error code reported by the backend's error query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendErrorCode(pub u32);

impl BackendErrorCode {
    pub const INVALID_ENUM: Self = Self(0x0500);
    pub const INVALID_VALUE: Self = Self(0x0501);
    pub const INVALID_OPERATION: Self = Self(0x0502);
    pub const STACK_OVERFLOW: Self = Self(0x0503);
    pub const STACK_UNDERFLOW: Self = Self(0x0504);
    pub const OUT_OF_MEMORY: Self = Self(0x0505);

    /// Symbolic name for well-known codes.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::INVALID_ENUM => Some("GL_INVALID_ENUM"),
            Self::INVALID_VALUE => Some("GL_INVALID_VALUE"),
            Self::INVALID_OPERATION => Some("GL_INVALID_OPERATION"),
            Self::STACK_OVERFLOW => Some("GL_STACK_OVERFLOW"),
            Self::STACK_UNDERFLOW => Some("GL_STACK_UNDERFLOW"),
            Self::OUT_OF_MEMORY => Some("GL_OUT_OF_MEMORY"),
            _ => None,
        }
    }
}

impl fmt::Display for BackendErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:04X})", name, self.0),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

/// A backend entry point that could not be resolved for the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingEntryPoint {
    pub name: &'static str,
}

impl fmt::Display for MissingEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend entry point `{}` is unavailable", self.name)
    }
}

impl std::error::Error for MissingEntryPoint {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flag_index_matches_all() {
        for (i, flag) in FeatureFlag::ALL.iter().enumerate() {
            assert_eq!(flag.index(), i);
        }
    }

    #[test]
    fn test_client_state_partition() {
        let client: Vec<_> = FeatureFlag::ALL
            .into_iter()
            .filter(|flag| flag.is_client_state())
            .collect();
        assert_eq!(client.len(), 4);
        assert!(!FeatureFlag::Blend.is_client_state());
    }

    #[test]
    fn test_texture_handle_zero_is_none() {
        assert!(TextureHandle::new(0).is_none());
        assert_eq!(TextureHandle::new(7).map(TextureHandle::get), Some(7));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(
            BackendErrorCode::INVALID_OPERATION.to_string(),
            "GL_INVALID_OPERATION (0x0502)"
        );
        assert_eq!(BackendErrorCode(0x1234).to_string(), "0x1234");
    }
}
