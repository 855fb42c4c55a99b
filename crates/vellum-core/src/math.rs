/// SIMD-accelerated `glam` types for CPU-side math.
///
/// Transforms handed to the renderer are [`Mat4`] values, diffuse colors and
/// color multipliers are [`Vec4`] values in RGBA order.
///
/// ```
/// use vellum_core::math::{Mat4, Vec3, Vec4};
///
/// let transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
/// let tint = Vec4::new(1.0, 0.5, 0.5, 1.0);
/// assert_eq!(transform.w_axis.z, -5.0);
/// assert_eq!(tint * Vec4::ONE, tint);
/// ```
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for client-side vertex attribute arrays.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so a slice of them has
/// exactly the tightly packed float layout a fixed-function backend expects
/// for its vertex, normal, color and texture coordinate pointers.
///
/// ```
/// use vellum_core::math::PackedVec3;
/// use bytemuck::cast_slice;
///
/// let points = [PackedVec3::new(-1.0, -1.0, 0.0), PackedVec3::new(1.0, -1.0, 0.0)];
/// let floats: &[f32] = cast_slice(&points);
/// assert_eq!(floats.len(), 6);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};
    use static_assertions::assert_eq_size;

    /// A 2D vector, used for texture coordinates.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    /// A 3D vector, used for positions and normals.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    /// A 4D vector, used for RGBA vertex colors.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec4 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub w: f32,
    }

    assert_eq_size!(Vec2, [f32; 2]);
    assert_eq_size!(Vec3, [f32; 3]);
    assert_eq_size!(Vec4, [f32; 4]);

    impl Vec2 {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl Vec3 {
        pub const fn new(x: f32, y: f32, z: f32) -> Self {
            Self { x, y, z }
        }
    }

    impl Vec4 {
        pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
            Self { x, y, z, w }
        }
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self::new(v.x, v.y)
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }

    impl From<glam::Vec4> for Vec4 {
        fn from(v: glam::Vec4) -> Self {
            Self::new(v.x, v.y, v.z, v.w)
        }
    }

    impl From<Vec4> for glam::Vec4 {
        fn from(v: Vec4) -> Self {
            glam::Vec4::new(v.x, v.y, v.z, v.w)
        }
    }
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3, Vec4 as PackedVec4};
