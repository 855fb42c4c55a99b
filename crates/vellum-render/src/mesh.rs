//! Triangle mesh records handed to the renderer.

use vellum_core::math::{PackedVec2, PackedVec3, PackedVec4, Vec4};
use vellum_test_utils::TextureHandle;

/// A triangle mesh primitive owned by the asset layer.
///
/// The renderer only reads it. Index bounds are the asset layer's job: every
/// index must be below `points.len()`, and `vertex_normals`, `vertex_colors`
/// and `vertex_uvs` must have one entry per point.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMeshData {
    pub points: Vec<PackedVec3>,
    pub vertex_normals: Vec<PackedVec3>,
    pub vertex_colors: Option<Vec<PackedVec4>>,
    pub vertex_uvs: Option<Vec<PackedVec2>>,
    pub triangles: Vec<[u16; 3]>,
    /// RGBA diffuse color.
    pub diffuse_color: Vec4,
    pub texture: Option<TextureHandle>,
    /// The bound texture has an alpha channel that is not fully opaque.
    pub texture_has_transparency: bool,
}

impl TriMeshData {
    /// An untextured, opaque white mesh.
    pub fn new(points: Vec<PackedVec3>, vertex_normals: Vec<PackedVec3>, triangles: Vec<[u16; 3]>) -> Self {
        Self {
            points,
            vertex_normals,
            vertex_colors: None,
            vertex_uvs: None,
            triangles,
            diffuse_color: Vec4::ONE,
            texture: None,
            texture_has_transparency: false,
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle, uvs: Vec<PackedVec2>) -> Self {
        self.texture = Some(texture);
        self.vertex_uvs = Some(uvs);
        self
    }

    pub fn with_vertex_colors(mut self, colors: Vec<PackedVec4>) -> Self {
        self.vertex_colors = Some(colors);
        self
    }

    pub fn with_diffuse_color(mut self, color: Vec4) -> Self {
        self.diffuse_color = color;
        self
    }

    pub fn with_texture_transparency(mut self, transparent: bool) -> Self {
        self.texture_has_transparency = transparent;
        self
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    #[inline]
    pub fn has_vertex_colors(&self) -> bool {
        self.vertex_colors.is_some()
    }

    /// A one-triangle mesh in the XY plane, facing +Z.
    pub fn triangle() -> Self {
        let normal = PackedVec3::new(0.0, 0.0, 1.0);
        Self::new(
            vec![
                PackedVec3::new(-1.0, -1.0, 0.0),
                PackedVec3::new(1.0, -1.0, 0.0),
                PackedVec3::new(0.0, 1.0, 0.0),
            ],
            vec![normal; 3],
            vec![[0, 1, 2]],
        )
    }

    /// A two-triangle unit quad in the XY plane, facing +Z.
    pub fn quad() -> Self {
        let normal = PackedVec3::new(0.0, 0.0, 1.0);
        Self::new(
            vec![
                PackedVec3::new(-0.5, -0.5, 0.0),
                PackedVec3::new(0.5, -0.5, 0.0),
                PackedVec3::new(0.5, 0.5, 0.0),
                PackedVec3::new(-0.5, 0.5, 0.0),
            ],
            vec![normal; 4],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_counts() {
        let quad = TriMeshData::quad();

        assert_eq!(quad.num_points(), 4);
        assert_eq!(quad.num_triangles(), 2);
        assert!(!quad.has_texture());
        assert!(!quad.has_vertex_colors());
    }

    #[test]
    fn test_with_texture_sets_uvs() {
        let texture = TextureHandle::new(2).unwrap();
        let mesh = TriMeshData::triangle().with_texture(texture, vec![PackedVec2::default(); 3]);

        assert!(mesh.has_texture());
        assert_eq!(mesh.vertex_uvs.as_ref().map(Vec::len), Some(3));
    }
}
