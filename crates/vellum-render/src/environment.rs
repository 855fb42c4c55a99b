//! Environment (reflection) mapping.
//!
//! When a draw list asks for [`StatusBits::REFLECTION_MAP`](crate::StatusBits),
//! the renderer asks an [`EnvironmentMapper`] for substitute texture
//! coordinates before it makes any state decision for the mesh. The
//! substitute coordinates only live for that one draw.

use vellum_core::math::{Mat3, Mat4, PackedVec2, Vec3};

use crate::mesh::TriMeshData;

/// Computes per-vertex reflection texture coordinates.
pub trait EnvironmentMapper {
    /// Coordinates for `mesh` drawn under `transform`, one per point.
    ///
    /// The slice borrows the mapper's scratch storage and is only valid until
    /// the next call.
    fn compute_reflection_uvs(&mut self, mesh: &TriMeshData, transform: Option<&Mat4>) -> &[PackedVec2];
}

/// Sphere mapping from vertex normals.
///
/// Normals are brought into the transform's space (inverse-transpose of its
/// upper 3x3), then `u = 0.5 + n.x / 2`, `v = 0.5 - n.y / 2`. The scratch
/// buffer is reused across calls, so steady-state mapping does not allocate.
#[derive(Debug, Default)]
pub struct SphereMapper {
    uvs: Vec<PackedVec2>,
}

impl SphereMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

fn normal_matrix(transform: Option<&Mat4>) -> Mat3 {
    let Some(transform) = transform else {
        return Mat3::IDENTITY;
    };
    let linear = Mat3::from_mat4(*transform);
    if linear.determinant().abs() <= f32::EPSILON {
        // Degenerate (flattening) transform; the direction is still usable.
        return linear;
    }
    linear.inverse().transpose()
}

impl EnvironmentMapper for SphereMapper {
    fn compute_reflection_uvs(&mut self, mesh: &TriMeshData, transform: Option<&Mat4>) -> &[PackedVec2] {
        let normals = normal_matrix(transform);

        self.uvs.clear();
        self.uvs.extend(mesh.vertex_normals.iter().map(|normal| {
            let n = (normals * Vec3::from(*normal)).normalize_or_zero();
            PackedVec2::new(0.5 + 0.5 * n.x, 0.5 - 0.5 * n.y)
        }));
        &self.uvs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::math::{PackedVec3, Quat};

    fn assert_uv(uv: PackedVec2, u: f32, v: f32) {
        assert!((uv.x - u).abs() < 1e-5, "u = {} (expected {})", uv.x, u);
        assert!((uv.y - v).abs() < 1e-5, "v = {} (expected {})", uv.y, v);
    }

    #[test]
    fn test_facing_normal_maps_to_center() {
        let mut mapper = SphereMapper::new();
        let mesh = TriMeshData::triangle();

        let uvs = mapper.compute_reflection_uvs(&mesh, None);

        assert_eq!(uvs.len(), mesh.num_points());
        for uv in uvs {
            assert_uv(*uv, 0.5, 0.5);
        }
    }

    #[test]
    fn test_transform_rotates_normals() {
        let mut mapper = SphereMapper::new();
        let mut mesh = TriMeshData::triangle();
        mesh.vertex_normals = vec![PackedVec3::new(0.0, 0.0, 1.0); 3];
        // Rotate +Z onto +X.
        let transform = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        let uvs = mapper.compute_reflection_uvs(&mesh, Some(&transform));

        assert_uv(uvs[0], 1.0, 0.5);
    }

    #[test]
    fn test_uniform_scale_does_not_change_uvs() {
        let mut mapper = SphereMapper::new();
        let mut mesh = TriMeshData::triangle();
        mesh.vertex_normals = vec![PackedVec3::new(0.0, 1.0, 0.0); 3];

        let uvs = mapper
            .compute_reflection_uvs(&mesh, Some(&Mat4::from_scale(Vec3::splat(4.0))))
            .to_vec();

        assert_uv(uvs[1], 0.5, 0.0);
    }

    #[test]
    fn test_scratch_is_resized_per_mesh() {
        let mut mapper = SphereMapper::new();

        assert_eq!(mapper.compute_reflection_uvs(&TriMeshData::quad(), None).len(), 4);
        assert_eq!(mapper.compute_reflection_uvs(&TriMeshData::triangle(), None).len(), 3);
    }
}
