//! Trait abstracting the immediate-mode graphics backend.
//!
//! The renderer only ever talks to the backend through [`RenderBackend`], so
//! it can run against a real context or against the recording mock.

use crate::backend_types::{BackendErrorCode, FeatureFlag, MissingEntryPoint, TextureHandle};
use vellum_core::math::{Mat4, PackedVec2, PackedVec3, PackedVec4};

/// State-mutation capability of a fixed-function graphics context.
///
/// # Thread Affinity
///
/// Unlike a GPU resource factory, an immediate-mode context is bound to the
/// thread that created it. The trait therefore has no `Send`/`Sync`
/// supertraits, and the renderer that drives it is itself `!Send`.
///
/// # Borrow Checking Pattern
///
/// Methods take `&self`. The context's state lives on the driver side, and
/// mock implementations use interior mutability to record calls. This lets
/// the renderer keep a shared borrow of the backend alive (for example in a
/// transform scope) while it issues further commands.
///
/// # Caching Contract
///
/// Every toggle of a [`FeatureFlag`] and every texture bind must go through
/// the renderer's state cache. Calling [`enable_feature`](Self::enable_feature),
/// [`disable_feature`](Self::disable_feature) or
/// [`bind_texture`](Self::bind_texture) directly desynchronizes the cache and
/// produces wrong-looking frames without any error.
///
/// # Example
///
/// ```rust,no_run
/// use vellum_test_utils::{FeatureFlag, RenderBackend};
///
/// fn draw_unlit(backend: &dyn RenderBackend) {
///     backend.disable_feature(FeatureFlag::Lighting);
///     if let Some(code) = backend.poll_error() {
///         eprintln!("backend error: {code}");
///     }
/// }
/// ```
pub trait RenderBackend {
    // Context lifecycle

    /// Resolve entry points that must be fetched per context.
    ///
    /// Called on every (re)initialization; a missing entry point is fatal.
    fn load_entry_points(&self) -> Result<(), MissingEntryPoint>;

    // Feature toggles

    /// Turn a feature or client-side stream on.
    fn enable_feature(&self, flag: FeatureFlag);

    /// Turn a feature or client-side stream off.
    fn disable_feature(&self, flag: FeatureFlag);

    /// Bind a texture to the active texture unit.
    fn bind_texture(&self, texture: TextureHandle);

    // Client-side arrays

    fn set_vertex_positions(&self, positions: &[PackedVec3]);

    fn set_vertex_normals(&self, normals: &[PackedVec3]);

    fn set_vertex_colors(&self, colors: &[PackedVec4]);

    fn set_texture_coords(&self, uvs: &[PackedVec2]);

    // Drawing

    /// Set the uniform color used for the next draws (RGBA).
    fn set_draw_color(&self, color: [f32; 4]);

    /// Draw indexed triangles whose indices all fall in `0..vertex_count`.
    fn draw_indexed_triangles(&self, triangles: &[[u16; 3]], vertex_count: usize);

    // Transform stack

    /// Push the current transform and left-multiply it by `matrix`.
    fn push_transform(&self, matrix: &Mat4);

    /// Restore the transform saved by the matching push.
    fn pop_transform(&self);

    // Diagnostics

    /// Fetch and clear the oldest pending error, if any.
    fn poll_error(&self) -> Option<BackendErrorCode>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for &B {
    fn load_entry_points(&self) -> Result<(), MissingEntryPoint> {
        (**self).load_entry_points()
    }

    fn enable_feature(&self, flag: FeatureFlag) {
        (**self).enable_feature(flag)
    }

    fn disable_feature(&self, flag: FeatureFlag) {
        (**self).disable_feature(flag)
    }

    fn bind_texture(&self, texture: TextureHandle) {
        (**self).bind_texture(texture)
    }

    fn set_vertex_positions(&self, positions: &[PackedVec3]) {
        (**self).set_vertex_positions(positions)
    }

    fn set_vertex_normals(&self, normals: &[PackedVec3]) {
        (**self).set_vertex_normals(normals)
    }

    fn set_vertex_colors(&self, colors: &[PackedVec4]) {
        (**self).set_vertex_colors(colors)
    }

    fn set_texture_coords(&self, uvs: &[PackedVec2]) {
        (**self).set_texture_coords(uvs)
    }

    fn set_draw_color(&self, color: [f32; 4]) {
        (**self).set_draw_color(color)
    }

    fn draw_indexed_triangles(&self, triangles: &[[u16; 3]], vertex_count: usize) {
        (**self).draw_indexed_triangles(triangles, vertex_count)
    }

    fn push_transform(&self, matrix: &Mat4) {
        (**self).push_transform(matrix)
    }

    fn pop_transform(&self) {
        (**self).pop_transform()
    }

    fn poll_error(&self) -> Option<BackendErrorCode> {
        (**self).poll_error()
    }
}
