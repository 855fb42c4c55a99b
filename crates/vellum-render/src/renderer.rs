//! Batched draw submission.

use std::marker::PhantomData;

use vellum_core::math::{Mat4, PackedVec2};
use vellum_core::profiling::{profile_function, profile_scope};
use vellum_test_utils::{FeatureFlag, RenderBackend};

use crate::diagnostics::{ErrorCheckMode, check_backend_errors};
use crate::environment::{EnvironmentMapper, SphereMapper};
use crate::error::{RenderError, RenderResult};
use crate::mesh::TriMeshData;
use crate::modifiers::RenderModifiers;
use crate::state_cache::{FeatureStates, StateCache};
use crate::stats::RenderStats;

/// Alpha below which a color source counts as translucent. Absorbs float
/// noise in colors meant to be fully opaque.
pub const OPAQUE_ALPHA_THRESHOLD: f32 = 0.999;

/// Streams every mesh supplies. They are enabled at initialization and never
/// toggled per mesh, whatever the descriptor's initial state says.
const ALWAYS_ENABLED_STREAMS: [FeatureFlag; 2] = [FeatureFlag::VertexArray, FeatureFlag::NormalArray];

/// Descriptor for configuring a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RendererDescriptor {
    /// What to do with errors the backend reports.
    pub error_checks: ErrorCheckMode,
    /// Flag values established on every (re)initialization. The position
    /// and normal streams are always enabled regardless of this value.
    pub initial_state: FeatureStates,
    /// See [`OPAQUE_ALPHA_THRESHOLD`].
    pub opaque_alpha_threshold: f32,
}

impl Default for RendererDescriptor {
    fn default() -> Self {
        Self {
            error_checks: ErrorCheckMode::default(),
            initial_state: FeatureStates::RENDERER_DEFAULTS,
            opaque_alpha_threshold: OPAQUE_ALPHA_THRESHOLD,
        }
    }
}

/// Whether `mesh` must be alpha-blended rather than alpha-tested.
///
/// Blending wins as soon as any alpha source (texture, mesh diffuse color,
/// modifier multiplier) could produce a non-opaque pixel.
#[inline]
pub fn needs_blending(mesh: &TriMeshData, mods: &RenderModifiers, threshold: f32) -> bool {
    mesh.texture_has_transparency
        || mesh.diffuse_color.w < threshold
        || mods.diffuse_color.w < threshold
}

/// Submits triangle meshes to a backend through a [`StateCache`].
///
/// # Lifecycle
///
/// A renderer belongs to one graphics context. Create it once the context
/// exists, and call [`reinitialize`](Self::reinitialize) whenever the
/// platform recreates the context: entry points are only valid for the
/// context they were fetched from, and a new context has default state.
///
/// # Thread Affinity
///
/// The backend context can only be driven from the thread that created it,
/// so `Renderer` is neither `Send` nor `Sync`:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<vellum_render::Renderer<vellum_test_utils::MockBackend>>();
/// ```
///
/// # Example
///
/// ```rust
/// use vellum_render::{Renderer, TriMeshData};
/// use vellum_test_utils::MockBackend;
///
/// let mut renderer = Renderer::new(MockBackend::new()).expect("entry points");
/// let meshes = [TriMeshData::quad(), TriMeshData::triangle()];
///
/// renderer.draw_mesh_list(&meshes, None, None);
///
/// assert_eq!(renderer.stats().meshes_drawn, 2);
/// assert_eq!(renderer.stats().triangles_drawn, 3);
/// ```
pub struct Renderer<B: RenderBackend> {
    backend: B,
    cache: StateCache,
    stats: RenderStats,
    mapper: Box<dyn EnvironmentMapper>,
    descriptor: RendererDescriptor,
    _thread_affine: PhantomData<*const ()>,
}

impl<B: RenderBackend> Renderer<B> {
    /// Create a renderer with the default descriptor and initialize backend state.
    pub fn new(backend: B) -> RenderResult<Self> {
        Self::with_descriptor(backend, RendererDescriptor::default())
    }

    /// Create a renderer and initialize backend state.
    ///
    /// Fails if a required backend entry point is missing; no rendering can
    /// happen on such a context and the caller should abort startup.
    pub fn with_descriptor(backend: B, descriptor: RendererDescriptor) -> RenderResult<Self> {
        let mut renderer = Self {
            backend,
            cache: StateCache::new(),
            stats: RenderStats::default(),
            mapper: Box::new(SphereMapper::new()),
            descriptor,
            _thread_affine: PhantomData,
        };
        renderer.init_state()?;
        Ok(renderer)
    }

    /// Replace the environment mapper used for reflection-mapped draws.
    pub fn with_environment_mapper(mut self, mapper: impl EnvironmentMapper + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    /// Re-fetch entry points and reset backend state after the graphics
    /// context was recreated.
    pub fn reinitialize(&mut self) -> RenderResult<()> {
        self.init_state()
    }

    fn init_state(&mut self) -> RenderResult<()> {
        profile_function!();

        self.backend.load_entry_points().map_err(|missing| {
            tracing::error!("{}", missing);
            RenderError::from(missing)
        })?;

        let mut states = self.descriptor.initial_state;
        for flag in ALWAYS_ENABLED_STREAMS {
            if !states.get(flag) {
                tracing::warn!("Initial state disables {}, enabling it anyway", flag);
                states.set(flag, true);
            }
        }
        self.cache.initialize_all(&self.backend, &states);
        check_backend_errors(
            &self.backend,
            self.descriptor.error_checks,
            &mut self.stats,
            "state initialization",
        );

        tracing::info!(
            "Renderer state initialized ({} flags, error checks: {:?})",
            FeatureFlag::COUNT,
            self.descriptor.error_checks
        );
        Ok(())
    }

    /// Draw `meshes` in order under an optional transform and modifiers.
    ///
    /// The transform is pushed onto the backend's transform stack for the
    /// duration of the call and popped afterwards, even if a backend error
    /// check panics mid-list. Passing `None` for `mods` uses
    /// [`RenderModifiers::DEFAULT`].
    pub fn draw_mesh_list<'m, I>(
        &mut self,
        meshes: I,
        transform: Option<&Mat4>,
        mods: Option<&RenderModifiers>,
    ) where
        I: IntoIterator<Item = &'m TriMeshData>,
    {
        profile_function!();

        let mods = mods.unwrap_or(&RenderModifiers::DEFAULT);
        let env_map = mods.reflection_map();

        let Self {
            backend,
            cache,
            stats,
            mapper,
            descriptor,
            ..
        } = self;
        let backend: &B = backend;

        let scope = transform.map(|matrix| TransformScope::push(backend, matrix));
        let mut submission = Submission {
            backend,
            cache,
            stats,
            mods,
            error_checks: descriptor.error_checks,
            opaque_alpha_threshold: descriptor.opaque_alpha_threshold,
        };

        let mut count = 0usize;
        for mesh in meshes {
            let env_uvs = if env_map {
                profile_scope!("environment_map");
                Some(mapper.compute_reflection_uvs(mesh, transform))
            } else {
                None
            };
            submission.submit(mesh, env_uvs);
            count += 1;
        }

        drop(scope);
        tracing::debug!("Submitted {} meshes", count);
    }

    /// The backend this renderer drives.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the renderer and return its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The state cache, for overlays and assertions.
    pub fn state_cache(&self) -> &StateCache {
        &self.cache
    }

    /// The descriptor this renderer was created with.
    pub fn descriptor(&self) -> &RendererDescriptor {
        &self.descriptor
    }

    /// Current counters.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Current counters, zeroing them (read-then-reset).
    pub fn take_stats(&mut self) -> RenderStats {
        self.stats.take()
    }

    /// Zero the counters without reading them.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

/// Balanced push/pop of the backend transform stack.
struct TransformScope<'a, B: RenderBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: RenderBackend + ?Sized> TransformScope<'a, B> {
    fn push(backend: &'a B, matrix: &Mat4) -> Self {
        backend.push_transform(matrix);
        Self { backend }
    }
}

impl<B: RenderBackend + ?Sized> Drop for TransformScope<'_, B> {
    fn drop(&mut self) {
        self.backend.pop_transform();
    }
}

/// Borrowed renderer state for one `draw_mesh_list` call.
struct Submission<'a, B: RenderBackend + ?Sized> {
    backend: &'a B,
    cache: &'a mut StateCache,
    stats: &'a mut RenderStats,
    mods: &'a RenderModifiers,
    error_checks: ErrorCheckMode,
    opaque_alpha_threshold: f32,
}

impl<B: RenderBackend + ?Sized> Submission<'_, B> {
    #[inline]
    fn set(&mut self, flag: FeatureFlag, value: bool) {
        self.cache.ensure(self.backend, self.stats, flag, value);
    }

    #[inline]
    fn check(&mut self, operation: &'static str) {
        check_backend_errors(self.backend, self.error_checks, self.stats, operation);
    }

    fn submit(&mut self, mesh: &TriMeshData, env_uvs: Option<&[PackedVec2]>) {
        let blend = needs_blending(mesh, self.mods, self.opaque_alpha_threshold);
        self.set(FeatureFlag::Blend, blend);
        self.set(FeatureFlag::AlphaTest, !blend);

        self.set(FeatureFlag::CullFace, !self.mods.keep_back_faces());
        self.set(FeatureFlag::Lighting, !self.mods.null_shader());

        // Position and normal streams stay enabled for the renderer's lifetime.
        self.backend.set_vertex_positions(&mesh.points);
        self.backend.set_vertex_normals(&mesh.vertex_normals);
        self.check("vertex arrays");

        match mesh.texture {
            Some(texture) => {
                self.set(FeatureFlag::Texture2D, true);
                self.set(FeatureFlag::TextureCoordArray, true);
                self.cache
                    .ensure_texture_bound(self.backend, self.stats, texture);

                let uvs = env_uvs
                    .or(mesh.vertex_uvs.as_deref())
                    .unwrap_or_default();
                self.backend.set_texture_coords(uvs);
            }
            None => {
                self.set(FeatureFlag::Texture2D, false);
                self.set(FeatureFlag::TextureCoordArray, false);
            }
        }
        self.check("texture setup");

        match &mesh.vertex_colors {
            Some(colors) => {
                self.set(FeatureFlag::ColorArray, true);
                self.backend.set_vertex_colors(colors);
            }
            None => self.set(FeatureFlag::ColorArray, false),
        }

        let color = mesh.diffuse_color * self.mods.diffuse_color;
        self.backend.set_draw_color(color.to_array());

        self.backend
            .draw_indexed_triangles(&mesh.triangles, mesh.num_points());
        self.check("draw");

        self.stats.record_draw(mesh.num_triangles());
    }
}
