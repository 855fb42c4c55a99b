//! Vellum Render
//!
//! Render-state caching and batched draw submission for immediate-mode
//! graphics backends.
//!
//! Toggling blending, culling, lighting or texturing and binding textures are
//! the expensive calls on a fixed-function backend, even when they change
//! nothing. Given an ordered list of [`TriMeshData`] and a set of
//! [`RenderModifiers`], the [`Renderer`] decides the state each mesh needs,
//! lets the [`StateCache`] forward only the commands that change something,
//! and issues one indexed draw per mesh. [`RenderStats`] counts what was
//! drawn and how many state changes were avoided.
//!
//! The backend is anything implementing
//! [`RenderBackend`](vellum_test_utils::RenderBackend); the recording
//! `MockBackend` from `vellum-test-utils` stands in for a real context in
//! tests.

pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod mesh;
pub mod modifiers;
pub mod renderer;
pub mod state_cache;
pub mod stats;

pub use diagnostics::ErrorCheckMode;
pub use environment::{EnvironmentMapper, SphereMapper};
pub use error::{RenderError, RenderResult};
pub use mesh::TriMeshData;
pub use modifiers::{RenderModifiers, StatusBits};
pub use renderer::{OPAQUE_ALPHA_THRESHOLD, Renderer, RendererDescriptor, needs_blending};
pub use state_cache::{FeatureStates, StateCache, StateChange};
pub use stats::RenderStats;

pub use vellum_test_utils::{BackendErrorCode, FeatureFlag, RenderBackend, TextureHandle};
