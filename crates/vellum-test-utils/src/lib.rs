//! Backend capability surface and test utilities for Vellum.
//!
//! This crate defines the interface the renderer uses to talk to an
//! immediate-mode graphics context, and a recording mock of it.
//!
//! # Overview
//!
//! The main components are:
//!
//! - [`RenderBackend`] - Trait abstracting backend state mutation and draws
//! - [`FeatureFlag`], [`TextureHandle`], [`BackendErrorCode`] - The vocabulary
//!   of that trait
//! - `MockBackend` - Recording implementation for testing (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use vellum_test_utils::{BackendCall, FeatureFlag, MockBackend, RenderBackend};
//!
//! let mock = MockBackend::new();
//! mock.enable_feature(FeatureFlag::DepthTest);
//!
//! assert_eq!(mock.calls(), vec![BackendCall::EnableFeature(FeatureFlag::DepthTest)]);
//! # }
//! ```
//!
//! # Design Philosophy
//!
//! ## 1. State Mirroring
//!
//! The mock does not only record calls, it also keeps the feature, texture
//! and transform-stack state a real context would hold. Tests can then check
//! that a cache in front of the backend agrees with what the backend holds.
//!
//! ## 2. Interior Mutability
//!
//! Mock implementations use `Mutex` for interior mutability, allowing `&self`
//! methods to record calls.
//!
//! ## 3. Object Safety
//!
//! The `RenderBackend` trait is object-safe (`dyn RenderBackend`), allowing
//! for polymorphic usage with both real and mock backends.

pub mod backend_types;
#[cfg(feature = "mock")]
pub mod mock_backend;
pub mod render_backend;

// Re-export main types at crate root
pub use backend_types::*;
#[cfg(feature = "mock")]
pub use mock_backend::*;
pub use render_backend::*;
