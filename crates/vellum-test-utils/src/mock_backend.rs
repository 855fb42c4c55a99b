//! Mock implementation of RenderBackend for testing.
//!
//! This module provides a fake backend that records every command and keeps
//! its own copy of the state a real context would hold, without touching a
//! graphics driver.

use std::collections::VecDeque;

use crate::{backend_types::*, render_backend::RenderBackend};
use parking_lot::Mutex;
use vellum_core::math::{Mat4, PackedVec2, PackedVec3, PackedVec4};

/// Records a backend command for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    LoadEntryPoints,
    EnableFeature(FeatureFlag),
    DisableFeature(FeatureFlag),
    BindTexture(TextureHandle),
    SetVertexPositions { count: usize },
    SetVertexNormals { count: usize },
    SetVertexColors { count: usize },
    SetTextureCoords { uvs: Vec<PackedVec2> },
    SetDrawColor([f32; 4]),
    DrawIndexedTriangles {
        triangle_count: usize,
        vertex_count: usize,
    },
    PushTransform(Mat4),
    PopTransform,
}

impl BackendCall {
    /// Whether this command changes cached state (feature toggle or bind).
    pub fn is_state_change(&self) -> bool {
        matches!(
            self,
            BackendCall::EnableFeature(_)
                | BackendCall::DisableFeature(_)
                | BackendCall::BindTexture(_)
        )
    }
}

/// Driver-side state the mock keeps in step with the commands it receives.
#[derive(Debug, Default)]
struct MockState {
    features: [bool; FeatureFlag::COUNT],
    bound_texture: Option<TextureHandle>,
    transform_depth: usize,
    max_transform_depth: usize,
}

/// Mock implementation of RenderBackend for testing.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Backend methods take `&self` but need to record calls, so everything sits
/// behind `parking_lot::Mutex`. `parking_lot` locks do not poison, which
/// keeps the mock inspectable after a test deliberately panics mid-draw.
///
/// # Example
///
/// ```rust
/// use vellum_test_utils::{FeatureFlag, MockBackend, RenderBackend};
///
/// let mock = MockBackend::new();
/// mock.enable_feature(FeatureFlag::Blend);
///
/// assert!(mock.is_enabled(FeatureFlag::Blend));
/// assert_eq!(mock.count_enables(FeatureFlag::Blend), 1);
/// ```
pub struct MockBackend {
    /// Recorded calls for verification
    calls: Mutex<Vec<BackendCall>>,

    /// What a real context would currently hold
    state: Mutex<MockState>,

    /// Errors handed out by `poll_error`, oldest first
    pending_errors: Mutex<VecDeque<BackendErrorCode>>,

    /// Entry point reported as unavailable by `load_entry_points`
    missing_entry_point: Option<&'static str>,
}

impl MockBackend {
    /// Create a new mock backend with every feature off and nothing bound.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(MockState::default()),
            pending_errors: Mutex::new(VecDeque::new()),
            missing_entry_point: None,
        }
    }

    /// Create a mock whose context lacks the named entry point.
    pub fn with_missing_entry_point(name: &'static str) -> Self {
        Self {
            missing_entry_point: Some(name),
            ..Self::new()
        }
    }

    /// Queue an error for the next `poll_error`.
    pub fn inject_error(&self, code: BackendErrorCode) {
        self.pending_errors.lock().push_back(code);
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls (useful between test steps). State is kept.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Count enable commands for `flag`.
    pub fn count_enables(&self, flag: FeatureFlag) -> usize {
        self.count(|call| *call == BackendCall::EnableFeature(flag))
    }

    /// Count disable commands for `flag`.
    pub fn count_disables(&self, flag: FeatureFlag) -> usize {
        self.count(|call| *call == BackendCall::DisableFeature(flag))
    }

    /// Count texture bind commands.
    pub fn count_texture_binds(&self) -> usize {
        self.count(|call| matches!(call, BackendCall::BindTexture(_)))
    }

    /// Count draw commands.
    pub fn count_draws(&self) -> usize {
        self.count(|call| matches!(call, BackendCall::DrawIndexedTriangles { .. }))
    }

    /// Count feature toggles and texture binds.
    pub fn count_state_changes(&self) -> usize {
        self.count(BackendCall::is_state_change)
    }

    /// Draw colors in submission order.
    pub fn draw_colors(&self) -> Vec<[f32; 4]> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetDrawColor(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Current backend-side value of `flag`.
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.state.lock().features[flag.index()]
    }

    /// Texture currently bound on the backend side.
    pub fn bound_texture(&self) -> Option<TextureHandle> {
        self.state.lock().bound_texture
    }

    /// Current transform stack depth.
    pub fn transform_depth(&self) -> usize {
        self.state.lock().transform_depth
    }

    /// Deepest the transform stack has been.
    pub fn max_transform_depth(&self) -> usize {
        self.state.lock().max_transform_depth
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().push(call);
    }

    fn set_feature(&self, flag: FeatureFlag, value: bool) {
        self.state.lock().features[flag.index()] = value;
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockBackend {
    fn load_entry_points(&self) -> Result<(), MissingEntryPoint> {
        self.record(BackendCall::LoadEntryPoints);
        match self.missing_entry_point {
            Some(name) => Err(MissingEntryPoint { name }),
            None => Ok(()),
        }
    }

    fn enable_feature(&self, flag: FeatureFlag) {
        self.set_feature(flag, true);
        self.record(BackendCall::EnableFeature(flag));
    }

    fn disable_feature(&self, flag: FeatureFlag) {
        self.set_feature(flag, false);
        self.record(BackendCall::DisableFeature(flag));
    }

    fn bind_texture(&self, texture: TextureHandle) {
        self.state.lock().bound_texture = Some(texture);
        self.record(BackendCall::BindTexture(texture));
    }

    fn set_vertex_positions(&self, positions: &[PackedVec3]) {
        self.record(BackendCall::SetVertexPositions {
            count: positions.len(),
        });
    }

    fn set_vertex_normals(&self, normals: &[PackedVec3]) {
        self.record(BackendCall::SetVertexNormals {
            count: normals.len(),
        });
    }

    fn set_vertex_colors(&self, colors: &[PackedVec4]) {
        self.record(BackendCall::SetVertexColors {
            count: colors.len(),
        });
    }

    fn set_texture_coords(&self, uvs: &[PackedVec2]) {
        self.record(BackendCall::SetTextureCoords { uvs: uvs.to_vec() });
    }

    fn set_draw_color(&self, color: [f32; 4]) {
        self.record(BackendCall::SetDrawColor(color));
    }

    fn draw_indexed_triangles(&self, triangles: &[[u16; 3]], vertex_count: usize) {
        self.record(BackendCall::DrawIndexedTriangles {
            triangle_count: triangles.len(),
            vertex_count,
        });
    }

    fn push_transform(&self, matrix: &Mat4) {
        {
            let mut state = self.state.lock();
            state.transform_depth += 1;
            state.max_transform_depth = state.max_transform_depth.max(state.transform_depth);
        }
        self.record(BackendCall::PushTransform(*matrix));
    }

    fn pop_transform(&self) {
        let underflow = {
            let mut state = self.state.lock();
            match state.transform_depth.checked_sub(1) {
                Some(depth) => {
                    state.transform_depth = depth;
                    false
                }
                None => true,
            }
        };
        if underflow {
            self.inject_error(BackendErrorCode::STACK_UNDERFLOW);
        }
        self.record(BackendCall::PopTransform);
    }

    fn poll_error(&self) -> Option<BackendErrorCode> {
        self.pending_errors.lock().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tracks_feature_state() {
        let mock = MockBackend::new();

        mock.enable_feature(FeatureFlag::CullFace);
        assert!(mock.is_enabled(FeatureFlag::CullFace));

        mock.disable_feature(FeatureFlag::CullFace);
        assert!(!mock.is_enabled(FeatureFlag::CullFace));
        assert_eq!(mock.count_state_changes(), 2);
    }

    #[test]
    fn test_mock_transform_depth() {
        let mock = MockBackend::new();

        mock.push_transform(&Mat4::IDENTITY);
        mock.push_transform(&Mat4::IDENTITY);
        mock.pop_transform();

        assert_eq!(mock.transform_depth(), 1);
        assert_eq!(mock.max_transform_depth(), 2);
    }

    #[test]
    fn test_mock_pop_underflow_reports_error() {
        let mock = MockBackend::new();

        mock.pop_transform();

        assert_eq!(mock.transform_depth(), 0);
        assert_eq!(mock.poll_error(), Some(BackendErrorCode::STACK_UNDERFLOW));
        assert_eq!(mock.poll_error(), None);
    }

    #[test]
    fn test_mock_missing_entry_point() {
        let mock = MockBackend::with_missing_entry_point("glDrawRangeElements");

        let err = mock.load_entry_points().unwrap_err();
        assert_eq!(err.name, "glDrawRangeElements");
    }

    #[test]
    fn test_clear_calls_keeps_state() {
        let mock = MockBackend::new();
        let texture = TextureHandle::new(3).unwrap();

        mock.bind_texture(texture);
        assert_eq!(mock.call_count(), 1);

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
        assert_eq!(mock.bound_texture(), Some(texture));
    }
}
