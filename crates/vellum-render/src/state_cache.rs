//! Cached backend state.
//!
//! Toggling a feature or binding a texture on an immediate-mode backend is
//! expensive even when the value does not change. [`StateCache`] remembers
//! what the backend holds and only forwards commands that change something.
//! Commands it swallows are counted in
//! [`RenderStats::batched_state_changes`].
//!
//! The cache is only truthful if it sees every toggle of the flags it
//! manages. Code that calls the backend directly for these flags breaks the
//! mirror silently.

use std::ops::Index;

use vellum_test_utils::{FeatureFlag, RenderBackend, TextureHandle};

use crate::stats::RenderStats;

/// One boolean per [`FeatureFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureStates([bool; FeatureFlag::COUNT]);

impl FeatureStates {
    /// Every flag off.
    pub const ALL_DISABLED: Self = Self([false; FeatureFlag::COUNT]);

    /// State the renderer establishes on a fresh context.
    ///
    /// Position, normal and texture coordinate streams are on, the color
    /// stream is off. Culling, alpha-testing, depth-testing, color-material
    /// and lighting are on; texturing and blending are off.
    pub const RENDERER_DEFAULTS: Self = Self::ALL_DISABLED
        .with(FeatureFlag::VertexArray, true)
        .with(FeatureFlag::NormalArray, true)
        .with(FeatureFlag::ColorArray, false)
        .with(FeatureFlag::TextureCoordArray, true)
        .with(FeatureFlag::CullFace, true)
        .with(FeatureFlag::AlphaTest, true)
        .with(FeatureFlag::DepthTest, true)
        .with(FeatureFlag::ColorMaterial, true)
        .with(FeatureFlag::Texture2D, false)
        .with(FeatureFlag::Blend, false)
        .with(FeatureFlag::Lighting, true);

    /// Return a copy with `flag` set to `value`.
    pub const fn with(mut self, flag: FeatureFlag, value: bool) -> Self {
        self.0[flag.index()] = value;
        self
    }

    #[inline]
    pub const fn get(&self, flag: FeatureFlag) -> bool {
        self.0[flag.index()]
    }

    #[inline]
    pub fn set(&mut self, flag: FeatureFlag, value: bool) {
        self.0[flag.index()] = value;
    }

    /// Iterate over `(flag, value)` pairs in [`FeatureFlag::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureFlag, bool)> + '_ {
        FeatureFlag::ALL.into_iter().map(|flag| (flag, self.get(flag)))
    }
}

impl Default for FeatureStates {
    fn default() -> Self {
        Self::RENDERER_DEFAULTS
    }
}

impl Index<FeatureFlag> for FeatureStates {
    type Output = bool;

    fn index(&self, flag: FeatureFlag) -> &bool {
        &self.0[flag.index()]
    }
}

/// Outcome of a convergence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The backend command was issued.
    Applied,
    /// The backend already matched; nothing was issued.
    Avoided,
}

/// Last-known backend feature flags and bound texture.
#[derive(Debug, Clone)]
pub struct StateCache {
    flags: FeatureStates,
    bound_texture: Option<TextureHandle>,
}

impl StateCache {
    /// Create an empty cache.
    ///
    /// The cache does not describe the backend until
    /// [`initialize_all`](Self::initialize_all) has run.
    pub fn new() -> Self {
        Self {
            flags: FeatureStates::ALL_DISABLED,
            bound_texture: None,
        }
    }

    /// Set `flag` on the backend and in the cache without consulting the
    /// cached value.
    ///
    /// Used when a context is (re)created, because context creation
    /// invalidates whatever the cache believed.
    pub fn initialize<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &B,
        flag: FeatureFlag,
        value: bool,
    ) {
        if value {
            backend.enable_feature(flag);
        } else {
            backend.disable_feature(flag);
        }
        self.flags.set(flag, value);
    }

    /// Initialize every flag from `states` and forget the bound texture.
    ///
    /// A fresh context has no texture bound, so the first bind afterwards is
    /// always issued.
    pub fn initialize_all<B: RenderBackend + ?Sized>(&mut self, backend: &B, states: &FeatureStates) {
        for (flag, value) in states.iter() {
            self.initialize(backend, flag, value);
        }
        self.bound_texture = None;
    }

    /// Make sure `flag` is on.
    #[inline]
    pub fn ensure_enabled<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &B,
        stats: &mut RenderStats,
        flag: FeatureFlag,
    ) -> StateChange {
        self.ensure(backend, stats, flag, true)
    }

    /// Make sure `flag` is off.
    #[inline]
    pub fn ensure_disabled<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &B,
        stats: &mut RenderStats,
        flag: FeatureFlag,
    ) -> StateChange {
        self.ensure(backend, stats, flag, false)
    }

    /// Make sure `flag` has `value`, issuing a command only on a mismatch.
    pub fn ensure<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &B,
        stats: &mut RenderStats,
        flag: FeatureFlag,
        value: bool,
    ) -> StateChange {
        if self.flags.get(flag) == value {
            tracing::trace!("{} already {}", flag, if value { "enabled" } else { "disabled" });
            stats.record_avoided_change();
            return StateChange::Avoided;
        }

        if value {
            tracing::trace!("enable {}", flag);
            backend.enable_feature(flag);
        } else {
            tracing::trace!("disable {}", flag);
            backend.disable_feature(flag);
        }
        self.flags.set(flag, value);
        StateChange::Applied
    }

    /// Make sure `texture` is bound to the active unit.
    pub fn ensure_texture_bound<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &B,
        stats: &mut RenderStats,
        texture: TextureHandle,
    ) -> StateChange {
        if self.bound_texture == Some(texture) {
            tracing::trace!("{} already bound", texture);
            stats.record_avoided_change();
            return StateChange::Avoided;
        }

        tracing::trace!("bind {}", texture);
        backend.bind_texture(texture);
        self.bound_texture = Some(texture);
        StateChange::Applied
    }

    /// Cached value of `flag`.
    #[inline]
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.flags.get(flag)
    }

    /// Cached texture binding.
    #[inline]
    pub fn bound_texture(&self) -> Option<TextureHandle> {
        self.bound_texture
    }

    /// Copy of every cached flag.
    pub fn snapshot(&self) -> FeatureStates {
        self.flags
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_test_utils::MockBackend;

    fn texture(raw: u32) -> TextureHandle {
        TextureHandle::new(raw).unwrap()
    }

    #[test]
    fn test_ensure_enabled_twice_issues_one_command() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();
        let mut stats = RenderStats::default();
        cache.initialize(&mock, FeatureFlag::Blend, false);
        mock.clear_calls();

        let first = cache.ensure_enabled(&mock, &mut stats, FeatureFlag::Blend);
        assert_eq!(first, StateChange::Applied);
        assert_eq!(stats.batched_state_changes, 0);

        let second = cache.ensure_enabled(&mock, &mut stats, FeatureFlag::Blend);
        assert_eq!(second, StateChange::Avoided);
        assert_eq!(stats.batched_state_changes, 1);

        assert_eq!(mock.count_enables(FeatureFlag::Blend), 1);
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_ensure_disabled_twice_issues_one_command() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();
        let mut stats = RenderStats::default();
        cache.initialize(&mock, FeatureFlag::Lighting, true);
        mock.clear_calls();

        let first = cache.ensure_disabled(&mock, &mut stats, FeatureFlag::Lighting);
        assert_eq!(first, StateChange::Applied);
        assert_eq!(stats.batched_state_changes, 0);

        let second = cache.ensure_disabled(&mock, &mut stats, FeatureFlag::Lighting);
        assert_eq!(second, StateChange::Avoided);
        assert_eq!(stats.batched_state_changes, 1);

        assert_eq!(mock.count_disables(FeatureFlag::Lighting), 1);
        assert_eq!(mock.call_count(), 1);
        assert!(!mock.is_enabled(FeatureFlag::Lighting));
    }

    #[test]
    fn test_initialize_ignores_cached_value() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();

        cache.initialize(&mock, FeatureFlag::Lighting, true);
        cache.initialize(&mock, FeatureFlag::Lighting, true);

        assert_eq!(mock.count_enables(FeatureFlag::Lighting), 2);
        assert!(cache.is_enabled(FeatureFlag::Lighting));
    }

    #[test]
    fn test_initialize_all_matches_backend() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();

        cache.initialize_all(&mock, &FeatureStates::RENDERER_DEFAULTS);

        assert_eq!(mock.count_state_changes(), FeatureFlag::COUNT);
        for (flag, value) in FeatureStates::RENDERER_DEFAULTS.iter() {
            assert_eq!(mock.is_enabled(flag), value, "{flag}");
            assert_eq!(cache.is_enabled(flag), value, "{flag}");
        }
        assert_eq!(cache.bound_texture(), None);
    }

    #[test]
    fn test_cache_mirrors_backend_after_mixed_sequence() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();
        let mut stats = RenderStats::default();
        cache.initialize_all(&mock, &FeatureStates::ALL_DISABLED);

        // Walk every flag through a fixed on/off pattern of different periods.
        for step in 0..40usize {
            for flag in FeatureFlag::ALL {
                let value = (step / (flag.index() + 1)) % 2 == 0;
                cache.ensure(&mock, &mut stats, flag, value);
            }
            cache.ensure_texture_bound(&mock, &mut stats, texture(1 + (step % 3) as u32));
        }

        for flag in FeatureFlag::ALL {
            assert_eq!(cache.is_enabled(flag), mock.is_enabled(flag), "{flag}");
            let last = (39 / (flag.index() + 1)) % 2 == 0;
            assert_eq!(cache.is_enabled(flag), last, "{flag}");
        }
        assert_eq!(cache.bound_texture(), mock.bound_texture());
        assert_eq!(cache.bound_texture(), Some(texture(1 + (39 % 3) as u32)));
    }

    #[test]
    fn test_texture_bind_avoided_for_same_handle() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();
        let mut stats = RenderStats::default();

        assert_eq!(
            cache.ensure_texture_bound(&mock, &mut stats, texture(4)),
            StateChange::Applied
        );
        assert_eq!(
            cache.ensure_texture_bound(&mock, &mut stats, texture(4)),
            StateChange::Avoided
        );
        assert_eq!(
            cache.ensure_texture_bound(&mock, &mut stats, texture(5)),
            StateChange::Applied
        );

        assert_eq!(mock.count_texture_binds(), 2);
        assert_eq!(stats.batched_state_changes, 1);
    }

    #[test]
    fn test_reinitialize_forgets_bound_texture() {
        let mock = MockBackend::new();
        let mut cache = StateCache::new();
        let mut stats = RenderStats::default();

        cache.ensure_texture_bound(&mock, &mut stats, texture(9));
        cache.initialize_all(&mock, &FeatureStates::RENDERER_DEFAULTS);
        cache.ensure_texture_bound(&mock, &mut stats, texture(9));

        assert_eq!(mock.count_texture_binds(), 2);
    }

    #[test]
    fn test_feature_states_index_and_with() {
        let states = FeatureStates::ALL_DISABLED.with(FeatureFlag::DepthTest, true);

        assert!(states[FeatureFlag::DepthTest]);
        assert!(!states[FeatureFlag::Blend]);
        assert_eq!(states.iter().filter(|(_, on)| *on).count(), 1);
    }
}
