//! Per-frame render statistics for the diagnostics overlay.

use std::fmt;

/// Counters accumulated by the renderer.
///
/// Counters only ever grow; the frame loop reads them with
/// [`Renderer::take_stats`](crate::Renderer::take_stats), which also zeroes
/// them. If the overlay lives on another thread, the caller hands it the
/// snapshot, never the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// State changes the cache absorbed because the backend already matched.
    pub batched_state_changes: u64,
    /// Triangles submitted in draw commands.
    pub triangles_drawn: u64,
    /// Meshes submitted in draw commands.
    pub meshes_drawn: u64,
    /// Backend errors observed by the error checks.
    pub backend_errors: u64,
}

impl RenderStats {
    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Return the current counters and zero them.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    #[inline]
    pub(crate) fn record_avoided_change(&mut self) {
        self.batched_state_changes += 1;
    }

    #[inline]
    pub(crate) fn record_draw(&mut self, triangles: usize) {
        self.triangles_drawn += triangles as u64;
        self.meshes_drawn += 1;
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meshes: {}  tris: {}  batched: {}",
            self.meshes_drawn, self.triangles_drawn, self.batched_state_changes
        )?;
        if self.backend_errors > 0 {
            write!(f, "  errors: {}", self.backend_errors)?;
        }
        Ok(())
    }
}
