//! Synapse - a permanence-weighted connection from an input source to a segment.
//!
//! A synapse never owns its source; it names it by stable index, either an
//! internal cell or an external input bit. Permanence lives in [0, 1] and
//! saturates at the bounds. Connectivity (`permanence >= connected
//! threshold`) is cached per step by `Segment::process` so activity
//! predicates stay branch-cheap during the pooling passes.

use crate::state::ActivityState;

/// Where a synapse's activity comes from.
///
/// A stable index into the region's cell space or input plane, never an
/// owning handle, so segment and synapse growth can never invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynapseSource {
    /// A cell, by flat region-wide index.
    Cell(usize),
    /// An external input bit, by row-major index.
    Input(usize),
}

/// A single synaptic connection with saturating permanence.
#[derive(Debug, Clone)]
pub struct Synapse {
    source: SynapseSource,
    permanence: f32,
    is_connected: bool,
    was_connected: bool,
}

impl Synapse {
    /// Create a synapse to `source` at `permanence` (clamped to [0, 1]).
    ///
    /// Connectivity flags start false; the owning segment's next `process`
    /// refreshes them.
    pub fn new(source: SynapseSource, permanence: f32) -> Self {
        Self {
            source,
            permanence: permanence.clamp(0.0, 1.0),
            is_connected: false,
            was_connected: false,
        }
    }

    /// The synapse's input source.
    #[inline]
    pub fn source(&self) -> SynapseSource {
        self.source
    }

    /// Current permanence in [0, 1].
    #[inline]
    pub fn permanence(&self) -> f32 {
        self.permanence
    }

    /// Connected at the current step (as of the last `process`)?
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// Connected at the previous step?
    #[inline]
    pub fn was_connected(&self) -> bool {
        self.was_connected
    }

    /// Recompute the connected flag against `threshold`.
    #[inline]
    pub fn refresh_connected(&mut self, threshold: f32) {
        self.is_connected = self.permanence >= threshold;
    }

    /// Shift current connectivity into the previous step and reset.
    #[inline]
    pub fn advance(&mut self) {
        self.was_connected = self.is_connected;
        self.is_connected = false;
    }

    /// Source active now, and (unless `connected_only` is false) connected.
    #[inline]
    pub fn is_active(&self, state: &ActivityState, connected_only: bool) -> bool {
        state.source_active(self.source) && (self.is_connected || !connected_only)
    }

    /// Source active at the previous step, with the previous connectivity.
    #[inline]
    pub fn was_active(&self, state: &ActivityState, connected_only: bool) -> bool {
        state.source_was_active(self.source) && (self.was_connected || !connected_only)
    }

    /// Was this a connected synapse to a then-learning, then-active cell?
    #[inline]
    pub fn was_active_from_learning(&self, state: &ActivityState) -> bool {
        self.was_active(state, true) && state.source_was_learning(self.source)
    }

    /// Reset both connectivity flags; permanence is untouched.
    #[inline]
    pub fn clear_state(&mut self) {
        self.is_connected = false;
        self.was_connected = false;
    }

    /// Raise permanence by `amount`, saturating at 1.0.
    #[inline]
    pub fn increase(&mut self, amount: f32) {
        self.permanence = (self.permanence + amount).min(1.0);
    }

    /// Lower permanence by `amount`, saturating at 0.0.
    #[inline]
    pub fn decrease(&mut self, amount: f32) {
        self.permanence = (self.permanence - amount).max(0.0);
    }
}
