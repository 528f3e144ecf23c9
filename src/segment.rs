//! Segment - an ordered bag of synapses with an activation threshold.
//!
//! Segments come in two roles with one representation: each column owns a
//! single proximal segment whose synapses terminate on input bits, and each
//! cell owns a growable list of distal segments whose synapses terminate on
//! other cells. A distal segment carries a prediction depth `k` in
//! [1, MAX_TIME_STEPS]; `k == 1` marks a sequence segment (it predicts the
//! very next step). Proximal segments never receive a depth and are never
//! sequence segments.
//!
//! `process` refreshes per-synapse connectivity and caches four activity
//! counts for the step; `advance` shifts them into the previous-step
//! fields. Learning decisions in the temporal pooler read only the
//! previous-step counts, so the caches are the mechanism that keeps the
//! three phases order-independent per cell.

use crate::params::{PermanenceParams, MAX_TIME_STEPS};
use crate::state::ActivityState;
use crate::synapse::{Synapse, SynapseSource};

/// An ordered set of synapses with an activation threshold θ.
#[derive(Debug, Clone)]
pub struct Segment {
    synapses: Vec<Synapse>,
    threshold: u32,

    /// Prediction depth in [1, MAX_TIME_STEPS]; 0 until assigned.
    prediction_steps: u8,
    is_sequence: bool,

    n_active_conn: u32,
    n_prev_active_conn: u32,
    n_active_all: u32,
    n_prev_active_all: u32,

    is_active: bool,
    was_active: bool,
}

impl Segment {
    /// Create an empty segment with activation threshold θ.
    pub fn new(threshold: u32) -> Self {
        assert!(threshold >= 1, "threshold must be >= 1");
        Self {
            synapses: Vec::new(),
            threshold,
            prediction_steps: 0,
            is_sequence: false,
            n_active_conn: 0,
            n_prev_active_conn: 0,
            n_active_all: 0,
            n_prev_active_all: 0,
            is_active: false,
            was_active: false,
        }
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline]
    pub fn prediction_steps(&self) -> u8 {
        self.prediction_steps
    }

    /// Does this segment predict activation at the very next step?
    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.is_sequence
    }

    /// Assign the prediction depth, clamped to [1, MAX_TIME_STEPS].
    pub fn set_prediction_steps(&mut self, steps: u8) {
        self.prediction_steps = steps.clamp(1, MAX_TIME_STEPS);
        self.is_sequence = self.prediction_steps == 1;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    pub fn was_active(&self) -> bool {
        self.was_active
    }

    #[inline]
    pub fn n_active_conn(&self) -> u32 {
        self.n_active_conn
    }

    #[inline]
    pub fn n_prev_active_conn(&self) -> u32 {
        self.n_prev_active_conn
    }

    #[inline]
    pub fn n_active_all(&self) -> u32 {
        self.n_active_all
    }

    #[inline]
    pub fn n_prev_active_all(&self) -> u32 {
        self.n_prev_active_all
    }

    #[inline]
    pub fn num_synapses(&self) -> usize {
        self.synapses.len()
    }

    #[inline]
    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    /// Append a synapse, preserving the indices of existing ones.
    pub fn create_synapse(&mut self, source: SynapseSource, permanence: f32) {
        self.synapses.push(Synapse::new(source, permanence));
    }

    /// Is `source` already feeding this segment?
    pub fn has_source(&self, source: SynapseSource) -> bool {
        self.synapses.iter().any(|s| s.source() == source)
    }

    /// Refresh connectivity and the current-step activity counts.
    ///
    /// `is_active` becomes true iff at least θ connected synapses have an
    /// active source; an empty segment is never active.
    pub fn process(&mut self, state: &ActivityState, connected_threshold: f32) {
        let mut n_all = 0u32;
        let mut n_conn = 0u32;

        for syn in self.synapses.iter_mut() {
            syn.refresh_connected(connected_threshold);
            if state.source_active(syn.source()) {
                n_all += 1;
                if syn.is_connected() {
                    n_conn += 1;
                }
            }
        }

        self.n_active_all = n_all;
        self.n_active_conn = n_conn;
        self.is_active = n_conn >= self.threshold;
    }

    /// Shift current-step fields into previous-step fields and reset.
    pub fn advance(&mut self) {
        self.was_active = self.is_active;
        self.n_prev_active_conn = self.n_active_conn;
        self.n_prev_active_all = self.n_active_all;

        self.is_active = false;
        self.n_active_conn = 0;
        self.n_active_all = 0;

        for syn in self.synapses.iter_mut() {
            syn.advance();
        }
    }

    /// Reset all per-step activity; synapses keep their permanences.
    pub fn clear_state(&mut self) {
        self.is_active = false;
        self.was_active = false;
        self.n_active_conn = 0;
        self.n_prev_active_conn = 0;
        self.n_active_all = 0;
        self.n_prev_active_all = 0;
        for syn in self.synapses.iter_mut() {
            syn.clear_state();
        }
    }

    /// Would this segment have been active at the previous step counting
    /// only connected synapses fed by then-learning cells?
    pub fn was_active_from_learning(&self, state: &ActivityState) -> bool {
        let count = self
            .synapses
            .iter()
            .filter(|s| s.was_active_from_learning(state))
            .count() as u32;
        count >= self.threshold
    }

    /// Indices of synapses that were connected and source-active at the
    /// chosen step. This is the capture set frozen into a segment update.
    pub fn active_synapse_indices(&self, previous: bool, state: &ActivityState) -> Vec<usize> {
        self.synapses
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                if previous {
                    s.was_active(state, true)
                } else {
                    s.is_active(state, true)
                }
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply a captured active-set to the permanences.
    ///
    /// Positive reinforcement raises the captured synapses and decays every
    /// other synapse on the segment; negative application lowers the
    /// captured synapses only.
    pub fn adapt_permanences(&mut self, active: &[usize], positive: bool, perm: &PermanenceParams) {
        if positive {
            let mut in_set = vec![false; self.synapses.len()];
            for &i in active {
                debug_assert!(i < self.synapses.len(), "stale synapse index in update");
                in_set[i] = true;
            }
            for (i, syn) in self.synapses.iter_mut().enumerate() {
                if in_set[i] {
                    syn.increase(perm.increment);
                } else {
                    syn.decrease(perm.decrement);
                }
            }
        } else {
            for &i in active {
                debug_assert!(i < self.synapses.len(), "stale synapse index in update");
                self.synapses[i].decrease(perm.decrement);
            }
        }
    }

    /// Uniformly raise (or lower) every synapse by the default amount.
    pub fn update_permanences(&mut self, increase: bool, perm: &PermanenceParams) {
        for syn in self.synapses.iter_mut() {
            if increase {
                syn.increase(perm.increment);
            } else {
                syn.decrease(perm.decrement);
            }
        }
    }

    /// Per-synapse permanence adjustment driven by previous source activity:
    /// reinforce synapses whose source was active, decay the rest.
    pub fn adapt_to_previous_activity(&mut self, state: &ActivityState, perm: &PermanenceParams) {
        for syn in self.synapses.iter_mut() {
            if state.source_was_active(syn.source()) {
                syn.increase(perm.increment);
            } else {
                syn.decrease(perm.decrement);
            }
        }
    }
}
