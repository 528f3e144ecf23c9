//! Cell - a temporal-context unit owning distal segments and deferred updates.
//!
//! A cell's activity flags live in the region's
//! [`ActivityState`](crate::state::ActivityState) table;
//! what the cell itself owns is structure: a growable list of distal
//! segments and the queue of pending [`SegmentUpdate`]s the temporal pooler
//! builds during a step. Segment selection (previous-active,
//! best-matching) happens here because both read nothing but the cached
//! per-segment counts.

use crate::params::{PermanenceParams, MAX_TIME_STEPS, MIN_SYNAPSES_PER_SEGMENT_THRESHOLD};
use crate::segment::Segment;
use crate::segment_update::SegmentUpdate;
use crate::synapse::SynapseSource;

/// A temporal-context cell: distal segments plus a pending-update queue.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    segments: Vec<Segment>,
    pending: Vec<SegmentUpdate>,
    prediction_steps: u8,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, i: usize) -> &Segment {
        &self.segments[i]
    }

    #[inline]
    pub fn segment_mut(&mut self, i: usize) -> &mut Segment {
        &mut self.segments[i]
    }

    #[inline]
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Pending deferred updates queued this step.
    #[inline]
    pub fn pending(&self) -> &[SegmentUpdate] {
        &self.pending
    }

    /// Prediction depth; meaningful only while the cell is predicting.
    #[inline]
    pub fn prediction_steps(&self) -> u8 {
        self.prediction_steps
    }

    /// Advance every owned segment one time step.
    pub fn advance(&mut self) {
        for seg in self.segments.iter_mut() {
            seg.advance();
        }
    }

    /// Recompute the prediction depth as the minimum over active segments.
    ///
    /// Called when the cell enters the predicting state; starts from
    /// MAX_TIME_STEPS so a lone deep segment still registers.
    pub fn refresh_prediction_steps(&mut self) {
        let mut steps = MAX_TIME_STEPS;
        for seg in self.segments.iter() {
            if seg.is_active() {
                steps = steps.min(seg.prediction_steps());
            }
        }
        self.prediction_steps = steps;
    }

    /// The previously-active segment, preferring sequence segments, then
    /// the highest previous connected-active count, then the lowest index.
    pub fn previous_active_segment(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_seq = false;
        let mut best_count = 0u32;

        for (i, seg) in self.segments.iter().enumerate() {
            if !seg.was_active() {
                continue;
            }
            let seq = seg.is_sequence();
            let count = seg.n_prev_active_conn();
            let better = match best {
                None => true,
                Some(_) => (seq && !best_seq) || (seq == best_seq && count > best_count),
            };
            if better {
                best = Some(i);
                best_seq = seq;
                best_count = count;
            }
        }
        best
    }

    /// Aggressive match: among segments predicting at depth `k`, the one
    /// with the most active synapses counted regardless of connection.
    ///
    /// Permanence may be sub-threshold; all that is required is strictly
    /// more active synapses than [`MIN_SYNAPSES_PER_SEGMENT_THRESHOLD`].
    pub fn best_matching_segment(&self, k: u8, previous: bool) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_count = MIN_SYNAPSES_PER_SEGMENT_THRESHOLD;

        for (i, seg) in self.segments.iter().enumerate() {
            if seg.prediction_steps() != k {
                continue;
            }
            let count = if previous {
                seg.n_prev_active_all()
            } else {
                seg.n_active_all()
            };
            if count > best_count {
                best = Some(i);
                best_count = count;
            }
        }
        best
    }

    /// Enqueue a deferred update.
    pub fn queue_update(&mut self, update: SegmentUpdate) {
        self.pending.push(update);
    }

    /// Apply every queued update and drain the queue.
    ///
    /// Positive application reinforces each update's captured set (decaying
    /// the rest of the segment) and performs any queued growth; negative
    /// application only decays the captured sets. Either way the queue
    /// empties, retaining its capacity for the next step.
    pub fn apply_pending_updates(
        &mut self,
        positive: bool,
        perm: &PermanenceParams,
        threshold: u32,
    ) {
        let mut updates = std::mem::take(&mut self.pending);

        for update in updates.drain(..) {
            if let Some(si) = update.segment() {
                debug_assert!(si < self.segments.len(), "update handle out of range");
                self.segments[si].adapt_permanences(update.active_synapses(), positive, perm);
            }

            if update.add_new_synapses() && positive {
                match update.segment() {
                    Some(si) => {
                        for &cell in update.learning_cells() {
                            self.segments[si]
                                .create_synapse(SynapseSource::Cell(cell), perm.initial);
                        }
                    }
                    None => {
                        // A segment with nothing to connect to could never
                        // activate or learn; grow only when there are
                        // learning cells to attach.
                        if !update.learning_cells().is_empty() {
                            let mut seg = Segment::new(threshold);
                            for &cell in update.learning_cells() {
                                seg.create_synapse(SynapseSource::Cell(cell), perm.initial);
                            }
                            seg.set_prediction_steps(update.prediction_steps());
                            self.segments.push(seg);
                        }
                    }
                }
            }
        }

        self.pending = updates;
    }

    /// Drop queued updates without applying them.
    pub fn discard_pending_updates(&mut self) {
        self.pending.clear();
    }

    /// Reset activity bookkeeping; learned segments survive.
    pub fn clear_state(&mut self) {
        self.pending.clear();
        self.prediction_steps = 0;
        for seg in self.segments.iter_mut() {
            seg.clear_state();
        }
    }
}
