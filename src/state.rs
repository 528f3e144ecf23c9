//! Region-wide activity tables.
//!
//! Cell activity flags and the input buffers live in packed bitsets owned
//! by the region rather than on the cell objects themselves. Synapses name
//! their sources by stable index ([`SynapseSource`]), so answering "was
//! this source active?" is a bitset probe here instead of a pointer chase
//! through the column graph. That keeps every step deterministic and the
//! phase passes free of aliasing between the structural arrays (columns,
//! cells, segments) and the state they read.
//!
//! # Time advance
//!
//! [`ActivityState::advance`] shifts every current flag into its
//! previous-step twin and clears the current set. The input snapshot is
//! taken at the same moment: the caller presents a frame with
//! `Region::set_input` *before* `run_once`, so after the shift both the
//! current and previous views of an input bit report the freshly presented
//! frame. Internal cell flags genuinely lag one step, which is what distal
//! learning consumes.

use crate::synapse::SynapseSource;
use bitvec::prelude::*;

type Bits = BitVec<u32, Lsb0>;

/// Structure-of-arrays activity flags for every cell plus the input plane.
#[derive(Clone, Debug)]
pub struct ActivityState {
    num_cells: usize,
    num_inputs: usize,

    active: Bits,
    was_active: Bits,
    learning: Bits,
    was_learning: Bits,
    predicting: Bits,
    was_predicted: Bits,

    input: Bits,
    prev_input: Bits,
}

impl ActivityState {
    /// Create a zeroed table for `num_cells` cells and `num_inputs` input bits.
    pub fn new(num_cells: usize, num_inputs: usize) -> Self {
        Self {
            num_cells,
            num_inputs,
            active: BitVec::repeat(false, num_cells),
            was_active: BitVec::repeat(false, num_cells),
            learning: BitVec::repeat(false, num_cells),
            was_learning: BitVec::repeat(false, num_cells),
            predicting: BitVec::repeat(false, num_cells),
            was_predicted: BitVec::repeat(false, num_cells),
            input: BitVec::repeat(false, num_inputs),
            prev_input: BitVec::repeat(false, num_inputs),
        }
    }

    /// Number of cells tracked.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Number of input bits tracked.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Shift current flags into previous flags and reset the current step.
    pub fn advance(&mut self) {
        self.was_active.clone_from(&self.active);
        self.was_learning.clone_from(&self.learning);
        self.was_predicted.clone_from(&self.predicting);
        self.prev_input.clone_from(&self.input);

        self.active.fill(false);
        self.learning.fill(false);
        self.predicting.fill(false);
    }

    /// Reset every flag and both input buffers.
    pub fn clear(&mut self) {
        self.active.fill(false);
        self.was_active.fill(false);
        self.learning.fill(false);
        self.was_learning.fill(false);
        self.predicting.fill(false);
        self.was_predicted.fill(false);
        self.input.fill(false);
        self.prev_input.fill(false);
    }

    // =========================================================================
    // Cell flags
    // =========================================================================

    #[inline]
    pub fn cell_active(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.active[cell]
    }

    #[inline]
    pub fn cell_was_active(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.was_active[cell]
    }

    #[inline]
    pub fn cell_learning(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.learning[cell]
    }

    #[inline]
    pub fn cell_was_learning(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.was_learning[cell]
    }

    #[inline]
    pub fn cell_predicting(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.predicting[cell]
    }

    #[inline]
    pub fn cell_was_predicted(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        self.was_predicted[cell]
    }

    #[inline]
    pub fn set_cell_active(&mut self, cell: usize) {
        debug_assert!(cell < self.num_cells);
        self.active.set(cell, true);
    }

    #[inline]
    pub fn set_cell_learning(&mut self, cell: usize) {
        debug_assert!(cell < self.num_cells);
        self.learning.set(cell, true);
    }

    #[inline]
    pub fn set_cell_predicting(&mut self, cell: usize) {
        debug_assert!(cell < self.num_cells);
        self.predicting.set(cell, true);
    }

    // =========================================================================
    // Input plane
    // =========================================================================

    #[inline]
    pub fn input_bit(&self, i: usize) -> bool {
        debug_assert!(i < self.num_inputs);
        self.input[i]
    }

    #[inline]
    pub fn set_input_bit(&mut self, i: usize, on: bool) {
        debug_assert!(i < self.num_inputs);
        self.input.set(i, on);
    }

    /// Overwrite the whole input plane.
    pub fn load_input(&mut self, bits: &[bool]) {
        debug_assert_eq!(bits.len(), self.num_inputs);
        for (i, &b) in bits.iter().enumerate() {
            self.input.set(i, b);
        }
    }

    // =========================================================================
    // Source queries (synapse side)
    // =========================================================================

    /// Is the synapse source active at the current step?
    #[inline]
    pub fn source_active(&self, source: SynapseSource) -> bool {
        match source {
            SynapseSource::Cell(id) => self.cell_active(id),
            SynapseSource::Input(i) => self.input_bit(i),
        }
    }

    /// Was the synapse source active at the previous step?
    #[inline]
    pub fn source_was_active(&self, source: SynapseSource) -> bool {
        match source {
            SynapseSource::Cell(id) => self.cell_was_active(id),
            SynapseSource::Input(i) => {
                debug_assert!(i < self.num_inputs);
                self.prev_input[i]
            }
        }
    }

    /// Was the synapse source a learning cell at the previous step?
    ///
    /// Input bits never learn.
    #[inline]
    pub fn source_was_learning(&self, source: SynapseSource) -> bool {
        match source {
            SynapseSource::Cell(id) => self.cell_was_learning(id),
            SynapseSource::Input(_) => false,
        }
    }
}
