//! Column - a unit of spatial competition.
//!
//! A column owns a fixed array of temporal-context cells and exactly one
//! proximal segment whose synapses terminate on input bits. The spatial
//! pooler scores columns by boosted proximal overlap, inhibits them
//! against their neighbors, and tracks two duty-cycle moving averages that
//! drive boosting for starved columns.

use crate::cell::Cell;
use crate::params::{PermanenceParams, EMA_ALPHA, STARVATION_BOOST_FACTOR};
use crate::segment::Segment;
use crate::state::ActivityState;

/// A spatial-competition column: cells, one proximal segment, boost state.
#[derive(Debug, Clone)]
pub struct Column {
    cells: Vec<Cell>,
    proximal: Segment,

    grid_x: usize,
    grid_y: usize,
    input_x: usize,
    input_y: usize,

    overlap: u32,
    boost: f32,
    active_duty_cycle: f32,
    overlap_duty_cycle: f32,
    is_active: bool,
}

impl Column {
    /// Create a column at grid position `(grid_x, grid_y)` with its
    /// receptive-field center at `(input_x, input_y)` on the input plane.
    pub fn new(
        grid_x: usize,
        grid_y: usize,
        input_x: usize,
        input_y: usize,
        cells_per_col: usize,
        seg_active_threshold: u32,
    ) -> Self {
        assert!(cells_per_col >= 1, "cells_per_col must be >= 1");
        Self {
            cells: (0..cells_per_col).map(|_| Cell::new()).collect(),
            proximal: Segment::new(seg_active_threshold),
            grid_x,
            grid_y,
            input_x,
            input_y,
            overlap: 0,
            boost: 1.0,
            active_duty_cycle: 1.0,
            overlap_duty_cycle: 1.0,
            is_active: false,
        }
    }

    #[inline]
    pub fn grid_pos(&self) -> (usize, usize) {
        (self.grid_x, self.grid_y)
    }

    #[inline]
    pub fn input_center(&self) -> (usize, usize) {
        (self.input_x, self.input_y)
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[inline]
    pub fn cell(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    #[inline]
    pub fn cell_mut(&mut self, i: usize) -> &mut Cell {
        &mut self.cells[i]
    }

    #[inline]
    pub fn proximal(&self) -> &Segment {
        &self.proximal
    }

    #[inline]
    pub fn proximal_mut(&mut self) -> &mut Segment {
        &mut self.proximal
    }

    #[inline]
    pub fn overlap(&self) -> u32 {
        self.overlap
    }

    #[inline]
    pub fn boost(&self) -> f32 {
        self.boost
    }

    #[inline]
    pub fn active_duty_cycle(&self) -> f32 {
        self.active_duty_cycle
    }

    #[inline]
    pub fn overlap_duty_cycle(&self) -> f32 {
        self.overlap_duty_cycle
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Advance every cell (and thereby every distal segment) one step.
    pub fn advance(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.advance();
        }
    }

    /// Reset activity, overlap, boost and duty cycles; synapses survive.
    pub fn clear_state(&mut self) {
        self.is_active = false;
        self.overlap = 0;
        self.boost = 1.0;
        self.active_duty_cycle = 1.0;
        self.overlap_duty_cycle = 1.0;
        self.proximal.clear_state();
        for cell in self.cells.iter_mut() {
            cell.clear_state();
        }
    }

    /// Score the proximal segment against the current input.
    ///
    /// Processes the proximal segment first, then gates the raw connected
    /// count by `min_overlap` and scales the survivors by the boost.
    pub fn compute_overlap(
        &mut self,
        state: &ActivityState,
        perm: &PermanenceParams,
        min_overlap: u32,
    ) {
        self.proximal.process(state, perm.connected);
        let raw = self.proximal.n_active_conn();
        self.overlap = if raw < min_overlap {
            0
        } else {
            (raw as f32 * self.boost).floor() as u32
        };
    }

    /// Proximal learning: reinforce synapses whose input bit was part of
    /// the presented frame, decay the rest.
    pub fn update_permanences(&mut self, state: &ActivityState, perm: &PermanenceParams) {
        self.proximal.adapt_to_previous_activity(state, perm);
    }

    /// Raise every proximal permanence by the default increment.
    ///
    /// `_scale` is reserved; the increment amount is the configured
    /// default.
    pub fn increase_permanences(&mut self, _scale: f32, perm: &PermanenceParams) {
        self.proximal.update_permanences(true, perm);
    }

    /// EMA update of how often this column wins inhibition.
    pub fn update_active_duty_cycle(&mut self) {
        let active = if self.is_active { 1.0 } else { 0.0 };
        self.active_duty_cycle = (1.0 - EMA_ALPHA) * self.active_duty_cycle + EMA_ALPHA * active;
    }

    /// EMA update of how often this column clears the overlap gate.
    pub fn update_overlap_duty_cycle(&mut self, min_overlap: u32) {
        let over = if self.overlap > min_overlap { 1.0 } else { 0.0 };
        self.overlap_duty_cycle = (1.0 - EMA_ALPHA) * self.overlap_duty_cycle + EMA_ALPHA * over;
    }

    /// Boost curve: 1.0 while the column fires often enough, a
    /// multiplicative ramp while it is fully starved, and the duty-cycle
    /// ratio in between.
    pub fn boost_function(&self, min_duty_cycle: f32) -> f32 {
        if self.active_duty_cycle > min_duty_cycle {
            1.0
        } else if self.active_duty_cycle == 0.0 {
            self.boost * STARVATION_BOOST_FACTOR
        } else {
            min_duty_cycle / self.active_duty_cycle
        }
    }

    /// One boosting pass given the neighborhood's duty-cycle reference.
    ///
    /// Updates the active duty cycle, recomputes the boost, updates the
    /// overlap duty cycle, and when the column's overlap duty cycle falls
    /// short of `min_duty_cycle`, nudges every proximal permanence upward.
    pub fn perform_boosting(
        &mut self,
        min_duty_cycle: f32,
        min_overlap: u32,
        perm: &PermanenceParams,
    ) {
        self.update_active_duty_cycle();
        self.boost = self.boost_function(min_duty_cycle);
        self.update_overlap_duty_cycle(min_overlap);
        if self.overlap_duty_cycle < min_duty_cycle {
            self.increase_permanences(0.1 * perm.connected, perm);
        }
    }

    /// The cell whose best matching segment at depth `k` has the highest
    /// all-synapse active count; falls back to the cell with the fewest
    /// segments (first index on ties) when nothing matches.
    ///
    /// Returns `(cell_index, Some(segment_index))` on a match and
    /// `(cell_index, None)` on the fallback.
    pub fn best_matching_cell(&self, k: u8, previous: bool) -> (usize, Option<usize>) {
        let mut best: Option<(usize, usize, u32)> = None;

        for (ci, cell) in self.cells.iter().enumerate() {
            if let Some(si) = cell.best_matching_segment(k, previous) {
                let seg = cell.segment(si);
                let count = if previous {
                    seg.n_prev_active_all()
                } else {
                    seg.n_active_all()
                };
                let better = match best {
                    None => true,
                    Some((_, _, best_count)) => count > best_count,
                };
                if better {
                    best = Some((ci, si, count));
                }
            }
        }

        if let Some((ci, si, _)) = best {
            return (ci, Some(si));
        }

        let mut fewest = 0;
        for (ci, cell) in self.cells.iter().enumerate() {
            if cell.num_segments() < self.cells[fewest].num_segments() {
                fewest = ci;
            }
        }
        (fewest, None)
    }
}
