//! Region - one cortical region driving the two-phase pooler.
//!
//! A region owns a grid of columns, the activity tables, and the single
//! seeded generator behind every random draw. Each call to [`Region::run_once`]
//! performs one time step over the input frame the caller presented with
//! [`Region::set_input`]:
//!
//! 1. **Advance** - every flag, count and connectivity bit shifts into its
//!    previous-step twin.
//! 2. **Spatial pool** - per-column overlap, neighborhood inhibition, and
//!    (when spatial learning is on) proximal adaptation, boosting and an
//!    inhibition-radius refresh. In hardcoded mode input bits map straight
//!    onto columns.
//! 3. **Temporal pool** - three phases, each covering all columns before
//!    the next begins: cell activation and learning-cell selection over
//!    active columns, segment processing and prediction over all cells,
//!    then deferred-update application. The ordering is a correctness
//!    constraint: phase 1 reads only previous-step segment state, phase 2
//!    refreshes current-step state, phase 3 commits.
//!
//! The region is deterministic: a fixed parameter set, seed and input
//! stream reproduces the exact sequence of column and cell states.
//!
//! # Examples
//!
//! ```
//! use cortica::{Region, RegionParams};
//!
//! // Two columns, direct input mapping, single cell per column.
//! let params = RegionParams {
//!     input_width: 2,
//!     input_height: 1,
//!     cells_per_col: 1,
//!     seg_active_threshold: 1,
//!     new_synapse_count: 1,
//!     ..RegionParams::default()
//! };
//! let mut region = Region::with_hardcoded_spatial(params).unwrap();
//!
//! region.set_input(&[true, false]).unwrap();
//! region.run_once();
//! assert!(region.column_active(0));
//! assert!(!region.column_active(1));
//! ```

use crate::cell::Cell;
use crate::column::Column;
use crate::error::{CorticaError, Result};
use crate::params::{PermanenceParams, RegionParams, MIN_DUTY_CYCLE_FACTOR, RAD_BIAS_PEAK, RAD_BIAS_STD_DEV};
use crate::segment_update::SegmentUpdate;
use crate::state::ActivityState;
use crate::synapse::SynapseSource;
use crate::utils;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A single cortical region: column grid, activity tables, seeded PRNG.
pub struct Region {
    params: RegionParams,
    perm: PermanenceParams,

    columns: Vec<Column>,
    state: ActivityState,

    min_overlap: u32,
    inhibition_radius: f32,
    desired_local_activity: usize,

    rng: StdRng,
    iters: u64,

    activation_accuracy: f32,
    prediction_accuracy: f32,
}

impl Region {
    /// Construct a region from validated parameters.
    ///
    /// In hardcoded-spatial mode the column grid is forced to the input
    /// shape, no proximal synapses are created and spatial learning is
    /// off. Otherwise column centers are spread over the input plane and
    /// each proximal segment is seeded with randomly sampled input
    /// positions at either full permanence or a Gaussian locality-biased
    /// draw, per `full_default_spatial_permanence`.
    pub fn new(params: RegionParams) -> Result<Self> {
        params.validate()?;

        let mut params = params;
        if params.hardcoded_spatial {
            // The per-region flag is authoritative: grid mirrors the input
            // plane and the spatial pooler is bypassed entirely.
            params.col_grid_width = params.input_width;
            params.col_grid_height = params.input_height;
            params.spatial_learning = false;
        }

        let perm = params.permanence;
        let mut rng = StdRng::seed_from_u64(params.seed);

        let num_cols = params.col_grid_width * params.col_grid_height;
        let num_cells = num_cols * params.cells_per_col;
        let mut columns = Vec::with_capacity(num_cols);
        let mut min_overlap = 0u32;

        if params.hardcoded_spatial {
            for cy in 0..params.col_grid_height {
                for cx in 0..params.col_grid_width {
                    columns.push(Column::new(
                        cx,
                        cy,
                        cx,
                        cy,
                        params.cells_per_col,
                        params.seg_active_threshold,
                    ));
                }
            }
        } else {
            let x_space = (params.input_width.saturating_sub(1)) as f32
                / params.col_grid_width.saturating_sub(1).max(1) as f32;
            let y_space = (params.input_height.saturating_sub(1)) as f32
                / params.col_grid_height.saturating_sub(1).max(1) as f32;

            let area = if params.locality_radius == 0 {
                params.num_inputs()
            } else {
                params.locality_radius * params.locality_radius
            };
            let synapses_per_segment = ((area as f32 * params.pct_input_per_col) as usize).max(1);
            min_overlap =
                ((synapses_per_segment as f32 * params.pct_min_overlap).round() as u32).max(1);

            for cy in 0..params.col_grid_height {
                for cx in 0..params.col_grid_width {
                    let ix = (cx as f32 * x_space).round() as usize;
                    let iy = (cy as f32 * y_space).round() as usize;
                    let mut col = Column::new(
                        cx,
                        cy,
                        ix,
                        iy,
                        params.cells_per_col,
                        params.seg_active_threshold,
                    );
                    Self::init_proximal_synapses(
                        &mut col,
                        &params,
                        synapses_per_segment,
                        &mut rng,
                    );
                    columns.push(col);
                }
            }
        }

        let mut region = Self {
            state: ActivityState::new(num_cells, params.num_inputs()),
            perm,
            columns,
            min_overlap,
            inhibition_radius: 0.0,
            desired_local_activity: 2,
            rng,
            iters: 0,
            activation_accuracy: 0.0,
            prediction_accuracy: 0.0,
            params,
        };

        if !region.params.hardcoded_spatial {
            region.inhibition_radius = region.average_receptive_field_radius();
        }
        region.desired_local_activity = region.compute_desired_local_activity();

        Ok(region)
    }

    /// Construct with the spatial pooler bypassed: one column per input
    /// bit, input bits driving column activity directly.
    pub fn with_hardcoded_spatial(params: RegionParams) -> Result<Self> {
        Self::new(RegionParams {
            hardcoded_spatial: true,
            ..params
        })
    }

    /// Seed a column's proximal segment with sampled input positions.
    fn init_proximal_synapses(
        col: &mut Column,
        params: &RegionParams,
        synapses_per_segment: usize,
        rng: &mut StdRng,
    ) {
        let (ix, iy) = col.input_center();
        let longer_side = params.input_width.max(params.input_height) as f32;

        let mut candidates: Vec<usize> = if params.locality_radius == 0 {
            (0..params.num_inputs()).collect()
        } else {
            let r = params.locality_radius;
            let x0 = ix.saturating_sub(r);
            let x1 = (ix + r + 1).min(params.input_width);
            let y0 = iy.saturating_sub(r);
            let y1 = (iy + r + 1).min(params.input_height);
            (y0..y1)
                .cartesian_product(x0..x1)
                .map(|(y, x)| y * params.input_width + x)
                .collect()
        };

        let chosen = utils::sample_indices(&mut candidates, synapses_per_segment, rng);
        for idx in chosen {
            let permanence = if params.full_default_spatial_permanence {
                1.0
            } else {
                let x = (idx % params.input_width) as f32;
                let y = (idx / params.input_width) as f32;
                let dx = x - ix as f32;
                let dy = y - iy as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                let bias = (RAD_BIAS_PEAK / 0.4)
                    * (-(dist / (longer_side * RAD_BIAS_STD_DEV)).powi(2) / 2.0).exp();
                let noise: f32 = rng.sample(StandardNormal);
                (params.permanence.connected + params.permanence.increment * noise).max(0.0) * bias
            };
            col.proximal_mut()
                .create_synapse(SynapseSource::Input(idx), permanence);
        }
    }

    // =========================================================================
    // Input and stepping
    // =========================================================================

    /// Present an input frame for the next step.
    ///
    /// The buffer length must match the input topology; the frame stays in
    /// effect until overwritten.
    pub fn set_input(&mut self, bits: &[bool]) -> Result<()> {
        if bits.len() != self.state.num_inputs() {
            return Err(CorticaError::InvalidInputSize {
                expected: self.state.num_inputs(),
                actual: bits.len(),
            });
        }
        self.state.load_input(bits);
        Ok(())
    }

    /// Perform one full time step over the current input frame.
    pub fn run_once(&mut self) {
        self.advance_time_step();

        if self.params.hardcoded_spatial {
            let n = self.columns.len();
            for ci in 0..n {
                let active = self.state.input_bit(ci);
                self.columns[ci].set_active(active);
            }
        } else {
            self.spatial_pool();
        }

        self.update_accuracy_stats();
        self.temporal_pool();
        self.iters += 1;
    }

    /// Shift every current-step field region-wide.
    fn advance_time_step(&mut self) {
        self.state.advance();
        for col in self.columns.iter_mut() {
            col.advance();
        }
    }

    // =========================================================================
    // Spatial pooling
    // =========================================================================

    fn spatial_pool(&mut self) {
        // Phase 1: overlap per column.
        {
            let Self {
                columns,
                state,
                perm,
                min_overlap,
                ..
            } = self;
            for col in columns.iter_mut() {
                col.compute_overlap(state, perm, *min_overlap);
            }
        }

        // Phase 2: local k-winners inhibition.
        let n = self.columns.len();
        let mut winners = vec![false; n];
        for ci in 0..n {
            let overlap = self.columns[ci].overlap();
            if overlap == 0 {
                continue;
            }
            let kth = self.kth_neighbor_overlap(ci);
            winners[ci] = overlap >= kth;
        }
        for (ci, &win) in winners.iter().enumerate() {
            self.columns[ci].set_active(win);
        }

        // Phase 3: proximal learning, boosting, inhibition-radius refresh.
        if self.params.spatial_learning {
            {
                let Self { columns, state, perm, .. } = self;
                for col in columns.iter_mut().filter(|c| c.is_active()) {
                    col.update_permanences(state, perm);
                }
            }

            // Duty-cycle references are snapshotted so boosting is
            // independent of column iteration order.
            let max_duties: Vec<f32> = (0..n)
                .map(|ci| {
                    self.neighborhood(ci)
                        .into_iter()
                        .map(|ni| self.columns[ni].active_duty_cycle())
                        .fold(0.0f32, f32::max)
                })
                .collect();
            for ci in 0..n {
                let min_duty = MIN_DUTY_CYCLE_FACTOR * max_duties[ci];
                let min_overlap = self.min_overlap;
                let perm = self.perm;
                self.columns[ci].perform_boosting(min_duty, min_overlap, &perm);
            }

            self.inhibition_radius = self.average_receptive_field_radius();
        }
    }

    /// Column indices within the inhibition radius, self included.
    ///
    /// The upper bounds carry an extra `+1` so the rectangle includes its
    /// far edge.
    fn neighborhood(&self, ci: usize) -> Vec<usize> {
        let (cx, cy) = self.columns[ci].grid_pos();
        let r = self.inhibition_radius.floor() as usize;
        let w = self.params.col_grid_width;
        let h = self.params.col_grid_height;

        let x0 = cx.saturating_sub(r);
        let x1 = (cx + r + 1).min(w);
        let y0 = cy.saturating_sub(r);
        let y1 = (cy + r + 1).min(h);

        (y0..y1)
            .cartesian_product(x0..x1)
            .map(|(y, x)| y * w + x)
            .collect()
    }

    /// The k-th highest overlap among a column's neighbors, with
    /// k = `desired_local_activity`. Empty neighborhoods score 0.
    fn kth_neighbor_overlap(&self, ci: usize) -> u32 {
        let overlaps: Vec<u32> = self
            .neighborhood(ci)
            .into_iter()
            .map(|ni| self.columns[ni].overlap())
            .sorted()
            .collect();
        if overlaps.is_empty() {
            return 0;
        }
        let idx = overlaps.len().saturating_sub(self.desired_local_activity);
        overlaps[idx]
    }

    /// Average receptive-field radius of connected proximal synapses,
    /// expressed in column-grid units.
    fn average_receptive_field_radius(&self) -> f32 {
        let mut total = 0.0f32;
        let mut count = 0usize;

        for col in &self.columns {
            let (ix, iy) = col.input_center();
            for syn in col.proximal().synapses() {
                if syn.permanence() < self.perm.connected {
                    continue;
                }
                if let SynapseSource::Input(idx) = syn.source() {
                    let x = (idx % self.params.input_width) as f32;
                    let y = (idx / self.params.input_width) as f32;
                    let dx = x - ix as f32;
                    let dy = y - iy as f32;
                    total += (dx * dx + dy * dy).sqrt();
                    count += 1;
                }
            }
        }

        if count == 0 {
            return 0.0;
        }
        let avg_input_units = total / count as f32;
        let sx = self.params.col_grid_width as f32 / self.params.input_width as f32;
        let sy = self.params.col_grid_height as f32 / self.params.input_height as f32;
        avg_input_units * 0.5 * (sx + sy)
    }

    fn compute_desired_local_activity(&self) -> usize {
        let dla = if self.params.locality_radius == 0 {
            self.inhibition_radius * self.params.pct_local_activity
        } else {
            (self.params.locality_radius * self.params.locality_radius) as f32
                * self.params.pct_local_activity
        };
        (dla.round() as usize).max(2)
    }

    // =========================================================================
    // Temporal pooling
    // =========================================================================

    fn temporal_pool(&mut self) {
        self.temporal_phase_1();
        self.temporal_phase_2();
        if self.params.temporal_learning {
            self.temporal_phase_3();
        }
    }

    /// Phase 1: activate cells in active columns, pick learning cells.
    fn temporal_phase_1(&mut self) {
        let cpc = self.params.cells_per_col;
        let temporal_learning = self.params.temporal_learning;

        for ci in 0..self.columns.len() {
            if !self.columns[ci].is_active() {
                continue;
            }

            let mut predicted = false;
            let mut learning_chosen = false;

            for li in 0..cpc {
                let flat = ci * cpc + li;
                if !self.state.cell_was_predicted(flat) {
                    continue;
                }
                // Bottom-up confirmation requires a previously-active
                // sequence segment, not just any prediction.
                let (is_seq, from_learning) = {
                    let cell = self.columns[ci].cell(li);
                    match cell.previous_active_segment() {
                        Some(si) => {
                            let seg = cell.segment(si);
                            (seg.is_sequence(), seg.was_active_from_learning(&self.state))
                        }
                        None => (false, false),
                    }
                };
                if is_seq {
                    predicted = true;
                    self.state.set_cell_active(flat);
                    if temporal_learning && from_learning {
                        self.state.set_cell_learning(flat);
                        learning_chosen = true;
                    }
                }
            }

            if !predicted {
                for li in 0..cpc {
                    self.state.set_cell_active(ci * cpc + li);
                }
            }

            if temporal_learning && !learning_chosen {
                let (li, seg) = self.columns[ci].best_matching_cell(1, true);
                let flat = ci * cpc + li;
                self.state.set_cell_active(flat);
                self.state.set_cell_learning(flat);

                let update = self.make_segment_update(ci, li, seg, true, true);
                self.columns[ci].cell_mut(li).queue_update(update);
            }
        }
    }

    /// Phase 2: refresh segment activity, assign predictive state, queue
    /// reinforcement updates.
    fn temporal_phase_2(&mut self) {
        let connected = self.perm.connected;
        let temporal_learning = self.params.temporal_learning;
        let cpc = self.params.cells_per_col;

        // Refresh every distal segment first so the per-cell pass below
        // sees a consistent current step.
        {
            let Self { columns, state, .. } = self;
            for col in columns.iter_mut() {
                for cell in col.cells_mut() {
                    for seg in cell.segments_mut() {
                        seg.process(state, connected);
                    }
                }
            }
        }

        for ci in 0..self.columns.len() {
            for li in 0..cpc {
                let active_segments: Vec<usize> = self.columns[ci]
                    .cell(li)
                    .segments()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.is_active())
                    .map(|(i, _)| i)
                    .collect();
                if active_segments.is_empty() {
                    continue;
                }

                let flat = ci * cpc + li;
                self.state.set_cell_predicting(flat);
                self.columns[ci].cell_mut(li).refresh_prediction_steps();

                if !temporal_learning {
                    continue;
                }

                for si in active_segments {
                    let update = self.make_segment_update(ci, li, Some(si), false, false);
                    self.columns[ci].cell_mut(li).queue_update(update);
                }

                // Reinforce (or schedule) a segment that could have
                // predicted this activation one step further out.
                let depth = self.columns[ci].cell(li).prediction_steps().saturating_add(1);
                let prev_seg = self.columns[ci].cell(li).best_matching_segment(depth, true);
                let mut update = self.make_segment_update(ci, li, prev_seg, true, true);
                if prev_seg.is_none() {
                    update.set_prediction_steps(depth);
                }
                self.columns[ci].cell_mut(li).queue_update(update);
            }
        }
    }

    /// Phase 3: commit or drop every queued update; queues always drain.
    fn temporal_phase_3(&mut self) {
        let cpc = self.params.cells_per_col;
        let perm = self.perm;
        let threshold = self.params.seg_active_threshold;

        for ci in 0..self.columns.len() {
            for li in 0..cpc {
                let flat = ci * cpc + li;
                let cell = self.columns[ci].cell_mut(li);
                if self.state.cell_learning(flat) {
                    cell.apply_pending_updates(true, &perm, threshold);
                } else if !self.state.cell_predicting(flat) && self.state.cell_was_predicted(flat) {
                    cell.apply_pending_updates(false, &perm, threshold);
                } else {
                    cell.discard_pending_updates();
                }
            }
        }
    }

    /// Freeze a deferred update for `(col, cell)` targeting `segment`.
    ///
    /// Captures the connected-and-active synapse set at the chosen step
    /// and, for growth updates, samples learning cells from anywhere in
    /// the region except the cell's own column, bounded by
    /// `new_synapse_count` minus the captured set.
    fn make_segment_update(
        &mut self,
        col: usize,
        cell_idx: usize,
        segment: Option<usize>,
        previous: bool,
        add_new: bool,
    ) -> SegmentUpdate {
        let captured = match segment {
            Some(si) => self.columns[col]
                .cell(cell_idx)
                .segment(si)
                .active_synapse_indices(previous, &self.state),
            None => Vec::new(),
        };

        let mut learning_cells = Vec::new();
        if add_new {
            let want = self.params.new_synapse_count.saturating_sub(captured.len());
            if want > 0 {
                let cpc = self.params.cells_per_col;
                let own_start = col * cpc;
                let own_end = own_start + cpc;

                let mut eligible: Vec<usize> = Vec::new();
                for id in 0..self.state.num_cells() {
                    if id >= own_start && id < own_end {
                        continue;
                    }
                    let learning = if previous {
                        self.state.cell_was_learning(id)
                    } else {
                        self.state.cell_learning(id)
                    };
                    if !learning {
                        continue;
                    }
                    if let Some(si) = segment {
                        if self.columns[col]
                            .cell(cell_idx)
                            .segment(si)
                            .has_source(SynapseSource::Cell(id))
                        {
                            continue;
                        }
                    }
                    eligible.push(id);
                }

                learning_cells = utils::sample_indices(&mut eligible, want, &mut self.rng);
            }
        }

        SegmentUpdate::new(segment, captured, learning_cells, add_new)
    }

    // =========================================================================
    // Accuracy
    // =========================================================================

    /// Snapshot activation/prediction accuracy for the step.
    ///
    /// A column counts as predicted when at least one of its cells was
    /// predicted for this step through a previously-active sequence
    /// segment.
    fn update_accuracy_stats(&mut self) {
        let cpc = self.params.cells_per_col;
        let mut num_active = 0usize;
        let mut num_predicted = 0usize;
        let mut num_both = 0usize;

        for (ci, col) in self.columns.iter().enumerate() {
            let predicted = (0..cpc).any(|li| {
                let flat = ci * cpc + li;
                self.state.cell_was_predicted(flat)
                    && col
                        .cell(li)
                        .segments()
                        .iter()
                        .any(|s| s.was_active() && s.is_sequence())
            });

            if col.is_active() {
                num_active += 1;
                if predicted {
                    num_both += 1;
                }
            }
            if predicted {
                num_predicted += 1;
            }
        }

        self.activation_accuracy = if num_active > 0 {
            num_both as f32 / num_active as f32
        } else {
            0.0
        };
        self.prediction_accuracy = if num_predicted > 0 {
            num_both as f32 / num_predicted as f32
        } else {
            0.0
        };
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of columns in the grid.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Cells per column.
    #[inline]
    pub fn cells_per_col(&self) -> usize {
        self.params.cells_per_col
    }

    /// The effective construction parameters (post grid override).
    #[inline]
    pub fn params(&self) -> &RegionParams {
        &self.params
    }

    /// Steps run so far.
    #[inline]
    pub fn iters(&self) -> u64 {
        self.iters
    }

    /// Current inhibition radius in column-grid units.
    #[inline]
    pub fn inhibition_radius(&self) -> f32 {
        self.inhibition_radius
    }

    /// Current local k-winners target.
    #[inline]
    pub fn desired_local_activity(&self) -> usize {
        self.desired_local_activity
    }

    /// Minimum raw overlap for a column to compete.
    #[inline]
    pub fn min_overlap(&self) -> u32 {
        self.min_overlap
    }

    /// Direct column access for diagnostics.
    #[inline]
    pub fn column(&self, ci: usize) -> &Column {
        &self.columns[ci]
    }

    /// Is column `ci` active this step?
    #[inline]
    pub fn column_active(&self, ci: usize) -> bool {
        self.columns[ci].is_active()
    }

    /// Is cell `li` of column `ci` active this step?
    #[inline]
    pub fn cell_active(&self, ci: usize, li: usize) -> bool {
        self.state.cell_active(ci * self.params.cells_per_col + li)
    }

    /// Is cell `li` of column `ci` predicting?
    #[inline]
    pub fn cell_predicting(&self, ci: usize, li: usize) -> bool {
        self.state.cell_predicting(ci * self.params.cells_per_col + li)
    }

    /// Is cell `li` of column `ci` a learning cell this step?
    #[inline]
    pub fn cell_learning(&self, ci: usize, li: usize) -> bool {
        self.state.cell_learning(ci * self.params.cells_per_col + li)
    }

    /// Earliest predicted step for column `ci`; 0 when nothing predicts.
    pub fn column_prediction_steps(&self, ci: usize) -> u8 {
        let cpc = self.params.cells_per_col;
        let mut soonest = 0u8;
        for li in 0..cpc {
            if !self.state.cell_predicting(ci * cpc + li) {
                continue;
            }
            let steps = self.columns[ci].cell(li).prediction_steps();
            if soonest == 0 || steps < soonest {
                soonest = steps;
            }
        }
        soonest
    }

    /// Last step's (activation, prediction) accuracy.
    #[inline]
    pub fn last_accuracy(&self) -> (f32, f32) {
        (self.activation_accuracy, self.prediction_accuracy)
    }

    /// Indices of columns active this step.
    pub fn active_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_active())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of columns predicted at depth `k` (any depth when `k == 0`).
    pub fn predicted_columns(&self, k: u8) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&ci| {
                let steps = self.column_prediction_steps(ci);
                if k == 0 {
                    steps > 0
                } else {
                    steps == k
                }
            })
            .collect()
    }

    /// Count distal segments with prediction depth `k` (all when `k == 0`).
    pub fn num_segments(&self, k: u8) -> usize {
        self.cells()
            .flat_map(|cell| cell.segments())
            .filter(|seg| k == 0 || seg.prediction_steps() == k)
            .count()
    }

    /// Total synapse count, distal plus proximal.
    pub fn num_synapses(&self) -> usize {
        let distal: usize = self
            .cells()
            .flat_map(|cell| cell.segments())
            .map(|seg| seg.num_synapses())
            .sum();
        let proximal: usize = self
            .columns
            .iter()
            .map(|col| col.proximal().num_synapses())
            .sum();
        distal + proximal
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        let mut bytes = std::mem::size_of::<Self>();
        bytes += self.columns.capacity() * std::mem::size_of::<Column>();
        for col in &self.columns {
            bytes += col.num_cells() * std::mem::size_of::<Cell>();
            bytes += col.proximal().num_synapses()
                * std::mem::size_of::<crate::synapse::Synapse>();
            for cell in col.cells() {
                bytes += cell.num_segments() * std::mem::size_of::<crate::segment::Segment>();
                for seg in cell.segments() {
                    bytes +=
                        seg.num_synapses() * std::mem::size_of::<crate::synapse::Synapse>();
                }
            }
        }
        bytes += self.state.num_cells() * 6 / 8;
        bytes += self.state.num_inputs() * 2 / 8;
        bytes
    }

    /// Reset all activity state, duty cycles, boosts and queues.
    ///
    /// Learned synapses and segments are kept.
    pub fn clear(&mut self) {
        self.state.clear();
        for col in self.columns.iter_mut() {
            col.clear_state();
        }
        self.iters = 0;
        self.activation_accuracy = 0.0;
        self.prediction_accuracy = 0.0;
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.columns.iter().flat_map(|col| col.cells().iter())
    }
}
