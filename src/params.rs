//! Region construction parameters and the permanence arithmetic constants.
//!
//! All tunable values live in a [`RegionParams`] value handed to
//! `Region::new`; there is no process-wide mutable configuration. The
//! constants below are the canonical defaults of the cortical learning
//! algorithm; each one can be overridden per region through
//! [`PermanenceParams`].
//!
//! # Configuration files
//!
//! `RegionParams` round-trips through JSON with `serde_json`:
//!
//! ```
//! use cortica::RegionParams;
//!
//! let params = RegionParams::default();
//! let json = params.to_json().unwrap();
//! let restored = RegionParams::from_json(&json).unwrap();
//! assert_eq!(params, restored);
//! ```

use crate::error::{CorticaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Permanence threshold above which a synapse counts as connected.
pub const CONNECTED_PERM: f32 = 0.20;

/// Starting permanence for newly grown distal synapses.
pub const INITIAL_PERMANENCE: f32 = 0.30;

/// Default permanence increment.
pub const PERMANENCE_INC: f32 = 0.015;

/// Default permanence decrement.
pub const PERMANENCE_DEC: f32 = 0.005;

/// Alternative, more aggressive permanence decrement.
pub const PERMANENCE_DEC_LARGE: f32 = 0.010;

/// Smoothing factor for the duty-cycle exponential moving averages.
pub const EMA_ALPHA: f32 = 0.005;

/// Upper bound on a segment's prediction-step depth.
pub const MAX_TIME_STEPS: u8 = 10;

/// A best-matching segment must have strictly more active synapses than this.
pub const MIN_SYNAPSES_PER_SEGMENT_THRESHOLD: u32 = 1;

/// Boost multiplier applied while a column's active duty cycle sits at zero.
pub const STARVATION_BOOST_FACTOR: f32 = 1.05;

/// Fraction of the neighborhood-max duty cycle that defines `min_duty_cycle`.
pub const MIN_DUTY_CYCLE_FACTOR: f32 = 0.01;

/// Peak of the locality bias applied to Gaussian proximal permanences.
pub const RAD_BIAS_PEAK: f32 = 0.8;

/// Standard deviation (as a fraction of the longer input side) of the
/// locality bias.
pub const RAD_BIAS_STD_DEV: f32 = 0.25;

/// Permanence arithmetic parameters.
///
/// Increases saturate at 1.0, decreases at 0.0; saturation is policy, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PermanenceParams {
    /// Threshold for "connected" (default [`CONNECTED_PERM`])
    pub connected: f32,
    /// Starting permanence for grown synapses (default [`INITIAL_PERMANENCE`])
    pub initial: f32,
    /// Default increment (default [`PERMANENCE_INC`])
    pub increment: f32,
    /// Default decrement (default [`PERMANENCE_DEC`];
    /// [`PERMANENCE_DEC_LARGE`] is the aggressive alternative)
    pub decrement: f32,
}

impl Default for PermanenceParams {
    fn default() -> Self {
        Self {
            connected: CONNECTED_PERM,
            initial: INITIAL_PERMANENCE,
            increment: PERMANENCE_INC,
            decrement: PERMANENCE_DEC,
        }
    }
}

/// Construction parameters for a [`Region`](crate::Region).
///
/// The input plane is `input_width × input_height` bits, row-major. The
/// column grid is `col_grid_width × col_grid_height`; in hardcoded-spatial
/// mode the grid shape is forced to the input shape and no proximal
/// synapses exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    /// Input plane width in bits
    pub input_width: usize,
    /// Input plane height in bits
    pub input_height: usize,
    /// Column grid width
    pub col_grid_width: usize,
    /// Column grid height
    pub col_grid_height: usize,
    /// Fraction of the (locality or total) input area each proximal segment
    /// samples; must be in (0, 1]
    pub pct_input_per_col: f32,
    /// Fraction of a proximal segment's synapses that must be connected and
    /// active for a non-zero overlap
    pub pct_min_overlap: f32,
    /// Radius (in input units) of each column's receptive neighborhood;
    /// 0 means the whole input plane
    pub locality_radius: usize,
    /// Fraction controlling how many columns win inhibition locally
    pub pct_local_activity: f32,
    /// Temporal-context cells per column
    pub cells_per_col: usize,
    /// Minimum connected active synapses for a segment to activate (θ)
    pub seg_active_threshold: u32,
    /// Target number of synapses per segment after learning growth
    pub new_synapse_count: usize,
    /// Enable proximal learning, boosting and inhibition-radius updates
    pub spatial_learning: bool,
    /// Enable distal learning (segment updates)
    pub temporal_learning: bool,
    /// Map input bits straight onto columns, bypassing the spatial pooler
    pub hardcoded_spatial: bool,
    /// Seed for the region's single PRNG
    pub seed: u64,
    /// Initialize proximal permanences at 1.0 instead of the Gaussian
    /// locality-biased draw
    pub full_default_spatial_permanence: bool,
    /// Permanence arithmetic
    pub permanence: PermanenceParams,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            input_width: 32,
            input_height: 32,
            col_grid_width: 16,
            col_grid_height: 16,
            pct_input_per_col: 0.02,
            pct_min_overlap: 0.07,
            locality_radius: 0,
            pct_local_activity: 0.02,
            cells_per_col: 1,
            seg_active_threshold: 3,
            new_synapse_count: 5,
            spatial_learning: true,
            temporal_learning: true,
            hardcoded_spatial: false,
            seed: 0,
            full_default_spatial_permanence: false,
            permanence: PermanenceParams::default(),
        }
    }
}

impl RegionParams {
    /// Number of input bits.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.input_width * self.input_height
    }

    /// Number of columns, honoring the hardcoded-spatial grid override.
    #[inline]
    pub fn num_cols(&self) -> usize {
        if self.hardcoded_spatial {
            self.num_inputs()
        } else {
            self.col_grid_width * self.col_grid_height
        }
    }

    /// Check the configuration-error taxonomy.
    ///
    /// Fatal at construction: zero cell count, empty column grid, a
    /// segment threshold below 1, or an input sampling fraction outside
    /// (0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.cells_per_col < 1 {
            return Err(CorticaError::InvalidParameter(
                "cells_per_col must be >= 1".to_string(),
            ));
        }
        if self.num_inputs() == 0 {
            return Err(CorticaError::InvalidParameter(
                "input plane must be non-empty".to_string(),
            ));
        }
        if !self.hardcoded_spatial && self.col_grid_width * self.col_grid_height == 0 {
            return Err(CorticaError::InvalidParameter(
                "column grid must be non-empty".to_string(),
            ));
        }
        if self.seg_active_threshold < 1 {
            return Err(CorticaError::InvalidParameter(
                "seg_active_threshold must be >= 1".to_string(),
            ));
        }
        if !(self.pct_input_per_col > 0.0 && self.pct_input_per_col <= 1.0) {
            return Err(CorticaError::InvalidParameter(
                "pct_input_per_col must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the configuration to a JSON file.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
