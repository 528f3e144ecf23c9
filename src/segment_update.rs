//! SegmentUpdate - deferred learning bookkeeping for a cell.
//!
//! The temporal pooler decides *what* to reinforce while it is still
//! reading the step's activity, but applies nothing until Phase 3 knows
//! whether the prediction panned out. A `SegmentUpdate` freezes that
//! decision: which synapses on which segment looked active at capture
//! time, and which learning cells to attach as new synapses if the update
//! lands positively.
//!
//! The target segment is named by its index in the owning cell's segment
//! list (`None` meaning "grow a fresh segment"). Segments are only ever
//! appended, so the handle stays valid however much the list grows between
//! capture and application.

/// A queued permanence/growth decision for one segment of one cell.
#[derive(Debug, Clone)]
pub struct SegmentUpdate {
    segment: Option<usize>,
    active_synapses: Vec<usize>,
    learning_cells: Vec<usize>,
    add_new_synapses: bool,
    prediction_steps: u8,
}

impl SegmentUpdate {
    /// Freeze an update targeting `segment` (`None` = new segment).
    ///
    /// `active_synapses` is the captured connected-and-active set;
    /// `learning_cells` are flat cell ids sampled by the region. The
    /// prediction depth defaults to 1 (a sequence segment) until
    /// overridden.
    pub fn new(
        segment: Option<usize>,
        active_synapses: Vec<usize>,
        learning_cells: Vec<usize>,
        add_new_synapses: bool,
    ) -> Self {
        Self {
            segment,
            active_synapses,
            learning_cells,
            add_new_synapses,
            prediction_steps: 1,
        }
    }

    /// Target segment index, or `None` for "create a new segment".
    #[inline]
    pub fn segment(&self) -> Option<usize> {
        self.segment
    }

    /// Captured connected-and-active synapse indices.
    #[inline]
    pub fn active_synapses(&self) -> &[usize] {
        &self.active_synapses
    }

    /// Learning cells queued for synapse growth (flat cell ids).
    #[inline]
    pub fn learning_cells(&self) -> &[usize] {
        &self.learning_cells
    }

    /// Grow synapses on positive application?
    #[inline]
    pub fn add_new_synapses(&self) -> bool {
        self.add_new_synapses
    }

    /// Prediction depth to stamp onto a newly created segment.
    #[inline]
    pub fn prediction_steps(&self) -> u8 {
        self.prediction_steps
    }

    /// Override the prediction depth (clamped on application).
    #[inline]
    pub fn set_prediction_steps(&mut self, steps: u8) {
        self.prediction_steps = steps;
    }
}
