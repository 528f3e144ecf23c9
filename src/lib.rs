//! Cortica - Online Sparse Sequence Learning
//!
//! Cortica is a Rust implementation of a Hierarchical Temporal Memory (HTM)
//! region running Numenta's cortical learning algorithm: an online,
//! unsupervised sequence-learning engine over sparse binary inputs. Each
//! time step the region sparsifies the presented input into a set of
//! active columns (the **spatial pooler**) and learns temporal transitions
//! among those columns through per-cell dendritic segments (the **temporal
//! pooler**), emitting which cells are active, which predict near-future
//! activation, and at how many steps out.
//!
//! # Key Characteristics
//!
//! - Pure data-in/data-out API: present a frame, run a step, inspect
//! - Deterministic: one seeded PRNG per region reproduces every state
//! - Index-addressed substrate: columns, cells, segments and synapses are
//!   stable handles, never pointers
//! - Packed activity tables using `bitvec` for the hot flag lookups
//!
//! # Architecture
//!
//! The crate is built from the substrate up:
//!
//! - **Synapse / Segment**: permanence-weighted connections feeding
//!   threshold detectors with cached per-step activity counts
//! - **Cell**: temporal context; grows distal segments and queues deferred
//!   learning updates
//! - **Column**: spatial competition; one proximal segment, boost and
//!   duty-cycle state
//! - **Region**: the per-step protocol gluing both poolers together
//!
//! # Examples
//!
//! Learning a two-step alternation with the spatial pooler hardcoded:
//!
//! ```
//! use cortica::{Region, RegionParams};
//!
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
//! // Alternate the two inputs; after a few repeats each transition is
//! // predicted before it arrives.
//! for step in 0..10 {
//!     let frame = [step % 2 == 0, step % 2 == 1];
//!     region.set_input(&frame).unwrap();
//!     region.run_once();
//! }
//! let (activation, prediction) = region.last_accuracy();
//! assert_eq!(activation, 1.0);
//! assert_eq!(prediction, 1.0);
//! ```
//!
//! Trained spatial pooling over a larger input plane:
//!
//! ```
//! use cortica::{Region, RegionParams};
//!
//! let mut region = Region::new(RegionParams {
//!     input_width: 32,
//!     input_height: 32,
//!     col_grid_width: 16,
//!     col_grid_height: 16,
//!     pct_input_per_col: 0.1,
//!     seed: 42,
//!     ..RegionParams::default()
//! })
//! .unwrap();
//!
//! let mut frame = vec![false; 32 * 32];
//! for i in (0..frame.len()).step_by(7) {
//!     frame[i] = true;
//! }
//! region.set_input(&frame).unwrap();
//! region.run_once();
//! ```
//!
//! # Safety
//!
//! Cortica uses `debug_assert!` for index checks in hot paths: full
//! validation during development and testing, zero cost in release builds,
//! with memory safety guaranteed by Rust's type system throughout.

// Substrate
pub mod error;
pub mod params;
pub mod state;
pub mod synapse;
pub mod utils;

// Dendrite layer
pub mod segment;
pub mod segment_update;

// Region graph
pub mod cell;
pub mod column;
pub mod region;

// Re-exports for convenient access
pub use cell::Cell;
pub use column::Column;
pub use error::{CorticaError, Result};
pub use params::{
    PermanenceParams, RegionParams, CONNECTED_PERM, EMA_ALPHA, INITIAL_PERMANENCE, MAX_TIME_STEPS,
    PERMANENCE_DEC, PERMANENCE_DEC_LARGE, PERMANENCE_INC,
};
pub use region::Region;
pub use segment::Segment;
pub use segment_update::SegmentUpdate;
pub use state::ActivityState;
pub use synapse::{Synapse, SynapseSource};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Cortica";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
