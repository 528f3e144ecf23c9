//! Property tests for the region substrate invariants.
//!
//! Covers:
//! - Permanence clamping under arbitrary update sequences
//! - Prediction-step clamping
//! - Connectivity/threshold and activation/count invariants
//! - Advance round-trip semantics
//! - Duty-cycle and boost bounds
//! - End-to-end determinism under a fixed seed

use cortica::{
    ActivityState, Column, Region, RegionParams, Segment, Synapse, SynapseSource, CONNECTED_PERM,
    MAX_TIME_STEPS,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

proptest! {
    #[test]
    fn prop_permanence_stays_clamped(
        init in 0.0f32..1.0,
        ops in prop::collection::vec((any::<bool>(), 0.0f32..0.5), 0..64),
    ) {
        let mut syn = Synapse::new(SynapseSource::Cell(0), init);
        for (increase, amount) in ops {
            if increase {
                syn.increase(amount);
            } else {
                syn.decrease(amount);
            }
            prop_assert!((0.0..=1.0).contains(&syn.permanence()));
        }
    }

    #[test]
    fn prop_prediction_steps_clamped(k in any::<u8>()) {
        let mut seg = Segment::new(1);
        seg.set_prediction_steps(k);
        let steps = seg.prediction_steps();
        prop_assert!(steps >= 1 && steps <= MAX_TIME_STEPS);
        if (1..=MAX_TIME_STEPS).contains(&k) {
            prop_assert_eq!(steps, k);
        }
        prop_assert_eq!(seg.is_sequence(), steps == 1);
    }

    #[test]
    fn prop_connected_iff_threshold(
        perms in prop::collection::vec(0.0f32..1.0, 1..32),
        threshold in 1u32..5,
    ) {
        let n = perms.len();
        let mut state = ActivityState::new(n, 0);
        for c in 0..n {
            state.set_cell_active(c);
        }

        let mut seg = Segment::new(threshold);
        for (c, &p) in perms.iter().enumerate() {
            seg.create_synapse(SynapseSource::Cell(c), p);
        }
        seg.process(&state, CONNECTED_PERM);

        let mut connected_count = 0u32;
        for syn in seg.synapses() {
            prop_assert_eq!(syn.is_connected(), syn.permanence() >= CONNECTED_PERM);
            if syn.is_connected() {
                connected_count += 1;
            }
        }
        prop_assert_eq!(seg.n_active_conn(), connected_count);
        prop_assert_eq!(seg.n_active_all() as usize, n);
        prop_assert_eq!(seg.is_active(), connected_count >= threshold);
    }

    #[test]
    fn prop_advance_round_trip(
        perms in prop::collection::vec(0.0f32..1.0, 1..16),
        actives in prop::collection::vec(any::<bool>(), 16),
    ) {
        let n = perms.len();
        let mut state = ActivityState::new(n, 0);
        for c in 0..n {
            if actives[c] {
                state.set_cell_active(c);
            }
        }

        let mut seg = Segment::new(1);
        for (c, &p) in perms.iter().enumerate() {
            seg.create_synapse(SynapseSource::Cell(c), p);
        }
        seg.process(&state, CONNECTED_PERM);

        let was_active = seg.is_active();
        let n_conn = seg.n_active_conn();
        let n_all = seg.n_active_all();
        let connected: Vec<bool> = seg.synapses().iter().map(|s| s.is_connected()).collect();

        seg.advance();
        prop_assert_eq!(seg.was_active(), was_active);
        prop_assert_eq!(seg.n_prev_active_conn(), n_conn);
        prop_assert_eq!(seg.n_prev_active_all(), n_all);
        prop_assert!(!seg.is_active());
        prop_assert_eq!(seg.n_active_conn(), 0);
        for (syn, &was) in seg.synapses().iter().zip(connected.iter()) {
            prop_assert_eq!(syn.was_connected(), was);
            prop_assert!(!syn.is_connected());
        }

        // A second advance with no activity in between zeroes everything.
        seg.advance();
        prop_assert!(!seg.was_active());
        prop_assert_eq!(seg.n_prev_active_conn(), 0);
        prop_assert_eq!(seg.n_prev_active_all(), 0);
        for syn in seg.synapses() {
            prop_assert!(!syn.was_connected());
        }
    }

    #[test]
    fn prop_duty_cycles_and_boost_bounded(
        activity in prop::collection::vec(any::<bool>(), 0..200),
        min_duty in 0.0f32..1.0,
    ) {
        let mut col = Column::new(0, 0, 0, 0, 1, 1);
        for active in activity {
            col.set_active(active);
            col.perform_boosting(min_duty, 1, &Default::default());

            prop_assert!((0.0..=1.0).contains(&col.active_duty_cycle()));
            prop_assert!((0.0..=1.0).contains(&col.overlap_duty_cycle()));
            prop_assert!(col.boost() >= 1.0);
        }
    }

    #[test]
    fn prop_deterministic_runs(seed in any::<u64>()) {
        let params = RegionParams {
            input_width: 30,
            input_height: 1,
            cells_per_col: 2,
            seg_active_threshold: 2,
            new_synapse_count: 3,
            seed,
            ..RegionParams::default()
        };
        let mut a = Region::with_hardcoded_spatial(params.clone()).unwrap();
        let mut b = Region::with_hardcoded_spatial(params).unwrap();

        let mut frames = StdRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..8 {
            let bits: Vec<bool> = (0..30).map(|_| frames.gen_bool(0.2)).collect();
            a.set_input(&bits).unwrap();
            b.set_input(&bits).unwrap();
            a.run_once();
            b.run_once();

            prop_assert_eq!(a.active_columns(), b.active_columns());
            for ci in 0..30 {
                for li in 0..2 {
                    prop_assert_eq!(a.cell_active(ci, li), b.cell_active(ci, li));
                    prop_assert_eq!(a.cell_predicting(ci, li), b.cell_predicting(ci, li));
                    prop_assert_eq!(a.cell_learning(ci, li), b.cell_learning(ci, li));
                }
            }
            prop_assert_eq!(a.last_accuracy(), b.last_accuracy());
        }
        prop_assert_eq!(a.num_segments(0), b.num_segments(0));
        prop_assert_eq!(a.num_synapses(), b.num_synapses());
    }
}

#[test]
fn test_trained_determinism() {
    let params = RegionParams {
        input_width: 16,
        input_height: 16,
        col_grid_width: 8,
        col_grid_height: 8,
        pct_input_per_col: 0.1,
        cells_per_col: 2,
        seed: 77,
        ..RegionParams::default()
    };
    let mut a = Region::new(params.clone()).unwrap();
    let mut b = Region::new(params).unwrap();

    let mut frames = StdRng::seed_from_u64(1234);
    for _ in 0..15 {
        let bits: Vec<bool> = (0..256).map(|_| frames.gen_bool(0.15)).collect();
        a.set_input(&bits).unwrap();
        b.set_input(&bits).unwrap();
        a.run_once();
        b.run_once();

        assert_eq!(a.active_columns(), b.active_columns());
    }
    assert_eq!(a.num_segments(0), b.num_segments(0));
    assert_eq!(a.num_synapses(), b.num_synapses());
}

#[test]
fn test_quiet_region_stays_quiet() {
    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: 8,
        input_height: 1,
        cells_per_col: 2,
        seg_active_threshold: 1,
        ..RegionParams::default()
    })
    .unwrap();

    region.set_input(&[false; 8]).unwrap();
    region.run_once();
    region.run_once();

    for ci in 0..8 {
        assert!(!region.column_active(ci));
        for li in 0..2 {
            assert!(!region.cell_active(ci, li));
            assert!(!region.cell_predicting(ci, li));
        }
        assert_eq!(region.column_prediction_steps(ci), 0);
    }
    assert_eq!(region.last_accuracy(), (0.0, 0.0));
    assert_eq!(region.num_segments(0), 0);
}

#[test]
fn test_prediction_depths_stay_bounded() {
    // Overlapping windows make cells simultaneously learning and
    // predicting, which is the path that grows multi-step segments.
    let width = 40;
    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: width,
        input_height: 1,
        cells_per_col: 2,
        seg_active_threshold: 2,
        new_synapse_count: 3,
        ..RegionParams::default()
    })
    .unwrap();

    for step in 0..60 {
        let start = (step * 5) % width;
        let mut bits = vec![false; width];
        for k in 0..10 {
            bits[(start + k) % width] = true;
        }
        region.set_input(&bits).unwrap();
        region.run_once();

        for ci in 0..region.num_cols() {
            let steps = region.column_prediction_steps(ci);
            assert!(steps <= MAX_TIME_STEPS, "column depth out of range");
        }
    }

    assert!(region.num_segments(0) > 0);
    for ci in 0..region.num_cols() {
        for li in 0..region.cells_per_col() {
            for seg in region.column(ci).cell(li).segments() {
                let steps = seg.prediction_steps();
                assert!(
                    (1..=MAX_TIME_STEPS).contains(&steps),
                    "segment depth {} out of range",
                    steps
                );
                assert_eq!(seg.is_sequence(), steps == 1);
            }
        }
    }
}

#[test]
fn test_memory_usage_grows_with_learning() {
    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: 20,
        input_height: 1,
        cells_per_col: 1,
        seg_active_threshold: 2,
        new_synapse_count: 3,
        ..RegionParams::default()
    })
    .unwrap();

    let before = region.memory_usage();
    for step in 0..10 {
        let mut bits = vec![false; 20];
        for k in 0..5 {
            bits[(step * 5 + k) % 20] = true;
        }
        region.set_input(&bits).unwrap();
        region.run_once();
    }

    assert!(region.num_synapses() > 0);
    assert!(region.memory_usage() > before);
}

#[test]
fn test_config_file_round_trip() {
    let params = RegionParams {
        input_width: 50,
        input_height: 2,
        cells_per_col: 3,
        seed: 9,
        ..RegionParams::default()
    };

    let path = std::env::temp_dir().join("cortica_region_params_test.json");
    params.to_file(&path).unwrap();
    let restored = RegionParams::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(params, restored);

    // A restored configuration builds an equivalent region.
    let region = Region::new(restored).unwrap();
    assert_eq!(region.cells_per_col(), 3);
}

#[test]
fn test_accuracy_counts_match_definition() {
    // Alternating two-column sequence: once learned, A == P == AP each
    // step, giving 1.0 on both ratios; before learning both are 0/|A| and
    // 0/|P| with the zero-denominator convention mapping to 0.
    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: 2,
        input_height: 1,
        cells_per_col: 1,
        seg_active_threshold: 1,
        new_synapse_count: 1,
        ..RegionParams::default()
    })
    .unwrap();

    region.set_input(&[true, false]).unwrap();
    region.run_once();
    assert_eq!(region.last_accuracy(), (0.0, 0.0));

    for step in 1..9 {
        let bits = [step % 2 == 0, step % 2 == 1];
        region.set_input(&bits).unwrap();
        region.run_once();
    }
    assert_eq!(region.last_accuracy(), (1.0, 1.0));
}
