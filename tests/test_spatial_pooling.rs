//! Spatial pooler integration tests.
//!
//! Covers:
//! - Hardcoded input-to-column mapping
//! - Overlap gating and inhibition behavior
//! - Proximal learning and boosting under spatial learning
//! - Trained initialization topology

use cortica::{Region, RegionParams, CONNECTED_PERM};

fn trained_params() -> RegionParams {
    RegionParams {
        input_width: 16,
        input_height: 16,
        col_grid_width: 8,
        col_grid_height: 8,
        pct_input_per_col: 0.1,
        seed: 11,
        ..RegionParams::default()
    }
}

#[test]
fn test_hardcoded_one_hot_maps_exactly() {
    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: 6,
        input_height: 1,
        cells_per_col: 1,
        seg_active_threshold: 1,
        ..RegionParams::default()
    })
    .unwrap();

    for hot in 0..6 {
        let mut bits = [false; 6];
        bits[hot] = true;
        region.set_input(&bits).unwrap();
        region.run_once();

        assert_eq!(region.active_columns(), vec![hot]);
    }
}

#[test]
fn test_equal_overlaps_all_win() {
    // Full-permanence synapses over a fully lit input give every column
    // the same overlap; the k-th score then equals each column's own
    // score, so every column wins inhibition.
    let mut region = Region::new(RegionParams {
        full_default_spatial_permanence: true,
        spatial_learning: false,
        temporal_learning: false,
        ..trained_params()
    })
    .unwrap();

    let bits = vec![true; 256];
    region.set_input(&bits).unwrap();
    region.run_once();

    assert_eq!(region.active_columns().len(), region.num_cols());
}

#[test]
fn test_dark_input_activates_nothing() {
    let mut region = Region::new(RegionParams {
        full_default_spatial_permanence: true,
        ..trained_params()
    })
    .unwrap();

    let bits = vec![false; 256];
    region.set_input(&bits).unwrap();
    region.run_once();

    assert!(region.active_columns().is_empty());
    assert_eq!(region.last_accuracy(), (0.0, 0.0));
}

#[test]
fn test_min_overlap_gates_weak_columns() {
    let region = Region::new(trained_params()).unwrap();
    // 10% of a 256-bit plane at 7% minimum overlap.
    assert_eq!(region.min_overlap(), 2);

    let mut region = Region::new(RegionParams {
        full_default_spatial_permanence: true,
        spatial_learning: false,
        ..trained_params()
    })
    .unwrap();

    // A single lit bit cannot reach the overlap floor anywhere.
    let mut bits = vec![false; 256];
    bits[100] = true;
    region.set_input(&bits).unwrap();
    region.run_once();
    assert!(region.active_columns().is_empty());
}

#[test]
fn test_gaussian_init_spreads_connectivity() {
    let region = Region::new(trained_params()).unwrap();

    let mut connected = 0usize;
    let mut total = 0usize;
    for ci in 0..region.num_cols() {
        for syn in region.column(ci).proximal().synapses() {
            total += 1;
            if syn.permanence() >= CONNECTED_PERM {
                connected += 1;
            }
        }
    }

    assert!(total > 0);
    // The Gaussian draw centers on the connection threshold but the
    // locality bias decays fast with distance: a meaningful fraction
    // connects near each column's center, the far field does not.
    assert!(connected * 10 > total, "too few connected: {connected}/{total}");
    assert!(connected < total, "every synapse connected");
    assert!(region.inhibition_radius() > 0.0);
}

#[test]
fn test_locality_radius_bounds_receptive_fields() {
    let radius = 3usize;
    let region = Region::new(RegionParams {
        input_width: 32,
        input_height: 32,
        col_grid_width: 8,
        col_grid_height: 8,
        locality_radius: radius,
        pct_input_per_col: 0.5,
        seed: 5,
        ..RegionParams::default()
    })
    .unwrap();

    for ci in 0..region.num_cols() {
        let col = region.column(ci);
        let (ix, iy) = col.input_center();
        for syn in col.proximal().synapses() {
            if let cortica::SynapseSource::Input(idx) = syn.source() {
                let x = idx % 32;
                let y = idx / 32;
                assert!(
                    x + radius >= ix && x <= ix + radius,
                    "x {} outside radius of center {}",
                    x,
                    ix
                );
                assert!(y + radius >= iy && y <= iy + radius);
            } else {
                panic!("proximal synapse must source an input bit");
            }
        }
    }
}

#[test]
fn test_spatial_learning_reinforces_active_inputs() {
    let mut region = Region::new(trained_params()).unwrap();

    let mut bits = vec![false; 256];
    for i in 0..256 {
        if i % 3 == 0 {
            bits[i] = true;
        }
    }
    region.set_input(&bits).unwrap();
    region.run_once();

    let active = region.active_columns();
    assert!(!active.is_empty());

    // Snapshot an active column's proximal permanences, then run the same
    // frame again: synapses on lit bits must not weaken, synapses on dark
    // bits must not strengthen.
    let ci = active[0];
    let before: Vec<(usize, f32)> = region
        .column(ci)
        .proximal()
        .synapses()
        .iter()
        .map(|s| match s.source() {
            cortica::SynapseSource::Input(idx) => (idx, s.permanence()),
            _ => unreachable!(),
        })
        .collect();

    region.set_input(&bits).unwrap();
    region.run_once();

    if region.column_active(ci) {
        for (k, syn) in region.column(ci).proximal().synapses().iter().enumerate() {
            let (idx, old) = before[k];
            if bits[idx] {
                assert!(syn.permanence() >= old);
            } else {
                assert!(syn.permanence() <= old);
            }
        }
    }
}

#[test]
fn test_boost_rises_for_starved_columns() {
    let mut region = Region::new(RegionParams {
        spatial_learning: true,
        temporal_learning: false,
        seed: 23,
        ..trained_params()
    })
    .unwrap();

    // Drive the same corner pattern for a while: columns that never win
    // decay their duty cycles toward starvation and their boost ramps.
    let mut bits = vec![false; 256];
    for y in 0..4 {
        for x in 0..4 {
            bits[y * 16 + x] = true;
        }
    }

    for _ in 0..50 {
        region.set_input(&bits).unwrap();
        region.run_once();
    }

    let max_boost = (0..region.num_cols())
        .map(|ci| region.column(ci).boost())
        .fold(0.0f32, f32::max);
    assert!(
        max_boost >= 1.0,
        "boost must never drop below one, got {max_boost}"
    );

    // Duty cycles stay inside [0, 1] through sustained updates.
    for ci in 0..region.num_cols() {
        let col = region.column(ci);
        assert!((0.0..=1.0).contains(&col.active_duty_cycle()));
        assert!((0.0..=1.0).contains(&col.overlap_duty_cycle()));
    }
}

#[test]
fn test_inhibition_radius_tracks_learning() {
    let mut region = Region::new(trained_params()).unwrap();
    let initial = region.inhibition_radius();
    assert!(initial >= 0.0);

    let mut bits = vec![false; 256];
    for i in (0..256).step_by(2) {
        bits[i] = true;
    }
    for _ in 0..20 {
        region.set_input(&bits).unwrap();
        region.run_once();
    }

    let radius = region.inhibition_radius();
    assert!(radius.is_finite());
    assert!(radius >= 0.0);
}
