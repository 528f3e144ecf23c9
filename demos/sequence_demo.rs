//! Feed a repeating windowed sequence through a hardcoded region and watch
//! the prediction accuracy climb as transitions are learned.
//!
//! Run with: `cargo run --example sequence_demo`

use cortica::{Region, RegionParams, Result};

fn main() -> Result<()> {
    let width = 100;
    let windows = 5;
    let window_size = width / windows;

    let mut region = Region::with_hardcoded_spatial(RegionParams {
        input_width: width,
        input_height: 1,
        cells_per_col: 1,
        seg_active_threshold: 3,
        new_synapse_count: 4,
        ..RegionParams::default()
    })?;

    println!("{}", cortica::version());
    println!(
        "region: {} columns, repeating sequence of {} windows\n",
        region.num_cols(),
        windows
    );

    for rep in 0..6 {
        let mut act_sum = 0.0;
        let mut pred_sum = 0.0;
        for win in 0..windows {
            let mut bits = vec![false; width];
            for i in win * window_size..(win + 1) * window_size {
                bits[i] = true;
            }
            region.set_input(&bits)?;
            region.run_once();

            let (activation, prediction) = region.last_accuracy();
            act_sum += activation;
            pred_sum += prediction;
        }
        println!(
            "repetition {}: activation accuracy {:.2}, prediction accuracy {:.2}",
            rep + 1,
            act_sum / windows as f32,
            pred_sum / windows as f32,
        );
    }

    println!(
        "\nlearned {} sequence segments over {} synapses ({} KB)",
        region.num_segments(1),
        region.num_synapses(),
        region.memory_usage() / 1024,
    );
    Ok(())
}
