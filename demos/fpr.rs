#![allow(clippy::uninlined_format_args)]
mod common;

use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use common::{generate_random_string, generate_test_data};
use scalable_bloom_rs::{
    BloomFilterOps, BloomFilterStats, FilterConfigBuilder, PartitionedFilter,
};
use std::collections::HashSet;

const FILL_RATIO: f64 = 0.5;
const TEST_SAMPLES: usize = 100_000; // Number of unknown elements to test for FPR

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║  Partitioned Bloom Filter - False Positive Rate Tester    ║");
    println!("╚═══════════════════════════════════════════════════════════╝\n");

    println!("Configuration:");
    println!("  • Fill Ratio: {}%", FILL_RATIO * 100.0);
    println!("  • Test Samples: {}", TEST_SAMPLES);

    let capacities = [1_000, 10_000, 100_000];
    let target_fprs = [0.001, 0.01, 0.05];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Capacity").set_alignment(CellAlignment::Center),
            Cell::new("Target FPR").set_alignment(CellAlignment::Center),
            Cell::new("k / s").set_alignment(CellAlignment::Center),
            Cell::new("Known Positives").set_alignment(CellAlignment::Center),
            Cell::new("False Positives").set_alignment(CellAlignment::Center),
            Cell::new("Observed FPR").set_alignment(CellAlignment::Center),
            Cell::new("Estimated FPR").set_alignment(CellAlignment::Center),
            Cell::new("Deviation").set_alignment(CellAlignment::Center),
        ]);

    for &capacity in &capacities {
        for &target_fpr in &target_fprs {
            let config = FilterConfigBuilder::default()
                .capacity(capacity)
                .error_rate(target_fpr)
                .fill_ratio(FILL_RATIO)
                .build()?;
            let mut filter = PartitionedFilter::new(config)?;

            print!(
                "Testing capacity={}, target_fpr={:.2}%: ",
                capacity,
                target_fpr * 100.0
            );
            let known_elements = generate_test_data(capacity);
            let known_set: HashSet<&String> = known_elements.iter().collect();

            for element in &known_elements {
                filter.insert(element.as_bytes());
            }

            let true_positives = known_elements
                .iter()
                .filter(|element| filter.contains(element.as_bytes()))
                .count();

            let mut tested = 0;
            let mut false_positives = 0;
            while tested < TEST_SAMPLES {
                let unknown = generate_random_string(32);
                // Skip if we accidentally generated a known element
                if known_set.contains(&unknown) {
                    continue;
                }
                tested += 1;
                if filter.contains(unknown.as_bytes()) {
                    false_positives += 1;
                }
            }

            let observed_fpr = false_positives as f64 / TEST_SAMPLES as f64;
            let deviation = (observed_fpr - target_fpr) / target_fpr * 100.0;
            println!("Done!");

            table.add_row(vec![
                Cell::new(format!("{}", capacity)),
                Cell::new(format!("{:.2}%", target_fpr * 100.0)),
                Cell::new(format!(
                    "{} / {}",
                    filter.num_hashes(),
                    filter.partition_size()
                )),
                Cell::new(format!(
                    "{}/{}",
                    true_positives,
                    known_elements.len()
                )),
                Cell::new(format!("{}/{}", false_positives, TEST_SAMPLES)),
                Cell::new(format!("{:.4}%", observed_fpr * 100.0)),
                Cell::new(format!(
                    "{:.4}%",
                    filter.estimated_error_rate() * 100.0
                )),
                Cell::new(format!("{:+.2}%", deviation)),
            ]);
        }
    }

    println!("\nResults:");
    println!("{}", table);

    Ok(())
}
