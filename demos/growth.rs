#![allow(clippy::uninlined_format_args)]
mod common;

use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use common::{generate_random_string, generate_test_data};
use scalable_bloom_rs::{
    BloomFilterOps, BloomFilterStats, ScalableFilter,
    ScalableFilterConfigBuilder, common::bits2hr,
};

const INITIAL_CAPACITY: usize = 1_000;
const ERROR_RATE: f64 = 0.001;
const TIGHTENING_RATIO: f64 = 0.9;
const TEST_SAMPLES: usize = 50_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║  Scalable Bloom Filter - Growth Tracker                   ║");
    println!("╚═══════════════════════════════════════════════════════════╝\n");

    println!("Configuration:");
    println!("  • Initial Capacity: {}", INITIAL_CAPACITY);
    println!("  • Error Rate: {}%", ERROR_RATE * 100.0);
    println!("  • Tightening Ratio: {}", TIGHTENING_RATIO);

    let config = ScalableFilterConfigBuilder::default()
        .capacity(INITIAL_CAPACITY)
        .error_rate(ERROR_RATE)
        .tightening_ratio(TIGHTENING_RATIO)
        .build()?;
    let mut filter = ScalableFilter::new(config)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Inserted").set_alignment(CellAlignment::Center),
            Cell::new("Sub-filters").set_alignment(CellAlignment::Center),
            Cell::new("Memory").set_alignment(CellAlignment::Center),
            Cell::new("Active Fill").set_alignment(CellAlignment::Center),
            Cell::new("Compound FPR").set_alignment(CellAlignment::Center),
            Cell::new("Observed FPR").set_alignment(CellAlignment::Center),
        ]);

    for step in [1_000, 5_000, 20_000, 100_000] {
        let batch = generate_test_data(step - filter.insert_count());
        for element in &batch {
            filter.insert(element.as_bytes());
        }

        // Unknown keys are 24 chars, known ones 32, so they never collide
        let false_positives = (0..TEST_SAMPLES)
            .filter(|_| filter.contains(generate_random_string(24).as_bytes()))
            .count();
        let observed_fpr = false_positives as f64 / TEST_SAMPLES as f64;

        table.add_row(vec![
            Cell::new(format!("{}", filter.insert_count())),
            Cell::new(format!("{}", filter.sub_filter_count())),
            Cell::new(bits2hr(filter.total_bits())),
            Cell::new(format!("{:.4}", filter.estimated_fill_ratio())),
            Cell::new(format!("{:.4}%", filter.compound_error_rate() * 100.0)),
            Cell::new(format!("{:.4}%", observed_fpr * 100.0)),
        ]);
    }

    println!("\nResults:");
    println!("{}", table);

    println!("\nPer sub-filter:");
    for (index, sub) in filter.sub_filters().iter().enumerate() {
        println!(
            "  #{:<3} e={:.6} k={:<3} s={:<8} fill={:.4}",
            index,
            sub.error_rate(),
            sub.num_hashes(),
            sub.partition_size(),
            sub.estimated_fill_ratio()
        );
    }

    Ok(())
}
