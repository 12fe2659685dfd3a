#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

//! Fills chained tables with random items and plots how they grow.
//!
//! Writes `capacity_growth.svg` and `longest_chain.svg` to the working directory
//! and prints the final statistics of every profiled configuration.

use chained_hash::{ChainedHashTable, TableConfig, TableStats};
use plotters::prelude::*;
use rand::Rng;

const TOTAL_ITEMS: usize = 50_000;
const SAMPLE_EVERY: usize = 500;
const INITIAL_CAPACITY: usize = 11;
// Exclusive upper bound for random keys
const KEY_RANGE: u64 = 1_000_000;

/// A configuration to profile and the label it gets in the plots
struct Profile {
    name: &'static str,
    config: TableConfig,
}

/// Table state captured every `SAMPLE_EVERY` inserts
struct Sample {
    items: usize,
    stats: TableStats,
}

fn profiles() -> Vec<Profile> {
    vec![
        Profile { name: "load 0.75", config: TableConfig::new(INITIAL_CAPACITY, 0.75) },
        Profile { name: "load 2.0", config: TableConfig::new(INITIAL_CAPACITY, 2.0) },
        Profile {
            name: "load 2.0, chain <= 4",
            config: TableConfig::new(INITIAL_CAPACITY, 2.0).with_max_chain_length(4),
        },
        Profile {
            name: "load 4.0, chain <= 6",
            config: TableConfig::new(INITIAL_CAPACITY, 4.0).with_max_chain_length(6),
        },
    ]
}

fn run_profile(config: TableConfig, keys: &[u64]) -> Result<Vec<Sample>, chained_hash::TableError> {
    let mut table = ChainedHashTable::from_config(config)?;
    let mut samples = Vec::with_capacity(keys.len() / SAMPLE_EVERY);

    for (inserted, &key) in keys.iter().enumerate() {
        table.insert(key);
        if (inserted + 1) % SAMPLE_EVERY == 0 {
            samples.push(Sample { items: inserted + 1, stats: table.stats() });
        }
    }

    println!("{}", table.stats());
    Ok(samples)
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    results: &[(&'static str, Vec<Sample>)],
    metric: fn(&TableStats) -> usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let max_y = results
        .iter()
        .flat_map(|(_, samples)| samples.iter().map(|sample| metric(&sample.stats)))
        .max()
        .unwrap_or(1) as f64 *
        1.1; // Add 10% margin

    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..TOTAL_ITEMS as f64, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Items Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for ((name, samples), color) in results.iter().zip(colors.iter().cycle()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.items as f64, metric(&sample.stats) as f64)),
                line_style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TOTAL_ITEMS).map(|_| rng.random_range(0..KEY_RANGE)).collect();

    let mut results = Vec::new();
    for profile in profiles() {
        println!("Profiling {} with {} items", profile.name, TOTAL_ITEMS);
        results.push((profile.name, run_profile(profile.config, &keys)?));
    }

    plot(
        "capacity_growth.svg",
        "Bucket Count as Items Are Inserted",
        "Capacity (buckets)",
        &results,
        |stats| stats.capacity,
    )?;
    plot(
        "longest_chain.svg",
        "Longest Chain as Items Are Inserted",
        "Longest Chain Length",
        &results,
        |stats| stats.longest_chain,
    )?;

    println!("Generated plot images: capacity_growth.svg, longest_chain.svg");
    Ok(())
}
