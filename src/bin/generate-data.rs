//! Synthetic Data Generator Binary
//!
//! Produces the three input CSVs with a fixed seed so runs are reproducible.
//! Configure via SEED, DATA_DIR, DAYS and START_DATE environment variables.

use chrono::{Duration, NaiveDate, Utc};
use pulseboard::datagen::{self, DEFAULT_DAYS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let days = std::env::var("DAYS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_DAYS);
    let start = match std::env::var("START_DATE") {
        Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")?,
        Err(_) => Utc::now().date_naive() - Duration::days(days as i64),
    };

    println!("🔄 Generating synthetic datasets...");
    println!("   Seed: {}", seed);
    println!("   Days: {} (from {})", days, start);
    println!("   Output: {}/", data_dir);

    let datasets = datagen::generate_datasets(seed, start, days);
    datagen::write_csvs(&datasets, &data_dir)?;

    println!("✅ activity.csv: {} rows", datasets.activity.len());
    println!("✅ feedback.csv: {} rows", datasets.feedback.len());
    println!("✅ features.csv: {} rows", datasets.features.len());
    println!("✅ All datasets generated successfully!");

    Ok(())
}
