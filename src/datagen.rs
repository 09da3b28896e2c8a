//! Synthetic dataset generation for demos and fixtures.
//!
//! Randomness comes from an explicitly passed [`SeededRng`] rather than a
//! process-global seed, so the same seed always produces byte-identical
//! CSVs and tests can construct exact fixtures.

use crate::records::{ActivityRecord, FeatureAdoptionRecord, FeedbackRecord, NpsCategory};
use crate::store::{self, Datasets, StoreError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::path::Path;

/// Default number of generated days.
pub const DEFAULT_DAYS: usize = 90;

/// Probability weights for survey scores 0..=10, skewed toward promoters.
const SCORE_WEIGHTS: [f64; 11] = [
    0.02, 0.02, 0.03, 0.04, 0.05, 0.08, 0.10, 0.15, 0.15, 0.18, 0.18,
];

/// Generated features with their base adoption rates.
const FEATURES: [(&str, f64); 6] = [
    ("Dark Mode", 0.65),
    ("Export Report", 0.45),
    ("Advanced Filters", 0.30),
    ("Mobile App", 0.55),
    ("API Integration", 0.15),
    ("Collaborative Editing", 0.40),
];

/// Deterministic xorshift64* generator.
///
/// Not cryptographic; good enough for plausible-looking demo data and
/// cheap enough to avoid pulling a dependency in for it.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Creates a generator from a seed. Zero is remapped since xorshift
    /// state must be non-zero.
    pub fn new(seed: u64) -> Self {
        SeededRng {
            state: if seed == 0 { 0x9E3779B97F4A7C15 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.state = s;
        s.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform float in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi).
    pub fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo < hi);
        lo + self.next_u64() % (hi - lo)
    }

    /// Draws a survey score from the weighted 0..=10 distribution.
    fn score(&mut self) -> u8 {
        let draw = self.next_f64();
        let mut cumulative = 0.0;
        for (score, weight) in SCORE_WEIGHTS.iter().enumerate() {
            cumulative += weight;
            if draw < cumulative {
                return score as u8;
            }
        }
        10
    }
}

/// Generates `days` of daily activity starting at `start`.
///
/// Weekly seasonality (weekend dip), a 0.5%/day growth trend and +/-10%
/// noise on DAU; the derived columns keep the loader's invariants intact.
pub fn generate_activity(rng: &mut SeededRng, start: NaiveDate, days: usize) -> Vec<ActivityRecord> {
    let mut rows = Vec::with_capacity(days);

    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        let mut base_dau = 5000.0;
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            base_dau *= 0.7;
        }

        let growth_factor = 1.0 + offset as f64 * 0.005;
        let dau = (base_dau * growth_factor * rng.uniform(0.9, 1.1)) as u64;

        let mau = (dau as f64 * rng.uniform(3.5, 4.5)) as u64;
        let new_users = (dau as f64 * rng.uniform(0.05, 0.15)) as u64;
        let returning_users = dau - new_users;
        let churned_users = (mau as f64 * rng.uniform(0.02, 0.05)) as u64;

        rows.push(ActivityRecord {
            date,
            dau,
            mau,
            new_users,
            returning_users,
            churned_users,
            sessions: (dau as f64 * rng.uniform(1.5, 2.5)) as u64,
            avg_session_duration_min: (rng.uniform(8.0, 15.0) * 100.0).round() / 100.0,
        });
    }

    rows
}

/// Generates 20-50 NPS responses per day; categories derive from the score.
pub fn generate_feedback(rng: &mut SeededRng, start: NaiveDate, days: usize) -> Vec<FeedbackRecord> {
    let mut rows = Vec::new();

    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        let responses = rng.range_u64(20, 50);

        for _ in 0..responses {
            let score = rng.score();
            rows.push(FeedbackRecord {
                date,
                user_id: format!("user_{}", rng.range_u64(1000, 10000)),
                nps_score: score,
                category: NpsCategory::from_score(score),
            });
        }
    }

    rows
}

/// Generates per-feature adoption rows sharing a daily total-user count.
pub fn generate_features(
    rng: &mut SeededRng,
    start: NaiveDate,
    days: usize,
) -> Vec<FeatureAdoptionRecord> {
    let mut rows = Vec::with_capacity(days * FEATURES.len());

    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        let total_users = rng.range_u64(4500, 5500);

        for (feature, base_rate) in FEATURES {
            let adoption_rate = base_rate * rng.uniform(0.9, 1.1);
            rows.push(FeatureAdoptionRecord {
                date,
                feature: feature.to_string(),
                users_adopted: (total_users as f64 * adoption_rate) as u64,
                total_users,
            });
        }
    }

    rows
}

/// Generates all three datasets from one seed.
pub fn generate_datasets(seed: u64, start: NaiveDate, days: usize) -> Datasets {
    let mut rng = SeededRng::new(seed);
    Datasets {
        activity: generate_activity(&mut rng, start, days),
        feedback: generate_feedback(&mut rng, start, days),
        features: generate_features(&mut rng, start, days),
    }
}

/// Writes the datasets as the three CSVs the loader expects.
pub fn write_csvs(datasets: &Datasets, dir: impl AsRef<Path>) -> Result<(), StoreError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    std::fs::write(
        dir.join(store::ACTIVITY_FILE),
        store::to_csv_bytes(&datasets.activity)?,
    )?;
    std::fs::write(
        dir.join(store::FEEDBACK_FILE),
        store::to_csv_bytes(&datasets.feedback)?,
    )?;
    std::fs::write(
        dir.join(store::FEATURES_FILE),
        store::to_csv_bytes(&datasets.features)?,
    )?;

    Ok(())
}
