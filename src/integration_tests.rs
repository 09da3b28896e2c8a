// Integration tests for the full load -> filter -> compute pipeline

use crate::dataset::{filter_by_date_range, DateOrdered};
use crate::datagen;
use crate::metrics::{self, ActivityMetric, DEFAULT_WINDOW};
use crate::records::DateRange;
use crate::store::{self, Datasets};
use chrono::{Duration, NaiveDate};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Generates 90 days of data, round-trips it through the CSV layer, and
/// returns the datasets exactly as the server would load them.
fn loaded_datasets() -> Datasets {
    let generated = datagen::generate_datasets(42, start_date(), 90);

    let activity = store::to_csv_bytes(&generated.activity).unwrap();
    let feedback = store::to_csv_bytes(&generated.feedback).unwrap();
    let features = store::to_csv_bytes(&generated.features).unwrap();

    Datasets::from_readers(
        activity.as_slice(),
        feedback.as_slice(),
        features.as_slice(),
    )
    .unwrap()
}

#[test]
fn generated_data_survives_the_csv_boundary() {
    let generated = datagen::generate_datasets(42, start_date(), 90);
    let loaded = loaded_datasets();
    assert_eq!(loaded.activity, generated.activity);
    assert_eq!(loaded.feedback, generated.feedback);
    assert_eq!(loaded.features, generated.features);
}

#[test]
fn full_render_pass_produces_in_range_kpis() {
    let datasets = loaded_datasets();
    let range = DateRange::new(start_date(), start_date() + Duration::days(89));

    let activity = DateOrdered::from_unsorted(filter_by_date_range(&datasets.activity, &range));
    let feedback = filter_by_date_range(&datasets.feedback, &range);
    let features = DateOrdered::from_unsorted(filter_by_date_range(&datasets.features, &range));

    let retention = metrics::retention_rate(&activity, DEFAULT_WINDOW);
    assert!((0.0..=100.0).contains(&retention));

    let churn = metrics::churn_rate(&activity, DEFAULT_WINDOW);
    assert!(churn > 0.0 && churn < 100.0);

    let nps = metrics::nps(&feedback);
    assert!((-100.0..=100.0).contains(&nps));

    let stickiness = metrics::dau_mau_ratio(&activity, DEFAULT_WINDOW);
    assert!(stickiness > 0.0 && stickiness < 100.0);

    let adoption = metrics::feature_adoption(&features, Some("Dark Mode"), DEFAULT_WINDOW);
    assert!(adoption > 0.0 && adoption <= 100.0);

    // 90 days of 0.5%/day trend: DAU growth over adjacent 30-day windows
    // should come out positive.
    assert!(metrics::growth_rate(&activity, ActivityMetric::Dau, DEFAULT_WINDOW) > 0.0);
}

#[test]
fn narrowing_then_widening_the_interval_recovers_a_superset() {
    let datasets = loaded_datasets();

    let narrow = DateRange::new(
        start_date() + Duration::days(30),
        start_date() + Duration::days(40),
    );
    let wide = DateRange::new(
        start_date() + Duration::days(20),
        start_date() + Duration::days(60),
    );

    let narrow_rows = filter_by_date_range(&datasets.activity, &narrow);
    let wide_rows = filter_by_date_range(&datasets.activity, &wide);

    assert!(!narrow_rows.is_empty());
    for row in &narrow_rows {
        assert!(wide_rows.contains(row));
    }
}

#[test]
fn kpis_are_stable_across_repeated_renders() {
    let datasets = loaded_datasets();
    let range = DateRange::new(start_date(), start_date() + Duration::days(89));

    let render = || {
        let activity =
            DateOrdered::from_unsorted(filter_by_date_range(&datasets.activity, &range));
        let feedback = filter_by_date_range(&datasets.feedback, &range);
        (
            metrics::retention_rate(&activity, DEFAULT_WINDOW),
            metrics::churn_rate(&activity, DEFAULT_WINDOW),
            metrics::nps(&feedback),
            metrics::dau_mau_ratio(&activity, DEFAULT_WINDOW),
            metrics::summary::summary_stats(&activity).unwrap(),
        )
    };

    assert_eq!(render(), render());
}

#[test]
fn summary_matches_the_latest_generated_row() {
    let datasets = loaded_datasets();
    let activity = DateOrdered::from_unsorted(datasets.activity.clone());
    let stats = metrics::summary::summary_stats(&activity).unwrap();

    let latest = datasets.activity.last().unwrap();
    assert_eq!(stats.current_dau, latest.dau);
    assert_eq!(stats.current_mau, latest.mau);
    assert_eq!(stats.total_sessions_today, latest.sessions);
}

#[test]
fn empty_interval_degrades_to_defined_zeros() {
    let datasets = loaded_datasets();
    // Interval before any generated data
    let range = DateRange::new(
        start_date() - Duration::days(100),
        start_date() - Duration::days(50),
    );

    let activity = DateOrdered::from_unsorted(filter_by_date_range(&datasets.activity, &range));
    let feedback = filter_by_date_range(&datasets.feedback, &range);

    assert_eq!(metrics::retention_rate(&activity, DEFAULT_WINDOW), 0.0);
    assert_eq!(metrics::churn_rate(&activity, DEFAULT_WINDOW), 0.0);
    assert_eq!(metrics::nps(&feedback), 0.0);
    assert_eq!(metrics::dau_mau_ratio(&activity, DEFAULT_WINDOW), 0.0);
    assert!(metrics::summary::summary_stats(&activity).is_err());
}
