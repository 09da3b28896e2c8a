use chrono::NaiveDate;
use pulseboard::{
    churn_rate, dau_mau_ratio, feature_adoption, filter_by_date_range, growth_rate, nps,
    retention_rate, summary_stats, ActivityMetric, ActivityRecord, CsvStore, DateOrdered,
    DateRange, FeatureAdoptionRecord, FeedbackRecord, NpsCategory, StoreError, DEFAULT_WINDOW,
};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Duration::days(n as i64)
}

fn activity_row(n: u32, returning: u64, churned: u64) -> ActivityRecord {
    ActivityRecord {
        date: day(n),
        dau: returning + 10,
        mau: (returning + 10) * 4,
        new_users: 10,
        returning_users: returning,
        churned_users: churned,
        sessions: 300,
        avg_session_duration_min: 12.0,
    }
}

#[test]
fn perfect_retention_scenario() {
    // 30 days with returning=100/day and churned=0/day across the window.
    let rows: Vec<ActivityRecord> = (0..30).map(|n| activity_row(n, 100, 0)).collect();
    let data = DateOrdered::from_unsorted(rows);
    assert_eq!(retention_rate(&data, DEFAULT_WINDOW), 100.0);
}

#[test]
fn nps_promoter_detractor_mix() {
    let mut responses: Vec<FeedbackRecord> = (0..9)
        .map(|i| FeedbackRecord {
            date: day(0),
            user_id: format!("user_{}", 1000 + i),
            nps_score: 9,
            category: NpsCategory::Promoter,
        })
        .collect();
    responses.push(FeedbackRecord {
        date: day(0),
        user_id: "user_2000".to_string(),
        nps_score: 1,
        category: NpsCategory::Detractor,
    });
    assert_eq!(nps(&responses), 80.0);
}

#[test]
fn growth_threshold_is_one_window_of_rows() {
    // 20 rows against window=30: insufficient history is a defined zero.
    let rows: Vec<ActivityRecord> = (0..20).map(|n| activity_row(n, 100 + n as u64, 5)).collect();
    let data = DateOrdered::from_unsorted(rows);
    assert_eq!(growth_rate(&data, ActivityMetric::Dau, 30), 0.0);
}

#[test]
fn feature_adoption_ignores_the_window_argument() {
    let rows: Vec<FeatureAdoptionRecord> = (0..30)
        .map(|n| FeatureAdoptionRecord {
            date: day(n),
            feature: "X".to_string(),
            users_adopted: 50,
            total_users: 100,
        })
        .collect();
    let data = DateOrdered::from_unsorted(rows);
    for window in [1, 7, 30, 90, 365] {
        assert_eq!(feature_adoption(&data, Some("X"), window), 50.0);
    }
}

#[test]
fn degenerate_inputs_never_block_other_metrics() {
    // Activity data exists, feedback is empty: every metric still answers.
    let rows: Vec<ActivityRecord> = (0..30).map(|n| activity_row(n, 100, 4)).collect();
    let data = DateOrdered::from_unsorted(rows);

    assert!(retention_rate(&data, DEFAULT_WINDOW) > 0.0);
    assert!(churn_rate(&data, DEFAULT_WINDOW) > 0.0);
    assert!(dau_mau_ratio(&data, DEFAULT_WINDOW) > 0.0);
    assert_eq!(nps(&[]), 0.0);
    assert!(summary_stats(&data).is_ok());
}

#[test]
fn write_then_load_through_the_filesystem() {
    let dir = std::env::temp_dir().join(format!("pulseboard-test-{}", std::process::id()));
    let datasets = pulseboard::generate_datasets(7, day(0), 45);
    pulseboard::write_csvs(&datasets, &dir).unwrap();

    let loaded = CsvStore::new(&dir).load().unwrap();
    assert_eq!(loaded.activity, datasets.activity);
    assert_eq!(loaded.feedback, datasets.feedback);
    assert_eq!(loaded.features, datasets.features);

    // Filter to the back half and recompute a KPI over the loaded copy.
    let range = DateRange::new(day(20), day(44));
    let filtered = DateOrdered::from_unsorted(filter_by_date_range(&loaded.activity, &range));
    assert_eq!(filtered.len(), 25);
    let rate = retention_rate(&filtered, DEFAULT_WINDOW);
    assert!((0.0..=100.0).contains(&rate));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn partially_present_directory_is_still_missing_input() {
    let dir = std::env::temp_dir().join(format!("pulseboard-partial-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("activity.csv"), b"date,dau\n").unwrap();

    match CsvStore::new(&dir).load() {
        Err(StoreError::MissingInput(path)) => assert!(path.ends_with("feedback.csv")),
        other => panic!("expected missing input, got {:?}", other.map(|_| ())),
    }

    std::fs::remove_dir_all(&dir).unwrap();
}
