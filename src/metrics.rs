//! KPI Calculations
//!
//! Stateless aggregation functions over trailing windows of date-ordered
//! data. Each function takes a `DateOrdered` dataset (already restricted to
//! the display interval by the caller), reads the last N rows, and returns a
//! single rounded scalar. Degenerate inputs — short windows, zero
//! denominators, empty datasets — produce a defined 0.0, never a fault.

pub mod primitives;
pub mod summary;

use crate::dataset::DateOrdered;
use crate::records::{ActivityRecord, FeatureAdoptionRecord, FeedbackRecord, NpsCategory};
use self::primitives::{mean, round_to};
use std::fmt;
use std::str::FromStr;

/// Default trailing-window length in days.
pub const DEFAULT_WINDOW: usize = 30;

/// Fixed window used by [`feature_adoption`] regardless of the caller's
/// argument. See that function for the rationale.
pub const FEATURE_ADOPTION_WINDOW: usize = 30;

/// Errors produced by the KPI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// The dataset is empty where at least one row is required.
    NoData,
    /// Unrecognized activity column name.
    UnknownMetric(String),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::NoData => write!(f, "No data available"),
            MetricsError::UnknownMetric(name) => write!(f, "Unknown activity metric: {}", name),
        }
    }
}

impl std::error::Error for MetricsError {}

/// Numeric column of [`ActivityRecord`] that [`growth_rate`] can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityMetric {
    Dau,
    Mau,
    NewUsers,
    ReturningUsers,
    ChurnedUsers,
    Sessions,
    AvgSessionDurationMin,
}

impl ActivityMetric {
    /// Extracts this column's value from a record.
    pub fn value(&self, record: &ActivityRecord) -> f64 {
        match self {
            ActivityMetric::Dau => record.dau as f64,
            ActivityMetric::Mau => record.mau as f64,
            ActivityMetric::NewUsers => record.new_users as f64,
            ActivityMetric::ReturningUsers => record.returning_users as f64,
            ActivityMetric::ChurnedUsers => record.churned_users as f64,
            ActivityMetric::Sessions => record.sessions as f64,
            ActivityMetric::AvgSessionDurationMin => record.avg_session_duration_min,
        }
    }

    /// The column name as it appears in the activity CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityMetric::Dau => "dau",
            ActivityMetric::Mau => "mau",
            ActivityMetric::NewUsers => "new_users",
            ActivityMetric::ReturningUsers => "returning_users",
            ActivityMetric::ChurnedUsers => "churned_users",
            ActivityMetric::Sessions => "sessions",
            ActivityMetric::AvgSessionDurationMin => "avg_session_duration_min",
        }
    }
}

impl fmt::Display for ActivityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityMetric {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dau" => Ok(ActivityMetric::Dau),
            "mau" => Ok(ActivityMetric::Mau),
            "new_users" => Ok(ActivityMetric::NewUsers),
            "returning_users" => Ok(ActivityMetric::ReturningUsers),
            "churned_users" => Ok(ActivityMetric::ChurnedUsers),
            "sessions" => Ok(ActivityMetric::Sessions),
            "avg_session_duration_min" => Ok(ActivityMetric::AvgSessionDurationMin),
            _ => Err(MetricsError::UnknownMetric(s.to_string())),
        }
    }
}

/// Retention rate over the trailing window, as a percentage.
///
/// sum(returning_users) / (sum(returning_users) + sum(churned_users)) over
/// the last `window` rows, times 100, rounded to 2 decimals. Returns 0.0
/// when both sums are zero.
pub fn retention_rate(data: &DateOrdered<ActivityRecord>, window: usize) -> f64 {
    let recent = data.last_n(window);
    let returning: u64 = recent.iter().map(|r| r.returning_users).sum();
    let churned: u64 = recent.iter().map(|r| r.churned_users).sum();

    let denominator = returning + churned;
    if denominator == 0 {
        return 0.0;
    }

    round_to(returning as f64 / denominator as f64 * 100.0, 2)
}

/// Churn rate over the trailing window, as a percentage.
///
/// Total churned users over the last `window` rows divided by
/// mean(mau) x `window`, times 100, rounded to 2 decimals. Returns 0.0 on
/// zero mean MAU.
///
/// The denominator normalizes churned users against cumulative MAU-days and
/// multiplies by the requested `window` even when fewer rows exist. This is
/// an unusual formula but a deliberate modeling choice carried over from the
/// product definition of the KPI; do not replace it with a per-period churn
/// formula.
pub fn churn_rate(data: &DateOrdered<ActivityRecord>, window: usize) -> f64 {
    let recent = data.last_n(window);
    let churned: u64 = recent.iter().map(|r| r.churned_users).sum();
    let maus: Vec<f64> = recent.iter().map(|r| r.mau as f64).collect();

    let avg_mau = mean(&maus);
    if avg_mau == 0.0 {
        return 0.0;
    }

    round_to(churned as f64 / (avg_mau * window as f64) * 100.0, 2)
}

/// Net Promoter Score in [-100, 100], rounded to 1 decimal.
///
/// 100 x (promoters - detractors) / total responses, using the stored
/// category column. Returns 0.0 for empty input.
pub fn nps(feedback: &[FeedbackRecord]) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }

    let promoters = feedback
        .iter()
        .filter(|r| r.category == NpsCategory::Promoter)
        .count() as f64;
    let detractors = feedback
        .iter()
        .filter(|r| r.category == NpsCategory::Detractor)
        .count() as f64;

    round_to((promoters - detractors) / feedback.len() as f64 * 100.0, 1)
}

/// DAU/MAU stickiness ratio over the trailing window, as a percentage.
///
/// 100 x mean(dau) / mean(mau) over the last `window` rows, rounded to
/// 2 decimals. Returns 0.0 on zero mean MAU.
pub fn dau_mau_ratio(data: &DateOrdered<ActivityRecord>, window: usize) -> f64 {
    let recent = data.last_n(window);
    let daus: Vec<f64> = recent.iter().map(|r| r.dau as f64).collect();
    let maus: Vec<f64> = recent.iter().map(|r| r.mau as f64).collect();

    let avg_mau = mean(&maus);
    if avg_mau == 0.0 {
        return 0.0;
    }

    round_to(mean(&daus) / avg_mau * 100.0, 2)
}

/// Feature adoption rate as a percentage, rounded to 2 decimals.
///
/// When `feature` is given, rows are first restricted to that feature. The
/// rate is 100 x mean(users_adopted) / mean(total_users) over the last
/// [`FEATURE_ADOPTION_WINDOW`] rows of the (possibly restricted) data.
///
/// The `_window` argument is accepted for signature parity with the other
/// KPIs but ignored: this metric always uses a 30-row window. Unifying the
/// window semantics is a product decision, not a code fix, so the
/// inconsistency is kept.
pub fn feature_adoption(
    data: &DateOrdered<FeatureAdoptionRecord>,
    feature: Option<&str>,
    _window: usize,
) -> f64 {
    let restricted: Vec<&FeatureAdoptionRecord> = match feature {
        Some(name) => data.records().iter().filter(|r| r.feature == name).collect(),
        None => data.records().iter().collect(),
    };

    let start = restricted.len().saturating_sub(FEATURE_ADOPTION_WINDOW);
    let recent = &restricted[start..];

    let adopted: Vec<f64> = recent.iter().map(|r| r.users_adopted as f64).collect();
    let totals: Vec<f64> = recent.iter().map(|r| r.total_users as f64).collect();

    let avg_total = mean(&totals);
    if avg_total == 0.0 {
        return 0.0;
    }

    round_to(mean(&adopted) / avg_total * 100.0, 2)
}

/// Signed growth rate of one activity column, as a percentage.
///
/// Compares mean(`metric`) over the most recent `window` rows against the
/// mean over the `window` rows immediately preceding them. Returns 0.0 when
/// fewer than `window` rows exist (insufficient history, not an error) and
/// 0.0 when the prior-period mean is zero. Rounded to 2 decimals.
///
/// With between `window` and `2*window` rows the prior period is taken as
/// the first `window` rows of the last `2*window`, which overlaps the recent
/// period. That mirrors the original tail/head slicing exactly.
pub fn growth_rate(
    data: &DateOrdered<ActivityRecord>,
    metric: ActivityMetric,
    window: usize,
) -> f64 {
    if data.len() < window {
        return 0.0;
    }

    let recent: Vec<f64> = data.last_n(window).iter().map(|r| metric.value(r)).collect();

    let trailing_two = data.last_n(window * 2);
    let prior_len = trailing_two.len().min(window);
    let prior: Vec<f64> = trailing_two[..prior_len]
        .iter()
        .map(|r| metric.value(r))
        .collect();

    let prior_avg = mean(&prior);
    if prior_avg == 0.0 {
        return 0.0;
    }

    round_to((mean(&recent) - prior_avg) / prior_avg * 100.0, 2)
}
