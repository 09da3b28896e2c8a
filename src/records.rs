use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One day of aggregated user activity.
///
/// `new_users + returning_users` is expected to equal `dau` but is not
/// validated anywhere; only the `dau <= mau` invariant is enforced at the
/// loading boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Daily active users
    pub dau: u64,
    /// Monthly active users
    pub mau: u64,
    pub new_users: u64,
    pub returning_users: u64,
    pub churned_users: u64,
    pub sessions: u64,
    pub avg_session_duration_min: f64,
}

/// NPS survey category derived from a 0-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpsCategory {
    Promoter,
    Passive,
    Detractor,
}

impl NpsCategory {
    /// Deterministic mapping from a survey score: >=9 Promoter, >=7 Passive,
    /// otherwise Detractor.
    pub fn from_score(score: u8) -> Self {
        if score >= 9 {
            NpsCategory::Promoter
        } else if score >= 7 {
            NpsCategory::Passive
        } else {
            NpsCategory::Detractor
        }
    }
}

impl fmt::Display for NpsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpsCategory::Promoter => write!(f, "Promoter"),
            NpsCategory::Passive => write!(f, "Passive"),
            NpsCategory::Detractor => write!(f, "Detractor"),
        }
    }
}

/// A single NPS survey response.
///
/// The category is stored alongside the score rather than derived at read
/// time; the stored column is authoritative for the NPS computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub date: NaiveDate,
    pub user_id: String,
    /// Survey score in [0, 10]
    pub nps_score: u8,
    pub category: NpsCategory,
}

/// Adoption counts for one feature on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAdoptionRecord {
    pub date: NaiveDate,
    pub feature: String,
    pub users_adopted: u64,
    pub total_users: u64,
}

/// Record types that carry an observation date.
///
/// Implemented by all three input record types so the date filter and the
/// ordering wrapper can stay generic.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for ActivityRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for FeedbackRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for FeatureAdoptionRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Date range for restricting a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive)
    pub start: NaiveDate,
    /// End date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new DateRange.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Creates a DateRange from a standard Range.
    pub fn from_range(range: Range<NaiveDate>) -> Self {
        DateRange {
            start: range.start,
            end: range.end,
        }
    }

    /// Returns true when `date` falls inside the inclusive interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_score_boundaries() {
        assert_eq!(NpsCategory::from_score(10), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(9), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(8), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(7), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(6), NpsCategory::Detractor);
        assert_eq!(NpsCategory::from_score(0), NpsCategory::Detractor);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        );
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 1, 18).unwrap()));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()));
    }
}
