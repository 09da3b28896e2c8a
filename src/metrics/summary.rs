//! Dashboard snapshot derived from the most recent activity rows.

use super::primitives::{mean, round_to};
use super::MetricsError;
use crate::dataset::DateOrdered;
use crate::records::ActivityRecord;
use serde::Serialize;

/// Rows averaged for the session-duration figure.
const SESSION_DURATION_WINDOW: usize = 7;

/// Latest-row snapshot shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub current_dau: u64,
    pub current_mau: u64,
    /// Mean of avg_session_duration_min over the last 7 rows, 1 decimal.
    pub avg_session_duration: f64,
    pub total_sessions_today: u64,
}

/// Builds the snapshot from the last row plus a 7-row trailing mean.
///
/// An empty dataset is a typed error rather than an undefined last-row read:
/// callers refuse to render the summary instead of panicking.
pub fn summary_stats(data: &DateOrdered<ActivityRecord>) -> Result<SummaryStats, MetricsError> {
    let latest = data.last().ok_or(MetricsError::NoData)?;

    let durations: Vec<f64> = data
        .last_n(SESSION_DURATION_WINDOW)
        .iter()
        .map(|r| r.avg_session_duration_min)
        .collect();

    Ok(SummaryStats {
        current_dau: latest.dau,
        current_mau: latest.mau,
        avg_session_duration: round_to(mean(&durations), 1),
        total_sessions_today: latest.sessions,
    })
}
