//! HTTP request handlers for the dashboard endpoints
//!
//! Every handler follows the same linear pass: filter the requested
//! dataset(s) to the date interval, rebuild the date-ordered view, compute,
//! respond. Nothing is cached between requests and each KPI is computed
//! independently, so one degenerate input never blocks another metric.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::dataset::{filter_by_date_range, DateOrdered};
use crate::metrics::{
    self, summary::SummaryStats, ActivityMetric, DEFAULT_WINDOW,
};
use crate::records::{ActivityRecord, DateRange, FeatureAdoptionRecord, FeedbackRecord};
use crate::store;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// Common query parameters: an optional inclusive date interval.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Query parameters for the KPI endpoints.
#[derive(Debug, Deserialize)]
pub struct KpiParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub window: Option<usize>,
}

/// Query parameters for the growth endpoint.
#[derive(Debug, Deserialize)]
pub struct GrowthParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub window: Option<usize>,
    pub metric: Option<String>,
}

/// Query parameters for the feature-adoption rows.
#[derive(Debug, Deserialize)]
pub struct FeatureParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub feature: Option<String>,
}

fn parse_date(value: &str, label: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidDate(format!("Invalid {} date: {}", label, e)))
}

/// Builds the inclusive interval; absent bounds are unbounded. An inverted
/// interval is not an error here — the filter yields empty data for it.
fn parse_range(start: &Option<String>, end: &Option<String>) -> Result<DateRange, ApiError> {
    let start = match start {
        Some(value) => parse_date(value, "start")?,
        None => NaiveDate::MIN,
    };
    let end = match end {
        Some(value) => parse_date(value, "end")?,
        None => NaiveDate::MAX,
    };
    Ok(DateRange::new(start, end))
}

fn filtered_activity(
    state: &AppState,
    range: &DateRange,
) -> Result<DateOrdered<ActivityRecord>, ApiError> {
    let datasets = state.datasets()?;
    Ok(DateOrdered::from_unsorted(filter_by_date_range(
        &datasets.activity,
        range,
    )))
}

/// All six KPIs over the requested interval.
#[derive(Debug, Serialize)]
pub struct KpiResponse {
    pub retention_rate: f64,
    pub churn_rate: f64,
    pub nps: f64,
    pub dau_mau_ratio: f64,
    pub feature_adoption: f64,
    pub growth_rate: f64,
    pub window: usize,
}

/// GET /kpis - All KPIs in one pass
pub async fn get_kpis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KpiParams>,
) -> Result<Json<KpiResponse>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let window = params.window.unwrap_or(DEFAULT_WINDOW);

    let datasets = state.datasets()?;
    let activity = DateOrdered::from_unsorted(filter_by_date_range(&datasets.activity, &range));
    let feedback = filter_by_date_range(&datasets.feedback, &range);
    let features = DateOrdered::from_unsorted(filter_by_date_range(&datasets.features, &range));

    Ok(Json(KpiResponse {
        retention_rate: metrics::retention_rate(&activity, window),
        churn_rate: metrics::churn_rate(&activity, window),
        nps: metrics::nps(&feedback),
        dau_mau_ratio: metrics::dau_mau_ratio(&activity, window),
        feature_adoption: metrics::feature_adoption(&features, None, window),
        growth_rate: metrics::growth_rate(&activity, ActivityMetric::Dau, window),
        window,
    }))
}

/// Growth of one activity column.
#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub metric: String,
    pub growth_rate: f64,
    pub window: usize,
}

/// GET /kpis/growth - Growth rate for a selectable activity column
pub async fn get_growth(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GrowthParams>,
) -> Result<Json<GrowthResponse>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let window = params.window.unwrap_or(DEFAULT_WINDOW);
    let metric: ActivityMetric = params
        .metric
        .as_deref()
        .unwrap_or("dau")
        .parse()
        .map_err(ApiError::from)?;

    let activity = filtered_activity(&state, &range)?;

    Ok(Json(GrowthResponse {
        metric: metric.to_string(),
        growth_rate: metrics::growth_rate(&activity, metric, window),
        window,
    }))
}

/// GET /summary - Latest-row snapshot
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<SummaryStats>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let activity = filtered_activity(&state, &range)?;
    let stats = metrics::summary::summary_stats(&activity)?;
    Ok(Json(stats))
}

/// Response wrapper for filtered activity rows.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub count: usize,
    pub data: Vec<ActivityRecord>,
}

/// GET /activity - Filtered activity rows in date order
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let rows = filtered_activity(&state, &range)?.into_inner();
    Ok(Json(ActivityResponse {
        count: rows.len(),
        data: rows,
    }))
}

/// Filtered feedback rows plus the NPS over them.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub count: usize,
    pub nps: f64,
    pub data: Vec<FeedbackRecord>,
}

/// GET /feedback - Filtered NPS responses
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let datasets = state.datasets()?;
    let rows = filter_by_date_range(&datasets.feedback, &range);
    Ok(Json(FeedbackResponse {
        count: rows.len(),
        nps: metrics::nps(&rows),
        data: rows,
    }))
}

/// Filtered feature rows plus the adoption rate over them.
#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub count: usize,
    pub feature: Option<String>,
    pub adoption_rate: f64,
    pub data: Vec<FeatureAdoptionRecord>,
}

/// GET /features - Filtered adoption rows, optionally for one feature
pub async fn get_features(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeatureParams>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let datasets = state.datasets()?;

    let ordered = DateOrdered::from_unsorted(filter_by_date_range(&datasets.features, &range));
    let adoption_rate =
        metrics::feature_adoption(&ordered, params.feature.as_deref(), DEFAULT_WINDOW);

    let data: Vec<FeatureAdoptionRecord> = match &params.feature {
        Some(name) => ordered
            .records()
            .iter()
            .filter(|r| &r.feature == name)
            .cloned()
            .collect(),
        None => ordered.into_inner(),
    };

    Ok(Json(FeaturesResponse {
        count: data.len(),
        feature: params.feature,
        adoption_rate,
        data,
    }))
}

/// GET /export/:dataset - Filtered dataset as a CSV download
pub async fn export_dataset(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let range = parse_range(&params.start, &params.end)?;
    let datasets = state.datasets()?;

    let bytes = match dataset.as_str() {
        "activity" => store::to_csv_bytes(&filter_by_date_range(&datasets.activity, &range))?,
        "feedback" => store::to_csv_bytes(&filter_by_date_range(&datasets.feedback, &range))?,
        "features" => store::to_csv_bytes(&filter_by_date_range(&datasets.features, &range))?,
        other => {
            return Err(ApiError::InvalidParameter(format!(
                "Unknown dataset '{}': expected activity, feedback or features",
                other
            )))
        }
    };

    let disposition = format!("attachment; filename=\"{}.csv\"", dataset);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
