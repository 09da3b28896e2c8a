pub mod records;
pub mod dataset;
pub mod store;
pub mod metrics;
pub mod datagen;
pub mod server;

#[cfg(test)]
mod integration_tests;

pub use records::{
    ActivityRecord, DateRange, Dated, FeatureAdoptionRecord, FeedbackRecord, NpsCategory,
};
pub use dataset::{filter_by_date_range, DateOrdered};
pub use store::{CsvStore, Datasets, StoreError};
pub use metrics::{
    churn_rate, dau_mau_ratio, feature_adoption, growth_rate, nps, retention_rate,
    summary::{summary_stats, SummaryStats},
    ActivityMetric, MetricsError, DEFAULT_WINDOW,
};
pub use datagen::{generate_datasets, write_csvs, SeededRng};
pub use server::{run_server, ApiError, AppState, ServerConfig};
