//! Shared application state for the dashboard API

use super::error::ApiError;
use crate::store::Datasets;

/// Shared application state.
///
/// The datasets are loaded once at startup and are read-only afterwards;
/// each request is an independent, stateless computation over them. When the
/// input files were absent at startup the state carries the missing path
/// instead, and every data endpoint surfaces it as a blocking message.
pub struct AppState {
    data: Result<Datasets, String>,
}

impl AppState {
    /// State backed by successfully loaded datasets.
    pub fn new(datasets: Datasets) -> Self {
        AppState {
            data: Ok(datasets),
        }
    }

    /// State for a server whose input files were missing at startup.
    pub fn missing_input(path: String) -> Self {
        AppState { data: Err(path) }
    }

    /// The loaded datasets, or the blocking missing-data error.
    pub fn datasets(&self) -> Result<&Datasets, ApiError> {
        self.data
            .as_ref()
            .map_err(|path| ApiError::MissingInputData(path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_state_blocks_data_access() {
        let state = AppState::missing_input("data/activity.csv".to_string());
        assert!(matches!(
            state.datasets(),
            Err(ApiError::MissingInputData(_))
        ));
    }

    #[test]
    fn loaded_state_exposes_datasets() {
        let state = AppState::new(Datasets::default());
        assert!(state.datasets().is_ok());
    }
}
