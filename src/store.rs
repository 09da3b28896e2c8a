//! Flat-file storage boundary.
//!
//! The three input datasets live in one directory as `activity.csv`,
//! `feedback.csv` and `features.csv`, and are loaded wholesale per render.
//! If any file is absent the whole load fails with `MissingInput` — there is
//! no partial-load mode. Cross-field invariants that the dashboard math
//! silently depends on (`dau <= mau`, `users_adopted <= total_users`, scores
//! in 0..=10) are checked here, at the boundary, so a bad row surfaces as a
//! typed error instead of a nonsensical percentage.

use crate::records::{ActivityRecord, FeatureAdoptionRecord, FeedbackRecord};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// File name of the user-activity dataset.
pub const ACTIVITY_FILE: &str = "activity.csv";
/// File name of the NPS feedback dataset.
pub const FEEDBACK_FILE: &str = "feedback.csv";
/// File name of the feature-adoption dataset.
pub const FEATURES_FILE: &str = "features.csv";

/// Errors raised while loading or writing the datasets.
#[derive(Debug)]
pub enum StoreError {
    /// One of the three input files is absent.
    MissingInput(PathBuf),
    /// A row could not be parsed.
    Parse { file: String, message: String },
    /// A row violates a cross-field invariant.
    Validation {
        file: String,
        row: usize,
        reason: String,
    },
    /// Filesystem or encoding failure.
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingInput(path) => {
                write!(f, "Missing input file: {}", path.display())
            }
            StoreError::Parse { file, message } => {
                write!(f, "Failed to parse {}: {}", file, message)
            }
            StoreError::Validation { file, row, reason } => {
                write!(f, "Invalid row {} in {}: {}", row, file, reason)
            }
            StoreError::Io(message) => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// The three input datasets, loaded wholesale.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub activity: Vec<ActivityRecord>,
    pub feedback: Vec<FeedbackRecord>,
    pub features: Vec<FeatureAdoptionRecord>,
}

impl Datasets {
    /// Parses and validates all three datasets from arbitrary readers.
    ///
    /// This is the seam the tests use: the CSV bytes can come from memory
    /// instead of the data directory.
    pub fn from_readers(
        activity: impl Read,
        feedback: impl Read,
        features: impl Read,
    ) -> Result<Self, StoreError> {
        let activity = read_rows(activity, ACTIVITY_FILE)?;
        let feedback = read_rows(feedback, FEEDBACK_FILE)?;
        let features = read_rows(features, FEATURES_FILE)?;

        validate_activity(&activity)?;
        validate_feedback(&feedback)?;
        validate_features(&features)?;

        Ok(Datasets {
            activity,
            feedback,
            features,
        })
    }
}

/// CSV-backed store for the dashboard's input directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvStore { dir: dir.into() }
    }

    /// Loads all three datasets from the directory.
    ///
    /// Existence is checked for every file up front so that the first
    /// missing file is reported without a partial load.
    pub fn load(&self) -> Result<Datasets, StoreError> {
        let paths = [
            self.dir.join(ACTIVITY_FILE),
            self.dir.join(FEEDBACK_FILE),
            self.dir.join(FEATURES_FILE),
        ];
        for path in &paths {
            if !path.exists() {
                return Err(StoreError::MissingInput(path.clone()));
            }
        }

        Datasets::from_readers(
            std::fs::File::open(&paths[0])?,
            std::fs::File::open(&paths[1])?,
            std::fs::File::open(&paths[2])?,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn read_rows<R, T>(reader: R, file: &str) -> Result<Vec<T>, StoreError>
where
    R: Read,
    T: serde::de::DeserializeOwned,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: T = result.map_err(|e| StoreError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Serializes rows into CSV bytes with a header line.
pub fn to_csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|e| StoreError::Io(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.to_string()))
}

fn validate_activity(rows: &[ActivityRecord]) -> Result<(), StoreError> {
    for (index, row) in rows.iter().enumerate() {
        if row.dau > row.mau {
            return Err(StoreError::Validation {
                file: ACTIVITY_FILE.to_string(),
                row: index + 1,
                reason: format!("dau ({}) exceeds mau ({})", row.dau, row.mau),
            });
        }
    }
    Ok(())
}

fn validate_feedback(rows: &[FeedbackRecord]) -> Result<(), StoreError> {
    for (index, row) in rows.iter().enumerate() {
        if row.nps_score > 10 {
            return Err(StoreError::Validation {
                file: FEEDBACK_FILE.to_string(),
                row: index + 1,
                reason: format!("nps_score ({}) outside 0..=10", row.nps_score),
            });
        }
    }
    Ok(())
}

fn validate_features(rows: &[FeatureAdoptionRecord]) -> Result<(), StoreError> {
    for (index, row) in rows.iter().enumerate() {
        if row.users_adopted > row.total_users {
            return Err(StoreError::Validation {
                file: FEATURES_FILE.to_string(),
                row: index + 1,
                reason: format!(
                    "users_adopted ({}) exceeds total_users ({})",
                    row.users_adopted, row.total_users
                ),
            });
        }
    }
    Ok(())
}
