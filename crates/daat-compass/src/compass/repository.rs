use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::domain::{Answer, Coordinates};

/// Longest description forwarded to the reporting sink, in characters.
pub const REPORT_DESCRIPTION_LIMIT: usize = 500;

/// Optional identity the respondent attaches to a saved result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Snapshot held in the single persistence slot. Replaced whole on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResult {
    pub coordinates: Coordinates,
    pub analysis: AnalysisResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

/// Storage abstraction for the last completed result.
pub trait ResultStore: Send + Sync {
    fn save(&self, result: &SavedResult) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<SavedResult>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;

    fn has_saved(&self) -> Result<bool, StoreError> {
        Ok(self.load()?.is_some())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("result store unavailable: {0}")]
    Unavailable(String),
    #[error("saved result is unreadable: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Payload handed to the external reporting sink after a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub timestamp: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub x: f64,
    pub y: f64,
    pub answers: Vec<Answer>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl ResultReport {
    pub fn new(
        timestamp: DateTime<Utc>,
        coordinates: &Coordinates,
        answers: &[Answer],
        analysis: &AnalysisResult,
    ) -> Self {
        let point = coordinates.point();
        Self {
            timestamp,
            coordinates: coordinates.clone(),
            x: point.x,
            y: point.y,
            answers: answers.to_vec(),
            title: analysis.title.clone(),
            description: analysis
                .description
                .chars()
                .take(REPORT_DESCRIPTION_LIMIT)
                .collect(),
            duration_secs: None,
            client: None,
        }
    }

    pub fn with_duration(mut self, duration_secs: Option<f64>) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_client(mut self, client: Option<String>) -> Self {
        self.client = client;
        self
    }
}

/// Outbound analytics hook. Callers never surface its failures to the respondent.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn report(&self, report: &ResultReport) -> Result<(), ReportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report transport unavailable: {0}")]
    Transport(String),
    #[error("report rejected with status {0}")]
    Rejected(u16),
}
