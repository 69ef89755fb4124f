use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::analysis::{AnalysisResult, AnalysisSource, FallbackAnalyzer};
use super::catalog::QuestionCatalog;
use super::collector::{AnswerCollector, PresentationOrder};
use super::domain::{Answer, AxisId, CompassPoint, Coordinates, Leaning};
use super::repository::{
    ReportSink, ResultReport, ResultStore, SavedResult, StoreError, UserIdentity,
};
use super::scoring::{ScoreSheet, ScoringConfig, ScoringEngine, SkippedAnswer};
use super::share::{ShareCodec, SharedResult};
use crate::config::{CompassConfig, DEFAULT_SHARE_BASE_URL};

/// Knobs the service needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub scoring: ScoringConfig,
    pub order: PresentationOrder,
    pub settle_delay: Duration,
    pub share_base_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            order: PresentationOrder::Catalog,
            settle_delay: Duration::from_millis(250),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

impl From<&CompassConfig> for ServiceSettings {
    fn from(config: &CompassConfig) -> Self {
        Self {
            scoring: ScoringConfig {
                empty_axis_default: config.empty_axis_default,
            },
            order: if config.shuffle_questions {
                PresentationOrder::Shuffled { seed: None }
            } else {
                PresentationOrder::Catalog
            },
            settle_delay: config.settle_delay,
            share_base_url: config.share_base_url.clone(),
        }
    }
}

/// Completed questionnaire as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub user: Option<UserIdentity>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client: Option<String>,
}

/// Everything a results view needs after a completed quiz.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub coordinates: Coordinates,
    pub point: CompassPoint,
    pub leanings: BTreeMap<AxisId, Leaning>,
    pub analysis: AnalysisResult,
    pub analysis_source: AnalysisSource,
    pub skipped: Vec<SkippedAnswer>,
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub persisted: bool,
    pub share_link: String,
}

/// Service composing the catalog, scoring engine, analysis, persistence, and reporting.
pub struct CompassService<S, R> {
    catalog: Arc<QuestionCatalog>,
    engine: ScoringEngine,
    analyzer: FallbackAnalyzer,
    store: Arc<S>,
    reports: Arc<R>,
    share: ShareCodec,
    settings: ServiceSettings,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl<S, R> CompassService<S, R>
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        store: Arc<S>,
        reports: Arc<R>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            catalog,
            engine: ScoringEngine::new(settings.scoring),
            analyzer: FallbackAnalyzer::rules_only(),
            store,
            reports,
            share: ShareCodec::new(settings.share_base_url.clone()),
            settings,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    pub fn with_analyzer(mut self, analyzer: FallbackAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Fresh questionnaire session using the configured order and settle delay.
    pub fn start_session(&self) -> AnswerCollector {
        AnswerCollector::new(&self.catalog, self.settings.order, self.settings.settle_delay)
    }

    pub fn score(&self, answers: &[Answer]) -> Coordinates {
        self.engine.compute(answers, &self.catalog)
    }

    pub fn score_sheet(&self, answers: &[Answer]) -> ScoreSheet {
        self.engine.score_sheet(answers, &self.catalog)
    }

    /// Score, analyze, persist, then hand the report to a background task. Coordinates are
    /// final before any side effect runs; persistence and reporting failures only show up in
    /// logs and `persisted`, and the outcome never waits on the reporting sink.
    pub async fn complete(
        &self,
        submission: QuizSubmission,
    ) -> Result<QuizOutcome, CompassServiceError> {
        let user = submission.user.map(validate_identity).transpose()?;

        let sheet = self.score_sheet(&submission.answers);
        let coordinates = sheet.coordinates;

        let completed_at = Utc::now();
        let duration_secs = submission.started_at.map(|started| {
            let elapsed = completed_at.signed_duration_since(started);
            (elapsed.num_milliseconds().max(0) as f64) / 1000.0
        });

        let (analysis, analysis_source) = self.analyzer.analyze_with_source(&coordinates).await;

        let saved = SavedResult {
            coordinates: coordinates.clone(),
            analysis: analysis.clone(),
            timestamp: completed_at,
            user: user.clone(),
        };
        let persisted = match self.with_store(move |store| store.save(&saved)).await {
            Ok(()) => true,
            Err(error) => {
                warn!(error = %error, "failed to persist result");
                false
            }
        };

        let report = ResultReport::new(completed_at, &coordinates, &submission.answers, &analysis)
            .with_duration(duration_secs)
            .with_client(submission.client);
        self.dispatch_report(report);

        let share_link = self.share.encode(
            &coordinates,
            &analysis,
            user.as_ref().map(|identity| identity.name.as_str()),
        );

        info!(
            title = %analysis.title,
            source = ?analysis_source,
            skipped = sheet.skipped.len(),
            persisted,
            "completed compass session"
        );

        Ok(QuizOutcome {
            point: coordinates.point(),
            leanings: coordinates.leanings(),
            coordinates,
            analysis,
            analysis_source,
            skipped: sheet.skipped,
            completed_at,
            duration_secs,
            persisted,
            share_link,
        })
    }

    /// Wait for every report dispatched so far. Short-lived callers such as the CLI use this
    /// before the runtime shuts down.
    pub async fn flush_reports(&self) {
        let pending = {
            let mut in_flight = self.in_flight.lock().expect("report tasks mutex poisoned");
            std::mem::take(&mut *in_flight)
        };
        for handle in pending {
            if let Err(error) = handle.await {
                warn!(error = %error, "report task aborted");
            }
        }
    }

    fn dispatch_report(&self, report: ResultReport) {
        let reports = Arc::clone(&self.reports);
        let handle = tokio::spawn(async move {
            if let Err(error) = reports.report(&report).await {
                warn!(error = %error, "failed to report result");
            }
        });

        let mut in_flight = self.in_flight.lock().expect("report tasks mutex poisoned");
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(handle);
    }

    /// Run a store operation on the blocking pool.
    async fn with_store<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|error| StoreError::Unavailable(format!("storage task failed: {error}")))?
    }

    /// Last saved result. An unreadable slot reads as empty.
    pub async fn latest(&self) -> Option<SavedResult> {
        match self.with_store(|store| store.load()).await {
            Ok(saved) => saved,
            Err(error) => {
                warn!(error = %error, "ignoring unreadable saved result");
                None
            }
        }
    }

    pub async fn has_saved(&self) -> bool {
        self.with_store(|store| store.has_saved())
            .await
            .unwrap_or(false)
    }

    pub async fn clear_latest(&self) -> Result<(), CompassServiceError> {
        self.with_store(|store| store.clear()).await?;
        Ok(())
    }

    pub fn open_shared(&self, query: &str) -> Option<SharedResult> {
        self.share.decode(query)
    }

    pub fn share_link(
        &self,
        coordinates: &Coordinates,
        analysis: &AnalysisResult,
        name: Option<&str>,
    ) -> String {
        self.share.encode(coordinates, analysis, name)
    }
}

fn validate_identity(identity: UserIdentity) -> Result<UserIdentity, CompassServiceError> {
    let name = identity.name.trim();
    if name.is_empty() {
        return Err(CompassServiceError::InvalidIdentity(
            "name must not be blank".to_string(),
        ));
    }
    let email = identity
        .email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty());
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(CompassServiceError::InvalidIdentity(format!(
                "email {email} is not an address"
            )));
        }
    }

    Ok(UserIdentity {
        name: name.to_string(),
        email,
    })
}

/// Error raised by the compass service.
#[derive(Debug, thiserror::Error)]
pub enum CompassServiceError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
