use super::common::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use crate::compass::repository::{ReportError, ReportSink, ResultReport};

use crate::compass::analysis::{
    AnalysisError, AnalysisProvider, AnalysisResult, AnalysisSource, FallbackAnalyzer,
};
use crate::compass::domain::{AxisId, Coordinates};
use crate::compass::repository::UserIdentity;
use crate::compass::service::{CompassService, CompassServiceError, QuizSubmission};

struct QuotaExceeded;

#[async_trait]
impl AnalysisProvider for QuotaExceeded {
    async fn analyze(&self, _: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::Status { status: 429 })
    }
}

fn submission() -> QuizSubmission {
    QuizSubmission {
        answers: strongly_agree_all(),
        user: Some(UserIdentity {
            name: "  נועה ".to_string(),
            email: Some("noa@example.com".to_string()),
        }),
        started_at: Some(Utc::now() - ChronoDuration::seconds(90)),
        client: Some("cli".to_string()),
    }
}

#[tokio::test]
async fn complete_scores_persists_and_reports() {
    let (service, store, sink) = build_service();

    let outcome = service.complete(submission()).await.expect("quiz completes");

    assert_eq!(outcome.coordinates.get(AxisId::ECONOMIC), 10.0);
    assert_eq!(outcome.coordinates.get(AxisId::LIBERTY), 10.0);
    assert!((outcome.coordinates.get(AxisId::NATIONAL) + 10.0 / 3.0).abs() < 1e-9);
    assert_eq!(outcome.analysis_source, AnalysisSource::Rules);
    assert!(outcome.persisted);
    assert!(outcome.duration_secs.expect("duration tracked") >= 90.0);
    assert!(outcome.share_link.contains("x=10"));
    assert!(outcome.share_link.contains("name="));

    service.flush_reports().await;

    let saved = store.current().expect("result saved");
    assert_eq!(saved.coordinates, outcome.coordinates);
    assert_eq!(
        saved.user.expect("identity saved").name,
        "נועה",
        "name is trimmed"
    );

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].answers.len(), 3);
    assert_eq!(reports[0].client.as_deref(), Some("cli"));
    assert_eq!(reports[0].title, outcome.analysis.title);
}

#[tokio::test]
async fn blank_name_is_rejected_before_scoring() {
    let (service, store, sink) = build_service();
    let mut submission = submission();
    submission.user = Some(UserIdentity {
        name: "   ".to_string(),
        email: None,
    });

    match service.complete(submission).await {
        Err(CompassServiceError::InvalidIdentity(_)) => {}
        other => panic!("expected identity rejection, got {other:?}"),
    }
    assert!(store.current().is_none());
    assert!(sink.reports().is_empty());
}

#[tokio::test]
async fn storage_and_reporting_failures_do_not_block_the_result() {
    let service = CompassService::new(
        Arc::new(small_catalog()),
        Arc::new(UnavailableStore),
        Arc::new(OfflineSink),
        settings(),
    );

    let outcome = service.complete(submission()).await.expect("quiz completes");

    assert!(!outcome.persisted);
    assert_eq!(outcome.coordinates.get(AxisId::ECONOMIC), 10.0);
    service.flush_reports().await;
    assert!(service.latest().await.is_none(), "unreadable slot reads as empty");
    assert!(matches!(
        service.clear_latest().await,
        Err(CompassServiceError::Store(_))
    ));
}

#[tokio::test]
async fn analysis_failure_falls_back_to_rules() {
    let (service, _, _) = build_service();
    let service = service.with_analyzer(FallbackAnalyzer::new(Arc::new(QuotaExceeded)));

    let outcome = service.complete(submission()).await.expect("quiz completes");

    assert_eq!(outcome.analysis_source, AnalysisSource::Rules);
    assert!(!outcome.analysis.title.is_empty());
}

#[tokio::test]
async fn latest_and_clear_round_through_the_store() {
    let (service, _, _) = build_service();
    assert!(service.latest().await.is_none());
    assert!(!service.has_saved().await);

    service.complete(submission()).await.expect("quiz completes");
    assert!(service.has_saved().await);
    assert!(service.latest().await.is_some());

    service.clear_latest().await.expect("clear succeeds");
    assert!(service.latest().await.is_none());
}

/// Collector that answers only after `delay`, then fails.
struct SlowSink {
    delay: Duration,
    finished: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl ReportSink for SlowSink {
    async fn report(&self, _report: &ResultReport) -> Result<(), ReportError> {
        tokio::time::sleep(self.delay).await;
        self.finished
            .store(true, std::sync::atomic::Ordering::SeqCst);
        Err(ReportError::Transport("collector timed out".to_string()))
    }
}

#[tokio::test]
async fn slow_reporting_does_not_hold_the_outcome() {
    let sink = Arc::new(SlowSink {
        delay: Duration::from_secs(2),
        finished: std::sync::atomic::AtomicBool::new(false),
    });
    let service = CompassService::new(
        Arc::new(small_catalog()),
        Arc::new(MemoryStore::default()),
        sink.clone(),
        settings(),
    );

    let started = Instant::now();
    let outcome = service.complete(submission()).await.expect("quiz completes");

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(outcome.persisted);
    assert!(!sink.finished.load(std::sync::atomic::Ordering::SeqCst));

    service.flush_reports().await;
    assert!(sink.finished.load(std::sync::atomic::Ordering::SeqCst));
}

#[test]
fn shared_links_open_through_the_service() {
    let (service, _, _) = build_service();
    let coordinates = Coordinates::new()
        .with(AxisId::ECONOMIC, -4.0)
        .with(AxisId::NATIONAL, 2.0);
    let link = service.share_link(
        &coordinates,
        &AnalysisResult::headline("שמאל ביטחוני", "תיאור"),
        None,
    );
    let query = link.split_once('?').map(|(_, query)| query).expect("query");

    let shared = service.open_shared(query).expect("shared result");
    assert_eq!(shared.coordinates, coordinates);
    assert!(service.open_shared("title=only").is_none());
}

#[test]
fn sessions_use_the_configured_catalog() {
    let (service, _, _) = build_service();
    let session = service.start_session();

    assert_eq!(session.len(), service.catalog().len());
}
