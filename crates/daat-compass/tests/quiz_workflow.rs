use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use daat_compass::compass::{
    compass_router, AnalysisResult, AxisId, CollectorStep, CompassService, Coordinates,
    DisabledReportSink, FileResultStore, LikertScore, PresentationOrder, QuestionCatalog,
    QuizSubmission, ResultStore, SavedResult, ServiceSettings, StoreError, UserIdentity,
};
use serde_json::Value;
use tower::ServiceExt;

fn service(store: FileResultStore) -> CompassService<FileResultStore, DisabledReportSink> {
    CompassService::new(
        Arc::new(QuestionCatalog::standard()),
        Arc::new(store),
        Arc::new(DisabledReportSink),
        ServiceSettings {
            order: PresentationOrder::Shuffled { seed: Some(2024) },
            settle_delay: Duration::from_millis(5),
            ..ServiceSettings::default()
        },
    )
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn collected_session_is_scored_saved_and_shareable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileResultStore::new(dir.path().join("nested").join("last_result.json"));
    let service = service(store.clone());

    let mut session = service.start_session();
    let mut now = Instant::now();
    let answers = loop {
        now += Duration::from_millis(10);
        match session.answer(LikertScore::StronglyAgree, now) {
            Ok(CollectorStep::Presenting(_)) => continue,
            Ok(CollectorStep::Completed(answers)) => break answers,
            Err(error) => panic!("unexpected collector error: {error}"),
        }
    };
    assert_eq!(answers.len(), 50);

    let outcome = service
        .complete(QuizSubmission {
            answers,
            user: Some(UserIdentity {
                name: "Yael".to_string(),
                email: None,
            }),
            started_at: None,
            client: None,
        })
        .await
        .expect("quiz completes");

    assert!(outcome.persisted);
    assert!(outcome.duration_secs.is_none());
    for (_, value) in outcome.coordinates.iter() {
        assert!((-10.0..=10.0).contains(&value));
    }

    let saved = store.load().expect("slot readable").expect("slot filled");
    assert_eq!(saved.coordinates, outcome.coordinates);
    assert!(store.has_saved().expect("slot readable"));

    let query = outcome
        .share_link
        .split_once('?')
        .map(|(_, query)| query.to_string())
        .expect("share link carries a query");
    let shared = service.open_shared(&query).expect("link decodes");
    assert_eq!(shared.name.as_deref(), Some("Yael"));
    assert_eq!(
        shared.analysis.map(|analysis| analysis.title),
        Some(outcome.analysis.title.clone())
    );
    assert!(
        (shared.coordinates.get(AxisId::ECONOMIC) - outcome.coordinates.get(AxisId::ECONOMIC))
            .abs()
            <= 0.005
    );
}

#[tokio::test]
async fn http_flow_over_file_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileResultStore::new(dir.path().join("last_result.json"));
    let router = compass_router(Arc::new(service(store.clone())));

    let body = serde_json::json!({
        "answers": [
            { "questionId": 1, "score": 2 },
            { "questionId": 11, "score": "2" },
            { "questionId": 4242, "score": 2 }
        ],
        "startedAt": "2024-01-01T10:00:00Z"
    });
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/compass/results")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let outcome = read_json(response).await;
    assert_eq!(outcome["skipped"][0]["question_id"], 4242);
    assert!(outcome["durationSecs"].as_f64().expect("duration") > 0.0);
    assert!(outcome["coordinates"]["economic"].as_f64().expect("economic") < 0.0);
    assert!(outcome["coordinates"]["national"].as_f64().expect("national") > 0.0);

    let response = router
        .oneshot(
            Request::get("/api/v1/compass/shared?x=1&y=2&z=3")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let shared = read_json(response).await;
    assert_eq!(shared["mode"], "shared");
    assert_eq!(shared["result"]["coordinates"]["conservatism"], 3.0);
    assert!(shared["result"].get("analysis").is_none());
}

#[test]
fn file_store_replaces_whole_value_and_clears() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileResultStore::new(dir.path().join("slot.json"));
    assert!(store.load().expect("empty slot").is_none());
    assert!(!store.has_saved().expect("empty slot"));

    let first = SavedResult {
        coordinates: Coordinates::new().with(AxisId::ECONOMIC, 4.0),
        analysis: AnalysisResult::headline("first", "one"),
        timestamp: chrono::Utc::now(),
        user: None,
    };
    let second = SavedResult {
        coordinates: Coordinates::new().with(AxisId::NATIONAL, -2.0),
        analysis: AnalysisResult::headline("second", "two"),
        timestamp: chrono::Utc::now(),
        user: Some(UserIdentity {
            name: "Avi".to_string(),
            email: Some("avi@example.com".to_string()),
        }),
    };

    store.save(&first).expect("first save");
    store.save(&second).expect("second save");

    let loaded = store.load().expect("readable").expect("filled");
    assert_eq!(loaded.analysis.title, "second");
    assert!(!loaded.coordinates.contains(AxisId::ECONOMIC));
    assert!(!dir.path().join("slot.json.tmp").exists());

    store.clear().expect("clear");
    store.clear().expect("clearing twice is fine");
    assert!(store.load().expect("empty slot").is_none());
}

#[tokio::test]
async fn corrupt_slot_is_reported_and_degraded_by_the_service() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("slot.json");
    std::fs::write(&path, b"{\"coordinates\": ").expect("write corrupt slot");
    let store = FileResultStore::new(&path);

    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    assert!(service(store).latest().await.is_none());
}
