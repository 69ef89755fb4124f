use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Answer, LikertScore};
use super::repository::{ReportSink, ResultStore};
use super::service::{CompassService, CompassServiceError, QuizSubmission};

/// Body accepted by the stateless scoring endpoint.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: Vec<Answer>,
}

/// Router builder exposing the questionnaire endpoints.
pub fn compass_router<S, R>(service: Arc<CompassService<S, R>>) -> Router
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    Router::new()
        .route("/api/v1/compass/questions", get(questions_handler::<S, R>))
        .route("/api/v1/compass/score", post(score_handler::<S, R>))
        .route("/api/v1/compass/results", post(complete_handler::<S, R>))
        .route(
            "/api/v1/compass/results/latest",
            get(latest_handler::<S, R>).delete(clear_handler::<S, R>),
        )
        .route("/api/v1/compass/shared", get(shared_handler::<S, R>))
        .with_state(service)
}

pub(crate) async fn questions_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    let catalog = service.catalog();
    let scale: Vec<_> = LikertScore::ALL
        .iter()
        .map(|score| json!({ "value": score.value(), "label": score.label() }))
        .collect();
    let payload = json!({
        "axes": catalog.axes(),
        "questions": catalog.questions(),
        "scale": scale,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn score_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    let sheet = service.score_sheet(&request.answers);
    let payload = json!({
        "point": sheet.coordinates.point(),
        "leanings": sheet.coordinates.leanings(),
        "coordinates": sheet.coordinates,
        "skipped": sheet.skipped,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn complete_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
    axum::Json(submission): axum::Json<QuizSubmission>,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    match service.complete(submission).await {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(CompassServiceError::InvalidIdentity(reason)) => {
            let payload = json!({
                "error": reason,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn latest_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    match service.latest().await {
        Some(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        None => {
            let payload = json!({
                "error": "no saved result",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn clear_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    match service.clear_latest().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn shared_handler<S, R>(
    State(service): State<Arc<CompassService<S, R>>>,
    RawQuery(query): RawQuery,
) -> Response
where
    S: ResultStore + 'static,
    R: ReportSink + 'static,
{
    match service.open_shared(query.as_deref().unwrap_or_default()) {
        Some(shared) => {
            let payload = json!({
                "mode": "shared",
                "result": shared,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => (StatusCode::OK, axum::Json(json!({ "mode": "welcome" }))).into_response(),
    }
}
