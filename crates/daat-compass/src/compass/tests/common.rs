use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::compass::catalog::QuestionCatalog;
use crate::compass::collector::PresentationOrder;
use crate::compass::domain::{Answer, AxisDefinition, AxisId, Direction, Effect, Question};
use crate::compass::repository::{
    ReportError, ReportSink, ResultReport, ResultStore, SavedResult, StoreError,
};
use crate::compass::scoring::ScoringConfig;
use crate::compass::service::{CompassService, ServiceSettings};

pub(super) const SETTLE: Duration = Duration::from_millis(250);

/// Three statements over economic, national and liberty; the third pulls two axes.
pub(super) fn small_catalog() -> QuestionCatalog {
    QuestionCatalog::new(
        vec![
            AxisDefinition::new(AxisId::ECONOMIC, "כלכלה", "שמאל", "ימין"),
            AxisDefinition::new(AxisId::NATIONAL, "מדיני", "יונה", "נץ"),
            AxisDefinition::new(AxisId::LIBERTY, "חירויות", "ליברטריאני", "סמכותני"),
        ],
        vec![
            Question::directed(1, "הפרטה", AxisId::ECONOMIC, Direction::Positive),
            Question::directed(2, "פשרה מדינית", AxisId::NATIONAL, Direction::Negative),
            Question::weighted(
                3,
                "סמכויות השב\"כ",
                vec![
                    Effect::new(AxisId::LIBERTY, 1.0),
                    Effect::new(AxisId::NATIONAL, 0.5),
                ],
            ),
        ],
    )
    .expect("fixture catalog is valid")
}

pub(super) fn settings() -> ServiceSettings {
    ServiceSettings {
        scoring: ScoringConfig::default(),
        order: PresentationOrder::Catalog,
        settle_delay: SETTLE,
        share_base_url: "https://daat.example/compass".to_string(),
    }
}

pub(super) fn build_service() -> (
    CompassService<MemoryStore, RecordingSink>,
    Arc<MemoryStore>,
    Arc<RecordingSink>,
) {
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(RecordingSink::default());
    let service = CompassService::new(
        Arc::new(small_catalog()),
        store.clone(),
        sink.clone(),
        settings(),
    );
    (service, store, sink)
}

pub(super) fn strongly_agree_all() -> Vec<Answer> {
    vec![
        Answer::raw(1, 2.0),
        Answer::raw(2, 2.0),
        Answer::raw(3, 2.0),
    ]
}

#[derive(Default)]
pub(super) struct MemoryStore {
    slot: Mutex<Option<SavedResult>>,
}

impl MemoryStore {
    pub(super) fn current(&self) -> Option<SavedResult> {
        self.slot.lock().expect("store mutex poisoned").clone()
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, result: &SavedResult) -> Result<(), StoreError> {
        *self.slot.lock().expect("store mutex poisoned") = Some(result.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedResult>, StoreError> {
        Ok(self.current())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("store mutex poisoned") = None;
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl ResultStore for UnavailableStore {
    fn save(&self, _result: &SavedResult) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn load(&self) -> Result<Option<SavedResult>, StoreError> {
        Err(StoreError::Corrupt("truncated json".to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingSink {
    reports: Mutex<Vec<ResultReport>>,
}

impl RecordingSink {
    pub(super) fn reports(&self) -> Vec<ResultReport> {
        self.reports.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn report(&self, report: &ResultReport) -> Result<(), ReportError> {
        self.reports
            .lock()
            .expect("sink mutex poisoned")
            .push(report.clone());
        Ok(())
    }
}

pub(super) struct OfflineSink;

#[async_trait]
impl ReportSink for OfflineSink {
    async fn report(&self, _report: &ResultReport) -> Result<(), ReportError> {
        Err(ReportError::Transport("connection refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
