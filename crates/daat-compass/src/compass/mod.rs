//! Political compass questionnaire: catalog, answer collection, scoring, and the adapters
//! that consume the resulting coordinates.
//!
//! Coordinates are produced by [`scoring`] from a complete answer set and never change
//! afterwards. Analysis, persistence, share links, and reporting only read them, so any of
//! those can fail without affecting what the respondent sees on the chart.

pub mod analysis;
pub mod catalog;
pub mod collector;
pub mod domain;
pub mod reporting;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod share;
pub mod storage;

#[cfg(test)]
mod tests;

pub use analysis::{
    AnalysisError, AnalysisProvider, AnalysisResult, AnalysisSource, FallbackAnalyzer,
    GenerativeAnalyzer, RuleBasedAnalyzer,
};
pub use catalog::{CatalogError, QuestionCatalog};
pub use collector::{
    AnswerCollector, CollectorError, CollectorState, CollectorStep, PresentationOrder, Progress,
};
pub use domain::{
    Answer, AxisDefinition, AxisId, CompassPoint, Coordinates, Direction, Effect,
    InvalidLikertScore, Leaning, LikertScore, Question, QuestionId, AXIS_LIMIT,
};
pub use reporting::{DisabledReportSink, HttpReportSink};
pub use repository::{
    ReportError, ReportSink, ResultReport, ResultStore, SavedResult, StoreError, UserIdentity,
};
pub use router::compass_router;
pub use scoring::{
    compute_coordinates, ScoreSheet, ScoringConfig, ScoringEngine, SkipReason, SkippedAnswer,
};
pub use service::{
    CompassService, CompassServiceError, QuizOutcome, QuizSubmission, ServiceSettings,
};
pub use share::{ShareCodec, SharedResult};
pub use storage::FileResultStore;
