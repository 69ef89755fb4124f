//! Turning coordinates into human readable commentary.
//!
//! Providers are pluggable behind [`AnalysisProvider`]. The deterministic
//! [`RuleBasedAnalyzer`] never fails, so [`FallbackAnalyzer`] can always hand the caller a
//! result even when the remote model is unreachable or answers with garbage.

mod remote;
mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Coordinates;

pub use remote::GenerativeAnalyzer;
pub use rules::{conservatism_label, RuleBasedAnalyzer};

/// Structured interpretation of a result. Field names are camelCase on the wire so saved
/// results and share links stay readable by existing clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub ideology: String,
    #[serde(default)]
    pub economic_analysis: String,
    #[serde(default)]
    pub national_analysis: String,
    #[serde(default)]
    pub religious_analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_analysis: Option<String>,
}

impl AnalysisResult {
    /// Result carrying only a headline, as reconstructed from a share link.
    pub fn headline(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis provider returned status {status}")]
    Status { status: u16 },
    #[error("analysis response could not be parsed: {0}")]
    Parse(String),
    #[error("analysis provider returned no content")]
    Empty,
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, coordinates: &Coordinates) -> Result<AnalysisResult, AnalysisError>;
}

/// Which provider produced the analysis attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Remote,
    Rules,
}

/// Optional primary provider backed by the rule table.
#[derive(Clone, Default)]
pub struct FallbackAnalyzer {
    primary: Option<Arc<dyn AnalysisProvider>>,
    rules: RuleBasedAnalyzer,
}

impl FallbackAnalyzer {
    pub fn new(primary: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            primary: Some(primary),
            rules: RuleBasedAnalyzer,
        }
    }

    /// Rules only; used when no remote provider is configured.
    pub fn rules_only() -> Self {
        Self::default()
    }

    pub fn has_remote(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn analyze_with_source(
        &self,
        coordinates: &Coordinates,
    ) -> (AnalysisResult, AnalysisSource) {
        if let Some(primary) = &self.primary {
            match primary.analyze(coordinates).await {
                Ok(result) => return (result, AnalysisSource::Remote),
                Err(error) => {
                    warn!(error = %error, "remote analysis failed; using rule table");
                }
            }
        }
        (self.rules.interpret(coordinates), AnalysisSource::Rules)
    }
}

impl std::fmt::Debug for FallbackAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackAnalyzer")
            .field("has_remote", &self.has_remote())
            .finish()
    }
}

#[async_trait]
impl AnalysisProvider for FallbackAnalyzer {
    async fn analyze(&self, coordinates: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
        Ok(self.analyze_with_source(coordinates).await.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::domain::AxisId;

    struct Unreachable;

    #[async_trait]
    impl AnalysisProvider for Unreachable {
        async fn analyze(&self, _: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
            Err(AnalysisError::Status { status: 503 })
        }
    }

    struct Canned;

    #[async_trait]
    impl AnalysisProvider for Canned {
        async fn analyze(&self, _: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult::headline("remote", "from the model"))
        }
    }

    fn coordinates() -> Coordinates {
        Coordinates::new()
            .with(AxisId::ECONOMIC, 6.0)
            .with(AxisId::NATIONAL, 3.0)
            .with(AxisId::CONSERVATISM, -4.0)
    }

    #[tokio::test]
    async fn falls_back_to_rules_when_primary_fails() {
        let analyzer = FallbackAnalyzer::new(Arc::new(Unreachable));
        let (result, source) = analyzer.analyze_with_source(&coordinates()).await;

        assert_eq!(source, AnalysisSource::Rules);
        assert_eq!(result.title, "ימין לאומי-ליברלי");
    }

    #[tokio::test]
    async fn prefers_primary_when_it_answers() {
        let analyzer = FallbackAnalyzer::new(Arc::new(Canned));
        let (result, source) = analyzer.analyze_with_source(&coordinates()).await;

        assert_eq!(source, AnalysisSource::Remote);
        assert_eq!(result.title, "remote");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let value = serde_json::to_value(AnalysisResult {
            economic_analysis: "x".to_string(),
            ..AnalysisResult::headline("t", "d")
        })
        .expect("serializes");

        assert_eq!(value["economicAnalysis"], "x");
        assert!(value.get("socialAnalysis").is_none());
    }
}
