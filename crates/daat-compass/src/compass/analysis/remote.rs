use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::{AnalysisError, AnalysisProvider, AnalysisResult};
use crate::compass::domain::{AxisId, Coordinates};

/// Remote generative model speaking the `generateContent` REST dialect.
#[derive(Debug, Clone)]
pub struct GenerativeAnalyzer {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GenerativeAnalyzer {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl AnalysisProvider for GenerativeAnalyzer {
    async fn analyze(&self, coordinates: &Coordinates) -> Result<AnalysisResult, AnalysisError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt(coordinates) }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|error| AnalysisError::Parse(error.to_string()))?;
        debug!(model = %self.model, "received remote analysis");
        parse_candidate(&payload)
    }
}

fn prompt(coordinates: &Coordinates) -> String {
    let mut lines = vec![
        "נתח את מיקומו הפוליטי של משתמש ישראלי לפי הקואורדינטות הבאות (טווח -10 עד 10):"
            .to_string(),
    ];
    for (axis, value) in coordinates.iter() {
        lines.push(format!("- {}: {value:.2}", axis_caption(axis)));
    }
    lines.push(
        "החזר JSON עם השדות title, description, ideology, economicAnalysis, \
         nationalAnalysis, religiousAnalysis, socialAnalysis בעברית."
            .to_string(),
    );
    lines.join("\n")
}

fn axis_caption(axis: &AxisId) -> &str {
    match axis.as_str() {
        AxisId::ECONOMIC => "כלכלה (שמאל-ימין)",
        AxisId::NATIONAL => "מדיני-ביטחוני (יונה-נץ)",
        AxisId::CONSERVATISM | AxisId::SOCIAL => "שמרנות (פרוגרסיבי-שמרן)",
        AxisId::LIBERTY => "חירויות אזרח (ליברטריאני-סמכותני)",
        other => other,
    }
}

/// Extract the first candidate's text and read it as an analysis document.
fn parse_candidate(payload: &Value) -> Result<AnalysisResult, AnalysisError> {
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(strip_code_fence)
        .filter(|text| !text.is_empty())
        .ok_or(AnalysisError::Empty)?;

    let result: AnalysisResult =
        serde_json::from_str(text).map_err(|error| AnalysisError::Parse(error.to_string()))?;
    if result.title.trim().is_empty() {
        return Err(AnalysisError::Empty);
    }
    Ok(result)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
