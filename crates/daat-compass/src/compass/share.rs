//! Share links: coordinates and headline analysis packed into URL query parameters.

use serde::Serialize;
use url::form_urlencoded;

use super::analysis::AnalysisResult;
use super::domain::{AxisId, Coordinates};

/// Query parameter name for each shared axis. The first two are mandatory on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisParam {
    pub param: &'static str,
    pub axis: AxisId,
}

impl AxisParam {
    pub fn new(param: &'static str, axis: impl Into<String>) -> Self {
        Self {
            param,
            axis: AxisId::new(axis),
        }
    }
}

/// Result reconstructed from a share link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedResult {
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShareCodec {
    base_url: String,
    axis_params: Vec<AxisParam>,
}

impl ShareCodec {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_params(
            base_url,
            vec![
                AxisParam::new("x", AxisId::ECONOMIC),
                AxisParam::new("y", AxisId::NATIONAL),
                AxisParam::new("z", AxisId::CONSERVATISM),
                AxisParam::new("w", AxisId::LIBERTY),
            ],
        )
    }

    pub fn with_params(base_url: impl Into<String>, axis_params: Vec<AxisParam>) -> Self {
        Self {
            base_url: base_url.into(),
            axis_params,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query string (without `?`) for a result.
    pub fn encode_query(
        &self,
        coordinates: &Coordinates,
        analysis: &AnalysisResult,
        name: Option<&str>,
    ) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        // The first two params are mandatory for decoding; absent axes go out as 0.
        for (position, param) in self.axis_params.iter().enumerate() {
            if position < 2 || coordinates.contains(param.axis.as_str()) {
                let value = round2(coordinates.get(param.axis.as_str()));
                query.append_pair(param.param, &value.to_string());
            }
        }
        query.append_pair("title", &analysis.title);
        query.append_pair("desc", &analysis.description);
        if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
            query.append_pair("name", name);
        }
        query.finish()
    }

    pub fn encode(
        &self,
        coordinates: &Coordinates,
        analysis: &AnalysisResult,
        name: Option<&str>,
    ) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}{}",
            self.base_url,
            self.encode_query(coordinates, analysis, name)
        )
    }

    /// Parse a query string (leading `?` optional). `None` means the link does not carry a
    /// usable result and the caller should show the welcome flow.
    pub fn decode(&self, query: &str) -> Option<SharedResult> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let lookup = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };

        let mut coordinates = Coordinates::new();
        for (position, param) in self.axis_params.iter().enumerate() {
            let parsed = lookup(param.param).and_then(parse_finite);
            match parsed {
                Some(value) => coordinates.set(param.axis.clone(), value),
                None if position < 2 => return None,
                None => {}
            }
        }

        let analysis = match (non_empty(lookup("title")), non_empty(lookup("desc"))) {
            (Some(title), Some(desc)) => Some(AnalysisResult::headline(title, desc)),
            _ => None,
        };

        Some(SharedResult {
            coordinates,
            analysis,
            name: non_empty(lookup("name")).map(str::to_string),
        })
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
