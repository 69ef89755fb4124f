use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::repository::{ReportError, ReportSink, ResultReport};

/// Posts each report as JSON to a collector endpoint (e.g. a spreadsheet web hook).
#[derive(Debug, Clone)]
pub struct HttpReportSink {
    client: Client,
    url: String,
}

impl HttpReportSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ReportError::Transport(error.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSink for HttpReportSink {
    async fn report(&self, report: &ResultReport) -> Result<(), ReportError> {
        let response = self
            .client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|error| ReportError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Rejected(status.as_u16()));
        }

        debug!(title = %report.title, "reported result");
        Ok(())
    }
}

/// Sink used when no reporting endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReportSink;

#[async_trait]
impl ReportSink for DisabledReportSink {
    async fn report(&self, _report: &ResultReport) -> Result<(), ReportError> {
        Ok(())
    }
}
