use async_trait::async_trait;
use daat_compass::compass::{
    CatalogError, CompassService, DisabledReportSink, FallbackAnalyzer, FileResultStore,
    GenerativeAnalyzer, HttpReportSink, LikertScore, QuestionCatalog, ReportError, ReportSink,
    ResultReport, ResultStore, SavedResult, ServiceSettings, StoreError,
};
use daat_compass::config::{AnalysisConfig, AppConfig, CompassConfig, ReportingConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reporting sink chosen from configuration.
#[derive(Debug)]
pub(crate) enum ConfiguredReportSink {
    Http(HttpReportSink),
    Disabled(DisabledReportSink),
}

#[async_trait]
impl ReportSink for ConfiguredReportSink {
    async fn report(&self, report: &ResultReport) -> Result<(), ReportError> {
        match self {
            ConfiguredReportSink::Http(sink) => sink.report(report).await,
            ConfiguredReportSink::Disabled(sink) => sink.report(report).await,
        }
    }
}

/// Result slot that lives only as long as the process; used by the scripted demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultStore {
    slot: Arc<Mutex<Option<SavedResult>>>,
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, result: &SavedResult) -> Result<(), StoreError> {
        let mut guard = self.slot.lock().expect("result store mutex poisoned");
        *guard = Some(result.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedResult>, StoreError> {
        let guard = self.slot.lock().expect("result store mutex poisoned");
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.slot.lock().expect("result store mutex poisoned");
        *guard = None;
        Ok(())
    }
}

pub(crate) type ConfiguredService = CompassService<FileResultStore, ConfiguredReportSink>;

pub(crate) fn load_catalog(config: &CompassConfig) -> Result<QuestionCatalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = QuestionCatalog::from_path(path)?;
            info!(path = %path.display(), questions = catalog.len(), "loaded question catalog");
            Ok(catalog)
        }
        None => Ok(QuestionCatalog::standard()),
    }
}

pub(crate) fn build_analyzer(config: &AnalysisConfig) -> FallbackAnalyzer {
    let Some(api_key) = &config.api_key else {
        return FallbackAnalyzer::rules_only();
    };

    match GenerativeAnalyzer::new(
        config.base_url.clone(),
        config.model.clone(),
        api_key.clone(),
        config.timeout,
    ) {
        Ok(remote) => FallbackAnalyzer::new(Arc::new(remote)),
        Err(error) => {
            warn!(error = %error, "remote analysis disabled");
            FallbackAnalyzer::rules_only()
        }
    }
}

pub(crate) fn build_report_sink(config: &ReportingConfig) -> ConfiguredReportSink {
    let Some(url) = &config.url else {
        return ConfiguredReportSink::Disabled(DisabledReportSink);
    };

    match HttpReportSink::new(url.clone(), config.timeout) {
        Ok(sink) => ConfiguredReportSink::Http(sink),
        Err(error) => {
            warn!(error = %error, "result reporting disabled");
            ConfiguredReportSink::Disabled(DisabledReportSink)
        }
    }
}

pub(crate) fn build_service(config: &AppConfig) -> Result<ConfiguredService, CatalogError> {
    let catalog = load_catalog(&config.compass)?;
    let store = FileResultStore::new(config.compass.results_path.clone());
    let sink = build_report_sink(&config.reporting);

    Ok(CompassService::new(
        Arc::new(catalog),
        Arc::new(store),
        Arc::new(sink),
        ServiceSettings::from(&config.compass),
    )
    .with_analyzer(build_analyzer(&config.analysis)))
}

pub(crate) fn parse_likert(raw: &str) -> Result<LikertScore, String> {
    let value = raw
        .trim()
        .trim_start_matches('+')
        .parse::<i8>()
        .map_err(|err| format!("'{raw}' is not a score between -2 and 2 ({err})"))?;
    LikertScore::try_from(value).map_err(|err| err.to_string())
}
