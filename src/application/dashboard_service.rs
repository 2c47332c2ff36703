// Dashboard service - Owns the render targets and starts one poller per source
use crate::application::repeating_task::{RepeatingTask, TokioTimer};
use crate::application::series_poller::{SeriesFailurePolicy, SeriesPoller};
use crate::application::status_poller::{StatusPoller, StatusTargets};
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::chart::ChartModel;
use crate::domain::page::PageModel;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub type SharedChart = Arc<RwLock<ChartModel>>;
pub type SharedPage = Arc<RwLock<PageModel>>;

/// One monitored series source and the chart it feeds.
#[derive(Debug, Clone)]
pub struct ChartSource {
    pub id: String,
    pub label: String,
    pub color: String,
    pub path: String,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct StatusSource {
    pub path: String,
    pub interval: Duration,
    pub targets: StatusTargets,
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn TelemetrySource>,
    charts: Vec<(ChartSource, SharedChart)>,
    page: SharedPage,
    status: StatusSource,
    on_series_failure: SeriesFailurePolicy,
}

impl DashboardService {
    /// Builds every chart once, empty, from its source description.
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        chart_sources: Vec<ChartSource>,
        status: StatusSource,
        on_series_failure: SeriesFailurePolicy,
    ) -> Self {
        let charts = chart_sources
            .into_iter()
            .map(|cs| {
                let chart = ChartModel::new(cs.id.clone(), cs.label.clone(), cs.color.clone());
                (cs, Arc::new(RwLock::new(chart)))
            })
            .collect();

        Self {
            source,
            charts,
            page: Arc::new(RwLock::new(PageModel::new())),
            status,
            on_series_failure,
        }
    }

    /// Spawn the status poller and one series poller per chart.
    pub fn start(&self) -> Vec<JoinHandle<u64>> {
        let mut handles = Vec::with_capacity(self.charts.len() + 1);

        for (cs, chart) in &self.charts {
            let poller = SeriesPoller::new(
                self.source.clone(),
                cs.path.clone(),
                chart.clone(),
                self.on_series_failure,
            );
            tracing::info!(
                chart = %cs.id,
                path = %cs.path,
                interval_ms = cs.interval.as_millis() as u64,
                "starting series poller"
            );
            handles.push(tokio::spawn(
                RepeatingTask::new(poller, TokioTimer, cs.interval).run(),
            ));
        }

        let poller = StatusPoller::new(
            self.source.clone(),
            self.status.path.clone(),
            self.page.clone(),
            self.status.targets.clone(),
        );
        tracing::info!(
            path = %self.status.path,
            interval_ms = self.status.interval.as_millis() as u64,
            "starting status poller"
        );
        handles.push(tokio::spawn(
            RepeatingTask::new(poller, TokioTimer, self.status.interval).run(),
        ));

        handles
    }

    /// Current chart states in configuration order.
    pub async fn charts(&self) -> Vec<ChartModel> {
        let mut out = Vec::with_capacity(self.charts.len());
        for (_, chart) in &self.charts {
            out.push(chart.read().await.clone());
        }
        out
    }

    pub async fn chart(&self, id: &str) -> Option<ChartModel> {
        for (cs, chart) in &self.charts {
            if cs.id == id {
                return Some(chart.read().await.clone());
            }
        }
        None
    }

    pub async fn page(&self) -> PageModel {
        self.page.read().await.clone()
    }

    pub fn status_targets(&self) -> &StatusTargets {
        &self.status.targets
    }
}
