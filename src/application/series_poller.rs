// Series poller - Replaces a chart's dataset from a JSON series endpoint
use crate::application::repeating_task::{PollOutcome, PollStep};
use crate::application::telemetry_source::TelemetrySource;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chart::ChartSink;

/// What a series poller does after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesFailurePolicy {
    /// Stop polling this source for good.
    Halt,
    /// Keep the last good dataset and try again after the usual delay.
    #[default]
    Reschedule,
}

pub struct SeriesPoller<C> {
    source: Arc<dyn TelemetrySource>,
    path: String,
    chart: Arc<RwLock<C>>,
    on_failure: SeriesFailurePolicy,
}

impl<C: ChartSink> SeriesPoller<C> {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        path: String,
        chart: Arc<RwLock<C>>,
        on_failure: SeriesFailurePolicy,
    ) -> Self {
        Self {
            source,
            path,
            chart,
            on_failure,
        }
    }
}

#[async_trait]
impl<C: ChartSink + 'static> PollStep for SeriesPoller<C> {
    fn name(&self) -> &str {
        &self.path
    }

    async fn poll_once(&mut self) -> PollOutcome {
        match self.source.fetch_series(&self.path).await {
            Ok(snapshot) => {
                let (labels, data) = snapshot.split();
                let mut chart = self.chart.write().await;
                chart.replace_data(labels, data);
                chart.redraw();
                tracing::debug!(path = %self.path, samples = snapshot.len(), "chart updated");
                PollOutcome::Reschedule
            }
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, policy = ?self.on_failure, "series poll failed");
                match self.on_failure {
                    SeriesFailurePolicy::Halt => PollOutcome::Halt,
                    SeriesFailurePolicy::Reschedule => PollOutcome::Reschedule,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repeating_task::{RepeatingTask, TokioTimer};
    use crate::application::telemetry_source::FetchError;
    use crate::application::telemetry_source::testing::ScriptedSource;
    use crate::domain::chart::ChartModel;
    use crate::domain::sample::{Sample, SeriesSnapshot};
    use std::time::Duration;

    fn chart() -> Arc<RwLock<ChartModel>> {
        Arc::new(RwLock::new(ChartModel::new(
            "washer-chart".to_string(),
            "washer red".to_string(),
            "#ff0000".to_string(),
        )))
    }

    fn decode_error() -> FetchError {
        FetchError::Decode {
            path: "/washer_red".to_string(),
            message: "EOF while parsing a list".to_string(),
        }
    }

    fn poller(
        source: &Arc<ScriptedSource>,
        chart: &Arc<RwLock<ChartModel>>,
        policy: SeriesFailurePolicy,
    ) -> SeriesPoller<ChartModel> {
        SeriesPoller::new(
            source.clone(),
            "/washer_red".to_string(),
            chart.clone(),
            policy,
        )
    }

    #[tokio::test]
    async fn test_payload_becomes_labels_and_data() {
        let source = Arc::new(ScriptedSource::new());
        source.push_series(SeriesSnapshot::from_json("[[1000,0.2],[2000,0.5]]").map_err(|e| {
            FetchError::Decode {
                path: "/washer_red".to_string(),
                message: e.to_string(),
            }
        }));
        let chart = chart();

        let outcome = poller(&source, &chart, SeriesFailurePolicy::Halt)
            .poll_once()
            .await;

        assert_eq!(outcome, PollOutcome::Reschedule);
        let chart = chart.read().await;
        assert_eq!(chart.labels, vec![1000.0, 2000.0]);
        assert_eq!(chart.data, vec![0.2, 0.5]);
        assert_eq!(chart.revision, 1);
        assert_eq!(source.calls(), vec!["/washer_red".to_string()]);
    }

    #[tokio::test]
    async fn test_same_payload_twice_does_not_accumulate() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| Sample::new(f64::from(i) * 1000.0, f64::from(i) / 10.0))
            .collect();
        let source = Arc::new(ScriptedSource::new());
        source.push_series(Ok(SeriesSnapshot::new(samples.clone())));
        let chart = chart();
        let mut poller = poller(&source, &chart, SeriesFailurePolicy::Halt);

        poller.poll_once().await;
        let first = chart.read().await.clone();
        poller.poll_once().await;
        let second = chart.read().await.clone();

        assert_eq!(second.labels, first.labels);
        assert_eq!(second.data, first.data);
        assert_eq!(second.labels.len(), 50);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(second.labels[i], sample.x);
            assert_eq!(second.data[i], sample.y);
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_snapshot() {
        let source = Arc::new(ScriptedSource::new());
        source.push_series(Ok(SeriesSnapshot::new(vec![Sample::new(1.0, 2.0)])));
        source.push_series(Err(decode_error()));
        let chart = chart();
        let mut poller = poller(&source, &chart, SeriesFailurePolicy::Reschedule);

        assert_eq!(poller.poll_once().await, PollOutcome::Reschedule);
        assert_eq!(poller.poll_once().await, PollOutcome::Reschedule);

        let chart = chart.read().await;
        assert_eq!(chart.labels, vec![1.0]);
        assert_eq!(chart.data, vec![2.0]);
        assert_eq!(chart.revision, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_halt_policy_stops_polling_after_malformed_payload() {
        let source = Arc::new(ScriptedSource::new());
        source.push_series(Ok(SeriesSnapshot::new(vec![Sample::new(1.0, 2.0)])));
        source.push_series(Err(decode_error()));
        let chart = chart();

        let task = RepeatingTask::new(
            poller(&source, &chart, SeriesFailurePolicy::Halt),
            TokioTimer,
            Duration::from_millis(1000),
        );
        let cycles = task.run().await;

        assert_eq!(cycles, 2);
        assert_eq!(source.calls().len(), 2);
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_policy_keeps_polling_after_malformed_payload() {
        let source = Arc::new(ScriptedSource::new());
        source.push_series(Err(decode_error()));
        let chart = chart();

        let handle = tokio::spawn(
            RepeatingTask::new(
                poller(&source, &chart, SeriesFailurePolicy::Reschedule),
                TokioTimer,
                Duration::from_millis(1000),
            )
            .run(),
        );
        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle.abort();

        assert_eq!(source.calls().len(), 4);
        assert_eq!(chart.read().await.revision, 0);
    }
}
