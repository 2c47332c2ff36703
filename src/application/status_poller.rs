// Status poller - Mirrors the light state into a text node and body classes
use crate::application::repeating_task::{PollOutcome, PollStep};
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::light::LightReading;
use crate::domain::page::StatusSink;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Element ids and class names the status poller writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTargets {
    pub text_element: String,
    pub body_element: String,
    pub on_class: String,
    pub off_class: String,
}

impl Default for StatusTargets {
    fn default() -> Self {
        Self {
            text_element: "light-status".to_string(),
            body_element: "body".to_string(),
            on_class: "body-light-on".to_string(),
            off_class: "body-light-off".to_string(),
        }
    }
}

impl StatusTargets {
    /// Write a reading into the sink. The on/off classes are kept mutually exclusive.
    pub fn apply<S: StatusSink + ?Sized>(&self, sink: &mut S, reading: &LightReading) {
        sink.set_text(&self.text_element, &reading.status_text());
        let (add, remove) = if reading.state.is_on() {
            (&self.on_class, &self.off_class)
        } else {
            (&self.off_class, &self.on_class)
        };
        sink.add_class(&self.body_element, add);
        sink.remove_class(&self.body_element, remove);
    }
}

pub struct StatusPoller<P> {
    source: Arc<dyn TelemetrySource>,
    path: String,
    page: Arc<RwLock<P>>,
    targets: StatusTargets,
}

impl<P: StatusSink> StatusPoller<P> {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        path: String,
        page: Arc<RwLock<P>>,
        targets: StatusTargets,
    ) -> Self {
        Self {
            source,
            path,
            page,
            targets,
        }
    }
}

#[async_trait]
impl<P: StatusSink + 'static> PollStep for StatusPoller<P> {
    fn name(&self) -> &str {
        &self.path
    }

    /// Always reschedules; a failed or non-200 answer only skips this cycle's update.
    async fn poll_once(&mut self) -> PollOutcome {
        match self.source.fetch_status(&self.path).await {
            Ok(response) if response.is_ok() => {
                let reading = LightReading::new(response.body);
                let mut page = self.page.write().await;
                self.targets.apply(&mut *page, &reading);
                tracing::debug!(path = %self.path, state = ?reading.state, "light status updated");
            }
            Ok(response) => {
                tracing::warn!(path = %self.path, status = response.status, "status poll skipped");
            }
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "status poll failed");
            }
        }
        PollOutcome::Reschedule
    }
}
