// HTTP telemetry source backed by reqwest
use crate::application::telemetry_source::{FetchError, StatusResponse, TelemetrySource};
use crate::domain::sample::SeriesSnapshot;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTelemetrySource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str, accept: &str) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(self.url_for(path))
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn body_text(path: &str, response: reqwest::Response) -> Result<String, FetchError> {
        response.text().await.map_err(|e| FetchError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch_series(&self, path: &str) -> Result<SeriesSnapshot, FetchError> {
        let response = self.get(path, "application/json").await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = Self::body_text(path, response).await?;
        SeriesSnapshot::from_json(&body).map_err(|e| FetchError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn fetch_status(&self, path: &str) -> Result<StatusResponse, FetchError> {
        let response = self.get(path, "text/plain").await?;
        let status = response.status().as_u16();
        let body = Self::body_text(path, response).await?;
        Ok(StatusResponse { status, body })
    }
}
