use crate::application::series_poller::SeriesFailurePolicy;
use crate::application::status_poller::StatusTargets;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid upstream.base_url {url:?}: {message}")]
    BaseUrl { url: String, message: String },
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub status: StatusSettings,
    #[serde(default)]
    pub series_failure: SeriesFailurePolicy,
    pub charts: Vec<ChartSettings>,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    /// Browser refresh interval for the rendered page.
    pub refresh_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusSettings {
    pub path: String,
    pub interval_ms: u64,
    pub text_element: String,
    pub body_element: String,
    pub on_class: String,
    pub off_class: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub id: String,
    pub label: String,
    pub color: String,
    pub path: String,
    #[serde(default = "default_series_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub filter: String,
}

fn default_series_interval_ms() -> u64 {
    1000
}

impl StatusSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn targets(&self) -> StatusTargets {
        StatusTargets {
            text_element: self.text_element.clone(),
            body_element: self.body_element.clone(),
            on_class: self.on_class.clone(),
            off_class: self.off_class.clone(),
        }
    }
}

impl ChartSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Built-in defaults: the washer and dryer charts plus the light status.
fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let charts = vec![
        chart_default("washer-chart", "washer red", "#ff0000", "/washer_red"),
        chart_default("dryer-chart", "dryer shakeage", "#0000ff", "/dryer_accel"),
    ];
    builder
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("server.refresh_secs", 1)?
        .set_default("upstream.base_url", "http://127.0.0.1:5000")?
        .set_default("upstream.timeout_ms", 3000)?
        .set_default("status.path", "/state")?
        .set_default("status.interval_ms", 500)?
        .set_default("status.text_element", "light-status")?
        .set_default("status.body_element", "body")?
        .set_default("status.on_class", "body-light-on")?
        .set_default("status.off_class", "body-light-off")?
        .set_default("series_failure", "reschedule")?
        .set_default("charts", charts)?
        .set_default("logging.filter", "laundry_dashboard=info,tower_http=info")
}

fn chart_default(id: &str, label: &str, color: &str, path: &str) -> config::Value {
    let mut table = config::Map::new();
    table.insert("id".to_string(), config::Value::from(id));
    table.insert("label".to_string(), config::Value::from(label));
    table.insert("color".to_string(), config::Value::from(color));
    table.insert("path".to_string(), config::Value::from(path));
    table.insert(
        "interval_ms".to_string(),
        config::Value::from(default_series_interval_ms()),
    );
    config::Value::from(table)
}

/// Load `config/dashboard.toml`, then a per-host overlay `config/dashboard.<host>.toml`,
/// then `DASHBOARD__*` environment variables. Every file is optional.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let host = host_name(std::env::var("DASHBOARD_HOSTNAME").ok());
    let settings = build_settings("config/dashboard", host.as_deref(), Some(dashboard_env()))?;
    settings.validate()?;
    Ok(settings)
}

/// Host name selecting the overlay: an explicit override, else the machine's own name.
fn host_name(override_name: Option<String>) -> Option<String> {
    override_name
        .or_else(|| gethostname::gethostname().into_string().ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn dashboard_env() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .prefix_separator("__")
        .separator("__")
}

fn build_settings(
    base: &str,
    host: Option<&str>,
    env: Option<config::Environment>,
) -> Result<Settings, ConfigError> {
    let mut builder = with_defaults(config::Config::builder())?
        .add_source(toml_file(&format!("{base}.toml")));
    if let Some(host) = host {
        builder = builder.add_source(toml_file(&format!("{base}.{host}.toml")));
    }
    if let Some(env) = env {
        builder = builder.add_source(env);
    }

    Ok(builder.build()?.try_deserialize()?)
}

fn toml_file(path: &str) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::new(path, config::FileFormat::Toml).required(false)
}

impl Settings {
    fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.upstream.base_url).map_err(|e| ConfigError::BaseUrl {
            url: self.upstream.base_url.clone(),
            message: e.to_string(),
        })?;
        if self.status.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "status.interval_ms must be non-zero".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for chart in &self.charts {
            if chart.interval_ms == 0 {
                return Err(ConfigError::Validation(format!(
                    "chart {} has a zero interval_ms",
                    chart.id
                )));
            }
            if !seen.insert(chart.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate chart id {}",
                    chart.id
                )));
            }
        }
        Ok(())
    }
}
