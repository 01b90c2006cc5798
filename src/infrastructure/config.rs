use crate::application::chart_adapter::ChartOptions;
use crate::domain::chart::{AlignmentPolicy, LabelFormat};
use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartSettings {
    /// Offset category labels are rendered at, in minutes east of UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub alignment: AlignmentPolicy,
    #[serde(default)]
    pub max_points: Option<usize>,
    #[serde(default)]
    pub palette: Vec<String>,
}

impl ChartSettings {
    pub fn chart_options(&self) -> anyhow::Result<ChartOptions> {
        let utc_offset = FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .with_context(|| format!("utc_offset_minutes {} out of range", self.utc_offset_minutes))?;

        Ok(ChartOptions {
            alignment: self.alignment,
            label_format: LabelFormat::HourMinute,
            utc_offset,
            max_points: self.max_points,
        })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Load `config/smartcity.{toml,...}` if present, overridden by
/// `SMARTCITY__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/smartcity").required(false))
        .add_source(config::Environment::with_prefix("SMARTCITY").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
