use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_SETTINGS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../",
    "configs/default.toml"
));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Api {
    /// Backend origin. The browser falls back to the page origin when unset.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sidebar {
    /// Widest viewport, in CSS pixels, on which following a link closes the sidebar.
    pub breakpoint: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// Seconds between two status fetches.
    pub poll_interval: u64,
    /// `time` format description used for the last update line.
    pub timestamp_format: String,
}

impl Status {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    #[serde(default)]
    pub api: Api,
    pub sidebar: Sidebar,
    pub status: Status,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::from_toml(DEFAULT_SETTINGS)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
