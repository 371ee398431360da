use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::ChartColors;
use crate::format::{Locale, NumberFormat};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BIKE_DASHBOARD_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Picture shown at the top of the side panel, skipped when the file is absent.
    pub image_path: Option<PathBuf>,
    pub locale: Locale,
    pub line_color: String,
    pub background_color: String,
    /// One hex colour per cluster, in cluster order.
    pub cluster_colors: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from("dashboard/bikesharing.csv"),
            image_path: Some(PathBuf::from("dashboard/foto_sepeda.jpg")),
            locale: Locale::default(),
            line_color: "#64B5F6".to_string(),
            background_color: "#F5F5F5".to_string(),
            cluster_colors: ["#64B5F6", "#64B5F6", "#808080", "#808080"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Resolve the config: `$BIKE_DASHBOARD_CONFIG` must point at a readable
    /// file; otherwise `dashboard.json` is used when it exists, else defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_path(default_path);
        }
        log::info!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        // Fail on bad colours at startup rather than at first paint.
        config.chart_colors()?;
        Ok(config)
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::for_locale(self.locale)
    }

    pub fn chart_colors(&self) -> Result<ChartColors> {
        Ok(ChartColors::from_hex(
            &self.line_color,
            &self.background_color,
            &self.cluster_colors,
        )?)
    }
}
