use drawboard_snap::DEFAULT_TOLERANCE_PX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "drawboard.config.json";

/// Drawboard configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Snap query defaults
    #[serde(default)]
    pub snap: SnapConfig,

    /// How documents are written back out
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapConfig {
    /// Alignment tolerance in screen pixels
    #[serde(default = "default_tolerance_px")]
    pub tolerance_px: f64,

    /// Grid size for snap queries that are not run against a document
    #[serde(default = "default_grid_size")]
    pub default_grid_size: f64,
}

fn default_tolerance_px() -> f64 {
    DEFAULT_TOLERANCE_PX
}

fn default_grid_size() -> f64 {
    drawboard_document::schema::DEFAULT_GRID_SIZE
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance_px: default_tolerance_px(),
            default_grid_size: default_grid_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Serialize a value the way the config asks for
    pub fn to_json<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        let json = if self.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}
