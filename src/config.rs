use crate::types::{CellMetrics, Config};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "folio").context("Failed to determine config directory")?;

        Self::with_dir(project_dirs.config_dir())
    }

    /// Use an explicit directory instead of the platform config dir
    pub fn with_dir(dir: &Path) -> Result<Self> {
        let config_dir = dir.to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(ConfigManager { config_dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_path();

        if !config_path.exists() {
            let config = Config::default();
            self.save_config(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config file: {}. Using defaults.", e);
            Config::default()
        });

        Ok(validate(config))
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(self.config_path(), content).context("Failed to write config file")?;

        Ok(())
    }
}

// Clamp values a hand-edited file could push out of range
fn validate(mut config: Config) -> Config {
    config.smoke = config.smoke.sanitized();

    let nav = &mut config.navigation;
    nav.activation_ratio = nav.activation_ratio.clamp(0.0, 1.0);
    nav.navbar_threshold_px = nav.navbar_threshold_px.max(0.0);
    nav.scroll_margin_px = nav.scroll_margin_px.max(0.0);

    let defaults = CellMetrics::default();
    if !(config.cells.cell_width_px > 0.0) {
        config.cells.cell_width_px = defaults.cell_width_px;
    }
    if !(config.cells.cell_height_px > 0.0) {
        config.cells.cell_height_px = defaults.cell_height_px;
    }

    config
}
