//! Configuration settings for the Game of Life simulation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub input: InputConfig,
    pub timing: TimingConfig,
    pub random: RandomConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
    pub encoding: InputEncoding,
}

/// Character encoding of pattern files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEncoding {
    Utf8,
    #[serde(rename = "utf16le")]
    Utf16Le,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub step_interval_ms: u64,
    pub frame_interval_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible runs, entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
    pub color: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            columns: 100,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pattern_file: None,
            encoding: InputEncoding::Utf16Le,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 1500,
            frame_interval_ms: 100,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive_glyph: '█',
            dead_glyph: '·',
            color: true,
        }
    }
}

impl TimingConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.columns == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.rows,
                self.grid.columns
            );
        }

        if self.timing.step_interval_ms == 0 {
            anyhow::bail!("Step interval must be positive");
        }

        if self.timing.frame_interval_ms == 0 {
            anyhow::bail!("Frame interval must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(columns) = cli_overrides.columns {
            self.grid.columns = columns;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
        if let Some(seed) = cli_overrides.seed {
            self.random.seed = Some(seed);
        }
        if let Some(step_interval_ms) = cli_overrides.step_interval_ms {
            self.timing.step_interval_ms = step_interval_ms;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub pattern_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub step_interval_ms: Option<u64>,
}
