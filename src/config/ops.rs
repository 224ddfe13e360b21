use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Config;

impl Config {
    /// Location of the configuration file.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;
        Ok(home.join(".config").join("quickpreview").join("config.toml"))
    }

    /// Load the user's configuration, or defaults if none has been written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration to the user's config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Dotted keys accepted by [`Config::get_value`] and [`Config::set_value`].
    pub const KEYS: &'static [&'static str] = &[
        "tool.name",
        "tool.program",
        "tool.background",
        "tool.search_path",
        "tool.startup_timeout",
        "tool.poll_interval",
        "fallback.window",
        "fallback.default_open",
        "batch.exit_policy",
    ];

    /// Get a config value by dot-separated key path
    pub fn get_value(&self, key: &str) -> Result<String> {
        match key {
            "tool.name" => Ok(self.tool.name.clone()),
            "tool.program" => Ok(self.tool.program.clone()),
            "tool.background" => Ok(self.tool.background.to_string()),
            "tool.search_path" => Ok(self.tool.search_path.to_string()),
            "tool.startup_timeout" => Ok(format_duration(self.tool.startup_timeout)),
            "tool.poll_interval" => Ok(format_duration(self.tool.poll_interval)),
            "fallback.window" => Ok(self.fallback.window.to_string()),
            "fallback.default_open" => Ok(self.fallback.default_open.to_string()),
            "batch.exit_policy" => Ok(self.batch.exit_policy.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value by dot-separated key path
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tool.name" => self.tool.name = value.to_string(),
            "tool.program" => self.tool.program = value.to_string(),
            "tool.background" => self.tool.background = parse_bool(value)?,
            "tool.search_path" => self.tool.search_path = parse_bool(value)?,
            "tool.startup_timeout" => self.tool.startup_timeout = parse_duration(value)?,
            "tool.poll_interval" => self.tool.poll_interval = parse_duration(value)?,
            "fallback.window" => self.fallback.window = parse_bool(value)?,
            "fallback.default_open" => self.fallback.default_open = parse_bool(value)?,
            "batch.exit_policy" => self.batch.exit_policy = value.parse()?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown config key: {key} (valid keys: {})", Config::KEYS.join(", "))
}

fn parse_bool(value: &str) -> Result<bool> {
    value.parse::<bool>()
        .with_context(|| format!("Invalid boolean value: {value}"))
}

fn parse_duration(value: &str) -> Result<Duration> {
    humantime::parse_duration(value)
        .with_context(|| format!("Invalid duration: {value} (e.g. \"2s\" or \"250ms\")"))
}

fn format_duration(d: Duration) -> String {
    humantime::format_duration(d).to_string()
}
