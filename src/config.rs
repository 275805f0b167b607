//! Simple configuration persistence for Chordshift
//!
//! Stores the default target key and the output file naming.

use chordshift_core::Key;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inserted between the input file stem and the target key
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_transposed_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target key used when none is given on the command line
    pub default_key: Option<Key>,
    /// Output files are named `<stem><suffix><KEY>.<ext>`
    pub output_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_key: None,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "using default config");
            Self::default()
        })
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save config to the default location
    pub fn save(&self) -> io::Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.serialize())
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chordshift")
            .join("config.txt")
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim();

                match key.trim() {
                    "default_key" => config.default_key = value.parse().ok(),
                    "output_suffix" => {
                        if !value.is_empty() {
                            config.output_suffix = value.to_string();
                        }
                    }
                    _ => {} // Ignore unknown keys
                }
            }
        }

        config
    }

    /// Serialize config to key=value format
    fn serialize(&self) -> String {
        let mut lines = vec!["# Chordshift configuration".to_string()];

        if let Some(key) = self.default_key {
            lines.push(format!("default_key={}", key));
        }
        lines.push(format!("output_suffix={}", self.output_suffix));

        lines.join("\n") + "\n"
    }
}
