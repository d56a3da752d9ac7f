//! Configuration file handling.
//!
//! This module provides loading and saving of yvc configuration from a TOML
//! file.
//!
//! # Configuration Location
//!
//! Unless `-c FILE` is given, the configuration file is read from:
//! - Linux: `~/.config/yvc/config.toml`
//! - macOS: `~/Library/Application Support/yvc/config.toml`
//! - Windows: `%APPDATA%\yvc\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! vlists = ["/var/yvc/nbvlist", "/var/yvc/fbvlist"]
//! verbosity = 0
//! log_format = "text"
//! default_format = "text"
//! refresh_hours = 24
//!
//! [[sources]]
//! url = "https://cdn.NetBSD.org/pub/NetBSD/packages/vulns/pkg-vulnerabilities"
//! path = "/var/yvc/nbvlist"
//!
//! [ignore]
//! types = ["denial-of-service"]
//! urls = ["http://cve.mitre.org/cgi-bin/cvename.cgi?name=CVE-2006-1550"]
//! severities = ["low"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, YvcError};
use crate::model::Vulnerability;

/// Application configuration.
///
/// Loaded from a TOML file or created with default values. Command-line
/// flags are layered on top with [`Config::apply_overrides`].
///
/// # Example
///
/// ```
/// use yvc::Config;
///
/// let config: Config = toml::from_str(r#"vlists = ["/var/yvc/nbvlist"]"#).unwrap();
/// assert_eq!(config.vlists.len(), 1);
/// assert_eq!(config.default_format, "text");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vulnerability list files to check against.
    ///
    /// Default: none
    pub vlists: Vec<PathBuf>,

    /// Log verbosity: 0 warn, 1 info, 2 debug, 3 or more trace.
    ///
    /// Default: 0
    pub verbosity: u8,

    /// Log output format: "text" or "json".
    ///
    /// Default: "text"
    pub log_format: String,

    /// Output format when no `--format` flag is given.
    ///
    /// Valid values: "text", "json", "table"
    /// Default: "text"
    pub default_format: String,

    /// `fetch` leaves a local list alone if it is younger than this.
    ///
    /// Default: 24 hours
    pub refresh_hours: u64,

    /// Where `fetch` downloads lists from.
    pub sources: Vec<ListSource>,

    /// Vulnerabilities to leave out of reports.
    pub ignore: IgnoreConfig,
}

/// A remote vulnerability list and the local file it is saved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSource {
    pub url: String,
    pub path: PathBuf,
}

/// Rules for ignoring vulnerabilities by type, URL, or severity.
///
/// Values must match exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Vulnerability types, e.g. "denial-of-service".
    pub types: Vec<String>,

    /// Advisory URLs.
    pub urls: Vec<String>,

    /// Severity values.
    pub severities: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a vulnerability should be ignored.
    pub fn should_ignore(&self, vulnerability: &Vulnerability) -> bool {
        self.types.iter().any(|t| *t == vulnerability.vuln_type)
            || self.urls.iter().any(|u| *u == vulnerability.url)
            || vulnerability
                .severity
                .as_ref()
                .is_some_and(|s| self.severities.contains(s))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.urls.is_empty() && self.severities.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vlists: Vec::new(),
            verbosity: 0,
            log_format: "text".to_string(),
            default_format: "text".to_string(),
            refresh_hours: 24,
            sources: Vec::new(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the default configuration. A file that
    /// was asked for explicitly must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// explicit path does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(YvcError::ConfigNotFound(path.display().to_string()));
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Reads and parses the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| YvcError::io(path, e))?;
        toml::from_str(&content).map_err(|e| YvcError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| YvcError::io(parent, e))?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| YvcError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| YvcError::io(path, e))
    }

    /// Layers command-line values over the file: any `-l` list replaces the
    /// configured lists, and each `-v` raises the verbosity by one.
    pub fn apply_overrides(&mut self, vlists: Vec<PathBuf>, verbose: u8) {
        if !vlists.is_empty() {
            self.vlists = vlists;
        }
        self.verbosity = self.verbosity.saturating_add(verbose);
    }

    /// Returns the default path of the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use yvc::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("yvc/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yvc")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
