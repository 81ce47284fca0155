use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coverage::DEFAULT_LCOV_PATH;
use crate::history::DEFAULT_HISTORY_PATH;
use crate::report::DEFAULT_DASHBOARD_PATH;

/// Config file looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "covdash.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize)]
pub struct SummaryConfig {
    /// LCOV report to summarize
    #[serde(default = "default_lcov")]
    pub lcov: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// JSON history consumed by the dashboard and extended by `record`
    #[serde(default = "default_history")]
    pub history: PathBuf,
    /// Generated HTML page
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_lcov() -> PathBuf {
    PathBuf::from(DEFAULT_LCOV_PATH)
}

fn default_history() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_DASHBOARD_PATH)
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { lcov: default_lcov() }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            history: default_history(),
            output: default_output(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load an explicit config, or `covdash.toml` if present, or the defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_in(Path::new("."), explicit)
    }

    /// Same as [`Config::resolve`], looking for `covdash.toml` in `dir`
    pub fn resolve_in(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = dir.join(CONFIG_FILE);
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    // A path given on the command line beats the configured one.
    pub fn lcov_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.unwrap_or_else(|| self.summary.lcov.clone())
    }

    pub fn history_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.unwrap_or_else(|| self.dashboard.history.clone())
    }

    pub fn output_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.unwrap_or_else(|| self.dashboard.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[summary]
lcov = "target/coverage/lcov.info"

[dashboard]
output = "public/index.html"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.summary.lcov, PathBuf::from("target/coverage/lcov.info"));
        assert_eq!(config.dashboard.history, PathBuf::from("coverage_history.json"));
        assert_eq!(config.dashboard.output, PathBuf::from("public/index.html"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.summary.lcov, PathBuf::from("coverage/lcov.info"));
        assert_eq!(config.dashboard.history, PathBuf::from("coverage_history.json"));
        assert_eq!(config.dashboard.output, PathBuf::from("index.html"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::resolve(Some(&temp_dir.path().join("covdash.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("covdash.toml");
        fs::write(&path, "[summary]\nlcov = 42\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_default_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::resolve_in(temp_dir.path(), None).unwrap();
        assert_eq!(config.lcov_path(None), PathBuf::from("coverage/lcov.info"));
        assert_eq!(config.history_path(None), PathBuf::from("coverage_history.json"));
        assert_eq!(config.output_path(None), PathBuf::from("index.html"));
    }

    #[test]
    fn test_default_config_file_is_picked_up() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "[dashboard]\nhistory = \"ci/history.json\"\n",
        )
        .unwrap();

        let config = Config::resolve_in(temp_dir.path(), None).unwrap();
        assert_eq!(config.history_path(None), PathBuf::from("ci/history.json"));
        assert_eq!(config.output_path(None), PathBuf::from("index.html"));
    }

    #[test]
    fn test_cli_path_beats_config_and_default() {
        let config: Config = toml::from_str(
            r#"
[summary]
lcov = "target/lcov.info"

[dashboard]
history = "ci/history.json"
"#,
        )
        .unwrap();

        // CLI over config
        assert_eq!(
            config.lcov_path(Some(PathBuf::from("other/lcov.info"))),
            PathBuf::from("other/lcov.info")
        );
        assert_eq!(
            config.history_path(Some(PathBuf::from("h.json"))),
            PathBuf::from("h.json")
        );
        assert_eq!(
            config.output_path(Some(PathBuf::from("site/index.html"))),
            PathBuf::from("site/index.html")
        );

        // Config over default
        assert_eq!(config.lcov_path(None), PathBuf::from("target/lcov.info"));
        assert_eq!(config.history_path(None), PathBuf::from("ci/history.json"));

        // Default when neither is set
        assert_eq!(config.output_path(None), PathBuf::from("index.html"));
    }
}
