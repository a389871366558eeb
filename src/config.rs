use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "tally.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Expected-result text keyed by test id, e.g. `TC003 = "Input sanitized"`.
    /// Entries here extend or replace the built-in table.
    #[serde(default)]
    pub expected: BTreeMap<String, String>,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Where reports are written and where static assets live.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Base media directory; reports go to `<media_root>/reports`.
    pub media_root: PathBuf,
    /// Static assets directory; the logo is read from `<static_root>/images/logo.png`.
    pub static_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("media"),
            static_root: PathBuf::from("static"),
        }
    }
}

/// Text and output options for the generated report.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub brand: String,
    pub environment: String,
    pub file_name: String,
    /// Also write the results as JSON next to the report.
    pub write_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            brand: "Bhavi Fashion".into(),
            environment: "Production".into(),
            file_name: "test_execution_report.html".into(),
            write_json: true,
        }
    }
}

/// Program used to open the finished report.
#[derive(Debug, Default, Deserialize)]
pub struct ViewerConfig {
    /// Command line, split shell-style. The report path is appended.
    /// Example: "firefox --new-window"
    pub command: Option<String>,
}

impl Config {
    /// Load `tally.toml` from the workspace root, falling back to defaults if absent or invalid.
    pub fn load(workspace: &Path) -> Self {
        let path = workspace.join(CONFIG_FILE);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Load an explicitly requested config file. Unlike [`Config::load`], any
    /// problem reading or parsing it is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Apply `TALLY_MEDIA_ROOT` / `TALLY_STATIC_ROOT` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var_os(key).map(PathBuf::from));
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<PathBuf>) {
        if let Some(media) = lookup("TALLY_MEDIA_ROOT") {
            self.paths.media_root = media;
        }
        if let Some(statics) = lookup("TALLY_STATIC_ROOT") {
            self.paths.static_root = statics;
        }
    }

    pub fn report_dir(&self) -> PathBuf {
        self.paths.media_root.join("reports")
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_dir().join(&self.report.file_name)
    }

    pub fn logo_path(&self) -> PathBuf {
        self.paths.static_root.join("images").join("logo.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.paths.media_root, PathBuf::from("media"));
        assert_eq!(
            config.report_path(),
            PathBuf::from("media/reports/test_execution_report.html")
        );
        assert_eq!(config.logo_path(), PathBuf::from("static/images/logo.png"));
        assert!(config.report.write_json);
        assert!(config.expected.is_empty());
        assert!(config.viewer.command.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[paths]
media_root = "/srv/media"

[report]
environment = "Staging"

[expected]
TC003 = "Input sanitized"
"#,
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.paths.media_root, PathBuf::from("/srv/media"));
        assert_eq!(config.paths.static_root, PathBuf::from("static"));
        assert_eq!(config.report.environment, "Staging");
        assert_eq!(config.report.brand, "Bhavi Fashion");
        assert_eq!(config.expected.get("TC003").map(String::as_str), Some("Input sanitized"));
    }

    #[test]
    fn invalid_implicit_file_falls_back_but_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "paths = 3").unwrap();

        assert_eq!(Config::load(dir.path()).paths.media_root, PathBuf::from("media"));
        assert!(Config::load_file(&path).is_err());
        assert!(Config::load_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn env_overrides_replace_paths() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "TALLY_MEDIA_ROOT" => Some(PathBuf::from("/tmp/m")),
            _ => None,
        });
        assert_eq!(config.report_dir(), PathBuf::from("/tmp/m/reports"));
        assert_eq!(config.paths.static_root, PathBuf::from("static"));
    }
}
