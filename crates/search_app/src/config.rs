//! Application configuration, read from a RON file and overridden by CLI flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use search_core::SourceType;
use search_engine::{EngineConfig, FetchSettings, DEFAULT_BACKEND_URL, DEFAULT_JOKE_URL};
use search_logging::search_info;
use serde::Deserialize;
use url::Url;

use crate::cli::Args;

pub const DEFAULT_CONFIG_FILENAME: &str = "search_app.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub backend_url: String,
    pub joke_url: String,
    /// Source names (`catalog`, `social`, `article` or the result labels).
    pub sources: Vec<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    pub show_joke: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            joke_url: DEFAULT_JOKE_URL.to_string(),
            sources: vec![
                "catalog".to_string(),
                "social".to_string(),
                "article".to_string(),
            ],
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_bytes: fetch.max_bytes,
            show_joke: false,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `./search_app.ron` if it exists, or falls back to defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        search_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(backend) = &args.backend {
            self.backend_url = backend.clone();
        }
        if args.joke {
            self.show_joke = true;
        }
        self
    }

    pub fn source_types(&self) -> anyhow::Result<Vec<SourceType>> {
        let mut parsed = Vec::with_capacity(self.sources.len());
        for name in &self.sources {
            let source_type: SourceType = name.parse()?;
            if !parsed.contains(&source_type) {
                parsed.push(source_type);
            }
        }
        if parsed.is_empty() {
            bail!("no search sources configured");
        }
        Ok(parsed)
    }

    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let backend_url = Url::parse(&self.backend_url)
            .with_context(|| format!("invalid backend url {:?}", self.backend_url))?;
        let joke_url = Url::parse(&self.joke_url)
            .with_context(|| format!("invalid joke url {:?}", self.joke_url))?;
        let fetch = FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        Ok(EngineConfig {
            fetch,
            backend_url,
            joke_url,
            sources: self.source_types()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_ron(
            r#"(backend_url: "http://localhost:8080/api/", sources: ["article"])"#,
        )
        .unwrap();

        assert_eq!(config.backend_url, "http://localhost:8080/api/");
        assert_eq!(config.joke_url, DEFAULT_JOKE_URL);
        assert_eq!(
            config.source_types().unwrap(),
            vec![SourceType::WikipediaArticle]
        );
        assert!(!config.show_joke);
    }

    #[test]
    fn example_file_matches_defaults() {
        let example = AppConfig::from_ron(include_str!("../search_app.example.ron")).unwrap();
        assert_eq!(
            example,
            AppConfig {
                show_joke: true,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(show_joke: true, request_timeout_ms: 1500)").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.show_joke);
        let engine = config.engine_config().unwrap();
        assert_eq!(engine.fetch.request_timeout, Duration::from_millis(1500));
        assert_eq!(engine.sources, SourceType::BY_PRIORITY.to_vec());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn unknown_source_is_rejected() {
        let config = AppConfig {
            sources: vec!["catalog".to_string(), "news".to_string()],
            ..AppConfig::default()
        };
        assert!(config.engine_config().is_err());
    }

    #[test]
    fn duplicate_sources_collapse() {
        let config = AppConfig {
            sources: vec!["catalog".to_string(), "CfaBreedProfile".to_string()],
            ..AppConfig::default()
        };
        assert_eq!(
            config.source_types().unwrap(),
            vec![SourceType::CfaBreedProfile]
        );
    }

    #[test]
    fn cli_overrides_backend_and_joke() {
        let args = Args::parse_from(["search_app", "-b", "http://10.0.0.2:5000/", "--joke"]);
        let config = AppConfig::default().with_overrides(&args);
        assert_eq!(config.backend_url, "http://10.0.0.2:5000/");
        assert!(config.show_joke);
    }

    #[test]
    fn invalid_backend_url_is_reported() {
        let config = AppConfig {
            backend_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        let err = config.engine_config().unwrap_err();
        assert!(err.to_string().contains("invalid backend url"));
    }
}
