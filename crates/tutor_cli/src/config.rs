use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tutor_engine::EngineOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    pub engine: EngineOptions,
    pub logging: LoggingConfig,
}

impl TutorConfig {
    /// Read `path`. A missing file yields defaults; an unreadable or invalid
    /// one yields defaults plus the problem, reported once logging is up.
    pub fn load(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => (config, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("error parsing config file: {}", e)),
                ),
            },
            Err(e) => (
                Self::default(),
                Some(format!("error reading config file: {}", e)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_silent_default() {
        let (config, problem) = TutorConfig::load(Path::new("/nonexistent/tutor_config.toml"));
        assert_eq!(config, TutorConfig::default());
        assert!(problem.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let file = write("[engine]\nalias_policy = \"reject_conflict\"\nparallelism = 2\n");
        let (config, problem) = TutorConfig::load(file.path());
        assert!(problem.is_none());
        assert_eq!(config.engine.parallelism, 2);
        assert!(config.engine.filter_revealing_hints);
        assert_eq!(config.logging.level, "warn");
        assert_ne!(config.engine, EngineOptions::default());
    }

    #[test]
    fn invalid_file_reports_and_defaults() {
        let file = write("[engine\nparallelism = ");
        let (config, problem) = TutorConfig::load(file.path());
        assert_eq!(config, TutorConfig::default());
        assert!(problem.unwrap().contains("parsing"));
    }
}
