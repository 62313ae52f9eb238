//! Configuration management for dox.
//!
//! Parses `dox.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.route_prefix`
//! - `docs.secondary.type`
//! - `docs.secondary.prefix`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build profile.
    pub profile: Option<Profile>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dox.toml";

/// Project data directory, created next to the config file.
const PROJECT_DIRNAME: &str = ".dox";

/// Build profile controlling whether the docs index is memoized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Build the index once per process.
    #[default]
    Production,
    /// Rebuild the index on every access.
    Development,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsConfigRaw,
    /// Reading-time estimation settings.
    pub reading: ReadingConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    patterns: Option<Vec<String>>,
    route_prefix: Option<String>,
    profile: Option<Profile>,
    secondary: Option<SecondaryConfig>,
}

/// The secondary content set, namespaced under a slug prefix.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecondaryConfig {
    /// Value of the front matter `type` field that selects this set.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Prefix prepended to slugs of documents in this set.
    pub prefix: String,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            content_type: "cli".to_owned(),
            prefix: "cli/".to_owned(),
        }
    }
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Source directory for content files.
    pub source_dir: PathBuf,
    /// Project directory for dox data (.dox/).
    pub project_dir: PathBuf,
    /// Glob patterns selecting content files, relative to `source_dir`.
    pub patterns: Vec<String>,
    /// Route prefix for generated paths (e.g., "/docs").
    pub route_prefix: String,
    /// Build profile.
    pub profile: Profile,
    /// Secondary content set.
    pub secondary: SecondaryConfig,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            project_dir: PathBuf::from(PROJECT_DIRNAME),
            patterns: default_patterns(),
            route_prefix: default_route_prefix(),
            profile: Profile::default(),
            secondary: SecondaryConfig::default(),
        }
    }
}

impl DocsConfig {
    /// Default manifest output path (.dox/index.json).
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("index.json")
    }
}

fn default_patterns() -> Vec<String> {
    vec!["**/*.md".to_owned(), "**/*.mdx".to_owned()]
}

fn default_route_prefix() -> String {
    "/docs".to_owned()
}

/// Reading-time estimation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Reading speed used for estimates.
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dox.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(profile) = settings.profile {
            self.docs_resolved.profile = profile;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            reading: ReadingConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                project_dir: base.join(PROJECT_DIRNAME),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_reading()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;

        require_non_empty(&docs.route_prefix, "docs.route_prefix")?;
        if !docs.route_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "docs.route_prefix must start with /".to_owned(),
            ));
        }

        if docs.patterns.is_empty() {
            return Err(ConfigError::Validation(
                "docs.patterns must contain at least one pattern".to_owned(),
            ));
        }
        for pattern in &docs.patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("docs.patterns: invalid pattern {pattern:?}: {e}"))
            })?;
        }

        require_non_empty(&docs.secondary.content_type, "docs.secondary.type")?;
        require_non_empty(&docs.secondary.prefix, "docs.secondary.prefix")?;

        Ok(())
    }

    /// Validate reading configuration.
    fn validate_reading(&self) -> Result<(), ConfigError> {
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_field(&mut self.docs.source_dir, "docs.source_dir")?;
        expand::expand_field(&mut self.docs.route_prefix, "docs.route_prefix")?;
        if let Some(secondary) = self.docs.secondary.as_mut() {
            secondary.content_type =
                expand::expand_env(&secondary.content_type, "docs.secondary.type")?;
            secondary.prefix = expand::expand_env(&secondary.prefix, "docs.secondary.prefix")?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.docs;

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(raw.source_dir.as_deref().unwrap_or("docs")),
            project_dir: config_dir.join(PROJECT_DIRNAME),
            patterns: raw.patterns.clone().unwrap_or_else(default_patterns),
            route_prefix: raw
                .route_prefix
                .as_deref()
                .map(|p| p.trim_end_matches('/').to_owned())
                .unwrap_or_else(default_route_prefix),
            profile: raw.profile.unwrap_or_default(),
            secondary: raw.secondary.clone().unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.project_dir,
            PathBuf::from("/test/.dox")
        );
        assert_eq!(
            config.docs_resolved.manifest_path(),
            PathBuf::from("/test/.dox/index.json")
        );
        assert_eq!(config.docs_resolved.route_prefix, "/docs");
        assert_eq!(config.docs_resolved.profile, Profile::Production);
        assert_eq!(config.docs_resolved.secondary, SecondaryConfig::default());
        assert_eq!(config.reading.words_per_minute, 200);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.reading.words_per_minute, 200);
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_parse_docs_config() {
        let toml = r#"
[docs]
source_dir = "content"
patterns = ["**/*.mdx"]
route_prefix = "/guide/"
profile = "development"

[docs.secondary]
type = "sdk"
prefix = "sdk/"

[reading]
words_per_minute = 250
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let docs = &config.docs_resolved;
        assert_eq!(docs.source_dir, PathBuf::from("/project/content"));
        assert_eq!(docs.project_dir, PathBuf::from("/project/.dox"));
        assert_eq!(docs.patterns, vec!["**/*.mdx".to_owned()]);
        assert_eq!(docs.route_prefix, "/guide");
        assert_eq!(docs.profile, Profile::Development);
        assert_eq!(
            docs.secondary,
            SecondaryConfig {
                content_type: "sdk".to_owned(),
                prefix: "sdk/".to_owned(),
            }
        );
        assert_eq!(config.reading.words_per_minute, 250);
    }

    #[test]
    fn test_parse_unknown_profile_fails() {
        let toml = r#"
[docs]
profile = "staging"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/docs")
        );
        assert_eq!(
            config.docs_resolved.patterns,
            vec!["**/*.md".to_owned(), "**/*.mdx".to_owned()]
        );
    }

    #[test]
    fn test_validate_route_prefix_requires_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.route_prefix = "docs".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.route_prefix"));
    }

    #[test]
    fn test_validate_empty_route_prefix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.route_prefix = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.route_prefix cannot be empty"));
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.patterns = vec!["**/[*.md".to_owned()];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.patterns"));
    }

    #[test]
    fn test_validate_empty_secondary_prefix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.secondary.prefix = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.secondary.prefix"));
    }

    #[test]
    fn test_validate_zero_words_per_minute() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.reading.words_per_minute = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reading.words_per_minute"));
    }

    #[test]
    fn test_validate_default_is_valid() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.docs_resolved.project_dir,
            PathBuf::from("/test/.dox")
        );
    }

    #[test]
    fn test_apply_cli_settings_profile() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            profile: Some(Profile::Development),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.profile, Profile::Development);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/dox.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("dox.toml");
        std::fs::write(&config_path, "[docs]\nsource_dir = \"pages/docs\"\n").unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            temp_dir.path().join("pages/docs")
        );
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_from_file_runs_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("dox.toml");
        std::fs::write(&config_path, "[reading]\nwords_per_minute = 0\n").unwrap();

        let err = Config::load(Some(&config_path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("dox.toml");
        std::fs::write(&config_path, "[docs]\nprofile = \"production\"\n").unwrap();

        let settings = CliSettings {
            profile: Some(Profile::Development),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.docs_resolved.profile, Profile::Development);
    }

    #[test]
    fn test_load_expands_secondary_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("dox.toml");
        std::fs::write(
            &config_path,
            "[docs.secondary]\ntype = \"${DOX_TEST_SET_TYPE}\"\nprefix = \"${DOX_TEST_SET_TYPE}/v${DOX_TEST_SET_VERSION:-1}/\"\n",
        )
        .unwrap();
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("DOX_TEST_SET_TYPE", "cloud");
            std::env::remove_var("DOX_TEST_SET_VERSION");
        }

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.secondary.content_type, "cloud");
        assert_eq!(config.docs_resolved.secondary.prefix, "cloud/v1/");
        unsafe {
            std::env::remove_var("DOX_TEST_SET_TYPE");
        }
    }

    #[test]
    fn test_load_reports_unset_secondary_variable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("dox.toml");
        std::fs::write(
            &config_path,
            "[docs.secondary]\nprefix = \"${DOX_TEST_UNSET_SET_PREFIX}\"\n",
        )
        .unwrap();
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("DOX_TEST_UNSET_SET_PREFIX");
        }

        let err = Config::load(Some(&config_path), None).unwrap_err();
        assert!(err.to_string().contains("docs.secondary.prefix"));
    }
}
