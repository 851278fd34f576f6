//! Configuration loading for the `repodeck` binary.
//!
//! Settings come from a TOML file with optional `[resolver]` and `[lookup]`
//! tables. The file is `--config PATH` when given, otherwise
//! `$XDG_CONFIG_HOME/repodeck/config.toml` if it exists, otherwise built-in
//! defaults. `GITHUB_TOKEN` in the environment overrides `lookup.token`.

use std::path::{Path, PathBuf};

use repodeck_lookup::LookupConfig;
use repodeck_resolver::ResolverConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding a GitHub access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	/// The file is not valid TOML or has mistyped keys.
	#[error("invalid configuration in {path}: {error}")]
	Parse {
		path: PathBuf,
		error: toml::de::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub resolver: ResolverConfig,
	pub lookup: LookupConfig,
}

impl AppConfig {
	/// Per-user configuration file location.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("repodeck").join("config.toml"))
	}

	/// Loads configuration using the lookup order described in the module docs.
	pub fn load(explicit: Option<&Path>) -> Result<Self> {
		let path = match explicit {
			Some(path) => Some(path.to_path_buf()),
			None => Self::default_path().filter(|path| path.is_file()),
		};
		let mut config = match path {
			Some(path) => Self::from_file(&path)?,
			None => Self::default(),
		};
		config.apply_token(std::env::var(TOKEN_ENV).ok());
		Ok(config)
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		toml::from_str(&text).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})
	}

	fn apply_token(&mut self, token: Option<String>) {
		if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
			self.lookup.token = Some(token);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn reads_both_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[resolver]
debounce_ms = 300

[lookup]
api_base_url = "https://ghe.example.com/api/v3"
timeout_secs = 10
"#
		)
		.unwrap();

		let config = AppConfig::from_file(file.path()).unwrap();
		assert_eq!(config.resolver.debounce_ms, 300);
		assert_eq!(config.resolver.host_marker, "github.com");
		assert_eq!(config.lookup.api_base_url, "https://ghe.example.com/api/v3");
		assert_eq!(config.lookup.timeout_secs, Some(10));
	}

	#[test]
	fn empty_file_is_all_defaults() {
		let file = tempfile::NamedTempFile::new().unwrap();
		assert_eq!(AppConfig::from_file(file.path()).unwrap(), AppConfig::default());
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = AppConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn mistyped_value_is_parse_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[resolver]\ndebounce_ms = \"soon\"").unwrap();
		let err = AppConfig::from_file(file.path()).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
	}

	#[test]
	fn environment_token_overrides_file() {
		let mut config = AppConfig::default();
		config.lookup.token = Some("from-file".into());

		config.apply_token(Some("from-env".into()));
		assert_eq!(config.lookup.token.as_deref(), Some("from-env"));

		config.apply_token(Some("  ".into()));
		assert_eq!(config.lookup.token.as_deref(), Some("from-env"));
	}
}
