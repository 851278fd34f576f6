use std::time::Duration;

use repodeck_primitives::GITHUB_HOST;
use serde::Deserialize;

/// Quiet period after the last keystroke before a lookup is attempted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Tunables for [`crate::MetadataResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
	/// Debounce window in milliseconds.
	pub debounce_ms: u64,
	/// Substring that must appear in the input before a lookup is scheduled.
	pub host_marker: String,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
			host_marker: GITHUB_HOST.to_string(),
		}
	}
}

impl ResolverConfig {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Returns true when `text` mentions the host marker, ignoring ASCII case.
	pub fn is_armed_by(&self, text: &str) -> bool {
		text.to_ascii_lowercase()
			.contains(&self.host_marker.to_ascii_lowercase())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_form_behavior() {
		let config = ResolverConfig::default();
		assert_eq!(config.debounce(), Duration::from_millis(800));
		assert_eq!(config.host_marker, "github.com");
	}

	#[test]
	fn partial_toml_keeps_defaults() {
		let config: ResolverConfig = toml::from_str("debounce_ms = 250").unwrap();
		assert_eq!(config.debounce(), Duration::from_millis(250));
		assert_eq!(config.host_marker, "github.com");
	}

	#[test]
	fn host_marker_match_ignores_case() {
		let config = ResolverConfig::default();
		assert!(config.is_armed_by("https://GitHub.com/acme"));
		assert!(!config.is_armed_by("https://gitlab.com/acme/widget"));
	}
}
