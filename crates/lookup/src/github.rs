use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use repodeck_primitives::{RepoIdentifier, RepoMetadata};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{LookupError, MetadataLookup, Result};

/// Default base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const DEFAULT_USER_AGENT: &str = concat!("repodeck/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GitHubLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
	pub api_base_url: String,
	pub user_agent: String,
	/// Personal access token sent as `Authorization: token ...`.
	pub token: Option<String>,
	/// Per-request timeout. `None` lets a request run until it completes.
	pub timeout_secs: Option<u64>,
}

impl Default for LookupConfig {
	fn default() -> Self {
		Self {
			api_base_url: GITHUB_API_BASE.to_string(),
			user_agent: DEFAULT_USER_AGENT.to_string(),
			token: None,
			timeout_secs: None,
		}
	}
}

/// [`MetadataLookup`] backed by `GET /repos/{owner}/{repo}`.
///
/// The language breakdown comes from `/repos/{owner}/{repo}/languages`. That
/// second request is best effort: its failure leaves
/// [`RepoMetadata::languages`] empty instead of failing the lookup.
#[derive(Debug, Clone)]
pub struct GitHubLookup {
	client: Client,
	api_base_url: String,
}

impl GitHubLookup {
	pub fn new(config: &LookupConfig) -> Result<Self> {
		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
		if let Some(token) = config.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
			let mut value = HeaderValue::from_str(&format!("token {token}"))
				.map_err(|e| LookupError::Transport(format!("invalid token header: {e}")))?;
			value.set_sensitive(true);
			headers.insert(AUTHORIZATION, value);
		}

		let mut builder = Client::builder()
			.user_agent(config.user_agent.clone())
			.default_headers(headers);
		if let Some(secs) = config.timeout_secs {
			builder = builder.timeout(Duration::from_secs(secs));
		}
		let client = builder
			.build()
			.map_err(|e| LookupError::Transport(e.to_string()))?;

		Ok(Self {
			client,
			api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
		})
	}

	/// Endpoint queried for `id`.
	pub fn endpoint(&self, id: &RepoIdentifier) -> String {
		format!("{}/repos/{}/{}", self.api_base_url, id.owner(), id.slug())
	}

	async fn fetch_languages(&self, id: &RepoIdentifier) -> Result<BTreeMap<String, u64>> {
		let url = format!("{}/languages", self.endpoint(id));
		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| LookupError::Transport(e.to_string()))?;
		check_status(response.status())?;

		let body = response
			.bytes()
			.await
			.map_err(|e| LookupError::Transport(e.to_string()))?;
		serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))
	}
}

#[async_trait]
impl MetadataLookup for GitHubLookup {
	async fn fetch(&self, id: &RepoIdentifier) -> Result<RepoMetadata> {
		let url = self.endpoint(id);
		debug!(%url, "github.lookup");

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| LookupError::Transport(e.to_string()))?;
		check_status(response.status())?;

		let body = response
			.bytes()
			.await
			.map_err(|e| LookupError::Transport(e.to_string()))?;
		let mut metadata = decode_metadata(&body)?;
		attach_languages(&mut metadata, self.fetch_languages(id).await);
		Ok(metadata)
	}
}

fn attach_languages(metadata: &mut RepoMetadata, languages: Result<BTreeMap<String, u64>>) {
	match languages {
		Ok(languages) => metadata.languages = languages,
		Err(err) => debug!(repo = %metadata.name, error = %err, "github.lookup.languages_unavailable"),
	}
}

fn check_status(status: StatusCode) -> Result<()> {
	if status == StatusCode::NOT_FOUND {
		Err(LookupError::NotFound)
	} else if status.is_success() {
		Ok(())
	} else {
		Err(LookupError::Status(status.as_u16()))
	}
}

fn decode_metadata(body: &[u8]) -> Result<RepoMetadata> {
	serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(StatusCode::OK, Ok(()))]
	#[case(StatusCode::NOT_FOUND, Err(LookupError::NotFound))]
	#[case(StatusCode::FORBIDDEN, Err(LookupError::Status(403)))]
	#[case(StatusCode::BAD_GATEWAY, Err(LookupError::Status(502)))]
	fn status_classification(#[case] status: StatusCode, #[case] expected: Result<()>) {
		assert_eq!(check_status(status), expected);
	}

	#[test]
	fn endpoint_trims_trailing_slash() {
		let lookup = GitHubLookup::new(&LookupConfig {
			api_base_url: "https://ghe.example.com/api/v3/".into(),
			..LookupConfig::default()
		})
		.unwrap();
		let id = RepoIdentifier::new("acme", "widget").unwrap();
		assert_eq!(lookup.endpoint(&id), "https://ghe.example.com/api/v3/repos/acme/widget");
	}

	#[test]
	fn decode_reports_malformed_bodies() {
		assert!(matches!(decode_metadata(b"<html>rate limited</html>"), Err(LookupError::Decode(_))));
		let meta = decode_metadata(br#"{"name":"widget","topics":["docker"]}"#).unwrap();
		assert_eq!(meta.topics, vec!["docker".to_string()]);
	}

	#[test]
	fn language_failures_leave_metadata_intact() {
		let mut meta = RepoMetadata::named("widget");
		attach_languages(&mut meta, Err(LookupError::Status(403)));
		assert_eq!(meta, RepoMetadata::named("widget"));

		attach_languages(&mut meta, Ok(BTreeMap::from([("Rust".to_string(), 1200)])));
		assert_eq!(meta.languages.get("Rust"), Some(&1200));
	}

	#[test]
	fn config_defaults_fill_missing_keys() {
		let config: LookupConfig = toml::from_str("token = \"abc\"").unwrap();
		assert_eq!(config.api_base_url, GITHUB_API_BASE);
		assert_eq!(config.token.as_deref(), Some("abc"));
		assert_eq!(config.timeout_secs, None);
	}

	#[test]
	fn rejects_tokens_that_are_not_header_safe() {
		let config = LookupConfig {
			token: Some("bad\ntoken".into()),
			..LookupConfig::default()
		};
		assert!(matches!(GitHubLookup::new(&config), Err(LookupError::Transport(_))));
	}

	#[tokio::test]
	async fn unreachable_service_is_not_reported_as_not_found() {
		let lookup = GitHubLookup::new(&LookupConfig {
			api_base_url: "http://127.0.0.1:1".into(),
			timeout_secs: Some(5),
			..LookupConfig::default()
		})
		.unwrap();
		let id = RepoIdentifier::new("acme", "widget").unwrap();
		let err = lookup.fetch(&id).await.unwrap_err();
		assert!(!err.is_not_found());
	}
}
