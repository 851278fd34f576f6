use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// License block of a repository response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
	#[serde(default)]
	pub spdx_id: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
}

/// Repository metadata returned by the lookup service.
///
/// Only `name` is required; every other field tolerates being absent or
/// `null`. Field names follow the GitHub REST `repos` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
	pub name: String,
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	/// Topics in the order the service reports them.
	#[serde(default)]
	pub topics: Vec<String>,
	#[serde(default, rename = "stargazers_count")]
	pub stars: u64,
	#[serde(default, rename = "forks_count")]
	pub forks: u64,
	#[serde(default, rename = "watchers_count")]
	pub watchers: u64,
	#[serde(default, rename = "open_issues_count")]
	pub open_issues: u64,
	#[serde(default)]
	pub language: Option<String>,
	#[serde(default)]
	pub license: Option<License>,
	#[serde(default)]
	pub archived: bool,
	#[serde(default)]
	pub fork: bool,
	#[serde(default)]
	pub default_branch: Option<String>,
	#[serde(default)]
	pub html_url: Option<String>,
	#[serde(default)]
	pub created_at: Option<String>,
	#[serde(default)]
	pub updated_at: Option<String>,
	#[serde(default)]
	pub pushed_at: Option<String>,
	/// Bytes of code per language. Filled by a separate request; empty when
	/// the service could not provide it.
	#[serde(default)]
	pub languages: BTreeMap<String, u64>,
}

impl RepoMetadata {
	/// Minimal metadata with just a name, mostly useful for tests and fixtures.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// SPDX identifier of the license, when the service reported one.
	pub fn license_spdx(&self) -> Option<&str> {
		self.license.as_ref()?.spdx_id.as_deref()
	}

	/// Languages ordered by share of code, largest first.
	pub fn languages_by_size(&self) -> Vec<(&str, u64)> {
		let mut languages: Vec<_> = self.languages.iter().map(|(name, bytes)| (name.as_str(), *bytes)).collect();
		languages.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
		languages
	}

	/// Description with surrounding whitespace removed, `None` when blank.
	pub fn description_text(&self) -> Option<&str> {
		self.description.as_deref().map(str::trim).filter(|d| !d.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn decodes_github_repo_payload() {
		let json = r#"{
			"name": "widget",
			"full_name": "acme/widget",
			"description": "A widget",
			"topics": ["kubernetes", "helm"],
			"stargazers_count": 42,
			"forks_count": 3,
			"watchers_count": 42,
			"open_issues_count": 1,
			"language": "Go",
			"license": {"key": "mit", "spdx_id": "MIT", "name": "MIT License"},
			"archived": false,
			"fork": true,
			"default_branch": "main",
			"html_url": "https://github.com/acme/widget",
			"owner": {"login": "acme"}
		}"#;

		let meta: RepoMetadata = serde_json::from_str(json).unwrap();
		assert_eq!(meta.name, "widget");
		assert_eq!(meta.topics, vec!["kubernetes".to_string(), "helm".to_string()]);
		assert_eq!(meta.stars, 42);
		assert_eq!(meta.license_spdx(), Some("MIT"));
		assert!(meta.fork);
		assert_eq!(meta.default_branch.as_deref(), Some("main"));
	}

	#[test]
	fn tolerates_nulls_and_missing_fields() {
		let meta: RepoMetadata = serde_json::from_str(r#"{"name": "bare", "description": null, "license": null}"#).unwrap();
		assert_eq!(meta, RepoMetadata::named("bare"));
		assert_eq!(meta.description_text(), None);
	}

	#[test]
	fn name_is_required() {
		assert!(serde_json::from_str::<RepoMetadata>(r#"{"description": "x"}"#).is_err());
	}

	#[test]
	fn languages_sort_by_size() {
		let meta = RepoMetadata {
			languages: BTreeMap::from([("Go".into(), 900), ("Shell".into(), 40), ("Dockerfile".into(), 40)]),
			..RepoMetadata::named("widget")
		};
		assert_eq!(meta.languages_by_size(), vec![("Go", 900), ("Dockerfile", 40), ("Shell", 40)]);
	}

	#[test]
	fn blank_description_is_none() {
		let meta = RepoMetadata {
			description: Some("   ".into()),
			..RepoMetadata::named("x")
		};
		assert_eq!(meta.description_text(), None);
	}
}
