//! Repository identifiers.
//!
//! A [`RepoIdentifier`] is the `{owner, slug}` pair naming a repository on
//! GitHub. It is derived from free-form text the user typed into the add form
//! and is the only input the lookup service needs.
//!
//! Accepted shapes:
//! - `https://github.com/owner/repo` (also `http://`, `www.github.com`)
//! - `github.com/owner/repo` without a scheme
//! - `git@github.com:owner/repo.git`, or `github.com:owner/repo` without the user
//!
//! Anything after the second path segment (`/tree/main`, `/blob/...`), the
//! query string, and the fragment are ignored. A trailing `.git` is stripped
//! from the slug.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Host every identifier must live under.
pub const GITHUB_HOST: &str = "github.com";

/// scp-style prefixes used by git remotes.
const SCP_PREFIXES: [&str; 2] = ["git@github.com:", "github.com:"];

/// Reasons a piece of text does not name a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
	#[error("identifier is empty")]
	Empty,
	#[error("not a valid URL: {0}")]
	Malformed(String),
	#[error("unsupported URL scheme: {0}")]
	UnsupportedScheme(String),
	#[error("expected host github.com, found {0}")]
	WrongHost(String),
	#[error("expected an owner/repository path")]
	MissingSegments,
	#[error("invalid path segment: {0:?}")]
	InvalidSegment(String),
}

/// Owner and repository slug of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoIdentifier {
	owner: String,
	slug: String,
}

impl RepoIdentifier {
	/// Builds an identifier from already separated parts, validating both.
	pub fn new(owner: impl Into<String>, slug: impl Into<String>) -> Result<Self, IdentifierError> {
		let owner = owner.into();
		let slug = slug.into();
		let slug = slug.strip_suffix(".git").map(str::to_string).unwrap_or(slug);
		validate_segment(&owner)?;
		validate_segment(&slug)?;
		Ok(Self { owner, slug })
	}

	/// Parses user-entered text into an identifier.
	pub fn parse(text: &str) -> Result<Self, IdentifierError> {
		let text = text.trim();
		if text.is_empty() {
			return Err(IdentifierError::Empty);
		}

		if let Some(rest) = SCP_PREFIXES.iter().find_map(|prefix| strip_prefix_ignore_case(text, prefix)) {
			return Self::from_segments(rest.split('/'));
		}

		let with_scheme: Cow<'_, str> = if text.contains("://") {
			Cow::Borrowed(text)
		} else {
			Cow::Owned(format!("https://{text}"))
		};

		let url = Url::parse(&with_scheme).map_err(|e| IdentifierError::Malformed(e.to_string()))?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(IdentifierError::UnsupportedScheme(url.scheme().to_string()));
		}

		let host = url.host_str().unwrap_or_default();
		let host = host.strip_prefix("www.").unwrap_or(host);
		if !host.eq_ignore_ascii_case(GITHUB_HOST) {
			return Err(IdentifierError::WrongHost(host.to_string()));
		}

		let segments = url.path_segments().ok_or(IdentifierError::MissingSegments)?;
		Self::from_segments(segments)
	}

	fn from_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Result<Self, IdentifierError> {
		let mut segments = segments.filter(|s| !s.is_empty());
		let owner = segments.next().ok_or(IdentifierError::MissingSegments)?;
		let slug = segments.next().ok_or(IdentifierError::MissingSegments)?;
		Self::new(owner, slug)
	}

	pub fn owner(&self) -> &str {
		&self.owner
	}

	pub fn slug(&self) -> &str {
		&self.slug
	}

	/// `owner/slug`.
	pub fn full_name(&self) -> String {
		format!("{}/{}", self.owner, self.slug)
	}

	/// Canonical browser URL for the repository.
	pub fn html_url(&self) -> String {
		format!("https://{GITHUB_HOST}/{}/{}", self.owner, self.slug)
	}
}

impl fmt::Display for RepoIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.owner, self.slug)
	}
}

impl FromStr for RepoIdentifier {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
	let head = text.get(..prefix.len())?;
	head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

fn validate_segment(segment: &str) -> Result<(), IdentifierError> {
	let valid = !segment.is_empty()
		&& segment != "."
		&& segment != ".."
		&& segment
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
	if valid {
		Ok(())
	} else {
		Err(IdentifierError::InvalidSegment(segment.to_string()))
	}
}
