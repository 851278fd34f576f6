//! Bookmark import.
//!
//! Browsers export bookmarks as Netscape bookmark HTML: a loose tree of
//! `<DT><A HREF="...">title</A>` entries. Only links to GitHub repositories
//! matter to the catalog, so imports run in two passes:
//!
//! 1. [`parse_bookmarks`] pulls every anchor out of the document.
//! 2. [`filter_github`] keeps GitHub links, strips tracking parameters,
//!    normalizes them to `https://github.com/{owner}/{repo}`, and drops
//!    duplicates.
//!
//! [`import_github_bookmarks`] runs both and turns each survivor into an
//! [`ImportedRepository`] named after its slug and categorized by
//! [`categorize_bookmark`].

mod categorize;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use repodeck_primitives::{Category, GITHUB_HOST, RepoIdentifier};
use serde::Serialize;
use tracing::debug;
use url::Url;

pub use crate::categorize::{BOOKMARK_RULES, categorize_bookmark};

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a\s*>"#)
		.expect("anchor pattern is valid")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Query parameters added by ad and analytics platforms.
const TRACKING_PARAMS: &[&str] = &[
	"fbclid",
	"gclid",
	"msclkid",
	"utm_source",
	"utm_medium",
	"utm_campaign",
	"utm_content",
	"utm_term",
];

/// One bookmarked link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
	pub url: String,
	pub title: String,
}

/// A GitHub bookmark ready to enter the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedRepository {
	/// Repository slug.
	pub name: String,
	pub url: String,
	pub title: String,
	pub category: Category,
}

impl ImportedRepository {
	/// Builds a record from a bookmark already passed through [`filter_github`].
	pub fn from_bookmark(bookmark: Bookmark) -> Self {
		let name = bookmark.url.trim_end_matches('/').rsplit('/').next().unwrap_or_default().to_string();
		let category = categorize_bookmark(&bookmark.url, &bookmark.title);
		Self {
			name,
			url: bookmark.url,
			title: bookmark.title,
			category,
		}
	}
}

/// Extracts every anchor from a Netscape bookmark export.
///
/// Entities are decoded and inner markup removed; an anchor with no text is
/// titled by its URL.
pub fn parse_bookmarks(html: &str) -> Vec<Bookmark> {
	ANCHOR
		.captures_iter(html)
		.filter_map(|caps| {
			let href = caps.get(1).or_else(|| caps.get(2))?.as_str();
			let url = html_escape::decode_html_entities(href).trim().to_string();
			if url.is_empty() {
				return None;
			}

			let inner = caps.get(3).map_or("", |m| m.as_str());
			let text = TAG.replace_all(inner, "");
			let title = html_escape::decode_html_entities(&text)
				.split_whitespace()
				.collect::<Vec<_>>()
				.join(" ");
			let title = if title.is_empty() { url.clone() } else { title };
			Some(Bookmark { url, title })
		})
		.collect()
}

fn is_tracking_param(key: &str) -> bool {
	TRACKING_PARAMS.contains(&key) || key.starts_with("aem_")
}

/// Removes tracking query parameters, leaving everything else untouched.
///
/// Unparseable input is returned as is.
pub fn clean_url(raw: &str) -> String {
	let Ok(mut url) = Url::parse(raw) else {
		return raw.to_string();
	};

	let pairs: Vec<(String, String)> = url
		.query_pairs()
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect();
	let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| !is_tracking_param(k)).collect();
	if kept.len() == pairs.len() {
		return raw.to_string();
	}

	if kept.is_empty() {
		url.set_query(None);
	} else {
		url.query_pairs_mut()
			.clear()
			.extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
	}
	url.to_string()
}

/// Reduces a GitHub link to `https://github.com/{owner}/{repo}`.
///
/// Branch, file, issue, and release sub-paths are dropped. Returns `None`
/// when the link does not name a repository.
pub fn normalize_github_url(raw: &str) -> Option<String> {
	RepoIdentifier::parse(raw).ok().map(|id| id.html_url())
}

/// Keeps GitHub repository links, cleaned, normalized, and deduplicated.
///
/// When the same repository is bookmarked twice the first title wins.
pub fn filter_github(bookmarks: impl IntoIterator<Item = Bookmark>) -> Vec<Bookmark> {
	let mut seen = HashSet::new();
	let mut kept = Vec::new();
	let mut skipped = 0usize;

	for bookmark in bookmarks {
		if !bookmark.url.to_ascii_lowercase().contains(GITHUB_HOST) {
			continue;
		}
		let Some(url) = normalize_github_url(&clean_url(&bookmark.url)) else {
			skipped += 1;
			continue;
		};
		if seen.insert(url.clone()) {
			kept.push(Bookmark {
				url,
				title: bookmark.title,
			});
		}
	}

	debug!(kept = kept.len(), skipped, "bookmarks.filter_github");
	kept
}

/// Parses an export and returns its GitHub repositories.
pub fn import_github_bookmarks(html: &str) -> Vec<ImportedRepository> {
	filter_github(parse_bookmarks(html))
		.into_iter()
		.map(ImportedRepository::from_bookmark)
		.collect()
}
