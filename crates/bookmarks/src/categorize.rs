//! Keyword categorization of imported bookmarks.
//!
//! Bookmarks carry no topics, so the category is guessed from the words of
//! the repository path and the bookmark title. Categories are tried in
//! [`BOOKMARK_RULES`] order and the first one with a matching keyword wins.
//! The host is left out of the text; every link here is on GitHub.

use repodeck_primitives::Category;
use url::Url;

/// Keyword groups in priority order. Keywords are whole words; multi-word
/// keywords match consecutive words.
pub const BOOKMARK_RULES: &[(Category, &[&str])] = &[
	(
		Category::Security,
		&["security", "crypto", "encryption", "ssl", "tls", "auth", "oauth", "jwt", "password", "vault"],
	),
	(
		Category::CiCd,
		&["ci", "cd", "jenkins", "gitlab", "github", "actions", "pipeline", "workflow", "deploy"],
	),
	(
		Category::Database,
		&["database", "sql", "nosql", "mysql", "postgres", "mongodb", "redis", "cassandra", "elasticsearch"],
	),
	(
		Category::Devops,
		&["devops", "docker", "kubernetes", "k8s", "terraform", "ansible", "prometheus", "grafana"],
	),
	(Category::Api, &["api", "rest", "graphql", "grpc", "swagger", "openapi", "endpoint"]),
	(
		Category::Frontend,
		&["frontend", "react", "vue", "angular", "javascript", "typescript", "html", "css", "ui", "ux"],
	),
	(
		Category::Backend,
		&["backend", "python", "java", "node", "golang", "rust", "dotnet", "spring", "django"],
	),
	(
		Category::MlAi,
		&["machine learning", "ml", "ai", "tensorflow", "pytorch", "scikit", "neural", "model", "deep learning"],
	),
	(Category::Embedded, &["embedded", "arduino", "iot", "firmware", "microcontroller", "rtos"]),
	(Category::Documentation, &["docs", "documentation", "guide", "tutorial", "blog"]),
	(Category::Tools, &["tool", "utility", "cli", "command", "plugin", "extension"]),
	(Category::Library, &["library", "lib", "framework", "package", "module"]),
	(Category::Mobile, &["mobile", "ios", "android", "react native", "flutter", "app"]),
];

/// Guesses a catalog category for a bookmarked repository.
///
/// Falls back to naming conventions in the repository path (`python`, `-py`
/// for backend; `react`, `-js` for frontend) and finally to
/// [`Category::Other`]. A title that merely repeats the URL is ignored.
pub fn categorize_bookmark(url: &str, title: &str) -> Category {
	let title = if title == url { "" } else { title };
	let path = repository_path(url);
	let words = words_of(&format!("{path} {title}"));

	let hit = BOOKMARK_RULES
		.iter()
		.find(|(_, keywords)| keywords.iter().any(|keyword| contains_word(&words, keyword)));
	if let Some((category, _)) = hit {
		return *category;
	}

	if path.contains("python") || path.contains("-py") {
		Category::Backend
	} else if path.contains("react") || path.contains("-js") {
		Category::Frontend
	} else {
		Category::Other
	}
}

fn repository_path(url: &str) -> String {
	Url::parse(url)
		.map(|u| u.path().to_string())
		.unwrap_or_else(|_| url.to_string())
		.to_lowercase()
}

/// Lowercases and replaces every non-alphanumeric run with one space.
fn words_of(text: &str) -> String {
	text.to_lowercase()
		.split(|c: char| !c.is_alphanumeric())
		.filter(|w| !w.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

fn contains_word(words: &str, keyword: &str) -> bool {
	words.match_indices(keyword).any(|(at, _)| {
		let before = words[..at].chars().next_back();
		let after = words[at + keyword.len()..].chars().next();
		!before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
	})
}
