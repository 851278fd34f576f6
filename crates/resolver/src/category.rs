//! Topic keyword to category mapping.

use std::collections::HashMap;
use std::sync::LazyLock;

use repodeck_primitives::Category;

/// Keyword groups per category. A keyword listed under two categories keeps
/// the first one.
const RULES: &[(Category, &[&str])] = &[
	(
		Category::Security,
		&["security", "cybersecurity", "penetration-testing", "hacking", "ctf", "vulnerability", "exploit", "malware"],
	),
	(
		Category::CiCd,
		&[
			"ci",
			"cd",
			"cicd",
			"ci-cd",
			"continuous-integration",
			"continuous-deployment",
			"github-actions",
			"jenkins",
			"pipeline",
		],
	),
	(
		Category::Devops,
		&["devops", "kubernetes", "k8s", "docker", "terraform", "ansible", "infrastructure", "cloud", "aws", "azure", "gcp"],
	),
	(
		Category::Database,
		&["database", "sql", "nosql", "mongodb", "postgresql", "mysql", "redis", "elasticsearch"],
	),
	(Category::Api, &["api", "rest", "graphql", "grpc", "openapi", "swagger"]),
	(
		Category::Frontend,
		&["frontend", "react", "vue", "angular", "svelte", "nextjs", "web", "ui", "css", "tailwind"],
	),
	(
		Category::Backend,
		&["backend", "server", "fastapi", "django", "flask", "express", "nodejs", "golang", "rust"],
	),
	(
		Category::MlAi,
		&[
			"machine-learning",
			"ml",
			"ai",
			"deep-learning",
			"tensorflow",
			"pytorch",
			"nlp",
			"computer-vision",
			"data-science",
		],
	),
	(
		Category::Embedded,
		&["embedded", "iot", "esp32", "arduino", "raspberry-pi", "microcontroller", "firmware"],
	),
	(
		Category::Mobile,
		&["mobile", "android", "ios", "flutter", "react-native", "swift", "kotlin"],
	),
	(
		Category::Documentation,
		&["documentation", "docs", "tutorial", "learning", "education", "course"],
	),
	(Category::Tools, &["tools", "cli", "utility", "automation", "scripts", "productivity"]),
	(Category::Library, &["library", "package", "sdk", "framework", "module"]),
];

/// Process-wide keyword table, built once on first use.
pub static CATEGORY_RULES: LazyLock<HashMap<&'static str, Category>> = LazyLock::new(|| {
	let mut table = HashMap::new();
	for (category, keywords) in RULES {
		for keyword in *keywords {
			table.entry(*keyword).or_insert(*category);
		}
	}
	table
});

/// Returns the category of the first topic that matches a rule.
///
/// Topics are visited in the order given and compared case-insensitively;
/// later topics are never consulted once one matches.
pub fn detect_category<S: AsRef<str>>(topics: &[S]) -> Option<Category> {
	topics.iter().find_map(|topic| {
		let normalized = topic.as_ref().trim().to_lowercase();
		CATEGORY_RULES.get(normalized.as_str()).copied()
	})
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(&["docker", "react"], Some(Category::Devops))]
	#[case(&["react", "docker"], Some(Category::Frontend))]
	#[case(&["kubernetes"], Some(Category::Devops))]
	#[case(&["Kubernetes"], Some(Category::Devops))]
	#[case(&["awesome", "list", "graphql"], Some(Category::Api))]
	#[case(&["react-native"], Some(Category::Mobile))]
	#[case(&["awesome", "list"], None)]
	#[case(&[], None)]
	fn first_matching_topic_wins(#[case] topics: &[&str], #[case] expected: Option<Category>) {
		assert_eq!(detect_category(topics), expected);
	}

	#[test]
	fn table_is_many_to_one() {
		assert_eq!(CATEGORY_RULES.get("k8s"), Some(&Category::Devops));
		assert_eq!(CATEGORY_RULES.get("terraform"), Some(&Category::Devops));
		assert!(CATEGORY_RULES.values().all(|c| !c.is_other()));
	}

	#[test]
	fn keywords_are_stored_lowercase() {
		assert!(CATEGORY_RULES.keys().all(|k| *k == k.to_lowercase()));
	}
}
