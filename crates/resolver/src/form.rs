use std::fmt;

use repodeck_primitives::{Category, RepoIdentifier, RepoMetadata};
use serde::Serialize;

use crate::ResolveError;
use crate::category::detect_category;

/// Validation status of the identifier field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ValidationState {
	#[default]
	Idle,
	Pending,
	Valid,
	Invalid(ResolveError),
}

impl ValidationState {
	pub const fn is_valid(self) -> bool {
		matches!(self, Self::Valid)
	}

	pub const fn is_pending(self) -> bool {
		matches!(self, Self::Pending)
	}

	/// Inline message for the field, if any.
	pub fn message(self) -> Option<String> {
		match self {
			Self::Invalid(reason) => Some(reason.to_string()),
			_ => None,
		}
	}
}

impl fmt::Display for ValidationState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Idle => f.write_str("idle"),
			Self::Pending => f.write_str("pending"),
			Self::Valid => f.write_str("valid"),
			Self::Invalid(reason) => write!(f, "invalid ({reason})"),
		}
	}
}

/// Fields shown in the add form, either typed by the user or filled in from
/// a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedFields {
	pub name: String,
	pub title: String,
	pub description: String,
	pub category: Category,
}

impl ResolvedFields {
	/// Merges lookup metadata without overwriting user input.
	///
	/// Name, title, and description are only written while empty. Category
	/// is taken from the first topic matching a rule and is left alone when
	/// nothing matches. Returns the detected category, if any.
	pub fn merge(&mut self, metadata: &RepoMetadata) -> Option<Category> {
		fill_if_empty(&mut self.name, &metadata.name);
		fill_if_empty(&mut self.title, metadata.full_name.as_deref().unwrap_or(&metadata.name));
		if let Some(description) = metadata.description_text() {
			fill_if_empty(&mut self.description, description);
		}

		let detected = detect_category(&metadata.topics);
		if let Some(category) = detected {
			self.category = category;
		}
		detected
	}
}

fn fill_if_empty(field: &mut String, value: &str) {
	if field.trim().is_empty() && !value.trim().is_empty() {
		*field = value.to_string();
	}
}

/// State of the add-repository form owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
	pub identifier_text: String,
	pub resolved: ResolvedFields,
	pub validation: ValidationState,
}

/// Payload handed to the host once the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSubmission {
	pub identifier: RepoIdentifier,
	pub url: String,
	pub fields: ResolvedFields,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn widget() -> RepoMetadata {
		RepoMetadata {
			full_name: Some("acme/widget".into()),
			description: Some("A widget".into()),
			topics: vec!["kubernetes".into()],
			..RepoMetadata::named("widget")
		}
	}

	#[test]
	fn merge_fills_empty_fields() {
		let mut fields = ResolvedFields::default();
		let detected = fields.merge(&widget());

		assert_eq!(detected, Some(Category::Devops));
		assert_eq!(
			fields,
			ResolvedFields {
				name: "widget".into(),
				title: "acme/widget".into(),
				description: "A widget".into(),
				category: Category::Devops,
			}
		);
	}

	#[test]
	fn merge_keeps_user_authored_fields() {
		let mut fields = ResolvedFields {
			name: "my-widget".into(),
			title: String::new(),
			description: "notes I wrote".into(),
			category: Category::Other,
		};
		fields.merge(&widget());

		assert_eq!(fields.name, "my-widget");
		assert_eq!(fields.title, "acme/widget");
		assert_eq!(fields.description, "notes I wrote");
	}

	#[test]
	fn whitespace_only_counts_as_empty() {
		let mut fields = ResolvedFields {
			name: "  ".into(),
			..ResolvedFields::default()
		};
		fields.merge(&widget());
		assert_eq!(fields.name, "widget");
	}

	#[test]
	fn unmatched_topics_leave_category_alone() {
		let mut fields = ResolvedFields {
			category: Category::Tools,
			..ResolvedFields::default()
		};
		let metadata = RepoMetadata {
			topics: vec!["awesome".into()],
			..RepoMetadata::named("x")
		};
		assert_eq!(fields.merge(&metadata), None);
		assert_eq!(fields.category, Category::Tools);
	}

	#[test]
	fn matched_topic_replaces_category() {
		let mut fields = ResolvedFields {
			category: Category::Tools,
			..ResolvedFields::default()
		};
		fields.merge(&widget());
		assert_eq!(fields.category, Category::Devops);
	}

	#[test]
	fn null_description_is_not_written() {
		let mut fields = ResolvedFields::default();
		fields.merge(&RepoMetadata::named("x"));
		assert_eq!(fields.description, "");
		assert_eq!(fields.title, "x");
	}

	#[test]
	fn validation_serializes_with_reason() {
		let json = serde_json::to_string(&ValidationState::Invalid(ResolveError::NotFound)).unwrap();
		assert_eq!(json, r#"{"state":"invalid","reason":"not_found"}"#);
		assert_eq!(serde_json::to_string(&ValidationState::Valid).unwrap(), r#"{"state":"valid"}"#);
	}

	#[test]
	fn only_invalid_has_a_message() {
		assert_eq!(
			ValidationState::Invalid(ResolveError::InvalidFormat).message().as_deref(),
			Some("Invalid URL format")
		);
		assert_eq!(ValidationState::Pending.message(), None);
	}
}
