use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog category assigned to a repository.
///
/// [`Category::Other`] is the sentinel every new repository starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	Security,
	CiCd,
	Devops,
	Database,
	Api,
	Frontend,
	Backend,
	MlAi,
	Embedded,
	Mobile,
	Documentation,
	Tools,
	Library,
	#[default]
	Other,
}

impl Category {
	/// Every category, in display order.
	pub const ALL: [Category; 14] = [
		Self::Security,
		Self::CiCd,
		Self::Devops,
		Self::Database,
		Self::Api,
		Self::Frontend,
		Self::Backend,
		Self::MlAi,
		Self::Embedded,
		Self::Mobile,
		Self::Documentation,
		Self::Tools,
		Self::Library,
		Self::Other,
	];

	/// Stable lowercase label, identical to the serialized form.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Security => "security",
			Self::CiCd => "ci_cd",
			Self::Devops => "devops",
			Self::Database => "database",
			Self::Api => "api",
			Self::Frontend => "frontend",
			Self::Backend => "backend",
			Self::MlAi => "ml_ai",
			Self::Embedded => "embedded",
			Self::Mobile => "mobile",
			Self::Documentation => "documentation",
			Self::Tools => "tools",
			Self::Library => "library",
			Self::Other => "other",
		}
	}

	/// Returns true for the unassigned sentinel.
	pub const fn is_other(self) -> bool {
		matches!(self, Self::Other)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a label does not name any [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
	type Err = UnknownCategory;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let label = s.trim();
		Self::ALL
			.into_iter()
			.find(|category| category.as_str().eq_ignore_ascii_case(label))
			.ok_or_else(|| UnknownCategory(label.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels_round_trip_through_from_str() {
		for category in Category::ALL {
			assert_eq!(category.as_str().parse::<Category>(), Ok(category));
		}
	}

	#[test]
	fn from_str_ignores_case_and_padding() {
		assert_eq!(" DevOps ".parse::<Category>(), Ok(Category::Devops));
		assert_eq!(
			"gardening".parse::<Category>(),
			Err(UnknownCategory("gardening".to_string()))
		);
	}

	#[test]
	fn serde_uses_snake_case_labels() {
		assert_eq!(serde_json::to_string(&Category::MlAi).unwrap(), "\"ml_ai\"");
		let parsed: Category = serde_json::from_str("\"ci_cd\"").unwrap();
		assert_eq!(parsed, Category::CiCd);
	}

	#[test]
	fn default_is_other() {
		assert!(Category::default().is_other());
	}
}
