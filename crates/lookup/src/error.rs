//! Error types for metadata lookups.

use thiserror::Error;

/// Failures reported by a [`crate::MetadataLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
	/// The service answered that the repository does not exist.
	#[error("repository not found")]
	NotFound,

	/// The service answered with an unexpected status code.
	#[error("unexpected HTTP status {0}")]
	Status(u16),

	/// The request could not be sent or the response could not be read.
	#[error("transport error: {0}")]
	Transport(String),

	/// The response body was not valid repository metadata.
	#[error("invalid response body: {0}")]
	Decode(String),
}

impl LookupError {
	/// Returns true when the repository definitively does not exist.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound)
	}
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
