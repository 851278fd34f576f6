//! Error types surfaced to the host form.

use serde::Serialize;
use thiserror::Error;

use crate::ValidationState;

/// Why the current identifier did not resolve.
///
/// The messages are user-facing. Transport details of a failed lookup are
/// logged when they occur and never carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveError {
	#[error("Invalid URL format")]
	InvalidFormat,
	#[error("Repository not found")]
	NotFound,
	#[error("Failed to fetch repository metadata")]
	LookupFailed,
}

/// Returned by [`crate::MetadataResolver::submit`] unless the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot submit while validation is {state}")]
pub struct SubmitBlocked {
	pub state: ValidationState,
}
