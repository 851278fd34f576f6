//! Lookup service seam for repository metadata.
//!
//! [`MetadataLookup`] is what the resolver talks to. [`GitHubLookup`] is the
//! production implementation backed by the GitHub REST API; tests substitute
//! scripted implementations.

mod error;
mod github;

use async_trait::async_trait;
use repodeck_primitives::{RepoIdentifier, RepoMetadata};

pub use error::{LookupError, Result};
pub use github::{GitHubLookup, LookupConfig};

/// Remote source of repository metadata.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
	/// Fetches metadata for one repository.
	async fn fetch(&self, id: &RepoIdentifier) -> Result<RepoMetadata>;
}
