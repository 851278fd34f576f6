//! Core types for the repository catalog: identifiers, categories, and metadata.

/// Repository categories used by the catalog.
pub mod category;
/// Owner/slug identifiers parsed from user-entered URLs.
pub mod identifier;
/// Repository metadata as returned by the lookup service.
pub mod metadata;

pub use category::{Category, UnknownCategory};
pub use identifier::{GITHUB_HOST, IdentifierError, RepoIdentifier};
pub use metadata::{License, RepoMetadata};
