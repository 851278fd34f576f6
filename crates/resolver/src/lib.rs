//! Debounced metadata resolution for the add-repository form.
//!
//! The host form feeds every keystroke into [`MetadataResolver::on_identifier_changed`].
//! The resolver waits for a quiet window, parses the text into a
//! [`RepoIdentifier`](repodeck_primitives::RepoIdentifier), asks the
//! [`MetadataLookup`](repodeck_lookup::MetadataLookup) for metadata, and merges
//! the answer into the [`FormState`] without clobbering anything the user typed.
//!
//! # Ordering
//!
//! Every lookup carries a [`RequestToken`]. Only the most recently issued
//! token may mutate the form; a slower, older response is dropped when it
//! finally arrives, so the last request always wins.
//!
//! # Driving
//!
//! Timer expiry and lookup completion are delivered as [`ResolverEvent`]s on a
//! channel owned by the resolver. The host applies them on its own task with
//! [`MetadataResolver::step`], [`MetadataResolver::settle`], or the
//! non-blocking [`MetadataResolver::pump`].

mod category;
mod config;
mod error;
mod form;
mod resolver;

pub use category::{CATEGORY_RULES, detect_category};
pub use config::{DEFAULT_DEBOUNCE, ResolverConfig};
pub use error::{ResolveError, SubmitBlocked};
pub use form::{FormState, ResolvedFields, ResolvedSubmission, ValidationState};
pub use resolver::{LookupRequest, MetadataResolver, RequestToken, ResolverEvent, Transition};
