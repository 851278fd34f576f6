use std::sync::Arc;

use anyhow::Context;
use repodeck_lookup::{GitHubLookup, MetadataLookup};
use repodeck_resolver::{FormState, MetadataResolver, ResolverConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::config::AppConfig;

/// Resolves each input through a fresh form and prints one JSON line per
/// input.
pub async fn run(config: &AppConfig, urls: Vec<String>) -> anyhow::Result<()> {
	let lookup: Arc<dyn MetadataLookup> =
		Arc::new(GitHubLookup::new(&config.lookup).context("failed to build GitHub client")?);

	if urls.is_empty() {
		let mut lines = BufReader::new(tokio::io::stdin()).lines();
		while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
			let line = line.trim();
			if !line.is_empty() {
				emit(&resolve_one(Arc::clone(&lookup), &config.resolver, line).await)?;
			}
		}
	} else {
		for url in &urls {
			emit(&resolve_one(Arc::clone(&lookup), &config.resolver, url).await)?;
		}
	}
	Ok(())
}

/// Types `text` into a new form and waits for the resolver to settle.
///
/// Text the resolver would not schedule on its own is flushed, so every
/// input ends in a definite validation state.
pub async fn resolve_one(lookup: Arc<dyn MetadataLookup>, config: &ResolverConfig, text: &str) -> FormState {
	let mut resolver = MetadataResolver::new(lookup, config.clone());
	resolver.on_identifier_changed(text);
	if resolver.is_idle() {
		resolver.flush();
	}
	let last = resolver.settle().await;
	debug!(input = text, transition = ?last, "resolve.settled");
	resolver.form().clone()
}

fn emit(form: &FormState) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string(form)?);
	Ok(())
}
