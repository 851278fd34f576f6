//! `repodeck` command line host.
//!
//! Runs the debounced metadata resolver against the GitHub API the same way
//! the add-repository form does, and converts bookmark exports into
//! normalized repository lists.

mod config;
mod resolve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "repodeck", version)]
#[command(about = "Resolve and import GitHub repositories for the catalog")]
struct Args {
	/// Configuration file (TOML)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Resolve repository URLs; reads one URL per line from stdin when none are given
	Resolve {
		#[arg(value_name = "URL")]
		urls: Vec<String>,
	},
	/// Print the GitHub repositories found in a Netscape bookmark export
	Import {
		#[arg(value_name = "FILE")]
		file: PathBuf,
	},
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;

	match args.command {
		Command::Resolve { urls } => resolve::run(&config, urls).await,
		Command::Import { file } => import(&file),
	}
}

fn import(file: &std::path::Path) -> anyhow::Result<()> {
	let html = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
	let bookmarks = repodeck_bookmarks::import_github_bookmarks(&html);
	info!(count = bookmarks.len(), file = %file.display(), "imported GitHub bookmarks");
	println!("{}", serde_json::to_string_pretty(&bookmarks)?);
	Ok(())
}
