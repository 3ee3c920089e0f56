//! One-shot discovery from the command line. Cards go to stdout as JSON, logs go to stderr.

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use serde::Serialize;

use scout_cli::LogSink;

use scout_domain::DisplayCard;
use scout_service::ScoutService;

#[derive(Debug, Parser)]
#[command(
	version = scout_cli::VERSION,
	rename_all = "kebab",
	styles = scout_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Comma-separated genre tags, e.g. `jazz,blues`.
	#[arg(
		long,
		short = 'g',
		value_name = "LIST",
		conflicts_with = "query",
		required_unless_present = "query"
	)]
	pub genres: Option<String>,
	/// Free-text request resolved through the language model.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
}

#[derive(Debug, Serialize)]
struct DiscoverOutput {
	mode: &'static str,
	input: String,
	count: usize,
	elapsed_ms: u128,
	results: Vec<DisplayCard>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = scout_config::load(&args.config)?;
	scout_cli::init_tracing(&config.service.log_level, LogSink::Stderr);
	let service = ScoutService::new(config)?;
	let started = Instant::now();
	let (mode, input, results) = match (args.genres, args.query) {
		(Some(genres), _) => {
			let results = service.discover_by_genre(&genres).await?;

			("genre", genres, results)
		},
		(None, Some(query)) => {
			let results = service.discover_by_llm(&query).await?;

			("llm", query, results)
		},
		(None, None) => {
			return Err(color_eyre::eyre::eyre!("Either --genres or --query is required."));
		},
	};
	let output = DiscoverOutput {
		mode,
		input,
		count: results.len(),
		elapsed_ms: started.elapsed().as_millis(),
		results,
	};
	let json = serde_json::to_string_pretty(&output)?;
	println!("{json}");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn requires_exactly_one_mode() {
		assert!(Args::try_parse_from(["scout-discover", "-c", "scout.toml"]).is_err());
		assert!(
			Args::try_parse_from(["scout-discover", "-c", "scout.toml", "-g", "jazz", "-q", "90s"])
				.is_err()
		);

		let args =
			Args::try_parse_from(["scout-discover", "-c", "scout.toml", "--genres", "jazz,blues"])
				.expect("Failed to parse args.");

		assert_eq!(args.genres.as_deref(), Some("jazz,blues"));
		assert!(args.query.is_none());
	}
}
