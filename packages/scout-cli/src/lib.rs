//! Command-line plumbing shared by the scout binaries.

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where log lines go. The discover CLI keeps stdout for its JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
	Stdout,
	Stderr,
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Magenta.on_default() | Effects::BOLD)
		.usage(AnsiColor::Magenta.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

/// Installs the global `fmt` subscriber. An unparseable `log_level` falls back to `info`.
pub fn init_tracing(log_level: &str, sink: LogSink) {
	let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter(log_level));
	match sink {
		LogSink::Stdout => subscriber.init(),
		LogSink::Stderr => subscriber.with_writer(std::io::stderr).init(),
	}
}

fn env_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_level_falls_back_to_info() {
		assert_eq!(env_filter("scout=loud").to_string(), "info");
		assert_eq!(env_filter("scout_service=debug").to_string(), "scout_service=debug");
	}
}
