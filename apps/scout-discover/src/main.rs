use clap::Parser;

use scout_discover::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();

	scout_discover::run(args).await
}
