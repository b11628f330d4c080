//! Lokalize CLI — culturally aware fashion-marketing localization demo.
//!
//! Scrapes regional fashion-culture sources, ingests them into a managed
//! knowledge base, and answers localization questions with retrieval-grounded
//! advice (or canned examples when no credentials are configured).

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
