use clap::{Parser, Subcommand};

mod collect;
mod output;

#[derive(Debug, Parser)]
#[command(name = "magcat")]
#[command(about = "Magnit catalog export tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk the catalog, enrich each item with its brand, and write the
    /// output document.
    Collect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect) | None => collect::run().await,
    }
}
