use anyhow::Context;
use clap::Parser;
use kma_weather_export::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = format!("{:?}", cli.command);
    run(cli)
        .await
        .with_context(|| format!("kma-weather-export failed: {}", command))
}
