use anyhow::Result;
use clap::{Parser, ValueEnum};
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Snake on a wrapping grid")]
struct Cli {
    /// Game mode (currently only 'human' is implemented)
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Seed for food placement and bonus scores, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns stderr, so diagnostics go to stdout; nothing is emitted
    // unless RUST_LOG asks for it
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stdout)
        .init();

    let cli = Cli::parse();

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(GameConfig::default(), cli.seed);
            human_mode.run().await?;
        }
    }

    Ok(())
}
