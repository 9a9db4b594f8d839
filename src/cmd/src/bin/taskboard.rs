use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use cmd::command::server;
use cmd::config::Config;
use cmd::config::Overrides;
use cmd::error::Result;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Run server
    Server(Overrides),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let overrides = match &args.command {
        Commands::Server(overrides) => overrides,
    };
    let cfg: common::config::Config =
        Config::load(args.config.as_deref(), overrides)?.try_into()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.log.level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let version = env!("CARGO_PKG_VERSION");
    info!("Taskboard v{version}");

    match args.command {
        Commands::Server(_) => server::start(cfg).await?,
    }

    Ok(())
}
