mod config;
mod inspect;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wagecast_predict::PredictionService;
use wagecast_store::load_registry;

use crate::config::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::info!("wagecast v{}", env!("CARGO_PKG_VERSION"));

    let registry = load_registry(&cli.models.sources());
    let service = Arc::new(PredictionService::new(Arc::new(registry)));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = wagecast_server::router(service, cli.serve.timeout());
            wagecast_server::serve(cli.serve.addr(), app).await
        }
        Command::Inspect { sample } => inspect::run(&service, sample),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
