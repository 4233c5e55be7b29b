//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use wagecast_core::Sector;
use wagecast_store::SectorSource;

#[derive(Debug, Parser)]
#[command(name = "wagecast", version, about = "Daily wage prediction service")]
pub struct Cli {
    #[command(flatten)]
    pub models: ModelDirs,

    #[command(flatten)]
    pub serve: ServeArgs,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, env = "WAGECAST_DEBUG", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load models and serve the HTTP API (default).
    Serve,
    /// Load models and print what each sector expects.
    Inspect {
        /// Also run each loaded sector's sample record through its model.
        #[arg(long)]
        sample: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct ModelDirs {
    #[arg(
        long,
        env = "AGRICULTURE_MODEL_DIR",
        default_value = "models/agriculture",
        global = true
    )]
    pub agriculture_dir: PathBuf,

    #[arg(
        long,
        env = "CONSTRUCTION_MODEL_DIR",
        default_value = "models/construction",
        global = true
    )]
    pub construction_dir: PathBuf,
}

impl ModelDirs {
    pub fn sources(&self) -> Vec<SectorSource> {
        vec![
            SectorSource::new(Sector::Agriculture, &self.agriculture_dir),
            SectorSource::new(Sector::Construction, &self.construction_dir),
        ]
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 5000, global = true)]
    pub port: u16,

    /// Per-request timeout in seconds.
    #[arg(long, env = "API_TIMEOUT", default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
