use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use fleet_commission::api::{AppState, create_router};
use fleet_commission::config::ConfigLoader;
use fleet_commission::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "fleet-commission",
    about = "Commission tiering and weekly checklist service for a delivery fleet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Directory holding the fleet YAML configuration
    #[arg(long, default_value = "./config/fleet")]
    config: PathBuf,
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("./config/fleet"),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init(&args.log_level)?;

    let config = ConfigLoader::load(&args.config)?;
    let app = create_router(AppState::new(config));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, config = %args.config.display(), "fleet commission service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
