use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use huddle_server::{Coordinator, ServerConfig, serve};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Room coordination and signaling relay for peer-to-peer calls")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, default_value_t = 64)]
    max_display_name_len: usize,

    #[arg(long, default_value_t = 4096)]
    max_message_len: usize,
}

impl ServeArgs {
    fn to_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            max_display_name_len: self.max_display_name_len,
            max_message_len: self.max_message_len,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => run_server(args).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<()> {
    init_tracing(&args.log_level)?;

    let config = args.to_config();
    let addr = config.bind_addr;

    println!("{}", "📡 Starting Huddle signaling relay...".green().bold());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("   🔌 WebSocket: ws://{}/ws", addr);
    println!("   📂 Rooms:     http://{}/rooms", addr);

    info!(
        "Limits: display name {} chars, message {} chars",
        config.max_display_name_len, config.max_message_len
    );

    let coordinator = Coordinator::new(config);
    serve(listener, coordinator)
        .await
        .context("Signaling server stopped unexpectedly")
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
