// src/bingo_server.rs
// Entry point of the bingo HTTP server.

use clap::Parser;

use bingo::config::{SERVER_CONFIG_PATH, ServerConfig};
use bingo::logging::{log_error, log_info};
use bingo::server;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Server - Manage 75-ball bingo games and boards over HTTP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Configuration file (key = value lines)
    #[arg(long, default_value = SERVER_CONFIG_PATH)]
    config: String,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// TCP port for HTTP requests; the PORT environment variable takes precedence
    #[arg(long)]
    port: Option<u16>,

    /// Number of recent games listed on the games page
    #[arg(long)]
    game_count: Option<usize>,
}

fn resolve_config(args: Args, port_override: Option<String>) -> ServerConfig {
    let mut config = ServerConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(game_count) = args.game_count {
        config.game_count = game_count;
    }
    if let Some(port) = port_override {
        match port.parse::<u16>() {
            Ok(port) => config.port = port,
            Err(e) => log_error(&format!("Ignoring PORT={port:?}: {e}")),
        }
    }
    config
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = resolve_config(args, std::env::var("PORT").ok());

    let (mut server_handle, shutdown_signal) = server::start_server(config);

    // Run until the server stops on its own (e.g. the port is taken) or Ctrl-C is pressed
    tokio::select! {
        result = &mut server_handle => {
            if let Err(e) = result {
                log_error(&format!("Server task failed: {e:?}"));
            }
        }
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => log_info("Received Ctrl-C, shutting down"),
                Err(e) => log_error(&format!("Failed to listen for Ctrl-C: {e}")),
            }
            shutdown_signal.store(true, std::sync::atomic::Ordering::Relaxed);
            if let Err(e) = server_handle.await {
                log_error(&format!("Error waiting for server shutdown: {e:?}"));
            }
        }
    }

    log_info("Server stopped successfully");
}
