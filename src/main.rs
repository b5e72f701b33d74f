//! Omnichat server binary.
//!
//! Loads the credential from the environment (or a `.env` file), builds the
//! adapter, and serves the local UI. A missing credential never aborts the
//! process: the UI comes up with a disabled adapter and reports the
//! configuration error on every attempt instead.

#![allow(clippy::print_stdout)] // startup banner intentionally uses stdout

use std::process::ExitCode;

use omnichat::Assistant;
use omnichat::groq::GroqConfig;
use omnichat::server::{self, AppState, Backend, ServerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(run())
}

/// Initialize logging from `RUST_LOG`, defaulting to info-level crate logs.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("omnichat=info,tower_http=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> ExitCode {
    let backend = match GroqConfig::from_env().and_then(Assistant::new) {
        Ok(assistant) => {
            tracing::info!("credential loaded, adapter ready");
            Backend::Ready(assistant)
        }
        Err(e) => {
            // Keep serving; every chat reply will carry this message.
            tracing::error!("{e}");
            println!("{}", e.user_message());
            Backend::Disabled(e.to_string())
        }
    };

    let config = ServerConfig::default();
    let state = AppState::new(backend);

    println!("🚀 Omnichat running at http://{}", config.addr());
    println!("Press Ctrl+C to stop");

    tokio::select! {
        result = server::serve(config, state) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("server error: {e}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
            ExitCode::SUCCESS
        }
    }
}
