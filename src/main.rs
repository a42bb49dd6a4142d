use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error_responder::{api::create_router, Config, ErrorHandlingConfig, Mode};

#[derive(Parser, Debug)]
#[command(name = "error-responder")]
#[command(about = "Serve an API whose failures go through the error responder", long_about = None)]
struct Cli {
    /// Deployment mode (development or production), overrides APP_ENV
    #[arg(long)]
    mode: Option<Mode>,

    /// Address to listen on, overrides LISTEN_ADDR
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    config.validate()?;

    init_tracing(config.mode);

    info!(mode = %config.mode, "Starting error responder service");

    let app = create_router(ErrorHandlingConfig::from(&config));

    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs in production, human readable ones in development
fn init_tracing(mode: Mode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match mode {
        Mode::Production => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        Mode::Development => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init(),
    }
}
