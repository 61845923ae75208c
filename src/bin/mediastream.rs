use anyhow::Result;
use clap::Parser;
use mediastream::cli::cli::Cli;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up MEDIASTREAM_API_KEY from a local .env file if present
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing with environment-based filtering
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting mediastream {}", mediastream::cli::VERSION);

    // Execute command with user-friendly error handling
    if let Err(e) = cli.execute().await {
        // Log the full error for debugging
        error!("Command execution failed: {:?}", e);

        // Display user-friendly error message
        eprintln!("Error: {}", e.user_message());

        // Exit with error code
        std::process::exit(1);
    }

    Ok(())
}
