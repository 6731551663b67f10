//! Item service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use item_service::api::{create_router, AppState};
use item_service::config::Settings;
use item_service::logging;
use item_service::metrics;
use item_service::utils::shutdown_signal;

/// In-memory item CRUD service.
#[derive(Parser, Debug)]
#[command(name = "item-service")]
#[command(about = "CRUD endpoints over an in-memory item collection")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Bind host (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Bind host (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize logging; the guard flushes file logs on exit
    let _log_guard = logging::init(&settings, args.verbose)?;

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&settings).await,
        Some(Command::Serve { host, port }) => cmd_serve(settings, host, port).await,
        None => cmd_serve(settings, args.host, args.port).await,
    }
}

/// Print the effective configuration.
async fn cmd_check_config(settings: &Settings) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEM SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");
    println!("  App Name:     {}", settings.app_name);
    println!("  Environment:  {}", settings.app_env);
    println!("  Debug:        {}", settings.debug);
    println!("  Log Level:    {}", settings.log_level);
    if settings.is_production() {
        println!(
            "  Log Files:    {} (keep {} days)",
            settings.log_dir.display(),
            settings.log_retention_days
        );
    }
    println!(
        "  CORS Origins: {}",
        settings
            .cors_allowed_origins
            .as_ref()
            .map(|o| o.join(", "))
            .unwrap_or_else(|| "any (request origin echoed)".to_string())
    );
    println!(
        "  Database URL: {}",
        if settings.database_url.is_some() { "set" } else { "not set" }
    );
    println!(
        "  Redis URL:    {}",
        if settings.redis_url.is_some() { "set" } else { "not set" }
    );

    print!("  Bind Address: ");
    match settings.resolve_bind_addr().await {
        Ok(addr) => println!("{}", addr),
        Err(e) => {
            println!("INVALID");
            println!("    Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    }

    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }

    info!("Starting {}...", settings.app_name);
    info!("Environment: {}", settings.app_env);
    info!("Debug mode: {}", settings.debug);

    let addr = settings.resolve_bind_addr().await.map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    let handle = metrics::init_metrics()?;
    let app_state = AppState::new(settings).with_metrics(handle);
    let router = create_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down application...");
    Ok(())
}
