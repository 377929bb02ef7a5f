//! Campus Admin Kernel
//!
//! Serves the per-user navigation API, or runs one-off menu and permission
//! checks from the command line.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use campus_kernel::models::{UserInfo, parse_session_user};
use campus_kernel::permissions::check_permission;
use campus_kernel::{AppState, Config, MenuRegistry, routes};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve,

    /// Print the menu tree visible to a user as JSON.
    Filter {
        /// JSON file holding the user payload (`null` for no user).
        #[arg(long)]
        user: PathBuf,

        /// Menu file (YAML or JSON). Defaults to MENU_CONFIG, then the built-in menu.
        #[arg(long)]
        menu: Option<PathBuf>,
    },

    /// Print the decision for each permission token.
    Check {
        /// JSON file holding the user payload (`null` for no user).
        #[arg(long)]
        user: PathBuf,

        /// Permission tokens to evaluate.
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Filter { user, menu } => cmd_filter(&config, &user, menu),
        Command::Check { user, tokens } => cmd_check(&user, &tokens),
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(port = config.port, "Starting campus kernel");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    let app = routes::api_router()
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn cmd_filter(config: &Config, user_file: &Path, menu: Option<PathBuf>) -> Result<()> {
    let user = load_user(user_file)?;

    let registry = match menu.or_else(|| config.menu_config.clone()) {
        Some(path) => MenuRegistry::from_path(&path)
            .with_context(|| format!("failed to load menu {}", path.display()))?,
        None => MenuRegistry::builtin().context("failed to load built-in menu")?,
    };

    let filtered = registry.filtered_for(user.as_ref());
    let json = serde_json::to_string_pretty(filtered.items())
        .context("failed to serialize filtered menu")?;
    println!("{json}");

    Ok(())
}

fn cmd_check(user_file: &Path, tokens: &[String]) -> Result<()> {
    let user = load_user(user_file)?;

    for token in tokens {
        let decision = if check_permission(user.as_ref(), token) {
            "granted"
        } else {
            "denied"
        };
        println!("{token:<32} {decision}");
    }

    Ok(())
}

fn load_user(path: &Path) -> Result<Option<UserInfo>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read user payload {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("user payload {} is not valid JSON", path.display()))?;

    Ok(parse_session_user(value))
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_allowed_origins.len() == 1 && config.cors_allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
