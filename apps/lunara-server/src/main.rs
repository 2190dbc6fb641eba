use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::{response::Json, routing::get, Extension, Router};
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use firebase_auth::{FirebaseVerifier, TokenVerifier};
use runtime::{AppConfig, AuthConfig, CliArgs, DatabaseConfig};

/// Lunara Server - cycle-tracking backend
#[derive(Parser)]
#[command(name = "lunara-server")]
#[command(about = "Lunara Server - cycle-tracking backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new("."));
    tracing::info!("Lunara server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn connect_db(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    if let Some(max_conns) = cfg.max_conns {
        opts.max_connections(max_conns);
    }
    // Explicit timeouts: a saturated pool or an unreachable server must fail
    // the request, not hang it.
    opts.connect_timeout(Duration::from_millis(cfg.connect_timeout_ms.unwrap_or(5_000)));
    opts.acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms.unwrap_or(5_000)));

    tracing::info!("Connecting to database: {}", cfg.url);
    let db = Database::connect(opts).await?;
    Ok(db)
}

async fn init_verifier(cfg: &AuthConfig) -> Result<Arc<dyn TokenVerifier>> {
    if cfg.project_id.trim().is_empty() {
        return Err(anyhow!("auth.project_id must not be empty"));
    }

    // Trust material is fetched exactly once here, before the listener
    // binds; a failure aborts startup rather than surfacing per-request.
    let verifier = FirebaseVerifier::connect(
        cfg.project_id.clone(),
        cfg.jwks_url.clone(),
        Duration::from_millis(cfg.jwks_timeout_ms),
    )
    .await
    .map_err(|e| anyhow!("identity provider init failed: {e}"))?;

    Ok(Arc::new(verifier))
}

fn build_router(
    db: &DatabaseConnection,
    verifier: Arc<dyn TokenVerifier>,
    timeout_sec: u64,
) -> Router {
    let users_service = Arc::new(users::domain::service::Service::new(Arc::new(
        users::infra::storage::sea_orm_repo::SeaOrmUsersRepository::new(db.clone()),
    )));
    let cycles_service = Arc::new(cycles::domain::service::Service::new(Arc::new(
        cycles::infra::storage::sea_orm_repo::SeaOrmCycleEventsRepository::new(db.clone()),
    )));

    let api_v1 = Router::new()
        .merge(users::api::rest::routes::router(users_service))
        .merge(cycles::api::rest::routes::router(cycles_service));

    let mut router = Router::new()
        .route("/", get(root))
        .nest("/api/v1", api_v1)
        .layer(Extension(verifier));

    // Middleware order (outermost to innermost): Trace -> Timeout -> CORS -> BodyLimit
    router = router.layer(TraceLayer::new_for_http());
    if timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));
    }
    // The mobile frontend calls from its own origin.
    router = router.layer(CorsLayer::permissive());
    router = router.layer(RequestBodyLimitLayer::new(1024 * 1024));

    router
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Lunara API" }))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database not configured"))?;
    let auth_config = config
        .auth
        .clone()
        .ok_or_else(|| anyhow!("Auth not configured (auth.project_id is required)"))?;

    let db = connect_db(&db_config).await?;

    // Each module owns its migration set.
    users::infra::storage::migrations::Migrator::up(&db, None).await?;
    cycles::infra::storage::migrations::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    let verifier = init_verifier(&auth_config).await?;

    let router = build_router(&db, verifier, config.server.timeout_sec);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow!("Invalid bind address: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(auth) = &config.auth {
        if auth.project_id.trim().is_empty() {
            return Err(anyhow!("auth.project_id must not be empty"));
        }
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
