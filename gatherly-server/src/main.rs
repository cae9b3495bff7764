use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use gatherly_core::Database;
use gatherly_core::Error;
use gatherly_core::tasks::spawn_engagement_refresh_task;

mod routes;
mod state;

use routes::build_router;
use state::AppState;

#[derive(Parser, Debug, Clone)]
#[command(name = "gatherly")]
#[command(author, version, about = "Gatherly - event marketplace engagement & moderation services")]
struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, default_value = "0.0.0.0:8080")]
    server_addr: String,

    /// Postgres connection URL; falls back to DATABASE_URL from the environment
    #[arg(long)]
    db_url: Option<String>,

    /// Seconds between scheduled engagement refresh passes
    #[arg(long, default_value = "900")]
    refresh_interval_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("gatherly=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run_server(args).await {
        error!("Server error: {:?}", e);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run_server(args: Args) -> Result<(), Error> {
    let db_url = args
        .db_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "postgres://gatherly@localhost:5432/gatherly".to_string());

    info!("Using Postgres DB URL: {}", db_url);
    let db = Database::new(&db_url).await?;
    db.migrate().await?;

    let state = AppState::new(&db);

    // Scheduled batch mode for the engagement scores; on-demand refresh
    // stays available over HTTP.
    let _refresh_handle = spawn_engagement_refresh_task(
        state.engagement.clone(),
        Duration::from_secs(args.refresh_interval_secs),
    );

    let app = build_router(state);
    let addr: SocketAddr = args.server_addr.parse()?;
    info!("Starting HTTP server on {}", addr);

    let handle = axum_server::Handle::new();
    let handle_clone = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
        }
        info!("Ctrl-C detected; shutting down HTTP server...");
        handle_clone.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    axum_server::Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("HTTP server shut down.");
    Ok(())
}
