//! Bookshelf REST server binary.
//!
//! Boots logging, opens (and migrates) the SQLite database, then serves the
//! book endpoints until the process is stopped.
//!
//! Usage:
//!   bookshelf-server --bind 127.0.0.1:8080 --db-path bookshelf.sqlite3

use anyhow::{anyhow, Context, Result};
use bookshelf_core::db::open_db;
use bookshelf_core::{default_log_level, init_logging, BookService};
use bookshelf_server::build_router;
use clap::Parser;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bookshelf-server")]
#[command(about = "Minimal CRUD REST service for a book catalog")]
struct Args {
    /// Socket address to listen on
    #[arg(long, env = "BOOKSHELF_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Path to the SQLite database file
    #[arg(long, env = "BOOKSHELF_DB", default_value = "bookshelf.sqlite3")]
    db_path: PathBuf,

    /// Directory for rolling log files
    #[arg(long, env = "BOOKSHELF_LOG_DIR", default_value = "logs")]
    log_dir: String,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, &args.log_dir).map_err(|err| anyhow!(err))?;

    let conn = open_db(&args.db_path)
        .with_context(|| format!("failed to open database at `{}`", args.db_path.display()))?;
    let service = Arc::new(BookService::new(conn));

    let app = build_router(service);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(
        "event=server_start module=api status=ok addr={} db={}",
        args.bind,
        args.db_path.display()
    );

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
