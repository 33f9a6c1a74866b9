//! LegacyLink server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus any
//! `LEGACYLINK_*` environment variables, opens the SQLite store and serves
//! the site over HTTP.
//!
//! # Bootstrapping an admin
//!
//! Admin accounts are not created through the web interface:
//!
//! ```
//! cargo run -p legacylink-web --bin server -- --create-admin root --admin-name "Root"
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use legacylink_chat::{Assistant, GeminiClient};
use legacylink_core::{account::NewAdmin, store::CampusStore as _};
use legacylink_store_sqlite::SqliteStore;
use legacylink_web::{AppState, ServerConfig, auth};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "LegacyLink alumni network server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Create an admin account with this username (password read from
  /// stdin) and exit.
  #[arg(long, value_name = "USERNAME")]
  create_admin: Option<String>,

  /// Display name for `--create-admin`.
  #[arg(long, default_value = "Administrator")]
  admin_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LEGACYLINK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let database_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open database at {database_path:?}"))?;

  if let Some(username) = cli.create_admin {
    let password = read_password()?;
    if password.is_empty() {
      anyhow::bail!("password must not be empty");
    }
    let password_hash =
      auth::hash_password(&password).map_err(|e| anyhow::anyhow!("{e}"))?;
    store
      .add_admin(NewAdmin {
        username: username.clone(),
        name: cli.admin_name,
        password_hash,
      })
      .await
      .with_context(|| format!("failed to create admin {username:?}"))?;
    println!("admin {username} created");
    return Ok(());
  }

  let assistant = match &server_cfg.gemini_api_key {
    Some(key) if !key.is_empty() => {
      let client = GeminiClient::new(key.clone(), server_cfg.gemini_model.clone())
        .context("failed to build assistant client")?;
      Assistant::new(Some(Arc::new(client)))
    }
    _ => {
      tracing::warn!("no gemini_api_key configured; assistant answers FAQ only");
      Assistant::faq_only()
    }
  };

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState::new(store, server_cfg, assistant);
  let app = legacylink_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
