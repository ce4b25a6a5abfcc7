//! Terminal order desk.
//!
//! Interactive front-end over the sell desk library: screen navigation
//! restored across restarts, the sell form with searchable selectors, and
//! order submission to the order service.

mod app;
mod error;
mod locale;
mod ui;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    process::exit,
    sync::Mutex,
};

use clap::Parser;
use p2p_desk::{
    client::HttpClient,
    config::EnvConfig,
    store::{FileStore, Navigator},
};
use tracing::{error, info};

use app::App;
use error::Result;

/// CLI arguments of the order desk.
#[derive(Debug, Parser)]
#[command(name = "order-desk")]
#[command(about = "Terminal desk to sell crypto for fiat")]
struct Cli {
    /// Order service base URL, overrides P2P_API_URL
    #[arg(long)]
    api_url: Option<String>,
}

fn init_logging(state_path: &Path) -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    // Terminal is taken by the UI
    let log_path = state_path.with_file_name("order_desk.log");
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn try_main(cli: Cli, env_config: EnvConfig) -> Result<()> {
    let endpoint = env_config.endpoint(cli.api_url.as_deref())?;
    let rules = env_config.detail_rules()?;
    let state_path = env_config.state_path()?;

    init_logging(&state_path)?;
    info!(api_url = %endpoint.base_url(), "starting order desk");

    let store = FileStore::open(&state_path);
    info!(path = %store.path().display(), "navigation state loaded");
    let navigator = Navigator::restore(store);
    let client = HttpClient::new(endpoint)?;
    let mut app = App::new(navigator, rules, client);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();
    result
}

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let cli = Cli::parse();

    if let Err(e) = try_main(cli, env_config).await {
        error!(%e, "Order desk encountered an error, shutting down");
        eprintln!("{}", e);
        exit(1);
    }
}
