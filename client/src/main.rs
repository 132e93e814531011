//! Command-line entry point: wires settings, token storage, the API client
//! and the session service, then runs one command.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mycollegebook::domain::ports::TokenStore;
use mycollegebook::domain::{AppState, SessionService};
use mycollegebook::inbound::cli::{Cli, Context, run_with_retry};
use mycollegebook::outbound::http::{ApiClient, Pipeline};
use mycollegebook::outbound::token_store::FileTokenStore;
use mycollegebook::settings::ClientSettings;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    // Subcommands belong to `Cli`; settings come from env and config files.
    let settings = ClientSettings::load_from_iter([OsString::from("mycollegebook")])
        .wrap_err("failed to load client settings")?;
    let platform = settings.platform()?;
    let base_url = settings.base_url()?;
    let timeout = settings.timeout()?;

    let state = AppState::new();
    let tokens = Arc::new(FileTokenStore::new(settings.token_dir()));
    let pipeline = Pipeline::standard(Arc::clone(&tokens) as Arc<dyn TokenStore>, state.clone());
    let client = Arc::new(
        ApiClient::new(base_url.clone(), timeout, pipeline)
            .wrap_err("failed to build the HTTP client")?,
    );
    info!(%base_url, %platform, "client configured");

    let session = SessionService::new(Arc::clone(&client), Arc::clone(&client), tokens, state);
    session.restore_session().await;

    let ctx = Context {
        session,
        accounts: Arc::clone(&client),
        listings: client.clone(),
        meetups: client.clone(),
        payments: client,
        platform,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    run_with_retry(&cli.command, &ctx, &mut out, &mut input).await?;
    Ok(())
}
