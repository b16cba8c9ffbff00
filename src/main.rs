use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use duaalist::cli::{execute, setup_instructions, Cli};
use duaalist::config::{Config, ConnectionSettings};
use duaalist::logging::init_tracing;
use duaalist::remote::RestClient;
use duaalist::store::PeopleStore;

/// Exit status when the remote store has not been configured.
const EXIT_SETUP_REQUIRED: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_with_env(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let settings = match config.resolve() {
        ConnectionSettings::Ready(settings) => settings,
        ConnectionSettings::SetupRequired { missing, .. } => {
            eprint!("{}", setup_instructions(&missing, &config_path));
            return Ok(ExitCode::from(EXIT_SETUP_REQUIRED));
        }
    };

    let client = RestClient::new(settings).context("building remote store client")?;
    let store = PeopleStore::new(Arc::new(client));
    if let Some(term) = &cli.search {
        store.set_search_term(term.as_str());
    }

    let outcome = execute(&store, &cli.command).await;
    store.close();

    if let Some(output) = &outcome.output {
        print!("{}", output);
    }
    if let Some(notice) = &outcome.notice {
        eprintln!("{}", notice);
    }

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
