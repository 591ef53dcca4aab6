use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rumo_lib::{
    Session,
    config::{Cfg, CoreConfig},
    sync::WebhookClient,
};
use sysexits::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod calc;
mod catalog;
mod entry;
mod fields;
mod notice;

#[derive(Parser, Debug)]
#[command(name = "rumo")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Load configuration from this file instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Register a new revenue entry
    New(fields::Fields),
    /// List the revenue entries that are still open
    Open,
    /// Update an open revenue entry
    Edit {
        /// Row number of the entry, as shown by `rumo open`
        row: u64,
        #[command(flatten)]
        fields: fields::Fields,
    },
    /// Compute the free revenue without sending anything
    Calc(fields::Values),
    /// Show the expeditions, sellers and statuses that can be used
    Catalog,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {e}");
    }

    let cli = Cli::parse();
    run(cli).await.into()
}

async fn run(cli: Cli) -> ExitCode {
    if let Command::Catalog = cli.command {
        return catalog::handle();
    }

    let cfg = match load_config(cli.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            notice::failure("Configuração inválida", &e.to_string());
            return ExitCode::Config;
        }
    };

    if let Command::Calc(values) = &cli.command {
        return calc::handle(&cfg, values);
    }

    let endpoints = cfg.read().endpoints.clone();
    let client = match WebhookClient::new(endpoints) {
        Ok(client) => client,
        Err(e) => {
            notice::failure("Erro", &e.to_string());
            return ExitCode::Software;
        }
    };
    let mut session = Session::new(cfg, client);

    match &cli.command {
        Command::New(fields) => entry::new(&mut session, fields).await,
        Command::Open => entry::open(&mut session).await,
        Command::Edit { row, fields } => entry::edit(&mut session, *row, fields).await,
        Command::Calc(_) | Command::Catalog => ExitCode::Ok,
    }
}

fn load_config(path: Option<&PathBuf>) -> rumo_lib::Result<Cfg> {
    let cfg = match path {
        Some(path) => CoreConfig::load_from(path)?,
        None => CoreConfig::load()?,
    };
    Ok(cfg.into_handle())
}
