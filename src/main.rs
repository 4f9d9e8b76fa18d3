//! homecmd - Entry Point
//!
//! Resolves one query against the stored catalog and prints the
//! script-filter JSON, or replays a selected argument as a dry run.

use std::path::{Path, PathBuf};

use clap::Parser;
use homecmd::catalog::CatalogSnapshot;
use homecmd::command::{
    CommandExecutor, CommandPayload, CommandRegistry, DryRunExecutor, EnvCredentialStore, Invocation,
};
use homecmd::core::error::Result;
use homecmd::core::Settings;
use homecmd::feedback::FeedbackBuilder;
use tracing_subscriber::EnvFilter;

/// Keystroke-driven command resolver for smart home devices and scenes
#[derive(Parser, Debug)]
#[command(name = "homecmd")]
#[command(about = "Resolve typed text into device and scene commands")]
struct Args {
    /// Catalog snapshot written by the sync routine
    #[arg(long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Settings file; built-in defaults are used when it does not exist
    #[arg(long, default_value = "data/settings.toml")]
    settings: PathBuf,

    /// Replay a selected record argument and print the payload instead of sending it
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    execute: Option<String>,

    /// Environment variable holding the API token
    #[arg(long, default_value = EnvCredentialStore::DEFAULT_VAR)]
    token_var: String,

    /// Show status for a single matched device, overriding the settings
    #[arg(long)]
    show_status: bool,

    /// The text typed so far
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,
}

fn load_settings(path: &Path) -> Result<Settings> {
    if path.exists() {
        Settings::load(path)
    } else {
        tracing::warn!(path = %path.display(), "settings file not found, using defaults");
        Ok(Settings::default())
    }
}

fn load_snapshot(path: &Path) -> Result<CatalogSnapshot> {
    if path.exists() {
        CatalogSnapshot::load(path)
    } else {
        tracing::warn!(path = %path.display(), "catalog not found, run update first");
        Ok(CatalogSnapshot::default())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("homecmd=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = load_settings(&args.settings)?;
    if args.show_status {
        settings.resolver.show_status = true;
    }
    let registry = CommandRegistry::with_defaults(&settings.colors)?;
    registry.validate()?;

    let snapshot = load_snapshot(&args.catalog)?;
    let catalog = snapshot.to_catalog();
    tracing::debug!(
        devices = catalog.devices().len(),
        scenes = catalog.scenes().len(),
        commands = registry.len(),
        "catalog loaded"
    );

    if let Some(arg) = args.execute {
        let invocation = Invocation::parse(&arg)?;
        let payload = CommandPayload::build(&invocation, &catalog, &registry, &settings.colors)?;
        let result = DryRunExecutor::new().execute(&payload)?;
        println!("{}", result.message);
        return Ok(());
    }

    let credentials = EnvCredentialStore::new(args.token_var);
    let query = args.query.join(" ");
    let doc = FeedbackBuilder::new(&catalog, &registry, &settings.resolver, &credentials)
        .with_status_source(&snapshot)
        .build(&query);
    println!("{}", doc.to_json()?);
    Ok(())
}
