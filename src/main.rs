use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use navquill::config::Config;
use navquill::session::{Script, Session};

/// navquill - replay an editing session against the navigation history
#[derive(Parser)]
#[command(name = "navquill")]
#[command(version)]
#[command(about = "Replay an editing session against the navigation history", long_about = None)]
struct Cli {
    /// Session script to replay
    script: PathBuf,

    /// Maximum number of remembered positions (overrides the config file)
    #[arg(short, long)]
    max_history: Option<usize>,

    /// Config file to use instead of ~/.config/navquill/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::try_load_from(path),
        None => Config::try_load(),
    };
    // Held back until the logger exists, since the config picks its level.
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    // CLI overrides config
    if let Some(max_history) = cli.max_history {
        config.max_history = max_history;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(err) = config_error {
        log::warn!("Ignoring config, using defaults: {:#}", err);
    }

    let script = Script::load(&cli.script)?;
    log::debug!("Loaded {} commands from {}", script.len(), cli.script.display());

    let base_dir = cli
        .script
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let mut session = Session::new(&config).with_base_dir(base_dir);

    for line in session
        .run(&script)
        .with_context(|| format!("Replaying {}", cli.script.display()))?
    {
        println!("{}", line);
    }
    println!("{}", session.status());

    let (_, buttons) = session.finish();
    log::debug!("History released, final buttons {:?}", buttons);

    Ok(())
}
