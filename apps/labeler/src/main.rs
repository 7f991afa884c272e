//! labeler CLI binary entry point.
//! Resolves settings, runs the orchestrator against a local checkout, and
//! prints results.

use clap::Parser;
use labeler::cli::{Cli, Commands};
use labeler::client::{ContentFetcher, LocalClient};
use labeler::config::{self, Overrides};
use labeler::labeler::{Labeler, Options};
use labeler::models::Config;
use labeler::output;
use std::error::Error;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli.cmd) {
        eprintln!("{} {}", output::error_prefix(), e);
        std::process::exit(1);
    }
}

fn dispatch(cmd: Commands) -> Result<(), Box<dyn Error>> {
    match cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Run {
            repo_root,
            owner,
            repo,
            event_type,
            id,
            data,
            event_path,
            fields,
            config_path,
            timeout_secs,
            output,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root: repo_root.as_deref(),
                config_path: config_path.as_deref(),
                fields: Some(&fields),
                output: output.as_deref(),
                timeout_secs,
                owner: owner.as_deref(),
                repo: repo.as_deref(),
            })?;
            if let Some(path) = &eff.settings_file {
                tracing::debug!(path = %path.display(), "loaded settings");
            }

            // Inline data first, then an explicit payload file, then the
            // Actions-provided event path.
            let event_path = event_path.or_else(|| std::env::var("GITHUB_EVENT_PATH").ok());
            let data = match (data, event_path) {
                (Some(d), _) => Some(d),
                (None, Some(p)) => Some(
                    fs::read_to_string(&p)
                        .map_err(|e| format!("could not read event payload {p}: {e}"))?,
                ),
                (None, None) => None,
            };

            let options = Options {
                owner: eff.owner,
                repo: eff.repo,
                event: event_type,
                number: id,
                data,
                config_path: eff.config_path,
                fields: eff.fields,
                call_timeout: eff.timeout,
            };
            let mut labeler = Labeler::new(options, LocalClient::new(&eff.repo_root))
                .map_err(|e| format!("could not initialize labeler: {e}"))?;
            let report = labeler
                .execute()
                .map_err(|e| format!("labeling failed: {e}"))?;
            output::print_run(&report, &eff.output);
            tracing::info!("run complete!");
        }
        Commands::Validate {
            repo_root,
            config_path,
            output,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root: repo_root.as_deref(),
                config_path: config_path.as_deref(),
                output: output.as_deref(),
                ..Overrides::default()
            })?;
            let client = LocalClient::new(&eff.repo_root);
            let bytes = client.fetch(&eff.owner, &eff.repo, &eff.config_path, eff.timeout)?;
            let config = Config::parse(&bytes, &eff.config_path)?;
            output::print_validate(&config, &eff.config_path, &eff.output);
        }
    }
    Ok(())
}
