use std::env;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vrsn::cli::{run_bump_workflow, run_check_workflow, BumpOutcome, Cli, Commands, VersionSource};
use vrsn::config;
use vrsn::git::{Git2Repository, VersionControl};
use vrsn::ui::{self, BumpSelector};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = config::load_config(cli.config.as_deref());
    init_logging(cli.verbose || loaded.as_ref().is_ok_and(|c| c.verbose));
    let config = loaded.context("error loading config")?;

    let dir = env::current_dir().context("error getting current working directory")?;
    let repo = open_repository(&dir);
    let repo = repo.as_ref().map(|r| r as &dyn VersionControl);

    match cli.command {
        Commands::Bump(args) => {
            let args = args.into_workflow_args(dir, cli.file, &config);
            debug!("bump args: {:?}", args);

            let outcome = run_bump_workflow(&args, repo, &BumpSelector::new())?;
            report_bump(&outcome);
        }
        Commands::Check(args) => {
            let args = args.into_workflow_args(dir, cli.file, &config);
            debug!("check args: {:?}", args);

            run_check_workflow(&args, repo)?;
            ui::display_success("valid version bump");
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository(dir: &Path) -> Option<Git2Repository> {
    match Git2Repository::open(dir) {
        Ok(repo) => Some(repo),
        Err(e) => {
            debug!("no git repository found: {}", e);
            None
        }
    }
}

fn report_bump(outcome: &BumpOutcome) {
    match &outcome.source {
        VersionSource::File(file) => ui::display_success(&format!(
            "version bumped from {} to {} in {}",
            outcome.was,
            outcome.now,
            file.display()
        )),
        VersionSource::Tag(tag) => ui::display_success(&format!(
            "version bumped from tag {} to {}",
            tag, outcome.now
        )),
    }

    if outcome.committed {
        ui::display_status("version file committed");
    }

    if let Some(tag) = &outcome.tag {
        ui::display_status(&format!("created tag {}", tag));
    }
}
