//! Command line arguments
//!
//! Flags are parsed into these clap structs, then merged with the loaded
//! [`Config`] into the plain workflow argument structs in
//! [`orchestration`](super::orchestration).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::orchestration::{BumpWorkflowArgs, CheckWorkflowArgs};
use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "vrsn",
    version,
    about = "Bump and check semantic versions in project manifest files"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Version file to use instead of searching the current directory"
    )]
    pub file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Increment the current semantic version with a patch, minor or major bump
    Bump(BumpArgs),
    /// Check the semantic version has been correctly incremented
    Check(CheckArgs),
}

/// Increment type accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementType {
    Patch,
    Minor,
    Major,
}

impl IncrementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementType::Patch => "patch",
            IncrementType::Minor => "minor",
            IncrementType::Major => "major",
        }
    }
}

#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Increment to apply; prompts interactively when omitted
    #[arg(value_enum)]
    pub increment: Option<IncrementType>,

    #[arg(long, help = "Commit the updated version file after bumping")]
    pub commit: bool,

    #[arg(long, help = "Commit message used when committing the version bump")]
    pub commit_msg: Option<String>,

    #[arg(short = 't', long, help = "Create an annotated tag for the new version")]
    pub git_tag: bool,

    #[arg(long, help = "Tag message, {version} is replaced by the new version")]
    pub tag_msg: Option<String>,
}

impl BumpArgs {
    /// Merges flags over config values.
    pub fn into_workflow_args(
        self,
        dir: PathBuf,
        file: Option<PathBuf>,
        config: &Config,
    ) -> BumpWorkflowArgs {
        BumpWorkflowArgs {
            dir,
            file,
            increment: self.increment.map(|i| i.as_str().to_string()),
            commit: self.commit || config.bump.commit,
            commit_msg: non_empty(self.commit_msg).unwrap_or_else(|| config.bump.commit_msg.clone()),
            git_tag: self.git_tag || config.bump.git_tag,
            tag_msg: non_empty(self.tag_msg).unwrap_or_else(|| config.bump.tag_msg.clone()),
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long, help = "The previous semantic version")]
    pub was: Option<String>,

    #[arg(long, help = "The current semantic version")]
    pub now: Option<String>,

    #[arg(
        short,
        long,
        help = "Base branch the version is compared against when --was is omitted"
    )]
    pub base_branch: Option<String>,
}

impl CheckArgs {
    /// Merges flags over config values.
    pub fn into_workflow_args(
        self,
        dir: PathBuf,
        file: Option<PathBuf>,
        config: &Config,
    ) -> CheckWorkflowArgs {
        CheckWorkflowArgs {
            dir,
            file,
            was: self.was,
            now: self.now,
            base_branch: non_empty(self.base_branch)
                .unwrap_or_else(|| config.check.base_branch.clone()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
