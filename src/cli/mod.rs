//! Command line interface: clap argument definitions and the workflows they drive.

pub mod args;
pub mod orchestration;

pub use args::{BumpArgs, CheckArgs, Cli, Commands, IncrementType};
pub use orchestration::{
    run_bump_workflow, run_check_workflow, BumpOutcome, BumpWorkflowArgs, CheckOutcome,
    CheckWorkflowArgs, VersionSource,
};
