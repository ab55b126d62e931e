//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;
use console::style;

use crate::domain::{get_bump_options, BumpOptions};
use crate::error::VrsnError;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_error, display_status, display_success, display_transition};

/// Prompts user to select the kind of bump to apply.
///
/// Displays a numbered list of the labels from [`BumpOptions::prompt_options`]
/// and accepts a 1-based index. Default selection is the first option
/// (patch) if user presses Enter.
///
/// # Returns
/// * `Ok(String)` - The selected label, e.g. `"minor (1.1.0)"`
/// * `Err` - If selection is invalid or stdin cannot be read
pub fn select_bump_type(options: &BumpOptions) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    prompt_bump_type(options, &mut input, &mut output)
}

/// Prompt implementation over arbitrary reader/writer pairs.
pub fn prompt_bump_type<R: BufRead, W: Write>(
    options: &BumpOptions,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    let labels = options.prompt_options();

    writeln!(output, "\n{}", style("Select version increment:").bold())?;
    for (i, label) in labels.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, label)?;
    }
    write!(output, "\nSelect an option (1-{}) [default: 1]: ", labels.len())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let selection = line.trim();

    let index = if selection.is_empty() {
        1
    } else {
        selection.parse::<usize>().unwrap_or(0)
    };

    if index > 0 && index <= labels.len() {
        Ok(labels[index - 1].clone())
    } else {
        Err(anyhow::anyhow!("Invalid selection: '{}'", selection))
    }
}

/// Function that picks one of the bump labels for a set of options.
pub type SelectFn = fn(&BumpOptions) -> Result<String>;

/// Turns a current version into the next one by asking a selector.
///
/// Workflows take a `BumpSelector` so tests can swap the terminal prompt for
/// a fixed choice.
#[derive(Clone, Copy)]
pub struct BumpSelector {
    pub selector: SelectFn,
}

impl BumpSelector {
    /// A selector backed by the interactive prompt.
    pub fn new() -> Self {
        BumpSelector {
            selector: select_bump_type,
        }
    }

    pub fn with_selector(selector: SelectFn) -> Self {
        BumpSelector { selector }
    }

    /// Computes the bump options for `current` and returns the chosen version.
    pub fn select(&self, current: &str) -> Result<String> {
        let options = get_bump_options(current).map_err(VrsnError::from)?;
        let choice = (self.selector)(&options)?;

        Ok(options
            .selected_increment(&choice)
            .map_err(VrsnError::from)?)
    }
}

impl Default for BumpSelector {
    fn default() -> Self {
        Self::new()
    }
}
