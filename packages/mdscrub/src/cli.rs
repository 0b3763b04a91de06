//! Command-line interface for the sanitizer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT};
use crate::error::{Result, SanitizeError};
use crate::pipeline;

/// mdscrub - Repair renderer artifacts in generated Markdown trees.
#[derive(Parser)]
#[command(name = "mdscrub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sanitize a rendered Markdown tree into a publishable one.
    Sanitize {
        /// Input root holding the renderer's Markdown output
        #[arg(default_value = DEFAULT_INPUT_ROOT)]
        input: PathBuf,

        /// Output root for the sanitized tree (removed and recreated)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
        output: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sanitize { input, output } => sanitize_command(&input, &output),
    }
}

/// Execute the sanitize command.
fn sanitize_command(input: &Path, output: &Path) -> Result<()> {
    // Validate the input root before clearing anything
    if !input.exists() {
        return Err(SanitizeError::InputRootNotFound(input.to_path_buf()));
    }
    if !input.is_dir() {
        return Err(SanitizeError::InputRootNotADirectory(input.to_path_buf()));
    }

    println!(
        "{} {} into {}",
        style("Sanitizing").bold(),
        style(input.display()).cyan(),
        style(output.display()).green()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Rewriting documents...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match pipeline::run(input, output) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Documents: {}", style(summary.documents).green());
    println!("  Overrides applied: {}", summary.overridden);
    println!();
    println!(
        "{} {}",
        style("Sanitized tree at:").green().bold(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sanitize_defaults() {
        let cli = Cli::parse_from(["mdscrub", "sanitize"]);

        let Commands::Sanitize { input, output } = cli.command;
        assert_eq!(input, PathBuf::from(DEFAULT_INPUT_ROOT));
        assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_ROOT));
    }

    #[test]
    fn test_cli_parse_sanitize_with_paths() {
        let cli = Cli::parse_from(["mdscrub", "sanitize", "rendered", "--output", "public"]);

        let Commands::Sanitize { input, output } = cli.command;
        assert_eq!(input, PathBuf::from("rendered"));
        assert_eq!(output, PathBuf::from("public"));
    }
}
