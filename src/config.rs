//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::highlight::theme_names;

/// Command line configuration for gitshelf.
#[derive(Debug, Clone, Parser)]
#[command(name = "gitshelf", version, about, long_about = None)]
pub struct Config {
    /// Repository path
    #[arg(default_value = ".")]
    pub repo: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Branch to render (defaults to the branch HEAD points at)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Syntax highlighting theme (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Maximum number of commits on the commit log page
    #[arg(long, default_value_t = 100)]
    pub commit_limit: usize,

    /// Worker threads for page rendering (0 uses all cores)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors, hide progress
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Repository path does not exist
    /// - Theme is not a bundled syntect theme
    /// - Both verbose and quiet are requested
    pub fn validate(&self) -> Result<()> {
        if !self.repo.exists() {
            bail!("Repository path does not exist: {}", self.repo.display());
        }

        let themes = theme_names();
        if !themes.iter().any(|t| t == &self.theme) {
            bail!(
                "Unknown theme '{}', available: {}",
                self.theme,
                themes.join(", ")
            );
        }

        if self.verbose && self.quiet {
            bail!("--verbose and --quiet cannot be used together");
        }

        Ok(())
    }

    /// Returns project name from configuration or repository directory.
    ///
    /// # Errors
    ///
    /// Returns error if repository path has no name component or contains invalid UTF8.
    pub fn project_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        let path = self
            .repo
            .canonicalize()
            .unwrap_or_else(|_| self.repo.clone());

        path.file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot extract project name from path: {}", path.display()))
            .map(String::from)
    }
}
