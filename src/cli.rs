//! Command-line interface
//!
//! ```bash
//! prevue notes.md
//! prevue --explain photo.png
//! prevue -c ~/rules.yaml archive.tar.gz
//! prevue --print-default-config > ~/.config/prevue/config.yaml
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::dispatch::Mode;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "prevue")]
#[command(about = "Preview any file with the viewer your rules pick for it", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Rule file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the classification, matched rule and command instead of running it
    #[arg(short = 'e', long = "explain")]
    pub explain: bool,

    /// Print an "<ext>: <mime>" line before the preview
    #[arg(long = "header")]
    pub header: bool,

    /// Print the built-in default rule file and exit
    #[arg(
        long = "print-default-config",
        conflicts_with_all = ["file", "explain", "config", "header"]
    )]
    pub print_default_config: bool,

    /// File or directory to preview
    #[arg(value_name = "FILE", required_unless_present = "print_default_config")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Dispatch mode selected by the flags
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.explain {
            Mode::Explain
        } else {
            Mode::Execute
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_only() {
        let cli = Cli::parse_from(["prevue", "notes.md"]);
        assert_eq!(cli.file, Some(PathBuf::from("notes.md")));
        assert_eq!(cli.config, None);
        assert_eq!(cli.mode(), Mode::Execute);
        assert!(!cli.print_default_config);
        assert!(!cli.header);
    }

    #[test]
    fn test_parse_header_flag() {
        let cli = Cli::parse_from(["prevue", "--header", "notes.md"]);
        assert!(cli.header);
        assert_eq!(cli.mode(), Mode::Execute);
    }

    #[test]
    fn test_parse_explain_and_config() {
        let cli = Cli::parse_from(["prevue", "-e", "-c", "/tmp/rules.yaml", "photo.png"]);
        assert_eq!(cli.mode(), Mode::Explain);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rules.yaml")));
        assert_eq!(cli.file, Some(PathBuf::from("photo.png")));
    }

    #[test]
    fn test_parse_long_flags() {
        let cli = Cli::parse_from(["prevue", "--explain", "--config", "r.yaml", "x"]);
        assert!(cli.explain);
        assert_eq!(cli.config, Some(PathBuf::from("r.yaml")));
    }

    #[test]
    fn test_print_default_config_needs_no_file() {
        let cli = Cli::parse_from(["prevue", "--print-default-config"]);
        assert!(cli.print_default_config);
        assert_eq!(cli.file, None);
    }

    #[test]
    fn test_missing_file_is_usage_error() {
        let err = Cli::try_parse_from(["prevue"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_print_default_config_conflicts_with_file() {
        assert!(Cli::try_parse_from(["prevue", "--print-default-config", "x"]).is_err());
    }
}
