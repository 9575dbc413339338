//! Command-line interface definitions for fluxdocs

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the render command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RenderFormat {
    /// HTML fragment of the document body
    #[default]
    Html,
    /// Blocks, headings and warnings as JSON
    Json,
    /// Indented heading outline with anchor ids
    Outline,
}

/// CLI structure for the fluxdocs application
#[derive(Parser)]
#[command(name = "fluxdocs")]
#[command(version)]
#[command(about = "Static documentation site generator", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for fluxdocs
#[derive(Subcommand)]
pub enum Commands {
    /// Write a default fluxdocs.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Build the static documentation site
    Build {
        /// Site configuration file
        #[arg(short, long, default_value = "fluxdocs.toml")]
        config: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "site")]
        output: PathBuf,
    },

    /// Render a single document to stdout
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: RenderFormat,

        /// Escape HTML in paragraphs
        #[arg(long)]
        untrusted: bool,
    },

    /// List every document route
    Routes {
        /// Site configuration file
        #[arg(short, long, default_value = "fluxdocs.toml")]
        config: PathBuf,
    },

    /// Show which heading the scroll spy would highlight
    Spy {
        /// Markdown file to render
        file: PathBuf,

        /// Activation offset in pixels
        #[arg(long, default_value_t = fluxdocs::DEFAULT_SCROLL_OFFSET, allow_negative_numbers = true)]
        offset: i32,

        /// Anchor position relative to the viewport top, as ID=TOP
        #[arg(short, long = "anchor", value_name = "ID=TOP", value_parser = parse_anchor, allow_hyphen_values = true)]
        anchors: Vec<(String, f64)>,
    },
}

/// Parse an `ID=TOP` anchor argument
fn parse_anchor(value: &str) -> Result<(String, f64), String> {
    let (id, top) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ID=TOP, got '{value}'"))?;
    let top = top
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid position '{top}': {e}"))?;
    Ok((id.trim().to_string(), top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_anchor() {
        assert_eq!(
            parse_anchor("setup=-120.5"),
            Ok(("setup".to_string(), -120.5))
        );
        assert!(parse_anchor("setup").is_err());
        assert!(parse_anchor("setup=far").is_err());
    }

    #[test]
    fn test_spy_arguments() {
        let cli = Cli::parse_from([
            "fluxdocs", "spy", "doc.md", "--offset", "80", "-a", "intro=-300", "--anchor",
            "setup=40",
        ]);
        match cli.command {
            Commands::Spy {
                offset, anchors, ..
            } => {
                assert_eq!(offset, 80);
                assert_eq!(
                    anchors,
                    vec![("intro".to_string(), -300.0), ("setup".to_string(), 40.0)]
                );
            }
            _ => panic!("Expected spy command"),
        }
    }
}
