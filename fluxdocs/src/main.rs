//! fluxdocs - Static documentation site generator
//!
//! A CLI tool for building the Flux documentation site from a store of
//! Markdown-subset documents.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RenderFormat};
use fluxdocs::{
    build_site, document_routes, render_blocks, AnchorTable, ContentTrust, MarkdownRenderer,
    RenderedDocument, ScrollSignal, ScrollSpyTracker, SiteConfig, CONFIG_FILE_NAME,
};
use std::path::{Path, PathBuf};

/// Main entry point for the fluxdocs CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path, force } => {
            handle_init_command(path, force)?;
        }

        Commands::Build { config, output } => {
            handle_build_command(&config, &output)?;
        }

        Commands::Render {
            file,
            format,
            untrusted,
        } => {
            handle_render_command(&file, format, untrusted)?;
        }

        Commands::Routes { config } => {
            handle_routes_command(&config)?;
        }

        Commands::Spy {
            file,
            offset,
            anchors,
        } => {
            handle_spy_command(&file, offset, anchors)?;
        }
    }

    Ok(())
}

/// `-v` forces info level; otherwise `RUST_LOG` decides
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            config_path.display()
        );
    }

    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    SiteConfig::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✓ Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure your site", CONFIG_FILE_NAME);
    println!("  2. Run 'fluxdocs build' to generate the site");

    Ok(())
}

/// Handle the build command
fn handle_build_command(config_path: &Path, output: &Path) -> Result<()> {
    let config = SiteConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let store = config
        .content_store(config_dir(config_path))
        .context("Failed to load documentation content")?;

    println!("Building documentation...");
    println!("Output: {}", output.display());

    let summary = build_site(&config, &store, output)
        .with_context(|| format!("Failed to build site in {}", output.display()))?;

    println!(
        "✓ Wrote {} pages and {} redirects",
        summary.pages, summary.redirects
    );
    if summary.fallbacks > 0 {
        println!("  - {} pages use fallback content", summary.fallbacks);
    }
    if summary.warnings > 0 {
        println!("  - {} renderer warnings (run with -v for details)", summary.warnings);
    }
    println!("\n✓ Build completed successfully!");

    Ok(())
}

/// Handle the render command
fn handle_render_command(file: &Path, format: RenderFormat, untrusted: bool) -> Result<()> {
    let trust = if untrusted {
        ContentTrust::Untrusted
    } else {
        ContentTrust::Trusted
    };
    let document = render_file(file, trust)?;

    match format {
        RenderFormat::Html => print!("{}", render_blocks(&document.blocks)),
        RenderFormat::Json => {
            let json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize rendered document")?;
            println!("{json}");
        }
        RenderFormat::Outline => {
            for heading in document.headings.iter() {
                println!(
                    "{}{} (#{})",
                    "  ".repeat(heading.level.saturating_sub(1)),
                    heading.text,
                    heading.id
                );
            }
        }
    }

    Ok(())
}

/// Handle the routes command
fn handle_routes_command(config_path: &Path) -> Result<()> {
    let config = SiteConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let store = config
        .content_store(config_dir(config_path))
        .context("Failed to load documentation content")?;

    println!("/ -> {}", config.default_route);
    println!("/docs -> {}", config.default_route);
    for route in document_routes(&store) {
        println!("{route}");
    }

    Ok(())
}

/// Handle the spy command
fn handle_spy_command(file: &Path, offset: i32, anchors: Vec<(String, f64)>) -> Result<()> {
    let document = render_file(file, ContentTrust::Trusted)?;
    let anchors: AnchorTable = anchors.into_iter().collect();

    let mut signal = ScrollSignal::new();
    let mut tracker = ScrollSpyTracker::new(offset);
    tracker.track(&document.headings, &mut signal, &anchors);

    match tracker.active_id() {
        Some(id) => println!("{id}"),
        None => println!("(no headings)"),
    }

    tracker.unsubscribe(&mut signal);
    Ok(())
}

fn render_file(file: &Path, trust: ContentTrust) -> Result<RenderedDocument> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = MarkdownRenderer::new().with_trust(trust).render(&content);
    for warning in &document.warnings {
        log::warn!("{}: {}", file.display(), warning);
    }
    Ok(document)
}

fn config_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or_else(|| Path::new("."))
}
