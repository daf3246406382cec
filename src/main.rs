use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::PathBuf;
use tracing::{error, warn};

use arborist::{
    config::Configuration,
    core::{Kind, Namespaces},
    handlers::ManifestProcessor,
    knowledge_graph::{load_turtle, KnowledgeGraphStats},
    utils::find_turtle_files,
};

#[derive(Parser)]
#[command(
    name = "arborist",
    about = "Generate the URIs and Turtle files needed for the BONSAI knowledge graph",
    long_about = None,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one Turtle file per dataset described in a manifest
    Generate {
        /// Manifest file path (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output base directory (overrides the manifest)
        #[arg(short, long, env = "ARBORIST_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Modification date written into every header, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Validate a manifest without writing anything
    Validate {
        /// Manifest file path
        #[arg(short, long)]
        manifest: PathBuf,
    },

    /// Parse generated Turtle files and show statistics
    Inspect {
        /// A .ttl file or a directory to scan for .ttl files
        path: PathBuf,
    },

    /// List the valid dataset kinds
    Kinds,

    /// Generate an example manifest file
    GenerateManifest {
        /// Output path for the manifest
        #[arg(short, long)]
        output: PathBuf,

        /// Manifest format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: ManifestFormat,
    },
}

#[derive(clap::ValueEnum, Clone)]
enum ManifestFormat {
    Yaml,
    Json,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate { manifest, output_dir, date } => {
            generate_command(manifest, output_dir, date)
        }
        Commands::Validate { manifest } => validate_command(manifest),
        Commands::Inspect { path } => inspect_command(path),
        Commands::Kinds => kinds_command(),
        Commands::GenerateManifest { output, format } => {
            generate_manifest_command(output, format)
        }
    }
}

fn generate_command(
    manifest_path: PathBuf,
    output_dir: Option<PathBuf>,
    date: Option<NaiveDate>,
) -> Result<()> {
    println!("{}", "Generating BONSAI graphs...".bright_blue().bold());

    let config = Configuration::from_file(&manifest_path)?;
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let modified = date.unwrap_or_else(|| Local::now().date_naive());

    println!(" Manifest: {}", manifest_path.display().to_string().bright_green());
    println!(" Datasets: {}", config.datasets.len());
    println!(" Output: {}", output_dir.display());

    let processor = ManifestProcessor::new(output_dir, modified);
    let reports = match processor.process(&config) {
        Ok(reports) => reports,
        Err(e) => {
            error!(" Generation failed: {:#}", e);
            return Err(e);
        }
    };

    for report in &reports {
        println!(
            "  {} {} ({} entities, {} triples) -> {}",
            report.kind.to_string().bright_cyan(),
            report.title,
            report.entities,
            report.triples,
            report.path.display().to_string().bright_green()
        );
    }

    let total_triples: usize = reports.iter().map(|r| r.triples).sum();
    println!("\n{}", " Generation Summary".bright_green().bold());
    println!(" Files written: {}", reports.len().to_string().bright_cyan());
    println!(" Total triples: {}", total_triples.to_string().bright_cyan());

    Ok(())
}

fn validate_command(manifest_path: PathBuf) -> Result<()> {
    println!("{}", " Validating manifest...".bright_blue().bold());

    match Configuration::from_file(&manifest_path) {
        Ok(config) => {
            match config.validate() {
                Ok(()) => {
                    println!(" Manifest is valid!");
                    println!(" Author: {}", config.author.bright_green());
                    println!(" Version: {}", config.version);
                    println!(" Datasets: {}", config.datasets.len());
                    for dataset in &config.datasets {
                        println!(
                            "  {} {}/{} ({} entities)",
                            dataset.kind.bright_cyan(),
                            dataset.kind.to_lowercase(),
                            dataset.directory.join("/"),
                            dataset.entities.len()
                        );
                    }
                    Ok(())
                }
                Err(e) => {
                    error!(" Manifest validation failed: {:#}", e);
                    Err(e)
                }
            }
        }
        Err(e) => {
            error!(" Failed to load manifest: {:#}", e);
            Err(e)
        }
    }
}

fn inspect_command(path: PathBuf) -> Result<()> {
    println!("{}", " Inspecting Turtle files...".bright_blue().bold());

    let files = if path.is_dir() {
        find_turtle_files(&path)?
    } else {
        vec![path.clone()]
    };

    if files.is_empty() {
        warn!(" No .ttl files found under {}", path.display());
        return Ok(());
    }

    let mut total_triples = 0;
    for file in &files {
        let graph = load_turtle(file)
            .with_context(|| format!("Failed to parse {}", file.display()))?;
        let stats: KnowledgeGraphStats = graph.stats();
        total_triples += stats.total_triples;

        println!("\n{}", file.display().to_string().bright_green());
        for line in stats.to_string().lines() {
            println!("  {}", line);
        }
    }

    println!("\n Files: {}", files.len().to_string().bright_cyan());
    println!(" Total triples: {}", total_triples.to_string().bright_cyan());

    Ok(())
}

fn kinds_command() -> Result<()> {
    let namespaces = Namespaces::default();

    println!("{}", " BONSAI base ontology types".bright_blue().bold());
    for kind in Kind::ALL {
        println!(
            "  {:<14} {:<8} {}",
            kind.name().bright_cyan(),
            kind.prefix(),
            namespaces.kind_class(kind)
        );
    }

    Ok(())
}

fn generate_manifest_command(output_path: PathBuf, format: ManifestFormat) -> Result<()> {
    println!("{}", " Generating example manifest...".bright_blue().bold());

    let config = Configuration::example();

    let content = match format {
        ManifestFormat::Yaml => serde_yaml::to_string(&config)?,
        ManifestFormat::Json => serde_json::to_string_pretty(&config)?,
    };

    fs::write(&output_path, content)
        .with_context(|| format!("Failed to write manifest: {}", output_path.display()))?;

    println!(" Example manifest generated at: {}", output_path.display().to_string().bright_green());
    println!(" Edit the file to describe your datasets");

    Ok(())
}
