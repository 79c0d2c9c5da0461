//! CrimeBoard CLI
//!
//! Command-line front-end for case analysis, board layout, image tagging,
//! composite prompts and evidence text extraction.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crimeboard::commands::{
    analyze_case_input, composite_for_suspect, extract_file, init_settings, layout_nodes,
    load_analysis, show_settings, tag_files, CaseInput, LayoutInput,
};
use crimeboard::services::composite::build_composite_prompt;
use crimeboard::storage::config::ConfigService;
use crimeboard_llm::GradientAgentClient;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crimeboard")]
#[command(about = "CrimeBoard - multi-agent case analysis", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.crimeboard/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a case file and print the board analysis
    Analyze {
        /// Case file: {"title": ..., "evidence": [...]}
        case_file: PathBuf,

        /// Write the analysis here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay out board nodes read from a JSON file
    Layout {
        /// Node array, or {"nodes": [...], "evidence": [...]}
        nodes_file: PathBuf,

        /// Lay out even when the positions look fine
        #[arg(long)]
        force: bool,
    },

    /// Print simulated tags for image filenames
    Tag {
        #[arg(required = true)]
        filenames: Vec<PathBuf>,
    },

    /// Build a composite sketch prompt from a suspect description
    Composite {
        /// Free-text description; omit to use --analysis with --suspect
        #[arg(required_unless_present = "analysis")]
        description: Option<String>,

        /// Saved analysis JSON to take the description from
        #[arg(long, requires = "suspect", conflicts_with = "description")]
        analysis: Option<PathBuf>,

        /// Suspect id in the analysis, e.g. SUS-01
        #[arg(long)]
        suspect: Option<String>,
    },

    /// Extract text and date/time hints from evidence files
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Content type to assume instead of guessing from the extension
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file first
        #[arg(long)]
        init: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigService> {
    let service = match path {
        Some(path) => ConfigService::load(path),
        None => ConfigService::new(),
    };
    service.context("failed to load configuration")
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = load_config(cli.config.as_ref())?;
    let config = config_service.effective_config();
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Analyze { case_file, output } => {
            let input = CaseInput::from_file(&case_file)
                .with_context(|| format!("failed to read case file {}", case_file.display()))?;
            if !config.agent.is_configured() {
                tracing::warn!(
                    "[CLI] Agent endpoint not configured; every stage will come back empty"
                );
            }

            let client = Arc::new(GradientAgentClient::new(config.agent.clone()));
            let analysis = analyze_case_input(input, client).await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, serde_json::to_string_pretty(&analysis)?)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("[CLI] Analysis written to {}", path.display());
                }
                None => print_json(&analysis)?,
            }
        }

        Commands::Layout { nodes_file, force } => {
            let input = LayoutInput::from_file(&nodes_file)
                .with_context(|| format!("failed to read nodes file {}", nodes_file.display()))?;
            print_json(&layout_nodes(input, force))?;
        }

        Commands::Tag { filenames } => {
            let names: Vec<String> = filenames
                .iter()
                .map(|path| {
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string())
                })
                .collect();
            print_json(&tag_files(&names, Utc::now().date_naive()))?;
        }

        Commands::Composite {
            description,
            analysis,
            suspect,
        } => {
            let sketch = match (analysis, suspect, description) {
                (Some(path), Some(suspect_id), _) => {
                    let analysis = load_analysis(&path)
                        .with_context(|| format!("failed to read analysis {}", path.display()))?;
                    composite_for_suspect(&analysis, &suspect_id)?
                }
                (_, _, Some(description)) => build_composite_prompt(&description)?,
                _ => anyhow::bail!("a description or --analysis with --suspect is required"),
            };
            print_json(&sketch)?;
        }

        Commands::Extract {
            files,
            content_type,
        } => {
            let extracted = files
                .iter()
                .map(|path| {
                    extract_file(path, content_type.as_deref())
                        .with_context(|| format!("failed to read {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&extracted)?;
        }

        Commands::Config { init } => {
            let service = if init {
                init_settings(config_service.config_path())?
            } else {
                config_service
            };
            print_json(&show_settings(&service))?;
        }
    }

    Ok(())
}
