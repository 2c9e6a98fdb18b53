//! IB Vault CLI
//! 
//! Take the questionnaire offline, export a vault image, and verify images
//! produced anywhere else.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use ib_vault::classify::classify;
use ib_vault::config::{ConfigManager, VaultConfig};
use ib_vault::container::{chunks, extract_metadata};
use ib_vault::export::{export_vault_image, CardRasterizer};
use ib_vault::questionnaire::{AnswerSet, QUESTIONNAIRE_ID, QUESTIONS};
use ib_vault::utils::{init_logging, truncate_text};
use ib_vault::verify::verify_paths;

// ──────────────────────────────────────────────────────────────────────────────
// COMMAND LINE
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "ib_vault", author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (created with defaults if missing)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the questionnaire
    Questions,
    /// Classify a set of answers (1-10 each, out-of-range values are clamped)
    Classify {
        #[arg(required = true, allow_hyphen_values = true)]
        answers: Vec<String>,
        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a vault image for a set of answers
    Export {
        #[arg(required = true, allow_hyphen_values = true)]
        answers: Vec<String>,
        /// Output directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Verify one or more vault images
    Verify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the chunks and text metadata of an image
    Inspect { file: PathBuf },
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

async fn resolve_config(path: Option<&PathBuf>) -> Result<VaultConfig> {
    match path {
        Some(path) => ConfigManager::new(path).resolve().await,
        None => {
            let mut config = VaultConfig::default();
            config.apply_env();
            Ok(config.normalized())
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_ref()).await?;
    init_logging(&config.log_filter);

    match cli.command {
        Commands::Questions => {
            println!("{}\n", QUESTIONNAIRE_ID);
            for question in QUESTIONS.iter() {
                println!("{:>2}. [{}] {}", question.id, question.signal.label(), question.text);
            }
        }
        Commands::Classify { answers, json } => {
            let answers = AnswerSet::parse(&answers);
            let analysis = classify(&answers);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("{}\n\n{}\n", analysis.orientation, analysis.meaning);
                for tendency in &analysis.tendencies {
                    println!("  - {}", tendency);
                }
                if !analysis.tensions.is_empty() {
                    println!();
                    for tension in &analysis.tensions {
                        println!("  * {}", tension);
                    }
                }
            }
        }
        Commands::Export { answers, out } => {
            let answers = AnswerSet::parse(&answers);
            let rasterizer = CardRasterizer::new(config.image_width, config.image_height);
            let image = export_vault_image(&answers, &rasterizer)?;
            let dir = out.unwrap_or_else(|| config.output_dir.clone());
            let path = image.save_to(&dir).await?;
            println!("{}", path.display());
            println!(
                "checksum_sha256: {}",
                image.payload.checksum_sha256.as_deref().unwrap_or_default()
            );
        }
        Commands::Verify { files } => {
            let results = verify_paths(&files).await;
            let mut all_ok = true;
            for result in &results {
                all_ok &= result.is_ok();
                match &result.outcome {
                    Ok(verdict) => println!("{}: {}", result.path.display(), verdict),
                    Err(e) => println!("{}: unreadable ({})", result.path.display(), e),
                }
            }
            if !all_ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Inspect { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            info!("Inspecting {} ({} bytes)", file.display(), bytes.len());
            for header in chunks(&bytes)? {
                println!("{} @{} ({} bytes)", header.kind_str(), header.offset, header.length);
            }
            for entry in extract_metadata(&bytes)? {
                println!(
                    "tEXt {}: {} bytes [{}]",
                    entry.key,
                    entry.value.len(),
                    truncate_text(&entry.value, 24)
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
