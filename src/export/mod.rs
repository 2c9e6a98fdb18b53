//! Vault Export
//!
//! classify → build → seal → rasterize → embed. The rasterizer is a
//! collaborator behind a trait; whatever it returns must already be a PNG.

pub mod render;

pub use render::CardRasterizer;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::classify::classify;
use crate::container::{insert_metadata, is_container};
use crate::payload::{build_payload, encode_envelope, Payload, EMBED_KEY};
use crate::questionnaire::AnswerSet;

pub const FILE_PREFIX: &str = "IB_V1_PrivateResult_";
/// Checksum hex characters used in file names
const FILE_CHECKSUM_CHARS: usize = 10;

/// What the rasterizer gets to draw
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub orientation: String,
    pub answers: AnswerSet,
}

/// Produces an opaque PNG for a result card
pub trait Rasterizer {
    fn rasterize(&self, request: &CardRequest) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct VaultImage {
    pub bytes: Vec<u8>,
    pub payload: Payload,
    pub file_name: String,
}

impl VaultImage {
    /// Write under `dir`, creating it if needed. Returns the full path.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved vault image to {}", path.display());
        Ok(path)
    }
}

pub fn vault_file_name(checksum: &str) -> String {
    let short: String = checksum.chars().take(FILE_CHECKSUM_CHARS).collect();
    format!("{}{}.png", FILE_PREFIX, short)
}

pub fn export_vault_image(answers: &AnswerSet, rasterizer: &dyn Rasterizer) -> Result<VaultImage> {
    let analysis = classify(answers);
    let payload = build_payload(&answers.to_i64s(), &analysis).seal();
    let checksum = payload.checksum_sha256.clone().unwrap_or_default();

    let request = CardRequest {
        orientation: analysis.orientation.clone(),
        answers: payload.answers,
    };
    let card = rasterizer.rasterize(&request).context("Rasterizer failed")?;
    if !is_container(&card) {
        bail!("Rasterizer output is not a PNG container");
    }

    let bytes = insert_metadata(&card, EMBED_KEY, &encode_envelope(&payload))
        .context("Failed to embed payload")?;

    info!(
        "Exported '{}' ({} bytes, checksum {})",
        analysis.orientation,
        bytes.len(),
        &checksum[..checksum.len().min(FILE_CHECKSUM_CHARS)]
    );

    Ok(VaultImage {
        bytes,
        file_name: vault_file_name(&checksum),
        payload,
    })
}
