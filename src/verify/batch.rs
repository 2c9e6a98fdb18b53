//! Concurrent verification of files on disk

use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{info, warn};

use super::{verify, Verdict};

/// Outcome for one path. `Err` carries the I/O failure text.
#[derive(Debug)]
pub struct FileVerdict {
    pub path: PathBuf,
    pub outcome: Result<Verdict, String>,
}

impl FileVerdict {
    pub fn is_ok(&self) -> bool {
        matches!(&self.outcome, Ok(verdict) if verdict.is_ok())
    }
}

async fn verify_file(path: &Path) -> FileVerdict {
    let outcome = match tokio::fs::read(path).await {
        Ok(bytes) => Ok(verify(&bytes)),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            Err(e.to_string())
        }
    };
    FileVerdict {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Verify every path concurrently. Results keep the input order.
pub async fn verify_paths(paths: &[PathBuf]) -> Vec<FileVerdict> {
    let verdicts = join_all(paths.iter().map(|path| verify_file(path))).await;
    let passed = verdicts.iter().filter(|v| v.is_ok()).count();
    info!("Verified {}/{} file(s)", passed, verdicts.len());
    verdicts
}
