//! IB Vault
//! 
//! Self-verifying questionnaire results:
//! - Deterministic civic-orientation classifier
//! - Canonical payload with a SHA-256 checksum
//! - PNG `tEXt` embedding that survives file copies
//! - Verification by recomputation, never by trusting embedded text

pub mod classify;
pub mod config;
pub mod container;
pub mod export;
pub mod payload;
pub mod questionnaire;
pub mod utils;
pub mod verify;

// Re-exports for convenience
pub use classify::{classify, Analysis};
pub use config::{ConfigManager, VaultConfig};
pub use export::{export_vault_image, CardRasterizer, Rasterizer, VaultImage};
pub use payload::{build_payload, Payload};
pub use questionnaire::AnswerSet;
pub use verify::{verify, verify_paths, Verdict};
