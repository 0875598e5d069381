//! Error types for auditdiff operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditDiffError>;

#[derive(Error, Debug)]
pub enum AuditDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input nested deeper than {depth} levels (cyclic or runaway input?)")]
    CyclicInput { depth: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input file: {path}")]
    InvalidInputFile { path: PathBuf },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl AuditDiffError {
    pub fn cyclic_input(depth: usize) -> Self {
        Self::CyclicInput { depth }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
