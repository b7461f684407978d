//! Error types for the record store
//!
//! Provides a unified error type for all store and persistence operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::Table;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("invalid {table} record: {}", FieldErrors(.errors))]
    Validation {
        table: Table,
        errors: Vec<FieldError>,
    },

    #[error("{table} id {id} not found")]
    Referential { table: Table, id: u64 },

    #[error("duplicate {table} id {id}")]
    DuplicateKey { table: Table, id: u64 },

    #[error("{table} {id} not found")]
    NotFound { table: Table, id: u64 },

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    /// Loads never fail with this; skipped lines are listed in
    /// `LoadReport::skipped` and surface here through `LoadReport::ensure_clean`.
    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] CorruptRecord),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Field errors carried by a validation failure (empty otherwise)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            StoreError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// One offending field and the validator's reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// A required field that is absent or blank
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// A persisted line that could not be turned into a record
///
/// Never fatal: the loader logs it, skips the line and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptRecord {
    pub path: PathBuf,
    /// 1-based line number within the file
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for CorruptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.reason)
    }
}

impl std::error::Error for CorruptRecord {}
