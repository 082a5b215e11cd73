//! Error types for mount-probe
//!
//! This module defines the error hierarchy for the prober:
//! - Mount table errors (static table and live listing)
//! - Configuration and CLI errors
//! - Report output errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Per-mount-point I/O failures are never errors: they are absorbed into
//!   the probe outcome and surface as failure metrics
//! - Only enumeration-fatal and output-fatal errors terminate the process

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the mount-probe application
#[derive(Error, Debug)]
pub enum ProberError {
    /// Mount table errors
    #[error("Mount table error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report output errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Mount table enumeration errors
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    /// Static mount table could not be read
    #[error("Failed to read mount table '{path}': {reason}")]
    TableUnreadable { path: PathBuf, reason: String },

    /// Static mount table entry is malformed
    #[error("Malformed entry at {path}:{line}: {reason}")]
    MalformedEntry {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The mount-listing command could not be run
    #[error("Failed to list mounted filesystems: {reason}")]
    ListFailed { reason: String },

    /// Both mount table sources failed, so no mount point can be determined
    #[error("No usable mount table source: static table: {static_reason}; live table: {live_reason}")]
    NoMountSources {
        static_reason: String,
        live_reason: String,
    },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid per-probe timeout
    #[error("Invalid timeout {millis}ms: must be between 1 and {max}")]
    InvalidTimeout { millis: u64, max: u64 },

    /// Invalid marker file name
    #[error("Invalid marker file name '{name}': {reason}")]
    InvalidMarkerName { name: String, reason: String },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Report output errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to create the report file
    #[error("Failed to create report file '{path}': {reason}")]
    Create { path: PathBuf, reason: String },

    /// Failed to write the report
    #[error("Failed to write metrics report: {reason}")]
    Write { reason: String },
}

/// Result type alias for ProberError
pub type Result<T> = std::result::Result<T, ProberError>;
