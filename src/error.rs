//! Error types for the chunk compression stage.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// The main error type for chunkpress operations.
#[derive(Debug, Error)]
pub enum ChunkpressError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external conversion tool could not be spawned.
    ///
    /// Raised at construction time, before any compression is attempted.
    #[error("Conversion tool '{tool}' is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    /// The configured compressor name is not recognized.
    #[error("Unknown compressor: {0}")]
    UnknownCompressor(String),

    /// Unsupported compressor kind.
    #[error("chunkpress has not been compiled with support for compressor: {0}")]
    UnsupportedCompressor(&'static str),

    /// The selected compressor requires options that were not provided.
    #[error("Missing required options for compressor: {0}")]
    MissingOptions(&'static str),

    /// The configured schema type is not accepted by the conversion tool.
    #[error("Unknown schema type: {0}")]
    UnknownSchemaType(String),

    /// The configured record type is not accepted by the conversion tool.
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    /// The external conversion process exited with a failure status.
    ///
    /// The destination file's contents are undefined when this is returned.
    #[error("Conversion failed ({status}): {stderr}")]
    ConversionFailed { status: ExitStatus, stderr: String },

    /// A general error occurred.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for chunkpress operations.
pub type Result<T> = std::result::Result<T, ChunkpressError>;
