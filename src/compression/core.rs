//! The compressor contract and configuration-driven selection.

use std::path::Path;
use std::str::FromStr;

use crate::chunk::Chunk;
use crate::compression::gzip::GzipCompressor;
use crate::compression::parquet::{ParquetCompressor, ParquetConfig};
use crate::compression::text::TextCompressor;
#[cfg(feature = "zstd")]
use crate::compression::zstd::ZstdCompressor;
use crate::error::{ChunkpressError, Result};

/// A pluggable transformation applied to a chunk before upload.
///
/// Implementations hold no mutable state, so one instance may be shared
/// across flush threads; concurrent calls on distinct chunks and distinct
/// destinations require no locking.
pub trait Compressor: Send + Sync + std::fmt::Debug {
    /// Identifier the host looks this compressor up under (`store_as`).
    fn name(&self) -> &'static str;

    /// File extension appended to the upload key.
    fn ext(&self) -> &'static str;

    /// Content type reported as upload metadata.
    fn content_type(&self) -> &'static str;

    /// Compresses `chunk` into the file at `dest`.
    ///
    /// The destination is truncated first. On success it contains a
    /// complete encoding of every record in the chunk; on error its
    /// contents are undefined and must not be uploaded.
    fn compress(&self, chunk: &dyn Chunk, dest: &Path) -> Result<()>;
}

/// The compressor kinds selectable through host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressorKind {
    Text,
    Gzip,
    Zstd,
    Parquet,
}

impl CompressorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressorKind::Text => "text",
            CompressorKind::Gzip => "gzip",
            CompressorKind::Zstd => "zstd",
            CompressorKind::Parquet => "parquet",
        }
    }
}

impl FromStr for CompressorKind {
    type Err = ChunkpressError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(CompressorKind::Text),
            "gzip" => Ok(CompressorKind::Gzip),
            "zstd" => Ok(CompressorKind::Zstd),
            "parquet" => Ok(CompressorKind::Parquet),
            other => Err(ChunkpressError::UnknownCompressor(other.to_string())),
        }
    }
}

/// Configuration options for compressor selection.
#[derive(Debug, Clone)]
pub struct CompressorConfig {
    /// Which compressor to construct (`store_as` in host configuration).
    pub store_as: CompressorKind,

    /// Gzip compression level (0-9).
    pub gzip_level: u32,

    /// Zstd compression level (1-22).
    pub zstd_level: i32,

    /// Options for the Parquet compressor. Required when `store_as`
    /// selects it, ignored otherwise.
    pub parquet: Option<ParquetConfig>,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            store_as: CompressorKind::Gzip,
            gzip_level: 6,
            zstd_level: 3,
            parquet: None,
        }
    }
}

impl CompressorConfig {
    pub fn with_store_as(mut self, store_as: CompressorKind) -> Self {
        self.store_as = store_as;
        self
    }

    pub fn with_parquet(mut self, parquet: ParquetConfig) -> Self {
        self.parquet = Some(parquet);
        self
    }
}

/// Constructs the compressor selected by `config`.
///
/// This is the single construction point: the host parses its `store_as`
/// option into a [`CompressorKind`], builds a [`CompressorConfig`], and
/// injects the boxed result into its upload path. Construction fails if
/// required options are missing or, for the Parquet compressor, if the
/// external conversion tool cannot be spawned.
pub fn create_compressor(config: &CompressorConfig) -> Result<Box<dyn Compressor>> {
    match config.store_as {
        CompressorKind::Text => Ok(Box::new(TextCompressor::new())),
        CompressorKind::Gzip => Ok(Box::new(GzipCompressor::with_level(config.gzip_level)?)),
        CompressorKind::Zstd => {
            #[cfg(feature = "zstd")]
            {
                Ok(Box::new(ZstdCompressor::with_level(config.zstd_level)?))
            }
            #[cfg(not(feature = "zstd"))]
            {
                Err(ChunkpressError::UnsupportedCompressor("zstd"))
            }
        }
        CompressorKind::Parquet => {
            let parquet = config
                .parquet
                .clone()
                .ok_or(ChunkpressError::MissingOptions("parquet"))?;
            Ok(Box::new(ParquetCompressor::new(parquet)?))
        }
    }
}
