//! Gzip compression for chunk uploads, using the flate2 crate.

use std::fs::File;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::chunk::Chunk;
use crate::compression::core::Compressor;
use crate::error::{ChunkpressError, Result};

/// Gzip compressor implementation.
///
/// The compression level can be configured during creation. This is the
/// host's default compressor.
#[derive(Debug)]
pub struct GzipCompressor {
    /// Compression level (0-9, higher = better compression but slower)
    level: u32,
}

impl GzipCompressor {
    /// Create a new GzipCompressor with the default compression level.
    pub fn new() -> Self {
        GzipCompressor { level: 6 }
    }

    /// Create a new GzipCompressor with specified compression level.
    ///
    /// # Arguments
    /// * `level` - Compression level (0-9). Higher values provide better compression but are slower.
    pub fn with_level(level: u32) -> Result<Self> {
        if level > 9 {
            return Err(ChunkpressError::Other(format!(
                "Invalid gzip compression level: {}. Must be between 0 and 9.",
                level
            )));
        }

        Ok(GzipCompressor { level })
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for GzipCompressor {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn ext(&self) -> &'static str {
        "gz"
    }

    fn content_type(&self) -> &'static str {
        "application/x-gzip"
    }

    fn compress(&self, chunk: &dyn Chunk, dest: &Path) -> Result<()> {
        let file = File::create(dest)?;
        let mut encoder = GzEncoder::new(file, Compression::new(self.level));

        chunk.write_to(&mut encoder)?;
        encoder.finish()?;

        Ok(())
    }
}
