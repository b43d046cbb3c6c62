//! Zstd compression for chunk uploads, using the zstd-rs crate.

use std::fs::File;
use std::path::Path;

use crate::chunk::Chunk;
use crate::compression::core::Compressor;
use crate::error::{ChunkpressError, Result};

/// Zstd compressor implementation.
///
/// The compression level can be configured during creation.
#[derive(Debug)]
pub struct ZstdCompressor {
    /// Compression level (1-22, higher = better compression but slower)
    level: i32,
}

impl ZstdCompressor {
    /// Create a new ZstdCompressor with the default compression level.
    pub fn new() -> Self {
        ZstdCompressor { level: 3 }
    }

    /// Create a new ZstdCompressor with specified compression level.
    ///
    /// # Arguments
    /// * `level` - Compression level (1-22). Higher values provide better compression but are slower.
    pub fn with_level(level: i32) -> Result<Self> {
        if !(1..=22).contains(&level) {
            return Err(ChunkpressError::Other(format!(
                "Invalid zstd compression level: {}. Must be between 1 and 22.",
                level
            )));
        }

        Ok(ZstdCompressor { level })
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn ext(&self) -> &'static str {
        "zst"
    }

    fn content_type(&self) -> &'static str {
        "application/x-zst"
    }

    fn compress(&self, chunk: &dyn Chunk, dest: &Path) -> Result<()> {
        let file = File::create(dest)?;
        let mut encoder = zstd::stream::write::Encoder::new(file, self.level)?;

        chunk.write_to(&mut encoder)?;
        encoder.finish()?;

        Ok(())
    }
}
