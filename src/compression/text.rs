//! Passthrough compressor for uploading chunks unmodified.

use std::fs::{self, File};
use std::path::Path;

use crate::chunk::Chunk;
use crate::compression::core::Compressor;
use crate::error::Result;

/// Writes the chunk to the destination without transformation.
///
/// Used when the host is configured to store chunks as plain text.
#[derive(Debug)]
pub struct TextCompressor;

impl TextCompressor {
    pub fn new() -> Self {
        TextCompressor
    }
}

impl Default for TextCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for TextCompressor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn ext(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn compress(&self, chunk: &dyn Chunk, dest: &Path) -> Result<()> {
        if let Some(path) = chunk.path() {
            // Already materialized, plain file copy is enough.
            fs::copy(path, dest)?;
            return Ok(());
        }

        let mut file = File::create(dest)?;
        chunk.write_to(&mut file)?;
        Ok(())
    }
}
