// Copyright 2024
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Chunk abstraction for buffered record batches.
//!
//! A chunk is an ordered batch of serialized records owned by the host
//! pipeline. Compressors only borrow it for the duration of one call and
//! never retain it. The abstraction is capability-typed: a chunk either
//! already resides on stable storage (and exposes its path), or it can
//! stream its bytes into an arbitrary sink.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::Result;

/// A buffered batch of serialized records awaiting upload.
pub trait Chunk {
    /// Path of the chunk on stable storage, if it is already materialized.
    ///
    /// Compressors that need a source file use this path directly when
    /// present instead of copying the chunk through a temporary file.
    fn path(&self) -> Option<&Path>;

    /// Streams the chunk's bytes to a sink, in order.
    fn write_to(&self, sink: &mut dyn Write) -> Result<()>;
}

/// A chunk backed by a file the host buffer already wrote to disk.
#[derive(Debug)]
pub struct FileChunk {
    path: PathBuf,
}

impl FileChunk {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileChunk { path: path.into() }
    }
}

impl Chunk for FileChunk {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn write_to(&self, sink: &mut dyn Write) -> Result<()> {
        let mut file = File::open(&self.path)?;
        io::copy(&mut file, sink)?;
        Ok(())
    }
}

/// A chunk held in memory by the host buffer.
#[derive(Debug, Clone)]
pub struct MemoryChunk {
    records: Bytes,
}

impl Chunk for MemoryChunk {
    fn path(&self) -> Option<&Path> {
        None
    }

    fn write_to(&self, sink: &mut dyn Write) -> Result<()> {
        sink.write_all(&self.records)?;
        Ok(())
    }
}

impl From<Bytes> for MemoryChunk {
    fn from(records: Bytes) -> Self {
        MemoryChunk { records }
    }
}

impl From<Vec<u8>> for MemoryChunk {
    fn from(records: Vec<u8>) -> Self {
        MemoryChunk {
            records: Bytes::from(records),
        }
    }
}

impl From<&[u8]> for MemoryChunk {
    fn from(records: &[u8]) -> Self {
        MemoryChunk {
            records: Bytes::copy_from_slice(records),
        }
    }
}
