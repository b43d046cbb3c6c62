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

//! Chunkpress is the compression stage of a log-forwarding pipeline.
//!
//! The host pipeline buffers serialized records into chunks and uploads
//! them to object storage; chunkpress owns the step in between, turning
//! one chunk into one destination file. Compressors are selected by
//! configuration and constructed explicitly, then injected into the
//! host's upload path.
//!
//! The in-process compressors (text, gzip, zstd) transform the chunk
//! themselves. The Parquet compressor delegates to the external
//! `columnify` columnar conversion tool, which is probed at construction
//! time so that a missing tool is a configuration error rather than a
//! per-flush failure.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use chunkpress::{create_compressor, CompressorConfig, CompressorKind, MemoryChunk};
//!
//! // Select the compressor the way a host would, from its `store_as` option.
//! let config = CompressorConfig::default().with_store_as(CompressorKind::Gzip);
//! let compressor = create_compressor(&config).unwrap();
//!
//! let chunk = MemoryChunk::from(&b"{\"msg\":\"hello\"}\n"[..]);
//! let dest = Path::new("chunk-0001").with_extension(compressor.ext());
//! compressor.compress(&chunk, &dest).unwrap();
//! ```

pub mod chunk;
pub mod compression;
pub mod error;

// Re-exports for a cleaner API
pub use chunk::{Chunk, FileChunk, MemoryChunk};
pub use compression::{create_compressor, Compressor, CompressorConfig, CompressorKind};
pub use error::{ChunkpressError, Result};
