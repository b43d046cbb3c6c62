pub(crate) mod core;

mod gzip;
mod parquet;
mod text;

#[cfg(feature = "zstd")]
mod zstd;


pub use core::{create_compressor, Compressor, CompressorConfig, CompressorKind};
pub use gzip::GzipCompressor;
pub use parquet::{ParquetCompressor, ParquetConfig, RecordType, SchemaType, DEFAULT_TOOL};
pub use text::TextCompressor;
#[cfg(feature = "zstd")]
pub use zstd::ZstdCompressor;
