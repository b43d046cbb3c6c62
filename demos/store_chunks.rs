use std::fs;
use std::path::Path;

use chunkpress::compression::{ParquetCompressor, ParquetConfig, RecordType, SchemaType};
use chunkpress::{create_compressor, Compressor, CompressorConfig, CompressorKind, MemoryChunk};

fn main() -> chunkpress::error::Result<()> {
    // Store a chunk with the default compressor (gzip)
    gzip_example()?;

    // Store a chunk unmodified
    text_example()?;

    // Store a chunk with zstd
    #[cfg(feature = "zstd")]
    zstd_example()?;

    // Convert a chunk to Parquet, if the conversion tool is installed
    parquet_example()?;

    println!("All examples completed successfully!");
    Ok(())
}

// Builds a small chunk of JSONL log records, the shape a host buffer
// would hand to the compression stage.
fn sample_chunk() -> MemoryChunk {
    let mut records = Vec::new();
    for i in 0..100 {
        records.extend_from_slice(
            format!("{{\"seq\":{},\"level\":\"info\",\"msg\":\"request {} handled\"}}\n", i, i)
                .as_bytes(),
        );
    }
    MemoryChunk::from(records)
}

fn store_with(config: &CompressorConfig) -> chunkpress::error::Result<()> {
    let compressor = create_compressor(config)?;

    let chunk = sample_chunk();
    let dest = Path::new("chunk-0001").with_extension(compressor.ext());

    compressor.compress(&chunk, &dest)?;

    println!(
        "Stored chunk as {} ({} bytes, content type {})",
        dest.display(),
        fs::metadata(&dest)?.len(),
        compressor.content_type()
    );
    Ok(())
}

fn gzip_example() -> chunkpress::error::Result<()> {
    println!("Running gzip example...");
    store_with(&CompressorConfig::default())
}

fn text_example() -> chunkpress::error::Result<()> {
    println!("Running text example...");
    store_with(&CompressorConfig::default().with_store_as(CompressorKind::Text))
}

#[cfg(feature = "zstd")]
fn zstd_example() -> chunkpress::error::Result<()> {
    println!("Running zstd example...");
    store_with(&CompressorConfig::default().with_store_as(CompressorKind::Zstd))
}

fn parquet_example() -> chunkpress::error::Result<()> {
    println!("Running parquet example...");

    // One string field named "msg", enough for columnify to chew on.
    let schema = r#"{"type":"record","name":"log","fields":[{"name":"msg","type":"string"}]}"#;
    fs::write("logs.avsc", schema)?;

    let config = ParquetConfig::new(SchemaType::Avro, "logs.avsc", RecordType::Jsonl);

    // Construction probes for the columnify binary on PATH.
    let compressor = match ParquetCompressor::new(config) {
        Ok(compressor) => compressor,
        Err(e) => {
            println!("Skipping parquet example: {}", e);
            return Ok(());
        }
    };

    let chunk = MemoryChunk::from(&b"{\"msg\":\"hello columnar world\"}\n"[..]);
    let dest = Path::new("chunk-0001").with_extension(compressor.ext());

    compressor.compress(&chunk, &dest)?;

    println!(
        "Converted chunk to {} ({} bytes)",
        dest.display(),
        fs::metadata(&dest)?.len()
    );
    Ok(())
}
