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

//! Integration tests for the Parquet adapter.
//!
//! The real conversion tool is replaced with stub shell scripts so the
//! tests can observe the adapter's side of the contract: which source
//! path it hands the tool, whether temporary files are created and
//! removed, how stdout is bound to the destination, and how failures
//! surface.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use chunkpress::compression::{ParquetCompressor, ParquetConfig, RecordType, SchemaType};
use chunkpress::{ChunkpressError, Compressor, FileChunk, MemoryChunk};

/// Writes an executable stub conversion tool into `dir`.
fn write_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).expect("Failed to write stub tool");

    let mut perms = fs::metadata(&path)
        .expect("Failed to stat stub tool")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to mark stub tool executable");

    path
}

/// A stub that records its argument vector, one argument per line, into
/// `args_out`, then copies its last argument (the source file) to stdout.
fn recording_tool(dir: &Path, args_out: &Path) -> PathBuf {
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" > '{}'\n\
         for last; do :; done\n\
         cat \"$last\"\n",
        args_out.display()
    );
    write_tool(dir, "columnify-stub", &script)
}

/// A stub that records its arguments, prints a diagnostic, and fails.
fn failing_tool(dir: &Path, args_out: &Path) -> PathBuf {
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" > '{}'\n\
         echo 'schema mismatch' >&2\n\
         exit 3\n",
        args_out.display()
    );
    write_tool(dir, "columnify-failing", &script)
}

fn recorded_args(args_out: &Path) -> Vec<String> {
    fs::read_to_string(args_out)
        .expect("Stub tool never ran")
        .lines()
        .map(str::to_string)
        .collect()
}

fn stub_config(dir: &Path, tool: &Path) -> ParquetConfig {
    let schema_file = dir.join("logs.avsc");
    fs::write(&schema_file, b"{\"type\":\"record\"}").expect("Failed to write schema file");

    ParquetConfig::new(SchemaType::Avro, schema_file, RecordType::Jsonl).with_tool(tool)
}

#[test]
fn test_file_backed_chunk_is_converted_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let data = b"{\"seq\":1}\n{\"seq\":2}\n";
    let src = dir.path().join("buffer-chunk");
    fs::write(&src, data).unwrap();

    let compressor = ParquetCompressor::new(stub_config(dir.path(), &tool)).unwrap();
    let dest = dir.path().join("chunk.parquet");

    compressor.compress(&FileChunk::new(&src), &dest).unwrap();

    // The tool's stdout landed in the destination.
    assert_eq!(fs::read(&dest).unwrap(), data);

    // The source argument is the chunk's own path: no temporary copy.
    let args = recorded_args(&args_out);
    assert_eq!(args.last().unwrap(), &src.display().to_string());
}

#[test]
fn test_memory_chunk_goes_through_a_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let data = b"{\"seq\":1}\n{\"seq\":2}\n{\"seq\":3}\n";
    let compressor = ParquetCompressor::new(stub_config(dir.path(), &tool)).unwrap();
    let dest = dir.path().join("chunk.parquet");

    compressor
        .compress(&MemoryChunk::from(&data[..]), &dest)
        .unwrap();

    // The chunk's bytes reached the tool byte-for-byte through the
    // materialized source file.
    assert_eq!(fs::read(&dest).unwrap(), data);

    // The source was a scoped temporary file, gone once the call returned.
    let args = recorded_args(&args_out);
    let src = PathBuf::from(args.last().unwrap());
    let file_name = src.file_name().unwrap().to_string_lossy();
    assert!(
        file_name.starts_with("chunk-parquet-"),
        "Unexpected source file name: {}",
        file_name
    );
    assert!(!src.exists(), "Temporary source file was not removed");
}

#[test]
fn test_argument_vector_shape() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let config = stub_config(dir.path(), &tool);
    let schema_file = config.schema_file.clone();
    let compressor = ParquetCompressor::new(config).unwrap();

    let src = dir.path().join("buffer-chunk");
    fs::write(&src, b"{}\n").unwrap();
    let dest = dir.path().join("chunk.parquet");

    compressor.compress(&FileChunk::new(&src), &dest).unwrap();

    let args = recorded_args(&args_out);
    assert_eq!(
        args,
        vec![
            "-schemaType".to_string(),
            "avro".to_string(),
            "-schemaFile".to_string(),
            schema_file.display().to_string(),
            "-recordType".to_string(),
            "jsonl".to_string(),
            src.display().to_string(),
        ]
    );
}

#[test]
fn test_tuning_flags_are_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let config = stub_config(dir.path(), &tool)
        .with_page_size(8 * 1024)
        .with_row_group_size(128 * 1024 * 1024)
        .with_compression_codec("SNAPPY");
    let compressor = ParquetCompressor::new(config).unwrap();

    let src = dir.path().join("buffer-chunk");
    fs::write(&src, b"{}\n").unwrap();
    compressor
        .compress(&FileChunk::new(&src), &dir.path().join("chunk.parquet"))
        .unwrap();

    let args = recorded_args(&args_out);
    let joined = args.join(" ");
    assert!(joined.contains("-parquetPageSize 8192"));
    assert!(joined.contains("-parquetRowGroupSize 134217728"));
    assert!(joined.contains("-parquetCompressionCodec SNAPPY"));
}

#[test]
fn test_missing_tool_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), Path::new("/nonexistent/columnify"));

    let err = ParquetCompressor::new(config).unwrap_err();
    assert!(matches!(err, ChunkpressError::ToolUnavailable { .. }));
}

#[test]
fn test_failing_tool_surfaces_conversion_error() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = failing_tool(dir.path(), &args_out);

    let compressor = ParquetCompressor::new(stub_config(dir.path(), &tool)).unwrap();
    let dest = dir.path().join("chunk.parquet");

    let err = compressor
        .compress(&MemoryChunk::from(&b"{}\n"[..]), &dest)
        .unwrap_err();

    match err {
        ChunkpressError::ConversionFailed { status, stderr } => {
            assert_eq!(status.code(), Some(3));
            assert!(stderr.contains("schema mismatch"));
        }
        other => panic!("Expected ConversionFailed, got: {:?}", other),
    }

    // The temporary source file is removed on the failure path too.
    let args = recorded_args(&args_out);
    let src = PathBuf::from(args.last().unwrap());
    assert!(!src.exists(), "Temporary source file leaked on failure");
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let compressor = ParquetCompressor::new(stub_config(dir.path(), &tool)).unwrap();
    let chunk = MemoryChunk::from(&b"{\"seq\":1}\n"[..]);
    let dest = dir.path().join("chunk.parquet");

    compressor.compress(&chunk, &dest).unwrap();
    let first = fs::read(&dest).unwrap();

    compressor.compress(&chunk, &dest).unwrap();
    let second = fs::read(&dest).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_stale_destination_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let args_out = dir.path().join("args.txt");
    let tool = recording_tool(dir.path(), &args_out);

    let compressor = ParquetCompressor::new(stub_config(dir.path(), &tool)).unwrap();
    let dest = dir.path().join("chunk.parquet");

    let mut stale = fs::File::create(&dest).unwrap();
    stale
        .write_all(b"leftover bytes from an earlier, longer flush")
        .unwrap();
    drop(stale);

    let data = b"{\"seq\":1}\n";
    compressor
        .compress(&MemoryChunk::from(&data[..]), &dest)
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), data);
}
