//! Parquet compression by delegating to the external `columnify` tool.
//!
//! Unlike the in-process compressors, Parquet conversion needs a schema
//! and a record-format description, and is performed by a separate
//! columnar conversion command. This module owns the full adapter
//! contract: validated configuration, a construction-time probe for the
//! tool, source materialization, and a single child process per call with
//! its stdout bound to the destination file.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

use log::{debug, warn};

use crate::chunk::Chunk;
use crate::compression::core::Compressor;
use crate::error::{ChunkpressError, Result};

/// Name of the conversion tool, resolved on PATH unless overridden.
pub const DEFAULT_TOOL: &str = "columnify";

/// Schema description formats accepted by the conversion tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Avro,
    Bigquery,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Avro => "avro",
            SchemaType::Bigquery => "bigquery",
        }
    }
}

impl FromStr for SchemaType {
    type Err = ChunkpressError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avro" => Ok(SchemaType::Avro),
            "bigquery" => Ok(SchemaType::Bigquery),
            other => Err(ChunkpressError::UnknownSchemaType(other.to_string())),
        }
    }
}

/// Record serialization formats accepted by the conversion tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Avro,
    Csv,
    Jsonl,
    Ltsv,
    Msgpack,
    Tsv,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Avro => "avro",
            RecordType::Csv => "csv",
            RecordType::Jsonl => "jsonl",
            RecordType::Ltsv => "ltsv",
            RecordType::Msgpack => "msgpack",
            RecordType::Tsv => "tsv",
        }
    }
}

impl FromStr for RecordType {
    type Err = ChunkpressError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avro" => Ok(RecordType::Avro),
            "csv" => Ok(RecordType::Csv),
            "jsonl" => Ok(RecordType::Jsonl),
            "ltsv" => Ok(RecordType::Ltsv),
            "msgpack" => Ok(RecordType::Msgpack),
            "tsv" => Ok(RecordType::Tsv),
            other => Err(ChunkpressError::UnknownRecordType(other.to_string())),
        }
    }
}

/// Configuration options for the Parquet compressor.
///
/// The three required fields mirror the conversion tool's required flags.
/// Tags are closed enums, so invalid configuration is rejected when the
/// host parses it, before a compressor is ever constructed.
#[derive(Debug, Clone)]
pub struct ParquetConfig {
    /// Schema description format (`-schemaType`).
    pub schema_type: SchemaType,

    /// Path to the schema file (`-schemaFile`).
    pub schema_file: PathBuf,

    /// Record serialization format of the chunk data (`-recordType`).
    pub record_type: RecordType,

    /// The conversion command. Defaults to [`DEFAULT_TOOL`] on PATH.
    pub tool: PathBuf,

    /// Parquet page size in bytes (`-parquetPageSize`), tool default when unset.
    pub page_size: Option<i64>,

    /// Parquet row group size in bytes (`-parquetRowGroupSize`), tool default when unset.
    pub row_group_size: Option<i64>,

    /// Parquet compression codec (`-parquetCompressionCodec`), tool default when unset.
    pub compression_codec: Option<String>,
}

impl ParquetConfig {
    pub fn new(
        schema_type: SchemaType,
        schema_file: impl Into<PathBuf>,
        record_type: RecordType,
    ) -> Self {
        ParquetConfig {
            schema_type,
            schema_file: schema_file.into(),
            record_type,
            tool: PathBuf::from(DEFAULT_TOOL),
            page_size: None,
            row_group_size: None,
            compression_codec: None,
        }
    }

    /// Overrides the conversion command, e.g. with an absolute path.
    pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_page_size(mut self, bytes: i64) -> Self {
        self.page_size = Some(bytes);
        self
    }

    pub fn with_row_group_size(mut self, bytes: i64) -> Self {
        self.row_group_size = Some(bytes);
        self
    }

    pub fn with_compression_codec(mut self, codec: impl Into<String>) -> Self {
        self.compression_codec = Some(codec.into());
        self
    }
}

/// Compresses chunks into Parquet by invoking the conversion tool.
///
/// Construction probes the tool; a compressor therefore only exists when
/// the tool is present, and a missing tool is a configuration error
/// rather than a per-call failure.
#[derive(Debug)]
pub struct ParquetCompressor {
    config: ParquetConfig,
}

impl ParquetCompressor {
    pub fn new(config: ParquetConfig) -> Result<Self> {
        check_command(&config.tool, "-h")?;
        Ok(ParquetCompressor { config })
    }

    /// Runs the conversion tool over `src`, writing its stdout to `dest`.
    fn columnify(&self, src: &Path, dest: &Path) -> Result<()> {
        let out = File::create(dest)?;

        let mut cmd = Command::new(&self.config.tool);
        cmd.arg("-schemaType")
            .arg(self.config.schema_type.as_str())
            .arg("-schemaFile")
            .arg(&self.config.schema_file)
            .arg("-recordType")
            .arg(self.config.record_type.as_str());

        if let Some(page_size) = self.config.page_size {
            cmd.arg("-parquetPageSize").arg(page_size.to_string());
        }
        if let Some(row_group_size) = self.config.row_group_size {
            cmd.arg("-parquetRowGroupSize").arg(row_group_size.to_string());
        }
        if let Some(codec) = &self.config.compression_codec {
            cmd.arg("-parquetCompressionCodec").arg(codec);
        }

        cmd.arg(src);

        debug!(
            "Converting {} -> {} with {:?}",
            src.display(),
            dest.display(),
            cmd
        );

        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::from(out))
            .stderr(Stdio::piped())
            .spawn()?;
        let output = child.wait_with_output()?;

        if !output.status.success() {
            warn!("Conversion of {} failed with {}", src.display(), output.status);
            return Err(ChunkpressError::ConversionFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

impl Compressor for ParquetCompressor {
    fn name(&self) -> &'static str {
        "parquet"
    }

    fn ext(&self) -> &'static str {
        "parquet"
    }

    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn compress(&self, chunk: &dyn Chunk, dest: &Path) -> Result<()> {
        if let Some(path) = chunk.path() {
            // Chunk already resides on stable storage, convert in place.
            return self.columnify(path, dest);
        }

        // Materialize the chunk as the tool's source file. The temporary
        // file is removed when `src` drops, on every exit path.
        let mut src = tempfile::Builder::new()
            .prefix("chunk-parquet-")
            .tempfile()?;
        chunk.write_to(&mut src)?;
        src.flush()?;

        debug!("Materialized chunk at {}", src.path().display());

        self.columnify(src.path(), dest)
    }
}

/// Probes that `tool` can be spawned with the given argument.
///
/// The probe's exit status is ignored; only a spawn failure means the
/// tool is absent from the execution path.
fn check_command(tool: &Path, arg: &str) -> Result<()> {
    Command::new(tool)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|_| ())
        .map_err(|e| ChunkpressError::ToolUnavailable {
            tool: tool.display().to_string(),
            reason: e.to_string(),
        })
}
