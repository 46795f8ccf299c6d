//! Result document output
//!
//! Provides the reconstruction result document, exporters for each output
//! format, and an atomic file writer.
//!
//! The result file is written only once the whole log has been consumed:
//! the document is serialized in memory, written to a temporary file in the
//! target directory, then renamed into place. A crashed run never leaves a
//! partial result behind.

pub mod json;
pub mod text;

use crate::config::OutputConfig;
use crate::error::OutputError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reconstructed sentences plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionResult {
    /// Name of the input log
    pub source: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub generated_at: DateTime<Utc>,
    pub sentences: Vec<String>,
}

impl ReconstructionResult {
    /// Create a result stamped with the current time
    pub fn new(source: impl Into<String>, sentences: Vec<String>) -> Self {
        Self::with_timestamp(source, sentences, Utc::now())
    }

    pub fn with_timestamp(
        source: impl Into<String>,
        sentences: Vec<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            generated_at,
            sentences,
        }
    }
}

/// ISO-8601 UTC with a trailing `Z`
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Identifier recorded as a result's `source`: the file name of the input
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON document with source, timestamp and sentences
    #[default]
    Json,
    /// Plain text, one sentence per line
    #[serde(alias = "txt")]
    Text,
}

impl ExportFormat {
    /// Parse format from string name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "text" | "txt" => Some(ExportFormat::Text),
            _ => None,
        }
    }

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Indent JSON output
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Trait for result exporters
pub trait Exporter: Send + Sync {
    /// Export a result to a string
    fn export(
        &self,
        result: &ReconstructionResult,
        options: &ExportOptions,
    ) -> Result<String, OutputError>;
}

/// Export a result to a string in the specified format
pub fn export_result(
    result: &ReconstructionResult,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String, OutputError> {
    let exporter: Box<dyn Exporter> = match format {
        ExportFormat::Json => Box::new(json::JsonExporter),
        ExportFormat::Text => Box::new(text::TextExporter),
    };

    exporter.export(result, options)
}

/// Writes result documents to disk
///
/// Built from an explicit [`OutputConfig`]; nothing about the destination
/// is process-global.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    /// `None` writes next to the input log
    directory: Option<PathBuf>,
    file_prefix: String,
    format: ExportFormat,
    options: ExportOptions,
}

impl ResultWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.resolve_directory(),
            file_prefix: config.file_prefix.clone(),
            format: config.format,
            options: ExportOptions {
                pretty: config.pretty,
            },
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Serialize a result without writing it
    pub fn render(&self, result: &ReconstructionResult) -> Result<String, OutputError> {
        export_result(result, self.format, &self.options)
    }

    /// Directory a result for `input` will be written to
    pub fn target_dir(&self, input: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    /// File name for a result, derived from its timestamp
    ///
    /// e.g. `parsed_keystrokes_20250101T120000.000000.json`
    pub fn file_name(&self, result: &ReconstructionResult) -> String {
        format!(
            "{}_{}.{}",
            self.file_prefix,
            result.generated_at.format("%Y%m%dT%H%M%S%.6f"),
            self.format.extension()
        )
    }

    /// Write the result for `input` and return the path written
    pub fn write(
        &self,
        result: &ReconstructionResult,
        input: &Path,
    ) -> Result<PathBuf, OutputError> {
        let contents = self.render(result)?;
        let dir = self.target_dir(input);
        let path = dir.join(self.file_name(result));

        std::fs::create_dir_all(&dir).map_err(|source| OutputError::Write {
            path: dir.clone(),
            source,
        })?;

        write_atomic(&path, contents.as_bytes())?;
        tracing::debug!("Wrote {} bytes to {:?}", contents.len(), path);

        Ok(path)
    }
}

/// Write `contents` to `path` via a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_result() -> ReconstructionResult {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        ReconstructionResult::with_timestamp(
            "activity_1700000000.json",
            vec!["Hello there".to_string(), "second line".to_string()],
            ts,
        )
    }

    fn make_writer(directory: &str, format: ExportFormat) -> ResultWriter {
        ResultWriter::new(&OutputConfig {
            directory: directory.to_string(),
            format,
            ..OutputConfig::default()
        })
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("TXT"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::parse("text"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::parse("yaml"), None);
    }

    #[test]
    fn test_timestamp_serialization() {
        let value = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(value["generated_at"], "2025-01-02T03:04:05.000000Z");
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(Path::new("/var/log/keys/a.json")), "a.json");
        assert_eq!(source_name(Path::new("b.jsonl")), "b.jsonl");
    }

    #[test]
    fn test_file_name() {
        let writer = make_writer("auto", ExportFormat::Json);
        assert_eq!(
            writer.file_name(&sample_result()),
            "parsed_keystrokes_20250102T030405.000000.json"
        );

        let writer = make_writer("auto", ExportFormat::Text);
        assert!(writer.file_name(&sample_result()).ends_with(".txt"));
    }

    #[test]
    fn test_target_dir_auto_uses_input_parent() {
        let writer = make_writer("auto", ExportFormat::Json);
        assert_eq!(
            writer.target_dir(Path::new("/data/logs/a.json")),
            PathBuf::from("/data/logs")
        );
        assert_eq!(writer.target_dir(Path::new("a.json")), PathBuf::from("."));
    }

    #[test]
    fn test_target_dir_explicit() {
        let writer = make_writer("/srv/out", ExportFormat::Json);
        assert_eq!(
            writer.target_dir(Path::new("/data/logs/a.json")),
            PathBuf::from("/srv/out")
        );
    }

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("results");
        let writer = make_writer(out_dir.to_str().unwrap(), ExportFormat::Json);

        let path = writer
            .write(&sample_result(), Path::new("activity.json"))
            .unwrap();
        assert_eq!(path.parent().unwrap(), out_dir);

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: ReconstructionResult = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, sample_result());

        // Only the final file remains, no temporaries
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        std::fs::write(&path, "old contents that are longer").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
