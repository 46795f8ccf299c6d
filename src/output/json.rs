//! JSON exporter for reconstruction results

use crate::error::OutputError;
use crate::output::{ExportOptions, Exporter, ReconstructionResult};

/// JSON exporter
///
/// Non-ASCII text is written as-is rather than escaped.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(
        &self,
        result: &ReconstructionResult,
        options: &ExportOptions,
    ) -> Result<String, OutputError> {
        let rendered = if options.pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };

        rendered.map_err(|e| OutputError::Serialization(e.to_string()))
    }
}
