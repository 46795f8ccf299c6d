//! Plain text exporter for reconstruction results

use crate::error::OutputError;
use crate::output::{ExportOptions, Exporter, ReconstructionResult};

/// Plain text exporter, one sentence per line
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(
        &self,
        result: &ReconstructionResult,
        _options: &ExportOptions,
    ) -> Result<String, OutputError> {
        let mut output = String::new();
        for sentence in &result.sentences {
            output.push_str(sentence);
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_export() {
        let result = ReconstructionResult::new(
            "activity.json",
            vec!["Hello".to_string(), "  spaced ".to_string()],
        );
        let output = TextExporter
            .export(&result, &ExportOptions::default())
            .unwrap();
        assert_eq!(output, "Hello\n  spaced \n");
    }

    #[test]
    fn test_text_export_empty() {
        let result = ReconstructionResult::new("activity.json", vec![]);
        let output = TextExporter
            .export(&result, &ExportOptions::default())
            .unwrap();
        assert!(output.is_empty());
    }
}
