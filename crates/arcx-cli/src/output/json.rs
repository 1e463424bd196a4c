//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use arcx_core::ContainerKind;
use arcx_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    format: &'static str,
    output_dir: String,
    files_extracted: usize,
    directories_created: usize,
    pages_rendered: usize,
    bytes_written: u64,
    duration_ms: u128,
}

#[derive(Serialize)]
struct ProbeOutput {
    source: String,
    format: &'static str,
    protected: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        kind: ContainerKind,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        let data = ExtractionOutput {
            format: kind.name(),
            output_dir: output_dir.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            pages_rendered: report.pages_rendered,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_probe_result(
        &self,
        source: &Path,
        kind: ContainerKind,
        protected: bool,
    ) -> Result<()> {
        let data = ProbeOutput {
            source: source.display().to_string(),
            format: kind.name(),
            protected,
        };

        Self::output(&JsonOutput::success("probe", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_output_structure() {
        let output = JsonOutput::success(
            "probe",
            ProbeOutput {
                source: "a.zip".into(),
                format: "zip",
                protected: true,
            },
        );

        let json: serde_json::Value = serde_json::to_value(&output).unwrap();
        assert_eq!(json["operation"], "probe");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["protected"], true);
        assert_eq!(json["data"]["format"], "zip");
    }
}
