//! Rendering check results.
//!
//! Everything is written to a caller-supplied [`Write`], normally a locked
//! stdout, so a closed pipe surfaces as an [`std::io::ErrorKind::BrokenPipe`]
//! error instead of a panic.

mod table;
mod text;

pub use table::write_table;
pub use text::{format_finding, write_findings};

use crate::model::CheckReport;
use anyhow::Result;
use std::io::Write;

/// Output format for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per finding, printed as packages are checked
    Text,
    /// JSON report for programmatic use
    Json,
    /// Human-readable table, printed once all packages are checked
    Table,
}

impl OutputFormat {
    /// Whether findings are written as they are found rather than at the end.
    pub fn is_streaming(self) -> bool {
        self == OutputFormat::Text
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Unknown format: {}. Use 'text', 'json', or 'table'",
                s
            )),
        }
    }
}

/// Writes the finished report. Text output has already been streamed, so
/// this writes nothing for [`OutputFormat::Text`].
pub fn write_result<W: Write>(out: &mut W, report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => Ok(()),
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => write_table(out, report),
    }
}

/// Pretty-printed [`CheckReport`] followed by a newline.
pub fn write_json<W: Write>(out: &mut W, report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Finding, Vulnerability};
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_only_text_streams() {
        assert!(OutputFormat::Text.is_streaming());
        assert!(!OutputFormat::Json.is_streaming());
        assert!(!OutputFormat::Table.is_streaming());
    }

    #[test]
    fn test_write_json_report() {
        let mut report = CheckReport::new();
        report.record(vec![Finding::new(
            "pine-4.20",
            Vulnerability::new("pine<=4.21", "remote-root-shell", "ftp://x/pine.asc", None),
        )]);

        let mut out = Vec::new();
        write_json(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["packages_checked"], 1);
        assert_eq!(json["findings"][0]["type"], "remote-root-shell");
        assert!(json["findings"][0].get("severity").is_none());
    }

    #[test]
    fn test_text_format_writes_nothing_at_the_end() {
        let mut out = Vec::new();
        write_result(&mut out, &CheckReport::new(), OutputFormat::Text).unwrap();
        assert!(out.is_empty());
    }
}
