use std::io::{self, Write};

use crate::model::Finding;

/// Formats a finding the way yvc has always reported it:
///
/// ```text
/// Package pine-4.20 has a remote-root-shell S1 vulnerability, see: ftp://...
/// ```
pub fn format_finding(finding: &Finding) -> String {
    let vulnerability = &finding.vulnerability;
    let severity = vulnerability
        .severity
        .as_deref()
        .map(|s| format!(" {}", s))
        .unwrap_or_default();

    format!(
        "Package {} has a {}{} vulnerability, see: {}",
        finding.package, vulnerability.vuln_type, severity, vulnerability.url
    )
}

pub fn write_findings<W: Write>(out: &mut W, findings: &[Finding]) -> io::Result<()> {
    for finding in findings {
        writeln!(out, "{}", format_finding(finding))?;
    }
    Ok(())
}
