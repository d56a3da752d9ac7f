use crate::model::{CheckReport, Finding};
use anyhow::Result;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Type")]
    vuln_type: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Finding> for FindingRow {
    fn from(finding: &Finding) -> Self {
        Self {
            package: finding.package.clone(),
            vuln_type: finding.vulnerability.vuln_type.clone(),
            severity: finding
                .vulnerability
                .severity
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            url: finding.vulnerability.url.clone(),
        }
    }
}

pub fn write_table<W: Write>(out: &mut W, report: &CheckReport) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Check completed at: {}",
        report.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    if report.findings.is_empty() {
        writeln!(out, "No vulnerabilities found.")?;
    } else {
        writeln!(out, "Found {} vulnerabilities:", report.findings.len())?;
        writeln!(out)?;
        writeln!(out, "{}", render(&report.findings))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Summary: {} packages checked, {} vulnerable",
        report.packages_checked,
        report.vulnerable_packages()
    )?;

    Ok(())
}

fn render(findings: &[Finding]) -> String {
    let rows: Vec<FindingRow> = findings.iter().map(FindingRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
