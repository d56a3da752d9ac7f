//! Vulnerability list files.
//!
//! One vulnerability per line, whitespace separated:
//!
//! ```text
//! # pattern           type               url                                   [severity]
//! cfengine<1.5.3nb3   remote-root-shell  ftp://ftp.NetBSD.org/.../SA2000-013   S1
//! php>=5<5.1.0        inject-smtp-headers http://cve.mitre.org/...CAN-2005-3883
//! ```
//!
//! The pattern starts in the first column. Lines starting with `#` are
//! comments. Anything after the URL is the severity.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, YvcError};
use crate::model::Vulnerability;

/// Parses a single list line; `None` for comments, blank or malformed lines.
///
/// ```
/// use yvc::vlist::parse_line;
///
/// let v = parse_line("pine<=4.21  remote-root-shell  ftp://ftp.FreeBSD.org/SA-00:59.pine.asc").unwrap();
/// assert_eq!(v.pattern, "pine<=4.21");
/// assert_eq!(v.severity, None);
/// ```
pub fn parse_line(line: &str) -> Option<Vulnerability> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.starts_with(|c: char| c == '#' || c.is_whitespace()) {
        return None;
    }

    let (pattern, rest) = next_field(line)?;
    if pattern.contains('#') {
        return None;
    }
    let (vuln_type, rest) = next_field(rest)?;
    let (url, rest) = next_field(rest)?;

    Some(Vulnerability::new(pattern, vuln_type, url, Some(rest)))
}

/// Splits the first whitespace-delimited field off `s`.
fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Parses a whole list. `source` names the list in diagnostics.
///
/// Comments and blank lines are skipped quietly; other lines that do not
/// parse are skipped with a warning.
pub fn parse_list(content: &str, source: &str) -> Vec<Vulnerability> {
    let mut vulnerabilities = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(vulnerability) => vulnerabilities.push(vulnerability),
            None => warn!(
                source,
                line = index + 1,
                entry = trimmed,
                "skipping malformed vulnerability entry"
            ),
        }
    }

    vulnerabilities
}

/// Reads and parses the list at `path`.
pub fn load_list(path: &Path) -> Result<Vec<Vulnerability>> {
    info!(path = %path.display(), "parsing vulnerability list");
    let content = fs::read_to_string(path).map_err(|e| YvcError::io(path, e))?;
    Ok(parse_list(&content, &path.display().to_string()))
}
