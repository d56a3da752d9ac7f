use serde::{Deserialize, Serialize};

use crate::pattern;

/// A known vulnerability: which packages it affects and where to read more.
///
/// `pattern` is written in the pattern language described in
/// [`crate::pattern`]. `vuln_type` is a free-form category such as
/// `remote-root-shell`, and `severity` is an optional, organization-specific
/// urgency tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vulnerability {
    pub pattern: String,
    #[serde(rename = "type")]
    pub vuln_type: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl Vulnerability {
    /// Builds a vulnerability from already split fields. The severity is
    /// trimmed; a blank severity is treated as absent.
    pub fn new(
        pattern: impl Into<String>,
        vuln_type: impl Into<String>,
        url: impl Into<String>,
        severity: Option<&str>,
    ) -> Self {
        let severity = severity
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Self {
            pattern: pattern.into(),
            vuln_type: vuln_type.into(),
            url: url.into(),
            severity,
        }
    }

    /// Whether the `name-version` identifier is covered by this vulnerability.
    pub fn matches(&self, identifier: &str) -> bool {
        pattern::matches(&self.pattern, identifier)
    }
}

/// A package found to be affected by a vulnerability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The package as given by the user, path included.
    pub package: String,
    #[serde(flatten)]
    pub vulnerability: Vulnerability,
}

impl Finding {
    pub fn new(package: impl Into<String>, vulnerability: Vulnerability) -> Self {
        Self {
            package: package.into(),
            vulnerability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_severity() {
        let v = Vulnerability::new("foo<1", "dos", "http://example.org", Some("  S1\n"));
        assert_eq!(v.severity.as_deref(), Some("S1"));

        let v = Vulnerability::new("foo<1", "dos", "http://example.org", Some("   "));
        assert_eq!(v.severity, None);

        let v = Vulnerability::new("foo<1", "dos", "http://example.org", None);
        assert_eq!(v.severity, None);
    }

    #[test]
    fn test_exact_vulnerability_match() {
        let v = Vulnerability::new("foo-1.2", "local-root-shell", "http://www.nowhere.com", None);
        assert!(v.matches("foo-1.2"));
        assert!(!v.matches("foo-2.1"));
    }

    #[test]
    fn test_finding_serializes_flat() {
        let v = Vulnerability::new("foo<1", "dos", "http://example.org", Some("high"));
        let finding = Finding::new("pkgs/foo-0.9", v);
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["package"], "pkgs/foo-0.9");
        assert_eq!(json["pattern"], "foo<1");
        assert_eq!(json["type"], "dos");
        assert_eq!(json["severity"], "high");
    }
}
