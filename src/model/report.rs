use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Finding;

/// Everything found during one run over a set of packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub checked_at: DateTime<Utc>,
    pub packages_checked: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self {
            checked_at: Utc::now(),
            packages_checked: 0,
            findings: Vec::new(),
        }
    }

    /// Records one checked package and whatever was found for it.
    pub fn record(&mut self, findings: Vec<Finding>) {
        self.packages_checked += 1;
        self.findings.extend(findings);
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Number of distinct packages with at least one finding.
    pub fn vulnerable_packages(&self) -> usize {
        let mut packages: Vec<&str> = self.findings.iter().map(|f| f.package.as_str()).collect();
        packages.sort_unstable();
        packages.dedup();
        packages.len()
    }
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}
