//! Checking packages against loaded vulnerability lists.
//!
//! # Example
//!
//! ```
//! use yvc::{config::IgnoreConfig, Checker, Vulnerability};
//!
//! let mut checker = Checker::new(IgnoreConfig::default());
//! checker.add(Vulnerability::new(
//!     "php>=5<5.1.0",
//!     "inject-smtp-headers",
//!     "http://cve.mitre.org/cgi-bin/cvename.cgi?name=CAN-2005-3883",
//!     None,
//! ));
//!
//! let findings = checker.check_package("/usr/pkgsrc/packages/All/php-5.0.8");
//! assert_eq!(findings.len(), 1);
//! assert!(checker.check_package("php-5.1.0").is_empty());
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::IgnoreConfig;
use crate::error::Result;
use crate::model::{Finding, Vulnerability};
use crate::vlist;

/// Holds every vulnerability that survived the ignore rules.
pub struct Checker {
    vulnerabilities: Vec<Vulnerability>,
    ignore: IgnoreConfig,
}

impl Checker {
    pub fn new(ignore: IgnoreConfig) -> Self {
        Self {
            vulnerabilities: Vec::new(),
            ignore,
        }
    }

    /// Adds a vulnerability unless the ignore rules exclude it.
    /// Returns whether it was kept.
    pub fn add(&mut self, vulnerability: Vulnerability) -> bool {
        if self.ignore.should_ignore(&vulnerability) {
            debug!(
                url = %vulnerability.url,
                vuln_type = %vulnerability.vuln_type,
                "ignoring vulnerability"
            );
            return false;
        }
        self.vulnerabilities.push(vulnerability);
        true
    }

    /// Loads one list file, returning how many entries were kept.
    pub fn load_list(&mut self, path: &Path) -> Result<usize> {
        let mut kept = 0;
        for vulnerability in vlist::load_list(path)? {
            if self.add(vulnerability) {
                kept += 1;
            }
        }
        debug!(path = %path.display(), kept, "vulnerability list loaded");
        Ok(kept)
    }

    /// Loads every list in order. Stops at the first unreadable list.
    pub fn load_lists(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let mut total = 0;
        for path in paths {
            total += self.load_list(path)?;
        }
        Ok(total)
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    /// Checks one package against every vulnerability.
    ///
    /// `package` may be a path; only its last component is matched, but
    /// findings report it as given.
    pub fn check_package(&self, package: &str) -> Vec<Finding> {
        info!(package, "checking package");
        let identifier = basename(package);

        self.vulnerabilities
            .iter()
            .filter(|v| {
                debug!(package, url = %v.url, "checking against vulnerability");
                v.matches(identifier)
            })
            .map(|v| Finding::new(package, v.clone()))
            .collect()
    }

    /// Checks many packages in parallel. Results line up with the input.
    pub fn check_all<S>(&self, packages: &[S]) -> Vec<Vec<Finding>>
    where
        S: AsRef<str> + Sync,
    {
        packages
            .par_iter()
            .map(|package| self.check_package(package.as_ref()))
            .collect()
    }
}

/// Everything after the last `/`. A trailing slash leaves an empty name,
/// which matches nothing; `.` and `..` are kept as they are.
fn basename(package: &str) -> &str {
    match package.rfind('/') {
        Some(slash) => &package[slash + 1..],
        None => package,
    }
}
