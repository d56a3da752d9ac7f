//! Core data types for vulnerabilities, packages, and check results.
//!
//! - [`Vulnerability`] - One entry of a vulnerability list
//! - [`PackageId`] - A `name-version` identifier split into its parts
//! - [`Finding`] - A package matched by a vulnerability
//! - [`CheckReport`] - Everything found during one run
//!
//! # Example
//!
//! ```
//! use yvc::{CheckReport, Finding, Vulnerability};
//!
//! let vuln = Vulnerability::new("cfengine<1.5.3nb3", "remote-root-shell", "https://example.org/SA2000-013", None);
//! assert!(vuln.matches("cfengine-1.5.2nb2"));
//!
//! let mut report = CheckReport::new();
//! report.record(vec![Finding::new("cfengine-1.5.2nb2", vuln)]);
//! assert!(report.is_vulnerable());
//! ```

mod package;
mod report;
mod vulnerability;

pub use package::*;
pub use report::*;
pub use vulnerability::*;
