//! Checks software packages against lists of known vulnerabilities.
//!
//! A list entry pairs a package pattern with a vulnerability type and an
//! advisory URL. Patterns match package identifiers (`name-version`) exactly,
//! by shell glob, or by version range, with `{a,b}` alternation over all of
//! these. See [`pattern`] for the matching rules.

pub mod checker;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod output;
pub mod pattern;
pub mod vlist;

pub use checker::Checker;
pub use config::Config;
pub use error::{Result, YvcError};
pub use model::{CheckReport, Finding, PackageId, Vulnerability};
pub use pattern::matches;
