//! The vulnerability pattern language.
//!
//! A pattern describes which `name-version` identifiers a vulnerability
//! affects. After brace expansion ([`expand`]) each alternative is one of:
//!
//! | Form | Example | Meaning |
//! |------|---------|---------|
//! | literal | `ap-php-4.0.4` | that exact identifier |
//! | glob | `apache-2.0.3[0-3]*` | shell-style wildcard over the identifier |
//! | simple range | `cfengine<1.5.3nb3` | name equal, version bounded |
//! | compound range | `php>=5<5.1.0` | name equal, both bounds hold |
//!
//! Ranges use the operators `<`, `<=`, `>`, `>=`, `=` and compare with
//! [`LooseVersion`]. A pattern matches if any alternative does. Malformed
//! text never panics or errors; it simply matches nothing.
//!
//! ```
//! use yvc::pattern::matches;
//!
//! assert!(matches("mozilla{,-bin}<1.7.10", "mozilla-bin-1.7.9"));
//! assert!(matches("php>=5<5.1.0", "php-5.0.8"));
//! assert!(!matches("dia>=0.87", "dialog-1.0.20050911"));
//! ```

pub mod brace;
pub mod glob;
pub mod version;

pub use brace::expand;
pub use glob::glob_match;
pub use version::{Comparator, Component, LooseVersion};

use tracing::trace;

use crate::model::PackageId;

/// Decides whether `identifier` is covered by `pattern`.
pub fn matches(pattern: &str, identifier: &str) -> bool {
    if pattern == identifier {
        return true;
    }

    let package = PackageId::parse(identifier);
    if pattern.contains('{') {
        expand(pattern)
            .iter()
            .any(|alternative| matches_alternative(alternative, &package))
    } else {
        matches_alternative(pattern, &package)
    }
}

fn matches_alternative(alternative: &str, package: &PackageId<'_>) -> bool {
    match Alternative::classify(alternative) {
        Alternative::Range(range) => range.matches(package),
        Alternative::Glob(glob) => glob_match(glob, package.as_str()),
        Alternative::Inert => {
            trace!(alternative, "malformed range expression never matches");
            false
        }
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '=' | '>')
}

/// One brace-free alternative of a pattern, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alternative<'a> {
    Range(RangePattern<'a>),
    /// No comparison operator; literal text or a wildcard.
    Glob(&'a str),
    /// Contains an operator but is not a well-formed range.
    Inert,
}

impl<'a> Alternative<'a> {
    pub fn classify(alternative: &'a str) -> Self {
        if !alternative.contains(is_operator_char) {
            return Alternative::Glob(alternative);
        }
        match RangePattern::parse(alternative) {
            Some(range) => Alternative::Range(range),
            None => Alternative::Inert,
        }
    }
}

/// `op` followed by bound text, e.g. `<1.5.3nb3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound<'a> {
    pub op: Comparator,
    pub version: &'a str,
}

impl Bound<'_> {
    fn holds(&self, name: &str, candidate: &LooseVersion) -> bool {
        let bound = LooseVersion::parse(&format!("{}-{}", name, self.version));
        let result = self.op.compare(candidate, &bound);
        trace!(candidate = %candidate, op = %self.op, bound = %bound, result, "range comparison");
        result
    }
}

/// A range alternative: a package name with one or two version bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePattern<'a> {
    pub name: &'a str,
    pub first: Bound<'a>,
    pub second: Option<Bound<'a>>,
}

impl<'a> RangePattern<'a> {
    /// Parses `name<op>bound` or `name<op>bound<op>bound`.
    ///
    /// Returns `None` when there is no operator, when the name or either
    /// bound is empty, or when more than two operators are present.
    pub fn parse(alternative: &'a str) -> Option<Self> {
        let pos = alternative.find(is_operator_char)?;
        let name = &alternative[..pos];
        if name.is_empty() {
            return None;
        }

        let (op, rest) = Comparator::split_prefix(&alternative[pos..])?;
        let (first_version, second) = match rest.find(is_operator_char) {
            None => (rest, None),
            Some(second_pos) => {
                let (second_op, upper) = Comparator::split_prefix(&rest[second_pos..])?;
                if upper.is_empty() || upper.contains(is_operator_char) {
                    return None;
                }
                (
                    &rest[..second_pos],
                    Some(Bound {
                        op: second_op,
                        version: upper,
                    }),
                )
            }
        };
        if first_version.is_empty() {
            return None;
        }

        Some(Self {
            name,
            first: Bound {
                op,
                version: first_version,
            },
            second,
        })
    }

    /// The package must carry this name and a version, and its full
    /// identifier must satisfy every bound.
    pub fn matches(&self, package: &PackageId<'_>) -> bool {
        if package.name() != self.name || package.version().is_none() {
            return false;
        }

        let candidate = LooseVersion::parse(package.as_str());
        self.first.holds(self.name, &candidate)
            && self
                .second
                .map_or(true, |bound| bound.holds(self.name, &candidate))
    }
}
