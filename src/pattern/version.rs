//! Loose version ordering.
//!
//! A version-bearing string is split left to right into alternating runs of
//! decimal digits and runs of everything else, and two strings are ordered by
//! comparing those runs pairwise. Nothing is discarded: separators such as
//! `.` and `-` are text runs and take part in the ordering.
//!
//! ```
//! use yvc::pattern::LooseVersion;
//!
//! assert!(LooseVersion::parse("cfengine-1.5") < LooseVersion::parse("cfengine-1.5.3nb3"));
//! assert!(LooseVersion::parse("foo-1.10") > LooseVersion::parse("foo-1.9"));
//! ```
//!
//! # Ordering rules
//!
//! - Two digit runs compare by numeric value, without any width limit.
//! - Two text runs compare lexicographically.
//! - A digit run sorts before a text run at the same position.
//! - When one sequence is a prefix of the other, the shorter one is smaller.

use std::cmp::Ordering;
use std::fmt;

/// One run of a tokenized version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// A run of ASCII digits, stored without leading zeros.
    Number(String),
    /// A run of non-digit characters.
    Text(String),
}

impl Component {
    fn from_run(run: String, digits: bool) -> Self {
        if !digits {
            return Component::Text(run);
        }
        let trimmed = run.trim_start_matches('0');
        if trimmed.is_empty() {
            Component::Number("0".to_string())
        } else if trimmed.len() == run.len() {
            Component::Number(run)
        } else {
            Component::Number(trimmed.to_string())
        }
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Normalized digit strings: longer means larger.
            (Component::Number(a), Component::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
            (Component::Number(_), Component::Text(_)) => Ordering::Less,
            (Component::Text(_), Component::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed, comparable version-bearing string.
///
/// Equality and ordering only look at the components, so `foo-007` and
/// `foo-7` are equal even though they print differently.
#[derive(Debug, Clone)]
pub struct LooseVersion {
    raw: String,
    components: Vec<Component>,
}

impl LooseVersion {
    /// Tokenizes `s`. Never fails; the empty string has no components.
    pub fn parse(s: &str) -> Self {
        let mut components = Vec::new();
        let mut run = String::new();
        let mut in_digits = false;

        for c in s.chars() {
            let digit = c.is_ascii_digit();
            if !run.is_empty() && digit != in_digits {
                components.push(Component::from_run(std::mem::take(&mut run), in_digits));
            }
            in_digits = digit;
            run.push(c);
        }
        if !run.is_empty() {
            components.push(Component::from_run(run, in_digits));
        }

        Self {
            raw: s.to_string(),
            components,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for LooseVersion {}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Vec ordering is pairwise with the shorter prefix sorting first.
        self.components.cmp(&other.components)
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for LooseVersion {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// A comparison operator of the pattern language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparator {
    /// Two-character operators come first so `<=` is never read as `<`.
    const TOKENS: [(&'static str, Comparator); 5] = [
        ("<=", Comparator::Le),
        (">=", Comparator::Ge),
        ("<", Comparator::Lt),
        (">", Comparator::Gt),
        ("=", Comparator::Eq),
    ];

    /// Splits a leading operator off `s`, returning it with the remainder.
    pub fn split_prefix(s: &str) -> Option<(Comparator, &str)> {
        Self::TOKENS
            .iter()
            .find_map(|(token, op)| s.strip_prefix(token).map(|rest| (*op, rest)))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Eq => "=",
        }
    }

    /// Whether an ordering of `lhs` relative to `rhs` satisfies `lhs op rhs`.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Ge => ordering != Ordering::Less,
            Comparator::Eq => ordering == Ordering::Equal,
        }
    }

    pub fn compare(&self, lhs: &LooseVersion, rhs: &LooseVersion) -> bool {
        self.holds(lhs.cmp(rhs))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
