//! Shell-style wildcard matching over a whole string.
//!
//! - `*`: any run of characters, including none
//! - `?`: exactly one character
//! - `[...]`: one character from the set; `a-z` ranges, a leading `!` or `^`
//!   negates, and `]` right after the opening bracket is a member
//!
//! An unclosed `[` matches itself. No character is special to `*` or `?`,
//! `/` included.

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Class { negated: bool, items: Vec<ClassItem> },
}

impl Token {
    fn matches(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => true,
            Token::AnyRun => false,
            Token::Class { negated, items } => {
                let hit = items.iter().any(|item| match item {
                    ClassItem::Single(s) => *s == c,
                    ClassItem::Range(lo, hi) => (*lo..=*hi).contains(&c),
                });
                hit != *negated
            }
        }
    }
}

/// Returns true if `text` matches `pattern` in its entirety.
///
/// ```
/// use yvc::pattern::glob_match;
///
/// assert!(glob_match("apache-2.0.3[0-3]*", "apache-2.0.31"));
/// assert!(!glob_match("apache-2.0.3[0-3]*", "apache-2.0.4"));
/// ```
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    // Position of the last `*` and the text index it is currently covering up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::AnyRun) => {
                star = Some((p, t));
                p += 1;
            }
            Some(token) if token.matches(text[t]) => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    star = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|token| *token == Token::AnyRun)
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                // Consecutive stars behave like one.
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '[' => match parse_class(&chars, i) {
                Some((class, next)) => {
                    tokens.push(class);
                    i = next;
                }
                None => {
                    tokens.push(Token::Literal('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    tokens
}

/// Parses the class opening at `start`; returns the token and the index
/// just past the closing `]`, or `None` if the class never closes.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut j = start + 1;
    let negated = matches!(chars.get(j), Some('!') | Some('^'));
    if negated {
        j += 1;
    }
    let body_start = j;
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }

    let body = &chars[body_start..j];
    let mut items = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            items.push(ClassItem::Range(body[k], body[k + 2]));
            k += 3;
        } else {
            items.push(ClassItem::Single(body[k]));
            k += 1;
        }
    }

    Some((Token::Class { negated, items }, j + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("foo-1.2", "foo-1.2"));
        assert!(!glob_match("foo-1.2", "foo-1.20"));
        assert!(!glob_match("foo-1.2", "foo-1."));
        assert!(glob_match("", ""));
        assert!(!glob_match("", "a"));
    }

    #[test]
    fn test_glob_match_star() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("foo-*", "foo-1.2"));
        assert!(glob_match("*-1.2", "foo-1.2"));
        assert!(glob_match("f*o*2", "foo-1.2"));
        assert!(glob_match("a**b", "ab"));
        assert!(!glob_match("foo-*", "bar-1.2"));
        assert!(glob_match("ports/*", "ports/ldconfig_compat-1.0"));
    }

    #[test]
    fn test_glob_match_question_mark() {
        assert!(glob_match("foo-1.?", "foo-1.2"));
        assert!(!glob_match("foo-1.?", "foo-1.20"));
        assert!(!glob_match("foo-1.?", "foo-1."));
    }

    #[test]
    fn test_glob_match_class() {
        assert!(glob_match("foo-[0-9]", "foo-7"));
        assert!(!glob_match("foo-[0-9]", "foo-a"));
        assert!(glob_match("foo-[abc]", "foo-b"));
        assert!(glob_match("foo-[a-cx]", "foo-x"));
        assert!(!glob_match("foo-[a-cx]", "foo-d"));
    }

    #[test]
    fn test_glob_match_negated_class() {
        assert!(glob_match("foo-[!0-9]", "foo-a"));
        assert!(!glob_match("foo-[!0-9]", "foo-5"));
        assert!(glob_match("foo-[^0-9]", "foo-a"));
    }

    #[test]
    fn test_glob_match_bracket_edge_cases() {
        // `]` first in the set is a member
        assert!(glob_match("[]a]", "]"));
        assert!(glob_match("[!]]", "a"));
        assert!(!glob_match("[!]]", "]"));
        // trailing `-` is literal
        assert!(glob_match("[a-]", "-"));
        // unclosed bracket matches itself
        assert!(glob_match("foo[1", "foo[1"));
        assert!(!glob_match("foo[1", "foo1"));
        // reversed range matches nothing
        assert!(!glob_match("[z-a]", "m"));
    }

    #[test]
    fn test_glob_match_apache_range() {
        let pattern = "apache-2.0.3[0-3]*";
        for version in ["30", "31", "32", "33"] {
            assert!(glob_match(pattern, &format!("apache-2.0.{}", version)));
        }
        assert!(!glob_match(pattern, "apache-2.0.3"));
        assert!(!glob_match(pattern, "apache-2.0.2"));
        assert!(!glob_match(pattern, "apache-2.0.299"));
        assert!(!glob_match(pattern, "apache-2.0.4"));
    }

    #[test]
    fn test_glob_match_backtracking_is_linear_enough() {
        let text = "a".repeat(200);
        let pattern = format!("{}b", "*a".repeat(20));
        assert!(!glob_match(&pattern, &text));
    }
}
