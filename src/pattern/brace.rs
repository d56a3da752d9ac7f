//! Brace expansion.
//!
//! `foo-1.2{,-bar,12}` stands for `foo-1.2`, `foo-1.2-bar` and `foo-1.212`.
//! Groups may nest and alternatives may be empty. Results come out
//! prefix-major, in the order the alternatives are written. Numeric ranges
//! (`{1..5}`) are not supported.

use tracing::trace;

#[derive(Debug)]
enum Node {
    Text(String),
    Group(Vec<Vec<Node>>),
}

/// Expands every brace group in `pattern`.
///
/// Input without braces, or with unbalanced braces, comes back unchanged as
/// a single element. An empty group `{}` is kept as literal text.
///
/// ```
/// use yvc::pattern::expand;
///
/// assert_eq!(
///     expand("foo-1.2{,-bar{-baz,-blog}}"),
///     vec!["foo-1.2", "foo-1.2-bar-baz", "foo-1.2-bar-blog"]
/// );
/// ```
pub fn expand(pattern: &str) -> Vec<String> {
    if !is_balanced(pattern) {
        trace!(pattern, "unbalanced braces, pattern taken literally");
        return vec![pattern.to_string()];
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut pos = 0;
    let nodes = parse_sequence(&chars, &mut pos, false);
    expand_sequence(&nodes)
}

fn is_balanced(pattern: &str) -> bool {
    let mut depth: usize = 0;
    for c in pattern.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// Reads nodes up to the end of input or, inside a group, up to the next
/// `,` or `}` at this nesting level.
fn parse_sequence(chars: &[char], pos: &mut usize, in_group: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut text = String::new();

    while let Some(&c) = chars.get(*pos) {
        match c {
            ',' | '}' if in_group => break,
            '{' => {
                *pos += 1;
                match parse_group(chars, pos) {
                    Some(alternatives) => {
                        if !text.is_empty() {
                            nodes.push(Node::Text(std::mem::take(&mut text)));
                        }
                        nodes.push(Node::Group(alternatives));
                    }
                    None => text.push_str("{}"),
                }
            }
            _ => {
                text.push(c);
                *pos += 1;
            }
        }
    }

    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
    nodes
}

/// Starts just past a `{` and consumes through its matching `}`.
/// Returns `None` for an empty group.
fn parse_group(chars: &[char], pos: &mut usize) -> Option<Vec<Vec<Node>>> {
    if chars.get(*pos) == Some(&'}') {
        *pos += 1;
        return None;
    }

    let mut alternatives = Vec::new();
    loop {
        alternatives.push(parse_sequence(chars, pos, true));
        match chars.get(*pos) {
            Some(',') => *pos += 1,
            Some('}') => {
                *pos += 1;
                break;
            }
            // Balance was checked up front.
            _ => break,
        }
    }
    Some(alternatives)
}

fn expand_sequence(nodes: &[Node]) -> Vec<String> {
    let mut results = vec![String::new()];

    for node in nodes {
        match node {
            Node::Text(text) => {
                for result in &mut results {
                    result.push_str(text);
                }
            }
            Node::Group(alternatives) => {
                let expanded: Vec<String> = alternatives
                    .iter()
                    .flat_map(|alternative| expand_sequence(alternative))
                    .collect();
                results = results
                    .iter()
                    .flat_map(|prefix| expanded.iter().map(move |s| format!("{}{}", prefix, s)))
                    .collect();
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_without_braces() {
        assert_eq!(expand("foo-1.2"), vec!["foo-1.2"]);
        assert_eq!(expand(""), vec![""]);
    }

    #[test]
    fn test_expand_suffixes() {
        assert_eq!(
            expand("foo-1.2{,-bar,12}"),
            vec!["foo-1.2", "foo-1.2-bar", "foo-1.212"]
        );
    }

    #[test]
    fn test_expand_prefix_and_suffixes() {
        assert_eq!(
            expand("{this-,that-}foo-1.2{,-bar,12}"),
            vec![
                "this-foo-1.2",
                "this-foo-1.2-bar",
                "this-foo-1.212",
                "that-foo-1.2",
                "that-foo-1.2-bar",
                "that-foo-1.212",
            ]
        );
    }

    #[test]
    fn test_expand_nested_keeps_single_base_term() {
        assert_eq!(
            expand("foo-1.2{,-bar{-baz,-blog}}"),
            vec!["foo-1.2", "foo-1.2-bar-baz", "foo-1.2-bar-blog"]
        );
        assert_eq!(expand("foo{,bar{x,y}}"), vec!["foo", "foobarx", "foobary"]);
    }

    #[test]
    fn test_expand_trailing_text() {
        assert_eq!(
            expand("foo-1.2{,-bar,12}-bar"),
            vec!["foo-1.2-bar", "foo-1.2-bar-bar", "foo-1.212-bar"]
        );
    }

    #[test]
    fn test_expand_nested_in_middle() {
        assert_eq!(expand("{a,b{c,d}e}f"), vec!["af", "bcef", "bdef"]);
        assert_eq!(expand("x{{1,2},3}"), vec!["x1", "x2", "x3"]);
    }

    #[test]
    fn test_expand_keeps_duplicates() {
        assert_eq!(expand("{a,a}"), vec!["a", "a"]);
    }

    #[test]
    fn test_expand_single_alternative_drops_braces() {
        assert_eq!(expand("foo{bar}"), vec!["foobar"]);
    }

    #[test]
    fn test_expand_empty_group_is_literal() {
        assert_eq!(expand("foo{}"), vec!["foo{}"]);
        assert_eq!(expand("x{}{a,b}"), vec!["x{}a", "x{}b"]);
    }

    #[test]
    fn test_expand_top_level_comma_is_literal() {
        assert_eq!(expand("a,b{1,2}"), vec!["a,b1", "a,b2"]);
    }

    #[test]
    fn test_expand_unbalanced_is_literal() {
        assert_eq!(expand("foo{bar"), vec!["foo{bar"]);
        assert_eq!(expand("foo}bar{"), vec!["foo}bar{"]);
        assert_eq!(expand("foo{a,b}}"), vec!["foo{a,b}}"]);
        assert_eq!(expand("{{a,b}"), vec!["{{a,b}"]);
    }

    #[test]
    fn test_expand_is_idempotent() {
        for pattern in [
            "foo-1.2",
            "foo-1.2{,-bar,12}",
            "{this-,that-}foo-1.2{,-bar,12}",
            "foo-1.2{,-bar{-baz,-blog}}",
            "mozilla{,-bin,-gtk2,-gtk2-bin}<1.7.10",
            "x{}{a,b}",
        ] {
            for element in expand(pattern) {
                assert_eq!(expand(&element), vec![element.clone()]);
            }
        }
    }
}
