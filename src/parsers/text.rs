use regex::Regex;
use std::sync::LazyLock;

/// Site-inserted separators. A line containing any of these is dropped.
pub const DIVIDER_MARKERS: [&str; 2] = [".............", "-------------"];

/// Runs of characters outside the kept set (letters, digits, basic punctuation)
static RE_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^A-Za-z0-9?!.,;:()"'—]+"#).expect("invalid regex: disallowed characters")
});

/// Three or more consecutive line breaks, possibly with whitespace in between
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("invalid regex: blank run"));

/// Canonicalizes an author handle or display name.
///
/// Dashes and underscores become spaces, whitespace runs collapse to one
/// space and both ends are trimmed: `"sylvia-plath"` -> `"sylvia plath"`.
pub fn normalize_name(raw: &str) -> String {
    normalize_whitespace(&raw.replace(['-', '_'], " "))
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans the raw lines of a poem body or biography.
///
/// Divider lines are removed, stray symbols are replaced with spaces, split
/// contractions (`it s`, `don t`) are repaired and blank-line runs are folded
/// into a single paragraph break. Up to two blank lines are stripped from
/// each end.
pub fn normalize_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<String> {
    let cleaned: Vec<String> = raw_lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !is_divider(line))
        .map(clean_line)
        .collect();

    let joined = cleaned.join("\n");
    let folded = RE_BLANK_RUN.replace_all(&joined, "\n\n");
    let mut lines: Vec<String> = folded.split('\n').map(str::to_string).collect();

    // An empty input still splits into one empty line
    for _ in 0..2 {
        if lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
    }
    for _ in 0..2 {
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
    }

    lines
}

fn is_divider(line: &str) -> bool {
    DIVIDER_MARKERS.iter().any(|marker| line.contains(marker))
}

fn clean_line(line: &str) -> String {
    let line = RE_DISALLOWED.replace_all(line, " ");
    let line = line.replace(" s ", "'s ").replace(" t ", "'t ");
    normalize_whitespace(&line)
}
