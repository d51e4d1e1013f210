use std::sync::LazyLock;

use regex::Regex;

// [[Ulysses S. Grant|Grant]] -> Grant, w:[[Philip Sheridan|Sheridan]] -> Sheridan
static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[w:]{0,2}\[\[[^|]+\|(?P<name>[^\]]+)\]\]").unwrap());
static TEMPLATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[\S ]+\}\}(?P<name>[\S ]+)").unwrap());
static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[|\]\]|<!-- ?| ?-->").unwrap());
// '''''x''''' is a single run, so it collapses to one quote on each side
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:"|'{2,3}){2,}|'{2,3}"#).unwrap());
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br> ?").unwrap());

/// Strip wiki markup from the captured part of one quote line.
///
/// Substitutions run in a fixed order; the delimiter strip only catches
/// brackets the piped-link pass left behind.
pub fn clean_line(line: &str) -> String {
    let mut text = line.to_string();

    if text.contains("[[") {
        text = PIPED_LINK_RE.replace_all(&text, "$name").into_owned();
        text = TEMPLATE_PREFIX_RE.replace_all(&text, "$name").into_owned();
    }

    let text = DELIMITER_RE.replace_all(&text, "");
    let text = EMPHASIS_RE.replace_all(&text, "\"");
    LINE_BREAK_RE.replace_all(&text, "\n").into_owned()
}
