use std::sync::LazyLock;

use regex::Regex;

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\* ([\S ]+)").unwrap());
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^# ([^']+)").unwrap());
static BARE_BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*([^*]+)").unwrap());
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{citat(?:ion)?\|([\S ]+)").unwrap());
static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\* ?([^*\s][\S ]*)").unwrap());
static STOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\{\{(?:misattributed|disputed)").unwrap());

/// Line-leading syntax that introduces a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMarker {
    /// `* text`
    Bullet,
    /// `# text`, cut at the first apostrophe
    Numbered,
    /// `*text` with no further asterisks
    BareBullet,
    /// `{{citation|text` or `{{citat|text`
    Citation,
}

/// Priority order: the first marker that matches a line wins.
pub const QUOTE_MARKERS: [QuoteMarker; 4] = [
    QuoteMarker::Bullet,
    QuoteMarker::Numbered,
    QuoteMarker::BareBullet,
    QuoteMarker::Citation,
];

impl QuoteMarker {
    fn pattern(self) -> &'static Regex {
        match self {
            QuoteMarker::Bullet => &BULLET_RE,
            QuoteMarker::Numbered => &NUMBERED_RE,
            QuoteMarker::BareBullet => &BARE_BULLET_RE,
            QuoteMarker::Citation => &CITATION_RE,
        }
    }

    /// The text after the marker, if `line` starts with this marker.
    pub fn capture(self, line: &str) -> Option<&str> {
        self.pattern()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Match `line` against the markers in priority order.
pub fn recognize(line: &str) -> Option<(QuoteMarker, &str)> {
    QUOTE_MARKERS
        .iter()
        .find_map(|marker| marker.capture(line).map(|text| (*marker, text)))
}

/// `** text`: the sub-bullet under a quote naming where it comes from.
pub fn source_note(line: &str) -> Option<&str> {
    SOURCE_RE.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// `{{misattributed...` or `{{disputed...`, any case. Nothing below it is kept.
pub fn is_stop_marker(line: &str) -> bool {
    STOP_RE.is_match(line)
}
