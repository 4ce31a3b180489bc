//! Keyword highlighting for the per-item detail view.

use regex::RegexBuilder;
use serde::Serialize;

/// A run of text, tagged with whether it matched a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_keyword: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_keyword: false,
        }
    }

    fn keyword(text: &'a str) -> Self {
        Self {
            text,
            is_keyword: true,
        }
    }
}

/// Split `text` into plain and keyword segments.
///
/// Matching is case-insensitive on literal substrings, leftmost first, with
/// longer keywords preferred at the same position. Segments borrow from
/// `text` (so keep its casing) and concatenate back to it exactly.
/// Without usable keywords the whole text comes back as one plain segment.
pub fn highlight<'a, S: AsRef<str>>(text: &'a str, keywords: &[S]) -> Vec<Segment<'a>> {
    let mut sorted: Vec<&str> = keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|k| !k.is_empty())
        .collect();
    // Alternation is leftmost-first, so order decides priority.
    sorted.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    sorted.dedup();

    if sorted.is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        // Only reachable when the keyword set exceeds the regex size limit.
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment::keyword(m.as_str()));
        last = m.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}
