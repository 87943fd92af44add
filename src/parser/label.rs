//! Node label cleaning: done markers and quote escaping.

/// Glyphs that mark a label as done when they end it.
const CHECKMARKS: [char; 2] = ['\u{2713}', '\u{2714}'];

/// Markers that count as done only when separated from the label by
/// whitespace.
const SPACED_MARKERS: [char; 2] = ['+', 'X'];

/// A node name extracted from one segment of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Label {
    pub(crate) name: String,
    pub(crate) done: bool,
}

impl Label {
    /// Clean a raw segment into a node name and its done marker.
    ///
    /// The marker is always stripped from the name. With `ignore_done` it is
    /// reported as absent.
    pub(crate) fn parse(segment: &str, ignore_done: bool) -> Self {
        let (text, marked) = strip_done_marker(segment);
        Self {
            name: escape_quotes(text),
            done: marked && !ignore_done,
        }
    }
}

/// Markers are matched against the segment trimmed on the right only, so the
/// whitespace before a spaced marker may be the segment's leading padding.
fn strip_done_marker(segment: &str) -> (&str, bool) {
    let trimmed = segment.trim_end();
    if let Some(rest) = trimmed.strip_suffix(CHECKMARKS) {
        return (rest.trim(), true);
    }
    trimmed
        .strip_suffix(SPACED_MARKERS)
        .filter(|rest| rest.ends_with(char::is_whitespace))
        .map_or((trimmed.trim_start(), false), |rest| (rest.trim(), true))
}

/// Names are embedded in double-quoted DOT literals.
fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}
