//! Column intervals of previously parsed node mentions.
//!
//! A line that starts with `->` continues from whichever earlier mention spans
//! the arrow's column. Mentions are searched newest first, so the nearest
//! enclosing node above the arrow wins.

/// One mention of a node on a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub(crate) name: String,
    /// First column of the trimmed label.
    pub(crate) start: usize,
    /// Column just past the arrow that follows the segment.
    pub(crate) end: usize,
}

impl Occurrence {
    /// Both bounds are inclusive so an arrow directly under the following
    /// arrow still attaches.
    const fn spans(&self, column: usize) -> bool {
        self.start <= column && column <= self.end
    }
}

/// Stack of every mention parsed so far.
#[derive(Debug, Default)]
pub(crate) struct OccurrenceStack {
    entries: Vec<Occurrence>,
}

impl OccurrenceStack {
    pub(crate) fn push(&mut self, occurrence: Occurrence) {
        self.entries.push(occurrence);
    }

    /// Find the most recent mention spanning `column`.
    pub(crate) fn find(&self, column: usize) -> Option<&Occurrence> {
        self.entries.iter().rev().find(|entry| entry.spans(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn occurrence(name: &str, start: usize, end: usize) -> Occurrence {
        Occurrence {
            name: name.into(),
            start,
            end,
        }
    }

    #[rstest]
    #[case(0, Some("a"))]
    #[case(4, Some("b"))]
    #[case(9, Some("b"))]
    #[case(12, None)]
    fn finds_newest_spanning_occurrence(#[case] column: usize, #[case] expected: Option<&str>) {
        let mut stack = OccurrenceStack::default();
        stack.push(occurrence("a", 0, 4));
        stack.push(occurrence("b", 4, 9));
        assert_eq!(stack.find(column).map(|o| o.name.as_str()), expected);
    }

    #[rstest]
    fn later_mention_shadows_earlier_one() {
        let mut stack = OccurrenceStack::default();
        stack.push(occurrence("old", 2, 8));
        stack.push(occurrence("new", 2, 8));
        assert_eq!(stack.find(5).map(|o| o.name.as_str()), Some("new"));
    }
}
