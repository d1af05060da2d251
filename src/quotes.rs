//! Quote selection and segmented quote presentation.
//!
//! A quote is one line of the quote file. Within a line, the `-` delimiter
//! splits the text into segments that are displayed one after another, each
//! replacing the previous one in the overlay.

use rand::seq::SliceRandom;
use rand::Rng;

/// The immutable set of quotes loaded at startup.
///
/// An empty set is legal (no quote file, or a file of blank lines); the
/// quote loop simply never starts a session.
#[derive(Debug, Clone, Default)]
pub struct QuoteSet {
    quotes: Vec<String>,
}

impl QuoteSet {
    /// Build a set from already-trimmed lines.
    pub fn new(quotes: Vec<String>) -> Self {
        Self { quotes }
    }

    /// Pick a uniformly random quote, or `None` when the set is empty.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.quotes.choose(rng).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Split a quote into displayed segments on `delimiter`.
///
/// Segments are trimmed; empty segments (doubled or trailing delimiters)
/// are dropped.
pub fn split_parts(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// One quote presentation in progress.
///
/// Holds the segments and the index of the segment currently on screen.
/// The session does not keep time itself; the UI timer queue decides when
/// to call [`QuoteSession::advance`].
#[derive(Debug, Clone)]
pub struct QuoteSession {
    parts: Vec<String>,
    index: usize,
}

impl QuoteSession {
    /// Start a session from raw quote text.
    ///
    /// Returns `None` if the text contains no displayable segment.
    pub fn new(text: &str, delimiter: char) -> Option<Self> {
        let parts = split_parts(text, delimiter);
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts, index: 0 })
        }
    }

    /// Segment currently on screen.
    pub fn current(&self) -> &str {
        &self.parts[self.index]
    }

    /// Move to the next segment and return it, or `None` when the current
    /// segment was the last one.
    pub fn advance(&mut self) -> Option<&str> {
        if self.index + 1 < self.parts.len() {
            self.index += 1;
            Some(&self.parts[self.index])
        } else {
            None
        }
    }

    /// Whether the current segment is the final one.
    pub fn on_last_part(&self) -> bool {
        self.index + 1 == self.parts.len()
    }

    /// Number of segments in the session.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// All segments, in display order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_set_pick_is_none() {
        let set = QuoteSet::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(set.is_empty());
        assert_eq!(set.pick(&mut rng), None);
    }

    #[test]
    fn test_pick_returns_member() {
        let set = QuoteSet::new(vec!["alpha".into(), "beta".into(), "gamma".into()]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let q = set.pick(&mut rng).unwrap();
            assert!(["alpha", "beta", "gamma"].contains(&q));
        }
    }

    #[test]
    fn test_split_parts_two_segments() {
        assert_eq!(split_parts("Hello - World", '-'), vec!["Hello", "World"]);
    }

    #[test]
    fn test_split_parts_no_delimiter() {
        assert_eq!(split_parts("just one", '-'), vec!["just one"]);
    }

    #[test]
    fn test_split_parts_drops_empty_segments() {
        assert_eq!(split_parts("a -- b -", '-'), vec!["a", "b"]);
        assert!(split_parts("---", '-').is_empty());
        assert!(split_parts("   ", '-').is_empty());
    }

    #[test]
    fn test_session_walks_parts_in_order() {
        let mut session = QuoteSession::new("one - two - three", '-').unwrap();
        assert_eq!(session.part_count(), 3);
        assert_eq!(session.current(), "one");
        assert!(!session.on_last_part());

        assert_eq!(session.advance(), Some("two"));
        assert_eq!(session.current(), "two");

        assert_eq!(session.advance(), Some("three"));
        assert!(session.on_last_part());

        assert_eq!(session.advance(), None);
        assert_eq!(session.current(), "three");
    }

    #[test]
    fn test_session_single_part_is_last_immediately() {
        let session = QuoteSession::new("lonely", '-').unwrap();
        assert!(session.on_last_part());
    }

    #[test]
    fn test_session_rejects_blank_text() {
        assert!(QuoteSession::new("", '-').is_none());
        assert!(QuoteSession::new(" - - ", '-').is_none());
    }
}
