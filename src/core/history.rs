//! Command history with up/down recall.

use crate::utils::RingBuffer;

/// Bounded list of submitted lines plus a recall cursor.
///
/// The cursor is `None` while the user is not browsing. Recall only moves the
/// cursor; the stored list changes only through [`CommandHistory::record`].
#[derive(Clone, Debug)]
pub struct CommandHistory {
    entries: RingBuffer<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RingBuffer::new(capacity),
            cursor: None,
        }
    }

    /// Append a submitted line. Blank lines are ignored.
    ///
    /// Always stops browsing.
    pub fn record(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.entries.push(line.to_string());
        }
        self.cursor = None;
    }

    /// Step back in time.
    ///
    /// From "not browsing" this is the newest entry; stepping past the oldest
    /// wraps around to the newest. Returns `None` only when history is empty.
    pub fn recall_previous(&mut self) -> Option<&str> {
        let newest = self.entries.len().checked_sub(1)?;
        let index = match self.cursor {
            None | Some(0) => newest,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step forward in time.
    ///
    /// Past the newest entry the cursor returns to "not browsing" and the
    /// empty string is returned.
    pub fn recall_next(&mut self) -> &str {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                self.entries.get(i + 1).map_or("", String::as_str)
            }
            _ => {
                self.cursor = None;
                ""
            }
        }
    }

    /// Leave browsing mode without submitting.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new(50);
        for line in lines {
            history.record(line);
        }
        history
    }

    #[test]
    fn test_previous_walks_back_and_wraps() {
        let mut history = history_of(&["a", "b", "c"]);
        assert_eq!(history.recall_previous(), Some("c"));
        assert_eq!(history.recall_previous(), Some("b"));
        assert_eq!(history.recall_previous(), Some("a"));
        assert_eq!(history.recall_previous(), Some("c"));
    }

    #[test]
    fn test_next_returns_to_not_browsing() {
        let mut history = history_of(&["a", "b", "c"]);
        history.recall_previous();
        history.recall_previous();
        assert_eq!(history.recall_next(), "c");
        assert_eq!(history.recall_next(), "");
        assert_eq!(history.cursor(), None);
        assert_eq!(history.recall_next(), "");
    }

    #[test]
    fn test_recall_does_not_mutate_entries() {
        let mut history = history_of(&["a", "b"]);
        history.recall_previous();
        history.recall_next();
        history.recall_previous();
        assert_eq!(history.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let history = history_of(&["", "   ", "dir"]);
        assert_eq!(history.to_vec(), vec!["dir"]);
    }

    #[test]
    fn test_bounded_to_capacity() {
        let mut history = CommandHistory::new(50);
        for i in 0..60 {
            history.record(&format!("cmd{}", i));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.iter().next(), Some("cmd10"));
        assert_eq!(history.recall_previous(), Some("cmd59"));
    }

    #[test]
    fn test_empty_history() {
        let mut history = CommandHistory::new(5);
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.recall_next(), "");
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut history = history_of(&["a", "b"]);
        history.recall_previous();
        history.record("c");
        assert_eq!(history.cursor(), None);
        assert_eq!(history.recall_previous(), Some("c"));
    }
}
