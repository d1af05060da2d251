//! Deadline queue for the UI thread.
//!
//! Gesture ends and quote segment changes are scheduled here and fired by
//! the UI loop between frames, so every window mutation happens on the
//! thread that owns the surface. Entries are kept sorted by deadline.

use std::time::Instant;

/// What to do when a deadline fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// The 400 ms gesture hold elapsed.
    EndGesture,
    /// Show the next quote segment.
    AdvanceQuote,
    /// Remove the quote overlay and restore idle.
    HideQuote,
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    deadline: Instant,
    action: TimerAction,
}

/// Sorted pending deadlines for the UI loop.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action at a deadline.
    pub fn schedule(&mut self, deadline: Instant, action: TimerAction) {
        let pos = self
            .entries
            .iter()
            .position(|e| e.deadline > deadline)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, TimerEntry { deadline, action });
    }

    /// Drop all pending occurrences of an action.
    pub fn cancel(&mut self, action: TimerAction) {
        self.entries.retain(|e| e.action != action);
    }

    /// Pop the next action whose deadline has passed, oldest first.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerAction> {
        if self.entries.first().map(|e| e.deadline <= now) == Some(true) {
            Some(self.entries.remove(0).action)
        } else {
            None
        }
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|e| e.deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_queue() {
        let mut queue = TimerQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_due(Instant::now()), None);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_pop_respects_deadline() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now + Duration::from_millis(400), TimerAction::EndGesture);

        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.pop_due(now + Duration::from_millis(399)), None);
        assert_eq!(
            queue.pop_due(now + Duration::from_millis(400)),
            Some(TimerAction::EndGesture)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_order_by_deadline() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now + Duration::from_secs(4), TimerAction::HideQuote);
        queue.schedule(now + Duration::from_secs(2), TimerAction::AdvanceQuote);
        queue.schedule(now + Duration::from_millis(400), TimerAction::EndGesture);

        let late = now + Duration::from_secs(10);
        assert_eq!(queue.pop_due(late), Some(TimerAction::EndGesture));
        assert_eq!(queue.pop_due(late), Some(TimerAction::AdvanceQuote));
        assert_eq!(queue.pop_due(late), Some(TimerAction::HideQuote));
        assert_eq!(queue.pop_due(late), None);
    }

    #[test]
    fn test_same_deadline_fifo() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(1);
        let mut queue = TimerQueue::new();
        queue.schedule(deadline, TimerAction::AdvanceQuote);
        queue.schedule(deadline, TimerAction::HideQuote);

        assert_eq!(queue.pop_due(deadline), Some(TimerAction::AdvanceQuote));
        assert_eq!(queue.pop_due(deadline), Some(TimerAction::HideQuote));
    }

    #[test]
    fn test_cancel_removes_all_matching() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now + Duration::from_secs(1), TimerAction::AdvanceQuote);
        queue.schedule(now + Duration::from_secs(2), TimerAction::AdvanceQuote);
        queue.schedule(now + Duration::from_secs(3), TimerAction::HideQuote);

        queue.cancel(TimerAction::AdvanceQuote);
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.pop_due(now + Duration::from_secs(5)),
            Some(TimerAction::HideQuote)
        );
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now + Duration::from_secs(4), TimerAction::HideQuote);
        queue.schedule(now + Duration::from_millis(400), TimerAction::EndGesture);

        assert_eq!(queue.next_deadline(), Some(now + Duration::from_millis(400)));
    }

    #[test]
    fn test_clear() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, TimerAction::EndGesture);
        queue.schedule(now, TimerAction::HideQuote);
        queue.clear();
        assert!(queue.is_empty());
    }
}
