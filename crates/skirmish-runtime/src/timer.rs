//! Delayed actions keyed by due time

/// A queue of actions that become due at a given clock time (ms).
///
/// Actions due at the same time fire in scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    entries: Vec<(f64, u64, A)>,
    next_seq: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: f64, action: A) {
        self.entries.push((due_ms, self.next_seq, action));
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(at, _, _)| *at <= now_ms);
        self.entries = pending;

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, action)| action).collect()
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
