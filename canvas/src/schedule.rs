//! Virtual-time task queue for staggered cascades.
//!
//! The engine never sleeps. Commands that need a delay return
//! [`Action::Schedule`](crate::engine::Action::Schedule) and the host decides
//! how time passes: a browser host uses timers, while tests and the headless
//! host push tasks here and advance a virtual clock, which makes cascades
//! fully deterministic.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.due_ms, self.seq) == (other.due_ms, other.seq)
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Tasks ordered by due time, then by the order they were scheduled.
#[derive(Debug)]
pub struct TaskQueue<T> {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { now_ms: 0, next_seq: 0, heap: BinaryHeap::new() }
    }
}

impl<T> TaskQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due_ms, seq, task }));
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Pop the earliest task if it is due at or before the current time.
    pub fn pop_due(&mut self) -> Option<T> {
        if self.next_due_ms()? > self.now_ms {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| e.task)
    }

    /// Move the clock to the earliest pending task and pop it.
    ///
    /// The clock never moves backwards.
    pub fn pop_next(&mut self) -> Option<(u64, T)> {
        let Reverse(entry) = self.heap.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some((self.now_ms, entry.task))
    }

    /// Advance the clock by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
