/// Deferred one-shot timers on a virtual clock
///
/// Gameplay windows measured in wall-clock time (attack windows,
/// invincibility) are scheduled here instead of being counted in frames.
/// The owner of the queue advances the clock explicitly: the frame driver
/// feeds it real elapsed time, tests feed it whatever they like.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Identifies a scheduled timer so its owner can match it when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<E> {
    deadline: Duration,
    handle: TimerHandle,
    event: E,
}

// Ordered by deadline, then by scheduling order so equal deadlines fire FIFO.
impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.handle == other.handle
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.handle.0.cmp(&other.handle.0))
    }
}

/// Priority queue of pending timer events
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_handle: u64,
    pending: BinaryHeap<Reverse<Scheduled<E>>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Number of timers that have not fired or been cancelled
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Schedule `event` to fire once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.pending.push(Reverse(Scheduled {
            deadline: self.now + delay,
            handle,
            event,
        }));

        handle
    }

    /// Cancel every pending timer whose event matches `predicate`
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&E) -> bool,
    {
        let before = self.pending.len();
        self.pending.retain(|Reverse(entry)| !predicate(&entry.event));
        before - self.pending.len()
    }

    /// Advance the clock and return every event that came due, in deadline order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerHandle, E)> {
        self.now += elapsed;

        let mut fired = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|Reverse(entry)| entry.deadline <= self.now)
        {
            if let Some(Reverse(entry)) = self.pending.pop() {
                fired.push((entry.handle, entry.event));
            }
        }

        fired
    }
}
