//! Balance-of-power history
//!
//! A fixed-capacity ring buffer of per-faction star counts, sampled at a
//! fixed interval. Once the buffer has wrapped, the oldest sample sits at
//! the current write position, so chronological iteration starts there.

use serde::Serialize;

use crate::core::config::{HISTORY_INTERVAL_S, HISTORY_POINTS};
use crate::core::types::FACTION_COUNT;

#[derive(Debug, Clone, Serialize)]
pub struct PowerHistory {
    samples: Vec<[u32; FACTION_COUNT]>,
    /// Next slot to write
    next: usize,
    wrapped: bool,
    countdown: f32,
}

impl Default for PowerHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_POINTS)
    }
}

impl PowerHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: vec![[0; FACTION_COUNT]; capacity],
            next: 0,
            wrapped: false,
            countdown: HISTORY_INTERVAL_S,
        }
    }

    /// Advance the sampling timer; records `counts` when the interval elapses
    pub fn tick(&mut self, dt: f32, counts: &[u32; FACTION_COUNT]) {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return;
        }
        self.countdown = HISTORY_INTERVAL_S;
        self.record(*counts);
    }

    /// Write one sample at the current index and advance, wrapping at capacity
    pub fn record(&mut self, counts: [u32; FACTION_COUNT]) {
        self.samples[self.next] = counts;
        self.next += 1;
        if self.next >= self.samples.len() {
            self.wrapped = true;
            self.next = 0;
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of valid samples currently held
    pub fn len(&self) -> usize {
        if self.wrapped {
            self.samples.len()
        } else {
            self.next
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Index the next sample will be written to
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Samples from oldest to newest
    pub fn iter_chronological(&self) -> impl Iterator<Item = &[u32; FACTION_COUNT]> {
        let (start, len) = if self.wrapped {
            (self.next, self.samples.len())
        } else {
            (0, self.next)
        };
        let capacity = self.samples.len();
        (0..len).map(move |i| &self.samples[(start + i) % capacity])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: u32) -> [u32; FACTION_COUNT] {
        [n, 0, 0, 0]
    }

    #[test]
    fn unwrapped_buffer_reads_in_insertion_order() {
        let mut history = PowerHistory::with_capacity(10);
        for n in 0..3 {
            history.record(sample(n));
        }
        assert!(!history.is_wrapped());
        assert_eq!(history.len(), 3);
        let read: Vec<u32> = history.iter_chronological().map(|s| s[0]).collect();
        assert_eq!(read, vec![0, 1, 2]);
    }

    #[test]
    fn full_capacity_wraps_and_starts_after_write_index() {
        let mut history = PowerHistory::with_capacity(770);
        for n in 0..771 {
            history.record(sample(n));
        }
        // Sample 771 overwrote slot 0; the oldest surviving sample is in slot 1
        assert!(history.is_wrapped());
        assert_eq!(history.next_index(), 1);
        assert_eq!(history.len(), 770);
        let read: Vec<u32> = history.iter_chronological().map(|s| s[0]).collect();
        assert_eq!(read[0], 1);
        assert_eq!(*read.last().unwrap(), 770);
    }

    #[test]
    fn exact_capacity_marks_wrapped_with_index_reset() {
        let mut history = PowerHistory::with_capacity(4);
        for n in 0..4 {
            history.record(sample(n));
        }
        assert!(history.is_wrapped());
        assert_eq!(history.next_index(), 0);
        let read: Vec<u32> = history.iter_chronological().map(|s| s[0]).collect();
        assert_eq!(read, vec![0, 1, 2, 3]);
    }

    #[test]
    fn sampling_interval_gates_recording() {
        let mut history = PowerHistory::with_capacity(8);
        history.tick(0.05, &sample(1));
        assert!(history.is_empty());
        history.tick(0.06, &sample(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.iter_chronological().next().unwrap()[0], 2);
    }
}
