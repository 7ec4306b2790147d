// Rolling telemetry window
use super::telemetry::{JitterTable, Reading};
use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Bounded FIFO of readings. Appending to a full window evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    capacity: usize,
    readings: VecDeque<Reading>,
}

impl Series {
    /// Seeds beyond `capacity` keep only their newest readings.
    pub fn from_seed(capacity: usize, seed: impl IntoIterator<Item = Reading>) -> Self {
        let mut series = Self {
            capacity,
            readings: VecDeque::with_capacity(capacity),
        };
        for reading in seed {
            series.push(reading);
        }
        series
    }

    /// Append a reading, returning the one evicted to make room.
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.readings.len() == self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    /// Generate the successor of the latest reading and append it. Leaves the
    /// window untouched when it is empty or its labels are exhausted.
    pub fn advance(&mut self, jitter: &JitterTable, draw: impl FnMut() -> f64) -> Option<&Reading> {
        let next = self.readings.back()?.successor(jitter, draw)?;
        self.push(next);
        self.readings.back()
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }
}

/// Serialized oldest first, as the chart plots it.
impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
