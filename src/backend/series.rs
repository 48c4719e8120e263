use std::collections::VecDeque;
use std::collections::vec_deque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mathphysics::Tick;
use super::signal::Rssi;


pub use overlay::*;


pub mod overlay;


pub const SERIES_CAPACITY: usize = 100;


#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    time: Tick,
    #[serde(with = "rssi_value")]
    rssi: Rssi,
}

impl SignalSample {
    #[must_use]
    pub fn new(time: Tick, rssi: Rssi) -> Self {
        Self { time, rssi }
    }

    #[must_use]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[must_use]
    pub fn rssi(&self) -> Rssi {
        self.rssi
    }
}

mod rssi_value {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::backend::mathphysics::Dbm;
    use crate::backend::signal::Rssi;


    pub fn serialize<S: Serializer>(
        rssi: &Rssi,
        serializer: S
    ) -> Result<S::Ok, S::Error> {
        rssi.value().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D
    ) -> Result<Rssi, D::Error> {
        Dbm::deserialize(deserializer).map(Rssi::new)
    }
}


/// Bounded FIFO of RSSI samples feeding the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesBuffer {
    samples: VecDeque<SignalSample>,
    capacity: usize,
}

impl TimeSeriesBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&SignalSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, SignalSample> {
        self.samples.iter()
    }

    pub fn append(&mut self, sample: SignalSample) {
        self.samples.push_back(sample);
    }

    pub fn evict_oldest_if_over_capacity(&mut self, capacity: usize) {
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    /// Appends a smoothed sample and keeps the buffer within its capacity.
    pub fn record<R: Rng + ?Sized>(
        &mut self,
        time: Tick,
        rssi: Rssi,
        rng: &mut R
    ) {
        let enhanced = EXPERIMENT_OVERLAY.apply(rssi, time as f64, rng);

        self.append(SignalSample::new(time, enhanced));
        self.evict_oldest_if_over_capacity(self.capacity);
    }

    /// Replaces the contents, keeping only the newest samples that fit.
    pub fn replace(&mut self, samples: impl IntoIterator<Item = SignalSample>) {
        self.samples.clear();
        self.samples.extend(samples);
        self.evict_oldest_if_over_capacity(self.capacity);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn to_series(&self) -> Vec<SignalSample> {
        self.samples.iter().copied().collect()
    }
}

impl Default for TimeSeriesBuffer {
    fn default() -> Self {
        Self::new(SERIES_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a TimeSeriesBuffer {
    type Item = &'a SignalSample;
    type IntoIter = vec_deque::Iter<'a, SignalSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
