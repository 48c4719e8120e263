use rand::Rng;

use crate::backend::mathphysics::{Dbm, Tick};
use crate::backend::signal::Rssi;

use super::{SignalSample, SERIES_CAPACITY};


pub const EXPERIMENT_OVERLAY: Overlay = Overlay {
    sine_amplitude: 8.0,
    sine_rate: 0.2,
    cosine_amplitude: 5.0,
    cosine_rate: 0.1,
    noise: 1.0,
};
pub const DEMO_OVERLAY: Overlay       = Overlay {
    sine_amplitude: 15.0,
    sine_rate: 0.3,
    cosine_amplitude: 8.0,
    cosine_rate: 0.15,
    noise: 1.5,
};

pub const DEMO_BASE_RSSI: Dbm = -60.0;


/// Cosmetic wave added on top of a sample to make the chart look alive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    sine_amplitude: f64,
    sine_rate: f64,
    cosine_amplitude: f64,
    cosine_rate: f64,
    noise: f64,
}

impl Overlay {
    #[must_use]
    pub fn new(
        sine_amplitude: f64,
        sine_rate: f64,
        cosine_amplitude: f64,
        cosine_rate: f64,
        noise: f64,
    ) -> Self {
        Self { sine_amplitude, sine_rate, cosine_amplitude, cosine_rate, noise }
    }

    /// Offsets `rssi` by the wave at `time` plus uniform noise within
    /// `-noise..noise`, clamped back into the RSSI range.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        rssi: Rssi,
        time: f64,
        rng: &mut R
    ) -> Rssi {
        let wave = self.sine_amplitude * (self.sine_rate * time).sin()
            + self.cosine_amplitude * (self.cosine_rate * time).cos();
        let noise = if self.noise > 0.0 {
            rng.random_range(-self.noise..self.noise)
        } else {
            0.0
        };

        Rssi::new(rssi.value() + wave + noise)
    }
}


/// Placeholder series shown before any experiment has produced data.
pub fn demo_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<SignalSample> {
    let base = Rssi::new(DEMO_BASE_RSSI);

    (0..SERIES_CAPACITY as Tick)
        .map(|time| {
            SignalSample::new(time, DEMO_OVERLAY.apply(base, time as f64, rng))
        })
        .collect()
}
