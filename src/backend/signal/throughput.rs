use std::ops::Range;

use derive_more::Display;
use rand::Rng;

use crate::backend::mathphysics::{Band, Decibel, Mbps};

use super::{Rssi, MIN_RSSI};


const MAX_SPEED_2_4GHZ: f64 = 600.0;
const MIN_SPEED_2_4GHZ: f64 = 37.0;
const MAX_SPEED_5GHZ: f64   = 9_600.0;
const MIN_SPEED_5GHZ: f64   = 270.0;

const MIN_SIGNAL_FRACTION_5GHZ: f64 = 0.1;
const SIGNAL_SPAN_5GHZ: f64         = 70.0;

const MIN_INTERFERENCE_FACTOR_2_4GHZ: f64 = 0.1;
const MIN_INTERFERENCE_FACTOR_5GHZ: f64   = 0.05;
const INTERFERENCE_SCALE_2_4GHZ: Decibel  = 150.0;
const INTERFERENCE_SCALE_5GHZ: Decibel    = 120.0;

const MAX_UPLOAD_SHARE: f64 = 0.9;


/// Speed bounds of a broadband plan, in Mbps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanCaps {
    download: f64,
    upload: f64,
}

impl PlanCaps {
    #[must_use]
    pub fn new(download: f64, upload: f64) -> Self {
        Self { download, upload }
    }

    #[must_use]
    pub fn download(&self) -> f64 {
        self.download
    }

    #[must_use]
    pub fn upload(&self) -> f64 {
        self.upload
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[display("{download}/{upload} Mbps")]
pub struct Throughput {
    download: Mbps,
    upload: Mbps,
}

impl Throughput {
    #[must_use]
    pub fn new(download: Mbps, upload: Mbps) -> Self {
        Self { download, upload }
    }

    #[must_use]
    pub fn download(&self) -> Mbps {
        self.download
    }

    #[must_use]
    pub fn upload(&self) -> Mbps {
        self.upload
    }
}


/// Link rate the band can reach at the given signal strength, before any
/// interference.
#[must_use]
pub fn max_theoretical_speed(band: Band, rssi: Rssi) -> f64 {
    match band {
        Band::Ghz2_4 => {
            let exponent = (rssi.value() + 30.0) / 30.0;

            (MAX_SPEED_2_4GHZ * 10f64.powf(exponent))
                .clamp(MIN_SPEED_2_4GHZ, MAX_SPEED_2_4GHZ)
        },
        Band::Ghz5 => {
            let fraction = ((rssi.value() - MIN_RSSI) / SIGNAL_SPAN_5GHZ)
                .max(MIN_SIGNAL_FRACTION_5GHZ);

            (MIN_SPEED_5GHZ + (MAX_SPEED_5GHZ - MIN_SPEED_5GHZ) * fraction)
                .clamp(MIN_SPEED_5GHZ, MAX_SPEED_5GHZ)
        },
    }
}

#[must_use]
pub fn interference_factor(band: Band, penalty: Decibel) -> f64 {
    match band {
        Band::Ghz2_4 => (1.0 - penalty / INTERFERENCE_SCALE_2_4GHZ)
            .max(MIN_INTERFERENCE_FACTOR_2_4GHZ),
        Band::Ghz5   => (1.0 - penalty / INTERFERENCE_SCALE_5GHZ)
            .max(MIN_INTERFERENCE_FACTOR_5GHZ),
    }
}

fn transfer_ratios(band: Band) -> (Range<f64>, Range<f64>) {
    match band {
        Band::Ghz2_4 => (0.70..0.90, 0.40..0.70),
        Band::Ghz5   => (0.80..0.95, 0.60..0.85),
    }
}

fn round_to_mbps(speed: f64) -> Mbps {
    speed.round().max(0.0) as Mbps
}


/// Estimates download and upload speeds.
///
/// The link rate is derated by interference, capped by the plan, and split
/// into download and upload with ratios drawn from `rng`. Upload never
/// exceeds 90% of download, before or after rounding to whole Mbps.
pub fn estimate_throughput<R: Rng + ?Sized>(
    band: Band,
    rssi: Rssi,
    penalty: Decibel,
    caps: Option<PlanCaps>,
    rng: &mut R,
) -> Throughput {
    let mut actual = max_theoretical_speed(band, rssi)
        * interference_factor(band, penalty);

    if let Some(caps) = caps {
        actual = actual.min(caps.download());
    }

    let (download_ratio, upload_ratio) = transfer_ratios(band);
    let mut download = actual * rng.random_range(download_ratio);
    let mut upload   = actual * rng.random_range(upload_ratio);

    upload = upload.min(download * MAX_UPLOAD_SHARE);

    if let Some(caps) = caps {
        download = download.min(caps.download());
        upload   = upload.min(caps.upload());
    }

    let download = round_to_mbps(download);
    let upload   = round_to_mbps(upload)
        .min((f64::from(download) * MAX_UPLOAD_SHARE).floor() as Mbps);

    Throughput { download, upload }
}


#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;


    const SOME_SEED: u64        = 42;
    const SOME_PENALTY: Decibel = 21.0;
    const DRAW_COUNT: usize     = 500;


    fn some_rng() -> StdRng {
        StdRng::seed_from_u64(SOME_SEED)
    }


    #[test]
    fn upload_never_exceeds_most_of_download() {
        let mut rng = some_rng();

        for band in [Band::Ghz2_4, Band::Ghz5] {
            for step in 0..DRAW_COUNT {
                let rssi    = Rssi::new(-100.0 + (step % 71) as f64);
                let penalty = (step % 120) as f64;

                let throughput = estimate_throughput(
                    band,
                    rssi,
                    penalty,
                    None,
                    &mut rng
                );

                assert!(
                    f64::from(throughput.upload())
                        <= 0.9 * f64::from(throughput.download()),
                    "{throughput} at {rssi} with {penalty}"
                );
            }
        }
    }

    #[test]
    fn higher_band_speed_at_the_floor() {
        let speed = max_theoretical_speed(Band::Ghz5, Rssi::floor());

        assert!((speed - 1_203.0).abs() < 1e-9);
    }

    #[test]
    fn higher_band_speed_at_the_ceiling() {
        let speed = max_theoretical_speed(Band::Ghz5, Rssi::new(-30.0));

        assert!((speed - 9_600.0).abs() < 1e-9);
    }

    #[test]
    fn lower_band_speed_is_clamped() {
        assert_eq!(max_theoretical_speed(Band::Ghz2_4, Rssi::floor()), 37.0);
        assert_eq!(max_theoretical_speed(Band::Ghz2_4, Rssi::new(-30.0)), 600.0);

        let speed = max_theoretical_speed(Band::Ghz2_4, Rssi::new(-60.0));

        assert!((speed - 60.0).abs() < 1e-9);
    }

    #[test]
    fn interference_factor_floors() {
        assert_eq!(interference_factor(Band::Ghz2_4, 1_000.0), 0.1);
        assert_eq!(interference_factor(Band::Ghz5, 1_000.0), 0.05);
        assert!((interference_factor(Band::Ghz2_4, 30.0) - 0.8).abs() < 1e-9);
        assert!((interference_factor(Band::Ghz5, 30.0) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn plan_caps_are_respected() {
        let mut rng = some_rng();
        let caps    = PlanCaps::new(50.0, 10.0);

        for _ in 0..DRAW_COUNT {
            let throughput = estimate_throughput(
                Band::Ghz5,
                Rssi::new(-30.0),
                SOME_PENALTY,
                Some(caps),
                &mut rng
            );

            assert!(throughput.download() <= 50);
            assert!(throughput.upload() <= 10);
        }
    }

    #[test]
    fn download_stays_within_ratio_bounds() {
        let mut rng = some_rng();
        let actual  = max_theoretical_speed(Band::Ghz2_4, Rssi::new(-30.0))
            * interference_factor(Band::Ghz2_4, SOME_PENALTY);

        for _ in 0..DRAW_COUNT {
            let throughput = estimate_throughput(
                Band::Ghz2_4,
                Rssi::new(-30.0),
                SOME_PENALTY,
                None,
                &mut rng
            );
            let download = f64::from(throughput.download());

            assert!(download >= (actual * 0.7).round());
            assert!(download <= (actual * 0.9).round());
        }
    }

    #[test]
    fn same_seed_same_throughput() {
        let estimate = |rng: &mut StdRng| estimate_throughput(
            Band::Ghz5,
            Rssi::new(-55.0),
            SOME_PENALTY,
            None,
            rng
        );

        let first  = estimate(&mut some_rng());
        let second = estimate(&mut some_rng());

        assert_eq!(first, second);
    }

    #[test]
    fn throughput_display() {
        assert_eq!(Throughput::new(120, 80).to_string(), "120/80 Mbps");
    }
}
