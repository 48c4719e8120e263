use std::fmt;
use std::ops;

use impl_ops::{
    _impl_binary_op_borrowed_borrowed, _impl_binary_op_borrowed_owned, 
    _impl_binary_op_internal, _impl_binary_op_owned_borrowed, 
    _impl_binary_op_owned_owned, _parse_binary_op, impl_op, impl_op_ex
};

use crate::backend::mathphysics::{
    free_space_path_loss, Band, Dbm, Decibel, Meter, PathLossModel, Percent
};


pub const MAX_RSSI: Dbm = -30.0;
pub const MIN_RSSI: Dbm = -100.0;

const REFERENCE_TX_POWER: f64 = 100.0;


fn band_offset(band: Band) -> Dbm {
    match band {
        Band::Ghz2_4 => -30.0,
        Band::Ghz5   => -35.0,
    }
}

fn wall_loss_per_wall(band: Band) -> Decibel {
    match band {
        Band::Ghz2_4 => 4.0,
        Band::Ghz5   => 10.0,
    }
}

fn tx_power_sensitivity(band: Band) -> f64 {
    match band {
        Band::Ghz2_4 => 0.5,
        Band::Ghz5   => 0.8,
    }
}


/// Estimates the received signal strength before interference is taken into
/// account.
///
/// The result is `offset - path loss - wall loss + power effect`, where the
/// band offset, the per-wall loss and the power sensitivity are band
/// constants and the power effect is linear around a 100% reference.
#[must_use]
pub fn estimate_base_rssi(
    band: Band,
    distance: Meter,
    walls: u32,
    tx_power: Percent,
    path_loss_model: PathLossModel,
) -> Rssi {
    let path_loss    = free_space_path_loss(band, distance, path_loss_model);
    let wall_loss    = f64::from(walls) * wall_loss_per_wall(band);
    let power_effect = (f64::from(tx_power) - REFERENCE_TX_POWER) 
        * tx_power_sensitivity(band);

    Rssi::new(band_offset(band) - path_loss - wall_loss + power_effect)
}


// Always within `MIN_RSSI..=MAX_RSSI`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Rssi(Dbm);

impl Rssi {
    #[must_use]
    pub fn new(value: Dbm) -> Self {
        Self(value.clamp(MIN_RSSI, MAX_RSSI))
    }

    #[must_use]
    pub fn floor() -> Self {
        Self(MIN_RSSI)
    }

    #[must_use]
    pub fn value(&self) -> Dbm {
        self.0
    }

    #[must_use]
    pub fn meter_percentage(&self) -> f64 {
        ((self.0 - MIN_RSSI) / (MAX_RSSI - MIN_RSSI) * 100.0).clamp(0.0, 100.0)
    }
}

impl_op_ex!(
    + |a: &Rssi, b: &Decibel| -> Rssi { 
        Rssi::new(a.0 + b)
    }
);
impl_op_ex!(
    - |a: &Rssi, b: &Decibel| -> Rssi { 
        Rssi::new(a.0 - b)
    }
);

impl fmt::Display for Rssi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} dBm", self.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    const SOME_TX_POWER: Percent = 100;


    fn base_rssi(band: Band, distance: Meter, walls: u32) -> Rssi {
        estimate_base_rssi(
            band, 
            distance, 
            walls, 
            SOME_TX_POWER, 
            PathLossModel::Physical
        )
    }


    #[test]
    fn rssi_is_always_within_range() {
        for band in [Band::Ghz2_4, Band::Ghz5] {
            for model in [PathLossModel::Physical, PathLossModel::Literal] {
                for distance in [0.01, 0.5, 1.0, 3.0, 10.0, 50.0, 1_000.0] {
                    for walls in [0, 1, 5, 20] {
                        for tx_power in [0, 50, 100, 200, 1_000] {
                            let rssi = estimate_base_rssi(
                                band, distance, walls, tx_power, model
                            );

                            assert!(
                                (MIN_RSSI..=MAX_RSSI).contains(&rssi.value())
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn more_walls_never_increase_rssi() {
        for band in [Band::Ghz2_4, Band::Ghz5] {
            for distance in [1.0, 3.0, 10.0] {
                let mut previous = base_rssi(band, distance, 0);

                for walls in 1..30 {
                    let current = base_rssi(band, distance, walls);

                    assert!(current <= previous);

                    previous = current;
                }
            }
        }
    }

    #[test]
    fn higher_band_is_weaker() {
        assert!(base_rssi(Band::Ghz2_4, 10.0, 2) > base_rssi(Band::Ghz5, 10.0, 2));
    }

    #[test]
    fn one_wall_at_three_meters() {
        let expected = -30.0 - free_space_path_loss(
            Band::Ghz2_4, 
            3.0, 
            PathLossModel::Physical
        ) - 4.0;

        let rssi = base_rssi(Band::Ghz2_4, 3.0, 1);

        assert!((rssi.value() - expected).abs() < 1e-9);
        assert!((rssi.value() + 83.588).abs() < 0.01);
    }

    #[test]
    fn far_higher_band_behind_walls_hits_floor() {
        assert_eq!(base_rssi(Band::Ghz5, 50.0, 5), Rssi::floor());
    }

    #[test]
    fn literal_path_loss_saturates_at_ceiling() {
        let rssi = estimate_base_rssi(
            Band::Ghz2_4, 
            3.0, 
            1, 
            SOME_TX_POWER, 
            PathLossModel::Literal
        );

        assert_eq!(rssi.value(), MAX_RSSI);
    }

    #[test]
    fn higher_band_is_more_power_sensitive() {
        let distance = 1.0;
        let walls    = 0;

        let gain_2_4ghz = base_rssi(Band::Ghz2_4, distance, walls).value() 
            - estimate_base_rssi(
                Band::Ghz2_4, distance, walls, 90, PathLossModel::Physical
            ).value();
        let gain_5ghz = base_rssi(Band::Ghz5, distance, walls).value() 
            - estimate_base_rssi(
                Band::Ghz5, distance, walls, 90, PathLossModel::Physical
            ).value();

        assert!((gain_2_4ghz - 5.0).abs() < 1e-9);
        assert!((gain_5ghz - 8.0).abs() < 1e-9);
    }

    #[test]
    fn arithmetic_keeps_rssi_in_range() {
        let rssi = Rssi::new(-50.0);

        assert_eq!((rssi - 100.0).value(), MIN_RSSI);
        assert_eq!((rssi + 100.0).value(), MAX_RSSI);
        assert_eq!((rssi - 10.0).value(), -60.0);
    }

    #[test]
    fn meter_percentage() {
        assert_eq!(Rssi::floor().meter_percentage(), 0.0);
        assert_eq!(Rssi::new(MAX_RSSI).meter_percentage(), 100.0);
        assert!((Rssi::new(-65.0).meter_percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn rssi_display() {
        assert_eq!(Rssi::new(-63.24).to_string(), "-63.2 dBm");
    }
}
