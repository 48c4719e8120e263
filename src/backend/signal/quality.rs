use derive_more::Display;

use crate::backend::mathphysics::{Dbm, Decibel};

use super::Rssi;


pub use level::*;


pub mod level;


const MAX_SCORE: f64 = 100.0;
const INTERFERENCE_WEIGHT: f64 = 0.5;

// Upper bounds of RSSI brackets with the score deducted inside them.
const RSSI_DEDUCTIONS: [(Dbm, f64); 4] = [
    (-90.0, 80.0),
    (-70.0, 60.0),
    (-50.0, 30.0),
    (-30.0, 10.0),
];


#[derive(
    Clone, Copy, Debug, Display, Default, Eq, PartialEq, Ord, PartialOrd
)]
#[display("{label}({score})")]
pub struct SignalQuality {
    score: u8,
    label: QualityLabel,
}

impl SignalQuality {
    /// Scores the connection from 0 to 100.
    ///
    /// The label is taken from the exact score, the reported score is
    /// rounded.
    #[must_use]
    pub fn assess(rssi: Rssi, penalty: Decibel) -> Self {
        let raw_score = (MAX_SCORE
            - rssi_deduction(rssi.value())
            - penalty * INTERFERENCE_WEIGHT)
            .clamp(0.0, MAX_SCORE);

        Self {
            score: raw_score.round() as u8,
            label: QualityLabel::from_score(raw_score),
        }
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn label(&self) -> QualityLabel {
        self.label
    }
}

fn rssi_deduction(rssi: Dbm) -> f64 {
    RSSI_DEDUCTIONS
        .iter()
        .find(|(upper_bound, _)| rssi <= *upper_bound)
        .map_or(0.0, |(_, deduction)| *deduction)
}


#[cfg(test)]
mod tests {
    use super::*;


    const SOME_PENALTY: Decibel = 21.0;


    #[test]
    fn quality_grows_with_rssi() {
        let mut previous = SignalQuality::assess(Rssi::floor(), SOME_PENALTY);

        for step in 1..=70 {
            let rssi    = Rssi::new(-100.0 + f64::from(step));
            let quality = SignalQuality::assess(rssi, SOME_PENALTY);

            assert!(quality >= previous, "{quality} < {previous} at {rssi}");
            assert!(quality.label() >= previous.label());

            previous = quality;
        }
    }

    #[test]
    fn bracket_edges() {
        assert_eq!(rssi_deduction(-100.0), 80.0);
        assert_eq!(rssi_deduction(-90.0), 80.0);
        assert_eq!(rssi_deduction(-89.9), 60.0);
        assert_eq!(rssi_deduction(-70.0), 60.0);
        assert_eq!(rssi_deduction(-50.0), 30.0);
        assert_eq!(rssi_deduction(-30.0), 10.0);
        assert_eq!(rssi_deduction(-29.0), 0.0);
    }

    #[test]
    fn label_is_decided_before_rounding() {
        // 100 - 30 - 59.1 * 0.5 = 40.45
        let quality = SignalQuality::assess(Rssi::new(-51.0), 59.1);

        assert_eq!(quality.score(), 40);
        assert_eq!(quality.label(), QualityLabel::Fair);

        // 100 - 30 - 60.1 * 0.5 = 39.95
        let quality = SignalQuality::assess(Rssi::new(-51.0), 60.1);

        assert_eq!(quality.score(), 40);
        assert_eq!(quality.label(), QualityLabel::Poor);
    }

    #[test]
    fn strong_signal_without_interference_is_excellent() {
        let quality = SignalQuality::assess(Rssi::new(-30.0), 0.0);

        assert_eq!(quality.score(), 90);
        assert_eq!(quality.label(), QualityLabel::Excellent);
    }

    #[test]
    fn score_is_clamped_to_zero() {
        let quality = SignalQuality::assess(Rssi::floor(), 200.0);

        assert_eq!(quality.score(), 0);
        assert_eq!(quality.label(), QualityLabel::VeryPoor);
        assert_eq!(quality.to_string(), "Very Poor(0)");
    }

    #[test]
    fn scenario_floor_signal() {
        let quality = SignalQuality::assess(Rssi::floor(), SOME_PENALTY);

        assert_eq!(quality.score(), 10);
        assert_eq!(quality.label(), QualityLabel::VeryPoor);
    }
}
