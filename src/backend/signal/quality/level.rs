use derive_more::Display;
use serde::{Deserialize, Serialize};


#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default, Debug, Display,
    Hash, Serialize, Deserialize
)]
pub enum QualityLabel {
    #[default]
    #[display("Very Poor")]
    VeryPoor,  // connection is barely usable
    #[display("Poor")]
    Poor,
    #[display("Fair")]
    Fair,
    #[display("Good")]
    Good,
    #[display("Excellent")]
    Excellent,
}

impl QualityLabel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Excellent
        } else if score > 60.0 {
            Self::Good
        } else if score > 40.0 {
            Self::Fair
        } else if score > 20.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }
}
