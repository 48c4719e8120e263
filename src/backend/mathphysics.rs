use std::f64::consts::PI;

use derive_more::Display;
use serde::{Deserialize, Serialize};


pub use frequency::Band;
pub use unit::*;


pub mod frequency;
pub mod unit;


// Which unit the band frequency is fed in to the free-space path loss 
// formula.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize
)]
pub enum PathLossModel {
    // Frequency in hertz, so the `4π/c` term yields real free-space losses.
    #[default]
    #[display("physical")]
    Physical,
    // The band value is used as is (2.4 or 5). The loss is negative for any
    // indoor distance, so the received level saturates at the band ceiling.
    #[display("literal")]
    Literal,
}


#[must_use]
pub fn free_space_path_loss(
    band: Band,
    distance: Meter,
    model: PathLossModel
) -> Decibel {
    let frequency = match model {
        PathLossModel::Physical => band.hertz(),
        PathLossModel::Literal  => band.gigahertz(),
    };

    20.0 * frequency.log10() 
        + 20.0 * distance.log10() 
        + 20.0 * (4.0 * PI / SPEED_OF_LIGHT).log10()
}
