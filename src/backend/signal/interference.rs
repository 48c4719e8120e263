use derive_more::Display;

use crate::backend::mathphysics::{Band, Decibel};
use crate::backend::parameters::{Channel, TimeOfDay, Weather};


const SLIDER_WEIGHT: f64 = 0.3;

const NON_OVERLAPPING_CHANNELS_2_4GHZ: [u16; 3] = [1, 6, 11];
const UNII_1_CHANNELS: [u16; 4]                 = [36, 40, 44, 48];
const UNII_3_CHANNELS: [u16; 4]                 = [149, 153, 157, 161];

const MAX_LOW_INTERFERENCE: u8      = 20;
const MAX_MODERATE_INTERFERENCE: u8 = 50;
const MAX_HIGH_INTERFERENCE: u8     = 80;


/// Sums the interference penalty of the slider baseline, the channel choice,
/// the weather and the time of day.
#[must_use]
pub fn estimate_interference(
    slider: u8,
    channel: &Channel,
    weather: Weather,
    time_of_day: TimeOfDay,
    band: Band,
) -> Decibel {
    f64::from(slider) * SLIDER_WEIGHT
        + channel_penalty(band, channel)
        + weather_penalty(band, weather)
        + time_of_day_penalty(time_of_day)
}

fn channel_penalty(band: Band, channel: &Channel) -> Decibel {
    let number = channel.number();
    let is_one_of = |channels: &[u16]| {
        number.is_some_and(|number| channels.contains(&number))
    };

    match band {
        Band::Ghz2_4 if is_one_of(&NON_OVERLAPPING_CHANNELS_2_4GHZ) => 5.0,
        Band::Ghz2_4 if channel.is_auto()                            => 15.0,
        Band::Ghz2_4                                                 => 25.0,
        Band::Ghz5 if is_one_of(&UNII_1_CHANNELS)                    => 3.0,
        Band::Ghz5 if is_one_of(&UNII_3_CHANNELS)                    => 5.0,
        Band::Ghz5 if channel.is_auto()                              => 8.0,
        Band::Ghz5                                                   => 10.0,
    }
}

// The higher band is more sensitive to moisture.
fn weather_penalty(band: Band, weather: Weather) -> Decibel {
    match (weather, band) {
        (Weather::Rainy, Band::Ghz2_4) => 20.0,
        (Weather::Rainy, Band::Ghz5)   => 35.0,
        (Weather::Humid, Band::Ghz2_4) => 15.0,
        (Weather::Humid, Band::Ghz5)   => 25.0,
        (Weather::Dry, Band::Ghz2_4)   => 5.0,
        (Weather::Dry, Band::Ghz5)     => 8.0,
        (Weather::Clear, _)            => 0.0,
    }
}

fn time_of_day_penalty(time_of_day: TimeOfDay) -> Decibel {
    match time_of_day {
        TimeOfDay::Evening   => 25.0,
        TimeOfDay::Afternoon => 15.0,
        TimeOfDay::Morning   => 10.0,
        TimeOfDay::Night     => 5.0,
    }
}


/// Coarse reading of the interference slider shown next to its meter.
#[derive(
    Clone, Copy, Debug, Display, Eq, PartialEq, Ord, PartialOrd, Hash
)]
pub enum InterferenceLabel {
    #[display("Low")]
    Low,
    #[display("Moderate")]
    Moderate,
    #[display("High")]
    High,
    #[display("Very high")]
    VeryHigh,
}

impl InterferenceLabel {
    #[must_use]
    pub fn from_slider(slider: u8) -> Self {
        if slider < MAX_LOW_INTERFERENCE {
            Self::Low
        } else if slider < MAX_MODERATE_INTERFERENCE {
            Self::Moderate
        } else if slider < MAX_HIGH_INTERFERENCE {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}
