use thiserror::Error;

use super::mathphysics::{Band, Meter, Percent};


pub use broadband::*;
pub use environment::*;
pub use router::*;


pub mod broadband;
pub mod environment;
pub mod router;


pub const DEFAULT_BAND: Band               = Band::Ghz2_4;
pub const DEFAULT_DISTANCE: Meter          = 3.0;
pub const DEFAULT_WALLS: u32               = 1;
pub const DEFAULT_INTERFERENCE: u8         = 20;
pub const DEFAULT_CHANNEL: Channel         = Channel::Number(1);
pub const DEFAULT_TX_POWER: Percent        = 100;
pub const DEFAULT_WEATHER: Weather         = Weather::Clear;
pub const DEFAULT_TIME_OF_DAY: TimeOfDay   = TimeOfDay::Morning;

pub const MAX_INTERFERENCE: u8 = 100;


#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("Distance must be positive, got `{0}`")]
    InvalidDistance(Meter),
    #[error("Interference must be within 0..=100, got `{0}`")]
    InterferenceOutOfRange(u8),
    #[error("Unknown {kind} `{token}`")]
    UnknownToken {
        kind: &'static str,
        token: String,
    },
}


#[derive(Clone, Debug, Default)]
pub struct ParameterSetBuilder {
    band: Option<Band>,
    distance: Option<Meter>,
    walls: Option<u32>,
    interference: Option<u8>,
    channel: Option<Channel>,
    tx_power: Option<Percent>,
    weather: Option<Weather>,
    time_of_day: Option<TimeOfDay>,
    router: Option<RouterSpec>,
    broadband: Option<BroadbandPlan>,
}

impl ParameterSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    #[must_use]
    pub fn set_distance(mut self, distance: Meter) -> Self {
        self.distance = Some(distance);
        self
    }

    #[must_use]
    pub fn set_walls(mut self, walls: u32) -> Self {
        self.walls = Some(walls);
        self
    }

    #[must_use]
    pub fn set_interference(mut self, interference: u8) -> Self {
        self.interference = Some(interference);
        self
    }

    #[must_use]
    pub fn set_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn set_tx_power(mut self, tx_power: Percent) -> Self {
        self.tx_power = Some(tx_power);
        self
    }

    #[must_use]
    pub fn set_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    #[must_use]
    pub fn set_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    #[must_use]
    pub fn set_router(mut self, router: Option<RouterSpec>) -> Self {
        self.router = router;
        self
    }

    #[must_use]
    pub fn set_broadband(mut self, broadband: Option<BroadbandPlan>) -> Self {
        self.broadband = broadband;
        self
    }

    /// # Errors
    ///
    /// Will return `Err` if the distance is not positive or the interference
    /// is above `MAX_INTERFERENCE`.
    pub fn build(self) -> Result<ParameterSet, ParameterError> {
        let distance = self.distance.unwrap_or(DEFAULT_DISTANCE);
        // Also rejects NaN.
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(ParameterError::InvalidDistance(distance));
        }

        let interference = self.interference.unwrap_or(DEFAULT_INTERFERENCE);
        if interference > MAX_INTERFERENCE {
            return Err(ParameterError::InterferenceOutOfRange(interference));
        }

        Ok(ParameterSet {
            band: self.band.unwrap_or(DEFAULT_BAND),
            distance,
            walls: self.walls.unwrap_or(DEFAULT_WALLS),
            interference,
            channel: self.channel.unwrap_or(DEFAULT_CHANNEL),
            tx_power: self.tx_power.unwrap_or(DEFAULT_TX_POWER),
            weather: self.weather.unwrap_or(DEFAULT_WEATHER),
            time_of_day: self.time_of_day.unwrap_or(DEFAULT_TIME_OF_DAY),
            router: self.router,
            broadband: self.broadband,
        })
    }
}

impl From<&ParameterSet> for ParameterSetBuilder {
    fn from(parameters: &ParameterSet) -> Self {
        Self {
            band: Some(parameters.band),
            distance: Some(parameters.distance),
            walls: Some(parameters.walls),
            interference: Some(parameters.interference),
            channel: Some(parameters.channel.clone()),
            tx_power: Some(parameters.tx_power),
            weather: Some(parameters.weather),
            time_of_day: Some(parameters.time_of_day),
            router: parameters.router.clone(),
            broadband: parameters.broadband,
        }
    }
}


// A snapshot of every simulator input. A new one is built on each change, 
// it is never mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    band: Band,
    distance: Meter,
    walls: u32,
    interference: u8,
    channel: Channel,
    tx_power: Percent,
    weather: Weather,
    time_of_day: TimeOfDay,
    router: Option<RouterSpec>,
    broadband: Option<BroadbandPlan>,
}

impl ParameterSet {
    #[must_use]
    pub fn band(&self) -> Band {
        self.band
    }

    #[must_use]
    pub fn distance(&self) -> Meter {
        self.distance
    }

    #[must_use]
    pub fn walls(&self) -> u32 {
        self.walls
    }

    #[must_use]
    pub fn interference(&self) -> u8 {
        self.interference
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn tx_power(&self) -> Percent {
        self.tx_power
    }

    #[must_use]
    pub fn weather(&self) -> Weather {
        self.weather
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    #[must_use]
    pub fn router(&self) -> Option<&RouterSpec> {
        self.router.as_ref()
    }

    #[must_use]
    pub fn broadband(&self) -> Option<&BroadbandPlan> {
        self.broadband.as_ref()
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            band: DEFAULT_BAND,
            distance: DEFAULT_DISTANCE,
            walls: DEFAULT_WALLS,
            interference: DEFAULT_INTERFERENCE,
            channel: DEFAULT_CHANNEL,
            tx_power: DEFAULT_TX_POWER,
            weather: DEFAULT_WEATHER,
            time_of_day: DEFAULT_TIME_OF_DAY,
            router: None,
            broadband: None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn empty_builder_yields_defaults() {
        let parameters = ParameterSetBuilder::new()
            .build()
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(parameters, ParameterSet::default());
    }

    #[test]
    fn building_with_non_positive_distance_is_impossible() {
        for distance in [0.0, -5.0, f64::NAN] {
            let result = ParameterSetBuilder::new()
                .set_distance(distance)
                .build();

            assert!(matches!(result, Err(ParameterError::InvalidDistance(_))));
        }
    }

    #[test]
    fn building_with_too_much_interference_is_impossible() {
        let result = ParameterSetBuilder::new()
            .set_interference(MAX_INTERFERENCE + 1)
            .build();

        assert_eq!(
            result, 
            Err(ParameterError::InterferenceOutOfRange(MAX_INTERFERENCE + 1))
        );
    }

    #[test]
    fn builder_from_parameters_keeps_unset_fields() {
        let parameters = ParameterSetBuilder::new()
            .set_band(Band::Ghz5)
            .set_walls(4)
            .set_broadband(Some(BroadbandPlan::default()))
            .build()
            .unwrap_or_else(|error| panic!("{}", error));

        let changed = ParameterSetBuilder::from(&parameters)
            .set_distance(12.5)
            .build()
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(changed.band(), Band::Ghz5);
        assert_eq!(changed.walls(), 4);
        assert_eq!(changed.distance(), 12.5);
        assert_eq!(changed.broadband(), parameters.broadband());
    }
}
