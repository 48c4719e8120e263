use std::str::FromStr;

use derive_more::Display;

use crate::backend::mathphysics::{Band, Decibel, Megahertz, Meter, Milliwatt};

use super::{Channel, ParameterError};


pub const DEFAULT_POWER_2_4GHZ: Milliwatt     = 100;
pub const DEFAULT_POWER_5GHZ: Milliwatt       = 200;
pub const DEFAULT_BANDWIDTH_2_4GHZ: Megahertz = 20;
pub const DEFAULT_BANDWIDTH_5GHZ: Megahertz   = 80;
pub const DEFAULT_MOUNT_HEIGHT: Meter         = 1.5;


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum Antenna {
    #[display("internal")]
    Internal,
    #[default]
    #[display("external")]
    External,
    #[display("high-gain")]
    HighGain,
}

impl Antenna {
    #[must_use]
    pub fn gain(self) -> Decibel {
        match self {
            Self::Internal => 0.0,
            Self::External => 3.0,
            Self::HighGain => 6.0,
        }
    }
}

impl FromStr for Antenna {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "internal"                => Ok(Self::Internal),
            "external"                => Ok(Self::External),
            "high-gain" | "highgain"  => Ok(Self::HighGain),
            _ => Err(ParameterError::UnknownToken { 
                kind: "antenna", 
                token: token.to_string() 
            }),
        }
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum MountLocation {
    #[default]
    #[display("center")]
    Center,
    #[display("corner")]
    Corner,
    #[display("wall")]
    Wall,
    #[display("ceiling")]
    Ceiling,
}

impl FromStr for MountLocation {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "center"  => Ok(Self::Center),
            "corner"  => Ok(Self::Corner),
            "wall"    => Ok(Self::Wall),
            "ceiling" => Ok(Self::Ceiling),
            _ => Err(ParameterError::UnknownToken { 
                kind: "mount location", 
                token: token.to_string() 
            }),
        }
    }
}


#[derive(Clone, Debug, Display, Eq, PartialEq, Hash)]
#[display("{power}mW, channel {channel}, {bandwidth}MHz")]
pub struct RadioSpec {
    power: Milliwatt,
    channel: Channel,
    bandwidth: Megahertz,
}

impl RadioSpec {
    #[must_use]
    pub fn new(power: Milliwatt, channel: Channel, bandwidth: Megahertz) -> Self {
        Self { power, channel, bandwidth }
    }

    #[must_use]
    pub fn power(&self) -> Milliwatt {
        self.power
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn bandwidth(&self) -> Megahertz {
        self.bandwidth
    }

    #[must_use]
    pub fn default_on(band: Band) -> Self {
        match band {
            Band::Ghz2_4 => Self::new(
                DEFAULT_POWER_2_4GHZ, 
                Channel::Auto, 
                DEFAULT_BANDWIDTH_2_4GHZ
            ),
            Band::Ghz5   => Self::new(
                DEFAULT_POWER_5GHZ, 
                Channel::Auto, 
                DEFAULT_BANDWIDTH_5GHZ
            ),
        }
    }
}


#[derive(Clone, Debug, Default)]
pub struct RouterSpecBuilder {
    radio_2_4ghz: Option<RadioSpec>,
    radio_5ghz: Option<RadioSpec>,
    antenna: Option<Antenna>,
    mount_height: Option<Meter>,
    mount_location: Option<MountLocation>,
}

impl RouterSpecBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_radio(mut self, band: Band, radio: RadioSpec) -> Self {
        match band {
            Band::Ghz2_4 => self.radio_2_4ghz = Some(radio),
            Band::Ghz5   => self.radio_5ghz = Some(radio),
        }
        self
    }

    #[must_use]
    pub fn set_antenna(mut self, antenna: Antenna) -> Self {
        self.antenna = Some(antenna);
        self
    }

    #[must_use]
    pub fn set_mount_height(mut self, mount_height: Meter) -> Self {
        self.mount_height = Some(mount_height);
        self
    }

    #[must_use]
    pub fn set_mount_location(mut self, mount_location: MountLocation) -> Self {
        self.mount_location = Some(mount_location);
        self
    }

    #[must_use]
    pub fn build(self) -> RouterSpec {
        RouterSpec {
            radio_2_4ghz: self.radio_2_4ghz
                .unwrap_or_else(|| RadioSpec::default_on(Band::Ghz2_4)),
            radio_5ghz: self.radio_5ghz
                .unwrap_or_else(|| RadioSpec::default_on(Band::Ghz5)),
            antenna: self.antenna.unwrap_or_default(),
            mount_height: self.mount_height.unwrap_or(DEFAULT_MOUNT_HEIGHT),
            mount_location: self.mount_location.unwrap_or_default(),
        }
    }
}

impl From<&RouterSpec> for RouterSpecBuilder {
    fn from(router: &RouterSpec) -> Self {
        Self {
            radio_2_4ghz: Some(router.radio_2_4ghz.clone()),
            radio_5ghz: Some(router.radio_5ghz.clone()),
            antenna: Some(router.antenna),
            mount_height: Some(router.mount_height),
            mount_location: Some(router.mount_location),
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct RouterSpec {
    radio_2_4ghz: RadioSpec,
    radio_5ghz: RadioSpec,
    antenna: Antenna,
    mount_height: Meter,
    mount_location: MountLocation,
}

impl RouterSpec {
    #[must_use]
    pub fn radio_on(&self, band: Band) -> &RadioSpec {
        match band {
            Band::Ghz2_4 => &self.radio_2_4ghz,
            Band::Ghz5   => &self.radio_5ghz,
        }
    }

    #[must_use]
    pub fn antenna(&self) -> Antenna {
        self.antenna
    }

    #[must_use]
    pub fn mount_height(&self) -> Meter {
        self.mount_height
    }

    #[must_use]
    pub fn mount_location(&self) -> MountLocation {
        self.mount_location
    }
}

impl Default for RouterSpec {
    fn default() -> Self {
        RouterSpecBuilder::new().build()
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn default_router_uses_band_defaults() {
        let router = RouterSpec::default();

        assert_eq!(router.radio_on(Band::Ghz2_4).power(), DEFAULT_POWER_2_4GHZ);
        assert_eq!(router.radio_on(Band::Ghz5).bandwidth(), DEFAULT_BANDWIDTH_5GHZ);
        assert!(router.radio_on(Band::Ghz5).channel().is_auto());
        assert_eq!(router.antenna(), Antenna::External);
    }

    #[test]
    fn builder_from_router_changes_only_set_fields() {
        let router = RouterSpecBuilder::new()
            .set_antenna(Antenna::HighGain)
            .build();

        let changed = RouterSpecBuilder::from(&router)
            .set_radio(Band::Ghz5, RadioSpec::new(500, Channel::Number(149), 160))
            .build();

        assert_eq!(changed.antenna(), Antenna::HighGain);
        assert_eq!(changed.radio_on(Band::Ghz5).channel().number(), Some(149));
        assert_eq!(changed.radio_on(Band::Ghz2_4), router.radio_on(Band::Ghz2_4));
    }

    #[test]
    fn radio_summary() {
        let radio = RadioSpec::new(100, Channel::Number(6), 40);

        assert_eq!(radio.to_string(), "100mW, channel 6, 40MHz");
    }

    #[test]
    fn antenna_gain_grows_with_class() {
        assert!(Antenna::Internal.gain() < Antenna::External.gain());
        assert!(Antenna::External.gain() < Antenna::HighGain.gain());
    }
}
