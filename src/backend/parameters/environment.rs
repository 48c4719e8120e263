use std::convert::Infallible;
use std::str::FromStr;

use derive_more::Display;

use super::ParameterError;


pub const CHANNEL_AUTO: &str = "auto";


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum Weather {
    #[default]
    #[display("clear")]
    Clear,
    #[display("rainy")]
    Rainy,
    #[display("humid")]
    Humid,
    #[display("dry")]
    Dry,
}

impl FromStr for Weather {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "rainy" => Ok(Self::Rainy),
            "humid" => Ok(Self::Humid),
            "dry"   => Ok(Self::Dry),
            _ => Err(ParameterError::UnknownToken { 
                kind: "weather", 
                token: token.to_string() 
            }),
        }
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum TimeOfDay {
    #[default]
    #[display("morning")]
    Morning,
    #[display("afternoon")]
    Afternoon,
    #[display("evening")]
    Evening,
    // Covers every hour the other variants do not.
    #[display("night")]
    Night,
}

impl FromStr for TimeOfDay {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "morning"   => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening"   => Ok(Self::Evening),
            "night"     => Ok(Self::Night),
            _ => Err(ParameterError::UnknownToken { 
                kind: "time of day", 
                token: token.to_string() 
            }),
        }
    }
}


// Channel tokens are free-form and compared verbatim: anything that is neither
// exactly `auto` nor a channel number in plain decimal form is kept as is and
// treated as an "other" channel.
#[derive(Clone, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum Channel {
    #[default]
    #[display("auto")]
    Auto,
    #[display("{_0}")]
    Number(u16),
    #[display("{_0}")]
    Other(String),
}

impl Channel {
    #[must_use]
    pub fn number(&self) -> Option<u16> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Auto | Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for Channel {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token == CHANNEL_AUTO {
            return Ok(Self::Auto);
        }

        let channel = match token.parse::<u16>() {
            Ok(number) if number.to_string() == token => Self::Number(number),
            _ => Self::Other(token.to_string()),
        };

        Ok(channel)
    }
}
