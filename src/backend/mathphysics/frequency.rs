use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::backend::parameters::ParameterError;

use super::unit::{
    megahertz_to_gigahertz, megahertz_to_hertz, Gigahertz, Hertz, Megahertz
};


// The representation type needs to be updated if the `Megahertz` type is 
// changed.
#[repr(u32)]
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash, Deserialize, 
    Serialize
)]
pub enum Band {
    #[default]
    #[display("2.4")]
    Ghz2_4 = 2_400,
    #[display("5")]
    Ghz5   = 5_000,
}

impl Band {
    #[must_use]
    pub fn megahertz(self) -> Megahertz {
        self as Megahertz
    }

    #[must_use]
    pub fn gigahertz(self) -> Gigahertz {
        megahertz_to_gigahertz(self.megahertz())
    }

    #[must_use]
    pub fn hertz(self) -> Hertz {
        megahertz_to_hertz(self.megahertz())
    }
}

impl FromStr for Band {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "2.4" | "2.4ghz" => Ok(Self::Ghz2_4),
            "5" | "5ghz"     => Ok(Self::Ghz5),
            _ => Err(ParameterError::UnknownToken { 
                kind: "band", 
                token: token.to_string() 
            }),
        }
    }
}
