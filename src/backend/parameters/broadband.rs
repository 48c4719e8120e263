use std::str::FromStr;

use derive_more::Display;

use crate::backend::signal::PlanCaps;

use super::ParameterError;


pub const DEFAULT_MAX_DOWNLOAD: u32 = 500;
pub const DEFAULT_MAX_UPLOAD: u32   = 100;

const MBPS_IN_GBPS: f64 = 1_000.0;


fn unknown_token(kind: &'static str, token: &str) -> ParameterError {
    ParameterError::UnknownToken { kind, token: token.to_string() }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum SpeedUnit {
    #[default]
    #[display("Mbps")]
    Mbps,
    #[display("Gbps")]
    Gbps,
}

impl SpeedUnit {
    #[must_use]
    pub fn to_mbps(self, value: u32) -> f64 {
        match self {
            Self::Mbps => f64::from(value),
            Self::Gbps => f64::from(value) * MBPS_IN_GBPS,
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mbps" => Ok(Self::Mbps),
            "gbps" => Ok(Self::Gbps),
            _      => Err(unknown_token("speed unit", token)),
        }
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum Stability {
    #[default]
    #[display("stable")]
    Stable,
    #[display("moderate")]
    Moderate,
    #[display("unstable")]
    Unstable,
}

impl FromStr for Stability {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "stable"   => Ok(Self::Stable),
            "moderate" => Ok(Self::Moderate),
            "unstable" => Ok(Self::Unstable),
            _          => Err(unknown_token("stability", token)),
        }
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum InternetType {
    #[default]
    #[display("fiber")]
    Fiber,
    #[display("cable")]
    Cable,
    #[display("dsl")]
    Dsl,
    #[display("wireless")]
    Wireless,
}

impl FromStr for InternetType {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "fiber"    => Ok(Self::Fiber),
            "cable"    => Ok(Self::Cable),
            "dsl"      => Ok(Self::Dsl),
            "wireless" => Ok(Self::Wireless),
            _          => Err(unknown_token("internet type", token)),
        }
    }
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash)]
pub enum Congestion {
    #[default]
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

impl FromStr for Congestion {
    type Err = ParameterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "low"    => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high"   => Ok(Self::High),
            _        => Err(unknown_token("congestion", token)),
        }
    }
}


#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
#[display("{max}{unit} ({stability})")]
pub struct PlanSpeed {
    max: u32,
    unit: SpeedUnit,
    stability: Stability,
}

impl PlanSpeed {
    #[must_use]
    pub fn new(max: u32, unit: SpeedUnit, stability: Stability) -> Self {
        Self { max, unit, stability }
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    #[must_use]
    pub fn stability(&self) -> Stability {
        self.stability
    }

    #[must_use]
    pub fn max_in_mbps(&self) -> f64 {
        self.unit.to_mbps(self.max)
    }
}


#[derive(Clone, Debug, Default)]
pub struct BroadbandPlanBuilder {
    download: Option<PlanSpeed>,
    upload: Option<PlanSpeed>,
    internet_type: Option<InternetType>,
    congestion: Option<Congestion>,
}

impl BroadbandPlanBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_download(mut self, download: PlanSpeed) -> Self {
        self.download = Some(download);
        self
    }

    #[must_use]
    pub fn set_upload(mut self, upload: PlanSpeed) -> Self {
        self.upload = Some(upload);
        self
    }

    #[must_use]
    pub fn set_internet_type(mut self, internet_type: InternetType) -> Self {
        self.internet_type = Some(internet_type);
        self
    }

    #[must_use]
    pub fn set_congestion(mut self, congestion: Congestion) -> Self {
        self.congestion = Some(congestion);
        self
    }

    #[must_use]
    pub fn build(self) -> BroadbandPlan {
        BroadbandPlan {
            download: self.download.unwrap_or_else(|| PlanSpeed::new(
                DEFAULT_MAX_DOWNLOAD, 
                SpeedUnit::default(), 
                Stability::default()
            )),
            upload: self.upload.unwrap_or_else(|| PlanSpeed::new(
                DEFAULT_MAX_UPLOAD, 
                SpeedUnit::default(), 
                Stability::default()
            )),
            internet_type: self.internet_type.unwrap_or_default(),
            congestion: self.congestion.unwrap_or_default(),
        }
    }
}

impl From<&BroadbandPlan> for BroadbandPlanBuilder {
    fn from(plan: &BroadbandPlan) -> Self {
        Self {
            download: Some(plan.download),
            upload: Some(plan.upload),
            internet_type: Some(plan.internet_type),
            congestion: Some(plan.congestion),
        }
    }
}


#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BroadbandPlan {
    download: PlanSpeed,
    upload: PlanSpeed,
    internet_type: InternetType,
    congestion: Congestion,
}

impl BroadbandPlan {
    #[must_use]
    pub fn download(&self) -> PlanSpeed {
        self.download
    }

    #[must_use]
    pub fn upload(&self) -> PlanSpeed {
        self.upload
    }

    #[must_use]
    pub fn internet_type(&self) -> InternetType {
        self.internet_type
    }

    #[must_use]
    pub fn congestion(&self) -> Congestion {
        self.congestion
    }

    #[must_use]
    pub fn caps(&self) -> PlanCaps {
        PlanCaps::new(
            self.download.max_in_mbps(), 
            self.upload.max_in_mbps()
        )
    }
}

impl Default for BroadbandPlan {
    fn default() -> Self {
        BroadbandPlanBuilder::new().build()
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn caps_are_converted_to_mbps() {
        let plan = BroadbandPlanBuilder::new()
            .set_download(PlanSpeed::new(1, SpeedUnit::Gbps, Stability::Stable))
            .set_upload(PlanSpeed::new(300, SpeedUnit::Mbps, Stability::Unstable))
            .build();

        let caps = plan.caps();

        assert_eq!(caps.download(), 1_000.0);
        assert_eq!(caps.upload(), 300.0);
    }

    #[test]
    fn default_plan() {
        let plan = BroadbandPlan::default();

        assert_eq!(plan.download().max(), DEFAULT_MAX_DOWNLOAD);
        assert_eq!(plan.upload().max(), DEFAULT_MAX_UPLOAD);
        assert_eq!(plan.internet_type(), InternetType::Fiber);
        assert_eq!(plan.congestion(), Congestion::Low);
    }

    #[test]
    fn parsing_plan_tokens() {
        assert_eq!("Gbps".parse::<SpeedUnit>(), Ok(SpeedUnit::Gbps));
        assert_eq!("moderate".parse::<Stability>(), Ok(Stability::Moderate));
        assert_eq!("DSL".parse::<InternetType>(), Ok(InternetType::Dsl));
        assert!("jammed".parse::<Congestion>().is_err());
    }
}
