use derive_more::Display;

use super::mathphysics::Band;
use super::parameters::{
    Antenna, BroadbandPlan, Congestion, InternetType, MountLocation,
    PlanSpeed, RadioSpec, RouterSpec, Stability
};


#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum AdviceTopic {
    #[display("2.4GHz power")]
    LowerBandPower,
    #[display("2.4GHz channel")]
    LowerBandChannel,
    #[display("2.4GHz bandwidth")]
    LowerBandBandwidth,
    #[display("5GHz power")]
    HigherBandPower,
    #[display("5GHz channel")]
    HigherBandChannel,
    #[display("5GHz bandwidth")]
    HigherBandBandwidth,
    #[display("Antenna")]
    Antenna,
    #[display("Mount height")]
    MountHeight,
    #[display("Mount location")]
    MountLocation,
    #[display("Download speed")]
    DownloadSpeed,
    #[display("Download stability")]
    DownloadStability,
    #[display("Upload speed")]
    UploadSpeed,
    #[display("Upload stability")]
    UploadStability,
    #[display("Internet type")]
    InternetType,
    #[display("Congestion")]
    Congestion,
}


/// Short note describing what a router or broadband setting implies.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{topic}: {message}")]
pub struct Advice {
    topic: AdviceTopic,
    message: String,
}

impl Advice {
    fn new(topic: AdviceTopic, message: impl Into<String>) -> Self {
        Self { topic, message: message.into() }
    }

    #[must_use]
    pub fn topic(&self) -> AdviceTopic {
        self.topic
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}


#[must_use]
pub fn router_advice(router: &RouterSpec) -> Vec<Advice> {
    let lower  = router.radio_on(Band::Ghz2_4);
    let higher = router.radio_on(Band::Ghz5);

    vec![
        lower_band_power(lower),
        lower_band_channel(lower),
        lower_band_bandwidth(lower),
        higher_band_power(higher),
        higher_band_channel(higher),
        higher_band_bandwidth(higher),
        antenna(router.antenna()),
        mount_height(router.mount_height()),
        mount_location(router.mount_location()),
    ]
}

fn lower_band_power(radio: &RadioSpec) -> Advice {
    let power   = radio.power();
    let message = if power <= 50 {
        "power saving, minimal interference, limited range"
    } else if power <= 100 {
        "balanced performance, suits a typical home"
    } else {
        "extended range and strong signal, more interference"
    };

    Advice::new(AdviceTopic::LowerBandPower, format!("{power}mW: {message}"))
}

fn lower_band_channel(radio: &RadioSpec) -> Advice {
    let message = match radio.channel().number() {
        Some(1)  => "channel 1 avoids other 2.4GHz networks, may meet Bluetooth",
        Some(6)  => "channel 6 avoids other 2.4GHz networks, the steadiest choice",
        Some(11) => "channel 11 avoids other 2.4GHz networks, may meet microwaves",
        _        => "automatic selection follows the environment, may hop channels",
    };

    Advice::new(AdviceTopic::LowerBandChannel, message)
}

fn lower_band_bandwidth(radio: &RadioSpec) -> Advice {
    let message = if radio.bandwidth() == 20 {
        "20MHz: most stable and least interference, limited speed"
    } else {
        "40MHz: faster, but overlapping channels interfere more"
    };

    Advice::new(AdviceTopic::LowerBandBandwidth, message)
}

fn higher_band_power(radio: &RadioSpec) -> Advice {
    let power   = radio.power();
    let message = if power <= 100 {
        "low power is enough on 5GHz, less interference"
    } else if power <= 500 {
        "standard 5GHz power, balanced performance"
    } else {
        "high power extends range, walls still limit it"
    };

    Advice::new(AdviceTopic::HigherBandPower, format!("{power}mW: {message}"))
}

fn higher_band_channel(radio: &RadioSpec) -> Advice {
    let channel = radio.channel();
    let message = if channel.is_auto() {
        "automatic selection follows the environment, can use DFS channels"
            .to_string()
    } else if channel.number().is_some_and(|number| number <= 48) {
        format!("channel {channel}: lower frequencies, best used indoors")
    } else {
        format!("channel {channel}: upper frequencies, steady transmission")
    };

    Advice::new(AdviceTopic::HigherBandChannel, message)
}

fn higher_band_bandwidth(radio: &RadioSpec) -> Advice {
    let message = match radio.bandwidth() {
        20 => "20MHz: most stable and least interference, limited speed",
        40 => "40MHz: faster while staying stable",
        80 => "80MHz: balances speed and stability",
        _  => "160MHz: fastest, sensitive to interference",
    };

    Advice::new(AdviceTopic::HigherBandBandwidth, message)
}

fn antenna(antenna: Antenna) -> Advice {
    let message = match antenna {
        Antenna::Internal => "little interference, short range",
        Antenna::External => "balanced range and stability",
        Antenna::HighGain => "long range, more interference",
    };

    Advice::new(
        AdviceTopic::Antenna,
        format!("{antenna} {}dBi: {message}", antenna.gain())
    )
}

fn mount_height(height: f64) -> Advice {
    let message = if height <= 1.0 {
        "focused signal, limited range, suits small rooms"
    } else if height <= 2.0 {
        "even coverage for a typical home"
    } else {
        "covers the whole space, some spots may weaken"
    };

    Advice::new(AdviceTopic::MountHeight, format!("{height}m: {message}"))
}

fn mount_location(location: MountLocation) -> Advice {
    let message = match location {
        MountLocation::Center  => "center: even signal in every room",
        MountLocation::Corner  => "corner: strong in one room, weak on the far side",
        MountLocation::Wall    => "wall: signal pushed one way, weak on the far side",
        MountLocation::Ceiling => "ceiling: widest coverage, harder to install",
    };

    Advice::new(AdviceTopic::MountLocation, message)
}


#[must_use]
pub fn broadband_advice(plan: &BroadbandPlan) -> Vec<Advice> {
    vec![
        download_speed(plan.download()),
        stability(AdviceTopic::DownloadStability, plan.download().stability()),
        upload_speed(plan.upload()),
        stability(AdviceTopic::UploadStability, plan.upload().stability()),
        internet_type(plan.internet_type()),
        congestion(plan.congestion()),
    ]
}

fn download_speed(speed: PlanSpeed) -> Advice {
    let message = match speed.max() {
        ..=100  => "basic plan, enough for browsing and email",
        ..=500  => "mid-range plan, HD streaming and online games",
        ..=1000 => "gigabit plan, fast downloads and 4K streaming",
        _       => "very fast plan, large transfers and heavy multitasking",
    };

    Advice::new(
        AdviceTopic::DownloadSpeed,
        format!("{}{}: {message}", speed.max(), speed.unit())
    )
}

fn upload_speed(speed: PlanSpeed) -> Advice {
    let message = match speed.max() {
        ..=20  => "basic upload, enough for email and social media",
        ..=50  => "video calls and cloud backups",
        ..=100 => "large uploads and live streaming",
        _      => "professional content creation",
    };

    Advice::new(
        AdviceTopic::UploadSpeed,
        format!("{}{}: {message}", speed.max(), speed.unit())
    )
}

fn stability(topic: AdviceTopic, stability: Stability) -> Advice {
    let message = match stability {
        Stability::Stable   => "steady speed, lowest latency",
        Stability::Moderate => "some variation, fine for everyday use",
        Stability::Unstable => "large variation, suits occasional use",
    };

    Advice::new(topic, message)
}

fn internet_type(internet_type: InternetType) -> Advice {
    let message = match internet_type {
        InternetType::Fiber    => "fiber: fastest and most stable, low latency",
        InternetType::Cable    => "cable: stable, slows down with shared users",
        InternetType::Dsl      => "DSL: stable, slower with line distance",
        InternetType::Wireless => "wireless: mobile, varies with weather",
    };

    Advice::new(AdviceTopic::InternetType, message)
}

fn congestion(congestion: Congestion) -> Advice {
    let message = match congestion {
        Congestion::Low    => "low congestion: full speed and stable",
        Congestion::Medium => "medium congestion: slight slowdowns",
        Congestion::High   => "high congestion: slower, services still usable",
    };

    Advice::new(AdviceTopic::Congestion, message)
}
