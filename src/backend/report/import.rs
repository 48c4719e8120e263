use std::fmt::Debug;
use std::str::FromStr;

use log::warn;

use crate::backend::mathphysics::{Band, Dbm, Tick};
use crate::backend::parameters::{
    BroadbandPlanBuilder, Channel, ParameterSetBuilder, PlanSpeed, RadioSpec,
    RouterSpec, RouterSpecBuilder, BroadbandPlan, MAX_INTERFERENCE
};
use crate::backend::series::SignalSample;
use crate::backend::signal::Rssi;

use super::{
    BroadbandSpecs, ChartPoint, ExperimentSettings, FieldValue, RouterSpecs
};


pub const MISSING_CHART_RSSI: Dbm = -50.0;


/// Sections of a document to apply on import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    pub chart_data: bool,
    pub router_specs: bool,
    pub broadband_specs: bool,
    pub experiment_settings: bool,
}

impl ImportOptions {
    #[must_use]
    pub fn all() -> Self {
        Self {
            chart_data: true,
            router_specs: true,
            broadband_specs: true,
            experiment_settings: true,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::all()
    }
}


// Absent and blank fields are skipped silently, unparseable ones with a
// warning.
fn read<T: FromStr>(field: Option<&FieldValue>, name: &str) -> Option<T> {
    let field = field.filter(|field| !field.is_blank())?;
    let value = field.parse();

    if value.is_none() {
        warn!("Ignoring unparseable `{name}` value {field:?}");
    }

    value
}

fn read_checked<T: FromStr + Debug>(
    field: Option<&FieldValue>,
    name: &str,
    is_valid: impl Fn(&T) -> bool,
) -> Option<T> {
    read(field, name).filter(|value| {
        let valid = is_valid(value);

        if !valid {
            warn!("Ignoring out of range `{name}` value {value:?}");
        }

        valid
    })
}


impl ExperimentSettings {
    #[must_use]
    pub fn apply_to(
        &self,
        mut builder: ParameterSetBuilder
    ) -> ParameterSetBuilder {
        if let Some(band) = read(self.frequency.as_ref(), "frequency") {
            builder = builder.set_band(band);
        }
        if let Some(distance) = read_checked(
            self.distance.as_ref(),
            "distance",
            |distance: &f64| distance.is_finite() && *distance > 0.0
        ) {
            builder = builder.set_distance(distance);
        }
        if let Some(walls) = read(self.walls.as_ref(), "walls") {
            builder = builder.set_walls(walls);
        }
        if let Some(interference) = read_checked(
            self.interference.as_ref(),
            "interference",
            |interference: &u8| *interference <= MAX_INTERFERENCE
        ) {
            builder = builder.set_interference(interference);
        }
        if let Some(channel) = read(self.channel.as_ref(), "channel") {
            builder = builder.set_channel(channel);
        }
        if let Some(tx_power) = read(self.power.as_ref(), "power") {
            builder = builder.set_tx_power(tx_power);
        }
        if let Some(weather) = read(self.weather.as_ref(), "weather") {
            builder = builder.set_weather(weather);
        }
        if let Some(time_of_day) = read(self.time.as_ref(), "time") {
            builder = builder.set_time_of_day(time_of_day);
        }

        builder
    }
}


impl RouterSpecs {
    #[must_use]
    pub fn apply_to(&self, router: &RouterSpec) -> RouterSpec {
        let mut builder = RouterSpecBuilder::from(router)
            .set_radio(
                Band::Ghz2_4,
                merge_radio(
                    router.radio_on(Band::Ghz2_4),
                    [&self.power24, &self.channel24, &self.bandwidth24],
                    ["power24", "channel24", "bandwidth24"],
                )
            )
            .set_radio(
                Band::Ghz5,
                merge_radio(
                    router.radio_on(Band::Ghz5),
                    [&self.power5, &self.channel5, &self.bandwidth5],
                    ["power5", "channel5", "bandwidth5"],
                )
            );

        if let Some(antenna) = read(self.antenna.as_ref(), "antenna") {
            builder = builder.set_antenna(antenna);
        }
        if let Some(height) = read_checked(
            self.height.as_ref(),
            "height",
            |height: &f64| height.is_finite() && *height >= 0.0
        ) {
            builder = builder.set_mount_height(height);
        }
        if let Some(location) = read(self.location.as_ref(), "location") {
            builder = builder.set_mount_location(location);
        }

        builder.build()
    }
}

fn merge_radio(
    current: &RadioSpec,
    [power, channel, bandwidth]: [&Option<FieldValue>; 3],
    [power_name, channel_name, bandwidth_name]: [&str; 3],
) -> RadioSpec {
    RadioSpec::new(
        read(power.as_ref(), power_name).unwrap_or(current.power()),
        read::<Channel>(channel.as_ref(), channel_name)
            .unwrap_or_else(|| current.channel().clone()),
        read(bandwidth.as_ref(), bandwidth_name)
            .unwrap_or(current.bandwidth()),
    )
}


impl BroadbandSpecs {
    #[must_use]
    pub fn apply_to(&self, plan: &BroadbandPlan) -> BroadbandPlan {
        let download = merge_speed(
            plan.download(),
            [
                &self.max_download_speed,
                &self.download_speed_unit,
                &self.download_speed_stability
            ],
            ["maxDownloadSpeed", "downloadSpeedUnit", "downloadSpeedStability"],
        );
        let upload = merge_speed(
            plan.upload(),
            [
                &self.max_upload_speed,
                &self.upload_speed_unit,
                &self.upload_speed_stability
            ],
            ["maxUploadSpeed", "uploadSpeedUnit", "uploadSpeedStability"],
        );
        let mut builder = BroadbandPlanBuilder::from(plan)
            .set_download(download)
            .set_upload(upload);

        if let Some(internet_type) = read(
            self.internet_type.as_ref(),
            "internetType"
        ) {
            builder = builder.set_internet_type(internet_type);
        }
        if let Some(congestion) = read(
            self.network_congestion.as_ref(),
            "networkCongestion"
        ) {
            builder = builder.set_congestion(congestion);
        }

        builder.build()
    }
}

fn merge_speed(
    current: PlanSpeed,
    [max, unit, stability]: [&Option<FieldValue>; 3],
    [max_name, unit_name, stability_name]: [&str; 3],
) -> PlanSpeed {
    PlanSpeed::new(
        read(max.as_ref(), max_name).unwrap_or(current.max()),
        read(unit.as_ref(), unit_name).unwrap_or(current.unit()),
        read(stability.as_ref(), stability_name)
            .unwrap_or(current.stability()),
    )
}


impl ChartPoint {
    /// Missing time reads as 0 and missing RSSI as -50 dBm.
    #[must_use]
    pub fn to_sample(&self) -> SignalSample {
        let time = self.time
            .filter(|time| time.is_finite())
            .map_or(0, |time| time.max(0.0).round() as Tick);
        let rssi = self.rssi
            .filter(|rssi| rssi.is_finite())
            .unwrap_or(MISSING_CHART_RSSI);

        SignalSample::new(time, Rssi::new(rssi))
    }
}
