use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use thiserror::Error;

use super::engine::Outcome;
use super::mathphysics::Band;
use super::parameters::{BroadbandPlan, ParameterSet, RouterSpec};
use super::series::SignalSample;


pub use document::*;
pub use import::*;


pub mod document;
pub mod import;


#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to access the report file: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed experiment document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No chart data to save")]
    NoChartData,
}


/// Snapshot of an experiment at the moment it was saved.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentResult {
    timestamp: DateTime<Utc>,
    parameters: ParameterSet,
    outcome: Outcome,
    samples: Vec<SignalSample>,
}

impl ExperimentResult {
    /// # Errors
    ///
    /// Will return `Err` if `samples` is empty.
    pub fn new(
        timestamp: DateTime<Utc>,
        parameters: ParameterSet,
        outcome: Outcome,
        samples: Vec<SignalSample>,
    ) -> Result<Self, ReportError> {
        if samples.is_empty() {
            return Err(ReportError::NoChartData);
        }

        Ok(Self { timestamp, parameters, outcome, samples })
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn samples(&self) -> &[SignalSample] {
        &self.samples
    }

    #[must_use]
    pub fn to_document(&self) -> ExperimentDocument {
        ExperimentDocument {
            timestamp: Some(
                self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            experiment_settings: Some(settings_of(&self.parameters)),
            results: Some(summary_of(&self.outcome)),
            router_specs: self.parameters.router().map(router_specs_of),
            broadband_specs: self.parameters
                .broadband()
                .map(broadband_specs_of),
            chart_data: Some(
                self.samples
                    .iter()
                    .map(|sample| ChartPoint {
                        time: Some(sample.time() as f64),
                        rssi: Some(sample.rssi().value()),
                    })
                    .collect()
            ),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        self.to_document().to_json()
    }

    /// # Errors
    ///
    /// Will return `Err` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_json()?)?;

        info!("Experiment result saved to {}", path.display());

        Ok(())
    }
}


fn settings_of(parameters: &ParameterSet) -> ExperimentSettings {
    ExperimentSettings {
        frequency: Some(FieldValue::text(parameters.band())),
        distance: Some(FieldValue::text(parameters.distance())),
        walls: Some(FieldValue::text(parameters.walls())),
        interference: Some(FieldValue::text(parameters.interference())),
        channel: Some(FieldValue::text(parameters.channel())),
        power: Some(FieldValue::text(parameters.tx_power())),
        weather: Some(FieldValue::text(parameters.weather())),
        time: Some(FieldValue::text(parameters.time_of_day())),
    }
}

fn summary_of(outcome: &Outcome) -> ResultSummary {
    let throughput = outcome.throughput();

    ResultSummary {
        rssi: Some(FieldValue::text(outcome.rssi())),
        download_speed: Some(
            FieldValue::text(format!("{} Mbps", throughput.download()))
        ),
        upload_speed: Some(
            FieldValue::text(format!("{} Mbps", throughput.upload()))
        ),
        quality: Some(FieldValue::text(outcome.quality().label())),
        interference: Some(FieldValue::text(outcome.interference_label())),
    }
}

fn router_specs_of(router: &RouterSpec) -> RouterSpecs {
    let lower  = router.radio_on(Band::Ghz2_4);
    let higher = router.radio_on(Band::Ghz5);

    RouterSpecs {
        power24: Some(FieldValue::text(lower.power())),
        channel24: Some(FieldValue::text(lower.channel())),
        bandwidth24: Some(FieldValue::text(lower.bandwidth())),
        power5: Some(FieldValue::text(higher.power())),
        channel5: Some(FieldValue::text(higher.channel())),
        bandwidth5: Some(FieldValue::text(higher.bandwidth())),
        antenna: Some(FieldValue::text(router.antenna())),
        height: Some(FieldValue::text(router.mount_height())),
        location: Some(FieldValue::text(router.mount_location())),
    }
}

fn broadband_specs_of(plan: &BroadbandPlan) -> BroadbandSpecs {
    let download = plan.download();
    let upload   = plan.upload();

    BroadbandSpecs {
        max_download_speed: Some(FieldValue::text(download.max())),
        download_speed_unit: Some(FieldValue::text(download.unit())),
        download_speed_stability: Some(FieldValue::text(download.stability())),
        max_upload_speed: Some(FieldValue::text(upload.max())),
        upload_speed_unit: Some(FieldValue::text(upload.unit())),
        upload_speed_stability: Some(FieldValue::text(upload.stability())),
        internet_type: Some(FieldValue::text(plan.internet_type())),
        network_congestion: Some(FieldValue::text(plan.congestion())),
    }
}
