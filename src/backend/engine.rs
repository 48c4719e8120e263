use chrono::{DateTime, Utc};
use derive_more::Display;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use thiserror::Error;

use super::ITERATION_TIME;
use super::mathphysics::{Decibel, Millisecond, PathLossModel};
use super::parameters::{
    BroadbandPlan, ParameterError, ParameterSet, ParameterSetBuilder,
    RouterSpec
};
use super::report::{
    ExperimentDocument, ExperimentResult, ImportOptions, ReportError
};
use super::series::{demo_series, TimeSeriesBuffer, SERIES_CAPACITY};
use super::signal::{
    estimate_base_rssi, estimate_interference, estimate_throughput,
    InterferenceLabel, Rssi, SignalQuality, Throughput
};
use super::task::{PeriodicTask, TaskError, TaskHandle};


#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Report(#[from] ReportError),
}


#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum ExperimentState {
    #[default]
    #[display("idle")]
    Idle,
    #[display("running")]
    Running,
}


/// Everything derived from one parameter set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    rssi: Rssi,
    interference: Decibel,
    interference_label: InterferenceLabel,
    quality: SignalQuality,
    throughput: Throughput,
}

impl Outcome {
    #[must_use]
    pub fn rssi(&self) -> Rssi {
        self.rssi
    }

    #[must_use]
    pub fn interference(&self) -> Decibel {
        self.interference
    }

    #[must_use]
    pub fn interference_label(&self) -> InterferenceLabel {
        self.interference_label
    }

    #[must_use]
    pub fn quality(&self) -> SignalQuality {
        self.quality
    }

    #[must_use]
    pub fn throughput(&self) -> Throughput {
        self.throughput
    }
}


/// Runs the estimators on `parameters`.
///
/// The final RSSI is the base estimate lowered by the interference penalty,
/// and both throughput and quality are computed from it.
pub fn evaluate<R: Rng + ?Sized>(
    parameters: &ParameterSet,
    path_loss_model: PathLossModel,
    rng: &mut R,
) -> Outcome {
    let band = parameters.band();
    let base_rssi = estimate_base_rssi(
        band,
        parameters.distance(),
        parameters.walls(),
        parameters.tx_power(),
        path_loss_model,
    );
    let interference = estimate_interference(
        parameters.interference(),
        parameters.channel(),
        parameters.weather(),
        parameters.time_of_day(),
        band,
    );
    let rssi = base_rssi - interference;
    let caps = parameters.broadband().map(BroadbandPlan::caps);

    Outcome {
        rssi,
        interference,
        interference_label: InterferenceLabel::from_slider(
            parameters.interference()
        ),
        quality: SignalQuality::assess(rssi, interference),
        throughput: estimate_throughput(band, rssi, interference, caps, rng),
    }
}


#[derive(Clone, Default)]
pub struct SimulatorBuilder {
    parameters: Option<ParameterSet>,
    path_loss_model: Option<PathLossModel>,
    series_capacity: Option<usize>,
    period: Option<Millisecond>,
    demo_series: Option<bool>,
}

impl SimulatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameters: None,
            path_loss_model: None,
            series_capacity: None,
            period: None,
            demo_series: None,
        }
    }

    #[must_use]
    pub fn set_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = Some(parameters);
        self
    }

    #[must_use]
    pub fn set_path_loss_model(
        mut self,
        path_loss_model: PathLossModel
    ) -> Self {
        self.path_loss_model = Some(path_loss_model);
        self
    }

    #[must_use]
    pub fn set_series_capacity(mut self, series_capacity: usize) -> Self {
        self.series_capacity = Some(series_capacity);
        self
    }

    #[must_use]
    pub fn set_period(mut self, period: Millisecond) -> Self {
        self.period = Some(period);
        self
    }

    /// Fills the idle chart with a placeholder series.
    #[must_use]
    pub fn set_demo_series(mut self, demo_series: bool) -> Self {
        self.demo_series = Some(demo_series);
        self
    }

    #[must_use]
    pub fn build<R: Rng>(self, rng: R) -> Simulator<R> {
        Simulator::new(
            self.parameters.unwrap_or_default(),
            self.path_loss_model.unwrap_or_default(),
            TimeSeriesBuffer::new(
                self.series_capacity.unwrap_or(SERIES_CAPACITY)
            ),
            PeriodicTask::new(self.period.unwrap_or(ITERATION_TIME)),
            self.demo_series.unwrap_or(false),
            rng,
        )
    }

    /// Builds a simulator on a seeded `StdRng`, or on an OS-seeded one if
    /// `seed` is `None`.
    #[must_use]
    pub fn build_seeded(self, seed: Option<u64>) -> Simulator<StdRng> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng(),
        };

        self.build(rng)
    }
}


/// Owns the inputs, the experiment timer and the chart series.
///
/// An experiment moves between two states. `start` clears the series and
/// records an initial sample, every `tick` recomputes and records one more,
/// `stop` keeps what was recorded, and `reset` returns to the defaults with
/// an empty series.
#[derive(Clone, Debug)]
pub struct Simulator<R: Rng = StdRng> {
    parameters: ParameterSet,
    path_loss_model: PathLossModel,
    series: TimeSeriesBuffer,
    task: PeriodicTask,
    state: ExperimentState,
    outcome: Outcome,
    rng: R,
}

impl<R: Rng> Simulator<R> {
    #[must_use]
    pub fn new(
        parameters: ParameterSet,
        path_loss_model: PathLossModel,
        mut series: TimeSeriesBuffer,
        task: PeriodicTask,
        demo_series_on_idle: bool,
        mut rng: R,
    ) -> Self {
        let outcome = evaluate(&parameters, path_loss_model, &mut rng);

        if demo_series_on_idle && series.is_empty() {
            series.replace(demo_series(&mut rng));
        }

        Self {
            parameters,
            path_loss_model,
            series,
            task,
            state: ExperimentState::Idle,
            outcome,
            rng,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    #[must_use]
    pub fn path_loss_model(&self) -> PathLossModel {
        self.path_loss_model
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeriesBuffer {
        &self.series
    }

    #[must_use]
    pub fn task(&self) -> &PeriodicTask {
        &self.task
    }

    #[must_use]
    pub fn state(&self) -> ExperimentState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ExperimentState::Running)
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Replaces the parameters and recomputes every estimate.
    ///
    /// While an experiment runs, the new RSSI is also recorded at the
    /// current tick.
    pub fn recompute(&mut self, parameters: ParameterSet) -> Outcome {
        self.parameters = parameters;
        self.update()
    }

    fn update(&mut self) -> Outcome {
        self.outcome = evaluate(
            &self.parameters,
            self.path_loss_model,
            &mut self.rng
        );

        if self.is_running() {
            self.series.record(
                self.task.ticks(),
                self.outcome.rssi(),
                &mut self.rng
            );
        }

        debug!(
            "RSSI {}, quality {}, throughput {}, interference {:.1} dB",
            self.outcome.rssi(),
            self.outcome.quality(),
            self.outcome.throughput(),
            self.outcome.interference(),
        );

        self.outcome
    }

    /// Starts a new experiment run, cancelling any previous one.
    pub fn start(&mut self) -> TaskHandle {
        self.series.clear();
        self.state = ExperimentState::Running;

        let handle = self.task.start();

        info!("Experiment {handle} started");

        self.update();

        handle
    }

    /// Advances the experiment run identified by `handle` by one tick.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the experiment is not running or `handle`
    /// belongs to a cancelled run.
    pub fn tick(&mut self, handle: TaskHandle) -> Result<Outcome, SimulatorError> {
        self.task.fire(handle)?;

        Ok(self.update())
    }

    /// Stops the experiment, keeping the recorded series.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Cancels the experiment timer and returns the handle of the run it
    /// belonged to, if any.
    pub fn cancel(&mut self) -> Option<TaskHandle> {
        let ticks  = self.task.ticks();
        let handle = self.task.cancel();

        if let Some(handle) = handle {
            info!("Experiment {handle} stopped after {ticks} ticks");
        }

        self.state = ExperimentState::Idle;

        handle
    }

    pub fn reset(&mut self) {
        self.stop();
        self.series.clear();
        self.parameters = ParameterSet::default();
        self.update();

        info!("Simulator reset to defaults");
    }

    /// # Errors
    ///
    /// Will return `Err` if no samples have been recorded.
    pub fn snapshot(&self) -> Result<ExperimentResult, ReportError> {
        self.snapshot_at(Utc::now())
    }

    /// # Errors
    ///
    /// Will return `Err` if no samples have been recorded.
    pub fn snapshot_at(
        &self,
        timestamp: DateTime<Utc>
    ) -> Result<ExperimentResult, ReportError> {
        ExperimentResult::new(
            timestamp,
            self.parameters.clone(),
            self.outcome,
            self.series.to_series(),
        )
    }

    /// Applies the selected sections of `document` and recomputes.
    ///
    /// Fields that are missing or cannot be parsed keep their current
    /// values.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the merged parameters are invalid.
    pub fn import(
        &mut self,
        document: &ExperimentDocument,
        options: ImportOptions,
    ) -> Result<Outcome, SimulatorError> {
        let mut builder = ParameterSetBuilder::from(&self.parameters);

        if options.experiment_settings {
            if let Some(settings) = &document.experiment_settings {
                builder = settings.apply_to(builder);
            }
        }
        if options.router_specs {
            if let Some(specs) = &document.router_specs {
                let current = self.parameters
                    .router()
                    .cloned()
                    .unwrap_or_default();

                builder = builder.set_router(Some(specs.apply_to(&current)));
            }
        }
        if options.broadband_specs {
            if let Some(specs) = &document.broadband_specs {
                let current = self.parameters
                    .broadband()
                    .copied()
                    .unwrap_or_default();

                builder = builder.set_broadband(Some(specs.apply_to(&current)));
            }
        }

        let parameters = builder.build()?;

        if options.chart_data {
            if let Some(points) = &document.chart_data {
                self.series.replace(points.iter().map(|point| point.to_sample()));

                info!("Imported {} chart samples", self.series.len());
            }
        }

        Ok(self.recompute(parameters))
    }

    #[must_use]
    pub fn router(&self) -> Option<&RouterSpec> {
        self.parameters.router()
    }

    #[must_use]
    pub fn broadband(&self) -> Option<&BroadbandPlan> {
        self.parameters.broadband()
    }
}


#[cfg(test)]
mod tests {
    use crate::backend::mathphysics::Band;
    use crate::backend::parameters::{Channel, TimeOfDay, Weather};
    use crate::backend::report::ChartPoint;
    use crate::backend::signal::QualityLabel;

    use super::*;


    const SOME_SEED: u64 = 3;


    fn simulator() -> Simulator<StdRng> {
        SimulatorBuilder::new().build_seeded(Some(SOME_SEED))
    }

    fn scenario_parameters() -> ParameterSet {
        ParameterSetBuilder::new()
            .set_band(Band::Ghz2_4)
            .set_distance(3.0)
            .set_walls(1)
            .set_tx_power(100)
            .set_channel(Channel::Number(6))
            .set_weather(Weather::Clear)
            .set_time_of_day(TimeOfDay::Morning)
            .set_interference(20)
            .build()
            .unwrap_or_else(|error| panic!("{}", error))
    }

    fn floor_parameters() -> ParameterSet {
        ParameterSetBuilder::new()
            .set_band(Band::Ghz5)
            .set_distance(50.0)
            .set_walls(5)
            .build()
            .unwrap_or_else(|error| panic!("{}", error))
    }


    #[test]
    fn recompute_without_a_running_experiment() {
        let mut simulator = simulator();

        let outcome = simulator.recompute(scenario_parameters());

        assert_eq!(simulator.state(), ExperimentState::Idle);
        assert!(simulator.series().is_empty());
        assert_eq!(simulator.outcome(), &outcome);
    }

    #[test]
    fn lower_band_scenario() {
        let mut simulator = simulator();

        let outcome = simulator.recompute(scenario_parameters());

        assert!((outcome.interference() - 21.0).abs() < 1e-9);
        assert_eq!(outcome.interference_label(), InterferenceLabel::Moderate);
        assert_eq!(outcome.rssi(), Rssi::floor());
        assert_eq!(outcome.quality().score(), 10);
        assert_eq!(outcome.quality().label(), QualityLabel::VeryPoor);
        // 37 Mbps derated by 0.86 and split with ratios below 0.9.
        assert!(outcome.throughput().download() <= 29);
        assert!(outcome.throughput().download() >= 22);
    }

    #[test]
    fn interference_label_follows_the_slider() {
        let parameters = ParameterSetBuilder::new()
            .set_band(Band::Ghz2_4)
            .set_interference(0)
            .set_channel(Channel::Number(3))
            .set_weather(Weather::Rainy)
            .set_time_of_day(TimeOfDay::Evening)
            .build()
            .unwrap_or_else(|error| panic!("{}", error));
        let mut simulator = simulator();

        let outcome = simulator.recompute(parameters);

        assert!((outcome.interference() - 70.0).abs() < 1e-9);
        assert_eq!(outcome.interference_label(), InterferenceLabel::Low);
    }

    #[test]
    fn literal_scenario_saturates() {
        let mut simulator = SimulatorBuilder::new()
            .set_path_loss_model(PathLossModel::Literal)
            .build_seeded(Some(SOME_SEED));

        let outcome = simulator.recompute(scenario_parameters());

        // -30 + 130.4 - 4 saturates, then 21 dB of interference.
        assert!((outcome.rssi().value() + 51.0).abs() < 1e-9);
        assert_eq!(outcome.quality().label(), QualityLabel::Fair);
    }

    #[test]
    fn higher_band_floor_scenario() {
        let mut simulator = simulator();

        let outcome = simulator.recompute(floor_parameters());

        assert_eq!(outcome.rssi(), Rssi::floor());
        assert!(outcome.throughput().download() > 0);
        assert!(
            f64::from(outcome.throughput().upload())
                <= 0.9 * f64::from(outcome.throughput().download())
        );
    }

    #[test]
    fn experiment_lifecycle() {
        let mut simulator = simulator();
        let handle        = simulator.start();

        assert!(simulator.is_running());
        assert_eq!(simulator.series().len(), 1);

        for _ in 0..5 {
            simulator.tick(handle).unwrap_or_else(|error| panic!("{}", error));
        }

        assert_eq!(simulator.series().len(), 6);
        assert_eq!(simulator.series().latest().map(|sample| sample.time()), Some(5));

        assert_eq!(simulator.cancel(), Some(handle));
        assert_eq!(simulator.cancel(), None);
        assert_eq!(simulator.state(), ExperimentState::Idle);
        assert_eq!(simulator.series().len(), 6);
        assert!(matches!(
            simulator.tick(handle),
            Err(SimulatorError::Task(TaskError::NotRunning))
        ));
    }

    #[test]
    fn restart_rejects_the_stale_handle() {
        let mut simulator = simulator();
        let stale         = simulator.start();

        simulator.tick(stale).unwrap_or_else(|error| panic!("{}", error));

        let fresh = simulator.start();

        assert_eq!(simulator.series().len(), 1);
        assert!(matches!(
            simulator.tick(stale),
            Err(SimulatorError::Task(TaskError::Cancelled(_)))
        ));
        assert!(simulator.tick(fresh).is_ok());
    }

    #[test]
    fn series_never_exceeds_capacity() {
        let mut simulator = SimulatorBuilder::new()
            .set_series_capacity(10)
            .build_seeded(Some(SOME_SEED));
        let handle = simulator.start();

        for _ in 0..25 {
            simulator.tick(handle).unwrap_or_else(|error| panic!("{}", error));
        }

        assert_eq!(simulator.series().len(), 10);
        assert_eq!(
            simulator.series().iter().next().map(|sample| sample.time()),
            Some(16)
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut simulator = simulator();

        simulator.recompute(floor_parameters());
        simulator.start();
        simulator.reset();

        assert_eq!(simulator.state(), ExperimentState::Idle);
        assert!(simulator.series().is_empty());
        assert_eq!(simulator.parameters(), &ParameterSet::default());
        assert!(!simulator.task().is_running());
    }

    #[test]
    fn demo_series_only_when_asked() {
        let with_demo = SimulatorBuilder::new()
            .set_demo_series(true)
            .build_seeded(Some(SOME_SEED));

        assert_eq!(with_demo.series().len(), SERIES_CAPACITY);
        assert!(simulator().series().is_empty());
    }

    #[test]
    fn saving_requires_chart_data() {
        assert!(matches!(simulator().snapshot(), Err(ReportError::NoChartData)));
    }

    #[test]
    fn document_round_trip() {
        let parameters = ParameterSetBuilder::from(&floor_parameters())
            .set_router(Some(RouterSpec::default()))
            .set_broadband(Some(BroadbandPlan::default()))
            .set_channel(Channel::Auto)
            .build()
            .unwrap_or_else(|error| panic!("{}", error));
        let mut source = simulator();

        source.recompute(parameters);

        let handle = source.start();

        for _ in 0..3 {
            source.tick(handle).unwrap_or_else(|error| panic!("{}", error));
        }

        let json = source
            .snapshot()
            .and_then(|result| result.to_json())
            .unwrap_or_else(|error| panic!("{}", error));
        let document = ExperimentDocument::from_json(&json)
            .unwrap_or_else(|error| panic!("{}", error));
        let mut target = simulator();

        target
            .import(&document, ImportOptions::all())
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(target.parameters(), source.parameters());
        assert_eq!(target.series().to_series(), source.series().to_series());
    }

    #[test]
    fn import_respects_options() {
        let document = ExperimentDocument {
            chart_data: Some(vec![
                ChartPoint { time: Some(1.0), rssi: Some(-70.0) }
            ]),
            ..ExperimentDocument::default()
        };
        let mut simulator = simulator();

        simulator
            .import(&document, ImportOptions {
                chart_data: false,
                ..ImportOptions::all()
            })
            .unwrap_or_else(|error| panic!("{}", error));

        assert!(simulator.series().is_empty());

        simulator
            .import(&document, ImportOptions::all())
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(simulator.series().len(), 1);
        assert_eq!(simulator.parameters(), &ParameterSet::default());
    }

    #[test]
    fn unparseable_fields_keep_current_values() {
        let document = ExperimentDocument::from_json(
            r#"{
                "experimentSettings": {
                    "distance": "far",
                    "weather": "stormy",
                    "walls": "3"
                }
            }"#
        )
        .unwrap_or_else(|error| panic!("{}", error));
        let mut simulator = simulator();

        simulator.recompute(scenario_parameters());
        simulator
            .import(&document, ImportOptions::all())
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(simulator.parameters().distance(), 3.0);
        assert_eq!(simulator.parameters().weather(), Weather::Clear);
        assert_eq!(simulator.parameters().walls(), 3);
        assert!(simulator.series().is_empty());
    }
}
