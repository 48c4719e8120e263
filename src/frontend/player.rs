use std::thread;
use std::time::Duration;

use log::info;

use crate::backend::advice::{broadband_advice, router_advice};
use crate::backend::engine::Simulator;
use crate::backend::parameters::ParameterSet;
use crate::backend::report::ExperimentDocument;

use super::FrontendError;
use super::config::PlayerConfig;
use super::renderer::PlottersRenderer;

use output::write_experiment_result;


mod output;


#[must_use]
pub fn derive_filename(parameters: &ParameterSet) -> String {
    format!(
        "rssi_{}ghz_{}m_{}walls.gif",
        parameters.band(),
        parameters.distance(),
        parameters.walls(),
    )
}


/// Drives a simulator as the experiment clock, redrawing after every tick.
pub struct ExperimentPlayer<'a> {
    simulator: Simulator,
    renderer: Option<PlottersRenderer<'a>>,
    config: PlayerConfig,
}

impl<'a> ExperimentPlayer<'a> {
    #[must_use]
    pub fn new(
        simulator: Simulator,
        renderer: Option<PlottersRenderer<'a>>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            simulator,
            renderer,
            config,
        }
    }

    #[must_use]
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Imports the input document if any, runs the experiment for the
    /// configured number of ticks and writes the result.
    ///
    /// With zero ticks the current state is rendered once and no
    /// experiment is started.
    ///
    /// # Errors
    ///
    /// Will return `Err` if importing, rendering or saving fails.
    pub fn play(&mut self) -> Result<(), FrontendError> {
        if let Some((path, options)) = self.config.input() {
            let document = ExperimentDocument::from_path(path)?;

            self.simulator.import(&document, options)?;

            info!("Loaded {}", path.display());
        }

        self.start_info();

        if self.config.ticks() == 0 {
            self.render()?;
        } else {
            self.run()?;
        }

        self.end_info();

        if let Some(output_directory) = self.config.output_directory() {
            let result    = self.simulator.snapshot()?;
            let file_path = write_experiment_result(output_directory, &result)?;

            info!("Result file: {}", file_path.display());
        }

        Ok(())
    }

    fn run(&mut self) -> Result<(), FrontendError> {
        let period = Duration::from_millis(self.simulator.task().period());
        let handle = self.simulator.start();

        self.render()?;

        for _ in 0..self.config.ticks() {
            if self.config.realtime() {
                thread::sleep(period);
            }

            self.simulator.tick(handle)?;
            self.render()?;
        }

        self.simulator.stop();

        Ok(())
    }

    fn render(&mut self) -> Result<(), FrontendError> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        renderer.render(self.simulator.series(), self.simulator.outcome())?;

        Ok(())
    }

    fn start_info(&self) {
        if let Some(renderer) = &self.renderer {
            info!("Rendering in {}", renderer.output_filename());
        }
        info!(
            "Band {}GHz, distance {}m, walls {}, channel {}, {}, {}",
            self.simulator.parameters().band(),
            self.simulator.parameters().distance(),
            self.simulator.parameters().walls(),
            self.simulator.parameters().channel(),
            self.simulator.parameters().weather(),
            self.simulator.parameters().time_of_day(),
        );

        if !self.config.show_advice() {
            return;
        }

        let router_advice = self.simulator
            .router()
            .map(router_advice)
            .unwrap_or_default();
        let broadband_advice = self.simulator
            .broadband()
            .map(broadband_advice)
            .unwrap_or_default();

        for advice in router_advice.iter().chain(&broadband_advice) {
            info!("{advice}");
        }
    }

    fn end_info(&self) {
        let outcome = self.simulator.outcome();

        info!("Experiment finished after {} ticks", self.config.ticks());
        info!(
            "RSSI: {} ({:.0}% of the meter)",
            outcome.rssi(),
            outcome.rssi().meter_percentage()
        );
        info!(
            "Interference: {:.1} dB ({})",
            outcome.interference(),
            outcome.interference_label()
        );
        info!("Quality: {}", outcome.quality());
        info!("Throughput: {}", outcome.throughput());
        info!("Samples: {}", self.simulator.series().len());
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use crate::backend::engine::SimulatorBuilder;
    use crate::backend::parameters::ParameterSetBuilder;
    use crate::backend::report::{ImportOptions, ReportError};

    use super::*;


    const SOME_SEED: u64  = 5;
    const SOME_TICKS: u64 = 4;


    fn player(ticks: u64) -> ExperimentPlayer<'static> {
        ExperimentPlayer::new(
            SimulatorBuilder::new().build_seeded(Some(SOME_SEED)),
            None,
            PlayerConfig::new(ticks, false, None, None, true),
        )
    }


    #[test]
    fn filename_describes_the_setup() {
        let parameters = ParameterSetBuilder::new()
            .set_distance(12.5)
            .build()
            .unwrap_or_else(|error| panic!("{}", error));

        assert_eq!(derive_filename(&parameters), "rssi_2.4ghz_12.5m_1walls.gif");
    }

    #[test]
    fn playing_without_renderer() {
        let mut player = player(SOME_TICKS);

        player.play().unwrap_or_else(|error| panic!("{}", error));

        assert!(!player.simulator().is_running());
        assert_eq!(player.simulator().series().len(), SOME_TICKS as usize + 1);
    }

    #[test]
    fn malformed_input_changes_nothing() {
        let directory = tempfile::tempdir()
            .unwrap_or_else(|error| panic!("{}", error));
        let input     = directory.path().join("broken.json");

        fs::write(&input, r#"{ "experimentSettings": { "distance": "7" "#)
            .unwrap_or_else(|error| panic!("{}", error));

        let mut player = ExperimentPlayer::new(
            SimulatorBuilder::new()
                .set_demo_series(true)
                .build_seeded(Some(SOME_SEED)),
            None,
            PlayerConfig::new(
                SOME_TICKS,
                false,
                Some((input.as_path(), ImportOptions::all())),
                None,
                false
            ),
        );
        let parameters = player.simulator().parameters().clone();
        let series     = player.simulator().series().to_series();

        let result = player.play();

        assert!(matches!(
            result,
            Err(FrontendError::Report(ReportError::Json(_)))
        ));
        assert_eq!(player.simulator().parameters(), &parameters);
        assert_eq!(player.simulator().series().to_series(), series);
        assert!(!player.simulator().is_running());
    }

    #[test]
    fn zero_ticks_start_nothing() {
        let mut player = player(0);

        player.play().unwrap_or_else(|error| panic!("{}", error));

        assert!(player.simulator().series().is_empty());
        assert_eq!(player.simulator().task().ticks(), 0);
    }
}
