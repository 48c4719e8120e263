use std::path::{Path, PathBuf};

use crate::backend::mathphysics::{PathLossModel, Tick};
use crate::backend::parameters::ParameterSet;
use crate::backend::report::ImportOptions;

use crate::frontend::renderer::PlotResolution;


pub struct GeneralConfig {
    simulation: SimulationConfig,
    player: PlayerConfig,
    render: RenderConfig,
}

impl GeneralConfig {
    #[must_use]
    pub fn new(
        simulation: SimulationConfig,
        player: PlayerConfig,
        render: RenderConfig,
    ) -> Self {
        Self {
            simulation,
            player,
            render,
        }
    }

    #[must_use]
    pub fn simulation_config(&self) -> &SimulationConfig {
        &self.simulation
    }

    #[must_use]
    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    #[must_use]
    pub fn into_player_config(self) -> PlayerConfig {
        self.player
    }
}


pub struct SimulationConfig {
    parameters: ParameterSet,
    path_loss_model: PathLossModel,
    // If `None`, the random source is seeded by the OS.
    seed: Option<u64>,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(
        parameters: ParameterSet,
        path_loss_model: PathLossModel,
        seed: Option<u64>,
    ) -> Self {
        Self {
            parameters,
            path_loss_model,
            seed,
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
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}


pub struct PlayerConfig {
    ticks: Tick,
    realtime: bool,
    input: Option<(PathBuf, ImportOptions)>,
    output_directory: Option<PathBuf>,
    show_advice: bool,
}

impl PlayerConfig {
    #[must_use]
    pub fn new(
        ticks: Tick,
        realtime: bool,
        input: Option<(&Path, ImportOptions)>,
        output_directory: Option<&Path>,
        show_advice: bool,
    ) -> Self {
        Self {
            ticks,
            realtime,
            input: input.map(|(path, options)| (path.to_path_buf(), options)),
            output_directory: output_directory.map(Path::to_path_buf),
            show_advice,
        }
    }

    #[must_use]
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    #[must_use]
    pub fn realtime(&self) -> bool {
        self.realtime
    }

    #[must_use]
    pub fn input(&self) -> Option<(&Path, ImportOptions)> {
        self.input
            .as_ref()
            .map(|(path, options)| (path.as_path(), *options))
    }

    #[must_use]
    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }

    #[must_use]
    pub fn show_advice(&self) -> bool {
        self.show_advice
    }
}


pub struct RenderConfig {
    // If `None`, nothing is rendered.
    plot_caption: Option<String>,
    plot_resolution: PlotResolution,
}

impl RenderConfig {
    #[must_use]
    pub fn new(
        plot_caption: Option<&str>,
        plot_resolution: PlotResolution,
    ) -> Self {
        Self {
            plot_caption: plot_caption.map(str::to_string),
            plot_resolution,
        }
    }

    #[must_use]
    pub fn plot_caption(&self) -> Option<&str> {
        self.plot_caption.as_deref()
    }

    #[must_use]
    pub fn plot_resolution(&self) -> PlotResolution {
        self.plot_resolution
    }
}
