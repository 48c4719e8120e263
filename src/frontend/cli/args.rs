use std::path::{Path, PathBuf};

use clap::ArgMatches;

use crate::backend::engine::SimulatorBuilder;
use crate::backend::mathphysics::{Meter, PathLossModel, Percent, Tick};
use crate::backend::parameters::{
    BroadbandPlan, BroadbandPlanBuilder, Channel, ParameterError,
    ParameterSet, ParameterSetBuilder, PlanSpeed, RouterSpec, SpeedUnit
};
use crate::backend::report::ImportOptions;
use crate::frontend::FrontendError;
use crate::frontend::config::{
    GeneralConfig, PlayerConfig, RenderConfig, SimulationConfig
};
use crate::frontend::player::{derive_filename, ExperimentPlayer};
use crate::frontend::renderer::{Pixel, PlotResolution, PlottersRenderer};


pub const ARG_ADVICE: &str            = "advice";
pub const ARG_BAND: &str              = "band";
pub const ARG_CHANNEL: &str           = "channel";
pub const ARG_DISTANCE: &str          = "distance";
pub const ARG_INTERFERENCE: &str      = "interference";
pub const ARG_JSON_INPUT: &str        = "experiment result path";
pub const ARG_JSON_OUTPUT: &str       = "output directory path";
pub const ARG_LITERAL_PATH_LOSS: &str = "literal path loss";
pub const ARG_MAX_DOWNLOAD: &str      = "max download";
pub const ARG_MAX_UPLOAD: &str        = "max upload";
pub const ARG_NO_BROADBAND: &str      = "skip broadband specs";
pub const ARG_NO_CHART: &str          = "skip chart data";
pub const ARG_NO_PLOT: &str           = "no plot";
pub const ARG_NO_ROUTER: &str         = "skip router specs";
pub const ARG_NO_SETTINGS: &str       = "skip experiment settings";
pub const ARG_PLOT_CAPTION: &str      = "plot caption";
pub const ARG_PLOT_HEIGHT: &str       = "plot height";
pub const ARG_PLOT_WIDTH: &str        = "plot width";
pub const ARG_REALTIME: &str          = "realtime";
pub const ARG_SEED: &str              = "seed";
pub const ARG_SPEED_UNIT: &str        = "speed unit";
pub const ARG_TICKS: &str             = "ticks";
pub const ARG_TIME_OF_DAY: &str       = "time of day";
pub const ARG_TX_POWER: &str          = "tx power";
pub const ARG_VERBOSE: &str           = "verbose";
pub const ARG_WALLS: &str             = "walls";
pub const ARG_WEATHER: &str           = "weather";

pub const BAND_2_4GHZ: &str = "2.4";
pub const BAND_5GHZ: &str   = "5";

pub const TIME_AFTERNOON: &str = "afternoon";
pub const TIME_EVENING: &str   = "evening";
pub const TIME_MORNING: &str   = "morning";
pub const TIME_NIGHT: &str     = "night";

pub const UNIT_GBPS: &str = "gbps";
pub const UNIT_MBPS: &str = "mbps";

pub const WEATHER_CLEAR: &str = "clear";
pub const WEATHER_DRY: &str   = "dry";
pub const WEATHER_HUMID: &str = "humid";
pub const WEATHER_RAINY: &str = "rainy";

pub const DEFAULT_PLOT_CAPTION: &str = "RSSI";
pub const DEFAULT_PLOT_HEIGHT: &str  = "360";
pub const DEFAULT_PLOT_WIDTH: &str   = "640";
pub const DEFAULT_TICKS: &str        = "20";


pub fn handle_arguments(matches: &ArgMatches) -> Result<(), FrontendError> {
    let general_config = GeneralConfig::new(
        simulation_config(matches)?,
        player_config(matches),
        render_config(matches),
    );

    play(general_config)
}

fn play(general_config: GeneralConfig) -> Result<(), FrontendError> {
    let simulation_config = general_config.simulation_config();
    let simulator = SimulatorBuilder::new()
        .set_parameters(simulation_config.parameters().clone())
        .set_path_loss_model(simulation_config.path_loss_model())
        .set_demo_series(true)
        .build_seeded(simulation_config.seed());

    let render_config = general_config.render_config();
    let renderer = match render_config.plot_caption() {
        Some(caption) => Some(PlottersRenderer::new(
            &derive_filename(simulation_config.parameters()),
            caption,
            render_config.plot_resolution(),
            simulator.task().period(),
        )?),
        None          => None,
    };

    let mut player = ExperimentPlayer::new(
        simulator,
        renderer,
        general_config.into_player_config()
    );

    player.play()
}

fn simulation_config(
    matches: &ArgMatches
) -> Result<SimulationConfig, ParameterError> {
    Ok(
        SimulationConfig::new(
            parameters(matches)?,
            path_loss_model(matches),
            matches.get_one::<u64>(ARG_SEED).copied(),
        )
    )
}

fn player_config(matches: &ArgMatches) -> PlayerConfig {
    PlayerConfig::new(
        ticks(matches),
        matches.get_flag(ARG_REALTIME),
        input(matches),
        output_directory(matches),
        matches.get_flag(ARG_ADVICE),
    )
}

fn render_config(matches: &ArgMatches) -> RenderConfig {
    let plot_caption = if matches.get_flag(ARG_NO_PLOT) {
        None
    } else {
        Some(plot_caption(matches))
    };

    RenderConfig::new(plot_caption, plot_resolution(matches))
}

// Unset values are left to the builder defaults.
fn parameters(matches: &ArgMatches) -> Result<ParameterSet, ParameterError> {
    let mut builder = ParameterSetBuilder::new()
        .set_router(Some(RouterSpec::default()))
        .set_broadband(broadband_plan(matches)?);

    if let Some(band) = matches.get_one::<String>(ARG_BAND) {
        builder = builder.set_band(band.parse()?);
    }
    if let Some(distance) = matches.get_one::<Meter>(ARG_DISTANCE) {
        builder = builder.set_distance(*distance);
    }
    if let Some(walls) = matches.get_one::<u32>(ARG_WALLS) {
        builder = builder.set_walls(*walls);
    }
    if let Some(interference) = matches.get_one::<u8>(ARG_INTERFERENCE) {
        builder = builder.set_interference(*interference);
    }
    if let Some(channel) = matches.get_one::<String>(ARG_CHANNEL) {
        let Ok(channel) = channel.parse::<Channel>();

        builder = builder.set_channel(channel);
    }
    if let Some(tx_power) = matches.get_one::<Percent>(ARG_TX_POWER) {
        builder = builder.set_tx_power(*tx_power);
    }
    if let Some(weather) = matches.get_one::<String>(ARG_WEATHER) {
        builder = builder.set_weather(weather.parse()?);
    }
    if let Some(time_of_day) = matches.get_one::<String>(ARG_TIME_OF_DAY) {
        builder = builder.set_time_of_day(time_of_day.parse()?);
    }

    builder.build()
}

// A plan is attached only when at least one cap is given.
fn broadband_plan(
    matches: &ArgMatches
) -> Result<Option<BroadbandPlan>, ParameterError> {
    let max_download = matches.get_one::<u32>(ARG_MAX_DOWNLOAD).copied();
    let max_upload   = matches.get_one::<u32>(ARG_MAX_UPLOAD).copied();

    if max_download.is_none() && max_upload.is_none() {
        return Ok(None);
    }

    let unit = match matches.get_one::<String>(ARG_SPEED_UNIT) {
        Some(unit) => unit.parse()?,
        None       => SpeedUnit::default(),
    };
    let default_plan = BroadbandPlan::default();
    let mut builder  = BroadbandPlanBuilder::new();

    if let Some(max_download) = max_download {
        builder = builder.set_download(PlanSpeed::new(
            max_download,
            unit,
            default_plan.download().stability()
        ));
    }
    if let Some(max_upload) = max_upload {
        builder = builder.set_upload(PlanSpeed::new(
            max_upload,
            unit,
            default_plan.upload().stability()
        ));
    }

    Ok(Some(builder.build()))
}

fn path_loss_model(matches: &ArgMatches) -> PathLossModel {
    if matches.get_flag(ARG_LITERAL_PATH_LOSS) {
        PathLossModel::Literal
    } else {
        PathLossModel::Physical
    }
}

fn ticks(matches: &ArgMatches) -> Tick {
    matches
        .get_one::<Tick>(ARG_TICKS)
        .copied()
        .unwrap_or_default()
}

fn input(matches: &ArgMatches) -> Option<(&Path, ImportOptions)> {
    let path    = matches.get_one::<PathBuf>(ARG_JSON_INPUT)?;
    let options = ImportOptions {
        chart_data: !matches.get_flag(ARG_NO_CHART),
        router_specs: !matches.get_flag(ARG_NO_ROUTER),
        broadband_specs: !matches.get_flag(ARG_NO_BROADBAND),
        experiment_settings: !matches.get_flag(ARG_NO_SETTINGS),
    };

    Some((path.as_path(), options))
}

fn output_directory(matches: &ArgMatches) -> Option<&Path> {
    matches
        .get_one::<PathBuf>(ARG_JSON_OUTPUT)
        .map(|p| &**p)
}

fn plot_caption(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>(ARG_PLOT_CAPTION)
        .map_or(DEFAULT_PLOT_CAPTION, String::as_str)
}

fn plot_resolution(matches: &ArgMatches) -> PlotResolution {
    let default_resolution = PlotResolution::default();
    let plot_width = matches
        .get_one::<Pixel>(ARG_PLOT_WIDTH)
        .copied()
        .unwrap_or(default_resolution.width());
    let plot_height = matches
        .get_one::<Pixel>(ARG_PLOT_HEIGHT)
        .copied()
        .unwrap_or(default_resolution.height());

    PlotResolution::new(plot_width, plot_height)
}
