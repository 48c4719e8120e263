use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use log::LevelFilter;

use crate::backend::mathphysics::{Meter, Percent, Tick};
use crate::frontend::FrontendError;
use crate::frontend::renderer::Pixel;

use args::{
    handle_arguments, ARG_ADVICE, ARG_BAND, ARG_CHANNEL, ARG_DISTANCE,
    ARG_INTERFERENCE, ARG_JSON_INPUT, ARG_JSON_OUTPUT, ARG_LITERAL_PATH_LOSS,
    ARG_MAX_DOWNLOAD, ARG_MAX_UPLOAD, ARG_NO_BROADBAND, ARG_NO_CHART,
    ARG_NO_PLOT, ARG_NO_ROUTER, ARG_NO_SETTINGS, ARG_PLOT_CAPTION,
    ARG_PLOT_HEIGHT, ARG_PLOT_WIDTH, ARG_REALTIME, ARG_SEED, ARG_SPEED_UNIT,
    ARG_TICKS, ARG_TIME_OF_DAY, ARG_TX_POWER, ARG_VERBOSE, ARG_WALLS,
    ARG_WEATHER, BAND_2_4GHZ, BAND_5GHZ, DEFAULT_PLOT_CAPTION,
    DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, DEFAULT_TICKS, TIME_AFTERNOON,
    TIME_EVENING, TIME_MORNING, TIME_NIGHT, UNIT_GBPS, UNIT_MBPS,
    WEATHER_CLEAR, WEATHER_DRY, WEATHER_HUMID, WEATHER_RAINY
};


mod args;


/// Parses the command line, sets up logging and runs the experiment.
///
/// # Errors
///
/// Will return `Err` if the arguments describe invalid parameters or the
/// experiment fails to import, render or save.
pub fn cli() -> Result<(), FrontendError> {
    let matches = Command::new("wifi_lab")
        .version("0.1.0")
        .about("Simulates WiFi signal strength, interference and throughput.")
        .args([
            arg_band(),
            arg_distance(),
            arg_walls(),
            arg_interference(),
            arg_channel(),
            arg_tx_power(),
            arg_weather(),
            arg_time_of_day(),
            arg_max_download(),
            arg_max_upload(),
            arg_speed_unit(),
            arg_ticks(),
            arg_seed(),
            arg_realtime(),
            arg_literal_path_loss(),
            arg_json_input(),
            arg_no_chart(),
            arg_no_router(),
            arg_no_broadband(),
            arg_no_settings(),
            arg_json_output(),
            arg_no_plot(),
            arg_plot_caption(),
            arg_plot_width(),
            arg_plot_height(),
            arg_advice(),
            arg_verbose(),
        ])
        .get_matches();

    let level = if matches.get_flag(ARG_VERBOSE) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    handle_arguments(&matches)
}

fn arg_band() -> Arg {
    Arg::new(ARG_BAND)
        .short('b')
        .long("band")
        .value_parser([BAND_2_4GHZ, BAND_5GHZ])
        .help("Choose the frequency band in GHz [default: 2.4]")
}

fn arg_distance() -> Arg {
    Arg::new(ARG_DISTANCE)
        .short('d')
        .long("distance")
        .value_parser(value_parser!(Meter))
        .help("Set the distance to the router (positive float, in meters) \
            [default: 3]")
}

fn arg_walls() -> Arg {
    Arg::new(ARG_WALLS)
        .short('w')
        .long("walls")
        .value_parser(value_parser!(u32))
        .help("Set the number of walls in between [default: 1]")
}

fn arg_interference() -> Arg {
    Arg::new(ARG_INTERFERENCE)
        .short('i')
        .long("interference")
        .value_parser(value_parser!(u8))
        .help("Set the baseline interference (0 to 100) [default: 20]")
}

fn arg_channel() -> Arg {
    Arg::new(ARG_CHANNEL)
        .long("channel")
        .help("Set the channel number or \"auto\" [default: 1]")
}

fn arg_tx_power() -> Arg {
    Arg::new(ARG_TX_POWER)
        .short('p')
        .long("power")
        .value_parser(value_parser!(Percent))
        .help("Set the transmit power (in percent) [default: 100]")
}

fn arg_weather() -> Arg {
    Arg::new(ARG_WEATHER)
        .long("weather")
        .value_parser(
            [WEATHER_CLEAR, WEATHER_RAINY, WEATHER_HUMID, WEATHER_DRY]
        )
        .help("Choose the weather [default: clear]")
}

fn arg_time_of_day() -> Arg {
    Arg::new(ARG_TIME_OF_DAY)
        .long("time")
        .value_parser(
            [TIME_MORNING, TIME_AFTERNOON, TIME_EVENING, TIME_NIGHT]
        )
        .help("Choose the time of day [default: morning]")
}

fn arg_max_download() -> Arg {
    Arg::new(ARG_MAX_DOWNLOAD)
        .long("max-download")
        .value_parser(value_parser!(u32))
        .help("Cap download speed by a broadband plan")
}

fn arg_max_upload() -> Arg {
    Arg::new(ARG_MAX_UPLOAD)
        .long("max-upload")
        .value_parser(value_parser!(u32))
        .help("Cap upload speed by a broadband plan")
}

fn arg_speed_unit() -> Arg {
    Arg::new(ARG_SPEED_UNIT)
        .long("speed-unit")
        .value_parser([UNIT_MBPS, UNIT_GBPS])
        .default_value(UNIT_MBPS)
        .help("Choose the unit of broadband plan caps")
}

fn arg_ticks() -> Arg {
    Arg::new(ARG_TICKS)
        .short('t')
        .long("ticks")
        .value_parser(value_parser!(Tick))
        .default_value(DEFAULT_TICKS)
        .help("Set the experiment length (in 500 ms ticks)")
}

fn arg_seed() -> Arg {
    Arg::new(ARG_SEED)
        .long("seed")
        .value_parser(value_parser!(u64))
        .help("Seed the random source for reproducible runs")
}

fn arg_realtime() -> Arg {
    Arg::new(ARG_REALTIME)
        .long("realtime")
        .action(ArgAction::SetTrue)
        .help("Wait one period between ticks")
}

fn arg_literal_path_loss() -> Arg {
    Arg::new(ARG_LITERAL_PATH_LOSS)
        .long("literal-path-loss")
        .action(ArgAction::SetTrue)
        .help("Feed the band in GHz into the path loss formula")
}

fn arg_json_input() -> Arg {
    Arg::new(ARG_JSON_INPUT)
        .long("ji")
        .value_parser(value_parser!(PathBuf))
        .help("Import an experiment result from a `.json` file")
}

fn arg_no_chart() -> Arg {
    Arg::new(ARG_NO_CHART)
        .long("no-chart")
        .requires(ARG_JSON_INPUT)
        .action(ArgAction::SetTrue)
        .help("Do not import chart data")
}

fn arg_no_router() -> Arg {
    Arg::new(ARG_NO_ROUTER)
        .long("no-router")
        .requires(ARG_JSON_INPUT)
        .action(ArgAction::SetTrue)
        .help("Do not import router specifications")
}

fn arg_no_broadband() -> Arg {
    Arg::new(ARG_NO_BROADBAND)
        .long("no-broadband")
        .requires(ARG_JSON_INPUT)
        .action(ArgAction::SetTrue)
        .help("Do not import broadband specifications")
}

fn arg_no_settings() -> Arg {
    Arg::new(ARG_NO_SETTINGS)
        .long("no-settings")
        .requires(ARG_JSON_INPUT)
        .action(ArgAction::SetTrue)
        .help("Do not import experiment settings")
}

fn arg_json_output() -> Arg {
    Arg::new(ARG_JSON_OUTPUT)
        .long("jo")
        .value_parser(value_parser!(PathBuf))
        .help("Save the experiment result to a `.json` file in the directory")
}

fn arg_no_plot() -> Arg {
    Arg::new(ARG_NO_PLOT)
        .long("no-plot")
        .action(ArgAction::SetTrue)
        .help("Do not render a GIF plot")
}

fn arg_plot_caption() -> Arg {
    Arg::new(ARG_PLOT_CAPTION)
        .short('c')
        .long("caption")
        .default_value(DEFAULT_PLOT_CAPTION)
        .help("Set the plot caption")
}

fn arg_plot_width() -> Arg {
    Arg::new(ARG_PLOT_WIDTH)
        .long("width")
        .requires(ARG_PLOT_HEIGHT)
        .value_parser(value_parser!(Pixel))
        .default_value(DEFAULT_PLOT_WIDTH)
        .help("Set the plot width (in pixels)")
}

fn arg_plot_height() -> Arg {
    Arg::new(ARG_PLOT_HEIGHT)
        .long("height")
        .requires(ARG_PLOT_WIDTH)
        .value_parser(value_parser!(Pixel))
        .default_value(DEFAULT_PLOT_HEIGHT)
        .help("Set the plot height (in pixels)")
}

fn arg_advice() -> Arg {
    Arg::new(ARG_ADVICE)
        .long("advice")
        .action(ArgAction::SetTrue)
        .help("Describe the router and broadband settings")
}

fn arg_verbose() -> Arg {
    Arg::new(ARG_VERBOSE)
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Show full log output")
}
