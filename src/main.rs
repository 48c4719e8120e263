use std::process::ExitCode;

use log::error;

use wifi_lab::frontend::cli::cli;


fn main() -> ExitCode {
    match cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
