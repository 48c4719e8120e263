use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::report::{ExperimentResult, ReportError};


/// Saves `result` as `wifi_experiment_<local time>.json` inside
/// `output_directory`, creating the directory if needed.
pub fn write_experiment_result(
    output_directory: &Path,
    result: &ExperimentResult,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(output_directory)?;

    let local_time = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
    let file_path  = output_directory
        .join(format!("wifi_experiment_{local_time}.json"));

    result.save(&file_path)?;

    Ok(file_path)
}
