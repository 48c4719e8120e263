use thiserror::Error;

use super::backend::engine::SimulatorError;
use super::backend::parameters::ParameterError;
use super::backend::report::ReportError;

use renderer::RenderError;


pub mod cli;
pub mod config;
pub mod player;
pub mod renderer;


#[derive(Debug, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}
