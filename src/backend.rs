use mathphysics::Millisecond;


pub mod advice;
pub mod engine;
pub mod mathphysics;
pub mod parameters;
pub mod report;
pub mod series;
pub mod signal;
pub mod task;


// Period of the experiment timer.
pub const ITERATION_TIME: Millisecond = 500;
