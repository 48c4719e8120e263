use derive_more::Display;
use thiserror::Error;

use super::mathphysics::{Millisecond, Tick};


#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Periodic task is not running")]
    NotRunning,
    #[error("Task run `{0}` was cancelled")]
    Cancelled(TaskHandle),
}


/// Identifies one run of a periodic task.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
#[display("#{_0}")]
pub struct TaskHandle(u64);


#[derive(Clone, Copy, Debug, PartialEq)]
struct TaskRun {
    handle: TaskHandle,
    ticks: Tick,
}


/// Logical timer driving experiment ticks.
///
/// At most one run is live. Starting a new run cancels the previous one, and
/// firing with the handle of a cancelled run is rejected, so ticks from two
/// runs never interleave.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicTask {
    period: Millisecond,
    next_handle: u64,
    run: Option<TaskRun>,
}

impl PeriodicTask {
    #[must_use]
    pub fn new(period: Millisecond) -> Self {
        Self {
            period,
            next_handle: 0,
            run: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Millisecond {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[must_use]
    pub fn handle(&self) -> Option<TaskHandle> {
        self.run.map(|run| run.handle)
    }

    #[must_use]
    pub fn ticks(&self) -> Tick {
        self.run.map_or(0, |run| run.ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Millisecond {
        self.ticks() * self.period
    }

    pub fn start(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);

        self.next_handle += 1;
        self.run = Some(TaskRun { handle, ticks: 0 });

        handle
    }

    pub fn cancel(&mut self) -> Option<TaskHandle> {
        self.run.take().map(|run| run.handle)
    }

    /// Advances the live run by one period and returns its tick count.
    ///
    /// # Errors
    ///
    /// Will return `Err` if no run is live or `handle` belongs to an earlier
    /// run.
    pub fn fire(&mut self, handle: TaskHandle) -> Result<Tick, TaskError> {
        let Some(run) = self.run.as_mut() else {
            return Err(TaskError::NotRunning);
        };

        if run.handle != handle {
            return Err(TaskError::Cancelled(handle));
        }

        run.ticks += 1;

        Ok(run.ticks)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    const SOME_PERIOD: Millisecond = 500;


    #[test]
    fn firing_counts_ticks() {
        let mut task = PeriodicTask::new(SOME_PERIOD);
        let handle   = task.start();

        assert_eq!(task.fire(handle), Ok(1));
        assert_eq!(task.fire(handle), Ok(2));
        assert_eq!(task.ticks(), 2);
        assert_eq!(task.elapsed(), 1_000);
    }

    #[test]
    fn restarting_cancels_the_previous_run() {
        let mut task = PeriodicTask::new(SOME_PERIOD);
        let first    = task.start();

        assert_eq!(task.fire(first), Ok(1));

        let second = task.start();

        assert_ne!(first, second);
        assert_eq!(task.fire(first), Err(TaskError::Cancelled(first)));
        assert_eq!(task.fire(second), Ok(1));
    }

    #[test]
    fn cancelled_task_does_not_fire() {
        let mut task = PeriodicTask::new(SOME_PERIOD);
        let handle   = task.start();

        assert_eq!(task.cancel(), Some(handle));
        assert!(!task.is_running());
        assert_eq!(task.fire(handle), Err(TaskError::NotRunning));
        assert_eq!(task.cancel(), None);
        assert_eq!(task.ticks(), 0);
    }
}
