//! Background averaging task.
//!
//! Computes the mean of every numeric column and then the mean of those
//! means, on its own thread, against a snapshot of the data. The task can be
//! cancelled at any time; once cancelled it never delivers a result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Errors reported by the averaging task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The worker stopped without sending a final update.
    #[error("averaging task ended unexpectedly")]
    Disconnected,
}

/// Messages sent from the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskUpdate {
    /// `completed` of `total` columns have been scanned.
    Progress { completed: usize, total: usize },
    Completed(AverageResult),
    Cancelled,
}

/// Final state of a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Completed(AverageResult),
    Cancelled,
    Failed(TaskError),
}

/// Result of a finished averaging run.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageResult {
    /// Mean of the per-column means; `None` without numeric columns.
    pub mean: Option<f64>,
    /// Number of numeric columns that contributed.
    pub numeric_columns: usize,
    pub elapsed: Duration,
}

/// Entry point for spawning the averaging task.
pub struct AverageTask;

impl AverageTask {
    /// Starts averaging `snapshot` on a background thread.
    pub fn spawn(snapshot: DataFrame) -> AverageHandle {
        let (sender, receiver) = mpsc::channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let worker_flag = Arc::clone(&cancel_flag);
        let started = Instant::now();

        info!(columns = snapshot.width(), rows = snapshot.height(), "averaging started");
        std::thread::spawn(move || {
            let update = run_average(&snapshot, &sender, &worker_flag, started);
            let _ = sender.send(update);
        });

        AverageHandle {
            cancel_flag,
            receiver,
            started,
            outcome: None,
        }
    }
}

/// Caller-side handle to a running averaging task.
pub struct AverageHandle {
    cancel_flag: Arc<AtomicBool>,
    receiver: Receiver<TaskUpdate>,
    started: Instant,
    outcome: Option<TaskOutcome>,
}

impl AverageHandle {
    /// Requests cancellation. Never blocks.
    pub fn cancel(&self) {
        if !self.cancel_flag.swap(true, Ordering::SeqCst) {
            info!("averaging cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Time since the task was started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Final outcome, once known.
    pub fn outcome(&self) -> Option<&TaskOutcome> {
        self.outcome.as_ref()
    }

    /// Drains pending updates without blocking.
    ///
    /// Returns the most recent progress `(completed, total)` seen, if any.
    /// After cancellation a late result is turned into
    /// [`TaskOutcome::Cancelled`].
    pub fn poll(&mut self) -> Option<(usize, usize)> {
        let mut progress = None;
        while self.outcome.is_none() {
            match self.receiver.try_recv() {
                Ok(TaskUpdate::Progress { completed, total }) => {
                    progress = Some((completed, total));
                }
                Ok(update) => self.finish(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.outcome = Some(TaskOutcome::Failed(TaskError::Disconnected));
                }
            }
        }
        progress
    }

    /// Blocks until the task finishes or acknowledges cancellation.
    pub fn wait(mut self) -> TaskOutcome {
        while self.outcome.is_none() {
            match self.receiver.recv() {
                Ok(TaskUpdate::Progress { .. }) => {}
                Ok(update) => self.finish(update),
                Err(_) => self.outcome = Some(TaskOutcome::Failed(TaskError::Disconnected)),
            }
        }
        self.outcome
            .take()
            .unwrap_or(TaskOutcome::Failed(TaskError::Disconnected))
    }

    fn finish(&mut self, update: TaskUpdate) {
        let outcome = match update {
            TaskUpdate::Completed(_) if self.is_cancelled() => TaskOutcome::Cancelled,
            TaskUpdate::Completed(result) => TaskOutcome::Completed(result),
            TaskUpdate::Cancelled | TaskUpdate::Progress { .. } => TaskOutcome::Cancelled,
        };
        debug!(?outcome, "averaging finished");
        self.outcome = Some(outcome);
    }
}

impl Drop for AverageHandle {
    fn drop(&mut self) {
        if self.outcome.is_none() {
            self.cancel_flag.store(true, Ordering::SeqCst);
        }
    }
}

fn run_average(
    frame: &DataFrame,
    sender: &Sender<TaskUpdate>,
    cancel_flag: &AtomicBool,
    started: Instant,
) -> TaskUpdate {
    let total = frame.width();
    let mut means = Vec::new();

    for (idx, col) in frame.get_columns().iter().enumerate() {
        if cancel_flag.load(Ordering::SeqCst) {
            return TaskUpdate::Cancelled;
        }
        if let Some(mean) = column_mean(col) {
            means.push(mean);
        }
        let _ = sender.send(TaskUpdate::Progress {
            completed: idx + 1,
            total,
        });
    }

    if cancel_flag.load(Ordering::SeqCst) {
        return TaskUpdate::Cancelled;
    }
    TaskUpdate::Completed(AverageResult {
        mean: mean_of(&means),
        numeric_columns: means.len(),
        elapsed: started.elapsed(),
    })
}

/// Mean of the per-column means over numeric columns.
///
/// Columns holding only missing values have no mean and are skipped.
pub fn grand_mean(frame: &DataFrame) -> Option<f64> {
    let means: Vec<f64> = frame.get_columns().iter().filter_map(column_mean).collect();
    mean_of(&means)
}

/// Mean of a numeric column, skipping missing values and NaN.
fn column_mean(col: &Column) -> Option<f64> {
    if !col.dtype().is_primitive_numeric() {
        return None;
    }
    let values = col.cast(&DataType::Float64).ok()?;
    let present: Vec<f64> = values
        .f64()
        .ok()?
        .into_iter()
        .flatten()
        .filter(|value| !value.is_nan())
        .collect();
    mean_of(&present)
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
