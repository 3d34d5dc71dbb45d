//! Periodic and on-demand runs.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::cancel::cancelled;
use crate::controller::Controller;
use crate::orchestrator::RunOutcome;

/// Drives [`Controller::run_once`] on a fixed period, first tick immediately.
///
/// Manual triggers and ticks that arrive while a run is in flight are dropped
/// by the orchestrator's single-flight guard.
pub struct Scheduler {
    controller: Arc<Controller>,
    period: Duration,
}

/// Control side of a spawned [`Scheduler`].
pub struct SchedulerHandle {
    trigger: mpsc::Sender<()>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Request a run now. Returns false if a request is already pending.
    pub fn trigger_now(&self) -> bool {
        self.trigger.try_send(()).is_ok()
    }

    /// Stop scheduling and cancel the in-flight run, if any.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Wait for the scheduler task to finish.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

impl Scheduler {
    pub fn new(controller: Arc<Controller>, period: Duration) -> Self {
        Self { controller, period }
    }

    pub fn spawn(self) -> SchedulerHandle {
        let (trigger, triggers) = mpsc::channel(1);
        let (shutdown, stop) = watch::channel(false);
        let task = tokio::spawn(self.run_loop(triggers, stop));

        SchedulerHandle {
            trigger,
            shutdown,
            task,
        }
    }

    async fn run_loop(self, mut triggers: mpsc::Receiver<()>, stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut shutdown = stop.clone();
        let mut runs = JoinSet::new();

        info!(period_secs = self.period.as_secs(), "Scheduler started");

        loop {
            tokio::select! {
                _ = cancelled(&mut shutdown) => break,
                _ = ticker.tick() => self.start(&mut runs, &stop, "schedule"),
                trigger = triggers.recv() => match trigger {
                    Some(()) => self.start(&mut runs, &stop, "manual"),
                    None => break,
                },
                Some(result) = runs.join_next(), if !runs.is_empty() => log_result(result),
            }
        }

        // In-flight runs observe the shutdown signal and return early
        while let Some(result) = runs.join_next().await {
            log_result(result);
        }
        info!("Scheduler stopped");
    }

    fn start(&self, runs: &mut JoinSet<RunOutcome>, stop: &watch::Receiver<bool>, trigger: &'static str) {
        info!(trigger, "Run requested");
        let controller = Arc::clone(&self.controller);
        let cancel = stop.clone();
        runs.spawn(async move { controller.run_once(cancel).await });
    }
}

fn log_result(result: Result<RunOutcome, JoinError>) {
    match result {
        Ok(RunOutcome::Completed(set)) => {
            info!(run_id = %set.run_id(), instruments = set.len(), "Run finished")
        }
        Ok(RunOutcome::AlreadyRunning) => {}
        Ok(RunOutcome::Cancelled) => warn!("Run cancelled"),
        Err(e) => error!(error = %e, "Run task failed"),
    }
}
