//! Keeps the ranked lists in step with the published set and the active
//! watchlist, and notifies after each completed run.

use scanner_core::types::RankedLists;
use scanner_notify::{Dispatcher, NotificationStatus};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::orchestrator::{Orchestrator, RunOutcome};
use crate::ranker::rank;
use crate::watchlist::Watchlist;

pub struct Controller {
    orchestrator: Arc<Orchestrator>,
    dispatcher: Option<Dispatcher>,
    watchlist: watch::Sender<Watchlist>,
    ranked: watch::Sender<Arc<RankedLists>>,
    status: watch::Sender<Option<NotificationStatus>>,
}

impl Controller {
    pub fn new(orchestrator: Arc<Orchestrator>, dispatcher: Option<Dispatcher>, watchlist: Watchlist) -> Self {
        let (watchlist, _) = watch::channel(watchlist);
        let (ranked, _) = watch::channel(Arc::new(RankedLists::default()));
        let (status, _) = watch::channel(None);

        Self {
            orchestrator,
            dispatcher,
            watchlist,
            ranked,
            status,
        }
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub fn watchlist(&self) -> Watchlist {
        self.watchlist.borrow().clone()
    }

    /// Switch the active watchlist and re-rank the last published set.
    ///
    /// No run is started; the next run analyses the new watchlist.
    pub fn set_watchlist(&self, watchlist: Watchlist) -> Arc<RankedLists> {
        info!(watchlist = %watchlist, "Active watchlist changed");
        self.watchlist.send_replace(watchlist);
        self.rerank()
    }

    fn rerank(&self) -> Arc<RankedLists> {
        let lists = match self.orchestrator.latest() {
            Some(set) => {
                let watchlist = self.watchlist.borrow();
                Arc::new(rank(&set, Some(&*watchlist)))
            }
            None => Arc::new(RankedLists::default()),
        };
        self.ranked.send_replace(Arc::clone(&lists));
        lists
    }

    pub fn ranked(&self) -> Arc<RankedLists> {
        Arc::clone(&*self.ranked.borrow())
    }

    pub fn subscribe_ranked(&self) -> watch::Receiver<Arc<RankedLists>> {
        self.ranked.subscribe()
    }

    /// Outcome of the most recent notification attempt, if any.
    pub fn notification_status(&self) -> Option<NotificationStatus> {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Option<NotificationStatus>> {
        self.status.subscribe()
    }

    /// Run once over the active watchlist, then re-rank and notify.
    ///
    /// The notification goes out only when the run analysed at least one
    /// instrument and a relay is configured. Delivery failures end up in
    /// [`Controller::notification_status`], never in the outcome.
    pub async fn run_once(&self, cancel: watch::Receiver<bool>) -> RunOutcome {
        let watchlist = self.watchlist();
        let outcome = self.orchestrator.run(&watchlist, cancel).await;

        let RunOutcome::Completed(set) = &outcome else {
            return outcome;
        };

        let lists = self.rerank();
        debug!(long = lists.long.len(), short = lists.short.len(), "Ranked lists updated");

        if set.is_empty() {
            info!("Nothing analysed, skipping notification");
            return outcome;
        }
        if let Some(dispatcher) = &self.dispatcher {
            let status = dispatcher.dispatch(&lists).await;
            self.status.send_replace(Some(status));
        }

        outcome
    }
}
