//! Batch orchestration of fetch+score runs.

use futures::future::join_all;
use scanner_core::error::DataError;
use scanner_core::traits::{InstrumentUniverse, MarketData};
use scanner_core::types::{Analysis, AnalysisSet, Bar, BarSeries, Interval, SeriesPair};
use scanner_scoring::{ScoreReport, ScoringEngine};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex, RwLock};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::cancel::cancelled;
use crate::config::EngineConfig;
use crate::events::{progress_percent, RunEvent, RunPhase};
use crate::watchlist::Watchlist;

const EVENT_CAPACITY: usize = 64;

/// Result of a run request.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The run finished and its set was published
    Completed(Arc<AnalysisSet>),
    /// Another run was in flight; this request was dropped
    AlreadyRunning,
    /// The run was cancelled before publishing
    Cancelled,
}

impl RunOutcome {
    pub fn analysis_set(&self) -> Option<&Arc<AnalysisSet>> {
        match self {
            RunOutcome::Completed(set) => Some(set),
            _ => None,
        }
    }
}

/// Drives runs over the instrument universe.
///
/// At most one run is in flight at a time. Within a run, instruments are
/// processed in batches of `batch_size`; members of a batch are fetched and
/// scored concurrently, and a failing member is skipped without affecting the
/// rest. The completed [`AnalysisSet`] replaces the previous one in a single
/// step.
pub struct Orchestrator {
    config: EngineConfig,
    market_data: Arc<dyn MarketData>,
    universe: Arc<dyn InstrumentUniverse>,
    fallback: Vec<String>,
    engine: ScoringEngine,
    cached_universe: RwLock<Vec<String>>,
    run_lock: Mutex<()>,
    published: watch::Sender<Option<Arc<AnalysisSet>>>,
    events: broadcast::Sender<RunEvent>,
}

impl Orchestrator {
    pub fn new(
        config: EngineConfig,
        market_data: Arc<dyn MarketData>,
        universe: Arc<dyn InstrumentUniverse>,
        fallback: Vec<String>,
        engine: ScoringEngine,
    ) -> Self {
        let (published, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            config,
            market_data,
            universe,
            fallback,
            engine,
            cached_universe: RwLock::new(Vec::new()),
            run_lock: Mutex::new(()),
            published,
            events,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The last published set, if any run has completed.
    pub fn latest(&self) -> Option<Arc<AnalysisSet>> {
        self.published.borrow().clone()
    }

    /// Watch published sets.
    pub fn subscribe_results(&self) -> watch::Receiver<Option<Arc<AnalysisSet>>> {
        self.published.subscribe()
    }

    /// Receive lifecycle events of subsequent runs.
    pub fn subscribe_events(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    fn emit(&self, event: RunEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// The tradable universe, fetched once and cached.
    ///
    /// On a failed or empty fetch the static fallback list is returned and
    /// nothing is cached, so the next run tries the service again.
    pub async fn universe(&self) -> Vec<String> {
        {
            let cached = self.cached_universe.read().await;
            if !cached.is_empty() {
                return cached.clone();
            }
        }
        self.refresh_universe().await
    }

    /// Fetch the universe, bypassing the cache.
    pub async fn refresh_universe(&self) -> Vec<String> {
        match self.universe.list_instruments().await {
            Ok(symbols) if !symbols.is_empty() => {
                info!(
                    source = self.universe.name(),
                    count = symbols.len(),
                    "Loaded instrument universe"
                );
                *self.cached_universe.write().await = symbols.clone();
                symbols
            }
            Ok(_) => {
                warn!(source = self.universe.name(), "Empty universe, using fallback list");
                self.fallback.clone()
            }
            Err(e) => {
                warn!(
                    source = self.universe.name(),
                    error = %e,
                    "Universe fetch failed, using fallback list"
                );
                self.fallback.clone()
            }
        }
    }

    /// Instruments a run analyses: every match of the watchlist (the whole
    /// universe for `all`), or the first `max_instruments` of the universe
    /// when it matches nothing.
    pub fn select_instruments(&self, universe: &[String], watchlist: &Watchlist) -> Vec<String> {
        let selected = watchlist.select(universe);
        if selected.is_empty() {
            return universe
                .iter()
                .take(self.config.max_instruments)
                .cloned()
                .collect();
        }
        selected
    }

    async fn fetch(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Bar>, DataError> {
        let timeout = self.config.fetch_timeout;
        tokio::time::timeout(timeout, self.market_data.fetch_bars(symbol, interval, limit))
            .await
            .map_err(|_| DataError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            })?
    }

    /// Fetch the hourly and daily series for one instrument.
    pub async fn fetch_pair(&self, symbol: &str) -> Result<SeriesPair, DataError> {
        let (hourly, daily) = tokio::try_join!(
            self.fetch(symbol, Interval::Hour1, self.config.hourly_lookback),
            self.fetch(symbol, Interval::Day1, self.config.daily_lookback),
        )?;

        Ok(SeriesPair::new(
            BarSeries::new(symbol, Interval::Hour1, hourly),
            BarSeries::new(symbol, Interval::Day1, daily),
        ))
    }

    /// Fetch and score one instrument.
    pub async fn analyze(&self, symbol: &str) -> Result<Analysis, DataError> {
        let pair = self.fetch_pair(symbol).await?;
        Ok(self.engine.score(symbol, &pair))
    }

    /// Fetch and score one instrument, keeping the fired rules.
    pub async fn analyze_detailed(&self, symbol: &str) -> Result<ScoreReport, DataError> {
        let pair = self.fetch_pair(symbol).await?;
        Ok(self.engine.score_detailed(symbol, &pair))
    }

    /// Execute one run unless another is already in flight.
    ///
    /// Setting `cancel` to `true` aborts in-flight fetches; nothing is
    /// published for a cancelled run.
    pub async fn run(&self, watchlist: &Watchlist, cancel: watch::Receiver<bool>) -> RunOutcome {
        let Ok(_guard) = self.run_lock.try_lock() else {
            info!("Run already in progress, dropping request");
            return RunOutcome::AlreadyRunning;
        };

        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, watchlist = %watchlist);
        self.execute(run_id, watchlist, cancel).instrument(span).await
    }

    async fn execute(
        &self,
        run_id: Uuid,
        watchlist: &Watchlist,
        mut cancel: watch::Receiver<bool>,
    ) -> RunOutcome {
        if self.cached_universe.read().await.is_empty() {
            self.emit(RunEvent::Phase {
                run_id,
                phase: RunPhase::FetchingUniverse,
            });
        }
        let universe = tokio::select! {
            universe = self.universe() => universe,
            _ = cancelled(&mut cancel) => return self.cancel(run_id),
        };

        let instruments = self.select_instruments(&universe, watchlist);
        let total = instruments.len();
        info!(total, batch_size = self.config.batch_size, "Starting run");
        self.emit(RunEvent::Phase {
            run_id,
            phase: RunPhase::Scoring,
        });

        let mut set = AnalysisSet::new(run_id);
        let mut completed = 0;

        for (index, batch) in instruments.chunks(self.config.batch_size.max(1)).enumerate() {
            if index > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.batch_pause) => {}
                    _ = cancelled(&mut cancel) => return self.cancel(run_id),
                }
            }

            let results = tokio::select! {
                results = join_all(batch.iter().map(|symbol| self.analyze(symbol))) => results,
                _ = cancelled(&mut cancel) => return self.cancel(run_id),
            };

            for (symbol, result) in batch.iter().zip(results) {
                match result {
                    Ok(analysis) => set.insert(symbol.as_str(), analysis),
                    Err(e) => warn!(symbol = %symbol, error = %e, "Skipping instrument"),
                }
            }

            completed += batch.len();
            let percent = progress_percent(completed, total);
            debug!(completed, total, percent, "Batch complete");
            self.emit(RunEvent::Progress {
                run_id,
                completed,
                total,
                percent,
            });
        }

        if total == 0 {
            self.emit(RunEvent::Progress {
                run_id,
                completed: 0,
                total: 0,
                percent: 100,
            });
        }

        self.emit(RunEvent::Phase {
            run_id,
            phase: RunPhase::Publishing,
        });
        let set = Arc::new(set.finish());
        self.published.send_replace(Some(Arc::clone(&set)));
        info!(
            analysed = set.len(),
            skipped = total - set.len(),
            "Run published"
        );
        self.emit(RunEvent::Published {
            run_id,
            instruments: set.len(),
        });
        self.emit(RunEvent::Phase {
            run_id,
            phase: RunPhase::Idle,
        });

        RunOutcome::Completed(set)
    }

    fn cancel(&self, run_id: Uuid) -> RunOutcome {
        warn!("Run cancelled before publishing");
        self.emit(RunEvent::Cancelled { run_id });
        self.emit(RunEvent::Phase {
            run_id,
            phase: RunPhase::Idle,
        });
        RunOutcome::Cancelled
    }
}
