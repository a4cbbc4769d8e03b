//! Live results subscriptions.
//!
//! A subscription owns one recurring task. The task fetches the timetable
//! once, then reclassifies it on every tick and pushes the view model down a
//! channel. Dropping or cancelling the subscription aborts the task.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::matching::RouteSearchSelection;
use crate::timetable::{ProviderError, TimetableProvider, TimetableRequest};

use super::classify::{ResultsViewModel, classify};
use super::clock::Clock;
use super::config::ResultsConfig;

/// Terminal error on a results stream.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    /// The timetable could not be fetched
    #[error("failed to load timetable: {0}")]
    Timetable(#[from] ProviderError),
}

/// One emission on a results stream.
pub type ResultsUpdate = Result<ResultsViewModel, ResultsError>;

/// Emissions waiting for the subscriber. Kept small so a slow subscriber
/// sees fresh ticks rather than a backlog.
const EMISSION_BUFFER: usize = 1;

/// Builds live results subscriptions.
pub struct ResultsEngine<P, C> {
    provider: Arc<P>,
    clock: Arc<C>,
    config: Arc<ResultsConfig>,
}

impl<P, C> Clone for ResultsEngine<P, C> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P, C> ResultsEngine<P, C>
where
    P: TimetableProvider + 'static,
    C: Clock + 'static,
{
    /// Create a new engine.
    pub fn new(provider: Arc<P>, clock: Arc<C>, config: ResultsConfig) -> Self {
        Self {
            provider,
            clock,
            config: Arc::new(config),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ResultsConfig {
        &self.config
    }

    /// Start a live results stream for `selection`.
    ///
    /// An empty selection yields one empty view model and then ends without
    /// fetching anything. A failed fetch yields one error and then ends.
    /// Must be called from within a tokio runtime.
    pub fn load_results(&self, selection: RouteSearchSelection) -> ResultsSubscription {
        let (tx, rx) = mpsc::channel(EMISSION_BUFFER);
        let task = tokio::spawn(run_results(
            self.provider.clone(),
            self.clock.clone(),
            self.config.clone(),
            selection,
            tx,
        ));
        ResultsSubscription { rx, task }
    }
}

/// The recurring task behind a subscription.
async fn run_results<P, C>(
    provider: Arc<P>,
    clock: Arc<C>,
    config: Arc<ResultsConfig>,
    selection: RouteSearchSelection,
    tx: mpsc::Sender<ResultsUpdate>,
) where
    P: TimetableProvider,
    C: Clock,
{
    if selection.is_empty() {
        debug!(
            origin = %selection.origin().id,
            destination = %selection.destination().id,
            "no line matches, emitting empty results"
        );
        let _ = tx.send(Ok(ResultsViewModel::empty())).await;
        return;
    }

    let request = TimetableRequest::for_selection(&selection);
    let entries = match provider.load_timetable(&request).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                origin = %request.origin_nucleus_id,
                destination = %request.destination_nucleus_id,
                error = %e,
                "timetable fetch failed"
            );
            let _ = tx.send(Err(e.into())).await;
            return;
        }
    };
    info!(
        origin = %request.origin_nucleus_id,
        destination = %request.destination_nucleus_id,
        entries = entries.len(),
        "loaded timetable"
    );

    let mut interval = tokio::time::interval(config.refresh_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let model = classify(&selection, &entries, clock.now(), &config);
        trace!(
            departures = model.departures.len(),
            next = ?model.next_departure_id,
            "reclassified timetable"
        );
        if tx.send(Ok(model)).await.is_err() {
            debug!("results subscriber gone, stopping");
            break;
        }
    }
}

/// A live stream of view models for one selection.
///
/// Emissions are ordered by tick. Dropping the subscription stops its task.
pub struct ResultsSubscription {
    rx: mpsc::Receiver<ResultsUpdate>,
    task: JoinHandle<()>,
}

impl ResultsSubscription {
    /// Wait for the next emission. `None` once the stream has ended.
    pub async fn next(&mut self) -> Option<ResultsUpdate> {
        self.rx.recv().await
    }

    /// Stop the recurring task. Nothing further is emitted.
    pub fn cancel(&mut self) {
        self.task.abort();
        self.rx.close();
    }

    /// Whether the recurring task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ResultsSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Stream for ResultsSubscription {
    type Item = ResultsUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// A live results view that follows the user's latest selection.
///
/// Selecting a new route stops the previous subscription before starting
/// the next, so at most one recurring task runs and no tick from an older
/// selection is delivered after a newer one has been chosen.
pub struct ResultsController<P, C> {
    engine: ResultsEngine<P, C>,
    current: Option<ResultsSubscription>,
}

impl<P, C> ResultsController<P, C>
where
    P: TimetableProvider + 'static,
    C: Clock + 'static,
{
    /// Create a controller with no selection.
    pub fn new(engine: ResultsEngine<P, C>) -> Self {
        Self {
            engine,
            current: None,
        }
    }

    /// Switch to `selection`, abandoning the previous one.
    pub fn select(&mut self, selection: RouteSearchSelection) {
        self.cancel();
        debug!(
            origin = %selection.origin().id,
            destination = %selection.destination().id,
            "switching results selection"
        );
        self.current = Some(self.engine.load_results(selection));
    }

    /// Drop the current selection.
    pub fn cancel(&mut self) {
        if let Some(mut previous) = self.current.take() {
            previous.cancel();
        }
    }

    /// Whether a selection is still streaming. Turns false once `next`
    /// has observed the end of the stream.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Next emission for the current selection. `None` when there is no
    /// selection or its stream has ended; an ended selection is dropped.
    pub async fn next(&mut self) -> Option<ResultsUpdate> {
        let update = self.current.as_mut()?.next().await;
        if update.is_none() {
            self.current = None;
        }
        update
    }
}
