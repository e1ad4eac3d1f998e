//! Team radio queue: one message on screen at a time, each for a fixed time.
//!
//! The state machine itself is [`RadioQueue`], a plain value driven by two
//! inputs (a new batch arriving, the dismissal timer firing). [`RadioScheduler`]
//! runs that machine in a spawned task, owns the [`DismissTimer`], and
//! publishes the message on display through a watch channel. Dropping the
//! scheduler cancels the task and any pending timer.

use std::collections::VecDeque;
use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Sleep, sleep};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::types::RadioMessage;

/// How long a message stays on screen unless configured otherwise.
pub const DEFAULT_DISPLAY: Duration = Duration::from_secs(6);

/// What the radio panel is doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RadioState {
    #[default]
    Idle,
    Displaying(RadioMessage),
}

/// Radio queue state machine.
///
/// Transitions return `Some(duration)` when a message has just been put on
/// display and the dismissal timer must be armed for that long.
#[derive(Debug, Clone)]
pub struct RadioQueue {
    pending: VecDeque<RadioMessage>,
    state: RadioState,
    display_for: Duration,
}

impl RadioQueue {
    pub fn new(display_for: Duration) -> Self {
        Self { pending: VecDeque::new(), state: RadioState::Idle, display_for }
    }

    pub fn state(&self) -> &RadioState {
        &self.state
    }

    /// The message on display, if any.
    pub fn displayed(&self) -> Option<&RadioMessage> {
        match &self.state {
            RadioState::Displaying(message) => Some(message),
            RadioState::Idle => None,
        }
    }

    /// Messages waiting behind the displayed one.
    pub fn pending(&self) -> impl Iterator<Item = &RadioMessage> {
        self.pending.iter()
    }

    /// A new batch replaces whatever was still waiting. The displayed message
    /// keeps its remaining time.
    pub fn receive_batch(&mut self, batch: Vec<RadioMessage>) -> Option<Duration> {
        if !self.pending.is_empty() {
            debug!("Radio batch of {} replaces {} pending messages", batch.len(), self.pending.len());
        }
        self.pending = batch.into();
        self.promote()
    }

    /// The dismissal timer fired: clear the display and show the next message.
    pub fn timer_fired(&mut self) -> Option<Duration> {
        if let RadioState::Displaying(message) = &self.state {
            trace!("Dismissing radio message from {}", message.driver);
        }
        self.state = RadioState::Idle;
        self.promote()
    }

    fn promote(&mut self) -> Option<Duration> {
        if self.state != RadioState::Idle {
            return None;
        }
        let next = self.pending.pop_front()?;
        debug!("Radio: {} on lap {}", next.driver, next.lap);
        self.state = RadioState::Displaying(next);
        Some(self.display_for)
    }
}

/// A cancellable one-shot timer.
///
/// `fired()` may be polled from `select!` repeatedly: the deadline lives in the
/// timer, not in the future, so losing a race to another branch does not reset it.
#[derive(Debug, Default)]
pub struct DismissTimer {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl DismissTimer {
    /// Start (or restart) the timer.
    pub fn arm(&mut self, after: Duration) {
        self.sleep = Some(Box::pin(sleep(after)));
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// Resolves when the armed deadline passes; never resolves while disarmed.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(deadline) => {
                deadline.as_mut().await;
                self.sleep = None;
            }
            None => pending::<()>().await,
        }
    }
}

/// Handle to a running radio queue task.
pub struct RadioScheduler {
    batches: mpsc::UnboundedSender<Vec<RadioMessage>>,
    current: watch::Receiver<Option<RadioMessage>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RadioScheduler {
    /// Spawn the queue task on the current tokio runtime.
    pub fn spawn(display_for: Duration) -> Self {
        let (batch_tx, batch_rx) = mpsc::unbounded_channel();
        let (current_tx, current_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(Self::run(
            RadioQueue::new(display_for),
            batch_rx,
            current_tx,
            cancel.clone(),
        ));

        Self { batches: batch_tx, current: current_rx, cancel, task: Some(task) }
    }

    /// Hand a new batch to the queue. Empty batches are ignored.
    pub fn push(&self, batch: Vec<RadioMessage>) {
        if batch.is_empty() {
            trace!("Ignoring empty radio batch");
            return;
        }
        if self.batches.send(batch).is_err() {
            warn!("Radio scheduler has stopped; dropping batch");
        }
    }

    /// Message currently on display.
    pub fn current(&self) -> Option<RadioMessage> {
        self.current.borrow().clone()
    }

    /// Stream of display changes, starting with the current value.
    pub fn updates(&self) -> impl Stream<Item = Option<RadioMessage>> + 'static {
        WatchStream::new(self.current.clone())
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Radio scheduler task failed: {}", e);
            }
        }
    }

    async fn run(
        mut queue: RadioQueue,
        mut batches: mpsc::UnboundedReceiver<Vec<RadioMessage>>,
        current: watch::Sender<Option<RadioMessage>>,
        cancel: CancellationToken,
    ) {
        info!("Radio scheduler started");
        let mut timer = DismissTimer::default();

        loop {
            let arm = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Radio scheduler cancelled");
                    break;
                }
                batch = batches.recv() => match batch {
                    Some(batch) => queue.receive_batch(batch),
                    None => {
                        debug!("Radio batch sender dropped");
                        break;
                    }
                },
                _ = timer.fired() => queue.timer_fired(),
            };

            if let Some(after) = arm {
                timer.arm(after);
            }
            current.send_if_modified(|shown| {
                let next = queue.displayed();
                if shown.as_ref() == next {
                    false
                } else {
                    *shown = next.cloned();
                    true
                }
            });
        }

        timer.cancel();
        current.send_replace(None);
        info!("Radio scheduler stopped");
    }
}

impl Drop for RadioScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
