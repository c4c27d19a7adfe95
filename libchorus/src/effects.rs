//! Mocked asynchronous effects
//!
//! The reducers stay pure. Intent actions (`RequestLike`, `TrySetText`) are
//! handed to [`EffectRunner::handle`] after the store has accepted them.
//! The runner answers with the actions to dispatch right away, and sends
//! delayed actions over a channel that the event loop drains.
//!
//! # Architecture
//!
//! - A tokio runtime with one worker runs the timers
//! - Results travel over a crossbeam channel so a synchronous loop can poll
//! - Tasks never see the store; they only send actions
//!
//! # Like flow
//!
//! `RequestLike {id}` is answered with `SetLoading(true)` and an optimistic
//! `AddLike {id, 1}`. After the configured latency the task sends
//! `SetLoading(false)`, preceded on failure by `SetError` and a compensating
//! `AddLike {id, -1}`. A like stays in flight until its `SetLoading(false)`
//! has been drained from the channel, and further requests are ignored
//! until then.
//!
//! # Text flow
//!
//! `TrySetText(text)` is debounced: each call aborts the pending timer and
//! starts a new one, so only the last text in a burst becomes `SetText`.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use rand::Rng;
use tokio::task::JoinHandle;

use crate::config::TimelineConfig;
use crate::error::{ChorusError, Result};
use crate::state::Action;
use crate::timeline::TimelineAction;

pub struct EffectRunner {
    runtime: tokio::runtime::Runtime,
    config: TimelineConfig,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    like_task: Option<JoinHandle<()>>,
    pending_like: Option<u64>,
    text_task: Option<JoinHandle<()>>,
}

impl EffectRunner {
    /// Create a runner with its own runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the failure rate is outside `[0, 1]` or the tokio
    /// runtime cannot be created.
    pub fn new(config: TimelineConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.like_failure_rate) {
            return Err(ChorusError::Effect(format!(
                "like_failure_rate must be within [0, 1], got {}",
                config.like_failure_rate
            )));
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("chorus-effects")
            .enable_time()
            .build()
            .map_err(|e| ChorusError::Effect(format!("Failed to start effect runtime: {}", e)))?;
        let (tx, rx) = unbounded();

        Ok(Self {
            runtime,
            config,
            tx,
            rx,
            like_task: None,
            pending_like: None,
            text_task: None,
        })
    }

    /// React to an accepted action
    ///
    /// Returns the follow-up actions to dispatch immediately.
    pub fn handle(&mut self, action: &Action) -> Vec<Action> {
        match action {
            Action::Timeline(TimelineAction::RequestLike { id }) => self.request_like(*id),
            Action::Timeline(TimelineAction::TrySetText(text)) => {
                self.debounce_text(text.clone());
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn request_like(&mut self, id: u64) -> Vec<Action> {
        if let Some(pending) = self.pending_like {
            tracing::debug!(id, pending, "Like already in flight, ignoring request");
            return Vec::new();
        }

        let latency = Duration::from_millis(self.config.like_latency_ms);
        let failed = rand::thread_rng().gen_bool(self.config.like_failure_rate);
        let tx = self.tx.clone();
        tracing::debug!(id, failed, "Starting like request");
        self.pending_like = Some(id);

        self.like_task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            let mut follow_ups = Vec::with_capacity(3);
            if failed {
                follow_ups.push(TimelineAction::SetError(Some(format!(
                    "Like request for timeline {} failed",
                    id
                ))));
                follow_ups.push(TimelineAction::AddLike { id, value: -1 });
            }
            follow_ups.push(TimelineAction::SetLoading(false));

            for action in follow_ups {
                // Receiver gone means the runner was dropped
                if tx.send(action.into()).is_err() {
                    break;
                }
            }
        }));

        vec![
            TimelineAction::SetLoading(true).into(),
            TimelineAction::AddLike { id, value: 1 }.into(),
        ]
    }

    fn debounce_text(&mut self, text: String) {
        if let Some(pending) = self.text_task.take() {
            pending.abort();
            tracing::trace!("Superseded pending text");
        }

        let delay = Duration::from_millis(self.config.text_debounce_ms);
        let tx = self.tx.clone();
        self.text_task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimelineAction::SetText(text).into());
        }));
    }

    /// True from `RequestLike` until its `SetLoading(false)` is drained
    pub fn like_in_flight(&self) -> bool {
        self.pending_like.is_some()
    }

    /// True when no timer is pending
    pub fn is_idle(&self) -> bool {
        let text_pending = self
            .text_task
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        !self.like_in_flight() && !text_pending
    }

    /// Delayed actions that are ready, without blocking
    pub fn try_drain(&mut self) -> Vec<Action> {
        let ready: Vec<Action> = self.rx.try_iter().collect();
        let like_done = ready
            .iter()
            .any(|action| matches!(action, Action::Timeline(TimelineAction::SetLoading(false))));
        if like_done {
            if let Some(id) = self.pending_like.take() {
                tracing::debug!(id, "Like request finished");
            }
        }
        ready
    }

    /// Wait for every pending task, then return everything they produced
    pub fn settle(&mut self) -> Vec<Action> {
        let pending: Vec<JoinHandle<()>> = self
            .like_task
            .take()
            .into_iter()
            .chain(self.text_task.take())
            .collect();

        self.runtime.block_on(async {
            for task in pending {
                // Aborted tasks report a cancellation error, which is expected
                let _ = task.await;
            }
        });
        self.try_drain()
    }
}

impl std::fmt::Debug for EffectRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRunner")
            .field("config", &self.config)
            .field("like_in_flight", &self.like_in_flight())
            .field("queued", &self.rx.len())
            .finish()
    }
}
