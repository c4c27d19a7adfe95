//! Service facade for front-ends
//!
//! `ChorusService` owns the store and the effect runner and wires them the
//! same way for every front-end (TUI, replay CLI):
//!
//! 1. the store reduces the action (rejected actions stop here)
//! 2. the effect runner sees the accepted action
//! 3. its immediate follow-ups are dispatched in order
//!
//! Delayed follow-ups are picked up by [`ChorusService::pump`] or
//! [`ChorusService::settle`].
//!
//! # Example
//!
//! ```no_run
//! use libchorus::{ChorusService, Config};
//! use libchorus::timeline::TimelineAction;
//!
//! # fn example() -> libchorus::Result<()> {
//! let mut service = ChorusService::new(Config::default())?;
//! service.dispatch(TimelineAction::TrySetText("hi".to_string()).into())?;
//! service.settle()?;
//! assert_eq!(service.state().timeline()?.text, "hi");
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::effects::EffectRunner;
use crate::error::Result;
use crate::redux::{Store, Subscription};
use crate::state::{root_reducer, Action, RootState};

pub struct ChorusService {
    store: Store<RootState, Action>,
    effects: Option<EffectRunner>,
    config: Config,
}

impl ChorusService {
    /// Create a service with effects enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized or the effect
    /// runtime cannot be started.
    pub fn new(config: Config) -> Result<Self> {
        let effects = EffectRunner::new(config.timeline.clone())?;
        Self::build(config, Some(effects))
    }

    /// Create a service where intents are reduced but trigger nothing
    pub fn without_effects(config: Config) -> Result<Self> {
        Self::build(config, None)
    }

    fn build(config: Config, effects: Option<EffectRunner>) -> Result<Self> {
        let store = Store::new(root_reducer(), &Action::init())?;
        Ok(Self {
            store,
            effects,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &RootState {
        self.store.state()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&RootState) + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Dispatch an action and its immediate follow-ups
    ///
    /// # Errors
    ///
    /// Returns the first rejection. Follow-ups after a rejected one are not
    /// dispatched.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        self.store.dispatch(action.clone())?;

        let follow_ups = match self.effects.as_mut() {
            Some(effects) => effects.handle(&action),
            None => Vec::new(),
        };
        for follow_up in follow_ups {
            self.store.dispatch(follow_up)?;
        }
        Ok(())
    }

    /// Dispatch delayed follow-ups that are ready; returns how many ran
    pub fn pump(&mut self) -> Result<usize> {
        let ready = match self.effects.as_mut() {
            Some(effects) => effects.try_drain(),
            None => return Ok(0),
        };
        let count = ready.len();
        for action in ready {
            self.dispatch(action)?;
        }
        Ok(count)
    }

    /// Wait for pending effects and dispatch everything they produced
    pub fn settle(&mut self) -> Result<()> {
        let delayed = match self.effects.as_mut() {
            Some(effects) => effects.settle(),
            None => return Ok(()),
        };
        for action in delayed {
            self.dispatch(action)?;
        }
        Ok(())
    }

    pub fn effects_idle(&self) -> bool {
        self.effects.as_ref().map_or(true, EffectRunner::is_idle)
    }
}

impl std::fmt::Debug for ChorusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChorusService")
            .field("store", &self.store)
            .field("effects", &self.effects)
            .finish()
    }
}
