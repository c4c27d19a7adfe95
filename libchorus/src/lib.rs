//! Chorus - a Redux-style state container with two demo features
//!
//! This library provides the reusable pieces (reducer composition, memoized
//! selectors, a store with scoped subscriptions) and the friend list and
//! timeline features built on them.

pub mod config;
pub mod effects;
pub mod error;
pub mod friend;
pub mod logging;
pub mod mock;
pub mod redux;
pub mod service;
pub mod state;
pub mod timeline;

// Re-export commonly used types
pub use config::Config;
pub use error::{ChorusError, Result};
pub use service::ChorusService;
pub use state::{root_reducer, Action, RootState};
