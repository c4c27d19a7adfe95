//! Application module
//!
//! UI-local state lives here, next to the store-backed domain state:
//! - Actions: what the user did
//! - State: screen, overlays, panel limits, text draft
//! - Reducer: pure `(AppState, Action) -> AppState`
//! - Keymap: key events to actions
//! - Intents: actions that become store actions

pub mod actions;
pub mod event;
pub mod intents;
pub mod keymap;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, Intent, Screen, TextEdit};
pub use keymap::action_for_key;
pub use reducer::reduce;
pub use state::{AppState, FriendsScreenState, TimelineScreenState, UiConfig};
