//! Application state
//!
//! UI-local state only. Friends, timelines and the committed text live in
//! the store; this holds what the containers keep for themselves.

use libchorus::Config;

use super::actions::Screen;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub should_quit: bool,
    pub current_screen: Screen,
    pub help_visible: bool,
    /// Error overlay, e.g. a rejected dispatch
    pub error: Option<String>,
    pub friends: FriendsScreenState,
    pub timeline: TimelineScreenState,
    pub config: UiConfig,
}

/// Per-panel age limits of the friends screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendsScreenState {
    /// Index of the focused panel (0 or 1)
    pub selected_panel: usize,
    pub age_limits: [u32; 2],
    pub max_age_limit: u32,
    pub max_show_limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineScreenState {
    /// Cursor into the timeline list
    pub selected: usize,
    /// Number of entries the store holds, mirrored for cursor clamping
    pub entries: usize,
    /// Text input has focus
    pub editing: bool,
    /// What has been typed, committed to the store after the debounce
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub tick_rate_ms: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let max_age_limit = config.friend.max_age_limit;
        Self {
            should_quit: false,
            current_screen: Screen::Friends,
            help_visible: false,
            error: None,
            friends: FriendsScreenState {
                selected_panel: 0,
                age_limits: config.friend.age_limits.map(|limit| limit.min(max_age_limit)),
                max_age_limit,
                max_show_limit: config.friend.max_show_limit,
            },
            timeline: TimelineScreenState::default(),
            config: UiConfig {
                colors_enabled: config.ui.colors_enabled,
                tick_rate_ms: config.ui.tick_rate_ms,
            },
        }
    }

    /// Any overlay on top of the screen
    pub fn has_overlay(&self) -> bool {
        self.help_visible || self.error.is_some()
    }

    pub fn selected_age_limit(&self) -> u32 {
        self.friends.age_limits[self.friends.selected_panel]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
