//! Pure reducer for UI state
//!
//! `(AppState, Action) -> AppState` with no I/O. Key events are mapped to
//! actions by `keymap.rs` before they get here, and store actions are
//! derived from intents afterwards by `intents.rs`.

use super::actions::{Action, Intent, TextEdit};
use super::state::{AppState, FriendsScreenState, TimelineScreenState};

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(_) | Action::Tick | Action::Resize(_, _) => state,

        // === Navigation ===
        Action::NavigateTo(screen) => AppState {
            current_screen: screen,
            timeline: TimelineScreenState {
                editing: false,
                ..state.timeline
            },
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState { error: None, ..state },

        // === Friends screen ===
        Action::SelectPanel(panel) => {
            if panel >= state.friends.age_limits.len() {
                return state;
            }
            AppState {
                friends: FriendsScreenState {
                    selected_panel: panel,
                    ..state.friends
                },
                ..state
            }
        }

        Action::ChangeAgeLimit(step) => {
            let panel = state.friends.selected_panel;
            let mut age_limits = state.friends.age_limits;
            age_limits[panel] = age_limits[panel]
                .saturating_add_signed(step)
                .min(state.friends.max_age_limit);
            AppState {
                friends: FriendsScreenState {
                    age_limits,
                    ..state.friends
                },
                ..state
            }
        }

        // === Timeline screen ===
        Action::MoveSelection(step) => {
            let selected = clamp_selection(
                state.timeline.selected.saturating_add_signed(step),
                state.timeline.entries,
            );
            AppState {
                timeline: TimelineScreenState {
                    selected,
                    ..state.timeline
                },
                ..state
            }
        }

        Action::SyncTimeline { entries } => AppState {
            timeline: TimelineScreenState {
                entries,
                selected: clamp_selection(state.timeline.selected, entries),
                ..state.timeline
            },
            ..state
        },

        Action::StartEditing => AppState {
            timeline: TimelineScreenState {
                editing: true,
                ..state.timeline
            },
            ..state
        },

        Action::StopEditing => AppState {
            timeline: TimelineScreenState {
                editing: false,
                ..state.timeline
            },
            ..state
        },

        // Only text edits touch UI state; the rest is for the store
        Action::Intent(Intent::EditText(edit)) => {
            let mut draft = state.timeline.draft;
            match edit {
                TextEdit::Insert(c) => draft.push(c),
                TextEdit::Backspace => {
                    draft.pop();
                }
            }
            AppState {
                timeline: TimelineScreenState {
                    draft,
                    ..state.timeline
                },
                ..state
            }
        }

        Action::Intent(_) => state,
    }
}

fn clamp_selection(selected: usize, entries: usize) -> usize {
    selected.min(entries.saturating_sub(1))
}
