//! Key bindings
//!
//! Global: `q` quit, `F1` help, `Tab` switch screen, `Esc` dismiss overlay
//! or leave editing.
//! Friends: `a` add, `←/→` focus panel, `+/-` age limit, `[`/`]` show limit.
//! Timeline: `a` add, `↑/↓` select, `l` like, `i` edit text.
//!
//! While the text input has focus every printable key is text, so only
//! `F1`, `Esc`, `Enter` and `Ctrl+C` keep a binding.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::{Action, Intent, Screen, TextEdit};
use super::state::AppState;

/// Map a key press to an action, `None` if the key is unbound here
pub fn action_for_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),
        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }
        (KeyCode::Esc, _) if state.error.is_some() => return Some(Action::DismissError),
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),
        _ => {}
    }

    if state.has_overlay() {
        return None;
    }

    if state.current_screen == Screen::Timeline && state.timeline.editing {
        return editing_key(key);
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Tab => return Some(Action::NavigateTo(state.current_screen.next())),
        _ => {}
    }

    match state.current_screen {
        Screen::Friends => friends_key(state, key),
        Screen::Timeline => timeline_key(key),
    }
}

fn friends_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let last_panel = state.friends.age_limits.len() - 1;
    match key.code {
        KeyCode::Char('a') => Some(Intent::AddFriend.into()),
        KeyCode::Left => Some(Action::SelectPanel(
            state.friends.selected_panel.saturating_sub(1),
        )),
        KeyCode::Right => Some(Action::SelectPanel(
            (state.friends.selected_panel + 1).min(last_panel),
        )),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::ChangeAgeLimit(1)),
        KeyCode::Char('-') => Some(Action::ChangeAgeLimit(-1)),
        KeyCode::Char(']') => Some(Intent::ChangeShowLimit(1).into()),
        KeyCode::Char('[') => Some(Intent::ChangeShowLimit(-1).into()),
        _ => None,
    }
}

fn timeline_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('a') => Some(Intent::AddTimeline.into()),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::Char('l') => Some(Intent::LikeSelected.into()),
        KeyCode::Char('i') => Some(Action::StartEditing),
        _ => None,
    }
}

fn editing_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::StopEditing),
        KeyCode::Backspace => Some(Intent::EditText(TextEdit::Backspace).into()),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Intent::EditText(TextEdit::Insert(c)).into())
        }
        _ => None,
    }
}
