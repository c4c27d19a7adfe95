//! Key bindings
//!
//! Verifies that key presses map to the right actions, and that the
//! resulting UI state transitions through the reducer are correct.

use chorus_tui::app::{action_for_key, reduce, Action, AppState, Intent, Screen, TextEdit};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(state: AppState, code: KeyCode) -> AppState {
    match action_for_key(&state, key(code)) {
        Some(action) => reduce(state, action),
        None => state,
    }
}

fn timeline_state() -> AppState {
    reduce(AppState::new(), Action::NavigateTo(Screen::Timeline))
}

#[test]
fn test_q_quits_application() {
    let state = press(AppState::new(), KeyCode::Char('q'));
    assert!(state.should_quit);
}

#[test]
fn test_ctrl_c_quits_even_while_editing() {
    let state = reduce(timeline_state(), Action::StartEditing);

    let action = action_for_key(&state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(action, Some(Action::Quit));
}

#[test]
fn test_f1_toggles_help() {
    let state = press(AppState::new(), KeyCode::F(1));
    assert!(state.help_visible);

    let state = press(state, KeyCode::F(1));
    assert!(!state.help_visible);
}

#[test]
fn test_tab_switches_screens() {
    let state = press(AppState::new(), KeyCode::Tab);
    assert_eq!(state.current_screen, Screen::Timeline);

    let state = press(state, KeyCode::Tab);
    assert_eq!(state.current_screen, Screen::Friends);
}

#[test]
fn test_esc_dismisses_error_before_help() {
    let mut state = AppState::new();
    state.error = Some("duplicate friend id 1".to_string());
    state.help_visible = true;

    let state = press(state, KeyCode::Esc);
    assert!(state.error.is_none());
    assert!(state.help_visible);

    let state = press(state, KeyCode::Esc);
    assert!(!state.help_visible);
}

#[test]
fn test_arrows_focus_panels() {
    let state = press(AppState::new(), KeyCode::Right);
    assert_eq!(state.friends.selected_panel, 1);

    // Already at the last panel
    let state = press(state, KeyCode::Right);
    assert_eq!(state.friends.selected_panel, 1);

    let state = press(state, KeyCode::Left);
    assert_eq!(state.friends.selected_panel, 0);
}

#[test]
fn test_plus_minus_change_focused_age_limit() {
    let state = press(AppState::new(), KeyCode::Char('+'));
    assert_eq!(state.friends.age_limits, [26, 45]);

    let state = press(state, KeyCode::Right);
    let state = press(state, KeyCode::Char('-'));
    assert_eq!(state.friends.age_limits, [26, 44]);
}

#[test]
fn test_friend_keys_produce_intents() {
    let state = AppState::new();

    assert_eq!(
        action_for_key(&state, key(KeyCode::Char('a'))),
        Some(Action::Intent(Intent::AddFriend))
    );
    assert_eq!(
        action_for_key(&state, key(KeyCode::Char(']'))),
        Some(Action::Intent(Intent::ChangeShowLimit(1)))
    );
    assert_eq!(
        action_for_key(&state, key(KeyCode::Char('['))),
        Some(Action::Intent(Intent::ChangeShowLimit(-1)))
    );
}

#[test]
fn test_timeline_keys_produce_intents() {
    let state = timeline_state();

    assert_eq!(
        action_for_key(&state, key(KeyCode::Char('a'))),
        Some(Action::Intent(Intent::AddTimeline))
    );
    assert_eq!(
        action_for_key(&state, key(KeyCode::Char('l'))),
        Some(Action::Intent(Intent::LikeSelected))
    );
    assert_eq!(
        action_for_key(&state, key(KeyCode::Down)),
        Some(Action::MoveSelection(1))
    );
}

#[test]
fn test_editing_captures_printable_keys() {
    let state = press(timeline_state(), KeyCode::Char('i'));
    assert!(state.timeline.editing);

    // 'q' and Tab are text now, not bindings
    assert_eq!(
        action_for_key(&state, key(KeyCode::Char('q'))),
        Some(Action::Intent(Intent::EditText(TextEdit::Insert('q'))))
    );
    assert_eq!(action_for_key(&state, key(KeyCode::Tab)), None);

    let state = press(state, KeyCode::Char('q'));
    let state = press(state, KeyCode::Char('a'));
    let state = press(state, KeyCode::Backspace);
    assert_eq!(state.timeline.draft, "q");
    assert!(!state.should_quit);

    let state = press(state, KeyCode::Esc);
    assert!(!state.timeline.editing);
    assert_eq!(state.timeline.draft, "q");
}

#[test]
fn test_unbound_key_is_ignored() {
    assert_eq!(action_for_key(&AppState::new(), key(KeyCode::Char('z'))), None);
}
