//! UI actions
//!
//! Everything that changes `AppState` is an `Action`. `Intent` actions also
//! reach the store, see `intents.rs`.

use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // === UI Events ===
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),

    // === Navigation ===
    NavigateTo(Screen),
    Quit,
    ShowHelp,
    HideHelp,

    // === Error Handling ===
    ShowError(String),
    DismissError,

    // === Friends screen ===
    /// Focus one of the two friend panels
    SelectPanel(usize),
    /// Move the focused panel's age limit by a step
    ChangeAgeLimit(i32),

    // === Timeline screen ===
    /// Move the timeline cursor by a step
    MoveSelection(isize),
    /// The store's timeline length changed
    SyncTimeline { entries: usize },
    StartEditing,
    StopEditing,

    /// Request for the store
    Intent(Intent),
}

/// User requests that end up as store actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddFriend,
    /// Move the show limit by a step
    ChangeShowLimit(i32),
    AddTimeline,
    LikeSelected,
    EditText(TextEdit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
}

/// Screen identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Friends,
    Timeline,
}

impl Screen {
    /// The screen `Tab` switches to
    pub fn next(self) -> Self {
        match self {
            Screen::Friends => Screen::Timeline,
            Screen::Timeline => Screen::Friends,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Friends => "Friends",
            Screen::Timeline => "Timeline",
        }
    }
}

impl From<Intent> for Action {
    fn from(intent: Intent) -> Self {
        Action::Intent(intent)
    }
}
