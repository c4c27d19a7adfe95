//! UI rendering
//!
//! Containers read the store into a view model before drawing, so the
//! render functions below take plain data and never fail.

pub mod friend;
pub mod timeline;

use libchorus::{ChorusService, Result, RootState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Screen};
use friend::{FriendContainer, FriendsScreen};
use timeline::{TimelineContainer, TimelineScreen};

/// View model of the current screen
#[derive(Debug, Clone)]
pub enum ScreenView {
    Friends(FriendsScreen),
    Timeline(TimelineScreen),
}

/// Containers for both screens
#[derive(Default)]
pub struct Views {
    pub friends: FriendContainer,
    pub timeline: TimelineContainer,
}

impl Views {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the container of the current screen and unmount the other
    pub fn sync_mounts(&mut self, app: &AppState, service: &ChorusService) {
        match app.current_screen {
            Screen::Timeline => self.timeline.mount(service),
            Screen::Friends => self.timeline.unmount(),
        }
    }

    pub fn build(&mut self, app: &AppState, root: &RootState) -> Result<ScreenView> {
        match app.current_screen {
            Screen::Friends => Ok(ScreenView::Friends(self.friends.build(app, root)?)),
            Screen::Timeline => Ok(ScreenView::Timeline(self.timeline.build(root)?)),
        }
    }
}

pub fn render(frame: &mut Frame, app: &AppState, view: &ScreenView) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Screen tabs
            Constraint::Min(5),    // Screen
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_tabs(frame, chunks[0], app);
    match view {
        ScreenView::Friends(screen) => friend::render(frame, chunks[1], app, screen),
        ScreenView::Timeline(screen) => timeline::render(frame, chunks[1], app, screen),
    }
    render_hints(frame, chunks[2], app);

    if app.help_visible {
        render_help_overlay(frame, area, app);
    }
    if let Some(ref error) = app.error {
        render_error_overlay(frame, area, app, error);
    }
}

/// `style` when colors are enabled, the plain style otherwise
pub(crate) fn themed(app: &AppState, style: Style) -> Style {
    if app.config.colors_enabled {
        style
    } else {
        Style::default()
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &AppState) {
    let spans: Vec<Span> = [Screen::Friends, Screen::Timeline]
        .into_iter()
        .map(|screen| {
            let label = format!(" {} ", screen.title());
            if screen == app.current_screen {
                Span::styled(
                    label,
                    themed(app, Style::default().fg(Color::Black).bg(Color::Cyan))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(label)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(frame: &mut Frame, area: Rect, app: &AppState) {
    let hints = match app.current_screen {
        Screen::Friends => "a: add | ←/→: panel | +/-: age | [/]: show | Tab: timeline | F1: help | q: quit",
        Screen::Timeline if app.timeline.editing => "typing | Enter/Esc: done",
        Screen::Timeline => "a: add | ↑/↓: select | l: like | i: edit | Tab: friends | F1: help | q: quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, themed(app, Style::default().fg(Color::Gray)))),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect, _app: &AppState) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q        - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Tab      - Switch screen"),
        Line::from("  Esc      - Dismiss overlays"),
        Line::from(""),
        Line::from("Friends:"),
        Line::from("  a        - Add a friend"),
        Line::from("  ←/→      - Focus panel"),
        Line::from("  +/-      - Panel age limit"),
        Line::from("  [/]      - Show limit"),
        Line::from(""),
        Line::from("Timeline:"),
        Line::from("  a        - Add an entry"),
        Line::from("  ↑/↓      - Select entry"),
        Line::from("  l        - Like selected entry"),
        Line::from("  i        - Edit text"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, _app: &AppState, error: &str) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
