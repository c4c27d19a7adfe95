//! Timeline screen
//!
//! The container subscribes to the store while the screen is shown and
//! drops the subscription when the user navigates away.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use libchorus::redux::Subscription;
use libchorus::timeline::{get_timelines, TimelineEntry};
use libchorus::{ChorusService, Result, RootState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::themed;
use crate::app::AppState;

#[derive(Debug, Clone)]
pub struct TimelineScreen {
    pub timelines: Arc<Vec<TimelineEntry>>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub text: String,
    /// Store notifications seen while mounted
    pub updates: u64,
}

pub struct TimelineContainer {
    subscription: Option<Subscription>,
    updates: Rc<Cell<u64>>,
}

impl TimelineContainer {
    pub fn new() -> Self {
        Self {
            subscription: None,
            updates: Rc::new(Cell::new(0)),
        }
    }

    /// Subscribe to the store; no-op when already mounted
    pub fn mount(&mut self, service: &ChorusService) {
        if self.subscription.is_some() {
            return;
        }
        let updates = Rc::clone(&self.updates);
        self.subscription = Some(service.subscribe(move |_| updates.set(updates.get() + 1)));
        tracing::debug!("Timeline container mounted");
    }

    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!("Timeline container unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn updates(&self) -> u64 {
        self.updates.get()
    }

    pub fn build(&self, root: &RootState) -> Result<TimelineScreen> {
        let branch = root.timeline()?;
        Ok(TimelineScreen {
            timelines: get_timelines(root)?,
            is_loading: branch.is_loading,
            error: branch.error.clone(),
            text: branch.text.clone(),
            updates: self.updates(),
        })
    }
}

impl Default for TimelineContainer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &AppState, screen: &TimelineScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Entries
            Constraint::Length(3), // Status
            Constraint::Length(3), // Text input
        ])
        .split(area);

    render_entries(frame, chunks[0], app, screen);
    render_status(frame, chunks[1], app, screen);
    render_input(frame, chunks[2], app, screen);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &AppState, screen: &TimelineScreen) {
    let items: Vec<ListItem> = screen
        .timelines
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let marker = if index == app.timeline.selected { "> " } else { "  " };
            let style = if index == app.timeline.selected {
                themed(app, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:<14}", marker, entry.desc), style),
                Span::raw(format!("likes: {}", entry.like_count)),
            ]))
        })
        .collect();

    let title = format!(" Timeline | {} updates ", screen.updates);
    frame.render_widget(
        List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &AppState, screen: &TimelineScreen) {
    let mut spans = Vec::new();
    if screen.is_loading {
        spans.push(Span::styled(
            "Sending... ",
            themed(app, Style::default().fg(Color::Yellow)),
        ));
    }
    if let Some(ref error) = screen.error {
        spans.push(Span::styled(
            format!("Error: {} ", error),
            themed(app, Style::default().fg(Color::Red)),
        ));
    }
    if !screen.text.is_empty() {
        spans.push(Span::raw(format!("Text: {}", screen.text)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, app: &AppState, _screen: &TimelineScreen) {
    let (title, border) = if app.timeline.editing {
        (
            " Text (Enter/Esc to finish) ",
            themed(app, Style::default().fg(Color::Green)),
        )
    } else {
        (" Text (i to edit) ", Style::default())
    };

    frame.render_widget(
        Paragraph::new(app.timeline.draft.as_str()).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        ),
        area,
    );
}
