//! Friends screen
//!
//! Two panels over the same friend list, each with its own age limit and
//! its own memoized selector, so changing one panel never recomputes the
//! other.

use std::sync::Arc;

use libchorus::friend::{make_get_friends_with_age_show_limit, Friend, FriendProps, FriendsView};
use libchorus::{Result, RootState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::themed;
use crate::app::AppState;

/// What one panel shows
#[derive(Debug, Clone)]
pub struct FriendPanel {
    pub age_limit: u32,
    pub friends: Arc<Vec<Friend>>,
}

#[derive(Debug, Clone)]
pub struct FriendsScreen {
    pub panels: Vec<FriendPanel>,
    pub show_limit: usize,
    pub total: usize,
}

/// Owns one selector per panel
pub struct FriendContainer {
    views: [FriendsView<usize>; 2],
}

impl FriendContainer {
    pub fn new() -> Self {
        Self {
            views: [
                make_get_friends_with_age_show_limit(),
                make_get_friends_with_age_show_limit(),
            ],
        }
    }

    pub fn build(&mut self, app: &AppState, root: &RootState) -> Result<FriendsScreen> {
        let branch = root.friend()?;
        let panels = self
            .views
            .iter_mut()
            .zip(app.friends.age_limits)
            .map(|(view, age_limit)| -> Result<FriendPanel> {
                Ok(FriendPanel {
                    age_limit,
                    friends: view.select(root, &FriendProps { age_limit })?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FriendsScreen {
            panels,
            show_limit: branch.show_limit,
            total: branch.friends.len(),
        })
    }

    /// Recomputations per panel
    pub fn recomputations(&self) -> [usize; 2] {
        [self.views[0].recomputations(), self.views[1].recomputations()]
    }
}

impl Default for FriendContainer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &AppState, screen: &FriendsScreen) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (index, (panel, column)) in screen.panels.iter().zip(columns.iter()).enumerate() {
        let focused = index == app.friends.selected_panel;
        render_panel(frame, *column, app, screen, panel, focused);
    }
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    app: &AppState,
    screen: &FriendsScreen,
    panel: &FriendPanel,
    focused: bool,
) {
    let border = if focused {
        themed(app, Style::default().fg(Color::Cyan))
    } else {
        Style::default()
    };
    let title = format!(
        " Age <= {} | {} of {} | show {} ",
        panel.age_limit,
        panel.friends.len(),
        screen.total,
        screen.show_limit
    );

    let items: Vec<ListItem> = panel
        .friends
        .iter()
        .map(|friend| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", friend.name),
                    themed(app, Style::default().add_modifier(Modifier::BOLD)),
                ),
                Span::raw(format!("{} years", friend.age)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(list, area);
}
