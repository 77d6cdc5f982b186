//! User Picker
//!
//! One row per registered user: a round avatar marker plus the display name.
//! Clicking through is all the select screen does; registration hangs off a
//! key hint.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " Who's journaling today?",
        Style::default().fg(theme::FJ_GREEN).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    if app.core.users().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No users yet - press r to register the first one.",
            Style::default().fg(theme::DIM_GRAY),
        )));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .core
        .users()
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let focused = i == app.user_cursor;
            let marker = if focused { ">" } else { " " };
            let style = if focused {
                Style::default()
                    .fg(theme::FJ_GREEN)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled("(o) ", Style::default().fg(theme::CALORIE_AMBER)),
                Span::styled(user.display_name.clone(), style),
                Span::styled(
                    format!("  ({})", user.user_name),
                    Style::default().fg(theme::DIM_GRAY),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}
