//! Journal Screen
//!
//! The selected user's day: macro totals against their targets across the
//! top, the entry list below.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use journal_core::friendly_date;

use crate::app::App;
use crate::theme;

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.core.selected_user() else {
        // Between registration/selection and the journal arriving there is
        // no user yet; the status line already says what's happening.
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .split(area);

    // Header: who and what day
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", user.display_name),
            Style::default().fg(theme::FJ_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", friendly_date(&user.current_date)),
            Style::default().fg(theme::DIM_GRAY),
        ),
    ]));
    frame.render_widget(header, chunks[0]);

    // Macro bar: totals against targets
    let totals = app.core.totals();
    let macros = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} / {} kcal", totals.calories, user.target_calories),
            Style::default().fg(theme::CALORIE_AMBER),
        ),
        Span::styled(
            format!("  carbs {}/{}g", totals.carbohydrate, user.target_carbohydrate),
            Style::default().fg(theme::FJ_GREEN),
        ),
        Span::styled(
            format!("  fat {}/{}g", totals.fat, user.target_fat),
            Style::default().fg(theme::FIELD_FOCUS),
        ),
        Span::styled(
            format!("  protein {}/{}g", totals.protein, user.target_protein),
            Style::default().fg(theme::PROTEIN_BLUE),
        ),
    ]));
    frame.render_widget(macros, chunks[1]);

    if app.core.entries().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " Nothing logged yet - press a to add an entry.",
            Style::default().fg(theme::DIM_GRAY),
        )));
        frame.render_widget(empty, chunks[2]);
        return;
    }

    let items: Vec<ListItem> = app
        .core
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}", entry.text)),
                Span::styled(
                    format!("  {} {}", entry.qty, entry.qty_units),
                    Style::default().fg(theme::DIM_GRAY),
                ),
                Span::styled(
                    format!("  {} kcal", entry.calories),
                    Style::default().fg(theme::CALORIE_AMBER),
                ),
                Span::styled(
                    format!(
                        "  c{} f{} p{}",
                        entry.carbohydrate, entry.fat, entry.protein
                    ),
                    Style::default().fg(theme::DIM_GRAY),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), chunks[2]);
}
