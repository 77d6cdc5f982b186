//! Entry Composer
//!
//! The new-entry form: description, quantity with units, and the macro
//! numbers, edited with the same field-cursor pattern as registration.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, ComposeField};
use crate::theme;

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.core.compose();

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(ComposeField::ALL.len() as u16),
        Constraint::Min(0),
    ])
    .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " Add entry",
        Style::default().fg(theme::FJ_GREEN).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    let mut rows: Vec<Line> = Vec::with_capacity(ComposeField::ALL.len());
    for (i, field) in ComposeField::ALL.iter().enumerate() {
        let focused = i == app.compose_cursor;

        let value = match field {
            ComposeField::Text => {
                if focused {
                    format!("{}_", form.text)
                } else {
                    form.text.clone()
                }
            }
            ComposeField::Qty => format!("< {} >", form.qty),
            ComposeField::Units => format!("< {} >", form.qty_units),
            ComposeField::Calories => format!("< {} >", form.calories),
            ComposeField::Carbohydrate => format!("< {} >", form.carbohydrate),
            ComposeField::Fat => format!("< {} >", form.fat),
            ComposeField::Protein => format!("< {} >", form.protein),
            ComposeField::Save => {
                if form.is_valid() {
                    "[ Save ]".to_string()
                } else {
                    "[ Save ] (describe the food first)".to_string()
                }
            }
        };

        let style = if *field == ComposeField::Save && !form.is_valid() {
            Style::default().fg(theme::DIM_GRAY)
        } else if focused {
            Style::default().fg(theme::FIELD_FOCUS)
        } else {
            Style::default()
        };

        let label_style = if focused {
            Style::default()
                .fg(theme::FIELD_FOCUS)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM_GRAY)
        };

        rows.push(Line::from(vec![
            Span::styled(format!(" {:<12}", field.label()), label_style),
            Span::styled(value, style),
        ]));
    }
    frame.render_widget(Paragraph::new(rows), chunks[1]);
}
