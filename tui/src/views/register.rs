//! Registration Form
//!
//! Renders the signup sub-model: one row per field, the focused one
//! highlighted, problems inline underneath. Variant fields render as
//! `< value >` steppers; the submit row grays out until the validity
//! predicate holds.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use journal_core::PLACEHOLDER_IMAGE;

use crate::app::{App, RegField};
use crate::theme;

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.core.registration();

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(RegField::ALL.len() as u16),
        Constraint::Min(1),
    ])
    .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " New journal",
        Style::default().fg(theme::FJ_GREEN).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    let mut rows: Vec<Line> = Vec::with_capacity(RegField::ALL.len());
    for (i, field) in RegField::ALL.iter().enumerate() {
        let focused = i == app.reg_cursor;

        let value = match field {
            RegField::UserName => field_text(&form.user_name, focused),
            RegField::DisplayName => field_text(&form.display_name, focused),
            RegField::ImagePath => image_value(app, focused),
            RegField::Gender => stepper(form.gender.label()),
            RegField::Age => stepper(&form.age.to_string()),
            RegField::Height => stepper(&form.height.to_string()),
            RegField::Weight => stepper(&form.weight.to_string()),
            RegField::Goal => stepper(form.goal.label()),
            RegField::Factor => stepper(form.factor.label()),
            RegField::Submit => {
                if form.is_valid() {
                    "[ Register ]".to_string()
                } else {
                    "[ Register ] (fill in the form first)".to_string()
                }
            }
        };

        let style = row_style(*field, focused, form.is_valid());
        rows.push(Line::from(vec![
            Span::styled(format!(" {:<14}", field.label()), label_style(focused)),
            Span::styled(value, style),
        ]));
    }
    frame.render_widget(Paragraph::new(rows), chunks[1]);

    // Problems, newest last, under the form; long descriptions wrap
    let wrap_width = (chunks[2].width as usize).saturating_sub(3).max(10);
    let mut problems: Vec<Line> = Vec::new();
    for problem in &form.problems {
        let description = problem.description();
        for (i, piece) in textwrap::wrap(&description, wrap_width).iter().enumerate() {
            let prefix = if i == 0 { " ! " } else { "   " };
            problems.push(Line::from(Span::styled(
                format!("{prefix}{piece}"),
                Style::default().fg(theme::ERROR_RED),
            )));
        }
    }
    frame.render_widget(Paragraph::new(problems), chunks[2]);
}

fn field_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{value}_")
    } else {
        value.to_string()
    }
}

/// The image row shows the typed path plus whether a real image is attached.
fn image_value(app: &App, focused: bool) -> String {
    let form = app.core.registration();
    let attached = if form.image == PLACEHOLDER_IMAGE {
        "(placeholder)".to_string()
    } else {
        format!("(attached, {} bytes)", form.image.len())
    };
    format!("{} {attached}", field_text(&app.image_path, focused))
}

fn stepper(value: &str) -> String {
    format!("< {value} >")
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme::FIELD_FOCUS)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::DIM_GRAY)
    }
}

fn row_style(field: RegField, focused: bool, form_valid: bool) -> Style {
    if field == RegField::Submit && !form_valid {
        return Style::default().fg(theme::DIM_GRAY);
    }
    if focused {
        Style::default().fg(theme::FIELD_FOCUS)
    } else {
        Style::default()
    }
}
