//! Views
//!
//! Pure projections of core state into ratatui widgets. Nothing in this
//! module mutates the core or talks to the network; the only inputs are the
//! app (for core state and cursors) and the frame.

mod compose;
mod journal;
mod register;
mod select_user;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use journal_core::{CommState, Screen};

use crate::app::App;
use crate::theme;

/// Render the whole UI: the active screen plus the status line.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());

    match app.core.screen() {
        Screen::SelectUser => select_user::render(frame, chunks[0], app),
        Screen::Register => register::render(frame, chunks[0], app),
        Screen::Journal => journal::render(frame, chunks[0], app),
        Screen::Compose => compose::render(frame, chunks[0], app),
    }

    status_line(frame, chunks[1], app);
}

/// One-line status bar: communication state on the left, key hints on the
/// right.
fn status_line(frame: &mut Frame, area: Rect, app: &App) {
    let comm = app.core.comm();
    let comm_style = match comm {
        CommState::Idle => Style::default().fg(theme::DIM_GRAY),
        CommState::Working(_) => Style::default().fg(theme::WORKING_CYAN),
        CommState::Error(_) => Style::default().fg(theme::ERROR_RED),
    };

    let hints = match app.core.screen() {
        Screen::SelectUser => "Enter pick | r register | F5 refresh | Esc quit",
        Screen::Register => "Up/Down field | Left/Right adjust | Enter apply | Esc back",
        Screen::Journal => "a add entry | e end day | F5 refresh | Esc quit",
        Screen::Compose => "Up/Down field | Left/Right adjust | Enter save | Esc back",
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", comm.description()), comm_style),
        Span::styled(
            format!("| {hints}"),
            Style::default().fg(theme::DIM_GRAY),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
