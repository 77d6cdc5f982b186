//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - Embedded `JournalApp` core for all state and API communication
//! - Per-screen cursor state for the forms and the user picker
//!
//! The TUI contains no business logic: key presses become `AppEvent`s, the
//! core is polled for finished work each frame, and the views render whatever
//! the core says.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use journal_core::{
    ActivityFactor, AppConfig, AppEvent, ComposeEvent, Gender, Goal, HttpBackend, JournalApp,
    RegistrationEvent, Screen,
};

use crate::views;

/// Stepper bounds for the registration form
pub(crate) const AGE_RANGE: (u64, u64) = (10, 120);
pub(crate) const HEIGHT_RANGE: (u64, u64) = (100, 250);
pub(crate) const WEIGHT_RANGE: (u64, u64) = (30, 300);

/// Fields on the registration form, in cursor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RegField {
    UserName,
    DisplayName,
    ImagePath,
    Gender,
    Age,
    Height,
    Weight,
    Goal,
    Factor,
    Submit,
}

impl RegField {
    pub(crate) const ALL: [RegField; 10] = [
        RegField::UserName,
        RegField::DisplayName,
        RegField::ImagePath,
        RegField::Gender,
        RegField::Age,
        RegField::Height,
        RegField::Weight,
        RegField::Goal,
        RegField::Factor,
        RegField::Submit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::UserName => "User name",
            Self::DisplayName => "Display name",
            Self::ImagePath => "Image file",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Height => "Height (cm)",
            Self::Weight => "Weight (kg)",
            Self::Goal => "Goal",
            Self::Factor => "Activity",
            Self::Submit => "Register",
        }
    }
}

/// Fields on the composer form, in cursor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComposeField {
    Text,
    Qty,
    Units,
    Calories,
    Carbohydrate,
    Fat,
    Protein,
    Save,
}

impl ComposeField {
    pub(crate) const ALL: [ComposeField; 8] = [
        ComposeField::Text,
        ComposeField::Qty,
        ComposeField::Units,
        ComposeField::Calories,
        ComposeField::Carbohydrate,
        ComposeField::Fat,
        ComposeField::Protein,
        ComposeField::Save,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Text => "Food",
            Self::Qty => "Quantity",
            Self::Units => "Units",
            Self::Calories => "Calories",
            Self::Carbohydrate => "Carbs (g)",
            Self::Fat => "Fat (g)",
            Self::Protein => "Protein (g)",
            Self::Save => "Save entry",
        }
    }
}

/// Main application state
pub struct App {
    /// The embedded headless core
    pub(crate) core: JournalApp<HttpBackend>,
    /// Is the app still running?
    running: bool,
    /// Cursor into the user picker
    pub(crate) user_cursor: usize,
    /// Cursor into [`RegField::ALL`]
    pub(crate) reg_cursor: usize,
    /// Cursor into [`ComposeField::ALL`]
    pub(crate) compose_cursor: usize,
    /// Local buffer for the image file path (the core only sees the final
    /// attach request)
    pub(crate) image_path: String,
}

impl App {
    /// Create a new App with the backend and config from the environment.
    pub fn new() -> Self {
        let backend = HttpBackend::from_env();
        let config = AppConfig::from_env();
        Self {
            core: JournalApp::new(backend, config),
            running: true,
            user_cursor: 0,
            reg_cursor: 0,
            compose_cursor: 0,
            image_path: String::new(),
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~10 FPS is plenty for a forms UI
        let frame_duration = Duration::from_millis(100);
        let mut event_stream = EventStream::new();

        // Kick off the initial user-list load
        self.core.start();

        // Render immediately so the user sees the UI before the first
        // response arrives
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Resize(..) => {
                                // Next draw picks up the new size
                            }
                            _ => {}
                        }
                    }
                }

                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Fold finished API work into the model
            self.core.poll_completions();

            // Keep the picker cursor inside the (possibly reloaded) list
            self.user_cursor = self
                .user_cursor
                .min(self.core.users().len().saturating_sub(1));

            self.render(terminal)?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Whether the app wants to keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The embedded core, for rendering and tests
    pub fn core(&self) -> &JournalApp<HttpBackend> {
        &self.core
    }

    /// Mutable access to the embedded core. The core enforces its own
    /// invariants; all mutation still goes through its event interface.
    pub fn core_mut(&mut self) -> &mut JournalApp<HttpBackend> {
        &mut self.core
    }

    // === Key handling ===

    fn handle_key(&mut self, key: event::KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.core.screen() {
            Screen::SelectUser => self.handle_select_key(key),
            Screen::Register => self.handle_register_key(key),
            Screen::Journal => self.handle_journal_key(key),
            Screen::Compose => self.handle_compose_key(key),
        }
    }

    fn handle_select_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Up => self.user_cursor = self.user_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.user_cursor + 1 < self.core.users().len() {
                    self.user_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(user) = self.core.users().get(self.user_cursor) {
                    self.core.handle_event(AppEvent::SelectUser(user.clone()));
                }
            }
            KeyCode::Char('r') => self.core.handle_event(AppEvent::OpenRegistration),
            KeyCode::F(5) => self.core.handle_event(AppEvent::Refresh),
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: event::KeyEvent) {
        let field = RegField::ALL[self.reg_cursor];

        match key.code {
            KeyCode::Esc => self.core.handle_event(AppEvent::CancelRegistration),

            KeyCode::Up => self.reg_cursor = self.reg_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.reg_cursor = (self.reg_cursor + 1).min(RegField::ALL.len() - 1);
            }

            KeyCode::Left => self.step_register_field(field, -1),
            KeyCode::Right => self.step_register_field(field, 1),

            KeyCode::Char(c) => self.type_register_char(field, c),
            KeyCode::Backspace => self.erase_register_char(field),

            KeyCode::Enter => match field {
                RegField::ImagePath => {
                    let path = self.image_path.trim();
                    if !path.is_empty() {
                        self.core
                            .handle_event(AppEvent::Registration(RegistrationEvent::AttachImage(
                                PathBuf::from(path),
                            )));
                    }
                }
                RegField::Submit => self
                    .core
                    .handle_event(AppEvent::Registration(RegistrationEvent::Submit)),
                _ => {
                    // Enter advances to the next field
                    self.reg_cursor = (self.reg_cursor + 1).min(RegField::ALL.len() - 1);
                }
            },

            _ => {}
        }
    }

    /// Left/Right on a registration field: cycle variants, step numbers.
    fn step_register_field(&mut self, field: RegField, delta: i64) {
        let form = self.core.registration();
        let event = match field {
            RegField::Gender => Some(RegistrationEvent::SetGender(cycle(
                &Gender::ALL,
                form.gender,
                delta,
            ))),
            RegField::Goal => Some(RegistrationEvent::SetGoal(cycle(
                &Goal::ALL,
                form.goal,
                delta,
            ))),
            RegField::Factor => Some(RegistrationEvent::SetFactor(cycle(
                &ActivityFactor::ALL,
                form.factor,
                delta,
            ))),
            RegField::Age => Some(RegistrationEvent::SetAge(step(form.age, delta, AGE_RANGE))),
            RegField::Height => Some(RegistrationEvent::SetHeight(step(
                form.height,
                delta,
                HEIGHT_RANGE,
            ))),
            RegField::Weight => Some(RegistrationEvent::SetWeight(step(
                form.weight,
                delta,
                WEIGHT_RANGE,
            ))),
            _ => None,
        };
        if let Some(event) = event {
            self.core.handle_event(AppEvent::Registration(event));
        }
    }

    fn type_register_char(&mut self, field: RegField, c: char) {
        match field {
            RegField::UserName => {
                let mut value = self.core.registration().user_name.clone();
                value.push(c);
                self.core
                    .handle_event(AppEvent::Registration(RegistrationEvent::SetUserName(value)));
            }
            RegField::DisplayName => {
                let mut value = self.core.registration().display_name.clone();
                value.push(c);
                self.core
                    .handle_event(AppEvent::Registration(RegistrationEvent::SetDisplayName(
                        value,
                    )));
            }
            RegField::ImagePath => self.image_path.push(c),
            _ => {}
        }
    }

    fn erase_register_char(&mut self, field: RegField) {
        match field {
            RegField::UserName => {
                let mut value = self.core.registration().user_name.clone();
                value.pop();
                self.core
                    .handle_event(AppEvent::Registration(RegistrationEvent::SetUserName(value)));
            }
            RegField::DisplayName => {
                let mut value = self.core.registration().display_name.clone();
                value.pop();
                self.core
                    .handle_event(AppEvent::Registration(RegistrationEvent::SetDisplayName(
                        value,
                    )));
            }
            RegField::ImagePath => {
                self.image_path.pop();
            }
            _ => {}
        }
    }

    fn handle_journal_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('a') => self.core.handle_event(AppEvent::OpenComposer),
            KeyCode::Char('e') => self.core.handle_event(AppEvent::EndDay),
            KeyCode::F(5) => self.core.handle_event(AppEvent::Refresh),
            _ => {}
        }
    }

    fn handle_compose_key(&mut self, key: event::KeyEvent) {
        let field = ComposeField::ALL[self.compose_cursor];

        match key.code {
            KeyCode::Esc => self.core.handle_event(AppEvent::CloseComposer),

            KeyCode::Up => self.compose_cursor = self.compose_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.compose_cursor = (self.compose_cursor + 1).min(ComposeField::ALL.len() - 1);
            }

            KeyCode::Left => self.step_compose_field(field, -1),
            KeyCode::Right => self.step_compose_field(field, 1),

            KeyCode::Char(c) => {
                if field == ComposeField::Text {
                    let mut value = self.core.compose().text.clone();
                    value.push(c);
                    self.core
                        .handle_event(AppEvent::Compose(ComposeEvent::SetText(value)));
                }
            }
            KeyCode::Backspace => {
                if field == ComposeField::Text {
                    let mut value = self.core.compose().text.clone();
                    value.pop();
                    self.core
                        .handle_event(AppEvent::Compose(ComposeEvent::SetText(value)));
                }
            }

            KeyCode::Enter => {
                if field == ComposeField::Save {
                    self.core.handle_event(AppEvent::Compose(ComposeEvent::Submit));
                } else {
                    self.compose_cursor =
                        (self.compose_cursor + 1).min(ComposeField::ALL.len() - 1);
                }
            }

            _ => {}
        }
    }

    /// Left/Right on a composer field.
    fn step_compose_field(&mut self, field: ComposeField, delta: i64) {
        let form = self.core.compose();
        let event = match field {
            ComposeField::Qty => {
                let qty = (form.qty + 0.25 * delta as f64).clamp(0.25, 99.0);
                Some(ComposeEvent::SetQty(qty))
            }
            ComposeField::Units => Some(ComposeEvent::SetUnits(form.next_units())),
            ComposeField::Calories => {
                Some(ComposeEvent::SetCalories(step(
                    form.calories,
                    delta * 10,
                    (0, 5000),
                )))
            }
            ComposeField::Carbohydrate => Some(ComposeEvent::SetCarbohydrate(step(
                form.carbohydrate,
                delta,
                (0, 1000),
            ))),
            ComposeField::Fat => Some(ComposeEvent::SetFat(step(form.fat, delta, (0, 1000)))),
            ComposeField::Protein => {
                Some(ComposeEvent::SetProtein(step(form.protein, delta, (0, 1000))))
            }
            _ => None,
        };
        if let Some(event) = event {
            self.core.handle_event(AppEvent::Compose(event));
        }
    }

    // === Rendering ===

    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| views::render(frame, self))?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Step a bounded numeric field by `delta`, clamping to the range.
fn step(value: u64, delta: i64, (min, max): (u64, u64)) -> u64 {
    let stepped = value.saturating_add_signed(delta);
    stepped.clamp(min, max)
}

/// Cycle through a closed variant list by `delta`, wrapping at the ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i64) -> T {
    let len = all.len() as i64;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as i64;
    let next = (idx + delta).rem_euclid(len);
    all[next as usize]
}
