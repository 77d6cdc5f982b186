//! The Application Core
//!
//! [`JournalApp`] is the single owner of all mutable client state: the user
//! list, the selected profile, the loaded journal, the two form sub-models
//! and the communication status. Surfaces feed it [`AppEvent`]s and poll it
//! for finished work; it answers by mutating the model and (sometimes)
//! spawning one API call.
//!
//! # Design Philosophy
//!
//! The core is UI-agnostic. It doesn't know whether it is driven by a TUI, a
//! test harness, or something else. Issuing a call never blocks: the call
//! runs in a spawned task that reports back through an internal channel, and
//! [`JournalApp::poll_completions`] folds those reports into the model on the
//! caller's thread, one at a time, in arrival order. Each call is stamped
//! with a sequence number; completions from superseded calls are discarded
//! rather than applied over newer state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::backend::ApiBackend;
use crate::compose::ComposeForm;
use crate::events::{next_seq, AppEvent, Completion};
use crate::model::{DailyTotals, JournalEntry, NewEntry, RegisterUserInputs, User};
use crate::registration::{encode_image, image_mime, Problem, RegistrationAction, RegistrationForm};
use crate::state::{CommState, JobKind, Screen};

/// Application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Probe the service once at startup and log if it is unreachable
    pub health_check_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            health_check_on_start: true,
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            health_check_on_start: std::env::var("FJ_SKIP_HEALTH_CHECK")
                .map(|v| v != "1" && v.to_lowercase() != "true")
                .unwrap_or(true),
        }
    }
}

/// The headless application core, generic over the service backend.
pub struct JournalApp<B: ApiBackend> {
    /// Configuration
    config: AppConfig,
    /// The journal service
    backend: Arc<B>,
    /// Session-wide communication status
    comm: CommState,
    /// Every registered user, as last loaded
    users: Vec<User>,
    /// The active profile, once a journal has loaded for it
    selected: Option<User>,
    /// The selected user's entries for the current day
    entries: Vec<JournalEntry>,
    /// Signup form sub-model
    registration: RegistrationForm,
    /// New-entry form sub-model
    compose: ComposeForm,
    /// Screen-selector flags (the screen itself is derived)
    registering: bool,
    composing: bool,
    /// Completions from spawned work
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    /// Stamp of the most recently issued API call
    in_flight: Option<u64>,
}

impl<B: ApiBackend + 'static> JournalApp<B> {
    /// Create a new core over the given backend.
    pub fn new(backend: B, config: AppConfig) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            config,
            backend: Arc::new(backend),
            comm: CommState::Idle,
            users: Vec::new(),
            selected: None,
            entries: Vec::new(),
            registration: RegistrationForm::default(),
            compose: ComposeForm::default(),
            registering: false,
            composing: false,
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Start the session: optionally probe the service, then kick off the
    /// initial user-list load. Returns immediately; progress arrives through
    /// [`Self::poll_completions`].
    pub fn start(&mut self) {
        if self.config.health_check_on_start {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                if !backend.health_check().await {
                    tracing::warn!(backend = backend.name(), "Journal service not reachable");
                }
            });
        }

        self.comm = CommState::Working(JobKind::LoadingRegisteredUsers);
        self.spawn_list_users();
    }

    // === Model accessors (render-only) ===

    /// Current communication status
    pub fn comm(&self) -> &CommState {
        &self.comm
    }

    /// Registered users, as last loaded
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The active profile, if a journal has loaded
    pub fn selected_user(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    /// The loaded journal entries
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Summed nutrition over the loaded entries
    pub fn totals(&self) -> DailyTotals {
        DailyTotals::from_entries(&self.entries)
    }

    /// The signup form
    pub fn registration(&self) -> &RegistrationForm {
        &self.registration
    }

    /// The new-entry form
    pub fn compose(&self) -> &ComposeForm {
        &self.compose
    }

    /// The screen the surface should render, derived from the model:
    /// journal/composer once a user is selected, else the signup form while
    /// registering, else the user picker.
    pub fn screen(&self) -> Screen {
        if self.selected.is_some() {
            if self.composing {
                Screen::Compose
            } else {
                Screen::Journal
            }
        } else if self.registering {
            Screen::Register
        } else {
            Screen::SelectUser
        }
    }

    // === Event handling ===

    /// Consume one surface event, mutating the model and possibly issuing a
    /// call. Events that don't fit the current screen are ignored with a
    /// trace — the surface and the model can briefly disagree around screen
    /// switches.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SelectUser(user) => {
                if self.screen() != Screen::SelectUser {
                    tracing::trace!("SelectUser outside the select screen, ignored");
                    return;
                }
                self.comm = CommState::Working(JobKind::LoadingJournal);
                self.spawn_journal(user);
            }

            AppEvent::OpenRegistration => {
                if self.screen() == Screen::SelectUser {
                    self.registering = true;
                }
            }

            AppEvent::CancelRegistration => {
                if self.screen() == Screen::Register {
                    // Fields are kept; coming back resumes where they left off.
                    self.registering = false;
                }
            }

            AppEvent::OpenComposer => {
                if self.screen() == Screen::Journal {
                    self.composing = true;
                }
            }

            AppEvent::CloseComposer => {
                if self.screen() == Screen::Compose {
                    self.composing = false;
                }
            }

            AppEvent::EndDay => match self.selected.clone() {
                Some(user) => {
                    self.comm = CommState::Working(JobKind::EndingDay);
                    self.spawn_end_day(user);
                }
                None => {
                    self.comm = CommState::Error("No profile selected.".to_string());
                }
            },

            AppEvent::Refresh => self.refresh(),

            AppEvent::Registration(ev) => {
                if self.screen() != Screen::Register {
                    return;
                }
                match self.registration.apply(ev) {
                    Some(RegistrationAction::LoadImage(path)) => self.spawn_image_load(path),
                    Some(RegistrationAction::Register(inputs)) => {
                        self.comm = CommState::Working(JobKind::RegisteringUser);
                        self.spawn_register(inputs);
                    }
                    None => {}
                }
            }

            AppEvent::Compose(ev) => {
                if self.screen() != Screen::Compose {
                    return;
                }
                if let Some(entry) = self.compose.apply(ev) {
                    // The composer only exists under a selected user.
                    if let Some(user) = self.selected.clone() {
                        self.comm = CommState::Working(JobKind::SavingEntry);
                        self.spawn_add_entry(user, entry);
                    }
                }
            }
        }
    }

    /// Re-issue the call behind the current screen. This is the manual retry
    /// path: nothing retries automatically, the human re-triggers.
    fn refresh(&mut self) {
        match self.screen() {
            Screen::SelectUser => {
                self.comm = CommState::Working(JobKind::LoadingRegisteredUsers);
                self.spawn_list_users();
            }
            Screen::Journal => {
                if let Some(user) = self.selected.clone() {
                    self.comm = CommState::Working(JobKind::LoadingJournal);
                    self.spawn_journal(user);
                }
            }
            Screen::Register | Screen::Compose => {}
        }
    }

    /// Fold all finished work into the model. Call once per frame. Returns
    /// true if anything was applied.
    pub fn poll_completions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.rx.try_recv() {
            applied |= self.apply_completion(completion);
        }
        applied
    }

    /// Apply one completion, unless its stamp shows it was superseded.
    fn apply_completion(&mut self, completion: Completion) -> bool {
        if let Some(seq) = completion.seq() {
            if self.in_flight != Some(seq) {
                tracing::trace!(seq, "Discarding stale completion");
                return false;
            }
            self.in_flight = None;
        }

        match completion {
            Completion::UsersLoaded { result, .. } => match result {
                Ok(users) => {
                    self.users = users;
                    self.comm = CommState::Idle;
                }
                Err(e) => self.comm = CommState::Error(e.user_message()),
            },

            Completion::Registered { result, .. } => match result {
                Ok(user) => {
                    self.registering = false;
                    self.registration.reset();
                    self.comm = CommState::Working(JobKind::LoadingJournal);
                    self.spawn_journal(user);
                }
                Err(e) => {
                    let message = e.user_message();
                    self.registration.push_problem(Problem::Http(message.clone()));
                    self.comm = CommState::Error(message);
                }
            },

            Completion::JournalLoaded { user, result, .. } => match result {
                Ok(entries) => {
                    self.entries = entries;
                    self.selected = Some(user);
                    self.comm = CommState::Idle;
                }
                Err(e) => self.comm = CommState::Error(e.user_message()),
            },

            Completion::DayEnded { result, .. } => match result {
                Ok(date) => {
                    // Only the date moves; entries stay until the next
                    // journal reload.
                    if let Some(user) = self.selected.as_mut() {
                        user.current_date = date;
                    }
                    self.comm = CommState::Idle;
                }
                Err(e) => self.comm = CommState::Error(e.user_message()),
            },

            Completion::EntrySaved { user, result, .. } => match result {
                Ok(()) => {
                    self.composing = false;
                    self.compose.reset();
                    self.comm = CommState::Working(JobKind::LoadingJournal);
                    self.spawn_journal(user);
                }
                Err(e) => self.comm = CommState::Error(e.user_message()),
            },

            Completion::ImageLoaded { result } => {
                // Local file work, guarded by screen state instead of a
                // sequence stamp.
                if self.screen() != Screen::Register {
                    tracing::trace!("Image finished loading off the registration screen, ignored");
                    return false;
                }
                match result {
                    Ok(data_uri) => self.registration.apply_image(data_uri),
                    Err(detail) => self
                        .registration
                        .push_problem(Problem::ImageUnreadable(detail)),
                }
            }
        }

        true
    }

    // === Call spawning ===

    fn spawn_list_users(&mut self) {
        let seq = next_seq();
        self.in_flight = Some(seq);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.list_users().await;
            let _ = tx.send(Completion::UsersLoaded { seq, result }).await;
        });
    }

    fn spawn_register(&mut self, inputs: RegisterUserInputs) {
        let seq = next_seq();
        self.in_flight = Some(seq);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.register(&inputs).await;
            let _ = tx.send(Completion::Registered { seq, result }).await;
        });
    }

    fn spawn_journal(&mut self, user: User) {
        let seq = next_seq();
        self.in_flight = Some(seq);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.journal(&user.user_name).await;
            let _ = tx
                .send(Completion::JournalLoaded { seq, user, result })
                .await;
        });
    }

    fn spawn_end_day(&mut self, user: User) {
        let seq = next_seq();
        self.in_flight = Some(seq);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.end_day(&user.user_name).await;
            let _ = tx.send(Completion::DayEnded { seq, result }).await;
        });
    }

    fn spawn_add_entry(&mut self, user: User, entry: NewEntry) {
        let seq = next_seq();
        self.in_flight = Some(seq);
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.add_entry(&user.user_name, &entry).await;
            let _ = tx
                .send(Completion::EntrySaved { seq, user, result })
                .await;
        });
    }

    fn spawn_image_load(&mut self, path: std::path::PathBuf) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mime = image_mime(&path);
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(encode_image(&bytes, mime)),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(Completion::ImageLoaded { result }).await;
        });
    }
}
