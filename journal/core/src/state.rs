//! Communication State and Screens
//!
//! The session-wide indicator of which network job (if any) is outstanding or
//! most recently failed, and the derived screen the surface should render.
//!
//! # Design Philosophy
//!
//! Exactly one logical job is tracked at a time; issuing a new job overwrites
//! the previous status. The screen is never stored — it is computed from the
//! model's selected-user/registering/composing flags, so the model can never
//! disagree with what is on screen.

/// The kind of network job the client is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    /// Fetching the registered user list at startup
    LoadingRegisteredUsers,
    /// Creating a new user
    RegisteringUser,
    /// Fetching the selected user's journal
    LoadingJournal,
    /// Rolling the journal's date forward
    EndingDay,
    /// Posting a new journal entry
    SavingEntry,
}

impl JobKind {
    /// Human-readable description for the status line
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::LoadingRegisteredUsers => "Loading users...",
            Self::RegisteringUser => "Registering...",
            Self::LoadingJournal => "Loading journal...",
            Self::EndingDay => "Ending the day...",
            Self::SavingEntry => "Saving entry...",
        }
    }
}

/// Session-wide communication status.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CommState {
    /// Nothing outstanding
    #[default]
    Idle,
    /// One job is in flight
    Working(JobKind),
    /// The last job failed; the message is already user-facing
    Error(String),
}

impl CommState {
    /// Whether a job is currently in flight
    #[must_use]
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working(_))
    }

    /// The error message, if the last job failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Status-line text for the current state
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Idle => "Ready",
            Self::Working(job) => job.description(),
            Self::Error(msg) => msg,
        }
    }
}

/// The UI mode, derived from model flags (see [`crate::app::JournalApp::screen`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Pick a profile from the registered users
    SelectUser,
    /// The signup form
    Register,
    /// The selected user's journal for the current day
    Journal,
    /// The new-entry form
    Compose,
}
