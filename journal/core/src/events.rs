//! Application Events
//!
//! Everything that can drive the state machine forward: [`AppEvent`]s come
//! from the surface (a human did something), [`Completion`]s come back from
//! spawned work (a call finished). Both land in the same single-consumer
//! update path, so the model only ever changes in one place and in arrival
//! order.
//!
//! # Design Philosophy
//!
//! Surfaces are dumb: they report what the user did and never interpret it.
//! Each outgoing call is stamped with a sequence number from a process-wide
//! counter; a completion whose stamp is no longer the most recently issued
//! one is stale and gets discarded instead of clobbering newer state.

use std::path::PathBuf;

use crate::backend::ApiError;
use crate::model::{ActivityFactor, Gender, Goal, JournalEntry, User};

/// Events from the surface to the application core.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// User picked a profile on the select screen
    SelectUser(User),
    /// User asked for the signup form
    OpenRegistration,
    /// User backed out of the signup form
    CancelRegistration,
    /// User opened the new-entry composer
    OpenComposer,
    /// User backed out of the composer
    CloseComposer,
    /// User asked to roll the journal date forward
    EndDay,
    /// User asked to re-fetch whatever the current screen shows
    Refresh,
    /// An edit on the registration form
    Registration(RegistrationEvent),
    /// An edit on the composer form
    Compose(ComposeEvent),
}

/// Edits to the registration sub-model.
#[derive(Clone, Debug)]
pub enum RegistrationEvent {
    /// Replace the user-name field
    SetUserName(String),
    /// Replace the display-name field
    SetDisplayName(String),
    /// Pick a gender
    SetGender(Gender),
    /// Pick a weight goal
    SetGoal(Goal),
    /// Pick an activity level
    SetFactor(ActivityFactor),
    /// Stepper value, years
    SetAge(u64),
    /// Stepper value, centimeters
    SetHeight(u64),
    /// Stepper value, kilograms
    SetWeight(u64),
    /// User picked an image file to load and encode
    AttachImage(PathBuf),
    /// User pressed submit
    Submit,
}

/// Edits to the composer sub-model.
#[derive(Clone, Debug)]
pub enum ComposeEvent {
    /// Replace the description
    SetText(String),
    /// Replace the quantity
    SetQty(f64),
    /// Cycle/replace the quantity unit
    SetUnits(String),
    /// Stepper value, calories
    SetCalories(u64),
    /// Stepper value, grams
    SetCarbohydrate(u64),
    /// Stepper value, grams
    SetFat(u64),
    /// Stepper value, grams
    SetProtein(u64),
    /// User pressed save
    Submit,
}

/// Results of spawned work, delivered back into the update path.
///
/// API completions carry the sequence number of the call that produced them;
/// the image completion is local file work and is guarded by screen state
/// instead.
#[derive(Debug)]
pub enum Completion {
    /// GET /users finished
    UsersLoaded {
        /// Stamp of the issuing call
        seq: u64,
        /// Decoded user list or the failure
        result: Result<Vec<User>, ApiError>,
    },
    /// POST /register finished
    Registered {
        /// Stamp of the issuing call
        seq: u64,
        /// The created user or the failure
        result: Result<User, ApiError>,
    },
    /// GET /journal finished for `user`
    JournalLoaded {
        /// Stamp of the issuing call
        seq: u64,
        /// The user whose journal was requested
        user: User,
        /// Decoded entries or the failure
        result: Result<Vec<JournalEntry>, ApiError>,
    },
    /// GET /end-day finished; Ok carries the new current date
    DayEnded {
        /// Stamp of the issuing call
        seq: u64,
        /// The new current date or the failure
        result: Result<String, ApiError>,
    },
    /// POST /journal finished for `user`
    EntrySaved {
        /// Stamp of the issuing call
        seq: u64,
        /// The user whose journal gained the entry
        user: User,
        /// Nothing on success, the failure otherwise
        result: Result<(), ApiError>,
    },
    /// A picked image file was read and encoded (or not)
    ImageLoaded {
        /// Encoded data URI, or a description of why reading failed
        result: Result<String, String>,
    },
}

impl Completion {
    /// The sequence stamp, for completions that carry one.
    #[must_use]
    pub fn seq(&self) -> Option<u64> {
        match self {
            Self::UsersLoaded { seq, .. }
            | Self::Registered { seq, .. }
            | Self::JournalLoaded { seq, .. }
            | Self::DayEnded { seq, .. }
            | Self::EntrySaved { seq, .. } => Some(*seq),
            Self::ImageLoaded { .. } => None,
        }
    }
}

/// Next call sequence number, process-wide.
pub(crate) fn next_seq() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_completion_seq_accessor() {
        let c = Completion::UsersLoaded {
            seq: 7,
            result: Ok(Vec::new()),
        };
        assert_eq!(c.seq(), Some(7));

        let c = Completion::ImageLoaded {
            result: Ok("data:,".to_string()),
        };
        assert_eq!(c.seq(), None);
    }
}
