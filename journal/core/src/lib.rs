//! Journal Core - Headless Application Core for fj
//!
//! This crate provides the complete client-side logic for the fj food
//! journal, completely independent of any UI framework. It can drive a TUI,
//! a web surface, or run headless under test.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       UI Surfaces                          │
//! │      ┌─────────┐        ┌──────────┐      ┌────────────┐   │
//! │      │   TUI   │        │ Headless │      │   (future)  │  │
//! │      │(ratatui)│        │  (tests) │      │             │  │
//! │      └────┬────┘        └────┬─────┘      └──────┬─────┘   │
//! │           └───────────────────┴──────────────────┘         │
//! │                      AppEvent (in)                         │
//! │                model accessors + Screen (out)              │
//! └───────────────────────────┬───────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼───────────────────────────────┐
//! │                      JOURNAL CORE                          │
//! │  ┌────────────────────────┴─────────────────────────────┐  │
//! │  │                     JournalApp                        │  │
//! │  │  ┌────────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │  │
//! │  │  │Registration│ │ Compose │ │  Comm   │ │ Backend  │ │  │
//! │  │  │ sub-model  │ │sub-model│ │  state  │ │  (HTTP)  │ │  │
//! │  │  └────────────┘ └─────────┘ └─────────┘ └──────────┘ │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`JournalApp`]: the single owner of all mutable client state
//! - [`AppEvent`]: events from UI surfaces into the core
//! - [`Completion`]: results of spawned calls, folded back into the model
//! - [`ApiBackend`]: the journal service seam (HTTP in production, scripted
//!   mocks in tests)
//! - [`Screen`]: the derived UI mode a surface should render
//!
//! # Event Flow
//!
//! The surface calls [`JournalApp::handle_event`] for user actions and
//! [`JournalApp::poll_completions`] once per frame. Issuing a call spawns a
//! task and returns immediately; the task reports back through an internal
//! channel. Both paths mutate the model on the caller's thread only, one
//! event at a time, in arrival order.
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure client logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod backend;
pub mod compose;
pub mod events;
pub mod model;
pub mod registration;
pub mod state;

// Re-exports for convenience
pub use app::{AppConfig, JournalApp};
pub use backend::{ApiBackend, ApiError, HttpBackend, IDENTITY_HEADER};
pub use compose::{ComposeForm, UNITS};
pub use events::{AppEvent, Completion, ComposeEvent, RegistrationEvent};
pub use model::{
    friendly_date, valid_user_name, ActivityFactor, DailyTotals, Gender, Goal, JournalEntry,
    NewEntry, RegisterUserInputs, User,
};
pub use registration::{
    Problem, RegistrationAction, RegistrationForm, MAX_IMAGE_DATA_URI_LEN, PLACEHOLDER_IMAGE,
};
pub use state::{CommState, JobKind, Screen};
