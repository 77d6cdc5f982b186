//! fj TUI - Terminal interface for the food journal
//!
//! This crate provides a full-screen terminal UI over `journal-core`:
//! a user picker, a signup form, the day's journal and a food-entry
//! composer.
//!
//! # Architecture
//!
//! - **App**: event loop; converts key presses to `AppEvent`s and polls the
//!   core for finished work
//! - **Views**: pure projections of core state to ratatui widgets
//! - **Theme**: the fj color palette

pub mod app;
pub mod theme;
pub mod views;

pub use app::App;
