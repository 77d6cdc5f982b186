//! Theme and Colors
//!
//! The fj palette: greens for the journal itself, warm amber for calories,
//! muted grays for chrome.

use ratatui::style::Color;

/// Signature accent for headers and the selected user
pub const FJ_GREEN: Color = Color::Rgb(130, 200, 130);

/// Highlight for the focused form field
pub const FIELD_FOCUS: Color = Color::Rgb(255, 223, 128);

/// Calories and targets
pub const CALORIE_AMBER: Color = Color::Rgb(255, 180, 90);

/// Protein accent in the totals bar
pub const PROTEIN_BLUE: Color = Color::Rgb(150, 180, 255);

/// Dim chrome (separators, hints)
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error banner red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Working/busy indicator
pub const WORKING_CYAN: Color = Color::Rgb(110, 200, 220);
