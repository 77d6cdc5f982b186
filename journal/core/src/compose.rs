//! Composer Sub-Model
//!
//! The new-entry form. Same shape as the registration sub-model: it owns its
//! fields, gates submission, and hands the parent a wire-ready [`NewEntry`]
//! when the user saves.

use crate::events::ComposeEvent;
use crate::model::NewEntry;

/// Quantity units offered by the composer, in cycle order.
pub const UNITS: [&str; 5] = ["Cups", "Grams", "Ounces", "Pieces", "Servings"];

/// The new-entry form state.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposeForm {
    /// What was eaten
    pub text: String,
    /// How much
    pub qty: f64,
    /// Unit for `qty`, one of [`UNITS`]
    pub qty_units: String,
    /// Calories in the entry
    pub calories: u64,
    /// Carbohydrate in grams
    pub carbohydrate: u64,
    /// Fat in grams
    pub fat: u64,
    /// Protein in grams
    pub protein: u64,
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            qty: 1.0,
            qty_units: UNITS[0].to_string(),
            calories: 0,
            carbohydrate: 0,
            fat: 0,
            protein: 0,
        }
    }
}

impl ComposeForm {
    /// Apply one edit; `Submit` yields the entry to post when the form is
    /// valid, and nothing otherwise.
    pub fn apply(&mut self, event: ComposeEvent) -> Option<NewEntry> {
        match event {
            ComposeEvent::SetText(value) => {
                self.text = value;
                None
            }
            ComposeEvent::SetQty(qty) => {
                self.qty = qty;
                None
            }
            ComposeEvent::SetUnits(units) => {
                self.qty_units = units;
                None
            }
            ComposeEvent::SetCalories(value) => {
                self.calories = value;
                None
            }
            ComposeEvent::SetCarbohydrate(value) => {
                self.carbohydrate = value;
                None
            }
            ComposeEvent::SetFat(value) => {
                self.fat = value;
                None
            }
            ComposeEvent::SetProtein(value) => {
                self.protein = value;
                None
            }
            ComposeEvent::Submit => self.entry(),
        }
    }

    /// Submission requires a description and a positive quantity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && self.qty > 0.0
    }

    /// The wire entry, if the form is valid.
    #[must_use]
    pub fn entry(&self) -> Option<NewEntry> {
        if !self.is_valid() {
            return None;
        }
        Some(NewEntry {
            text: self.text.trim().to_string(),
            qty: self.qty,
            qty_units: self.qty_units.clone(),
            calories: self.calories,
            carbohydrate: self.carbohydrate,
            fat: self.fat,
            protein: self.protein,
        })
    }

    /// The next unit in the cycle after the current one.
    #[must_use]
    pub fn next_units(&self) -> String {
        let idx = UNITS
            .iter()
            .position(|u| *u == self.qty_units)
            .unwrap_or(UNITS.len() - 1);
        UNITS[(idx + 1) % UNITS.len()].to_string()
    }

    /// Back to defaults, after a successful save.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
