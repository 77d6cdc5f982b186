//! Domain Types
//!
//! The shapes shared between the client and the journal service, with their
//! JSON wire forms. The service speaks snake_case JSON; field names here line
//! up with the wire so the serde derives map directly.
//!
//! # Design Philosophy
//!
//! Everything the wire treats as a string-typed enum (gender, goal, activity
//! factor) is a closed variant type here, with explicit UI-label and
//! wire-value tables. UI labels and wire values differ for some variants
//! (notably [`Goal`]), so neither is ever derived from the other.

use serde::{Deserialize, Deserializer, Serialize};

/// A journal owner as returned by the service.
///
/// `current_date` is server-authoritative: the client only ever changes it by
/// applying the result of an end-day call. Everything else is immutable from
/// the client's point of view within a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Profile image as a data-URI encoded small bitmap
    pub image: String,
    /// Unique identifier, lowercase letters only
    pub user_name: String,
    /// Free-text name shown in the UI
    pub display_name: String,
    /// The journal's current day (ISO-8601 date)
    pub current_date: String,
    /// Daily calorie target
    pub target_calories: u64,
    /// Daily fat target (grams)
    pub target_fat: u64,
    /// Daily protein target (grams)
    pub target_protein: u64,
    /// Daily carbohydrate target (grams)
    pub target_carbohydrate: u64,
}

/// One logged food item. Immutable once loaded; there is no edit or delete
/// operation in the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Server-assigned ID, unique within a journal
    pub id: String,
    /// What was eaten
    pub text: String,
    /// When the entry was logged. Older servers send epoch milliseconds,
    /// newer ones a string; both decode to a string here.
    #[serde(deserialize_with = "timestamp_as_string")]
    pub timestamp: String,
    /// Amount eaten
    pub qty: f64,
    /// Unit for `qty`, e.g. "Cups" or "Grams"
    pub qty_units: String,
    /// Calories in this entry
    pub calories: u64,
    /// Carbohydrate in grams
    pub carbohydrate: u64,
    /// Fat in grams
    pub fat: u64,
    /// Protein in grams
    pub protein: u64,
}

/// Accept the entry timestamp as either a JSON string or an integer.
fn timestamp_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Millis(u64),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Text(s) => Ok(s),
        Wire::Millis(ms) => Ok(ms.to_string()),
    }
}

/// Gender selection on the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Wire value "Male"
    Male,
    /// Wire value "Female"
    Female,
}

impl Gender {
    /// All variants, in UI order
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// UI label (same as the wire value for this type)
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Weight goal. The UI labels and the wire values are NOT the same strings:
/// the service expects `"Maintain"`/`"LoseWeight"`, the UI shows
/// "Maintain Weight"/"Lose Weight".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    /// Wire value "Maintain"
    #[serde(rename = "Maintain")]
    MaintainWeight,
    /// Wire value "LoseWeight"
    LoseWeight,
}

impl Goal {
    /// All variants, in UI order
    pub const ALL: [Goal; 2] = [Goal::MaintainWeight, Goal::LoseWeight];

    /// UI label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MaintainWeight => "Maintain Weight",
            Self::LoseWeight => "Lose Weight",
        }
    }

    /// The literal string sent to the service
    #[must_use]
    pub fn wire_value(&self) -> &'static str {
        match self {
            Self::MaintainWeight => "Maintain",
            Self::LoseWeight => "LoseWeight",
        }
    }
}

/// Daily activity level, used server-side to compute calorie targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityFactor {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or twice-daily training
    ExtraActive,
}

impl ActivityFactor {
    /// All variants, in UI order
    pub const ALL: [ActivityFactor; 5] = [
        ActivityFactor::Sedentary,
        ActivityFactor::LightlyActive,
        ActivityFactor::ModeratelyActive,
        ActivityFactor::VeryActive,
        ActivityFactor::ExtraActive,
    ];

    /// UI label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly Active",
            Self::ModeratelyActive => "Moderately Active",
            Self::VeryActive => "Very Active",
            Self::ExtraActive => "Extra Active",
        }
    }
}

/// The registration request body. Exists client-side only until submitted;
/// the service answers with the created [`User`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterUserInputs {
    /// Profile image data URI
    pub image: String,
    /// Requested user name, lowercase letters only
    pub user_name: String,
    /// Display name
    pub display_name: String,
    /// Gender selection
    pub gender: Gender,
    /// Age in years
    pub age: u64,
    /// Height in centimeters
    pub height: u64,
    /// Weight in kilograms
    pub weight: u64,
    /// Weight goal (see [`Goal`] for the label/wire split)
    pub goal: Goal,
    /// Daily activity level
    pub factor: ActivityFactor,
}

/// A new journal entry to be posted. The server assigns the ID and
/// timestamp; the client only supplies what was eaten.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewEntry {
    /// What was eaten
    pub text: String,
    /// Amount eaten
    pub qty: f64,
    /// Unit for `qty`
    pub qty_units: String,
    /// Calories in this entry
    pub calories: u64,
    /// Carbohydrate in grams
    pub carbohydrate: u64,
    /// Fat in grams
    pub fat: u64,
    /// Protein in grams
    pub protein: u64,
}

/// Summed nutrition over a day's entries, for display against the user's
/// targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DailyTotals {
    /// Total calories
    pub calories: u64,
    /// Total carbohydrate in grams
    pub carbohydrate: u64,
    /// Total fat in grams
    pub fat: u64,
    /// Total protein in grams
    pub protein: u64,
}

impl DailyTotals {
    /// Sum up a set of entries.
    #[must_use]
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, e| Self {
            calories: acc.calories + e.calories,
            carbohydrate: acc.carbohydrate + e.carbohydrate,
            fat: acc.fat + e.fat,
            protein: acc.protein + e.protein,
        })
    }
}

/// Whether a string is acceptable as a user name: non-empty, ASCII lowercase
/// letters only.
#[must_use]
pub fn valid_user_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase())
}

/// Render an ISO date as "Friday, March 1" for headers. Dates that don't
/// parse render as-is rather than erroring — the server owns the format.
#[must_use]
pub fn friendly_date(iso_date: &str) -> String {
    chrono::NaiveDate::parse_from_str(iso_date, "%Y-%m-%d")
        .map_or_else(|_| iso_date.to_string(), |d| d.format("%A, %B %-d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_inputs() -> RegisterUserInputs {
        RegisterUserInputs {
            image: "data:image/png;base64,AAAA".to_string(),
            user_name: "alice".to_string(),
            display_name: "Alice".to_string(),
            gender: Gender::Female,
            age: 30,
            height: 170,
            weight: 65,
            goal: Goal::MaintainWeight,
            factor: ActivityFactor::LightlyActive,
        }
    }

    #[test]
    fn test_goal_wire_values() {
        let mut inputs = sample_inputs();
        let json = serde_json::to_string(&inputs).unwrap();
        assert!(json.contains(r#""goal":"Maintain""#), "got: {json}");

        inputs.goal = Goal::LoseWeight;
        let json = serde_json::to_string(&inputs).unwrap();
        assert!(json.contains(r#""goal":"LoseWeight""#), "got: {json}");
    }

    #[test]
    fn test_goal_label_differs_from_wire() {
        assert_eq!(Goal::MaintainWeight.label(), "Maintain Weight");
        assert_eq!(Goal::MaintainWeight.wire_value(), "Maintain");
        assert_eq!(Goal::LoseWeight.label(), "Lose Weight");
        assert_eq!(Goal::LoseWeight.wire_value(), "LoseWeight");
    }

    #[test]
    fn test_register_inputs_wire_shape() {
        let json = serde_json::to_value(sample_inputs()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "image",
            "user_name",
            "display_name",
            "gender",
            "age",
            "height",
            "weight",
            "goal",
            "factor",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["gender"], "Female");
        assert_eq!(obj["age"], 30);
    }

    #[test]
    fn test_user_decodes_from_wire() {
        let user: User = serde_json::from_str(
            r#"{
                "image": "data:,x",
                "user_name": "bob",
                "display_name": "Bob",
                "current_date": "2024-03-01",
                "target_calories": 2000,
                "target_fat": 250,
                "target_protein": 166,
                "target_carbohydrate": 44
            }"#,
        )
        .unwrap();
        assert_eq!(user.user_name, "bob");
        assert_eq!(user.target_calories, 2000);
        assert_eq!(user.current_date, "2024-03-01");
    }

    #[test]
    fn test_user_missing_field_is_an_error() {
        // No target_calories: must fail decode, not default to zero.
        let result = serde_json::from_str::<User>(
            r#"{
                "image": "data:,x",
                "user_name": "bob",
                "display_name": "Bob",
                "current_date": "2024-03-01",
                "target_fat": 250,
                "target_protein": 166,
                "target_carbohydrate": 44
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_mistyped_field_is_an_error() {
        let result = serde_json::from_str::<User>(
            r#"{
                "image": "data:,x",
                "user_name": "bob",
                "display_name": "Bob",
                "current_date": "2024-03-01",
                "target_calories": "lots",
                "target_fat": 250,
                "target_protein": 166,
                "target_carbohydrate": 44
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_timestamp_accepts_string_or_millis() {
        let text = r#"{
            "id": "e1", "text": "Oatmeal", "timestamp": "2024-03-01T08:00:00Z",
            "qty": 1.5, "qty_units": "Cups",
            "calories": 300, "carbohydrate": 54, "fat": 5, "protein": 10
        }"#;
        let entry: JournalEntry = serde_json::from_str(text).unwrap();
        assert_eq!(entry.timestamp, "2024-03-01T08:00:00Z");

        let millis = r#"{
            "id": "e2", "text": "Oatmeal", "timestamp": 1709280000000,
            "qty": 1.5, "qty_units": "Cups",
            "calories": 300, "carbohydrate": 54, "fat": 5, "protein": 10
        }"#;
        let entry: JournalEntry = serde_json::from_str(millis).unwrap();
        assert_eq!(entry.timestamp, "1709280000000");
    }

    #[test]
    fn test_valid_user_name() {
        assert!(valid_user_name("bob"));
        assert!(valid_user_name("alice"));
        assert!(!valid_user_name(""));
        assert!(!valid_user_name("bob1"));
        assert!(!valid_user_name("Bob"));
        assert!(!valid_user_name("bob smith"));
        assert!(!valid_user_name("böb"));
    }

    #[test]
    fn test_friendly_date() {
        assert_eq!(friendly_date("2024-03-01"), "Friday, March 1");
        assert_eq!(friendly_date("2024-12-25"), "Wednesday, December 25");
        // Unparseable dates pass through untouched
        assert_eq!(friendly_date("someday"), "someday");
    }

    #[test]
    fn test_daily_totals_sum() {
        let entry = |calories, carbohydrate, fat, protein| JournalEntry {
            id: "e".to_string(),
            text: "food".to_string(),
            timestamp: "0".to_string(),
            qty: 1.0,
            qty_units: "Cups".to_string(),
            calories,
            carbohydrate,
            fat,
            protein,
        };
        let totals = DailyTotals::from_entries(&[entry(300, 54, 5, 10), entry(200, 6, 14, 12)]);
        assert_eq!(totals.calories, 500);
        assert_eq!(totals.carbohydrate, 60);
        assert_eq!(totals.fat, 19);
        assert_eq!(totals.protein, 22);
    }

    #[test]
    fn test_gender_and_factor_labels() {
        assert_eq!(Gender::Male.label(), "Male");
        assert_eq!(ActivityFactor::ModeratelyActive.label(), "Moderately Active");
        assert_eq!(ActivityFactor::ALL.len(), 5);
    }
}
