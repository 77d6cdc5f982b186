//! Registration Sub-Model
//!
//! An isolated state machine for the multi-field signup form. It owns its
//! fields and problem list, decides when submission is allowed, and tells the
//! parent what work to start — it never talks to the network itself, and on
//! success it does not self-mutate: the parent resets it after handling the
//! completion.

use std::path::PathBuf;

use base64::Engine as _;

use crate::events::RegistrationEvent;
use crate::model::{valid_user_name, ActivityFactor, Gender, Goal, RegisterUserInputs};

/// Built-in placeholder avatar (1x1 transparent PNG). Submission requires
/// the user to have replaced it.
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,\
iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Upper bound on the encoded image, in bytes of the finished data URI.
/// The encoded size governs, not the file size on disk.
pub const MAX_IMAGE_DATA_URI_LEN: usize = 10_240;

/// Something wrong with the form, rendered inline on the registration screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// The encoded image exceeded [`MAX_IMAGE_DATA_URI_LEN`]
    ImageTooLarge,
    /// The picked file could not be read
    ImageUnreadable(String),
    /// Submit was pressed while the validity predicate failed
    InvalidInput,
    /// The registration call itself failed
    Http(String),
}

impl Problem {
    /// Inline text for the form
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ImageTooLarge => format!(
                "That image is too big once encoded (max {MAX_IMAGE_DATA_URI_LEN} bytes)."
            ),
            Self::ImageUnreadable(detail) => format!("Couldn't read that image: {detail}"),
            Self::InvalidInput => "Some fields aren't filled in correctly yet.".to_string(),
            Self::Http(msg) => msg.clone(),
        }
    }
}

/// Work the parent should start on the sub-model's behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistrationAction {
    /// Read and encode the picked file, then deliver it back via
    /// [`RegistrationForm::apply_image`]
    LoadImage(PathBuf),
    /// Issue the registration call with these inputs
    Register(RegisterUserInputs),
}

/// The signup form state.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationForm {
    /// Requested user name, validated as lowercase letters
    pub user_name: String,
    /// Free-text display name
    pub display_name: String,
    /// Data URI; starts as [`PLACEHOLDER_IMAGE`]
    pub image: String,
    /// Gender selection
    pub gender: Gender,
    /// Age in years
    pub age: u64,
    /// Height in centimeters
    pub height: u64,
    /// Weight in kilograms
    pub weight: u64,
    /// Weight goal
    pub goal: Goal,
    /// Daily activity level
    pub factor: ActivityFactor,
    /// Everything currently wrong, newest last
    pub problems: Vec<Problem>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            display_name: String::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
            gender: Gender::Male,
            age: 30,
            height: 170,
            weight: 70,
            goal: Goal::MaintainWeight,
            factor: ActivityFactor::Sedentary,
            problems: Vec::new(),
        }
    }
}

impl RegistrationForm {
    /// Apply one edit. Field edits clear the problem list (the user is
    /// addressing it); `Submit` either yields the call to make or records
    /// why it can't be made yet.
    pub fn apply(&mut self, event: RegistrationEvent) -> Option<RegistrationAction> {
        match event {
            RegistrationEvent::SetUserName(value) => {
                self.user_name = value;
                self.problems.clear();
                None
            }
            RegistrationEvent::SetDisplayName(value) => {
                self.display_name = value;
                self.problems.clear();
                None
            }
            RegistrationEvent::SetGender(gender) => {
                self.gender = gender;
                None
            }
            RegistrationEvent::SetGoal(goal) => {
                self.goal = goal;
                None
            }
            RegistrationEvent::SetFactor(factor) => {
                self.factor = factor;
                None
            }
            RegistrationEvent::SetAge(age) => {
                self.age = age;
                None
            }
            RegistrationEvent::SetHeight(height) => {
                self.height = height;
                None
            }
            RegistrationEvent::SetWeight(weight) => {
                self.weight = weight;
                None
            }
            RegistrationEvent::AttachImage(path) => {
                self.problems.clear();
                Some(RegistrationAction::LoadImage(path))
            }
            RegistrationEvent::Submit => match self.inputs() {
                Some(inputs) => Some(RegistrationAction::Register(inputs)),
                None => {
                    self.push_problem(Problem::InvalidInput);
                    None
                }
            },
        }
    }

    /// Accept an encoded image, unless it is over the size limit — then the
    /// current image stays and the problem is recorded.
    pub fn apply_image(&mut self, data_uri: String) {
        if data_uri.len() > MAX_IMAGE_DATA_URI_LEN {
            self.push_problem(Problem::ImageTooLarge);
            return;
        }
        self.image = data_uri;
    }

    /// Record a problem, deduplicating identical entries.
    pub fn push_problem(&mut self, problem: Problem) {
        if !self.problems.contains(&problem) {
            self.problems.push(problem);
        }
    }

    /// The validity predicate gating submission: a well-formed user name, a
    /// display name, a real (non-placeholder) image, and positive body
    /// numbers. The steppers keep the numbers bounded, but they are
    /// re-checked here anyway.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        valid_user_name(&self.user_name)
            && !self.display_name.is_empty()
            && self.image != PLACEHOLDER_IMAGE
            && self.age > 0
            && self.height > 0
            && self.weight > 0
    }

    /// The wire inputs, if the form is valid.
    #[must_use]
    pub fn inputs(&self) -> Option<RegisterUserInputs> {
        if !self.is_valid() {
            return None;
        }
        Some(RegisterUserInputs {
            image: self.image.clone(),
            user_name: self.user_name.clone(),
            display_name: self.display_name.clone(),
            gender: self.gender,
            age: self.age,
            height: self.height,
            weight: self.weight,
            goal: self.goal,
            factor: self.factor,
        })
    }

    /// Back to defaults, after a successful registration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Encode raw image bytes into a data URI for the given MIME type.
#[must_use]
pub fn encode_image(bytes: &[u8], mime: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Guess the image MIME type from the file extension; PNG when unsure.
#[must_use]
pub fn image_mime(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::default();
        form.user_name = "bob".to_string();
        form.display_name = "Bob".to_string();
        form.image = "data:image/png;base64,AAAA".to_string();
        form
    }

    #[test]
    fn test_default_form_is_invalid() {
        assert!(!RegistrationForm::default().is_valid());
    }

    #[test]
    fn test_filled_form_is_valid() {
        assert!(filled_form().is_valid());
    }

    #[test]
    fn test_user_name_must_be_lowercase_letters() {
        let mut form = filled_form();
        form.user_name = "bob1".to_string();
        assert!(!form.is_valid());

        form.user_name = "bob".to_string();
        assert!(form.is_valid());
    }

    #[test]
    fn test_placeholder_image_blocks_submission() {
        let mut form = filled_form();
        form.image = PLACEHOLDER_IMAGE.to_string();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_zero_body_numbers_block_submission() {
        let mut form = filled_form();
        form.age = 0;
        assert!(!form.is_valid());
    }

    #[test]
    fn test_submit_invalid_records_problem_and_no_action() {
        let mut form = RegistrationForm::default();
        let action = form.apply(RegistrationEvent::Submit);
        assert_eq!(action, None);
        assert_eq!(form.problems, vec![Problem::InvalidInput]);
    }

    #[test]
    fn test_submit_valid_yields_register_action() {
        let mut form = filled_form();
        let action = form.apply(RegistrationEvent::Submit);
        match action {
            Some(RegistrationAction::Register(inputs)) => {
                assert_eq!(inputs.user_name, "bob");
                assert_eq!(inputs.goal, Goal::MaintainWeight);
            }
            other => panic!("expected Register action, got {other:?}"),
        }
    }

    #[test]
    fn test_field_edit_clears_problems() {
        let mut form = RegistrationForm::default();
        form.apply(RegistrationEvent::Submit);
        assert!(!form.problems.is_empty());

        form.apply(RegistrationEvent::SetUserName("bob".to_string()));
        assert!(form.problems.is_empty());
    }

    #[test]
    fn test_oversized_image_is_rejected_and_field_kept() {
        let mut form = filled_form();
        let before = form.image.clone();

        let huge = format!("data:image/png;base64,{}", "A".repeat(MAX_IMAGE_DATA_URI_LEN));
        form.apply_image(huge);

        assert_eq!(form.image, before);
        assert_eq!(form.problems, vec![Problem::ImageTooLarge]);
    }

    #[test]
    fn test_image_at_limit_is_accepted() {
        let mut form = RegistrationForm::default();
        let prefix = "data:image/png;base64,";
        let payload = "A".repeat(MAX_IMAGE_DATA_URI_LEN - prefix.len());
        let uri = format!("{prefix}{payload}");
        assert_eq!(uri.len(), MAX_IMAGE_DATA_URI_LEN);

        form.apply_image(uri.clone());
        assert_eq!(form.image, uri);
        assert!(form.problems.is_empty());
    }

    #[test]
    fn test_attach_image_yields_load_action() {
        let mut form = RegistrationForm::default();
        let action = form.apply(RegistrationEvent::AttachImage(PathBuf::from("cat.png")));
        assert_eq!(
            action,
            Some(RegistrationAction::LoadImage(PathBuf::from("cat.png")))
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = filled_form();
        form.push_problem(Problem::Http("boom".to_string()));
        form.reset();
        assert_eq!(form, RegistrationForm::default());
    }

    #[test]
    fn test_encode_image() {
        let uri = encode_image(b"hi", "image/png");
        assert_eq!(uri, "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_image_mime_from_extension() {
        use std::path::Path;
        assert_eq!(image_mime(Path::new("a.png")), "image/png");
        assert_eq!(image_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("noext")), "image/png");
    }

    #[test]
    fn test_placeholder_fits_the_size_limit() {
        assert!(PLACEHOLDER_IMAGE.len() <= MAX_IMAGE_DATA_URI_LEN);
    }
}
