//! Wire payload for `POST /api/registrations`.

use serde::{Deserialize, Serialize};

use super::model::RegistrationForm;

/// Body sent to the backend.
///
/// Optional fields are `None` (serialized as `null`) when the form left them
/// empty. Required fields are copied verbatim, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub student_name: String,
    pub student_id: String,
    pub grade: String,
    pub class_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub extracurricular: String,
    pub motivation: Option<String>,
    pub experience: Option<String>,
    pub preferred_schedule: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&RegistrationForm> for RegistrationPayload {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            student_name: form.student_name.clone(),
            student_id: form.student_id.clone(),
            grade: form.grade.clone(),
            class_name: form.class_name.clone(),
            email: non_empty(&form.email),
            phone: form.phone.clone(),
            parent_name: non_empty(&form.parent_name),
            parent_phone: non_empty(&form.parent_phone),
            extracurricular: form.extracurricular.clone(),
            motivation: non_empty(&form.motivation),
            experience: non_empty(&form.experience),
            preferred_schedule: non_empty(&form.preferred_schedule),
        }
    }
}
