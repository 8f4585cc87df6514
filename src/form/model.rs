//! Registration form model — the fields a student fills in.

use serde::{Deserialize, Serialize};

/// Activities a student can register for.
pub const EXTRACURRICULARS: [&str; 15] = [
    "Pramuka",
    "Paskibra",
    "PMR",
    "Basket",
    "Futsal",
    "Volly",
    "Silat",
    "Karate",
    "Tari",
    "Musik",
    "Jurnalistik",
    "Robotik",
    "KIR",
    "Debat",
    "English Club",
];

/// Days a student can pick as their preferred schedule.
pub const SCHEDULE_DAYS: [&str; 6] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Single-line text that must look like an email address when filled.
    Email,
    /// Multi-line free text.
    LongText,
    /// One value out of a fixed list.
    Choice(&'static [&'static str]),
}

/// Every field of the registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    StudentName,
    StudentId,
    Grade,
    ClassName,
    Email,
    Phone,
    ParentName,
    ParentPhone,
    Extracurricular,
    Motivation,
    Experience,
    PreferredSchedule,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::StudentName,
        FormField::StudentId,
        FormField::Grade,
        FormField::ClassName,
        FormField::Email,
        FormField::Phone,
        FormField::ParentName,
        FormField::ParentPhone,
        FormField::Extracurricular,
        FormField::Motivation,
        FormField::Experience,
        FormField::PreferredSchedule,
    ];

    /// Wire and serde name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StudentName => "student_name",
            Self::StudentId => "student_id",
            Self::Grade => "grade",
            Self::ClassName => "class_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ParentName => "parent_name",
            Self::ParentPhone => "parent_phone",
            Self::Extracurricular => "extracurricular",
            Self::Motivation => "motivation",
            Self::Experience => "experience",
            Self::PreferredSchedule => "preferred_schedule",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StudentName => "Full name",
            Self::StudentId => "Student ID (NIS/NISN)",
            Self::Grade => "Grade",
            Self::ClassName => "Class",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::ParentName => "Parent/guardian name",
            Self::ParentPhone => "Parent/guardian phone",
            Self::Extracurricular => "Extracurricular",
            Self::Motivation => "Why do you want to join?",
            Self::Experience => "Related experience",
            Self::PreferredSchedule => "Preferred day",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::StudentName => Some("e.g. Budi Santoso"),
            Self::StudentId => Some("e.g. 1234567890"),
            Self::Grade => Some("e.g. 10"),
            Self::ClassName => Some("e.g. 10 IPA 2"),
            Self::Email => Some("email@sekolah.sch.id"),
            Self::Phone => Some("08xxxxxxxxxx"),
            Self::ParentName | Self::ParentPhone | Self::Experience => Some("optional"),
            Self::Motivation => Some("Tell us why you are joining"),
            Self::Extracurricular | Self::PreferredSchedule => None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Email => FieldKind::Email,
            Self::Motivation | Self::Experience => FieldKind::LongText,
            Self::Extracurricular => FieldKind::Choice(&EXTRACURRICULARS),
            Self::PreferredSchedule => FieldKind::Choice(&SCHEDULE_DAYS),
            _ => FieldKind::Text,
        }
    }

    /// Whether the form marks this field as required.
    ///
    /// Optional fields are exactly the ones sent as `null` when left empty.
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            Self::Email
                | Self::ParentName
                | Self::ParentPhone
                | Self::Motivation
                | Self::Experience
                | Self::PreferredSchedule
        )
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Current values of the registration form.
///
/// Every field is a plain string while the form is being edited; an
/// unfilled field is the empty string, never an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub student_name: String,
    pub student_id: String,
    pub grade: String,
    pub class_name: String,
    pub email: String,
    pub phone: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub extracurricular: String,
    pub motivation: String,
    pub experience: String,
    pub preferred_schedule: String,
}

impl RegistrationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::StudentName => &self.student_name,
            FormField::StudentId => &self.student_id,
            FormField::Grade => &self.grade,
            FormField::ClassName => &self.class_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::ParentName => &self.parent_name,
            FormField::ParentPhone => &self.parent_phone,
            FormField::Extracurricular => &self.extracurricular,
            FormField::Motivation => &self.motivation,
            FormField::Experience => &self.experience,
            FormField::PreferredSchedule => &self.preferred_schedule,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::StudentName => &mut self.student_name,
            FormField::StudentId => &mut self.student_id,
            FormField::Grade => &mut self.grade,
            FormField::ClassName => &mut self.class_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::ParentName => &mut self.parent_name,
            FormField::ParentPhone => &mut self.parent_phone,
            FormField::Extracurricular => &mut self.extracurricular,
            FormField::Motivation => &mut self.motivation,
            FormField::Experience => &mut self.experience,
            FormField::PreferredSchedule => &mut self.preferred_schedule,
        }
    }

    /// Overwrite one field, leaving the others untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// True when every field is the empty string.
    pub fn is_blank(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}
