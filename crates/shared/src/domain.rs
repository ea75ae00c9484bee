use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ExamFormId);
id_newtype!(StudentId);
id_newtype!(CourseId);
id_newtype!(SubjectId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Regular,
    Supplementary,
}

/// Student identity as embedded in an exam form. The console never edits
/// students; this is a read-only reference resolved server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub roll_number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub course_id: CourseId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectEntry {
    pub subject_id: SubjectId,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_marks: Option<f64>,
}

/// Registration lifecycle flags for one exam form.
///
/// `hall_ticket_enabled` and `hall_ticket_held` are set by workflows
/// outside this console; the core reads them but never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRegistration {
    pub is_allowed: bool,
    pub is_submitted: bool,
    pub registration_date: DateTime<Utc>,
    pub is_verified: bool,
    pub hall_ticket_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_ticket_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_ticket_held: Option<bool>,
}

impl ExamRegistration {
    /// A hall ticket issued but withheld from the student is not available.
    pub fn hall_ticket_withheld(&self) -> bool {
        self.hall_ticket_held == Some(true)
    }
}

/// One student's exam registration for one semester/session. Created
/// server-side; the console mutates it only through verification and
/// hall-ticket issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamForm {
    pub form_id: ExamFormId,
    pub student: StudentRef,
    pub course: CourseRef,
    pub semester: i64,
    pub session: String,
    pub exam_type: ExamType,
    pub month: String,
    pub subjects: Vec<SubjectEntry>,
    pub registration: ExamRegistration,
}

/// Population-level counts over the full exam form collection. Always
/// recomputable from the collection; never a source of truth on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    pub hall_ticket_available: u64,
}
