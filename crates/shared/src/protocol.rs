use serde::{Deserialize, Serialize};

use crate::domain::{CourseId, ExamForm, ExamSummary, StudentId};

/// Response body of `GET /exam-forms`: the full collection plus the
/// server-computed population summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamFormListResponse {
    pub data: Vec<ExamForm>,
    pub summary: ExamSummary,
    pub status: bool,
    pub message: String,
}

/// Request body of `PUT /exam-forms/{id}/hall-ticket`. The form id rides
/// in the path; the rest identifies the issuance target server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHallTicketRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester: i64,
}

/// Success/failure indication for verification and hall-ticket issuance.
/// `status == false` means the server declined the command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandAck {
    pub status: bool,
    pub message: String,
}
