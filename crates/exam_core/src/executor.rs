use std::{collections::HashSet, sync::Arc};

use shared::{domain::ExamFormId, protocol::GenerateHallTicketRequest};
use tokio::sync::Mutex;
use tracing::info;

use crate::{api::ExamRegistryApi, error::ExamDeskError, store::ExamRecordStore};

/// Drives verification and hall-ticket issuance against the remote
/// registry and reconciles the store on confirmed success only.
///
/// At most one command per exam form may be in flight; a concurrent
/// duplicate is rejected with `CommandInProgress` rather than queued,
/// which keeps a double click from issuing two hall-ticket requests.
/// Commands are never retried implicitly; retry is a fresh invocation.
pub struct CommandExecutor {
    api: Arc<dyn ExamRegistryApi>,
    in_flight: Mutex<HashSet<ExamFormId>>,
}

impl CommandExecutor {
    pub fn new(api: Arc<dyn ExamRegistryApi>) -> Self {
        Self {
            api,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Drops stale per-record markers after a bulk load. Any command
    /// still awaiting a response will release its own marker on
    /// completion; its store write then lands on the fresh snapshot.
    pub async fn clear_in_flight(&self) {
        self.in_flight.lock().await.clear();
    }

    pub async fn verify(
        &self,
        store: &Mutex<ExamRecordStore>,
        form_id: ExamFormId,
    ) -> Result<(), ExamDeskError> {
        self.begin(form_id).await?;
        let result = self.verify_inner(store, form_id).await;
        self.finish(form_id).await;
        result
    }

    pub async fn generate_hall_ticket(
        &self,
        store: &Mutex<ExamRecordStore>,
        form_id: ExamFormId,
    ) -> Result<(), ExamDeskError> {
        self.begin(form_id).await?;
        let result = self.generate_hall_ticket_inner(store, form_id).await;
        self.finish(form_id).await;
        result
    }

    async fn begin(&self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        let mut in_flight = self.in_flight.lock().await;
        if !in_flight.insert(form_id) {
            return Err(ExamDeskError::CommandInProgress(form_id));
        }
        Ok(())
    }

    async fn finish(&self, form_id: ExamFormId) {
        self.in_flight.lock().await.remove(&form_id);
    }

    async fn verify_inner(
        &self,
        store: &Mutex<ExamRecordStore>,
        form_id: ExamFormId,
    ) -> Result<(), ExamDeskError> {
        {
            let store = store.lock().await;
            if store.get(form_id).is_none() {
                return Err(ExamDeskError::NotFound(form_id));
            }
        }

        self.api.verify_exam_form(form_id).await?;
        store.lock().await.apply_verification(form_id)?;
        info!(form_id = form_id.0, "exam form verified");
        Ok(())
    }

    async fn generate_hall_ticket_inner(
        &self,
        store: &Mutex<ExamRecordStore>,
        form_id: ExamFormId,
    ) -> Result<(), ExamDeskError> {
        // Fail fast on the local snapshot before any network traffic.
        let request = {
            let store = store.lock().await;
            let form = store.get(form_id).ok_or(ExamDeskError::NotFound(form_id))?;
            if !form.registration.is_verified || form.registration.hall_ticket_withheld() {
                return Err(ExamDeskError::PreconditionFailed(form_id));
            }
            GenerateHallTicketRequest {
                student_id: form.student.student_id,
                course_id: form.course.course_id,
                semester: form.semester,
            }
        };

        self.api.generate_hall_ticket(form_id, request).await?;
        store.lock().await.apply_hall_ticket_issuance(form_id)?;
        info!(form_id = form_id.0, "hall ticket issued");
        Ok(())
    }
}
