use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ExamFormId,
    error::ApiError,
    protocol::{CommandAck, ExamFormListResponse, GenerateHallTicketRequest},
};
use tracing::debug;

use crate::error::ExamDeskError;

/// Remote registry operations consumed by the console core. The trait
/// seam keeps the executor and controller testable against stubs and
/// confines wire-shape concerns to one implementation.
#[async_trait]
pub trait ExamRegistryApi: Send + Sync {
    async fn fetch_exam_forms(&self) -> Result<ExamFormListResponse, ExamDeskError>;
    async fn verify_exam_form(&self, form_id: ExamFormId) -> Result<(), ExamDeskError>;
    async fn generate_hall_ticket(
        &self,
        form_id: ExamFormId,
        request: GenerateHallTicketRequest,
    ) -> Result<(), ExamDeskError>;
}

/// HTTP implementation against the university registry API. Dynamic
/// error payloads are normalized here into the fixed [`ExamDeskError`]
/// taxonomy before they reach any other component.
pub struct HttpExamRegistryApi {
    http: Client,
    base_url: String,
}

impl HttpExamRegistryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads a command acknowledgement, surfacing the server's message
    /// verbatim when the command was declined.
    async fn read_ack(response: reqwest::Response) -> Result<(), ExamDeskError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiError>()
                .await
                .map(|err| err.message)
                .unwrap_or_else(|_| format!("registry returned {status}"));
            return Err(ExamDeskError::CommandRejected(message));
        }

        let ack: CommandAck = response.json().await.map_err(|err| {
            ExamDeskError::CommandRejected(format!("invalid acknowledgement payload: {err}"))
        })?;
        if !ack.status {
            return Err(ExamDeskError::CommandRejected(ack.message));
        }
        Ok(())
    }
}

#[async_trait]
impl ExamRegistryApi for HttpExamRegistryApi {
    async fn fetch_exam_forms(&self) -> Result<ExamFormListResponse, ExamDeskError> {
        let response = self
            .http
            .get(format!("{}/exam-forms", self.base_url))
            .send()
            .await
            .map_err(|err| ExamDeskError::FetchFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiError>()
                .await
                .map(|err| err.message)
                .unwrap_or_else(|_| format!("registry returned {status}"));
            return Err(ExamDeskError::FetchFailed(message));
        }

        let body: ExamFormListResponse = response
            .json()
            .await
            .map_err(|err| ExamDeskError::FetchFailed(err.to_string()))?;
        if !body.status {
            return Err(ExamDeskError::FetchFailed(body.message));
        }

        debug!(total = body.data.len(), "fetched exam forms");
        Ok(body)
    }

    async fn verify_exam_form(&self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        let response = self
            .http
            .put(format!("{}/exam-forms/{}/verify", self.base_url, form_id.0))
            .send()
            .await
            .map_err(|err| ExamDeskError::CommandRejected(err.to_string()))?;
        Self::read_ack(response).await
    }

    async fn generate_hall_ticket(
        &self,
        form_id: ExamFormId,
        request: GenerateHallTicketRequest,
    ) -> Result<(), ExamDeskError> {
        let response = self
            .http
            .put(format!(
                "{}/exam-forms/{}/hall-ticket",
                self.base_url, form_id.0
            ))
            .json(&request)
            .send()
            .await
            .map_err(|err| ExamDeskError::CommandRejected(err.to_string()))?;
        Self::read_ack(response).await
    }
}
