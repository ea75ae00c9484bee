use std::sync::Arc;

use shared::domain::{ExamForm, ExamFormId, ExamSummary};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::{
    api::ExamRegistryApi,
    error::ExamDeskError,
    executor::CommandExecutor,
    filter::{self, FilterCriteria},
    store::ExamRecordStore,
};

/// Session lifecycle: `Uninitialized → Loading → Ready`. Fetch completion
/// always lands in `Ready`, carrying the failure message when the refresh
/// cycle failed; filter changes and commands never leave `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Ready { error: Option<String> },
}

#[derive(Debug, Clone)]
pub enum ExamDeskEvent {
    FormsLoaded { total: u64 },
    FetchFailed(String),
    FiltersChanged(FilterCriteria),
    FormVerified(ExamFormId),
    HallTicketIssued(ExamFormId),
    CommandFailed { form_id: ExamFormId, reason: String },
}

/// Read-only snapshot handed to the presentation layer: the filtered
/// view plus the population summary and the state it was derived from.
#[derive(Debug, Clone)]
pub struct ExamDeskView {
    pub forms: Vec<ExamForm>,
    pub summary: ExamSummary,
    pub criteria: FilterCriteria,
    pub phase: SessionPhase,
}

/// Orchestrates fetch → aggregate → filter and routes user intents to
/// the executor. Owns the record store for the lifetime of the session;
/// no other component mutates it.
pub struct ExamDeskController {
    api: Arc<dyn ExamRegistryApi>,
    store: Mutex<ExamRecordStore>,
    executor: CommandExecutor,
    criteria: Mutex<FilterCriteria>,
    phase: Mutex<SessionPhase>,
    events: broadcast::Sender<ExamDeskEvent>,
}

impl ExamDeskController {
    pub fn new(api: Arc<dyn ExamRegistryApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api: Arc::clone(&api),
            store: Mutex::new(ExamRecordStore::new()),
            executor: CommandExecutor::new(api),
            criteria: Mutex::new(FilterCriteria::default()),
            phase: Mutex::new(SessionPhase::Uninitialized),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ExamDeskEvent> {
        self.events.subscribe()
    }

    /// Full fetch. On failure the previous snapshot is kept and the
    /// failure message is carried in the session phase; the caller may
    /// retry with another `refresh`.
    pub async fn refresh(&self) -> Result<(), ExamDeskError> {
        *self.phase.lock().await = SessionPhase::Loading;

        match self.api.fetch_exam_forms().await {
            Ok(response) => {
                let total = response.summary.total;
                self.store.lock().await.load(response.data, response.summary);
                self.executor.clear_in_flight().await;
                *self.phase.lock().await = SessionPhase::Ready { error: None };
                info!(total, "exam forms loaded");
                let _ = self.events.send(ExamDeskEvent::FormsLoaded { total });
                Ok(())
            }
            Err(err) => {
                warn!("exam form fetch failed: {err}");
                *self.phase.lock().await = SessionPhase::Ready {
                    error: Some(err.to_string()),
                };
                let _ = self.events.send(ExamDeskEvent::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Pure local state change; never blocks on the network.
    pub async fn set_filters(&self, criteria: FilterCriteria) {
        *self.criteria.lock().await = criteria.clone();
        let _ = self.events.send(ExamDeskEvent::FiltersChanged(criteria));
    }

    pub async fn reset_filters(&self) {
        self.set_filters(FilterCriteria::default()).await;
    }

    pub async fn verify(&self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        match self.executor.verify(&self.store, form_id).await {
            Ok(()) => {
                let _ = self.events.send(ExamDeskEvent::FormVerified(form_id));
                Ok(())
            }
            Err(err) => {
                warn!(form_id = form_id.0, "verification failed: {err}");
                let _ = self.events.send(ExamDeskEvent::CommandFailed {
                    form_id,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub async fn generate_hall_ticket(&self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        match self.executor.generate_hall_ticket(&self.store, form_id).await {
            Ok(()) => {
                let _ = self.events.send(ExamDeskEvent::HallTicketIssued(form_id));
                Ok(())
            }
            Err(err) => {
                warn!(form_id = form_id.0, "hall ticket issuance failed: {err}");
                let _ = self.events.send(ExamDeskEvent::CommandFailed {
                    form_id,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Derives the current view from the store snapshot. Recomputed on
    /// every call; results are never cached across store mutations or
    /// criteria changes.
    pub async fn view(&self) -> ExamDeskView {
        let criteria = self.criteria.lock().await.clone();
        let (forms, summary) = {
            let store = self.store.lock().await;
            (filter::apply(&criteria, store.forms()), store.summary())
        };
        let phase = self.phase.lock().await.clone();
        ExamDeskView {
            forms,
            summary,
            criteria,
            phase,
        }
    }
}
