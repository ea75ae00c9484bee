use shared::domain::{ExamForm, ExamFormId, ExamSummary};

use crate::{error::ExamDeskError, summary};

/// Authoritative in-memory collection of exam forms for the active
/// session. Mutated only through [`load`](Self::load) and the two
/// `apply_*` operations; a failed mutation leaves the store unchanged.
///
/// Invariants upheld after every successful mutation:
/// a hall ticket is never available on an unverified form, and a held
/// ticket is never simultaneously available.
#[derive(Debug, Default)]
pub struct ExamRecordStore {
    forms: Vec<ExamForm>,
    summary: ExamSummary,
}

impl ExamRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire collection and summary atomically after a
    /// full fetch.
    pub fn load(&mut self, forms: Vec<ExamForm>, summary: ExamSummary) {
        self.forms = forms;
        self.summary = summary;
    }

    pub fn forms(&self) -> &[ExamForm] {
        &self.forms
    }

    pub fn summary(&self) -> ExamSummary {
        self.summary
    }

    pub fn get(&self, form_id: ExamFormId) -> Option<&ExamForm> {
        self.forms.iter().find(|form| form.form_id == form_id)
    }

    /// Marks the matching record verified and recomputes the summary.
    pub fn apply_verification(&mut self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        let form = self
            .forms
            .iter_mut()
            .find(|form| form.form_id == form_id)
            .ok_or(ExamDeskError::NotFound(form_id))?;

        form.registration.is_verified = true;
        self.summary = summary::summarize(&self.forms);
        Ok(())
    }

    /// Marks the hall ticket available on the matching record. The
    /// verification precondition is enforced here as well as in the
    /// executor: the server is the authority, but the store never
    /// accepts a write that would break its own invariant.
    pub fn apply_hall_ticket_issuance(&mut self, form_id: ExamFormId) -> Result<(), ExamDeskError> {
        let form = self
            .forms
            .iter_mut()
            .find(|form| form.form_id == form_id)
            .ok_or(ExamDeskError::NotFound(form_id))?;

        if !form.registration.is_verified || form.registration.hall_ticket_withheld() {
            return Err(ExamDeskError::PreconditionFailed(form_id));
        }

        form.registration.hall_ticket_available = true;
        self.summary = summary::summarize(&self.forms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib_tests::seed_form;

    fn loaded_store() -> ExamRecordStore {
        let forms = vec![
            seed_form(ExamFormId(1), "Rohan Shah", "rohan@example.edu", 101, "BSC", 3, false, false),
            seed_form(ExamFormId(2), "Meera Shah", "meera@example.edu", 102, "BSC", 3, false, false),
            seed_form(ExamFormId(3), "Ishaan Verma", "ishaan@example.edu", 103, "BCA", 1, true, true),
        ];
        let summary = summary::summarize(&forms);
        let mut store = ExamRecordStore::new();
        store.load(forms, summary);
        store
    }

    fn invariant_holds(store: &ExamRecordStore) -> bool {
        store.forms().iter().all(|form| {
            let reg = &form.registration;
            (!reg.hall_ticket_available || reg.is_verified)
                && !(reg.hall_ticket_available && reg.hall_ticket_withheld())
        })
    }

    #[test]
    fn load_replaces_collection_and_summary() {
        let store = loaded_store();
        assert_eq!(store.forms().len(), 3);
        assert_eq!(store.summary().total, 3);
        assert_eq!(store.summary().verified, 1);
        assert_eq!(store.summary().pending, 2);
        assert_eq!(store.summary().hall_ticket_available, 1);
    }

    #[test]
    fn verification_updates_only_the_target_record() {
        let mut store = loaded_store();
        store.apply_verification(ExamFormId(1)).expect("verify");

        assert!(store.get(ExamFormId(1)).expect("form").registration.is_verified);
        assert!(!store.get(ExamFormId(2)).expect("form").registration.is_verified);
        assert_eq!(store.summary().verified, 2);
        assert_eq!(store.summary().pending, 1);
        assert!(invariant_holds(&store));
    }

    #[test]
    fn verification_of_unknown_id_reports_not_found_and_changes_nothing() {
        let mut store = loaded_store();
        let before = store.summary();

        let err = store.apply_verification(ExamFormId(999)).expect_err("absent");
        assert!(matches!(err, ExamDeskError::NotFound(ExamFormId(999))));
        assert_eq!(store.summary(), before);
    }

    #[test]
    fn hall_ticket_issuance_requires_verification() {
        let mut store = loaded_store();

        let err = store
            .apply_hall_ticket_issuance(ExamFormId(1))
            .expect_err("unverified");
        assert!(matches!(err, ExamDeskError::PreconditionFailed(ExamFormId(1))));
        assert!(!store
            .get(ExamFormId(1))
            .expect("form")
            .registration
            .hall_ticket_available);
        assert!(invariant_holds(&store));

        store.apply_verification(ExamFormId(1)).expect("verify");
        store
            .apply_hall_ticket_issuance(ExamFormId(1))
            .expect("issue after verification");
        assert!(store
            .get(ExamFormId(1))
            .expect("form")
            .registration
            .hall_ticket_available);
        assert_eq!(store.summary().hall_ticket_available, 2);
        assert!(invariant_holds(&store));
    }

    #[test]
    fn hall_ticket_issuance_rejects_held_tickets() {
        let mut store = loaded_store();
        store.apply_verification(ExamFormId(2)).expect("verify");
        {
            // Simulate the externally-set hold flag arriving with the fetch.
            let mut forms = store.forms().to_vec();
            forms[1].registration.hall_ticket_held = Some(true);
            let summary = summary::summarize(&forms);
            store.load(forms, summary);
        }

        let err = store
            .apply_hall_ticket_issuance(ExamFormId(2))
            .expect_err("held ticket");
        assert!(matches!(err, ExamDeskError::PreconditionFailed(ExamFormId(2))));
        assert!(invariant_holds(&store));
    }
}
