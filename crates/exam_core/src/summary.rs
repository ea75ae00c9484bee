use shared::domain::{ExamForm, ExamSummary};

/// Computes population counts over the full, unfiltered collection in a
/// single pass. Counts reflect the population, not the filtered view, so
/// they stay stable while the user narrows the list.
pub fn summarize(forms: &[ExamForm]) -> ExamSummary {
    let mut summary = ExamSummary::default();
    for form in forms {
        summary.total += 1;
        if form.registration.is_verified {
            summary.verified += 1;
        }
        if form.registration.hall_ticket_available {
            summary.hall_ticket_available += 1;
        }
    }
    summary.pending = summary.total - summary.verified;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib_tests::seed_form;
    use shared::domain::ExamFormId;

    #[test]
    fn counts_population_not_view() {
        let forms = vec![
            seed_form(ExamFormId(1), "Rohan Shah", "rohan@example.edu", 101, "BSC", 3, false, false),
            seed_form(ExamFormId(2), "Meera Shah", "meera@example.edu", 102, "BSC", 3, true, true),
            seed_form(ExamFormId(3), "Ishaan Verma", "ishaan@example.edu", 103, "BCA", 1, true, false),
        ];

        let summary = summarize(&forms);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.verified, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.hall_ticket_available, 1);
    }

    #[test]
    fn empty_collection_yields_zero_counts() {
        assert_eq!(summarize(&[]), ExamSummary::default());
    }

    #[test]
    fn recomputing_on_unchanged_input_is_idempotent() {
        let forms = vec![
            seed_form(ExamFormId(1), "Rohan Shah", "rohan@example.edu", 101, "BSC", 3, true, false),
            seed_form(ExamFormId(2), "Meera Shah", "meera@example.edu", 102, "BSC", 2, false, false),
        ];

        assert_eq!(summarize(&forms), summarize(&forms));
    }
}
