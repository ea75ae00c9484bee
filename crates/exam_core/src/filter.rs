use shared::domain::ExamForm;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Verified,
    Pending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SemesterFilter {
    #[default]
    All,
    Only(i64),
}

/// Ephemeral view state. Never persisted; a default value matches every
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub semester: SemesterFilter,
    /// Case-insensitive substring over the course code and name.
    pub course: String,
    /// Case-insensitive substring over student name, email, and roll number.
    pub search: String,
}

impl FilterCriteria {
    /// A record is included iff every populated criterion matches.
    pub fn matches(&self, form: &ExamForm) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Verified => form.registration.is_verified,
            StatusFilter::Pending => !form.registration.is_verified,
        };
        if !status_ok {
            return false;
        }

        match self.semester {
            SemesterFilter::All => {}
            SemesterFilter::Only(semester) => {
                if form.semester != semester {
                    return false;
                }
            }
        }

        if !self.course.is_empty()
            && !contains_ignore_case(&form.course.code, &self.course)
            && !contains_ignore_case(&form.course.name, &self.course)
        {
            return false;
        }

        if !self.search.is_empty() {
            let roll = form.student.roll_number.to_string();
            if !contains_ignore_case(&form.student.name, &self.search)
                && !contains_ignore_case(&form.student.email, &self.search)
                && !contains_ignore_case(&roll, &self.search)
            {
                return false;
            }
        }

        true
    }
}

/// Derives the visible subset of `forms` without mutating or re-sorting
/// it; insertion order is preserved. Recomputed on every read so a
/// command completing mid-session can never serve a stale view.
pub fn apply(criteria: &FilterCriteria, forms: &[ExamForm]) -> Vec<ExamForm> {
    forms
        .iter()
        .filter(|form| criteria.matches(form))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
