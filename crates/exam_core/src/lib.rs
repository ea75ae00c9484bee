//! Core of the exam-registration console: the in-memory record store,
//! pure filter/summary projections, the remote command executor, and the
//! view controller that sequences fetch → aggregate → filter → render.
//!
//! The record store is the single source of truth for the session. It is
//! mutated only through a bulk `load` and the two command-confirmed
//! `apply_*` operations; filtered views and summary counts are derived
//! projections recomputed from the current snapshot on every read.

pub mod api;
pub mod controller;
pub mod error;
pub mod executor;
pub mod filter;
pub mod store;
pub mod summary;

pub use api::{ExamRegistryApi, HttpExamRegistryApi};
pub use controller::{ExamDeskController, ExamDeskEvent, ExamDeskView, SessionPhase};
pub use error::ExamDeskError;
pub use executor::CommandExecutor;
pub use filter::{FilterCriteria, SemesterFilter, StatusFilter};
pub use store::ExamRecordStore;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
