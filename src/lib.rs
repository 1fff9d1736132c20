//! Exam authoring, normalization, approval, and document-generation core of
//! a school-management system. The HTTP client, persistence, and permission
//! layers live in the host application; this crate owns the question tree,
//! the shape normalizer, the approval state machine, the numbering engine,
//! and the paper renderer.

pub mod core;
pub mod schemas;
pub mod services;

pub use schemas::exam::{ApprovalStatus, ExamDisplay, ExamEdit, SchoolInfo};
pub use services::approval::TransitionError;
pub use services::documents::{document_filename, render, CopyType};
pub use services::normalize::{normalize_display, normalize_edit};
pub use services::workflow::{ExamStore, WorkflowError};
