//! Approval lifecycle: `draft -> pending_approval -> {approved | rejected}`.
//!
//! Guards are evaluated against whatever raw status string the caller holds
//! at call time; violations come back as values so the UI can disable or
//! explain the action instead of crashing, and the record is never half
//! mutated.

use thiserror::Error;

use crate::schemas::exam::{ApprovalStatus, ExamDisplay};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("only a draft exam can be submitted for approval (current status: {current})")]
    NotDraft { current: String },
    #[error("only an exam pending approval can be {action} (current status: {current})")]
    NotPending { action: &'static str, current: String },
    #[error("unrecognized exam status '{0}'; action blocked")]
    UnknownStatus(String),
}

/// `draft -> pending_approval`.
pub fn submit_for_approval(current: &str) -> Result<ApprovalStatus, TransitionError> {
    match ApprovalStatus::classify(current) {
        Some(ApprovalStatus::Draft) => Ok(ApprovalStatus::PendingApproval),
        Some(status) => Err(TransitionError::NotDraft { current: status.label().to_string() }),
        None => Err(TransitionError::UnknownStatus(current.to_string())),
    }
}

/// `pending_approval -> approved`.
pub fn approve(current: &str) -> Result<ApprovalStatus, TransitionError> {
    guard_pending(current, "approved").map(|_| ApprovalStatus::Approved)
}

/// `pending_approval -> rejected`.
pub fn reject(current: &str) -> Result<ApprovalStatus, TransitionError> {
    guard_pending(current, "rejected").map(|_| ApprovalStatus::Rejected)
}

fn guard_pending(current: &str, action: &'static str) -> Result<(), TransitionError> {
    match ApprovalStatus::classify(current) {
        Some(ApprovalStatus::PendingApproval) => Ok(()),
        Some(status) => {
            Err(TransitionError::NotPending { action, current: status.label().to_string() })
        }
        None => Err(TransitionError::UnknownStatus(current.to_string())),
    }
}

/// Record-level applier: returns a new record in `pending_approval`.
pub fn submit_exam(exam: &ExamDisplay) -> Result<ExamDisplay, TransitionError> {
    let status = submit_for_approval(&exam.status)?;
    let mut next = exam.clone();
    next.status = status.as_str().to_string();
    Ok(next)
}

/// Record-level applier: returns a new approved record carrying `notes`.
pub fn approve_exam(
    exam: &ExamDisplay,
    notes: Option<String>,
) -> Result<ExamDisplay, TransitionError> {
    let status = approve(&exam.status)?;
    let mut next = exam.clone();
    next.status = status.as_str().to_string();
    next.approval_notes = notes;
    Ok(next)
}

/// Record-level applier: returns a new rejected record carrying `reason`.
pub fn reject_exam(
    exam: &ExamDisplay,
    reason: Option<String>,
) -> Result<ExamDisplay, TransitionError> {
    let status = reject(&exam.status)?;
    let mut next = exam.clone();
    next.status = status.as_str().to_string();
    next.rejection_reason = reason;
    Ok(next)
}

/// Human-readable projection of any raw status string: separators become
/// spaces, words are title-cased ("pending_approval" -> "Pending Approval").
/// Works on already-humanized input too, so it is safe to apply blindly.
pub fn status_label(raw: &str) -> String {
    raw.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_exam() -> ExamDisplay {
        ExamDisplay { status: "pending_approval".to_string(), ..Default::default() }
    }

    #[test]
    fn submit_only_from_draft() {
        assert_eq!(submit_for_approval("draft"), Ok(ApprovalStatus::PendingApproval));
        assert!(matches!(
            submit_for_approval("approved"),
            Err(TransitionError::NotDraft { .. })
        ));
    }

    #[test]
    fn approve_guard_matrix() {
        assert_eq!(approve("pending_approval"), Ok(ApprovalStatus::Approved));
        for blocked in ["draft", "approved", "rejected"] {
            assert!(matches!(approve(blocked), Err(TransitionError::NotPending { .. })));
        }
    }

    #[test]
    fn reject_guard_matrix() {
        assert_eq!(reject("pending_approval"), Ok(ApprovalStatus::Rejected));
        for blocked in ["draft", "approved", "rejected"] {
            assert!(matches!(reject(blocked), Err(TransitionError::NotPending { .. })));
        }
    }

    #[test]
    fn humanized_status_strings_pass_guards() {
        assert_eq!(approve("Pending Approval"), Ok(ApprovalStatus::Approved));
        assert_eq!(submit_for_approval("Draft"), Ok(ApprovalStatus::PendingApproval));
    }

    #[test]
    fn unknown_status_blocks_every_transition() {
        for raw in ["archived", "", "limbo"] {
            assert!(matches!(approve(raw), Err(TransitionError::UnknownStatus(_))));
            assert!(matches!(reject(raw), Err(TransitionError::UnknownStatus(_))));
            assert!(matches!(
                submit_for_approval(raw),
                Err(TransitionError::UnknownStatus(_))
            ));
        }
    }

    #[test]
    fn approve_records_notes_without_touching_the_rest() {
        let exam = pending_exam();
        let approved = approve_exam(&exam, Some("Looks good".to_string())).expect("approved");
        assert_eq!(approved.status, "approved");
        assert_eq!(approved.approval_notes.as_deref(), Some("Looks good"));
        assert_eq!(approved.rejection_reason, None);
    }

    #[test]
    fn reject_records_reason() {
        let exam = pending_exam();
        let rejected = reject_exam(&exam, Some("Marks missing".to_string())).expect("rejected");
        assert_eq!(rejected.status, "rejected");
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Marks missing"));
    }

    #[test]
    fn blocked_transition_leaves_record_untouched() {
        let mut exam = pending_exam();
        exam.status = "approved".to_string();
        let err = approve_exam(&exam, Some("again".to_string())).expect_err("blocked");
        assert!(matches!(err, TransitionError::NotPending { .. }));
        assert_eq!(exam.approval_notes, None);
    }

    #[test]
    fn status_label_title_cases() {
        assert_eq!(status_label("pending_approval"), "Pending Approval");
        assert_eq!(status_label("draft"), "Draft");
        assert_eq!(status_label("Pending Approval"), "Pending Approval");
    }
}
