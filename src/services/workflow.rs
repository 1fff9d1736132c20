//! Driver for the external exam-storage collaborator.
//!
//! The collaborator owns transport and persistence; this module owns the
//! order of operations around it: validate edit-shape payloads before they
//! leave the core, evaluate approval guards before invoking a transition,
//! and re-normalize every loosely-shaped response before it reaches UI
//! state.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use crate::schemas::exam::{ExamDisplay, ExamEdit};
use crate::services::approval::{self, TransitionError};
use crate::services::normalize::normalize_display;

/// The storage collaborator's surface. Payloads are loose `Value`s on both
/// sides of the wire; the driver normalizes responses and never trusts their
/// shape.
#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn fetch(&self, exam_id: &str) -> anyhow::Result<Value>;
    async fn create(&self, exam: &ExamEdit) -> anyhow::Result<Value>;
    async fn update(&self, exam_id: &str, exam: &ExamEdit) -> anyhow::Result<Value>;
    async fn approve(&self, exam_id: &str, notes: Option<&str>) -> anyhow::Result<Value>;
    async fn reject(&self, exam_id: &str, reason: Option<&str>) -> anyhow::Result<Value>;
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Guard violation; surface the message and leave state untouched.
    #[error(transparent)]
    Blocked(#[from] TransitionError),
    #[error("invalid exam payload: {0}")]
    Invalid(String),
    #[error("exam storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub async fn load_exam(store: &dyn ExamStore, exam_id: &str) -> Result<ExamDisplay, WorkflowError> {
    let raw = store.fetch(exam_id).await?;
    Ok(normalize_display(&raw))
}

/// Create or update depending on whether the record carries an id, then
/// re-normalize whatever the collaborator returned.
pub async fn save_exam(store: &dyn ExamStore, exam: &ExamEdit) -> Result<ExamDisplay, WorkflowError> {
    exam.validate().map_err(|err| WorkflowError::Invalid(err.to_string()))?;

    let raw = match exam.id.as_deref() {
        Some(exam_id) => {
            tracing::debug!(exam_id, "Updating exam");
            store.update(exam_id, exam).await?
        }
        None => {
            tracing::debug!(title = %exam.title, "Creating exam");
            store.create(exam).await?
        }
    };
    Ok(normalize_display(&raw))
}

/// Guard first, collaborator second: a blocked approve never reaches storage.
pub async fn approve_exam(
    store: &dyn ExamStore,
    exam: &ExamDisplay,
    notes: Option<&str>,
) -> Result<ExamDisplay, WorkflowError> {
    approval::approve(&exam.status)?;
    let exam_id = exam
        .id
        .as_deref()
        .ok_or_else(|| WorkflowError::Invalid("exam has no id; save it first".to_string()))?;

    tracing::info!(exam_id, "Approving exam");
    let raw = store.approve(exam_id, notes).await?;
    Ok(normalize_display(&raw))
}

pub async fn reject_exam(
    store: &dyn ExamStore,
    exam: &ExamDisplay,
    reason: Option<&str>,
) -> Result<ExamDisplay, WorkflowError> {
    approval::reject(&exam.status)?;
    let exam_id = exam
        .id
        .as_deref()
        .ok_or_else(|| WorkflowError::Invalid("exam has no id; save it first".to_string()))?;

    tracing::info!(exam_id, "Rejecting exam");
    let raw = store.reject(exam_id, reason).await?;
    Ok(normalize_display(&raw))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    /// Canned-response store that counts transition calls.
    struct StubStore {
        response: Value,
        transition_calls: AtomicUsize,
    }

    impl StubStore {
        fn returning(response: Value) -> Self {
            Self { response, transition_calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl ExamStore for StubStore {
        async fn fetch(&self, _exam_id: &str) -> anyhow::Result<Value> {
            Ok(self.response.clone())
        }

        async fn create(&self, _exam: &ExamEdit) -> anyhow::Result<Value> {
            Ok(self.response.clone())
        }

        async fn update(&self, _exam_id: &str, _exam: &ExamEdit) -> anyhow::Result<Value> {
            Ok(self.response.clone())
        }

        async fn approve(&self, _exam_id: &str, notes: Option<&str>) -> anyhow::Result<Value> {
            self.transition_calls.fetch_add(1, Ordering::SeqCst);
            let mut response = self.response.clone();
            response["status"] = json!("approved");
            response["approval_notes"] = json!(notes);
            Ok(response)
        }

        async fn reject(&self, _exam_id: &str, reason: Option<&str>) -> anyhow::Result<Value> {
            self.transition_calls.fetch_add(1, Ordering::SeqCst);
            let mut response = self.response.clone();
            response["status"] = json!("rejected");
            response["rejection_reason"] = json!(reason);
            Ok(response)
        }
    }

    #[tokio::test]
    async fn load_normalizes_the_raw_response() {
        let store = StubStore::returning(json!({
            "id": 7,
            "title": "Physics Quiz",
            "subject": {"id": 3, "name": "Physics"},
            "objectiveQuestions": {"results": []},
        }));
        let exam = load_exam(&store, "7").await.expect("loaded");
        assert_eq!(exam.id.as_deref(), Some("7"));
        assert_eq!(exam.subject_name, "Physics");
        assert!(exam.objective_questions.is_empty());
    }

    #[tokio::test]
    async fn save_rejects_invalid_payload_before_storage() {
        let store = StubStore::returning(json!({}));
        let exam = ExamEdit { title: String::new(), ..Default::default() };
        let err = save_exam(&store, &exam).await.expect_err("invalid");
        assert!(matches!(err, WorkflowError::Invalid(_)));
    }

    #[tokio::test]
    async fn save_creates_without_id_and_renormalizes() {
        let store = StubStore::returning(json!({"id": "42", "title": "Saved", "status": "draft"}));
        let exam = ExamEdit { title: "Saved".to_string(), ..Default::default() };
        let saved = save_exam(&store, &exam).await.expect("saved");
        assert_eq!(saved.id.as_deref(), Some("42"));
        assert_eq!(saved.status, "draft");
    }

    #[tokio::test]
    async fn approve_requires_pending_status() {
        let store = StubStore::returning(json!({"id": "9", "status": "draft"}));
        let exam = ExamDisplay {
            id: Some("9".to_string()),
            status: "draft".to_string(),
            ..Default::default()
        };
        let err = approve_exam(&store, &exam, Some("ok")).await.expect_err("blocked");
        assert!(matches!(err, WorkflowError::Blocked(TransitionError::NotPending { .. })));
        // The guard short-circuits before the collaborator is invoked.
        assert_eq!(store.transition_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn approve_calls_storage_and_returns_the_new_record() {
        let store = StubStore::returning(json!({"id": "9", "status": "pending_approval"}));
        let exam = ExamDisplay {
            id: Some("9".to_string()),
            status: "pending_approval".to_string(),
            ..Default::default()
        };
        let approved = approve_exam(&store, &exam, Some("Well set")).await.expect("approved");
        assert_eq!(approved.status, "approved");
        assert_eq!(approved.approval_notes.as_deref(), Some("Well set"));
        assert_eq!(store.transition_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reject_with_humanized_status_still_passes_guard() {
        let store = StubStore::returning(json!({"id": "9", "status": "Pending Approval"}));
        let exam = ExamDisplay {
            id: Some("9".to_string()),
            status: "Pending Approval".to_string(),
            ..Default::default()
        };
        let rejected = reject_exam(&store, &exam, Some("Too short")).await.expect("rejected");
        assert_eq!(rejected.status, "rejected");
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Too short"));
    }
}
