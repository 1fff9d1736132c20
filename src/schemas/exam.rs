use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};
use validator::Validate;

use crate::schemas::question::{
    CustomSection, ObjectiveQuestion, PracticalQuestion, TheoryQuestion,
};

/// Lifecycle status of an exam record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Classify a raw status string. Accepts the machine form exactly
    /// ("pending_approval") and falls back to substring matching so that
    /// pre-humanized backend values ("Pending Approval") still classify.
    /// Unrecognized strings return `None`; callers must treat that as a
    /// blocked state, never guess.
    pub fn classify(raw: &str) -> Option<Self> {
        match raw.trim() {
            "draft" => return Some(Self::Draft),
            "pending_approval" => return Some(Self::PendingApproval),
            "approved" => return Some(Self::Approved),
            "rejected" => return Some(Self::Rejected),
            _ => {}
        }

        let lowered = raw.to_ascii_lowercase();
        if lowered.contains("pending") {
            Some(Self::PendingApproval)
        } else if lowered.contains("approved") {
            Some(Self::Approved)
        } else if lowered.contains("rejected") {
            Some(Self::Rejected)
        } else if lowered.contains("draft") {
            Some(Self::Draft)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingApproval => "Pending Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// School identity printed in document headers. The host application's
/// settings store supplies this; every field falls back to a placeholder so
/// rendering never depends on it being configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolInfo {
    #[serde(default = "default_school_name", alias = "schoolName")]
    pub school_name: String,
    #[serde(default = "default_school_address", alias = "schoolAddress")]
    pub school_address: String,
    #[serde(default = "default_academic_session", alias = "academicSession")]
    pub academic_session: String,
    #[serde(default = "default_current_term", alias = "currentTerm")]
    pub current_term: String,
}

impl Default for SchoolInfo {
    fn default() -> Self {
        Self {
            school_name: default_school_name(),
            school_address: default_school_address(),
            academic_session: default_academic_session(),
            current_term: default_current_term(),
        }
    }
}

/// Fully defaulted, read-safe shape of an exam record. Foreign keys are
/// scalar ids with a sibling `*_name` label where the wire value carried one.
/// Produced by `services::normalize::normalize_display`; safe to render
/// without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExamDisplay {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "subjectName")]
    pub subject_name: String,
    #[serde(default, alias = "gradeLevel")]
    pub grade_level: Option<String>,
    #[serde(default, alias = "gradeLevelName")]
    pub grade_level_name: String,
    #[serde(default, alias = "stream")]
    pub section: Option<String>,
    #[serde(default, alias = "sectionName")]
    pub section_name: String,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default, alias = "teacherName")]
    pub teacher_name: String,
    #[serde(default, alias = "examDate")]
    pub exam_date: String,
    #[serde(default, alias = "startTime")]
    pub start_time: String,
    #[serde(default, alias = "endTime")]
    pub end_time: String,
    #[serde(default, alias = "durationMinutes")]
    pub duration_minutes: u32,
    #[serde(default, alias = "totalMarks")]
    pub total_marks: u32,
    #[serde(default, alias = "passMarks")]
    pub pass_marks: Option<u32>,
    #[serde(default)]
    pub venue: String,
    #[serde(default, alias = "maxStudents")]
    pub max_students: Option<u32>,
    #[serde(default, alias = "examType")]
    pub exam_type: String,
    #[serde(default, alias = "difficultyLevel")]
    pub difficulty_level: String,
    #[serde(default, alias = "isPractical")]
    pub is_practical: bool,
    #[serde(default, alias = "requiresComputer")]
    pub requires_computer: bool,
    #[serde(default, alias = "isOnline")]
    pub is_online: bool,
    #[serde(default, alias = "objectiveQuestions")]
    pub objective_questions: Vec<ObjectiveQuestion>,
    #[serde(default, alias = "theoryQuestions")]
    pub theory_questions: Vec<TheoryQuestion>,
    #[serde(default, alias = "practicalQuestions")]
    pub practical_questions: Vec<PracticalQuestion>,
    #[serde(default, alias = "customSections")]
    pub custom_sections: Vec<CustomSection>,
    #[serde(default, alias = "objectiveInstructions")]
    pub objective_instructions: String,
    #[serde(default, alias = "theoryInstructions")]
    pub theory_instructions: String,
    #[serde(default, alias = "practicalInstructions")]
    pub practical_instructions: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "approvalNotes")]
    pub approval_notes: Option<String>,
    #[serde(default, alias = "rejectionReason")]
    pub rejection_reason: Option<String>,
}

impl ExamDisplay {
    /// Tolerant view of the raw `status` field.
    pub fn approval_status(&self) -> Option<ApprovalStatus> {
        ApprovalStatus::classify(&self.status)
    }
}

/// Form-bindable shape: foreign keys are guaranteed scalar ids and numeric
/// fields are absent rather than zeroed when the source never carried them.
/// Validated before being handed to the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Validate)]
pub struct ExamEdit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "gradeLevel")]
    pub grade_level: Option<String>,
    #[serde(default, alias = "stream")]
    pub section: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default, alias = "examDate")]
    pub exam_date: String,
    #[serde(default, alias = "startTime")]
    pub start_time: String,
    #[serde(default, alias = "endTime")]
    pub end_time: String,
    #[serde(default, alias = "durationMinutes")]
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<u32>,
    #[serde(default, alias = "totalMarks")]
    pub total_marks: Option<u32>,
    #[serde(default, alias = "passMarks")]
    pub pass_marks: Option<u32>,
    #[serde(default)]
    pub venue: String,
    #[serde(default, alias = "maxStudents")]
    #[validate(range(min = 1, message = "max_students must be positive"))]
    pub max_students: Option<u32>,
    #[serde(default, alias = "examType")]
    pub exam_type: String,
    #[serde(default, alias = "difficultyLevel")]
    pub difficulty_level: String,
    #[serde(default, alias = "isPractical")]
    pub is_practical: bool,
    #[serde(default, alias = "requiresComputer")]
    pub requires_computer: bool,
    #[serde(default, alias = "isOnline")]
    pub is_online: bool,
    #[serde(default, alias = "objectiveQuestions")]
    pub objective_questions: Vec<ObjectiveQuestion>,
    #[serde(default, alias = "theoryQuestions")]
    pub theory_questions: Vec<TheoryQuestion>,
    #[serde(default, alias = "practicalQuestions")]
    pub practical_questions: Vec<PracticalQuestion>,
    #[serde(default, alias = "customSections")]
    pub custom_sections: Vec<CustomSection>,
    #[serde(default, alias = "objectiveInstructions")]
    pub objective_instructions: String,
    #[serde(default, alias = "theoryInstructions")]
    pub theory_instructions: String,
    #[serde(default, alias = "practicalInstructions")]
    pub practical_instructions: String,
}

/// Pretty-print an ISO date ("2026-03-04" -> "4 March 2026") for document
/// headers. Anything unparseable passes through untouched; date fields
/// arrive from forms and storage in more than one shape.
pub(crate) fn format_exam_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let iso = format_description!("[year]-[month]-[day]");
    match Date::parse(trimmed, &iso) {
        Ok(date) => {
            let pretty = format_description!("[day padding:none] [month repr:long] [year]");
            date.format(&pretty).unwrap_or_else(|_| trimmed.to_string())
        }
        Err(_) => trimmed.to_string(),
    }
}

fn default_school_name() -> String {
    "School Name".to_string()
}

fn default_school_address() -> String {
    "School Address".to_string()
}

fn default_academic_session() -> String {
    "Academic Session".to_string()
}

fn default_current_term() -> String {
    "Term".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_accepts_machine_form() {
        assert_eq!(
            ApprovalStatus::classify("pending_approval"),
            Some(ApprovalStatus::PendingApproval)
        );
        assert_eq!(ApprovalStatus::classify("draft"), Some(ApprovalStatus::Draft));
    }

    #[test]
    fn classify_accepts_humanized_form() {
        assert_eq!(
            ApprovalStatus::classify("Pending Approval"),
            Some(ApprovalStatus::PendingApproval)
        );
        assert_eq!(ApprovalStatus::classify("Approved"), Some(ApprovalStatus::Approved));
        assert_eq!(ApprovalStatus::classify("Rejected"), Some(ApprovalStatus::Rejected));
    }

    #[test]
    fn classify_rejects_unknown() {
        assert_eq!(ApprovalStatus::classify("archived"), None);
        assert_eq!(ApprovalStatus::classify(""), None);
    }

    #[test]
    fn format_exam_date_prettifies_iso() {
        assert_eq!(format_exam_date("2026-03-04"), "4 March 2026");
    }

    #[test]
    fn format_exam_date_passes_through_other_shapes() {
        assert_eq!(format_exam_date("04/03/2026"), "04/03/2026");
        assert_eq!(format_exam_date(""), "");
    }
}
