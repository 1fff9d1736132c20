//! Total, idempotent normalization of exam records of unknown provenance.
//!
//! Storage responses, half-filled form state, and JSON round-trips all land
//! here before the rest of the core touches them. Every accessor substitutes
//! a safe default for anything unrecognized, so normalization never fails;
//! re-normalizing an already-normalized record yields an equal value.

use serde_json::Value;

use crate::schemas::exam::{ExamDisplay, ExamEdit};
use crate::schemas::question::{
    CustomQuestion, CustomSection, ObjectiveQuestion, PracticalQuestion, SubQuestion,
    SubSubQuestion, TheoryQuestion,
};

/// Normalize into the read-safe display shape: collections are concrete
/// vectors, foreign keys are scalar ids with a sibling `*_name` label, and
/// every optional string defaults to `""`.
pub fn normalize_display(raw: &Value) -> ExamDisplay {
    let (subject, subject_name) = foreign_key(raw, &["subject"], &["subject_name", "subjectName"]);
    let (grade_level, grade_level_name) =
        foreign_key(raw, &["grade_level", "gradeLevel"], &["grade_level_name", "gradeLevelName"]);
    let (section, section_name) =
        foreign_key(raw, &["section", "stream"], &["section_name", "sectionName"]);
    let (teacher, teacher_name) = foreign_key(raw, &["teacher"], &["teacher_name", "teacherName"]);

    ExamDisplay {
        id: scalar_id(field(raw, &["id"])),
        title: string_field(raw, &["title"]),
        description: string_field(raw, &["description"]),
        subject,
        subject_name,
        grade_level,
        grade_level_name,
        section,
        section_name,
        teacher,
        teacher_name,
        exam_date: string_field(raw, &["exam_date", "examDate"]),
        start_time: string_field(raw, &["start_time", "startTime"]),
        end_time: string_field(raw, &["end_time", "endTime"]),
        duration_minutes: u32_field(raw, &["duration_minutes", "durationMinutes"]),
        total_marks: u32_field(raw, &["total_marks", "totalMarks"]),
        pass_marks: opt_u32_field(raw, &["pass_marks", "passMarks"]),
        venue: string_field(raw, &["venue"]),
        max_students: opt_u32_field(raw, &["max_students", "maxStudents"]),
        exam_type: string_field(raw, &["exam_type", "examType"]),
        difficulty_level: string_field(raw, &["difficulty_level", "difficultyLevel"]),
        is_practical: bool_field(raw, &["is_practical", "isPractical"]),
        requires_computer: bool_field(raw, &["requires_computer", "requiresComputer"]),
        is_online: bool_field(raw, &["is_online", "isOnline"]),
        objective_questions: collection(raw, &["objective_questions", "objectiveQuestions"])
            .iter()
            .map(objective_question)
            .collect(),
        theory_questions: collection(raw, &["theory_questions", "theoryQuestions"])
            .iter()
            .map(theory_question)
            .collect(),
        practical_questions: collection(raw, &["practical_questions", "practicalQuestions"])
            .iter()
            .map(practical_question)
            .collect(),
        custom_sections: collection(raw, &["custom_sections", "customSections"])
            .iter()
            .map(custom_section)
            .collect(),
        objective_instructions: string_field(
            raw,
            &["objective_instructions", "objectiveInstructions"],
        ),
        theory_instructions: string_field(raw, &["theory_instructions", "theoryInstructions"]),
        practical_instructions: string_field(
            raw,
            &["practical_instructions", "practicalInstructions"],
        ),
        status: string_field(raw, &["status"]),
        approval_notes: opt_string_field(raw, &["approval_notes", "approvalNotes"]),
        rejection_reason: opt_string_field(raw, &["rejection_reason", "rejectionReason"]),
    }
}

/// Normalize into the form-bindable edit shape: same collection guarantees,
/// foreign keys reduced to pure scalar ids (selector controls cannot bind
/// nested objects), numeric fields absent rather than zeroed when missing.
pub fn normalize_edit(raw: &Value) -> ExamEdit {
    let (subject, _) = foreign_key(raw, &["subject"], &[]);
    let (grade_level, _) = foreign_key(raw, &["grade_level", "gradeLevel"], &[]);
    let (section, _) = foreign_key(raw, &["section", "stream"], &[]);
    let (teacher, _) = foreign_key(raw, &["teacher"], &[]);

    ExamEdit {
        id: scalar_id(field(raw, &["id"])),
        title: string_field(raw, &["title"]),
        description: string_field(raw, &["description"]),
        subject,
        grade_level,
        section,
        teacher,
        exam_date: string_field(raw, &["exam_date", "examDate"]),
        start_time: string_field(raw, &["start_time", "startTime"]),
        end_time: string_field(raw, &["end_time", "endTime"]),
        duration_minutes: opt_u32_field(raw, &["duration_minutes", "durationMinutes"]),
        total_marks: opt_u32_field(raw, &["total_marks", "totalMarks"]),
        pass_marks: opt_u32_field(raw, &["pass_marks", "passMarks"]),
        venue: string_field(raw, &["venue"]),
        max_students: opt_u32_field(raw, &["max_students", "maxStudents"]),
        exam_type: string_field(raw, &["exam_type", "examType"]),
        difficulty_level: string_field(raw, &["difficulty_level", "difficultyLevel"]),
        is_practical: bool_field(raw, &["is_practical", "isPractical"]),
        requires_computer: bool_field(raw, &["requires_computer", "requiresComputer"]),
        is_online: bool_field(raw, &["is_online", "isOnline"]),
        objective_questions: collection(raw, &["objective_questions", "objectiveQuestions"])
            .iter()
            .map(objective_question)
            .collect(),
        theory_questions: collection(raw, &["theory_questions", "theoryQuestions"])
            .iter()
            .map(theory_question)
            .collect(),
        practical_questions: collection(raw, &["practical_questions", "practicalQuestions"])
            .iter()
            .map(practical_question)
            .collect(),
        custom_sections: collection(raw, &["custom_sections", "customSections"])
            .iter()
            .map(custom_section)
            .collect(),
        objective_instructions: string_field(
            raw,
            &["objective_instructions", "objectiveInstructions"],
        ),
        theory_instructions: string_field(raw, &["theory_instructions", "theoryInstructions"]),
        practical_instructions: string_field(
            raw,
            &["practical_instructions", "practicalInstructions"],
        ),
    }
}

// --- field accessors -------------------------------------------------------

fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter().find_map(|key| object.get(*key)).filter(|v| !v.is_null())
}

/// Accept an array as-is, unwrap a paginated `{results: [...]}` envelope,
/// and turn anything else into the empty collection.
fn collection<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    match field(value, keys) {
        Some(Value::Array(items)) => items,
        Some(Value::Object(envelope)) => match envelope.get("results") {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        _ => &[],
    }
}

/// A foreign key may arrive as a scalar id, a stringified number, or a
/// nested `{id, name}` object. Returns the scalar id plus the best label we
/// can find: the nested object's `name`, or a sibling `*_name` field.
fn foreign_key(value: &Value, keys: &[&str], name_keys: &[&str]) -> (Option<String>, String) {
    let sibling_name = string_field(value, name_keys);
    match field(value, keys) {
        Some(Value::Object(nested)) => {
            let id = nested.get("id").and_then(scalar);
            let name = nested
                .get("name")
                .and_then(scalar)
                .filter(|n| !n.is_empty())
                .unwrap_or(sibling_name);
            (id, name)
        }
        Some(other) => (scalar(other), sibling_name),
        None => (None, sibling_name),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_id(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Object(nested)) => nested.get("id").and_then(scalar),
        Some(other) => scalar(other),
        None => None,
    }
}

fn string_field(value: &Value, keys: &[&str]) -> String {
    match field(value, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn opt_string_field(value: &Value, keys: &[&str]) -> Option<String> {
    match field(value, keys) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Non-negative integer out of a number or a numeric string (form inputs
/// often round-trip as strings). Negative and fractional garbage clamps to 0.
fn u32_field(value: &Value, keys: &[&str]) -> u32 {
    opt_u32_field(value, keys).unwrap_or(0)
}

fn opt_u32_field(value: &Value, keys: &[&str]) -> Option<u32> {
    match field(value, keys)? {
        Value::Number(n) => {
            if let Some(unsigned) = n.as_u64() {
                Some(unsigned.min(u32::MAX as u64) as u32)
            } else {
                // Negative or fractional: clamp rather than drop the field.
                Some(0)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse::<u32>().unwrap_or(0))
            }
        }
        _ => None,
    }
}

fn bool_field(value: &Value, keys: &[&str]) -> bool {
    match field(value, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// --- question normalizers --------------------------------------------------

fn objective_question(value: &Value) -> ObjectiveQuestion {
    ObjectiveQuestion {
        id: string_field(value, &["id"]),
        question: string_field(value, &["question"]),
        option_a: string_field(value, &["option_a", "optionA"]),
        option_b: string_field(value, &["option_b", "optionB"]),
        option_c: string_field(value, &["option_c", "optionC"]),
        option_d: string_field(value, &["option_d", "optionD"]),
        correct_answer: string_field(value, &["correct_answer", "correctAnswer"]),
        marks: u32_field(value, &["marks"]),
    }
}

fn theory_question(value: &Value) -> TheoryQuestion {
    TheoryQuestion {
        id: string_field(value, &["id"]),
        question: string_field(value, &["question"]),
        expected_points: string_field(value, &["expected_points", "expectedPoints"]),
        marks: u32_field(value, &["marks"]),
        word_limit: opt_u32_field(value, &["word_limit", "wordLimit"]),
        sub_questions: collection(value, &["sub_questions", "subQuestions"])
            .iter()
            .map(sub_question)
            .collect(),
    }
}

fn sub_question(value: &Value) -> SubQuestion {
    SubQuestion {
        id: string_field(value, &["id"]),
        question: string_field(value, &["question"]),
        expected_points: string_field(value, &["expected_points", "expectedPoints"]),
        marks: u32_field(value, &["marks"]),
        word_limit: opt_u32_field(value, &["word_limit", "wordLimit"]),
        sub_sub_questions: collection(value, &["sub_sub_questions", "subSubQuestions"])
            .iter()
            .map(sub_sub_question)
            .collect(),
    }
}

fn sub_sub_question(value: &Value) -> SubSubQuestion {
    SubSubQuestion {
        id: string_field(value, &["id"]),
        question: string_field(value, &["question"]),
        expected_points: string_field(value, &["expected_points", "expectedPoints"]),
        marks: u32_field(value, &["marks"]),
        word_limit: opt_u32_field(value, &["word_limit", "wordLimit"]),
    }
}

fn practical_question(value: &Value) -> PracticalQuestion {
    PracticalQuestion {
        id: string_field(value, &["id"]),
        task: string_field(value, &["task"]),
        materials: string_field(value, &["materials"]),
        expected_outcome: string_field(value, &["expected_outcome", "expectedOutcome"]),
        marks: u32_field(value, &["marks"]),
        time_limit: opt_u32_field(value, &["time_limit", "timeLimit"]),
    }
}

fn custom_section(value: &Value) -> CustomSection {
    CustomSection {
        id: string_field(value, &["id"]),
        name: string_field(value, &["name"]),
        instructions: string_field(value, &["instructions"]),
        questions: collection(value, &["questions"]).iter().map(custom_question).collect(),
    }
}

fn custom_question(value: &Value) -> CustomQuestion {
    CustomQuestion {
        id: string_field(value, &["id"]),
        question: string_field(value, &["question"]),
        marks: u32_field(value, &["marks"]),
    }
}
