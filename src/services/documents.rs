//! Deterministic paper rendering: one self-contained HTML document per copy
//! type, handed to the host's print/download facility. Identical inputs
//! produce byte-identical output, and rendering never fails; a missing field
//! degrades to an empty string or an omitted sub-block.
//!
//! Question bodies are rich text and pass through `ammonia::clean`; scalar
//! fields are entity-escaped with `ammonia::clean_text`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schemas::exam::{format_exam_date, ExamDisplay, SchoolInfo};
use crate::schemas::question::{CustomSection, SubQuestion, TheoryQuestion};
use crate::services::numbering;

/// Which audience the rendered paper targets. The teacher copy carries
/// answers, marking guidance, and operational metadata; everything else is
/// identical between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyType {
    Student,
    Teacher,
}

impl CopyType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student Copy",
            Self::Teacher => "Teacher Copy",
        }
    }

    fn file_label(self) -> &'static str {
        match self {
            Self::Student => "Student_Copy",
            Self::Teacher => "Teacher_Copy",
        }
    }

    fn is_teacher(self) -> bool {
        matches!(self, Self::Teacher)
    }
}

impl fmt::Display for CopyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        })
    }
}

impl FromStr for CopyType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(format!("unknown copy type '{other}' (expected student or teacher)")),
        }
    }
}

/// Download filename: `{title}_{GradeName}_{Copy_Label}.html` with the
/// whitespace collapsed out of the grade-level name. The three-part
/// underscore-joined pattern is an external contract; do not reorder it.
pub fn document_filename(exam: &ExamDisplay, copy: CopyType) -> String {
    let grade: String = exam.grade_level_name.split_whitespace().collect();
    format!("{}_{}_{}.html", exam.title, grade, copy.file_label())
}

const STYLE: &str = "body{font-family:Georgia,serif;margin:2rem auto;max-width:52rem;color:#111}\
header{text-align:center;border-bottom:2px solid #111;padding-bottom:.75rem}\
header h1{margin:0;font-size:1.6rem}header h2{margin:.5rem 0 0;font-size:1.25rem}\
.copy-label{font-style:italic;margin:.25rem 0 0}\
table.meta{width:100%;margin:1rem 0;border-collapse:collapse}\
table.meta td{padding:.2rem .4rem}\
.candidate{margin:1rem 0;font-weight:bold}\
section.paper-section{margin-top:1.5rem}\
section.paper-section h3{border-bottom:1px solid #555;padding-bottom:.2rem}\
.instructions{font-style:italic}\
.question{margin:.75rem 0}\
ol.options{list-style:none;padding-left:1.5rem;margin:.25rem 0}\
.sub-question{margin:.4rem 0 .4rem 1.5rem}\
.sub-sub-question{margin:.3rem 0 .3rem 3rem}\
.answer,.marking{color:#7a0000;font-weight:bold}\
.teacher-meta{border:1px solid #7a0000;padding:.5rem .75rem;margin:1rem 0}";

/// Render the complete paper for one copy type. Pure and deterministic:
/// ordering follows the collections, section letters are fixed (Objective A,
/// Theory B, Practical C, custom sections from D), and empty sections are
/// omitted without consuming different letters.
pub fn render(exam: &ExamDisplay, copy: CopyType, school: &SchoolInfo) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    out.push_str(&text(&exam.title));
    out.push_str(" - ");
    out.push_str(copy.label());
    out.push_str("</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    render_header(&mut out, exam, copy, school);
    render_meta_table(&mut out, exam);
    out.push_str("<p class=\"candidate\">Name: ______________________________________</p>\n");

    if copy.is_teacher() {
        render_teacher_meta(&mut out, exam);
    }

    render_objective_section(&mut out, exam, copy);
    render_theory_section(&mut out, exam, copy);
    render_practical_section(&mut out, exam, copy);
    for (index, section) in exam.custom_sections.iter().enumerate() {
        render_custom_section(&mut out, section, index, copy);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_header(out: &mut String, exam: &ExamDisplay, copy: CopyType, school: &SchoolInfo) {
    out.push_str("<header>\n<h1>");
    out.push_str(&text(&school.school_name));
    out.push_str("</h1>\n<p>");
    out.push_str(&text(&school.school_address));
    out.push_str("</p>\n<p>");
    out.push_str(&text(&school.academic_session));
    out.push_str(" &mdash; ");
    out.push_str(&text(&school.current_term));
    out.push_str("</p>\n<h2>");
    out.push_str(&text(&exam.title));
    out.push_str("</h2>\n<p class=\"copy-label\">");
    out.push_str(copy.label());
    out.push_str("</p>\n</header>\n");
}

fn render_meta_table(out: &mut String, exam: &ExamDisplay) {
    out.push_str("<table class=\"meta\">\n<tr><td>Class:</td><td>");
    out.push_str(&text(&exam.grade_level_name));
    if !exam.section_name.is_empty() {
        out.push(' ');
        out.push_str(&text(&exam.section_name));
    }
    out.push_str("</td><td>Subject:</td><td>");
    out.push_str(&text(&exam.subject_name));
    out.push_str("</td></tr>\n<tr><td>Date:</td><td>");
    out.push_str(&text(&format_exam_date(&exam.exam_date)));
    out.push_str("</td><td>Time:</td><td>");
    out.push_str(&text(&exam.start_time));
    if !exam.start_time.is_empty() && !exam.end_time.is_empty() {
        out.push_str(" - ");
    }
    out.push_str(&text(&exam.end_time));
    out.push_str("</td></tr>\n</table>\n");
}

fn render_teacher_meta(out: &mut String, exam: &ExamDisplay) {
    out.push_str("<section class=\"teacher-meta\">\n<p>Total marks: ");
    out.push_str(&exam.total_marks.to_string());
    if let Some(pass) = exam.pass_marks {
        out.push_str(" | Pass marks: ");
        out.push_str(&pass.to_string());
    }
    if exam.duration_minutes > 0 {
        out.push_str(" | Duration: ");
        out.push_str(&exam.duration_minutes.to_string());
        out.push_str(" minutes");
    }
    out.push_str("</p>\n");
    if !exam.venue.is_empty() {
        out.push_str("<p>Venue: ");
        out.push_str(&text(&exam.venue));
        if let Some(max) = exam.max_students {
            out.push_str(" | Capacity: ");
            out.push_str(&max.to_string());
            out.push_str(" students");
        }
        out.push_str("</p>\n");
    }
    let mut flags: Vec<&str> = Vec::new();
    if exam.is_practical {
        flags.push("practical components");
    }
    if exam.requires_computer {
        flags.push("computers required");
    }
    if exam.is_online {
        flags.push("delivered online");
    }
    if !flags.is_empty() {
        out.push_str("<p>Provisions: ");
        out.push_str(&flags.join(", "));
        out.push_str("</p>\n");
    }
    if !exam.teacher_name.is_empty() {
        out.push_str("<p>Set by: ");
        out.push_str(&text(&exam.teacher_name));
        out.push_str("</p>\n");
    }
    out.push_str("</section>\n");
}

fn open_section(out: &mut String, letter: char, name: &str, instructions: &str) {
    out.push_str("<section class=\"paper-section\">\n<h3>Section ");
    out.push(letter);
    out.push_str(": ");
    out.push_str(&text(name));
    out.push_str("</h3>\n");
    if !instructions.is_empty() {
        out.push_str("<p class=\"instructions\">");
        out.push_str(&rich(instructions));
        out.push_str("</p>\n");
    }
}

fn render_objective_section(out: &mut String, exam: &ExamDisplay, copy: CopyType) {
    if exam.objective_questions.is_empty() {
        return;
    }
    open_section(out, 'A', "Objective", &exam.objective_instructions);
    for (index, question) in exam.objective_questions.iter().enumerate() {
        out.push_str("<div class=\"question\">\n<p><strong>");
        out.push_str(&numbering::label(index, 0));
        out.push_str(".</strong> ");
        out.push_str(&rich(&question.question));
        push_marks(out, question.marks);
        out.push_str("</p>\n<ol class=\"options\">\n");
        for (letter, option) in [
            ("A", &question.option_a),
            ("B", &question.option_b),
            ("C", &question.option_c),
            ("D", &question.option_d),
        ] {
            out.push_str("<li>");
            out.push_str(letter);
            out.push_str(". ");
            out.push_str(&rich(option));
            out.push_str("</li>\n");
        }
        out.push_str("</ol>\n");
        if copy.is_teacher() && !question.correct_answer.is_empty() {
            out.push_str("<p class=\"answer\">Answer: ");
            out.push_str(&text(&question.correct_answer));
            out.push_str("</p>\n");
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_theory_section(out: &mut String, exam: &ExamDisplay, copy: CopyType) {
    if exam.theory_questions.is_empty() {
        return;
    }
    open_section(out, 'B', "Theory", &exam.theory_instructions);
    for (index, question) in exam.theory_questions.iter().enumerate() {
        render_theory_question(out, question, index, copy);
    }
    out.push_str("</section>\n");
}

fn render_theory_question(out: &mut String, question: &TheoryQuestion, index: usize, copy: CopyType) {
    let label = numbering::label(index, 0);
    out.push_str("<div class=\"question\">\n<p><strong>");
    out.push_str(&label);
    out.push_str(".</strong> ");
    out.push_str(&rich(&question.question));
    push_marks(out, question.marks);
    push_word_limit(out, question.word_limit);
    out.push_str("</p>\n");
    push_marking(out, copy, &question.expected_points);
    for (sub_index, sub) in question.sub_questions.iter().enumerate() {
        render_sub_question(out, sub, &label, sub_index, copy);
    }
    out.push_str("</div>\n");
}

fn render_sub_question(
    out: &mut String,
    sub: &SubQuestion,
    parent_label: &str,
    index: usize,
    copy: CopyType,
) {
    // Composite labels concatenate ancestor labels with no separator: 2c, 2ci.
    let label = format!("{parent_label}{}", numbering::label(index, 1));
    out.push_str("<div class=\"sub-question\">\n<p><strong>");
    out.push_str(&label);
    out.push_str(".</strong> ");
    out.push_str(&rich(&sub.question));
    push_marks(out, sub.marks);
    push_word_limit(out, sub.word_limit);
    out.push_str("</p>\n");
    push_marking(out, copy, &sub.expected_points);
    for (leaf_index, leaf) in sub.sub_sub_questions.iter().enumerate() {
        let leaf_label = format!("{label}{}", numbering::label(leaf_index, 2));
        out.push_str("<div class=\"sub-sub-question\">\n<p><strong>");
        out.push_str(&leaf_label);
        out.push_str(".</strong> ");
        out.push_str(&rich(&leaf.question));
        push_marks(out, leaf.marks);
        push_word_limit(out, leaf.word_limit);
        out.push_str("</p>\n");
        push_marking(out, copy, &leaf.expected_points);
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

fn render_practical_section(out: &mut String, exam: &ExamDisplay, copy: CopyType) {
    if exam.practical_questions.is_empty() {
        return;
    }
    open_section(out, 'C', "Practical", &exam.practical_instructions);
    for (index, question) in exam.practical_questions.iter().enumerate() {
        out.push_str("<div class=\"question\">\n<p><strong>");
        out.push_str(&numbering::label(index, 0));
        out.push_str(".</strong> ");
        out.push_str(&rich(&question.task));
        push_marks(out, question.marks);
        if let Some(limit) = question.time_limit {
            out.push_str(" (time limit: ");
            out.push_str(&limit.to_string());
            out.push_str(" minutes)");
        }
        out.push_str("</p>\n");
        if !question.materials.is_empty() {
            out.push_str("<p>Materials: ");
            out.push_str(&rich(&question.materials));
            out.push_str("</p>\n");
        }
        if copy.is_teacher() && !question.expected_outcome.is_empty() {
            out.push_str("<p class=\"marking\">Expected outcome: ");
            out.push_str(&rich(&question.expected_outcome));
            out.push_str("</p>\n");
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_custom_section(out: &mut String, section: &CustomSection, index: usize, copy: CopyType) {
    if section.questions.is_empty() {
        return;
    }
    // Custom sections continue the alphabet after the three fixed sections.
    let letter = (b'D' + (index % 23) as u8) as char;
    open_section(out, letter, &section.name, &section.instructions);
    for (question_index, question) in section.questions.iter().enumerate() {
        out.push_str("<div class=\"question\">\n<p><strong>");
        out.push_str(&numbering::label(question_index, 0));
        out.push_str(".</strong> ");
        out.push_str(&rich(&question.question));
        push_marks(out, question.marks);
        out.push_str("</p>\n");
        if copy.is_teacher() && question.marks > 0 {
            out.push_str("<p class=\"marking\">Award up to ");
            out.push_str(&question.marks.to_string());
            out.push_str(" marks</p>\n");
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn push_marks(out: &mut String, marks: u32) {
    if marks > 0 {
        out.push_str(" (");
        out.push_str(&marks.to_string());
        out.push_str(" marks)");
    }
}

fn push_word_limit(out: &mut String, limit: Option<u32>) {
    if let Some(words) = limit {
        out.push_str(" (word limit: ");
        out.push_str(&words.to_string());
        out.push_str(" words)");
    }
}

fn push_marking(out: &mut String, copy: CopyType, expected_points: &str) {
    if copy.is_teacher() && !expected_points.is_empty() {
        out.push_str("<p class=\"marking\">Expected: ");
        out.push_str(&rich(expected_points));
        out.push_str("</p>\n");
    }
}

/// Sanitized rich text: keeps safe inline markup, strips scripts and event
/// handlers.
fn rich(input: &str) -> String {
    ammonia::clean(input)
}

/// Entity-escaped plain text for scalar fields.
fn text(input: &str) -> String {
    ammonia::clean_text(input)
}
