pub mod exam;
pub mod question;

pub use exam::{ApprovalStatus, ExamDisplay, ExamEdit, SchoolInfo};
pub use question::{
    CustomQuestion, CustomSection, ObjectiveQuestion, PracticalQuestion, SubQuestion,
    SubSubQuestion, TheoryQuestion,
};
