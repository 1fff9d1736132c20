use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single multiple-choice question. `correct_answer` holds one of
/// "A".."D"; anything else renders as "unanswered" on the teacher copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "optionA")]
    pub option_a: String,
    #[serde(default, alias = "optionB")]
    pub option_b: String,
    #[serde(default, alias = "optionC")]
    pub option_c: String,
    #[serde(default, alias = "optionD")]
    pub option_d: String,
    #[serde(default, alias = "correctAnswer")]
    pub correct_answer: String,
    #[serde(default)]
    pub marks: u32,
}

impl ObjectiveQuestion {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            question: String::new(),
            option_a: String::new(),
            option_b: String::new(),
            option_c: String::new(),
            option_d: String::new(),
            correct_answer: String::new(),
            marks: 0,
        }
    }
}

impl Default for ObjectiveQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// Root of the theory tree. Nesting is capped structurally at three levels:
/// theory question -> sub-question -> sub-sub-question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoryQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "expectedPoints")]
    pub expected_points: String,
    #[serde(default)]
    pub marks: u32,
    #[serde(default, alias = "wordLimit")]
    pub word_limit: Option<u32>,
    #[serde(default, alias = "subQuestions")]
    pub sub_questions: Vec<SubQuestion>,
}

impl TheoryQuestion {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            question: String::new(),
            expected_points: String::new(),
            marks: 0,
            word_limit: None,
            sub_questions: Vec::new(),
        }
    }
}

impl Default for TheoryQuestion {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "expectedPoints")]
    pub expected_points: String,
    #[serde(default)]
    pub marks: u32,
    #[serde(default, alias = "wordLimit")]
    pub word_limit: Option<u32>,
    #[serde(default, alias = "subSubQuestions")]
    pub sub_sub_questions: Vec<SubSubQuestion>,
}

impl SubQuestion {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            question: String::new(),
            expected_points: String::new(),
            marks: 0,
            word_limit: None,
            sub_sub_questions: Vec::new(),
        }
    }
}

impl Default for SubQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// Leaf level of the theory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSubQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "expectedPoints")]
    pub expected_points: String,
    #[serde(default)]
    pub marks: u32,
    #[serde(default, alias = "wordLimit")]
    pub word_limit: Option<u32>,
}

impl SubSubQuestion {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            question: String::new(),
            expected_points: String::new(),
            marks: 0,
            word_limit: None,
        }
    }
}

impl Default for SubSubQuestion {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticalQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub materials: String,
    #[serde(default, alias = "expectedOutcome")]
    pub expected_outcome: String,
    #[serde(default)]
    pub marks: u32,
    #[serde(default, alias = "timeLimit")]
    pub time_limit: Option<u32>,
}

impl PracticalQuestion {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            task: String::new(),
            materials: String::new(),
            expected_outcome: String::new(),
            marks: 0,
            time_limit: None,
        }
    }
}

impl Default for PracticalQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// Ad-hoc section ("Comprehension", "Literature", ...). A single flat level
/// of questions, never nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub questions: Vec<CustomQuestion>,
}

impl CustomSection {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            name: String::new(),
            instructions: String::new(),
            questions: Vec::new(),
        }
    }
}

impl Default for CustomSection {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub marks: u32,
}

impl CustomQuestion {
    pub fn new() -> Self {
        Self { id: fresh_id(), question: String::new(), marks: 0 }
    }
}

impl Default for CustomQuestion {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
