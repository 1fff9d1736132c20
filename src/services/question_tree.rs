//! Immutable-update operations over the four question collections.
//!
//! Every operation takes a slice and returns a fresh `Vec` with only the
//! affected branch rebuilt; untouched entries are value-equal to their
//! inputs. Stale ids degrade to no-ops instead of erroring, because the
//! authoring UI feeds ids back in and must tolerate racing local edits.

use crate::schemas::question::{
    CustomQuestion, CustomSection, ObjectiveQuestion, PracticalQuestion, SubQuestion,
    SubSubQuestion, TheoryQuestion,
};

fn update_where<T: Clone>(
    items: &[T],
    index_of: impl Fn(&T) -> bool,
    mutate: impl FnOnce(&mut T),
) -> Vec<T> {
    let mut next: Vec<T> = items.to_vec();
    if let Some(entry) = next.iter_mut().find(|item| index_of(item)) {
        mutate(entry);
    }
    next
}

// --- objective -------------------------------------------------------------

pub fn add_objective_question(questions: &[ObjectiveQuestion]) -> Vec<ObjectiveQuestion> {
    let mut next = questions.to_vec();
    next.push(ObjectiveQuestion::new());
    next
}

pub fn update_objective_question(
    questions: &[ObjectiveQuestion],
    id: &str,
    mutate: impl FnOnce(&mut ObjectiveQuestion),
) -> Vec<ObjectiveQuestion> {
    update_where(questions, |q| q.id == id, mutate)
}

pub fn remove_objective_question(questions: &[ObjectiveQuestion], id: &str) -> Vec<ObjectiveQuestion> {
    questions.iter().filter(|q| q.id != id).cloned().collect()
}

// --- theory ----------------------------------------------------------------

pub fn add_theory_question(questions: &[TheoryQuestion]) -> Vec<TheoryQuestion> {
    let mut next = questions.to_vec();
    next.push(TheoryQuestion::new());
    next
}

pub fn update_theory_question(
    questions: &[TheoryQuestion],
    id: &str,
    mutate: impl FnOnce(&mut TheoryQuestion),
) -> Vec<TheoryQuestion> {
    update_where(questions, |q| q.id == id, mutate)
}

/// Removing a theory question drops its sub-questions and sub-sub-questions
/// with it; ownership is structural, so nothing can be orphaned.
pub fn remove_theory_question(questions: &[TheoryQuestion], id: &str) -> Vec<TheoryQuestion> {
    questions.iter().filter(|q| q.id != id).cloned().collect()
}

pub fn add_sub_question(questions: &[TheoryQuestion], theory_id: &str) -> Vec<TheoryQuestion> {
    update_where(questions, |q| q.id == theory_id, |q| q.sub_questions.push(SubQuestion::new()))
}

pub fn update_sub_question(
    questions: &[TheoryQuestion],
    theory_id: &str,
    sub_id: &str,
    mutate: impl FnOnce(&mut SubQuestion),
) -> Vec<TheoryQuestion> {
    update_where(
        questions,
        |q| q.id == theory_id,
        |q| {
            if let Some(sub) = q.sub_questions.iter_mut().find(|s| s.id == sub_id) {
                mutate(sub);
            }
        },
    )
}

pub fn remove_sub_question(
    questions: &[TheoryQuestion],
    theory_id: &str,
    sub_id: &str,
) -> Vec<TheoryQuestion> {
    update_where(
        questions,
        |q| q.id == theory_id,
        |q| q.sub_questions.retain(|s| s.id != sub_id),
    )
}

/// Appends a sub-sub-question. With `Some(sub_id)` the append targets that
/// sub-question alone; with `None` it applies to every sub-question of the
/// theory question (bulk mode, kept as observed in the product pending
/// clarification -- see DESIGN.md).
pub fn add_sub_sub_question(
    questions: &[TheoryQuestion],
    theory_id: &str,
    sub_id: Option<&str>,
) -> Vec<TheoryQuestion> {
    update_where(
        questions,
        |q| q.id == theory_id,
        |q| match sub_id {
            Some(sub_id) => {
                if let Some(sub) = q.sub_questions.iter_mut().find(|s| s.id == sub_id) {
                    sub.sub_sub_questions.push(SubSubQuestion::new());
                }
            }
            None => {
                for sub in &mut q.sub_questions {
                    sub.sub_sub_questions.push(SubSubQuestion::new());
                }
            }
        },
    )
}

pub fn update_sub_sub_question(
    questions: &[TheoryQuestion],
    theory_id: &str,
    sub_id: &str,
    sub_sub_id: &str,
    mutate: impl FnOnce(&mut SubSubQuestion),
) -> Vec<TheoryQuestion> {
    update_where(
        questions,
        |q| q.id == theory_id,
        |q| {
            if let Some(sub) = q.sub_questions.iter_mut().find(|s| s.id == sub_id) {
                if let Some(leaf) = sub.sub_sub_questions.iter_mut().find(|l| l.id == sub_sub_id) {
                    mutate(leaf);
                }
            }
        },
    )
}

pub fn remove_sub_sub_question(
    questions: &[TheoryQuestion],
    theory_id: &str,
    sub_id: &str,
    sub_sub_id: &str,
) -> Vec<TheoryQuestion> {
    update_where(
        questions,
        |q| q.id == theory_id,
        |q| {
            if let Some(sub) = q.sub_questions.iter_mut().find(|s| s.id == sub_id) {
                sub.sub_sub_questions.retain(|l| l.id != sub_sub_id);
            }
        },
    )
}

// --- practical -------------------------------------------------------------

pub fn add_practical_question(questions: &[PracticalQuestion]) -> Vec<PracticalQuestion> {
    let mut next = questions.to_vec();
    next.push(PracticalQuestion::new());
    next
}

pub fn update_practical_question(
    questions: &[PracticalQuestion],
    id: &str,
    mutate: impl FnOnce(&mut PracticalQuestion),
) -> Vec<PracticalQuestion> {
    update_where(questions, |q| q.id == id, mutate)
}

pub fn remove_practical_question(
    questions: &[PracticalQuestion],
    id: &str,
) -> Vec<PracticalQuestion> {
    questions.iter().filter(|q| q.id != id).cloned().collect()
}

// --- custom sections -------------------------------------------------------

pub fn add_custom_section(sections: &[CustomSection]) -> Vec<CustomSection> {
    let mut next = sections.to_vec();
    next.push(CustomSection::new());
    next
}

pub fn update_custom_section(
    sections: &[CustomSection],
    id: &str,
    mutate: impl FnOnce(&mut CustomSection),
) -> Vec<CustomSection> {
    update_where(sections, |s| s.id == id, mutate)
}

pub fn remove_custom_section(sections: &[CustomSection], id: &str) -> Vec<CustomSection> {
    sections.iter().filter(|s| s.id != id).cloned().collect()
}

pub fn add_custom_question(sections: &[CustomSection], section_id: &str) -> Vec<CustomSection> {
    update_where(
        sections,
        |s| s.id == section_id,
        |s| s.questions.push(CustomQuestion::new()),
    )
}

pub fn update_custom_question(
    sections: &[CustomSection],
    section_id: &str,
    question_id: &str,
    mutate: impl FnOnce(&mut CustomQuestion),
) -> Vec<CustomSection> {
    update_where(
        sections,
        |s| s.id == section_id,
        |s| {
            if let Some(q) = s.questions.iter_mut().find(|q| q.id == question_id) {
                mutate(q);
            }
        },
    )
}

pub fn remove_custom_question(
    sections: &[CustomSection],
    section_id: &str,
    question_id: &str,
) -> Vec<CustomSection> {
    update_where(
        sections,
        |s| s.id == section_id,
        |s| s.questions.retain(|q| q.id != question_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theory_fixture() -> Vec<TheoryQuestion> {
        let mut questions = add_theory_question(&[]);
        let theory_id = questions[0].id.clone();
        questions = add_sub_question(&questions, &theory_id);
        questions = add_sub_question(&questions, &theory_id);
        let first_sub = questions[0].sub_questions[0].id.clone();
        add_sub_sub_question(&questions, &theory_id, Some(first_sub.as_str()))
    }

    #[test]
    fn add_assigns_unique_ids_and_defaults() {
        let questions = add_objective_question(&add_objective_question(&[]));
        assert_eq!(questions.len(), 2);
        assert_ne!(questions[0].id, questions[1].id);
        assert_eq!(questions[0].marks, 0);
        assert!(questions[0].question.is_empty());
    }

    #[test]
    fn update_touches_only_the_addressed_question() {
        let questions = add_objective_question(&add_objective_question(&[]));
        let target = questions[1].id.clone();
        let updated = update_objective_question(&questions, &target, |q| q.marks = 5);
        assert_eq!(updated[0], questions[0]);
        assert_eq!(updated[1].marks, 5);
    }

    #[test]
    fn update_with_stale_id_is_a_noop() {
        let questions = add_objective_question(&[]);
        let updated = update_objective_question(&questions, "gone", |q| q.marks = 99);
        assert_eq!(updated, questions);
    }

    #[test]
    fn removing_a_theory_question_cascades_descendants() {
        let questions = theory_fixture();
        let theory_id = questions[0].id.clone();
        let sub_ids: Vec<String> =
            questions[0].sub_questions.iter().map(|s| s.id.clone()).collect();
        let leaf_id = questions[0].sub_questions[0].sub_sub_questions[0].id.clone();

        let remaining = remove_theory_question(&questions, &theory_id);
        assert!(remaining.is_empty());

        // None of the former descendants are still addressable.
        for stale in sub_ids.iter().chain(std::iter::once(&leaf_id)) {
            let touched = update_sub_question(&remaining, &theory_id, stale, |s| s.marks = 1);
            assert_eq!(touched, remaining);
        }
    }

    #[test]
    fn sub_sub_append_without_target_applies_to_every_sub_question() {
        let questions = theory_fixture();
        let theory_id = questions[0].id.clone();
        let bulk = add_sub_sub_question(&questions, &theory_id, None);
        assert_eq!(bulk[0].sub_questions[0].sub_sub_questions.len(), 2);
        assert_eq!(bulk[0].sub_questions[1].sub_sub_questions.len(), 1);
    }

    #[test]
    fn sub_sub_append_with_target_applies_to_one() {
        let questions = theory_fixture();
        let theory_id = questions[0].id.clone();
        let second_sub = questions[0].sub_questions[1].id.clone();
        let updated = add_sub_sub_question(&questions, &theory_id, Some(second_sub.as_str()));
        assert_eq!(updated[0].sub_questions[0].sub_sub_questions.len(), 1);
        assert_eq!(updated[0].sub_questions[1].sub_sub_questions.len(), 1);
    }

    #[test]
    fn nested_update_reaches_the_leaf() {
        let questions = theory_fixture();
        let theory_id = questions[0].id.clone();
        let sub_id = questions[0].sub_questions[0].id.clone();
        let leaf_id = questions[0].sub_questions[0].sub_sub_questions[0].id.clone();

        let updated = update_sub_sub_question(&questions, &theory_id, &sub_id, &leaf_id, |leaf| {
            leaf.marks = 2;
            leaf.question = "State the final answer".to_string();
        });
        assert_eq!(updated[0].sub_questions[0].sub_sub_questions[0].marks, 2);
        // Sibling sub-question untouched.
        assert_eq!(updated[0].sub_questions[1], questions[0].sub_questions[1]);
    }

    #[test]
    fn custom_section_question_lifecycle() {
        let sections = add_custom_section(&[]);
        let section_id = sections[0].id.clone();
        let sections = add_custom_question(&sections, &section_id);
        let question_id = sections[0].questions[0].id.clone();

        let sections =
            update_custom_question(&sections, &section_id, &question_id, |q| q.marks = 4);
        assert_eq!(sections[0].questions[0].marks, 4);

        let sections = remove_custom_question(&sections, &section_id, &question_id);
        assert!(sections[0].questions.is_empty());
    }

    #[test]
    fn remove_with_stale_id_keeps_collection_intact() {
        let questions = add_practical_question(&[]);
        let remaining = remove_practical_question(&questions, "missing");
        assert_eq!(remaining, questions);
    }
}
