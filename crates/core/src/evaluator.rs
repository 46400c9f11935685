use crate::model::{Question, QuestionKind, Selection};

/// Decide whether `selection` answers `question` correctly.
///
/// Fails closed: no selection, a selection of the wrong kind, and unsupported questions
/// are all incorrect. Pure; repeated calls give the same answer.
#[must_use]
pub fn evaluate(question: &Question, selection: Option<Selection>) -> bool {
    let Some(selection) = selection else {
        return false;
    };
    match (question.kind(), selection) {
        (
            QuestionKind::MultipleChoice { answer, .. } | QuestionKind::ImageChoice { answer, .. },
            Selection::Choice(picked),
        ) => picked == *answer,
        (QuestionKind::TrueFalse { answer }, Selection::Truth(picked)) => picked == *answer,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq() -> Question {
        Question::new(
            0,
            "Which is a Spanish city?",
            QuestionKind::multiple_choice(vec!["Porto".into(), "Seville".into()], 1).unwrap(),
        )
    }

    #[test]
    fn unset_selection_is_incorrect() {
        assert!(!evaluate(&mcq(), None));
        let tf = Question::new(0, "p", QuestionKind::TrueFalse { answer: false });
        assert!(!evaluate(&tf, None));
    }

    #[test]
    fn choice_uses_strict_index_equality() {
        let q = mcq();
        assert!(evaluate(&q, Some(Selection::Choice(1))));
        assert!(!evaluate(&q, Some(Selection::Choice(0))));
        assert!(!evaluate(&q, Some(Selection::Truth(true))));
    }

    #[test]
    fn true_false_uses_strict_boolean_equality() {
        let q = Question::new(0, "p", QuestionKind::TrueFalse { answer: false });
        assert!(evaluate(&q, Some(Selection::Truth(false))));
        assert!(!evaluate(&q, Some(Selection::Truth(true))));
        assert!(!evaluate(&q, Some(Selection::Choice(0))));
    }

    #[test]
    fn unsupported_is_never_correct() {
        let q = Question::new(0, "p", QuestionKind::Unsupported { tag: "drag".into() });
        for sel in [Selection::Choice(0), Selection::Truth(true), Selection::Truth(false)] {
            assert!(!evaluate(&q, Some(sel)));
        }
    }

    #[test]
    fn evaluation_is_repeatable() {
        let q = mcq();
        let first = evaluate(&q, Some(Selection::Choice(1)));
        for _ in 0..5 {
            assert_eq!(evaluate(&q, Some(Selection::Choice(1))), first);
        }
    }
}
