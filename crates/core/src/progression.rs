use std::collections::BTreeSet;

use crate::model::{AdvanceMode, Question, Selection};

/// Where an advance action leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Goto(usize),
    Complete,
}

/// Read-only view of session progress handed to a policy, taken after the current
/// answer has been committed.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub index: usize,
    pub len: usize,
    pub correct: &'a BTreeSet<usize>,
    pub visited: &'a [bool],
}

impl Progress<'_> {
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }
}

/// Decides whether "next" is available and what it leads to.
pub trait ProgressionPolicy: Send + Sync {
    /// Whether the advance control is enabled for this question and selection.
    fn can_advance(&self, question: &Question, selection: Option<Selection>, correct: bool)
    -> bool;

    /// The state to move to once the current answer has been committed.
    fn next_step(&self, progress: &Progress<'_>) -> Step;
}

/// One forward pass; every question is shown once, correctness only affects the tally.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAnswerPolicy;

impl ProgressionPolicy for AnyAnswerPolicy {
    fn can_advance(
        &self,
        question: &Question,
        selection: Option<Selection>,
        _correct: bool,
    ) -> bool {
        // Unsupported questions offer nothing to pick; let the pass continue.
        selection.is_some() || !question.is_supported()
    }

    fn next_step(&self, progress: &Progress<'_>) -> Step {
        if progress.visited_count() >= progress.len {
            return Step::Complete;
        }
        let last = progress.len.saturating_sub(1);
        Step::Goto((progress.index + 1).min(last))
    }
}

/// Questions keep coming back until every one has been answered correctly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasteryPolicy;

impl ProgressionPolicy for MasteryPolicy {
    fn can_advance(
        &self,
        _question: &Question,
        _selection: Option<Selection>,
        correct: bool,
    ) -> bool {
        correct
    }

    fn next_step(&self, progress: &Progress<'_>) -> Step {
        if progress.correct.len() >= progress.len {
            return Step::Complete;
        }
        (1..=progress.len)
            .map(|offset| (progress.index + offset) % progress.len)
            .find(|idx| !progress.correct.contains(idx))
            .map_or(Step::Complete, Step::Goto)
    }
}

/// The policy implementing `mode`.
#[must_use]
pub fn policy_for(mode: AdvanceMode) -> &'static dyn ProgressionPolicy {
    match mode {
        AdvanceMode::AnyAnswer => &AnyAnswerPolicy,
        AdvanceMode::Mastery => &MasteryPolicy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn progress<'a>(index: usize, correct: &'a BTreeSet<usize>, visited: &'a [bool]) -> Progress<'a> {
        Progress {
            index,
            len: visited.len(),
            correct,
            visited,
        }
    }

    #[test]
    fn any_answer_saturates_and_completes_on_full_pass() {
        let none = BTreeSet::new();
        assert_eq!(
            AnyAnswerPolicy.next_step(&progress(0, &none, &[true, false, false])),
            Step::Goto(1)
        );
        assert_eq!(
            AnyAnswerPolicy.next_step(&progress(2, &none, &[false, false, true])),
            Step::Goto(2)
        );
        assert_eq!(
            AnyAnswerPolicy.next_step(&progress(2, &none, &[true, true, true])),
            Step::Complete
        );
    }

    #[test]
    fn any_answer_needs_a_selection_for_supported_questions() {
        let tf = Question::new(0, "p", QuestionKind::TrueFalse { answer: true });
        assert!(!AnyAnswerPolicy.can_advance(&tf, None, false));
        assert!(AnyAnswerPolicy.can_advance(&tf, Some(Selection::Truth(false)), false));

        let odd = Question::new(0, "p", QuestionKind::Unsupported { tag: "x".into() });
        assert!(AnyAnswerPolicy.can_advance(&odd, None, false));
    }

    #[test]
    fn mastery_wraps_and_skips_correct_indices() {
        let correct: BTreeSet<usize> = [0, 2, 3].into_iter().collect();
        let visited = [false; 5];
        assert_eq!(
            MasteryPolicy.next_step(&progress(3, &correct, &visited)),
            Step::Goto(4)
        );
        let correct: BTreeSet<usize> = [2, 3, 4].into_iter().collect();
        assert_eq!(
            MasteryPolicy.next_step(&progress(4, &correct, &visited)),
            Step::Goto(0)
        );
    }

    #[test]
    fn mastery_can_return_to_current_when_only_it_remains() {
        let correct: BTreeSet<usize> = [0, 2].into_iter().collect();
        let visited = [false; 3];
        assert_eq!(
            MasteryPolicy.next_step(&progress(1, &correct, &visited)),
            Step::Goto(1)
        );
    }

    #[test]
    fn mastery_completes_only_when_all_correct() {
        let all: BTreeSet<usize> = (0..3).collect();
        let visited = [true; 3];
        assert_eq!(MasteryPolicy.next_step(&progress(1, &all, &visited)), Step::Complete);

        let tf = Question::new(0, "p", QuestionKind::TrueFalse { answer: true });
        assert!(!MasteryPolicy.can_advance(&tf, Some(Selection::Truth(false)), false));
        assert!(MasteryPolicy.can_advance(&tf, Some(Selection::Truth(true)), true));
    }
}
