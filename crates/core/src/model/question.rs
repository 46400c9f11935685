use thiserror::Error;

use crate::model::image::ImageRef;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("multiple-choice question needs at least one choice")]
    EmptyChoices,

    #[error("answer index {answer} is out of range for {choices} choices")]
    AnswerOutOfRange { answer: usize, choices: usize },

    #[error("answer must be {expected}")]
    InvalidAnswer { expected: &'static str },
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// What the player picked for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Index into the question's choices.
    Choice(usize),
    /// True/false answer.
    Truth(bool),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Per-type payload of a question, including its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice {
        choices: Vec<String>,
        answer: usize,
    },
    ImageChoice {
        choices: Vec<String>,
        answer: usize,
        image: Option<ImageRef>,
    },
    TrueFalse {
        answer: bool,
    },
    /// A type tag this engine does not know. Never answerable.
    Unsupported {
        tag: String,
    },
}

impl QuestionKind {
    /// Build a multiple-choice kind, validating the answer index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when there are no choices or the answer is out of range.
    pub fn multiple_choice(choices: Vec<String>, answer: usize) -> Result<Self, QuestionError> {
        validate_choices(&choices, answer)?;
        Ok(Self::MultipleChoice { choices, answer })
    }

    /// Build an image multiple-choice kind, validating the answer index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when there are no choices or the answer is out of range.
    pub fn image_choice(
        choices: Vec<String>,
        answer: usize,
        image: Option<ImageRef>,
    ) -> Result<Self, QuestionError> {
        validate_choices(&choices, answer)?;
        Ok(Self::ImageChoice {
            choices,
            answer,
            image,
        })
    }

    /// Short type tag as used in content files.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            QuestionKind::MultipleChoice { .. } => "mcq",
            QuestionKind::ImageChoice { .. } => "mcq-image",
            QuestionKind::TrueFalse { .. } => "tf",
            QuestionKind::Unsupported { tag } => tag,
        }
    }
}

fn validate_choices(choices: &[String], answer: usize) -> Result<(), QuestionError> {
    if choices.is_empty() {
        return Err(QuestionError::EmptyChoices);
    }
    if answer >= choices.len() {
        return Err(QuestionError::AnswerOutOfRange {
            answer,
            choices: choices.len(),
        });
    }
    Ok(())
}

/// A single quiz item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    index: usize,
    prompt: String,
    kind: QuestionKind,
    explain: Option<String>,
    hint: Option<String>,
    alt: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(index: usize, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            index,
            prompt: prompt.into(),
            kind,
            explain: None,
            hint: None,
            alt: None,
        }
    }

    #[must_use]
    pub fn with_explain(mut self, explain: impl Into<String>) -> Self {
        self.explain = non_blank(explain.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = non_blank(hint.into());
        self
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = non_blank(alt.into());
        self
    }

    /// Position within the track.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn explain(&self) -> Option<&str> {
        self.explain.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Alt text for the image, falling back to the prompt.
    #[must_use]
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or(&self.prompt)
    }

    /// Choice labels; empty for true/false and unsupported questions.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { choices, .. }
            | QuestionKind::ImageChoice { choices, .. } => choices,
            QuestionKind::TrueFalse { .. } | QuestionKind::Unsupported { .. } => &[],
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        match &self.kind {
            QuestionKind::ImageChoice { image, .. } => image.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self.kind, QuestionKind::Unsupported { .. })
    }

    /// Whether `selection` is a well-formed pick for this question (right kind, in range).
    #[must_use]
    pub fn accepts(&self, selection: Selection) -> bool {
        match (&self.kind, selection) {
            (
                QuestionKind::MultipleChoice { choices, .. }
                | QuestionKind::ImageChoice { choices, .. },
                Selection::Choice(idx),
            ) => idx < choices.len(),
            (QuestionKind::TrueFalse { .. }, Selection::Truth(_)) => true,
            _ => false,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn multiple_choice_rejects_out_of_range_answer() {
        let err = QuestionKind::multiple_choice(labels(&["a", "b"]), 2).unwrap_err();
        assert_eq!(
            err,
            QuestionError::AnswerOutOfRange {
                answer: 2,
                choices: 2
            }
        );
        assert_eq!(
            QuestionKind::multiple_choice(Vec::new(), 0).unwrap_err(),
            QuestionError::EmptyChoices
        );
    }

    #[test]
    fn accepts_checks_kind_and_range() {
        let mcq = Question::new(
            0,
            "Capital of Spain?",
            QuestionKind::multiple_choice(labels(&["Madrid", "Lisbon"]), 0).unwrap(),
        );
        assert!(mcq.accepts(Selection::Choice(1)));
        assert!(!mcq.accepts(Selection::Choice(2)));
        assert!(!mcq.accepts(Selection::Truth(true)));

        let tf = Question::new(1, "Paella is from Valencia.", QuestionKind::TrueFalse { answer: true });
        assert!(tf.accepts(Selection::Truth(false)));
        assert!(!tf.accepts(Selection::Choice(0)));
        assert!(tf.choices().is_empty());
    }

    #[test]
    fn blank_hint_is_treated_as_absent() {
        let q = Question::new(0, "Q", QuestionKind::TrueFalse { answer: false }).with_hint("  ");
        assert_eq!(q.hint(), None);
        assert_eq!(q.alt_text(), "Q");
    }
}
