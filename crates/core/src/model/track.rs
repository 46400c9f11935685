use thiserror::Error;

use crate::model::ids::TrackId;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrackError {
    #[error("track id cannot be empty")]
    EmptyId,

    #[error("track must contain at least one question")]
    NoQuestions,

    #[error("question at position {position} carries index {index}")]
    MisnumberedQuestion { position: usize, index: usize },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Which advancement policy a track uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Any selection unlocks "next"; the session ends after one full pass.
    AnyAnswer,
    /// Only a correct selection unlocks "next"; the session ends when all are correct.
    Mastery,
}

/// Per-track behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSettings {
    advance_on_any_answer: bool,
    attempts_before_hint: u32,
}

impl TrackSettings {
    pub const DEFAULT_ATTEMPTS_BEFORE_HINT: u32 = 2;

    #[must_use]
    pub fn new(advance_on_any_answer: bool, attempts_before_hint: u32) -> Self {
        Self {
            advance_on_any_answer,
            attempts_before_hint,
        }
    }

    #[must_use]
    pub fn advance_on_any_answer(&self) -> bool {
        self.advance_on_any_answer
    }

    /// Wrong attempts needed before a hint shows. Zero disables hints.
    #[must_use]
    pub fn attempts_before_hint(&self) -> u32 {
        self.attempts_before_hint
    }

    #[must_use]
    pub fn advance_mode(&self) -> AdvanceMode {
        if self.advance_on_any_answer {
            AdvanceMode::AnyAnswer
        } else {
            AdvanceMode::Mastery
        }
    }
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self::new(true, Self::DEFAULT_ATTEMPTS_BEFORE_HINT)
    }
}

//
// ─── TRACK ─────────────────────────────────────────────────────────────────────
//

/// One difficulty variant of the quiz. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id: TrackId,
    label: String,
    questions: Vec<Question>,
    settings: TrackSettings,
}

impl Track {
    /// Creates a track; a blank label falls back to the id.
    ///
    /// # Errors
    ///
    /// Returns `TrackError` if the id is blank, there are no questions, or a question's
    /// index does not match its position.
    pub fn new(
        id: TrackId,
        label: impl Into<String>,
        questions: Vec<Question>,
        settings: TrackSettings,
    ) -> Result<Self, TrackError> {
        if id.as_str().trim().is_empty() {
            return Err(TrackError::EmptyId);
        }
        if questions.is_empty() {
            return Err(TrackError::NoQuestions);
        }
        if let Some((position, q)) = questions
            .iter()
            .enumerate()
            .find(|(position, q)| q.index() != *position)
        {
            return Err(TrackError::MisnumberedQuestion {
                position,
                index: q.index(),
            });
        }

        let label = label.into();
        let label = if label.trim().is_empty() {
            id.as_str().to_string()
        } else {
            label
        };

        Ok(Self {
            id,
            label,
            questions,
            settings,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn settings(&self) -> &TrackSettings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionKind;

    fn tf(index: usize) -> Question {
        Question::new(index, format!("Q{index}"), QuestionKind::TrueFalse { answer: true })
    }

    #[test]
    fn defaults_are_any_answer_with_two_attempts() {
        let settings = TrackSettings::default();
        assert_eq!(settings.advance_mode(), AdvanceMode::AnyAnswer);
        assert_eq!(settings.attempts_before_hint(), 2);
        assert_eq!(TrackSettings::new(false, 0).advance_mode(), AdvanceMode::Mastery);
    }

    #[test]
    fn empty_track_is_rejected() {
        let err = Track::new(TrackId::new("t"), "T", Vec::new(), TrackSettings::default())
            .unwrap_err();
        assert_eq!(err, TrackError::NoQuestions);
    }

    #[test]
    fn misnumbered_questions_are_rejected() {
        let err = Track::new(
            TrackId::new("t"),
            "T",
            vec![tf(0), tf(2)],
            TrackSettings::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TrackError::MisnumberedQuestion {
                position: 1,
                index: 2
            }
        );
    }

    #[test]
    fn blank_label_falls_back_to_id() {
        let track =
            Track::new(TrackId::new("y2_3"), " ", vec![tf(0)], TrackSettings::default()).unwrap();
        assert_eq!(track.label(), "y2_3");
        assert_eq!(track.last_index(), 0);
    }
}
