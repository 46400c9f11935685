use quiz_core::model::{Question, QuestionKind, Selection};
use quiz_core::session::QuizSession;
use services::ImageStatuses;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceState {
    Idle,
    Correct,
    Wrong,
}

impl ChoiceState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ChoiceState::Idle => "choice-btn",
            ChoiceState::Correct => "choice-btn correct",
            ChoiceState::Wrong => "choice-btn wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub label: String,
    pub selection: Selection,
    pub state: ChoiceState,
}

/// Image shown above the choices. `src` is only set when the image was found during
/// preflight; otherwise the emoji fallback is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageTileVm {
    pub src: Option<String>,
    pub alt: String,
}

impl ImageTileVm {
    pub const FALLBACK_ICON: &'static str = "🖼️";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionBodyVm {
    Choices {
        image: Option<ImageTileVm>,
        choices: Vec<ChoiceVm>,
    },
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTone {
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub tone: FeedbackTone,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub position_label: String,
    pub progress_pct: u32,
    pub prompt: String,
    pub visual: bool,
    pub body: QuestionBodyVm,
    pub feedback: Option<FeedbackVm>,
    pub hint: Option<String>,
    pub can_advance: bool,
}

#[must_use]
pub fn map_question(session: &QuizSession, question: &Question, images: &ImageStatuses) -> QuestionVm {
    let title = session.content().meta().title();
    let (label, total, visual) = session.track().map_or(("", 0, false), |track| {
        let visual = track
            .questions()
            .iter()
            .any(|q| matches!(q.kind(), QuestionKind::ImageChoice { .. }));
        (track.label(), track.len(), visual)
    });
    let state = session.state();
    let selection = state.and_then(|s| s.selection());
    let verdict = state.and_then(|s| s.verdict());

    let feedback = verdict.map(|correct| {
        let (tone, lead, bare) = if correct {
            (FeedbackTone::Correct, "Correct", "Correct!")
        } else {
            (FeedbackTone::Wrong, "Try again", "Try again.")
        };
        FeedbackVm {
            tone,
            text: question
                .explain()
                .map_or_else(|| bare.to_string(), |explain| format!("{lead}: {explain}")),
        }
    });

    let hint = state
        .filter(|s| s.hint_visible(question.index()))
        .and(question.hint())
        .map(|text| format!("Hint: {text}"));

    QuestionVm {
        heading: format!("{title} — {label}"),
        position_label: format!("Question {} of {total}", question.index() + 1),
        progress_pct: state.map_or(0, quiz_core::session::SessionState::percent_correct),
        prompt: question.prompt().to_string(),
        visual,
        body: map_body(question, selection, verdict, images),
        feedback,
        hint,
        can_advance: session.can_advance(),
    }
}

fn map_body(
    question: &Question,
    selection: Option<Selection>,
    verdict: Option<bool>,
    images: &ImageStatuses,
) -> QuestionBodyVm {
    let state_for = |candidate: Selection| match (selection, verdict) {
        (Some(picked), Some(true)) if picked == candidate => ChoiceState::Correct,
        (Some(picked), Some(false)) if picked == candidate => ChoiceState::Wrong,
        _ => ChoiceState::Idle,
    };
    let indexed = |labels: &[String]| {
        labels
            .iter()
            .enumerate()
            .map(|(idx, label)| ChoiceVm {
                label: label.clone(),
                selection: Selection::Choice(idx),
                state: state_for(Selection::Choice(idx)),
            })
            .collect::<Vec<_>>()
    };

    match question.kind() {
        QuestionKind::MultipleChoice { choices, .. } => QuestionBodyVm::Choices {
            image: None,
            choices: indexed(choices),
        },
        QuestionKind::ImageChoice { choices, image, .. } => QuestionBodyVm::Choices {
            image: Some(ImageTileVm {
                src: image
                    .as_ref()
                    .filter(|image| images.is_ok(image))
                    .map(|image| image.as_str().to_string()),
                alt: question.alt_text().to_string(),
            }),
            choices: indexed(choices),
        },
        QuestionKind::TrueFalse { .. } => QuestionBodyVm::Choices {
            image: None,
            choices: [("True", true), ("False", false)]
                .into_iter()
                .map(|(label, value)| ChoiceVm {
                    label: label.to_string(),
                    selection: Selection::Truth(value),
                    state: state_for(Selection::Truth(value)),
                })
                .collect(),
        },
        QuestionKind::Unsupported { .. } => QuestionBodyVm::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use quiz_core::model::{ContentModel, ImageRef, TrackId};
    use services::ImageStatus;

    const CONTENT: &str = r#"{"meta":{"title":"Quiz"},"modes":{"m":{"label":"Hard",
        "settings":{"advanceOnAnyAnswer":false,"attemptsBeforeHint":2},
        "items":[
            {"type":"mcq-image","prompt":"Which?","image":"img/a.png","alt":"A picture",
             "choices":["A","B"],"answer":1,"explain":"It is B.","hint":"Not A."},
            {"type":"tf","prompt":"True?","answer":true},
            {"type":"essay","prompt":"Write"}
        ]}}}"#;

    fn started() -> QuizSession {
        let mut session = QuizSession::new(Arc::new(ContentModel::from_json(CONTENT).unwrap()));
        session.start_track(&TrackId::new("m")).unwrap();
        session
    }

    fn current(session: &QuizSession, images: &ImageStatuses) -> QuestionVm {
        map_question(session, session.current_question().unwrap(), images)
    }

    #[test]
    fn fresh_question_has_no_feedback() {
        let session = started();
        let vm = current(&session, &ImageStatuses::new());
        assert_eq!(vm.heading, "Quiz — Hard");
        assert_eq!(vm.position_label, "Question 1 of 3");
        assert_eq!(vm.progress_pct, 0);
        assert!(vm.visual);
        assert!(vm.feedback.is_none());
        assert!(vm.hint.is_none());
        assert!(!vm.can_advance);
        let QuestionBodyVm::Choices { image, choices } = vm.body else {
            panic!("expected choices");
        };
        assert_eq!(
            image,
            Some(ImageTileVm {
                src: None,
                alt: "A picture".into()
            })
        );
        assert!(choices.iter().all(|c| c.state == ChoiceState::Idle));
    }

    #[test]
    fn probed_images_are_rendered() {
        let session = started();
        let mut images = ImageStatuses::new();
        images.insert(&ImageRef::parse("img/a.png").unwrap(), ImageStatus::Ok);
        let QuestionBodyVm::Choices { image, .. } = current(&session, &images).body else {
            panic!("expected choices");
        };
        assert_eq!(image.unwrap().src.as_deref(), Some("img/a.png"));
    }

    #[test]
    fn wrong_answers_show_feedback_then_hint() {
        let mut session = started();
        session.select(Selection::Choice(0)).unwrap();
        let vm = current(&session, &ImageStatuses::new());
        assert_eq!(
            vm.feedback,
            Some(FeedbackVm {
                tone: FeedbackTone::Wrong,
                text: "Try again: It is B.".into()
            })
        );
        assert!(vm.hint.is_none());

        session.select(Selection::Choice(0)).unwrap();
        let vm = current(&session, &ImageStatuses::new());
        assert_eq!(vm.hint.as_deref(), Some("Hint: Not A."));
        let QuestionBodyVm::Choices { choices, .. } = vm.body else {
            panic!("expected choices");
        };
        assert_eq!(choices[0].state, ChoiceState::Wrong);
        assert_eq!(choices[1].state, ChoiceState::Idle);
    }

    #[test]
    fn correct_answer_enables_next_and_clears_hint() {
        let mut session = started();
        session.select(Selection::Choice(0)).unwrap();
        session.select(Selection::Choice(0)).unwrap();
        session.select(Selection::Choice(1)).unwrap();
        let vm = current(&session, &ImageStatuses::new());
        assert!(vm.can_advance);
        assert!(vm.hint.is_none());
        assert_eq!(vm.feedback.unwrap().text, "Correct: It is B.");
    }

    #[test]
    fn true_false_and_unsupported_bodies() {
        let mut session = started();
        session.select(Selection::Choice(1)).unwrap();
        session.advance().unwrap();

        session.select(Selection::Truth(true)).unwrap();
        let vm = current(&session, &ImageStatuses::new());
        assert_eq!(vm.progress_pct, 33);
        assert_eq!(vm.feedback.unwrap().text, "Correct!");
        let QuestionBodyVm::Choices { choices, .. } = vm.body else {
            panic!("expected choices");
        };
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["True", "False"]);
        assert_eq!(choices[0].state, ChoiceState::Correct);

        session.advance().unwrap();
        assert_eq!(current(&session, &ImageStatuses::new()).body, QuestionBodyVm::Unsupported);
    }
}
