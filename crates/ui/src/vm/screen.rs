use dioxus::prelude::*;
use quiz_core::artifact::BoardingPass;
use quiz_core::model::{ContentModel, Question, Selection, TrackId};
use quiz_core::session::QuizSession;
use services::{ImageStatuses, QuizView};

use super::{BoardingPassVm, LandingVm, QuestionVm, map_boarding_pass, map_landing, map_question};

/// What the root component is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Unavailable,
    Landing(LandingVm),
    Question(QuestionVm),
    Completion(BoardingPassVm),
}

/// User intents forwarded to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizAction {
    ChooseTrack(TrackId),
    Select(Selection),
    Next,
    Restart,
    SwitchTrack,
}

/// `QuizView` that maps each render call into a view model and publishes it.
#[derive(Clone, Copy)]
pub struct SignalView {
    screen: Signal<Screen>,
}

impl SignalView {
    #[must_use]
    pub fn new(screen: Signal<Screen>) -> Self {
        Self { screen }
    }
}

impl QuizView for SignalView {
    fn render_unavailable(&mut self) {
        self.screen.set(Screen::Unavailable);
    }

    fn render_landing(&mut self, content: &ContentModel) {
        self.screen.set(Screen::Landing(map_landing(content)));
    }

    fn render_question(&mut self, session: &QuizSession, question: &Question, images: &ImageStatuses) {
        self.screen
            .set(Screen::Question(map_question(session, question, images)));
    }

    fn render_completion(&mut self, pass: &BoardingPass, _session: &QuizSession) {
        self.screen.set(Screen::Completion(map_boarding_pass(pass)));
    }
}
