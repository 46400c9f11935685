use quiz_core::artifact::BoardingPass;
use quiz_core::model::{ContentModel, Question};
use quiz_core::session::QuizSession;

use crate::asset_prober::ImageStatuses;

/// Presentation collaborator driven by `QuizController` after every transition.
///
/// Implementations only read what they are given; all state changes go through the
/// controller.
pub trait QuizView {
    /// No question data could be loaded.
    fn render_unavailable(&mut self);

    fn render_landing(&mut self, content: &ContentModel);

    fn render_question(&mut self, session: &QuizSession, question: &Question, images: &ImageStatuses);

    fn render_completion(&mut self, pass: &BoardingPass, session: &QuizSession);
}
