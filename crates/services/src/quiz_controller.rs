use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::artifact::BoardingPass;
use quiz_core::model::{ContentModel, Selection, TrackId};
use quiz_core::session::{AdvanceOutcome, Phase, QuizSession, SelectionOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::asset_prober::ImageStatuses;
use crate::error::QuizError;
use crate::persistence::PersistenceGateway;
use crate::view::QuizView;

/// Drives a `QuizSession` from user actions, persisting progress and re-rendering the
/// view after each transition.
///
/// The controller is the single owner of session state; every action runs to completion
/// (including any storage write it awaits) before the next one is accepted.
pub struct QuizController<V: QuizView> {
    session: Option<QuizSession>,
    images: ImageStatuses,
    gateway: PersistenceGateway,
    view: V,
    clock: Clock,
    rng: StdRng,
    pass: Option<BoardingPass>,
}

impl<V: QuizView> QuizController<V> {
    /// `content` is `None` when nothing could be loaded; the controller then only ever
    /// renders the unavailable state.
    #[must_use]
    pub fn new(
        content: Option<Arc<ContentModel>>,
        images: ImageStatuses,
        gateway: PersistenceGateway,
        view: V,
        clock: Clock,
    ) -> Self {
        Self {
            session: content.map(QuizSession::new),
            images,
            gateway,
            view,
            clock,
            rng: StdRng::from_os_rng(),
            pass: None,
        }
    }

    /// Replace the random source used for boarding passes.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn images(&self) -> &ImageStatuses {
        &self.images
    }

    /// The pass shown by the most recent completion render.
    #[must_use]
    pub fn boarding_pass(&self) -> Option<&BoardingPass> {
        self.pass.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Resume saved progress if possible, then render the first screen.
    ///
    /// Returns whether a saved session was resumed.
    pub async fn start(&mut self) -> bool {
        let resumed = match self.session.as_mut() {
            Some(session) => self.gateway.restore(session).await,
            None => false,
        };
        self.render();
        resumed
    }

    /// Begin `id` from its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoContent` without content, or `QuizError::Session` for an
    /// unknown track.
    pub fn choose_track(&mut self, id: &TrackId) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoContent)?;
        session.start_track(id)?;
        debug!(track = %id, "track chosen");
        self.pass = None;
        self.render();
        Ok(())
    }

    /// Confirm a pick for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if no question is showing or the pick does not fit it.
    pub fn select(&mut self, selection: Selection) -> Result<SelectionOutcome, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoContent)?;
        let outcome = session.select(selection)?;
        debug!(?selection, correct = outcome.correct, hint = outcome.hint_visible, "selection");
        self.render();
        Ok(outcome)
    }

    /// Whether the advance control should be enabled.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.as_ref().is_some_and(QuizSession::can_advance)
    }

    /// Leave the current question. Saves progress when the answer was newly correct; on
    /// completion the render issues a fresh boarding pass.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when advancing is not allowed; state is left unchanged.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoContent)?;
        let outcome = session.advance()?;
        if outcome.newly_correct {
            if let Some(snapshot) = session.snapshot() {
                self.gateway.save(&snapshot).await;
            }
        }
        debug!(step = ?outcome.step, newly_correct = outcome.newly_correct, "advance");
        self.render();
        Ok(outcome)
    }

    /// Reset progress on the active track and drop the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when no track is active.
    pub async fn restart(&mut self) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoContent)?;
        session.restart()?;
        self.gateway.clear().await;
        debug!("track restarted");
        self.pass = None;
        self.render();
        Ok(())
    }

    /// Return to track selection. Saved progress is kept.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoContent` without content.
    pub fn switch_track(&mut self) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoContent)?;
        session.switch_track();
        debug!("returned to track selection");
        self.pass = None;
        self.render();
        Ok(())
    }

    fn issue_pass(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let (Some(track), Some(state)) = (session.track(), session.state()) else {
            return;
        };
        let pass = BoardingPass::issue(
            session.content().meta(),
            track,
            state,
            self.clock.now_local(),
            &mut self.rng,
        );
        debug!(
            flight = %pass.flight_code,
            collected = pass.collected,
            total = pass.total,
            "session complete"
        );
        self.pass = Some(pass);
    }

    /// Render whatever the current phase calls for.
    pub fn render(&mut self) {
        let Some(session) = self.session.as_ref() else {
            self.view.render_unavailable();
            return;
        };
        match session.phase() {
            Phase::Landing => self.view.render_landing(session.content()),
            Phase::InQuestion(_) => match session.current_question() {
                Some(question) => self.view.render_question(session, question, &self.images),
                None => self.view.render_unavailable(),
            },
            Phase::Complete => {
                // Seat and flight are re-rolled on every arrival, re-renders included.
                self.issue_pass();
                let Some(session) = self.session.as_ref() else {
                    return;
                };
                match self.pass.as_ref() {
                    Some(pass) => self.view.render_completion(pass, session),
                    None => self.view.render_unavailable(),
                }
            }
        }
    }
}
