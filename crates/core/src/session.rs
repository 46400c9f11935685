use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::evaluator::evaluate;
use crate::hint::{HintPolicy, HintTracker};
use crate::model::{ContentModel, Question, Selection, Track, TrackId};
use crate::progression::{Progress, Step, policy_for};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A rejected transition. Session state is never changed when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unknown track: {0}")]
    UnknownTrack(TrackId),

    #[error("no track has been chosen")]
    NoActiveTrack,

    #[error("session is complete")]
    Completed,

    #[error("selection does not fit the current question")]
    InvalidSelection,

    #[error("advance is not available for the current selection")]
    AdvanceBlocked,
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// The durable part of a session: which track, and which questions were answered correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub track_id: TrackId,
    pub correct: BTreeSet<usize>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(track_id: TrackId, correct: impl IntoIterator<Item = usize>) -> Self {
        Self {
            track_id,
            correct: correct.into_iter().collect(),
        }
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Landing,
    InQuestion(usize),
    Complete,
}

/// Result of confirming a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub correct: bool,
    pub hint_visible: bool,
}

/// Result of an advance action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub step: Step,
    /// The question just left was added to the correct set by this advance.
    pub newly_correct: bool,
}

/// Runtime state for the active track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    track_id: TrackId,
    len: usize,
    index: usize,
    correct: BTreeSet<usize>,
    selection: Option<Selection>,
    verdict: Option<bool>,
    hints: HintTracker,
    visited: Vec<bool>,
    complete: bool,
}

impl SessionState {
    fn fresh(track: &Track) -> Self {
        let len = track.len();
        Self {
            track_id: track.id().clone(),
            len,
            index: 0,
            correct: BTreeSet::new(),
            selection: None,
            verdict: None,
            hints: HintTracker::new(len),
            visited: vec![false; len],
            complete: false,
        }
    }

    fn enter(&mut self, index: usize) {
        self.index = index;
        self.selection = None;
        self.verdict = None;
    }

    #[must_use]
    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn correct(&self) -> &BTreeSet<usize> {
        &self.correct
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct.len()
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct.contains(&index)
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Whether the current selection was correct; `None` until something is picked.
    #[must_use]
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    #[must_use]
    pub fn wrong_attempts(&self, index: usize) -> u32 {
        self.hints.attempts(index)
    }

    #[must_use]
    pub fn hint_visible(&self, index: usize) -> bool {
        self.hints.is_visible(index)
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whole-number percentage of questions answered correctly.
    #[must_use]
    pub fn percent_correct(&self) -> u32 {
        if self.len == 0 {
            return 0;
        }
        let pct = (self.correct.len() * 200 + self.len) / (self.len * 2);
        u32::try_from(pct).unwrap_or(100)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The quiz state machine: `Landing` → `InQuestion(index)` → `Complete`.
///
/// Every mutating operation validates first and commits second, so an `Err` leaves the
/// session exactly as it was.
#[derive(Clone)]
pub struct QuizSession {
    content: Arc<ContentModel>,
    state: Option<SessionState>,
}

impl QuizSession {
    #[must_use]
    pub fn new(content: Arc<ContentModel>) -> Self {
        Self {
            content,
            state: None,
        }
    }

    #[must_use]
    pub fn content(&self) -> &ContentModel {
        &self.content
    }

    #[must_use]
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Landing,
            Some(state) if state.complete => Phase::Complete,
            Some(state) => Phase::InQuestion(state.index),
        }
    }

    /// The active track, if one has been chosen.
    #[must_use]
    pub fn track(&self) -> Option<&Track> {
        self.state
            .as_ref()
            .and_then(|state| self.content.track(&state.track_id))
    }

    /// The question being shown; `None` on the landing and completion screens.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase() {
            Phase::InQuestion(index) => self.track().and_then(|t| t.question(index)),
            Phase::Landing | Phase::Complete => None,
        }
    }

    /// Begin `id` from scratch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownTrack` if the content has no such track.
    pub fn start_track(&mut self, id: &TrackId) -> Result<(), SessionError> {
        let track = self
            .content
            .track(id)
            .ok_or_else(|| SessionError::UnknownTrack(id.clone()))?;
        self.state = Some(SessionState::fresh(track));
        Ok(())
    }

    /// Reset all progress on the active track.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveTrack` on the landing screen.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let id = self
            .state
            .as_ref()
            .map(|state| state.track_id.clone())
            .ok_or(SessionError::NoActiveTrack)?;
        self.start_track(&id)
    }

    /// Drop the active track and return to the landing screen.
    pub fn switch_track(&mut self) {
        self.state = None;
    }

    /// Confirm a pick for the current question, updating hint state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when no question is showing or the selection does not fit it.
    pub fn select(&mut self, selection: Selection) -> Result<SelectionOutcome, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoActiveTrack)?;
        if state.complete {
            return Err(SessionError::Completed);
        }
        let track = self
            .content
            .track(&state.track_id)
            .ok_or(SessionError::NoActiveTrack)?;
        let question = track
            .question(state.index)
            .ok_or(SessionError::NoActiveTrack)?;
        if !question.accepts(selection) {
            return Err(SessionError::InvalidSelection);
        }

        let correct = evaluate(question, Some(selection));
        state.selection = Some(selection);
        state.verdict = Some(correct);
        if correct {
            state.hints.record_correct(state.index);
        } else {
            state
                .hints
                .record_wrong(HintPolicy::from_settings(track.settings()), question);
        }

        Ok(SelectionOutcome {
            correct,
            hint_visible: state.hints.is_visible(state.index),
        })
    }

    /// Whether the advance control should be enabled right now.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        let Some(state) = self.state.as_ref().filter(|s| !s.complete) else {
            return false;
        };
        let Some(track) = self.content.track(&state.track_id) else {
            return false;
        };
        let Some(question) = track.question(state.index) else {
            return false;
        };
        let correct = evaluate(question, state.selection);
        policy_for(track.settings().advance_mode()).can_advance(question, state.selection, correct)
    }

    /// Leave the current question: record it, then move on or complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdvanceBlocked` when the track's policy does not allow
    /// advancing with the current selection.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoActiveTrack)?;
        if state.complete {
            return Err(SessionError::Completed);
        }
        let track = self
            .content
            .track(&state.track_id)
            .ok_or(SessionError::NoActiveTrack)?;
        let question = track
            .question(state.index)
            .ok_or(SessionError::NoActiveTrack)?;
        let policy = policy_for(track.settings().advance_mode());
        let correct = evaluate(question, state.selection);
        if !policy.can_advance(question, state.selection, correct) {
            return Err(SessionError::AdvanceBlocked);
        }

        let index = state.index;
        let newly_correct = correct && state.correct.insert(index);
        state.visited[index] = true;

        let step = policy.next_step(&Progress {
            index,
            len: state.len,
            correct: &state.correct,
            visited: &state.visited,
        });
        match step {
            Step::Goto(next) => state.enter(next),
            Step::Complete => {
                state.complete = true;
                state.selection = None;
                state.verdict = None;
            }
        }

        Ok(AdvanceOutcome {
            step,
            newly_correct,
        })
    }

    /// Resume from a persisted snapshot.
    ///
    /// Returns `false` and leaves the session untouched when the snapshot's track is not
    /// in the loaded content. Out-of-range indices are dropped.
    pub fn resume(&mut self, snapshot: &ProgressSnapshot) -> bool {
        let Some(track) = self.content.track(&snapshot.track_id) else {
            return false;
        };
        let mut state = SessionState::fresh(track);
        state.correct = snapshot
            .correct
            .iter()
            .copied()
            .filter(|idx| *idx < track.len())
            .collect();
        let index = state.correct.len().min(track.last_index());
        state.enter(index);
        self.state = Some(state);
        true
    }

    /// What would be persisted right now.
    #[must_use]
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        self.state.as_ref().map(|state| ProgressSnapshot {
            track_id: state.track_id.clone(),
            correct: state.correct.clone(),
        })
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("tracks_len", &self.content.tracks().len())
            .field("phase", &self.phase())
            .field("state", &self.state)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
