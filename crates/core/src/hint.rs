use crate::model::{Question, TrackSettings};

/// When a hint may be shown for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPolicy {
    threshold: u32,
}

impl HintPolicy {
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn from_settings(settings: &TrackSettings) -> Self {
        Self::new(settings.attempts_before_hint())
    }

    /// A threshold of zero disables hints entirely.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }

    /// True once `wrong_attempts` reaches the threshold and the question has a hint.
    #[must_use]
    pub fn should_reveal(&self, question: &Question, wrong_attempts: u32) -> bool {
        self.is_enabled() && question.hint().is_some() && wrong_attempts >= self.threshold
    }
}

/// Wrong-attempt counters and hint visibility, one slot per question position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintTracker {
    attempts: Vec<u32>,
    visible: Vec<bool>,
}

impl HintTracker {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            attempts: vec![0; len],
            visible: vec![false; len],
        }
    }

    /// Count a wrong selection and return whether the hint is now visible.
    pub fn record_wrong(&mut self, policy: HintPolicy, question: &Question) -> bool {
        let index = question.index();
        let Some(count) = self.attempts.get_mut(index) else {
            return false;
        };
        *count = count.saturating_add(1);
        if policy.should_reveal(question, *count) {
            self.visible[index] = true;
        }
        self.visible[index]
    }

    /// A correct selection hides the hint; the counter is kept.
    pub fn record_correct(&mut self, index: usize) {
        if let Some(flag) = self.visible.get_mut(index) {
            *flag = false;
        }
    }

    #[must_use]
    pub fn attempts(&self, index: usize) -> u32 {
        self.attempts.get(index).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn hinted() -> Question {
        Question::new(0, "p", QuestionKind::TrueFalse { answer: true }).with_hint("Think sunny")
    }

    #[test]
    fn reveals_on_threshold_not_before() {
        let policy = HintPolicy::new(2);
        let mut tracker = HintTracker::new(1);
        assert!(!tracker.record_wrong(policy, &hinted()));
        assert!(tracker.record_wrong(policy, &hinted()));
        assert_eq!(tracker.attempts(0), 2);
    }

    #[test]
    fn zero_threshold_disables_hints() {
        let policy = HintPolicy::new(0);
        let mut tracker = HintTracker::new(1);
        for _ in 0..5 {
            assert!(!tracker.record_wrong(policy, &hinted()));
        }
    }

    #[test]
    fn no_hint_text_means_no_hint() {
        let plain = Question::new(0, "p", QuestionKind::TrueFalse { answer: true });
        let mut tracker = HintTracker::new(1);
        assert!(!tracker.record_wrong(HintPolicy::new(1), &plain));
    }

    #[test]
    fn correct_clears_visibility_but_keeps_count() {
        let policy = HintPolicy::new(1);
        let mut tracker = HintTracker::new(1);
        assert!(tracker.record_wrong(policy, &hinted()));
        tracker.record_correct(0);
        assert!(!tracker.is_visible(0));
        assert_eq!(tracker.attempts(0), 1);
        // Counter is already past the threshold, so the next miss shows it again.
        assert!(tracker.record_wrong(policy, &hinted()));
    }
}
