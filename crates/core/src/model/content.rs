use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::ids::TrackId;
use crate::model::image::ImageRef;
use crate::model::question::{Question, QuestionError, QuestionKind};
use crate::model::track::{Track, TrackError, TrackSettings};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Parse(String),

    #[error("content defines no tracks")]
    NoTracks,

    #[error("track {track}: {source}")]
    Track {
        track: TrackId,
        #[source]
        source: TrackError,
    },

    #[error("track {track}, question {index}: {source}")]
    Question {
        track: TrackId,
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── META ──────────────────────────────────────────────────────────────────────
//

/// Content-wide metadata used by the completion artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMeta {
    title: String,
    airline: String,
    gate: String,
    flight_prefix: String,
}

impl ContentMeta {
    pub const DEFAULT_TITLE: &'static str = "Escape Room";
    pub const DEFAULT_AIRLINE: &'static str = "Escape Air";
    pub const DEFAULT_GATE: &'static str = "A7";
    pub const DEFAULT_FLIGHT_PREFIX: &'static str = "EIS-ES";

    #[must_use]
    pub fn new(
        title: impl Into<String>,
        airline: impl Into<String>,
        gate: impl Into<String>,
        flight_prefix: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            airline: airline.into(),
            gate: gate.into(),
            flight_prefix: flight_prefix.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn airline(&self) -> &str {
        &self.airline
    }

    #[must_use]
    pub fn gate(&self) -> &str {
        &self.gate
    }

    #[must_use]
    pub fn flight_prefix(&self) -> &str {
        &self.flight_prefix
    }
}

impl Default for ContentMeta {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TITLE,
            Self::DEFAULT_AIRLINE,
            Self::DEFAULT_GATE,
            Self::DEFAULT_FLIGHT_PREFIX,
        )
    }
}

//
// ─── CONTENT MODEL ─────────────────────────────────────────────────────────────
//

/// All tracks and metadata, loaded once at startup. Tracks are ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentModel {
    meta: ContentMeta,
    tracks: Vec<Track>,
}

impl ContentModel {
    /// # Errors
    ///
    /// Returns `ContentError::NoTracks` if `tracks` is empty.
    pub fn new(meta: ContentMeta, tracks: Vec<Track>) -> Result<Self, ContentError> {
        if tracks.is_empty() {
            return Err(ContentError::NoTracks);
        }
        Ok(Self { meta, tracks })
    }

    /// Parse the JSON content format (`meta` + `modes` keyed by track id).
    ///
    /// Unknown question types load as unsupported questions rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` for malformed JSON, empty tracks, or invalid answer keys.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let parsed: RawContent =
            serde_json::from_str(raw).map_err(|err| ContentError::Parse(err.to_string()))?;

        let meta = parsed.meta.into_meta();
        let mut tracks = Vec::with_capacity(parsed.modes.len());
        for (key, raw_track) in parsed.modes {
            tracks.push(raw_track.into_track(TrackId::new(key))?);
        }
        Self::new(meta, tracks)
    }

    #[must_use]
    pub fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Every image reference across all tracks, in track then question order.
    pub fn image_refs(&self) -> impl Iterator<Item = &ImageRef> {
        self.tracks
            .iter()
            .flat_map(|t| t.questions().iter())
            .filter_map(Question::image)
    }
}

//
// ─── RAW (wire) SHAPES ─────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(default)]
    meta: RawMeta,
    #[serde(default)]
    modes: BTreeMap<String, RawTrack>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    title: Option<String>,
    airline: Option<String>,
    gate: Option<String>,
    flight_prefix: Option<String>,
}

impl RawMeta {
    fn into_meta(self) -> ContentMeta {
        let title = non_blank(self.title);
        let flight_prefix = non_blank(self.flight_prefix)
            .or_else(|| title.clone())
            .unwrap_or_else(|| ContentMeta::DEFAULT_FLIGHT_PREFIX.to_string());
        ContentMeta::new(
            title.unwrap_or_else(|| ContentMeta::DEFAULT_TITLE.to_string()),
            non_blank(self.airline).unwrap_or_else(|| ContentMeta::DEFAULT_AIRLINE.to_string()),
            non_blank(self.gate).unwrap_or_else(|| ContentMeta::DEFAULT_GATE.to_string()),
            flight_prefix,
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    settings: RawSettings,
    #[serde(default)]
    items: Vec<RawItem>,
}

impl RawTrack {
    fn into_track(self, id: TrackId) -> Result<Track, ContentError> {
        let settings = self.settings.into_settings();
        let mut questions = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.into_iter().enumerate() {
            let question = item
                .into_question(index)
                .map_err(|source| ContentError::Question {
                    track: id.clone(),
                    index,
                    source,
                })?;
            questions.push(question);
        }
        Track::new(id.clone(), self.label.unwrap_or_default(), questions, settings)
            .map_err(|source| ContentError::Track { track: id, source })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    advance_on_any_answer: Option<Value>,
    attempts_before_hint: Option<Value>,
}

impl RawSettings {
    fn into_settings(self) -> TrackSettings {
        // Only a literal `false` switches to mastery mode.
        let any_answer = !matches!(self.advance_on_any_answer, Some(Value::Bool(false)));
        let attempts = self
            .attempts_before_hint
            .as_ref()
            .and_then(hint_threshold)
            .unwrap_or(TrackSettings::DEFAULT_ATTEMPTS_BEFORE_HINT);
        TrackSettings::new(any_answer, attempts)
    }
}

/// Any non-negative number is a threshold. Attempts are whole, so fractions round up
/// and values past `u32::MAX` saturate.
fn hint_threshold(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).unwrap_or(u32::MAX));
    }
    let n = value.as_f64().filter(|n| *n >= 0.0)?;
    // `as` saturates for floats, including infinity.
    Some(n.ceil() as u32)
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    answer: Value,
    explain: Option<String>,
    hint: Option<String>,
    image: Option<String>,
    alt: Option<String>,
}

impl RawItem {
    fn into_question(self, index: usize) -> Result<Question, QuestionError> {
        let kind = match self.kind.as_str() {
            "mcq" => QuestionKind::multiple_choice(self.choices, answer_index(&self.answer)?)?,
            "mcq-image" => {
                let image = self
                    .image
                    .as_deref()
                    .and_then(|raw| ImageRef::parse(raw).ok());
                QuestionKind::image_choice(self.choices, answer_index(&self.answer)?, image)?
            }
            "tf" => QuestionKind::TrueFalse {
                answer: self.answer.as_bool().ok_or(QuestionError::InvalidAnswer {
                    expected: "a boolean",
                })?,
            },
            other => QuestionKind::Unsupported {
                tag: other.to_string(),
            },
        };

        let mut question = Question::new(index, self.prompt, kind);
        if let Some(explain) = self.explain {
            question = question.with_explain(explain);
        }
        if let Some(hint) = self.hint {
            question = question.with_hint(hint);
        }
        if let Some(alt) = self.alt {
            question = question.with_alt(alt);
        }
        Ok(question)
    }
}

fn answer_index(value: &Value) -> Result<usize, QuestionError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(QuestionError::InvalidAnswer {
            expected: "a choice index",
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::AdvanceMode;

    const SAMPLE: &str = r#"{
        "meta": { "title": "Spanish Escape", "gate": "B2" },
        "modes": {
            "y4_6": {
                "label": "Years 4-6",
                "settings": { "advanceOnAnyAnswer": false, "attemptsBeforeHint": 3 },
                "items": [
                    { "type": "mcq", "prompt": "Capital?", "choices": ["Madrid", "Rome"], "answer": 0, "hint": "Centre" },
                    { "type": "tf", "prompt": "Tapas are small plates.", "answer": true },
                    { "type": "mcq-image", "prompt": "Which dish?", "choices": ["Paella", "Sushi"], "answer": 0, "image": "assets/paella.png", "alt": "A pan of rice" },
                    { "type": "drag", "prompt": "Order these" }
                ]
            },
            "y2_3": {
                "label": "Years 2-3",
                "items": [ { "type": "tf", "prompt": "Spain is in Europe.", "answer": true } ]
            }
        }
    }"#;

    #[test]
    fn parses_tracks_in_id_order_with_settings() {
        let content = ContentModel::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = content.tracks().iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["y2_3", "y4_6"]);

        let y23 = content.track(&TrackId::new("y2_3")).unwrap();
        assert_eq!(y23.settings().advance_mode(), AdvanceMode::AnyAnswer);
        assert_eq!(y23.settings().attempts_before_hint(), 2);

        let y46 = content.track(&TrackId::new("y4_6")).unwrap();
        assert_eq!(y46.settings().advance_mode(), AdvanceMode::Mastery);
        assert_eq!(y46.settings().attempts_before_hint(), 3);
        assert_eq!(y46.len(), 4);
        assert_eq!(y46.question(0).unwrap().hint(), Some("Centre"));
        assert_eq!(y46.question(2).unwrap().alt_text(), "A pan of rice");
    }

    #[test]
    fn unknown_types_become_unsupported() {
        let content = ContentModel::from_json(SAMPLE).unwrap();
        let q = content.track(&TrackId::new("y4_6")).unwrap().question(3).unwrap();
        assert!(!q.is_supported());
        assert_eq!(q.kind().tag(), "drag");
    }

    #[test]
    fn meta_defaults_and_prefix_fallback() {
        let content = ContentModel::from_json(SAMPLE).unwrap();
        assert_eq!(content.meta().gate(), "B2");
        assert_eq!(content.meta().airline(), ContentMeta::DEFAULT_AIRLINE);
        assert_eq!(content.meta().flight_prefix(), "Spanish Escape");
        assert_eq!(content.image_refs().count(), 1);
    }

    #[test]
    fn negative_hint_threshold_uses_default() {
        let raw = r#"{ "modes": { "a": { "settings": { "attemptsBeforeHint": -1 },
            "items": [ { "type": "tf", "prompt": "p", "answer": false } ] } } }"#;
        let content = ContentModel::from_json(raw).unwrap();
        assert_eq!(content.tracks()[0].settings().attempts_before_hint(), 2);
        assert_eq!(content.meta().flight_prefix(), ContentMeta::DEFAULT_FLIGHT_PREFIX);
    }

    fn threshold_of(raw_threshold: &str) -> u32 {
        let raw = format!(
            r#"{{ "modes": {{ "a": {{ "settings": {{ "attemptsBeforeHint": {raw_threshold} }},
            "items": [ {{ "type": "tf", "prompt": "p", "answer": true }} ] }} }} }}"#
        );
        ContentModel::from_json(&raw).unwrap().tracks()[0]
            .settings()
            .attempts_before_hint()
    }

    #[test]
    fn numeric_hint_thresholds_are_honoured() {
        assert_eq!(threshold_of("3.0"), 3);
        assert_eq!(threshold_of("1.5"), 2);
        assert_eq!(threshold_of("0"), 0);
        assert_eq!(threshold_of("5000000000"), u32::MAX);
        assert_eq!(threshold_of("1e300"), u32::MAX);
        assert_eq!(threshold_of("-0.5"), 2);
        assert_eq!(threshold_of("\"3\""), 2);
    }

    #[test]
    fn wrong_answer_type_is_an_error() {
        let raw = r#"{ "modes": { "a": { "items": [ { "type": "tf", "prompt": "p", "answer": 1 } ] } } }"#;
        let err = ContentModel::from_json(raw).unwrap_err();
        assert!(matches!(err, ContentError::Question { index: 0, .. }));
    }

    #[test]
    fn empty_modes_and_garbage_are_errors() {
        assert_eq!(
            ContentModel::from_json(r#"{ "modes": {} }"#).unwrap_err(),
            ContentError::NoTracks
        );
        assert!(matches!(
            ContentModel::from_json("not json").unwrap_err(),
            ContentError::Parse(_)
        ));
        assert!(matches!(
            ContentModel::from_json(r#"{ "modes": { "a": { "items": [] } } }"#).unwrap_err(),
            ContentError::Track { source: TrackError::NoQuestions, .. }
        ));
    }
}
