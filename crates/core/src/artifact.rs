//! The boarding pass handed out when a session completes.
//!
//! Everything here is regenerated on each arrival at the completion screen and never
//! persisted. Randomness comes from a caller-supplied `Rng` so tests can seed it.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset};
use rand::Rng;

use crate::model::{ContentMeta, QuestionKind, Track};
use crate::session::SessionState;

pub const SEAT_ROWS: std::ops::RangeInclusive<u8> = 3..=22;
pub const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const FLIGHT_NUMBERS: std::ops::RangeInclusive<u16> = 100..=999;
pub const BOARDING_OFFSET_MINUTES: i64 = 5;

//
// ─── SEAT / FLIGHT ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    row: u8,
    letter: char,
}

impl Seat {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let row = rng.random_range(SEAT_ROWS);
        let letter = SEAT_LETTERS[rng.random_range(0..SEAT_LETTERS.len())];
        Self { row, letter }
    }

    #[must_use]
    pub fn row(&self) -> u8 {
        self.row
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

/// `prefix` followed by a random three-digit number.
pub fn flight_code<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    format!("{prefix}{}", rng.random_range(FLIGHT_NUMBERS))
}

//
// ─── BARCODE ───────────────────────────────────────────────────────────────────
//

/// One vertical bar, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub x: u32,
    pub width: u32,
}

/// A decorative barcode: one bar per UTF-16 code unit of the input.
///
/// Not a real symbology; it only needs to look different for different inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    bars: Vec<Bar>,
    width: u32,
}

impl Barcode {
    pub const GAP: u32 = 2;
    pub const MARGIN: u32 = 2;
    pub const HEIGHT: u32 = 48;

    /// Bar width for one code unit, always in `2..=8`.
    #[must_use]
    pub fn bar_width(code_unit: u16) -> u32 {
        u32::from(code_unit % 7) + 2
    }

    #[must_use]
    pub fn encode(text: &str) -> Self {
        let mut bars = Vec::with_capacity(text.len());
        let mut x = 0_u32;
        for unit in text.encode_utf16() {
            let width = Self::bar_width(unit);
            bars.push(Bar { x, width });
            x += width + Self::GAP;
        }
        let end = bars.last().map_or(0, |bar| bar.x + bar.width);
        Self {
            bars,
            width: end + Self::MARGIN,
        }
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Total width: last bar's right edge plus the trailing margin.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        Self::HEIGHT
    }
}

//
// ─── COMPLETION TIER ───────────────────────────────────────────────────────────
//

/// How well the player did; thresholds are fixed at 70% and 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTier {
    Retry,
    Good,
    Full,
}

impl CompletionTier {
    #[must_use]
    pub fn from_score(collected: usize, total: usize) -> Self {
        if total == 0 || collected * 10 < total * 7 {
            CompletionTier::Retry
        } else if collected >= total {
            CompletionTier::Full
        } else {
            CompletionTier::Good
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            CompletionTier::Retry => "Try again to collect more stickers.",
            CompletionTier::Good => "Great work, aim for a full set!",
            CompletionTier::Full => "Full set! Show your ticket to your teacher.",
        }
    }
}

//
// ─── STICKERS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerKind {
    Star,
    Picture,
    Tick,
}

impl StickerKind {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            StickerKind::Star => "⭐",
            StickerKind::Picture => "🖼️",
            StickerKind::Tick => "✔️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sticker {
    pub kind: StickerKind,
    pub collected: bool,
}

//
// ─── BOARDING PASS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardingPass {
    pub airline: String,
    pub gate: String,
    pub track_label: String,
    pub seat: Seat,
    pub flight_code: String,
    pub boarding_time: String,
    pub issued_on: String,
    pub collected: usize,
    pub total: usize,
    pub tier: CompletionTier,
    pub barcode: Barcode,
    pub stickers: Vec<Sticker>,
}

impl BoardingPass {
    /// Issue a fresh pass for a finished session. Seat and flight are re-rolled each call.
    pub fn issue<R: Rng + ?Sized>(
        meta: &ContentMeta,
        track: &Track,
        state: &SessionState,
        issued_at: DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Self {
        let seat = Seat::random(rng);
        let flight_code = flight_code(meta.flight_prefix(), rng);
        let boarding = issued_at + Duration::minutes(BOARDING_OFFSET_MINUTES);
        let collected = state.correct_count();
        let total = track.len();

        let stickers = track
            .questions()
            .iter()
            .map(|q| Sticker {
                kind: match q.kind() {
                    QuestionKind::ImageChoice { .. } => StickerKind::Picture,
                    QuestionKind::TrueFalse { .. } => StickerKind::Tick,
                    QuestionKind::MultipleChoice { .. } | QuestionKind::Unsupported { .. } => {
                        StickerKind::Star
                    }
                },
                collected: state.is_correct(q.index()),
            })
            .collect();

        Self {
            airline: meta.airline().to_string(),
            gate: meta.gate().to_string(),
            track_label: track.label().to_string(),
            seat,
            barcode: Barcode::encode(&flight_code),
            flight_code,
            boarding_time: boarding.format("%H:%M").to_string(),
            issued_on: issued_at.format("%d %b %Y").to_string(),
            collected,
            total,
            tier: CompletionTier::from_score(collected, total),
            stickers,
        }
    }
}
