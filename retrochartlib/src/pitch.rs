//! Pitch sequence decoding.
//!
//! A Retrosheet pitch sequence is a string with one character per pitch or
//! pitch-adjacent event, e.g. `B1BCC>X`: ball, pickoff throw to first, ball,
//! called strike, called strike, runner going, ball in play. Decoding walks the
//! string once, in order, and keeps four tallies:
//!
//! - **ball** / **strike**: characters in the ball set (`B I`) or strike set
//!   (`C F K S T`); everything else leaves both untouched
//! - **pitches**: characters delivered to the batter
//! - **pickoff**: pickoff throws (`1 2 3`)

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::codes::{pitch_token, EventCode, EventLabel, PitchClass};

/// Ball/strike count as it would be shown on a scoreboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BallCount {
    pub ball: u32,
    pub strike: u32,
}

impl BallCount {
    pub const MAX_BALLS: u32 = 3;
    pub const MAX_STRIKES: u32 = 2;

    /// Clamp raw tallies to the legal range (at most 3 balls, 2 strikes).
    pub fn clamped(ball: u32, strike: u32) -> Self {
        Self {
            ball: ball.min(Self::MAX_BALLS),
            strike: strike.min(Self::MAX_STRIKES),
        }
    }
}

impl fmt::Display for BallCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ball, self.strike)
    }
}

/// A decoded pitch sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PitchSequence {
    /// One label per input character; `None` where the character is unknown.
    pub seq: Vec<Option<&'static str>>,
    pub ball: u32,
    pub strike: u32,
    pub pitches: u32,
    pub pickoff: u32,
    /// Clamped count for display
    pub ball_count: BallCount,
    /// Labels of the terminal event, `None` for codes outside the modeled groups
    pub event: Option<&'static [EventLabel]>,
}

impl PitchSequence {
    fn record(&mut self, symbol: char) {
        let Some(token) = pitch_token(symbol) else {
            trace!(%symbol, "unmapped pitch token");
            self.seq.push(None);
            return;
        };

        self.seq.push(Some(token.label));
        if token.class.is_batter_facing() {
            self.pitches += 1;
        }
        match token.class {
            PitchClass::Pickoff => self.pickoff += 1,
            PitchClass::Strike => self.strike += 1,
            PitchClass::Ball => self.ball += 1,
            PitchClass::InPlay | PitchClass::OtherPitch | PitchClass::Marker => {}
        }
    }
}

/// Decode a pitch sequence for an event with the given code.
///
/// # Example
///
/// ```rust
/// use retrochartlib::{decode_pitch_sequence, EventCode};
///
/// let pitches = decode_pitch_sequence("CFBBFBFC", EventCode::new(3));
/// assert_eq!((pitches.ball, pitches.strike), (3, 5));
/// assert_eq!(pitches.ball_count.to_string(), "3-2");
/// ```
pub fn decode_pitch_sequence(text: &str, code: EventCode) -> PitchSequence {
    let mut sequence = PitchSequence::default();
    for symbol in text.chars() {
        sequence.record(symbol);
    }
    sequence.ball_count = BallCount::clamped(sequence.ball, sequence.strike);
    sequence.event = code.labels();
    sequence
}

/// Whether the first pitch to the batter was a strike.
///
/// Pickoff throws and markers are skipped. The first remaining character
/// decides: a strike or a ball put into play is `true`, anything else is
/// `false`. A sequence with no such character yields `None`.
pub fn is_first_strike(text: &str) -> Option<bool> {
    for symbol in text.chars() {
        let class = pitch_token(symbol).map(|t| t.class);
        match class {
            Some(PitchClass::Pickoff | PitchClass::Marker) => continue,
            Some(PitchClass::Strike | PitchClass::InPlay) => return Some(true),
            _ => return Some(false),
        }
    }
    None
}
