//! Input row types handed to the core by the storage layer.
//!
//! Rows are deserialized with serde. Field names follow the column names of
//! the Retrosheet database export (`game_dt`, `event_cd`, `event_tx`, ...) as
//! aliases, so a query result can be fed in without renaming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::codes::{EventCategory, EventCode};
use crate::error::RetrochartError;

/// A game date in `YYYYMMDD` form.
///
/// Validated on construction: exactly eight ASCII digits with a month in
/// 1..=12 and a day in 1..=31.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameDate(String);

impl GameDate {
    pub fn year(&self) -> i32 {
        self.digits(0..4) as i32
    }

    /// Month number, taken from characters 5-6.
    pub fn month(&self) -> u32 {
        self.digits(4..6)
    }

    pub fn day(&self) -> u32 {
        self.digits(6..8)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self, range: std::ops::Range<usize>) -> u32 {
        // Only ASCII digits are admitted by `from_str`.
        self.0[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }
}

impl FromStr for GameDate {
    type Err = RetrochartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RetrochartError::invalid_input(
                "game date",
                s,
                "expected eight digits (YYYYMMDD)",
            ));
        }

        let date = GameDate(s.to_string());
        if !(1..=12).contains(&date.month()) {
            return Err(RetrochartError::invalid_input(
                "game date",
                s,
                "month out of range",
            ));
        }
        if !(1..=31).contains(&date.day()) {
            return Err(RetrochartError::invalid_input(
                "game date",
                s,
                "day out of range",
            ));
        }

        Ok(date)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `GAME_DT` is an integer column in the database but a string in event files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for GameDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let date = match RawDate::deserialize(deserializer)? {
            RawDate::Number(n) => n.to_string().parse::<GameDate>(),
            RawDate::Text(s) => s.parse::<GameDate>(),
        };
        date.map_err(serde::de::Error::custom)
    }
}

/// Text columns are nullable in the database (no batted ball on a walk).
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One plate-appearance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    #[serde(alias = "game_dt", alias = "GAME_DT")]
    pub game_date: GameDate,
    #[serde(alias = "GAME_ID")]
    pub game_id: String,
    #[serde(alias = "event_cd", alias = "EVENT_CD")]
    pub event_code: EventCode,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "event_tx",
        alias = "EVENT_TX"
    )]
    pub event_text: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "battedball_cd",
        alias = "BATTEDBALL_CD",
        alias = "batted_ball_code"
    )]
    pub batted_ball: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "pitch_seq_tx",
        alias = "PITCH_SEQ_TX",
        alias = "pitch_sequence_text"
    )]
    pub pitch_sequence: String,
}

impl EventRow {
    /// Create a row with no batted-ball code and no pitch sequence.
    pub fn new(
        game_date: GameDate,
        game_id: impl Into<String>,
        event_code: EventCode,
        event_text: impl Into<String>,
    ) -> Self {
        Self {
            game_date,
            game_id: game_id.into(),
            event_code,
            event_text: event_text.into(),
            batted_ball: String::new(),
            pitch_sequence: String::new(),
        }
    }

    /// Builder: set the batted-ball code.
    pub fn with_batted_ball(mut self, batted_ball: impl Into<String>) -> Self {
        self.batted_ball = batted_ball.into();
        self
    }

    /// Builder: set the pitch sequence.
    pub fn with_pitch_sequence(mut self, pitch_sequence: impl Into<String>) -> Self {
        self.pitch_sequence = pitch_sequence.into();
        self
    }

    /// Category of this row's event code, if modeled.
    pub fn category(&self) -> Option<EventCategory> {
        self.event_code.category()
    }
}

/// One game, as far as pitcher decisions are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRow {
    #[serde(alias = "game_dt", alias = "GAME_DT")]
    pub game_date: GameDate,
    #[serde(alias = "GAME_ID")]
    pub game_id: String,
    #[serde(default, alias = "win_pit_id", alias = "WIN_PIT_ID")]
    pub win_pitcher_id: Option<String>,
    #[serde(default, alias = "lose_pit_id", alias = "LOSE_PIT_ID")]
    pub lose_pitcher_id: Option<String>,
}
