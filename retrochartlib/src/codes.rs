//! Static code tables for Retrosheet notation.
//!
//! Three tables live here, all immutable process-wide data:
//!
//! - **Event codes** (`EVENT_CD` in the Retrosheet event files, see
//!   <http://www.retrosheet.org/datause.txt>): numeric code → ordered list of
//!   event labels. Only the hits, strikeouts, outs and walks groups are modeled.
//! - **Pitch tokens** (`PITCH_SEQ_TX`, see
//!   <http://www.retrosheet.org/eventfile.htm>): one character per pitch or
//!   pitch-adjacent event.
//! - **Fielding positions**: scorer's numbers 1-9 and the group each belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RetrochartError;

/// Kind of base hit recorded in the event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    #[serde(rename = "S")]
    Single,
    #[serde(rename = "D")]
    Double,
    #[serde(rename = "DGR")]
    GroundRuleDouble,
    #[serde(rename = "T")]
    Triple,
    #[serde(rename = "HR")]
    HomeRun,
}

impl HitKind {
    /// The event-text prefix that introduces this hit (`S`, `D`, `DGR`, `T`, `HR`).
    pub fn prefix(&self) -> &'static str {
        match self {
            HitKind::Single => "S",
            HitKind::Double => "D",
            HitKind::GroundRuleDouble => "DGR",
            HitKind::Triple => "T",
            HitKind::HomeRun => "HR",
        }
    }

    /// Long, human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            HitKind::Single => "single",
            HitKind::Double => "double",
            HitKind::GroundRuleDouble => "ground rule double",
            HitKind::Triple => "triple",
            HitKind::HomeRun => "home run",
        }
    }

    /// Whether the fielder is written as a separate `/` segment rather than
    /// glued to the prefix (`HR/89`, `DGR/9` vs. `S9`).
    pub fn has_detached_position(&self) -> bool {
        matches!(self, HitKind::HomeRun | HitKind::GroundRuleDouble)
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// One of the four modeled groups of event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Hits,
    StrikeOuts,
    Outs,
    Walks,
}

impl EventCategory {
    /// All categories in table order.
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Hits,
        EventCategory::StrikeOuts,
        EventCategory::Outs,
        EventCategory::Walks,
    ];

    /// The code table for this category.
    fn table(&self) -> &'static [(u32, &'static [EventLabel])] {
        match self {
            EventCategory::Hits => HIT_EVENTS,
            EventCategory::StrikeOuts => STRIKE_OUT_EVENTS,
            EventCategory::Outs => OUT_EVENTS,
            EventCategory::Walks => WALK_EVENTS,
        }
    }

    /// Event codes belonging to this category.
    pub fn codes(&self) -> impl Iterator<Item = EventCode> {
        self.table().iter().map(|(code, _)| EventCode(*code))
    }

    /// Check whether a code belongs to this category.
    pub fn contains(&self, code: EventCode) -> bool {
        self.table().iter().any(|(c, _)| *c == code.0)
    }

    /// Name used on the command line and in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            EventCategory::Hits => "hits",
            EventCategory::StrikeOuts => "strikeouts",
            EventCategory::Outs => "outs",
            EventCategory::Walks => "walks",
        }
    }
}

impl FromStr for EventCategory {
    type Err = RetrochartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RetrochartError::invalid_input(
                    "event category",
                    s,
                    "expected one of hits, strikeouts, outs, walks",
                )
            })
    }
}

/// A label attached to an event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLabel {
    Hit(HitKind),
    StrikeOut,
    Out,
    Walk,
    IntentionalWalk,
}

impl EventLabel {
    /// Short label as it appears in charts (`S`, `DGR`, `SO`, `Walk`, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            EventLabel::Hit(kind) => kind.prefix(),
            EventLabel::StrikeOut => "SO",
            EventLabel::Out => "OUTS",
            EventLabel::Walk => "Walk",
            EventLabel::IntentionalWalk => "Intentional walk",
        }
    }

    /// The category this label belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            EventLabel::Hit(_) => EventCategory::Hits,
            EventLabel::StrikeOut => EventCategory::StrikeOuts,
            EventLabel::Out => EventCategory::Outs,
            EventLabel::Walk | EventLabel::IntentionalWalk => EventCategory::Walks,
        }
    }
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Serialize for EventLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbreviation())
    }
}

// Candidate order matters: `DGR` has to be tried before `D`.
const HIT_EVENTS: &[(u32, &[EventLabel])] = &[
    (20, &[EventLabel::Hit(HitKind::Single)]),
    (
        21,
        &[
            EventLabel::Hit(HitKind::GroundRuleDouble),
            EventLabel::Hit(HitKind::Double),
        ],
    ),
    (22, &[EventLabel::Hit(HitKind::Triple)]),
    (23, &[EventLabel::Hit(HitKind::HomeRun)]),
];
const STRIKE_OUT_EVENTS: &[(u32, &[EventLabel])] = &[(3, &[EventLabel::StrikeOut])];
const OUT_EVENTS: &[(u32, &[EventLabel])] = &[(2, &[EventLabel::Out])];
const WALK_EVENTS: &[(u32, &[EventLabel])] = &[
    (14, &[EventLabel::Walk]),
    (15, &[EventLabel::IntentionalWalk]),
];

/// A numeric Retrosheet event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventCode(u32);

impl EventCode {
    pub const fn new(code: u32) -> Self {
        EventCode(code)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Labels for this code in declared precedence order, or `None` when the
    /// code is outside the four modeled groups.
    pub fn labels(&self) -> Option<&'static [EventLabel]> {
        EventCategory::ALL.iter().find_map(|category| {
            category
                .table()
                .iter()
                .find(|(code, _)| *code == self.0)
                .map(|(_, labels)| *labels)
        })
    }

    pub fn category(&self) -> Option<EventCategory> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.contains(*self))
    }

    /// Candidate hit kinds for a hits-group code, in precedence order.
    /// Empty for every other code.
    pub fn hit_kinds(&self) -> impl Iterator<Item = HitKind> {
        let labels = match self.category() {
            Some(EventCategory::Hits) => self.labels().unwrap_or(&[]),
            _ => &[],
        };
        labels.iter().filter_map(|label| match label {
            EventLabel::Hit(kind) => Some(*kind),
            _ => None,
        })
    }
}

impl From<u32> for EventCode {
    fn from(code: u32) -> Self {
        EventCode(code)
    }
}

impl FromStr for EventCode {
    type Err = RetrochartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(EventCode).map_err(|e| {
            RetrochartError::invalid_input("event code", s, e.to_string())
        })
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database exports carry the code either as an integer or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for EventCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = match RawCode::deserialize(deserializer)? {
            RawCode::Number(n) => u32::try_from(n).map(EventCode).map_err(|_| {
                RetrochartError::invalid_input("event code", n.to_string(), "out of range")
            }),
            RawCode::Text(s) => s.parse::<EventCode>(),
        };
        code.map_err(serde::de::Error::custom)
    }
}

/// How a pitch-sequence character is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchClass {
    /// Counts toward balls (`B`, `I`)
    Ball,
    /// Counts toward strikes (`C`, `F`, `K`, `S`, `T`)
    Strike,
    /// Ball put into play (`X`, `Y`)
    InPlay,
    /// Any other pitch thrown to the batter
    OtherPitch,
    /// Pickoff throw by the pitcher (`1`, `2`, `3`)
    Pickoff,
    /// Catcher actions and markers not involving a pitch (`+`, `*`, `.`, `>`)
    Marker,
}

impl PitchClass {
    /// Tokens that represent a pitch delivered to the batter.
    pub fn is_batter_facing(&self) -> bool {
        !matches!(self, PitchClass::Pickoff | PitchClass::Marker)
    }
}

/// A single pitch-sequence character and its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchToken {
    pub symbol: char,
    pub label: &'static str,
    pub class: PitchClass,
}

const fn token(symbol: char, label: &'static str, class: PitchClass) -> PitchToken {
    PitchToken {
        symbol,
        label,
        class,
    }
}

/// Every known pitch-sequence character.
pub static PITCH_TOKENS: [PitchToken; 26] = [
    token('B', "ball", PitchClass::Ball),
    token('C', "called strike", PitchClass::Strike),
    token('F', "foul", PitchClass::Strike),
    token('H', "hit batter", PitchClass::OtherPitch),
    token('I', "intentional ball", PitchClass::Ball),
    token('K', "strike (unknown type)", PitchClass::Strike),
    token('L', "foul bunt", PitchClass::OtherPitch),
    token('M', "missed bunt attempt", PitchClass::OtherPitch),
    token(
        'N',
        "no pitch (on balks and interference calls)",
        PitchClass::OtherPitch,
    ),
    token('O', "foul tip on bunt", PitchClass::OtherPitch),
    token('P', "pitchout", PitchClass::OtherPitch),
    token('Q', "swinging on pitchout", PitchClass::OtherPitch),
    token('R', "foul ball on pitchout", PitchClass::OtherPitch),
    token('S', "swinging strike", PitchClass::Strike),
    token('T', "foul tip", PitchClass::Strike),
    token('U', "unknown or missed pitch", PitchClass::OtherPitch),
    token(
        'V',
        "called ball because pitcher went to his mouth",
        PitchClass::OtherPitch,
    ),
    token('X', "ball put into play by batter", PitchClass::InPlay),
    token('Y', "ball put into play on pitchout", PitchClass::InPlay),
    token('+', "following pickoff throw by the catcher", PitchClass::Marker),
    token(
        '*',
        "indicates the following pitch was blocked by the catcher",
        PitchClass::Marker,
    ),
    token('.', "marker for play not involving the batter", PitchClass::Marker),
    token('1', "pickoff throw to first", PitchClass::Pickoff),
    token('2', "pickoff throw to second", PitchClass::Pickoff),
    token('3', "pickoff throw to third", PitchClass::Pickoff),
    token('>', "indicates a runner going on the pitch", PitchClass::Marker),
];

/// Look up a pitch-sequence character.
pub fn pitch_token(symbol: char) -> Option<&'static PitchToken> {
    PITCH_TOKENS.iter().find(|t| t.symbol == symbol)
}

/// Coarse bucket over fielding positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldingGroup {
    Outfield,
    Infield,
    Battery,
}

impl FieldingGroup {
    pub const ALL: [FieldingGroup; 3] = [
        FieldingGroup::Outfield,
        FieldingGroup::Infield,
        FieldingGroup::Battery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldingGroup::Outfield => "outfield",
            FieldingGroup::Infield => "infield",
            FieldingGroup::Battery => "battery",
        }
    }
}

impl fmt::Display for FieldingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scorer's fielding position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    /// Positions in scorer's-number order (1-9).
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Scorer's number, 1 through 9.
    pub fn number(&self) -> u8 {
        match self {
            Position::Pitcher => 1,
            Position::Catcher => 2,
            Position::FirstBase => 3,
            Position::SecondBase => 4,
            Position::ThirdBase => 5,
            Position::Shortstop => 6,
            Position::LeftField => 7,
            Position::CenterField => 8,
            Position::RightField => 9,
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)?;
        Position::ALL.into_iter().find(|p| u32::from(p.number()) == n)
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Accepts a scorer's number (`9`) or an abbreviation (`RF`, `rf`).
impl FromStr for Position {
    type Err = RetrochartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(digit), None) = (chars.next(), chars.next()) {
            if let Some(position) = Position::from_digit(digit) {
                return Ok(position);
            }
        }
        Position::ALL
            .into_iter()
            .find(|p| p.abbreviation().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                RetrochartError::invalid_input(
                    "fielding position",
                    s,
                    "expected 1-9 or P, C, 1B, 2B, 3B, SS, LF, CF, RF",
                )
            })
    }
}
