//! # retrochartlib
//!
//! Decoders and aggregators for Retrosheet play-by-play notation.
//!
//! ## Overview
//!
//! Retrosheet event files describe every plate appearance with a numeric event
//! code, a compact event text (`HR/89/F.1-H`) and a pitch sequence (`B1BCC>X`).
//! This library turns those strings into structured values and folds them into
//! charts:
//!
//! - **Pitch sequences**: per-pitch labels, ball/strike/pitch/pickoff tallies,
//!   the clamped display count and the terminal event category
//! - **At-bat outcomes**: hit kind and the fielder the ball was hit to
//! - **Hit location charts**: per-position hit counts for the outfield,
//!   infield and battery
//! - **Monthly counters**: events per month, and games with two or more
//!   qualifying events per month
//! - **Pitcher decisions**: wins or losses per month and season
//!
//! Everything here works on in-memory rows; reading files is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use retrochartlib::{
//!     decode_at_bat, decode_pitch_sequence, hit_location_chart, monthly_multi_events,
//!     EventCode, EventRow, HitKind, Position,
//! };
//!
//! let pitches = decode_pitch_sequence("B1BCC>X", EventCode::new(20));
//! assert_eq!(pitches.pitches, 5);
//! assert_eq!(pitches.pickoff, 1);
//!
//! let outcome = decode_at_bat("HR/89/F.1-H", EventCode::new(23), "F").unwrap();
//! assert_eq!(outcome.event, HitKind::HomeRun);
//! assert_eq!(outcome.position.as_deref(), Some("89"));
//!
//! let rows = vec![
//!     EventRow::new("20140405".parse().unwrap(), "BOS201404050", EventCode::new(20), "S9/G"),
//!     EventRow::new("20140405".parse().unwrap(), "BOS201404050", EventCode::new(23), "HR/7/F"),
//! ];
//! let charts = hit_location_chart(&rows);
//! assert_eq!(charts.outfield.get(Position::LeftField).unwrap().home_run, 1);
//!
//! let walks = vec![
//!     EventRow::new("20140405".parse().unwrap(), "BOS201404050", EventCode::new(14), "W"),
//!     EventRow::new("20140405".parse().unwrap(), "BOS201404050", EventCode::new(14), "W"),
//! ];
//! assert_eq!(monthly_multi_events(&walks).months.get(4), Some(1));
//! ```

pub mod atbat;
pub mod codes;
pub mod counter;
pub mod error;
pub mod monthly;
pub mod options;
pub mod pitch;
pub mod row;
pub mod stats;

pub use atbat::{decode_at_bat, AtBatOutcome};
pub use codes::{
    pitch_token, EventCategory, EventCode, EventLabel, FieldingGroup, HitKind, PitchClass,
    PitchToken, Position, PITCH_TOKENS,
};
pub use counter::{
    canonical_position, hit_location_chart, hit_location_chart_with, tally_categories,
    HitLocationAggregator,
};
pub use error::RetrochartError;
pub use monthly::{
    decisions_by_month, monthly_events, monthly_multi_events, Decision, MultiEventAggregator,
};
pub use options::{FieldingLayout, SeasonWindow};
pub use pitch::{decode_pitch_sequence, is_first_strike, BallCount, PitchSequence};
pub use row::{EventRow, GameDate, GameRow};
pub use stats::{
    CategoryCounts, HitCategory, HitChart, HitCharts, HitCounts, MonthYearGrid, MonthlyCounts,
    MonthlyTally,
};

/// Result type for retrochartlib operations
pub type Result<T> = std::result::Result<T, RetrochartError>;
