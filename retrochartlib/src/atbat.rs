//! At-bat outcome decoding.
//!
//! Only hits are classified here. The event text's first `/` segment carries
//! the hit prefix; where the fielder is recorded depends on the kind of hit:
//!
//! - `S9/G.1-3`, `D57/G`, `T9/L`: glued to the prefix
//! - `HR/89/F.1-H`, `DGR/9/F`: a separate all-digit segment
//! - `HR/F8XD`: no clean segment, so the first digit anywhere in the text

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::codes::{EventCode, HitKind};

/// Decoded at-bat outcome for a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatOutcome {
    pub event: HitKind,
    /// Fielder(s) the ball was hit to, as written (`"9"`, `"57"`, `"89"`)
    pub position: Option<String>,
    /// Batted-ball code copied from the input
    pub batted_ball: String,
}

/// Decode the outcome of an at-bat.
///
/// Returns `None` when the code is not a hit or when no candidate prefix
/// matches the event text.
///
/// # Example
///
/// ```rust
/// use retrochartlib::{decode_at_bat, EventCode, HitKind};
///
/// let outcome = decode_at_bat("DGR/FINT/7/L-.1-3", EventCode::new(21), "L").unwrap();
/// assert_eq!(outcome.event, HitKind::GroundRuleDouble);
/// assert_eq!(outcome.position.as_deref(), Some("7"));
///
/// assert!(decode_at_bat("K", EventCode::new(3), "").is_none());
/// ```
pub fn decode_at_bat(event_text: &str, code: EventCode, batted_ball: &str) -> Option<AtBatOutcome> {
    let primary = event_text.split('/').next().unwrap_or_default();

    let Some(kind) = code.hit_kinds().find(|kind| primary.starts_with(kind.prefix())) else {
        trace!(%code, event_text, "no hit prefix matched");
        return None;
    };

    let position = if kind.has_detached_position() {
        detached_position(event_text)
    } else {
        Some(primary.replace(kind.prefix(), "")).filter(|p| !p.is_empty())
    };

    Some(AtBatOutcome {
        event: kind,
        position,
        batted_ball: batted_ball.to_string(),
    })
}

/// First all-digit segment, falling back to the first digit of the whole text.
fn detached_position(event_text: &str) -> Option<String> {
    event_text
        .split('/')
        .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .or_else(|| {
            event_text
                .chars()
                .find(char::is_ascii_digit)
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str, code: u32, bb: &str) -> Option<(HitKind, Option<String>, String)> {
        decode_at_bat(text, EventCode::new(code), bb).map(|o| (o.event, o.position, o.batted_ball))
    }

    fn hit(kind: HitKind, position: &str, bb: &str) -> Option<(HitKind, Option<String>, String)> {
        Some((kind, Some(position.to_string()), bb.to_string()))
    }

    #[test]
    fn single() {
        assert_eq!(decode("S9/G.1-3", 20, "G"), hit(HitKind::Single, "9", "G"));
    }

    #[test]
    fn double_with_two_fielders() {
        assert_eq!(decode("D57/G", 21, "G"), hit(HitKind::Double, "57", "G"));
    }

    #[test]
    fn ground_rule_double() {
        assert_eq!(
            decode("DGR/9/F", 21, "F"),
            hit(HitKind::GroundRuleDouble, "9", "F")
        );
    }

    #[test]
    fn ground_rule_double_skips_non_numeric_segment() {
        assert_eq!(
            decode("DGR/FINT/7/L-.1-3", 21, "L"),
            hit(HitKind::GroundRuleDouble, "7", "L")
        );
    }

    #[test]
    fn triple() {
        assert_eq!(decode("T9/L", 22, "L"), hit(HitKind::Triple, "9", "L"));
    }

    #[test]
    fn home_run_between_fielders() {
        assert_eq!(
            decode("HR/89/F.1-H", 23, "F"),
            hit(HitKind::HomeRun, "89", "F")
        );
    }

    #[test]
    fn home_run_falls_back_to_first_digit() {
        assert_eq!(decode("HR/F8XD", 23, "F"), hit(HitKind::HomeRun, "8", "F"));
    }

    #[test]
    fn home_run_without_any_fielder() {
        assert_eq!(
            decode("HR/F.2-H", 23, "F"),
            hit(HitKind::HomeRun, "2", "F"),
            "the first digit anywhere is taken, even in the advance"
        );
        assert_eq!(
            decode("HR", 23, "F"),
            Some((HitKind::HomeRun, None, "F".to_string()))
        );
    }

    #[test]
    fn plain_hit_keeps_residue() {
        assert_eq!(decode("S7E8/L", 20, "L"), hit(HitKind::Single, "7E8", "L"));
        assert_eq!(
            decode("S/G", 20, "G"),
            Some((HitKind::Single, None, "G".to_string()))
        );
    }

    #[test]
    fn non_hit_codes_are_not_classified() {
        assert_eq!(decode("K", 3, ""), None);
        assert_eq!(decode("W", 14, ""), None);
        assert_eq!(decode("IW", 15, ""), None);
        assert_eq!(decode("63/G", 2, "G"), None);
    }

    #[test]
    fn prefix_must_match_code() {
        // A single recorded under the home run code matches no candidate.
        assert_eq!(decode("S9/G", 23, "G"), None);
        assert_eq!(decode("", 20, ""), None);
    }

    #[test]
    fn batted_ball_is_copied_verbatim() {
        let outcome = decode_at_bat("T8/F", EventCode::new(22), "").unwrap();
        assert_eq!(outcome.batted_ball, "");
    }
}
