//! Month-bucketed event counters.
//!
//! Rows are expected to be pre-filtered to a single qualifying event (e.g.
//! walks) and in game order. Two flavors are provided:
//!
//! - [`monthly_events`]: one increment per row
//! - [`monthly_multi_events`]: one increment per game, at the moment the game
//!   records its second qualifying event, in the month of that second event
//!
//! Pitcher decisions per month and season are counted from game rows with
//! [`decisions_by_month`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RetrochartError;
use crate::options::SeasonWindow;
use crate::row::{EventRow, GameRow};
use crate::stats::{MonthYearGrid, MonthlyTally};

/// Count qualifying rows per month.
pub fn monthly_events<'a>(rows: impl IntoIterator<Item = &'a EventRow>) -> MonthlyTally {
    let mut tally = MonthlyTally::default();
    for row in rows {
        tally.months.increment(row.game_date.month());
        tally.total += 1;
    }
    tally
}

/// Counts games reaching their second qualifying event, per month.
///
/// The per-game counters make this order dependent: a game split across two
/// aggregators would be counted by neither, so there is no merge.
#[derive(Debug, Clone, Default)]
pub struct MultiEventAggregator {
    per_game: HashMap<String, u32>,
    tally: MonthlyTally,
}

impl MultiEventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: &EventRow) {
        self.tally.total += 1;

        let seen = self.per_game.entry(row.game_id.clone()).or_insert(0);
        *seen += 1;
        if *seen == 2 {
            self.tally.months.increment(row.game_date.month());
        }
    }

    /// Qualifying events recorded for a game so far.
    pub fn game_count(&self, game_id: &str) -> u32 {
        self.per_game.get(game_id).copied().unwrap_or(0)
    }

    pub fn finish(self) -> MonthlyTally {
        debug!(
            games = self.per_game.len(),
            multi = self.tally.months.total(),
            total = self.tally.total,
            "multi-event aggregation finished"
        );
        self.tally
    }
}

impl<'a> Extend<&'a EventRow> for MultiEventAggregator {
    fn extend<I: IntoIterator<Item = &'a EventRow>>(&mut self, rows: I) {
        for row in rows {
            self.push(row);
        }
    }
}

/// Count games with two or more qualifying events, per month.
///
/// The returned `total` is the number of rows, not the number of games.
pub fn monthly_multi_events<'a>(rows: impl IntoIterator<Item = &'a EventRow>) -> MonthlyTally {
    let mut aggregator = MultiEventAggregator::new();
    aggregator.extend(rows);
    aggregator.finish()
}

/// Pitcher decision recorded for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Win,
    Loss,
}

impl Decision {
    pub fn name(&self) -> &'static str {
        match self {
            Decision::Win => "win",
            Decision::Loss => "loss",
        }
    }

    fn pitcher<'g>(&self, game: &'g GameRow) -> Option<&'g str> {
        match self {
            Decision::Win => game.win_pitcher_id.as_deref(),
            Decision::Loss => game.lose_pitcher_id.as_deref(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Decision {
    type Err = RetrochartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "w" => Ok(Decision::Win),
            "loss" | "lose" | "l" => Ok(Decision::Loss),
            _ => Err(RetrochartError::invalid_input(
                "decision",
                s,
                "expected win or loss",
            )),
        }
    }
}

/// Count a pitcher's wins or losses per month and season.
pub fn decisions_by_month<'a>(
    games: impl IntoIterator<Item = &'a GameRow>,
    player_id: &str,
    decision: Decision,
    window: &SeasonWindow,
) -> MonthYearGrid {
    let mut grid = MonthYearGrid::new(window);
    for game in games {
        if decision.pitcher(game) != Some(player_id) {
            continue;
        }
        grid.increment(game.game_date.month(), game.game_date.year());
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::EventCode;

    fn walk(date: &str, game_id: &str) -> EventRow {
        EventRow::new(date.parse().unwrap(), game_id, EventCode::new(14), "W")
    }

    fn game(date: &str, win: Option<&str>, lose: Option<&str>) -> GameRow {
        GameRow {
            game_date: date.parse().unwrap(),
            game_id: format!("BOS{}0", date),
            win_pitcher_id: win.map(String::from),
            lose_pitcher_id: lose.map(String::from),
        }
    }

    #[test]
    fn simple_monthly() {
        let rows = vec![
            walk("20140405", "G1"),
            walk("20140405", "G1"),
            walk("20140512", "G2"),
            walk("20140930", "G3"),
        ];
        let tally = monthly_events(&rows);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.months.get(4), Some(2));
        assert_eq!(tally.months.get(5), Some(1));
        assert_eq!(tally.months.get(9), Some(1));
        assert_eq!(tally.months.get(6), Some(0));
    }

    #[test]
    fn simple_monthly_merges() {
        let rows = vec![
            walk("20140405", "G1"),
            walk("20140512", "G2"),
            walk("20140513", "G3"),
        ];
        let (left, right) = rows.split_at(1);
        assert_eq!(monthly_events(left) + monthly_events(right), monthly_events(&rows));
    }

    #[test]
    fn three_walks_in_one_game_count_once() {
        let rows = vec![
            walk("20140405", "G1"),
            walk("20140405", "G1"),
            walk("20140405", "G1"),
        ];
        let tally = monthly_multi_events(&rows);
        assert_eq!(tally.months.get(4), Some(1));
        assert_eq!(tally.months.total(), 1);
        assert_eq!(tally.total, 3);
    }

    #[test]
    fn single_walk_games_do_not_count() {
        let rows = vec![
            walk("20140405", "G1"),
            walk("20140406", "G2"),
            walk("20140407", "G3"),
        ];
        let tally = monthly_multi_events(&rows);
        assert_eq!(tally.months.total(), 0);
        assert_eq!(tally.total, 3);
    }

    #[test]
    fn multi_walk_uses_month_of_second_event() {
        // A game id reused across a month boundary (suspended and resumed).
        let rows = vec![walk("20140630", "G1"), walk("20140701", "G1")];
        let tally = monthly_multi_events(&rows);
        assert_eq!(tally.months.get(6), Some(0));
        assert_eq!(tally.months.get(7), Some(1));
    }

    #[test]
    fn multi_walk_interleaved_games() {
        let mut aggregator = MultiEventAggregator::new();
        aggregator.extend(&[
            walk("20140801", "G1"),
            walk("20140802", "G2"),
            walk("20140801", "G1"),
            walk("20140802", "G2"),
            walk("20140802", "G2"),
        ]);
        assert_eq!(aggregator.game_count("G2"), 3);
        assert_eq!(aggregator.game_count("G9"), 0);
        let tally = aggregator.finish();
        assert_eq!(tally.months.get(8), Some(2));
    }

    #[test]
    fn decision_from_str() {
        assert_eq!("win".parse::<Decision>(), Ok(Decision::Win));
        assert_eq!("Lose".parse::<Decision>(), Ok(Decision::Loss));
        assert_eq!(" loss ".parse::<Decision>(), Ok(Decision::Loss));
        assert!("save".parse::<Decision>().is_err());
        assert_eq!(Decision::Loss.to_string(), "loss");
    }

    #[test]
    fn pitcher_decisions() {
        let games = vec![
            game("20120415", Some("lestj001"), Some("verlj001")),
            game("20120421", Some("lestj001"), None),
            game("20130602", Some("lestj001"), None),
            game("20130603", Some("verlj001"), Some("lestj001")),
            game("20131105", Some("lestj001"), None),
            game("20090505", Some("lestj001"), None),
        ];
        let window = SeasonWindow::default();

        let wins = decisions_by_month(&games, "lestj001", Decision::Win, &window);
        assert_eq!(wins.months, (3..=10).collect::<Vec<_>>());
        assert_eq!(wins.years, (2010..=2014).collect::<Vec<_>>());
        assert_eq!(wins.get(4, 2012), Some(2));
        assert_eq!(wins.get(6, 2013), Some(1));
        // November and 2009 fall outside the window
        assert_eq!(wins.total(), 3);

        let losses = decisions_by_month(&games, "lestj001", Decision::Loss, &window);
        assert_eq!(losses.get(6, 2013), Some(1));
        assert_eq!(losses.total(), 1);
    }
}
