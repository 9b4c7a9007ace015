//! High-level aggregation API for hit charts and category tallies.
//!
//! This module folds decoded rows into the structures of [`crate::stats`].

use tracing::{debug, trace};

use crate::atbat::{decode_at_bat, AtBatOutcome};
use crate::codes::Position;
use crate::options::FieldingLayout;
use crate::row::EventRow;
use crate::stats::{CategoryCounts, HitCategory, HitCharts};

/// Reduce a recorded fielding position to a single scorer's digit.
///
/// `"89"` (the gap between center and right) is credited to right field; any
/// other two-fielder code keeps its first fielder. Codes of any other length
/// do not resolve.
pub fn canonical_position(position: &str) -> Option<char> {
    let mut chars = position.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(only), None, None) => Some(only),
        (Some('8'), Some('9'), None) => Some('9'),
        (Some(first), Some(_), None) => Some(first),
        _ => None,
    }
}

/// Accumulates hit location charts row by row.
#[derive(Debug, Clone)]
pub struct HitLocationAggregator {
    layout: FieldingLayout,
    charts: HitCharts,
    skipped: u64,
}

impl Default for HitLocationAggregator {
    fn default() -> Self {
        Self::new(FieldingLayout::default())
    }
}

impl HitLocationAggregator {
    /// Create an aggregator with zeroed charts for the layout.
    pub fn new(layout: FieldingLayout) -> Self {
        let charts = HitCharts::new(&layout);
        Self {
            layout,
            charts,
            skipped: 0,
        }
    }

    /// Decode a row and add it to the charts.
    pub fn push(&mut self, row: &EventRow) {
        match decode_at_bat(&row.event_text, row.event_code, &row.batted_ball) {
            Some(outcome) => self.push_outcome(&outcome),
            None => {
                trace!(game_id = %row.game_id, code = %row.event_code, "row has no hit outcome");
                self.skipped += 1;
            }
        }
    }

    /// Add an already decoded outcome to the charts.
    ///
    /// Outcomes whose position does not resolve to a position in the layout
    /// are dropped.
    pub fn push_outcome(&mut self, outcome: &AtBatOutcome) {
        let position = outcome
            .position
            .as_deref()
            .and_then(canonical_position)
            .and_then(Position::from_digit);

        let Some(position) = position else {
            trace!(position = ?outcome.position, "unresolved fielding position");
            self.skipped += 1;
            return;
        };

        let category = HitCategory::from(outcome.event);
        let mut credited = false;
        for group in self.layout.groups_of(position) {
            credited |= self.charts.chart_mut(group).increment(position, category);
        }
        if !credited {
            trace!(%position, "position outside fielding layout");
            self.skipped += 1;
        }
    }

    /// Rows or outcomes that did not land in any chart so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn charts(&self) -> &HitCharts {
        &self.charts
    }

    /// Finish aggregation and return the charts.
    pub fn finish(self) -> HitCharts {
        debug!(
            total = self.charts.total(),
            skipped = self.skipped,
            "hit location aggregation finished"
        );
        self.charts
    }
}

impl<'a> Extend<&'a EventRow> for HitLocationAggregator {
    fn extend<I: IntoIterator<Item = &'a EventRow>>(&mut self, rows: I) {
        for row in rows {
            self.push(row);
        }
    }
}

/// Build hit location charts with the default fielding layout.
///
/// # Example
///
/// ```rust
/// use retrochartlib::{hit_location_chart, EventCode, EventRow, Position};
///
/// let rows = vec![
///     EventRow::new("20140401".parse().unwrap(), "G1", EventCode::new(23), "HR/89/F.1-H"),
///     EventRow::new("20140401".parse().unwrap(), "G1", EventCode::new(3), "K"),
/// ];
/// let charts = hit_location_chart(&rows);
/// assert_eq!(charts.outfield.get(Position::RightField).unwrap().home_run, 1);
/// assert_eq!(charts.total(), 1);
/// ```
pub fn hit_location_chart<'a>(rows: impl IntoIterator<Item = &'a EventRow>) -> HitCharts {
    hit_location_chart_with(rows, FieldingLayout::default())
}

/// Build hit location charts with a custom fielding layout.
pub fn hit_location_chart_with<'a>(
    rows: impl IntoIterator<Item = &'a EventRow>,
    layout: FieldingLayout,
) -> HitCharts {
    let mut aggregator = HitLocationAggregator::new(layout);
    aggregator.extend(rows);
    aggregator.finish()
}

/// Count rows per event category.
pub fn tally_categories<'a>(rows: impl IntoIterator<Item = &'a EventRow>) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for row in rows {
        counts.increment(row.category());
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{EventCode, FieldingGroup, HitKind};
    use crate::stats::HitCounts;

    fn row(code: u32, text: &str) -> EventRow {
        EventRow::new("20140501".parse().unwrap(), "NYA201405010", EventCode::new(code), text)
    }

    fn sample_rows() -> Vec<EventRow> {
        vec![
            row(20, "S9/G.1-3"),
            row(21, "D57/G"),
            row(21, "DGR/9/F"),
            row(22, "T9/L"),
            row(23, "HR/89/F.1-H"),
            row(23, "HR/F8XD"),
            row(20, "S6/G"),
            row(20, "S1/G"),
            row(20, "S2/BG"),
            row(3, "K"),
            row(14, "W"),
            row(2, "63/G"),
        ]
    }

    #[test]
    fn canonical_positions() {
        assert_eq!(canonical_position("9"), Some('9'));
        assert_eq!(canonical_position("89"), Some('9'));
        assert_eq!(canonical_position("78"), Some('7'));
        assert_eq!(canonical_position("57"), Some('5'));
        assert_eq!(canonical_position(""), None);
        assert_eq!(canonical_position("789"), None);
    }

    #[test]
    fn charts_are_pre_populated() {
        let charts = hit_location_chart(std::iter::empty());
        assert_eq!(charts.outfield.positions().count(), 3);
        assert_eq!(charts.infield.positions().count(), 4);
        assert_eq!(charts.battery.positions().count(), 2);
        assert_eq!(charts.total(), 0);
    }

    #[test]
    fn hit_location() {
        let rows = sample_rows();
        let charts = hit_location_chart(&rows);

        assert_eq!(
            charts.outfield.get(Position::RightField),
            Some(&HitCounts {
                home_run: 1,
                triple: 1,
                double: 1,
                single: 1,
            })
        );
        assert_eq!(charts.outfield.get(Position::CenterField).unwrap().home_run, 1);
        assert_eq!(charts.infield.get(Position::ThirdBase).unwrap().double, 1);
        assert_eq!(charts.infield.get(Position::Shortstop).unwrap().single, 1);
        assert_eq!(charts.battery.get(Position::Pitcher).unwrap().single, 1);
        assert_eq!(charts.battery.get(Position::Catcher).unwrap().single, 1);
        assert_eq!(charts.total(), 9);
    }

    #[test]
    fn skipped_rows_are_counted() {
        let mut aggregator = HitLocationAggregator::default();
        aggregator.extend(&sample_rows());
        aggregator.push(&row(20, "S/G"));
        // strikeout, walk, out, and the single without a fielder
        assert_eq!(aggregator.skipped(), 4);
    }

    #[test]
    fn position_outside_layout_is_dropped() {
        let layout = FieldingLayout::empty()
            .with_group(FieldingGroup::Outfield, vec![Position::CenterField]);
        let charts = hit_location_chart_with(&sample_rows(), layout);
        assert_eq!(charts.total(), 1);
        assert!(charts.infield.is_empty());
    }

    #[test]
    fn position_listed_twice_is_credited_twice() {
        let layout = FieldingLayout::default()
            .with_group(FieldingGroup::Battery, vec![Position::RightField]);
        let mut aggregator = HitLocationAggregator::new(layout);
        aggregator.push_outcome(&AtBatOutcome {
            event: HitKind::HomeRun,
            position: Some("9".to_string()),
            batted_ball: "F".to_string(),
        });
        let charts = aggregator.finish();
        assert_eq!(charts.outfield.get(Position::RightField).unwrap().home_run, 1);
        assert_eq!(charts.battery.get(Position::RightField).unwrap().home_run, 1);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let rows = sample_rows();
        let forward = hit_location_chart(&rows);
        let reversed = hit_location_chart(rows.iter().rev());
        let rotated: Vec<EventRow> = rows[5..].iter().chain(&rows[..5]).cloned().collect();
        assert_eq!(forward, reversed);
        assert_eq!(forward, hit_location_chart(&rotated));
    }

    #[test]
    fn partitioned_aggregation_matches_sequential() {
        let rows = sample_rows();
        let sequential = hit_location_chart(&rows);
        for split in 0..=rows.len() {
            let (left, right) = rows.split_at(split);
            let merged = hit_location_chart(left) + hit_location_chart(right);
            assert_eq!(merged, sequential, "split at {}", split);
        }
    }

    #[test]
    fn tally() {
        let counts = tally_categories(&sample_rows());
        assert_eq!(counts.hits, 9);
        assert_eq!(counts.strikeouts, 1);
        assert_eq!(counts.walks, 1);
        assert_eq!(counts.outs, 1);
        assert_eq!(counts.other, 0);

        let extra = vec![row(4, "SB2")];
        assert_eq!(tally_categories(&extra).other, 1);
    }
}
