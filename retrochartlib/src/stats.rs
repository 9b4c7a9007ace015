//! Core data structures for chart and counter statistics.
//!
//! Every structure here is a plain value built fresh per aggregation run and
//! only ever mutated by +1 increments. They all merge by per-key summation
//! (`Add` / `AddAssign`), so rows can be aggregated in partitions and the
//! partial results combined afterwards.

use std::ops::{Add, AddAssign};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::codes::{EventCategory, FieldingGroup, HitKind, Position};
use crate::options::{FieldingLayout, SeasonWindow};

/// Column of the hit chart. Ground-rule doubles count as doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitCategory {
    #[serde(rename = "HR:Homerun")]
    HomeRun,
    #[serde(rename = "3B:Triple")]
    Triple,
    #[serde(rename = "2B:Double")]
    Double,
    #[serde(rename = "1B:Single")]
    Single,
}

impl HitCategory {
    /// Chart column order.
    pub const ALL: [HitCategory; 4] = [
        HitCategory::HomeRun,
        HitCategory::Triple,
        HitCategory::Double,
        HitCategory::Single,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HitCategory::HomeRun => "HR:Homerun",
            HitCategory::Triple => "3B:Triple",
            HitCategory::Double => "2B:Double",
            HitCategory::Single => "1B:Single",
        }
    }
}

impl From<HitKind> for HitCategory {
    fn from(kind: HitKind) -> Self {
        match kind {
            HitKind::HomeRun => HitCategory::HomeRun,
            HitKind::Triple => HitCategory::Triple,
            HitKind::Double | HitKind::GroundRuleDouble => HitCategory::Double,
            HitKind::Single => HitCategory::Single,
        }
    }
}

/// Hit counts for a single fielding position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounts {
    #[serde(rename = "HR:Homerun")]
    pub home_run: u64,
    #[serde(rename = "3B:Triple")]
    pub triple: u64,
    #[serde(rename = "2B:Double")]
    pub double: u64,
    #[serde(rename = "1B:Single")]
    pub single: u64,
}

impl HitCounts {
    /// Create new counts with all zeros
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: HitCategory) -> u64 {
        match category {
            HitCategory::HomeRun => self.home_run,
            HitCategory::Triple => self.triple,
            HitCategory::Double => self.double,
            HitCategory::Single => self.single,
        }
    }

    pub fn increment(&mut self, category: HitCategory) {
        match category {
            HitCategory::HomeRun => self.home_run += 1,
            HitCategory::Triple => self.triple += 1,
            HitCategory::Double => self.double += 1,
            HitCategory::Single => self.single += 1,
        }
    }

    /// Total hits across all categories
    pub fn total(&self) -> u64 {
        self.home_run + self.triple + self.double + self.single
    }
}

impl Add for HitCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            home_run: self.home_run + other.home_run,
            triple: self.triple + other.triple,
            double: self.double + other.double,
            single: self.single + other.single,
        }
    }
}

impl AddAssign for HitCounts {
    fn add_assign(&mut self, other: Self) {
        self.home_run += other.home_run;
        self.triple += other.triple;
        self.double += other.double;
        self.single += other.single;
    }
}

/// Hit counts per position for one fielding group.
///
/// Positions keep the order they were initialized with. Serializes as a map
/// from position abbreviation to [`HitCounts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitChart {
    rows: Vec<(Position, HitCounts)>,
}

impl HitChart {
    /// Create a chart with a zeroed row for every position.
    pub fn new(positions: &[Position]) -> Self {
        Self {
            rows: positions.iter().map(|p| (*p, HitCounts::new())).collect(),
        }
    }

    pub fn get(&self, position: Position) -> Option<&HitCounts> {
        self.rows
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, counts)| counts)
    }

    /// Add one hit. Returns `false` if the position has no row in this chart.
    pub fn increment(&mut self, position: Position, category: HitCategory) -> bool {
        match self.rows.iter_mut().find(|(p, _)| *p == position) {
            Some((_, counts)) => {
                counts.increment(category);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &HitCounts)> {
        self.rows.iter().map(|(p, counts)| (*p, counts))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().map(|(p, _)| *p)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total hits across all positions
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|(_, counts)| counts.total()).sum()
    }
}

impl AddAssign for HitChart {
    fn add_assign(&mut self, other: Self) {
        for (position, counts) in other.rows {
            match self.rows.iter_mut().find(|(p, _)| *p == position) {
                Some((_, mine)) => *mine += counts,
                None => self.rows.push((position, counts)),
            }
        }
    }
}

impl Add for HitChart {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Serialize for HitChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (position, counts) in &self.rows {
            map.serialize_entry(position.abbreviation(), counts)?;
        }
        map.end()
    }
}

/// The three hit charts, one per fielding group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HitCharts {
    pub outfield: HitChart,
    pub infield: HitChart,
    pub battery: HitChart,
}

impl HitCharts {
    /// Create zeroed charts for every position of every group in the layout.
    pub fn new(layout: &FieldingLayout) -> Self {
        Self {
            outfield: HitChart::new(layout.positions(FieldingGroup::Outfield)),
            infield: HitChart::new(layout.positions(FieldingGroup::Infield)),
            battery: HitChart::new(layout.positions(FieldingGroup::Battery)),
        }
    }

    pub fn chart(&self, group: FieldingGroup) -> &HitChart {
        match group {
            FieldingGroup::Outfield => &self.outfield,
            FieldingGroup::Infield => &self.infield,
            FieldingGroup::Battery => &self.battery,
        }
    }

    pub fn chart_mut(&mut self, group: FieldingGroup) -> &mut HitChart {
        match group {
            FieldingGroup::Outfield => &mut self.outfield,
            FieldingGroup::Infield => &mut self.infield,
            FieldingGroup::Battery => &mut self.battery,
        }
    }

    /// Total hits across all groups
    pub fn total(&self) -> u64 {
        self.outfield.total() + self.infield.total() + self.battery.total()
    }
}

impl AddAssign for HitCharts {
    fn add_assign(&mut self, other: Self) {
        self.outfield += other.outfield;
        self.infield += other.infield;
        self.battery += other.battery;
    }
}

impl Add for HitCharts {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

/// Counts for months 1 through 12.
///
/// Serializes as a map keyed by month number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyCounts {
    counts: [u64; 12],
}

impl MonthlyCounts {
    /// Create new counts with every month at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a month, or `None` for a month outside 1..=12.
    pub fn get(&self, month: u32) -> Option<u64> {
        Self::index(month).map(|i| self.counts[i])
    }

    /// Add one to a month. Returns `false` for a month outside 1..=12.
    pub fn increment(&mut self, month: u32) -> bool {
        match Self::index(month) {
            Some(i) => {
                self.counts[i] += 1;
                true
            }
            None => false,
        }
    }

    /// `(month, count)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        (1..=12).zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn index(month: u32) -> Option<usize> {
        (1..=12).contains(&month).then(|| month as usize - 1)
    }
}

impl AddAssign for MonthlyCounts {
    fn add_assign(&mut self, other: Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }
}

impl Add for MonthlyCounts {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Serialize for MonthlyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (month, count) in self.iter() {
            map.serialize_entry(&month, &count)?;
        }
        map.end()
    }
}

/// Monthly buckets plus the number of rows seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTally {
    pub months: MonthlyCounts,
    /// Every qualifying row, whether or not it moved a month bucket
    pub total: u64,
}

impl AddAssign for MonthlyTally {
    fn add_assign(&mut self, other: Self) {
        self.months += other.months;
        self.total += other.total;
    }
}

impl Add for MonthlyTally {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

/// Number of rows per event category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub hits: u64,
    pub strikeouts: u64,
    pub outs: u64,
    pub walks: u64,
    /// Rows whose code is outside the modeled categories
    pub other: u64,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: EventCategory) -> u64 {
        match category {
            EventCategory::Hits => self.hits,
            EventCategory::StrikeOuts => self.strikeouts,
            EventCategory::Outs => self.outs,
            EventCategory::Walks => self.walks,
        }
    }

    pub fn increment(&mut self, category: Option<EventCategory>) {
        match category {
            Some(EventCategory::Hits) => self.hits += 1,
            Some(EventCategory::StrikeOuts) => self.strikeouts += 1,
            Some(EventCategory::Outs) => self.outs += 1,
            Some(EventCategory::Walks) => self.walks += 1,
            None => self.other += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.hits + self.strikeouts + self.outs + self.walks + self.other
    }
}

impl Add for CategoryCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            strikeouts: self.strikeouts + other.strikeouts,
            outs: self.outs + other.outs,
            walks: self.walks + other.walks,
            other: self.other + other.other,
        }
    }
}

impl AddAssign for CategoryCounts {
    fn add_assign(&mut self, other: Self) {
        self.hits += other.hits;
        self.strikeouts += other.strikeouts;
        self.outs += other.outs;
        self.walks += other.walks;
        self.other += other.other;
    }
}

/// Counts laid out with one row per month and one column per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthYearGrid {
    pub months: Vec<u32>,
    pub years: Vec<i32>,
    /// `counts[month_index][year_index]`
    pub counts: Vec<Vec<u64>>,
}

impl MonthYearGrid {
    /// Create a zeroed grid covering the window.
    pub fn new(window: &SeasonWindow) -> Self {
        let months: Vec<u32> = window.month_range().collect();
        let years: Vec<i32> = window.year_range().collect();
        let counts = vec![vec![0; years.len()]; months.len()];
        Self {
            months,
            years,
            counts,
        }
    }

    fn cell(&self, month: u32, year: i32) -> Option<(usize, usize)> {
        let row = self.months.iter().position(|m| *m == month)?;
        let col = self.years.iter().position(|y| *y == year)?;
        Some((row, col))
    }

    pub fn get(&self, month: u32, year: i32) -> Option<u64> {
        self.cell(month, year).map(|(row, col)| self.counts[row][col])
    }

    /// Add one to a cell. Returns `false` if the cell is outside the grid.
    pub fn increment(&mut self, month: u32, year: i32) -> bool {
        match self.cell(month, year) {
            Some((row, col)) => {
                self.counts[row][col] += 1;
                true
            }
            None => false,
        }
    }

    /// Sum of one month across all years
    pub fn month_total(&self, month: u32) -> u64 {
        self.months
            .iter()
            .position(|m| *m == month)
            .map(|row| self.counts[row].iter().sum())
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_counts_default() {
        let counts = HitCounts::new();
        assert_eq!(counts.total(), 0);
        for category in HitCategory::ALL {
            assert_eq!(counts.get(category), 0);
        }
    }

    #[test]
    fn test_hit_counts_add() {
        let a = HitCounts {
            home_run: 1,
            triple: 0,
            double: 2,
            single: 5,
        };
        let b = HitCounts {
            home_run: 2,
            triple: 1,
            double: 0,
            single: 3,
        };
        let sum = a + b;
        assert_eq!(sum.home_run, 3);
        assert_eq!(sum.triple, 1);
        assert_eq!(sum.double, 2);
        assert_eq!(sum.single, 8);
        assert_eq!(sum.total(), 14);
    }

    #[test]
    fn test_ground_rule_double_is_a_double() {
        assert_eq!(
            HitCategory::from(HitKind::GroundRuleDouble),
            HitCategory::Double
        );
    }

    #[test]
    fn test_hit_chart_pre_populated() {
        let chart = HitChart::new(&[Position::LeftField, Position::CenterField]);
        assert_eq!(chart.get(Position::LeftField), Some(&HitCounts::new()));
        assert_eq!(chart.get(Position::RightField), None);
        assert_eq!(chart.total(), 0);
    }

    #[test]
    fn test_hit_chart_increment() {
        let mut chart = HitChart::new(&[Position::Shortstop]);
        assert!(chart.increment(Position::Shortstop, HitCategory::Single));
        assert!(!chart.increment(Position::Catcher, HitCategory::Single));
        assert_eq!(chart.get(Position::Shortstop).unwrap().single, 1);
    }

    #[test]
    fn test_hit_chart_merge() {
        let mut a = HitChart::new(&[Position::LeftField, Position::RightField]);
        a.increment(Position::LeftField, HitCategory::Double);
        let mut b = HitChart::new(&[Position::LeftField, Position::RightField]);
        b.increment(Position::LeftField, HitCategory::Double);
        b.increment(Position::RightField, HitCategory::HomeRun);

        let merged = a + b;
        assert_eq!(merged.get(Position::LeftField).unwrap().double, 2);
        assert_eq!(merged.get(Position::RightField).unwrap().home_run, 1);
        assert_eq!(
            merged.positions().collect::<Vec<_>>(),
            vec![Position::LeftField, Position::RightField]
        );
    }

    #[test]
    fn test_hit_chart_serializes_in_layout_order() {
        let charts = HitCharts::new(&FieldingLayout::default());
        let json = serde_json::to_string(&charts.infield).unwrap();
        let order: Vec<usize> = ["3B", "SS", "2B", "1B"]
            .iter()
            .map(|p| json.find(&format!("\"{}\"", p)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(json.contains("\"HR:Homerun\":0"));
    }

    #[test]
    fn test_monthly_counts() {
        let mut counts = MonthlyCounts::new();
        assert!(counts.increment(4));
        assert!(counts.increment(4));
        assert!(counts.increment(12));
        assert!(!counts.increment(0));
        assert!(!counts.increment(13));
        assert_eq!(counts.get(4), Some(2));
        assert_eq!(counts.get(1), Some(0));
        assert_eq!(counts.get(13), None);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.iter().count(), 12);
    }

    #[test]
    fn test_monthly_counts_serialize_keys() {
        let mut counts = MonthlyCounts::new();
        counts.increment(5);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["5"], 1);
        assert_eq!(json["1"], 0);
        assert_eq!(json.as_object().unwrap().len(), 12);
    }

    #[test]
    fn test_category_counts() {
        let mut counts = CategoryCounts::new();
        counts.increment(Some(EventCategory::Walks));
        counts.increment(Some(EventCategory::Walks));
        counts.increment(None);
        let sum = counts + counts;
        assert_eq!(sum.get(EventCategory::Walks), 4);
        assert_eq!(sum.other, 2);
        assert_eq!(sum.total(), 6);
    }

    #[test]
    fn test_month_year_grid() {
        let window = SeasonWindow::new(2012, 2013, 4, 5).unwrap();
        let mut grid = MonthYearGrid::new(&window);
        assert_eq!(grid.counts, vec![vec![0, 0], vec![0, 0]]);
        assert!(grid.increment(5, 2013));
        assert!(grid.increment(5, 2012));
        assert!(!grid.increment(6, 2013));
        assert_eq!(grid.get(5, 2013), Some(1));
        assert_eq!(grid.month_total(5), 2);
        assert_eq!(grid.month_total(4), 0);
        assert_eq!(grid.total(), 2);
    }
}
