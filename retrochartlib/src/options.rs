//! Input options for chart aggregation.
//!
//! This module contains the configuration types that control how rows are
//! bucketed: which fielding positions make up each group of the hit chart,
//! and which seasons and months a decision grid covers.

use serde::{Deserialize, Serialize};

use crate::codes::{FieldingGroup, Position};
use crate::error::RetrochartError;
use crate::Result;

/// Assignment of fielding positions to the three hit-chart groups.
///
/// Order within each group is the order positions appear in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingLayout {
    pub outfield: Vec<Position>,
    pub infield: Vec<Position>,
    pub battery: Vec<Position>,
}

impl Default for FieldingLayout {
    fn default() -> Self {
        Self {
            outfield: vec![
                Position::LeftField,
                Position::CenterField,
                Position::RightField,
            ],
            infield: vec![
                Position::ThirdBase,
                Position::Shortstop,
                Position::SecondBase,
                Position::FirstBase,
            ],
            battery: vec![Position::Catcher, Position::Pitcher],
        }
    }
}

impl FieldingLayout {
    /// The standard outfield / infield / battery split.
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout with every group empty.
    pub fn empty() -> Self {
        Self {
            outfield: Vec::new(),
            infield: Vec::new(),
            battery: Vec::new(),
        }
    }

    /// Builder: replace the positions of one group.
    pub fn with_group(mut self, group: FieldingGroup, positions: Vec<Position>) -> Self {
        *self.group_mut(group) = positions;
        self
    }

    /// Positions assigned to a group.
    pub fn positions(&self, group: FieldingGroup) -> &[Position] {
        match group {
            FieldingGroup::Outfield => &self.outfield,
            FieldingGroup::Infield => &self.infield,
            FieldingGroup::Battery => &self.battery,
        }
    }

    fn group_mut(&mut self, group: FieldingGroup) -> &mut Vec<Position> {
        match group {
            FieldingGroup::Outfield => &mut self.outfield,
            FieldingGroup::Infield => &mut self.infield,
            FieldingGroup::Battery => &mut self.battery,
        }
    }

    /// Every group that lists the position. A custom layout may list a
    /// position in more than one group; each of them is credited.
    pub fn groups_of(&self, position: Position) -> impl Iterator<Item = FieldingGroup> + '_ {
        FieldingGroup::ALL
            .into_iter()
            .filter(move |group| self.positions(*group).contains(&position))
    }
}

/// Seasons and months covered by a month × year grid.
///
/// Always valid: fields are only set through [`SeasonWindow::new`], the
/// builders, or deserialization, all of which check the ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSeasonWindow")]
pub struct SeasonWindow {
    from_year: i32,
    to_year: i32,
    from_month: u32,
    to_month: u32,
}

#[derive(Deserialize)]
struct RawSeasonWindow {
    from_year: i32,
    to_year: i32,
    from_month: u32,
    to_month: u32,
}

impl TryFrom<RawSeasonWindow> for SeasonWindow {
    type Error = RetrochartError;

    fn try_from(raw: RawSeasonWindow) -> Result<Self> {
        SeasonWindow::new(raw.from_year, raw.to_year, raw.from_month, raw.to_month)
    }
}

impl Default for SeasonWindow {
    fn default() -> Self {
        Self {
            from_year: 2010,
            to_year: 2014,
            from_month: 3,
            to_month: 10,
        }
    }
}

impl SeasonWindow {
    /// Create a window, validating the ranges.
    pub fn new(from_year: i32, to_year: i32, from_month: u32, to_month: u32) -> Result<Self> {
        Self {
            from_year,
            to_year,
            from_month,
            to_month,
        }
        .validated()
    }

    /// Builder: set the year range.
    pub fn years(mut self, from_year: i32, to_year: i32) -> Result<Self> {
        self.from_year = from_year;
        self.to_year = to_year;
        self.validated()
    }

    /// Builder: set the month range.
    pub fn months(mut self, from_month: u32, to_month: u32) -> Result<Self> {
        self.from_month = from_month;
        self.to_month = to_month;
        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.from_year > self.to_year {
            return Err(RetrochartError::invalid_input(
                "season window",
                format!("{}..{}", self.from_year, self.to_year),
                "from year is after to year",
            ));
        }
        for month in [self.from_month, self.to_month] {
            if !(1..=12).contains(&month) {
                return Err(RetrochartError::invalid_input(
                    "season window",
                    month.to_string(),
                    "month must be between 1 and 12",
                ));
            }
        }
        if self.from_month > self.to_month {
            return Err(RetrochartError::invalid_input(
                "season window",
                format!("{}..{}", self.from_month, self.to_month),
                "from month is after to month",
            ));
        }
        Ok(self)
    }

    pub fn from_year(&self) -> i32 {
        self.from_year
    }

    pub fn to_year(&self) -> i32 {
        self.to_year
    }

    pub fn from_month(&self) -> u32 {
        self.from_month
    }

    pub fn to_month(&self) -> u32 {
        self.to_month
    }

    pub fn year_range(&self) -> std::ops::RangeInclusive<i32> {
        self.from_year..=self.to_year
    }

    pub fn month_range(&self) -> std::ops::RangeInclusive<u32> {
        self.from_month..=self.to_month
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.year_range().contains(&year) && self.month_range().contains(&month)
    }
}
