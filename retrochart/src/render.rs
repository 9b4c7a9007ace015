//! Table and JSON rendering for CLI output

use console::Style;
use retrochartlib::{
    AtBatOutcome, CategoryCounts, EventCategory, FieldingGroup, HitCategory, HitChart, HitCharts,
    MonthYearGrid, MonthlyTally, PitchSequence,
};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style as TableStyle;
use tabled::{Table, Tabled};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How command results are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

fn title_style() -> Style {
    Style::new().bold()
}

fn total_style() -> Style {
    Style::new().bold().cyan()
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// Apply the table style for the format and render with a trailing newline.
fn finish(mut table: Table, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => table.with(TableStyle::markdown()),
        _ => table.with(TableStyle::rounded()),
    };
    let mut out = table.to_string();
    out.push('\n');
    out
}

fn titled(title: impl std::fmt::Display, body: String) -> String {
    format!("{}\n{}", title_style().apply_to(title), body)
}

fn total_line(label: &str, value: u64) -> String {
    format!("{}\n", total_style().apply_to(format!("{}: {}", label, value)))
}

/// Pretty-printed JSON with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

// -- Decoder output --

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Tabled)]
struct PitchRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Token")]
    token: char,
    #[tabled(rename = "Label")]
    label: &'static str,
}

fn build_pitch_rows(text: &str, sequence: &PitchSequence) -> Vec<PitchRow> {
    text.chars()
        .zip(&sequence.seq)
        .enumerate()
        .map(|(index, (token, label))| PitchRow {
            index: index + 1,
            token,
            label: label.unwrap_or("(unknown)"),
        })
        .collect()
}

/// Render a decoded pitch sequence.
pub fn render_pitch_sequence(
    text: &str,
    sequence: &PitchSequence,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(sequence);
    }

    let event = match sequence.event {
        Some(labels) => labels
            .iter()
            .map(|l| l.abbreviation())
            .collect::<Vec<_>>()
            .join(", "),
        None => "-".to_string(),
    };

    let summary = vec![
        FieldRow::new("Sequence", text),
        FieldRow::new("Event", event),
        FieldRow::new("Count", sequence.ball_count),
        FieldRow::new("Balls", sequence.ball),
        FieldRow::new("Strikes", sequence.strike),
        FieldRow::new("Pitches", sequence.pitches),
        FieldRow::new("Pickoffs", sequence.pickoff),
    ];

    let mut out = finish(Table::new(summary), format);
    if !sequence.seq.is_empty() {
        out.push('\n');
        out.push_str(&finish(Table::new(build_pitch_rows(text, sequence)), format));
    }
    Ok(out)
}

#[derive(Serialize)]
struct FirstStrike<'a> {
    sequence: &'a str,
    first_strike: Option<bool>,
}

/// Render the first-pitch-strike verdict.
pub fn render_first_strike(
    text: &str,
    verdict: Option<bool>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(&FirstStrike {
            sequence: text,
            first_strike: verdict,
        });
    }
    let answer = match verdict {
        Some(true) => "true",
        Some(false) => "false",
        None => "unknown",
    };
    let rows = vec![
        FieldRow::new("Sequence", text),
        FieldRow::new("First strike", answer),
    ];
    Ok(finish(Table::new(rows), format))
}

/// Render a decoded at-bat outcome, or its absence.
pub fn render_at_bat(
    outcome: Option<&AtBatOutcome>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(&outcome);
    }
    let Some(outcome) = outcome else {
        return Ok("no hit outcome\n".to_string());
    };

    let batted_ball = if outcome.batted_ball.is_empty() {
        "-"
    } else {
        outcome.batted_ball.as_str()
    };
    let rows = vec![
        FieldRow::new(
            "Event",
            format!("{} ({})", outcome.event.prefix(), outcome.event.name()),
        ),
        FieldRow::new("Position", outcome.position.as_deref().unwrap_or("-")),
        FieldRow::new("Batted ball", batted_ball),
    ];
    Ok(finish(Table::new(rows), format))
}

// -- Aggregation output --

#[derive(Tabled)]
struct HitChartRow {
    #[tabled(rename = "Position")]
    position: &'static str,
    #[tabled(rename = "HR:Homerun")]
    home_run: u64,
    #[tabled(rename = "3B:Triple")]
    triple: u64,
    #[tabled(rename = "2B:Double")]
    double: u64,
    #[tabled(rename = "1B:Single")]
    single: u64,
    #[tabled(rename = "Total")]
    total: u64,
}

fn build_hit_chart_rows(chart: &HitChart) -> Vec<HitChartRow> {
    chart
        .iter()
        .map(|(position, counts)| HitChartRow {
            position: position.abbreviation(),
            home_run: counts.get(HitCategory::HomeRun),
            triple: counts.get(HitCategory::Triple),
            double: counts.get(HitCategory::Double),
            single: counts.get(HitCategory::Single),
            total: counts.total(),
        })
        .collect()
}

/// Render the three hit-location charts.
pub fn render_hit_charts(charts: &HitCharts, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(charts);
    }

    let mut out = String::new();
    for group in FieldingGroup::ALL {
        let chart = charts.chart(group);
        if chart.is_empty() {
            continue;
        }
        let table = finish(Table::new(build_hit_chart_rows(chart)), format);
        out.push_str(&titled(group, table));
        out.push('\n');
    }
    out.push_str(&total_line("Total hits", charts.total()));
    Ok(out)
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Count")]
    count: u64,
}

fn build_month_rows(tally: &MonthlyTally) -> Vec<MonthRow> {
    tally
        .months
        .iter()
        .map(|(month, count)| MonthRow {
            month: month_name(month),
            count,
        })
        .collect()
}

/// Render a month-bucketed tally.
pub fn render_monthly(
    title: &str,
    tally: &MonthlyTally,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(tally);
    }

    let table = finish(Table::new(build_month_rows(tally)), format);
    let mut out = titled(title, table);
    out.push_str(&total_line("Rows", tally.total));
    Ok(out)
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Rows")]
    rows: u64,
}

fn build_category_rows(counts: &CategoryCounts) -> Vec<CategoryRow> {
    EventCategory::ALL
        .into_iter()
        .map(|category| CategoryRow {
            category: category.name(),
            rows: counts.get(category),
        })
        .chain(std::iter::once(CategoryRow {
            category: "other",
            rows: counts.other,
        }))
        .collect()
}

/// Render per-category row counts.
pub fn render_categories(
    counts: &CategoryCounts,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(counts);
    }

    let mut out = finish(Table::new(build_category_rows(counts)), format);
    out.push_str(&total_line("Total", counts.total()));
    Ok(out)
}

/// One column per season, so the header is built at runtime.
fn build_decision_table(grid: &MonthYearGrid) -> Table {
    let mut builder = Builder::default();

    let mut header = vec!["Month".to_string()];
    header.extend(grid.years.iter().map(|y| y.to_string()));
    header.push("Total".to_string());
    builder.push_record(header);

    for (month, row) in grid.months.iter().zip(&grid.counts) {
        let mut record = vec![month_name(*month).to_string()];
        record.extend(row.iter().map(|count| count.to_string()));
        record.push(grid.month_total(*month).to_string());
        builder.push_record(record);
    }

    let mut totals = vec!["Total".to_string()];
    totals.extend(
        (0..grid.years.len()).map(|col| grid.counts.iter().map(|row| row[col]).sum::<u64>().to_string()),
    );
    totals.push(grid.total().to_string());
    builder.push_record(totals);

    builder.build()
}

/// Render a month-by-year decision grid.
pub fn render_decision_grid(
    title: &str,
    grid: &MonthYearGrid,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return render_json(grid);
    }
    Ok(titled(title, finish(build_decision_table(grid), format)))
}
