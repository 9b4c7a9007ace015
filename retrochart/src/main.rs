//! # retrochart
//!
//! A CLI tool for decoding Retrosheet play-by-play notation and charting the results.
//!
//! ## Overview
//!
//! retrochart is built on top of retrochartlib. It decodes single pitch sequences
//! and event texts given on the command line, and aggregates JSON row files
//! (arrays of event or game rows, as exported from a Retrosheet database) into
//! hit-location charts, monthly counters and pitcher decision grids.
//!
//! ## Usage
//!
//! ```bash
//! # Decode a pitch sequence for a single (event code 20)
//! retrochart pitches B1BCC>X --code 20
//!
//! # Was the first pitch a strike?
//! retrochart first-strike 11BF1X
//!
//! # Decode an event text
//! retrochart atbat HR/89/F.1-H --code 23 --batted-ball F
//!
//! # Hit-location charts from a row file
//! retrochart hit-chart events.json
//!
//! # Games with two or more walks, per month
//! retrochart monthly events.json --category walks --multi
//!
//! # Wins per month and season for a pitcher
//! retrochart decisions games.json --player lestj001 --from-year 2008
//!
//! # Any command as JSON
//! retrochart tally events.json --output json
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=retrochartlib=trace`) or pass `--verbose` to
//! see skipped rows and unmapped tokens on stderr.

mod render;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use retrochartlib::{
    decisions_by_month, decode_at_bat, decode_pitch_sequence, hit_location_chart_with,
    is_first_strike, monthly_events, monthly_multi_events, tally_categories, Decision,
    EventCategory, EventCode, EventRow, FieldingGroup, FieldingLayout, GameRow, Position,
    SeasonWindow,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("retrochart")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Decode Retrosheet play-by-play notation and chart hits and events")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["table", "markdown", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log skipped rows and aggregation summaries to stderr"),
        )
        .subcommand(
            Command::new("pitches")
                .about("Decode a pitch sequence")
                .arg(
                    Arg::new("sequence")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Pitch sequence text (e.g. B1BCC>X)"),
                )
                .arg(
                    Arg::new("code")
                        .long("code")
                        .required(true)
                        .help("Numeric event code of the plate appearance"),
                ),
        )
        .subcommand(
            Command::new("first-strike")
                .about("Check whether the first pitch to the batter was a strike")
                .arg(
                    Arg::new("sequence")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Pitch sequence text"),
                ),
        )
        .subcommand(
            Command::new("atbat")
                .about("Decode the hit outcome of an event text")
                .arg(
                    Arg::new("text")
                        .required(true)
                        .help("Event text (e.g. HR/89/F.1-H)"),
                )
                .arg(
                    Arg::new("code")
                        .long("code")
                        .required(true)
                        .help("Numeric event code"),
                )
                .arg(
                    Arg::new("batted-ball")
                        .short('b')
                        .long("batted-ball")
                        .default_value("")
                        .hide_default_value(true)
                        .help("Batted-ball code (G, L, F, P)"),
                ),
        )
        .subcommand(
            Command::new("hit-chart")
                .about("Build outfield, infield and battery hit-location charts")
                .arg(rows_arg())
                .arg(layout_arg(FieldingGroup::Outfield, "7,8,9"))
                .arg(layout_arg(FieldingGroup::Infield, "5,6,4,3"))
                .arg(layout_arg(FieldingGroup::Battery, "2,1")),
        )
        .subcommand(
            Command::new("monthly")
                .about("Count events per month")
                .arg(rows_arg())
                .arg(category_arg())
                .arg(
                    Arg::new("multi")
                        .short('m')
                        .long("multi")
                        .action(ArgAction::SetTrue)
                        .help("Count games with two or more events instead of events"),
                ),
        )
        .subcommand(
            Command::new("tally")
                .about("Count rows per event category")
                .arg(rows_arg()),
        )
        .subcommand(
            Command::new("decisions")
                .about("Count a pitcher's wins or losses per month and season")
                .arg(
                    Arg::new("games")
                        .required(true)
                        .help("JSON file of game rows ('-' for stdin)"),
                )
                .arg(
                    Arg::new("player")
                        .short('p')
                        .long("player")
                        .required(true)
                        .help("Retrosheet player id (e.g. lestj001)"),
                )
                .arg(
                    Arg::new("decision")
                        .short('d')
                        .long("decision")
                        .value_parser(["win", "loss"])
                        .default_value("win")
                        .help("Decision to count"),
                )
                .arg(
                    Arg::new("from-year")
                        .long("from-year")
                        .value_parser(value_parser!(i32))
                        .help("First season (default 2010)"),
                )
                .arg(
                    Arg::new("to-year")
                        .long("to-year")
                        .value_parser(value_parser!(i32))
                        .help("Last season (default 2014)"),
                )
                .arg(
                    Arg::new("from-month")
                        .long("from-month")
                        .value_parser(value_parser!(u32))
                        .help("First month, 1-12 (default 3)"),
                )
                .arg(
                    Arg::new("to-month")
                        .long("to-month")
                        .value_parser(value_parser!(u32))
                        .help("Last month, 1-12 (default 10)"),
                ),
        )
}

fn rows_arg() -> Arg {
    Arg::new("rows")
        .required(true)
        .help("JSON file of event rows ('-' for stdin)")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .short('c')
        .long("category")
        .value_parser(["hits", "strikeouts", "outs", "walks"])
        .help("Only count rows of this event category")
}

fn layout_arg(group: FieldingGroup, default: &'static str) -> Arg {
    Arg::new(group.name())
        .long(group.name())
        .value_delimiter(',')
        .value_parser(value_parser!(Position))
        .help(format!(
            "Positions charted as {} (numbers or abbreviations, default {})",
            group, default
        ))
}

/// Build the fielding layout from the hit-chart flags.
///
/// A group whose flag is absent keeps its default positions.
fn extract_layout(matches: &ArgMatches) -> FieldingLayout {
    FieldingGroup::ALL
        .into_iter()
        .fold(FieldingLayout::default(), |layout, group| {
            match matches.get_many::<Position>(group.name()) {
                Some(positions) => layout.with_group(group, positions.copied().collect()),
                None => layout,
            }
        })
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug over warn.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        "retrochart=debug,retrochartlib=debug"
    } else {
        "retrochart=warn,retrochartlib=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Read a JSON array of rows from a file, or from stdin when the path is `-`.
fn read_rows<T: DeserializeOwned>(path: &str) -> anyhow::Result<Vec<T>> {
    let rows: Vec<T> = if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read rows from stdin")?;
        serde_json::from_str(&buffer).context("failed to parse rows from stdin")?
    } else {
        let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse rows in {}", path))?
    };
    info!(path, rows = rows.len(), "rows loaded");
    Ok(rows)
}

fn parse_code(matches: &ArgMatches) -> anyhow::Result<EventCode> {
    let raw = matches
        .get_one::<String>("code")
        .map(String::as_str)
        .unwrap_or_default();
    Ok(raw.parse::<EventCode>()?)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    match matches.get_one::<String>(id) {
        Some(value) => Ok(value.as_str()),
        None => bail!("missing required argument '{}'", id),
    }
}

/// Handler for pitches command
fn pitches_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let text = required(matches, "sequence")?;
    let code = parse_code(matches)?;
    let sequence = decode_pitch_sequence(text, code);
    Ok(render::render_pitch_sequence(text, &sequence, mode)?)
}

/// Handler for first-strike command
fn first_strike_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let text = required(matches, "sequence")?;
    Ok(render::render_first_strike(text, is_first_strike(text), mode)?)
}

/// Handler for atbat command
fn atbat_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let text = required(matches, "text")?;
    let code = parse_code(matches)?;
    let batted_ball = matches
        .get_one::<String>("batted-ball")
        .map(String::as_str)
        .unwrap_or_default();
    let outcome = decode_at_bat(text, code, batted_ball);
    Ok(render::render_at_bat(outcome.as_ref(), mode)?)
}

/// Handler for hit-chart command
fn hit_chart_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let layout = extract_layout(matches);
    debug!(?layout, "fielding layout");
    let rows: Vec<EventRow> = read_rows(required(matches, "rows")?)?;
    let charts = hit_location_chart_with(&rows, layout);
    Ok(render::render_hit_charts(&charts, mode)?)
}

/// Handler for monthly command
fn monthly_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let rows: Vec<EventRow> = read_rows(required(matches, "rows")?)?;
    let category = matches
        .get_one::<String>("category")
        .map(|c| c.parse::<EventCategory>())
        .transpose()?;
    let multi = matches.get_flag("multi");

    let qualifying: Vec<&EventRow> = rows
        .iter()
        .filter(|row| category.map_or(true, |c| row.category() == Some(c)))
        .collect();
    debug!(
        category = category.map(|c| c.name()),
        qualifying = qualifying.len(),
        "filtered rows"
    );

    let tally = if multi {
        monthly_multi_events(qualifying.iter().copied())
    } else {
        monthly_events(qualifying.iter().copied())
    };

    let noun = category.map_or("events", |c| c.name());
    let title = if multi {
        format!("Games 2+ {}", noun)
    } else {
        noun.to_string()
    };
    Ok(render::render_monthly(&title, &tally, mode)?)
}

/// Handler for tally command
fn tally_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let rows: Vec<EventRow> = read_rows(required(matches, "rows")?)?;
    let counts = tally_categories(&rows);
    Ok(render::render_categories(&counts, mode)?)
}

/// Build the season window from the decision flags
fn extract_window(matches: &ArgMatches) -> anyhow::Result<SeasonWindow> {
    let defaults = SeasonWindow::default();
    let from_year = matches
        .get_one::<i32>("from-year")
        .copied()
        .unwrap_or(defaults.from_year());
    let to_year = matches
        .get_one::<i32>("to-year")
        .copied()
        .unwrap_or(defaults.to_year());
    let from_month = matches
        .get_one::<u32>("from-month")
        .copied()
        .unwrap_or(defaults.from_month());
    let to_month = matches
        .get_one::<u32>("to-month")
        .copied()
        .unwrap_or(defaults.to_month());
    Ok(SeasonWindow::new(from_year, to_year, from_month, to_month)?)
}

/// Handler for decisions command
fn decisions_handler(matches: &ArgMatches, mode: OutputFormat) -> anyhow::Result<String> {
    let window = extract_window(matches)?;
    let player = required(matches, "player")?;
    let decision: Decision = matches
        .get_one::<String>("decision")
        .map(String::as_str)
        .unwrap_or("win")
        .parse()?;
    let games: Vec<GameRow> = read_rows(required(matches, "games")?)?;

    let grid = decisions_by_month(&games, player, decision, &window);
    let title = format!("{} {}s", player, decision);
    Ok(render::render_decision_grid(&title, &grid, mode)?)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let mode = OutputFormat::from_arg(
        matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("table"),
    );

    match matches.subcommand() {
        Some(("pitches", sub)) => pitches_handler(sub, mode),
        Some(("first-strike", sub)) => first_strike_handler(sub, mode),
        Some(("atbat", sub)) => atbat_handler(sub, mode),
        Some(("hit-chart", sub)) => hit_chart_handler(sub, mode),
        Some(("monthly", sub)) => monthly_handler(sub, mode),
        Some(("tally", sub)) => tally_handler(sub, mode),
        Some(("decisions", sub)) => decisions_handler(sub, mode),
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given"),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
