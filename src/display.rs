use std::io::{self, Write};

use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::interpret::{Interpretation, TimestampUnit};
use crate::offset::{Generated, OffsetChoice};

/// ISO 8601 with an explicit offset, truncated to whole seconds.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
}

#[derive(Tabled)]
struct TimeRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct InterpretationJson {
    unit: TimestampUnit,
    epoch_seconds: i64,
    utc: String,
    local: String,
}

#[derive(Serialize)]
struct GeneratedJson<'a> {
    label: &'a str,
    epoch_seconds: i64,
    utc: String,
    local: String,
}

pub fn iso<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(ISO_FORMAT).to_string()
}

pub fn print_main_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "What do you want to do?".bold())?;
    writeln!(out, "  1) Transform timestamp → date")?;
    writeln!(out, "  2) Produce new timestamp(s) from current time")?;
    writeln!(out, "  3) Show current timestamp (quick)")?;
    writeln!(out, "  0) Exit")?;
    write!(out, "Enter 0-3: ")?;
    out.flush()
}

pub fn print_offset_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", "Choose offset:".bold())?;
    for choice in OffsetChoice::ALL {
        writeln!(out, "  {}) {}", choice.menu_index(), choice.label())?;
    }
    write!(out, "Enter 1-{}: ", OffsetChoice::ALL.len())?;
    out.flush()
}

pub fn print_prompt(out: &mut impl Write, prompt: &str) -> io::Result<()> {
    write!(out, "{}", prompt)?;
    out.flush()
}

pub fn print_interpretation(
    out: &mut impl Write,
    result: &Interpretation,
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Json => {
            let doc = InterpretationJson {
                unit: result.unit,
                epoch_seconds: result.epoch_seconds(),
                utc: iso(&result.utc),
                local: iso(&result.local),
            };
            print_json(out, &doc)
        }
        Format::Table => {
            writeln!(
                out,
                "\n{} {} since epoch:",
                "Parsed as".bold(),
                result.unit.name().cyan()
            )?;
            let rows = vec![
                TimeRow {
                    field: "UTC".to_string(),
                    value: iso(&result.utc),
                },
                TimeRow {
                    field: "Local".to_string(),
                    value: iso(&result.local),
                },
            ];
            print_table(out, rows)
        }
    }
}

pub fn print_generated(out: &mut impl Write, result: &Generated, format: Format) -> io::Result<()> {
    match format {
        Format::Json => {
            let doc = GeneratedJson {
                label: &result.label,
                epoch_seconds: result.epoch_seconds,
                utc: iso(&result.utc),
                local: iso(&result.local),
            };
            print_json(out, &doc)
        }
        Format::Table => {
            writeln!(out, "\n{}:", result.label.bold())?;
            let rows = vec![
                TimeRow {
                    field: "Unix seconds".to_string(),
                    value: result.epoch_seconds.to_string(),
                },
                TimeRow {
                    field: "UTC".to_string(),
                    value: iso(&result.utc),
                },
                TimeRow {
                    field: "Local".to_string(),
                    value: iso(&result.local),
                },
            ];
            print_table(out, rows)
        }
    }
}

pub fn print_error(out: &mut impl Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}\n", "✗".red().bold(), msg)
}

pub fn print_goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Bye!".green())
}

fn print_table(out: &mut impl Write, rows: Vec<TimeRow>) -> io::Result<()> {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    writeln!(out, "{}\n", table)
}

fn print_json<T: Serialize>(out: &mut impl Write, doc: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(doc).map_err(io::Error::other)?;
    writeln!(out, "{}", text)
}
