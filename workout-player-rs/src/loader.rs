//! Workout file loader.
//!
//! A workout file is UTF-8 text with `;` as the field separator, one header
//! row and one row per set:
//!
//! ```text
//! order;name;duration;side;description
//! 1;Squats;30;;Bodyweight squats
//! ```
//!
//! The whole file is parsed before anything is played.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::FormatError;
use crate::workout::{Side, WorkoutSet};

pub const DELIMITER: char = ';';
pub const EXPECTED_HEADER: [&str; 5] = ["order", "name", "duration", "side", "description"];

/// Load and validate a workout file.
pub fn load(path: &Path) -> Result<Vec<WorkoutSet>, FormatError> {
    let contents = fs::read_to_string(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sets = parse(&contents).map_err(|e| match e {
        ParseFailure::Empty => FormatError::Empty {
            path: path.to_path_buf(),
        },
        ParseFailure::NoSets => FormatError::NoSets {
            path: path.to_path_buf(),
        },
        ParseFailure::Format(e) => e,
    })?;

    debug!("Loaded {} sets from {}", sets.len(), path.display());
    Ok(sets)
}

enum ParseFailure {
    Empty,
    NoSets,
    Format(FormatError),
}

impl From<FormatError> for ParseFailure {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

fn parse(contents: &str) -> Result<Vec<WorkoutSet>, ParseFailure> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    // Row numbers are 1-based file lines so errors point at the right place.
    let mut rows = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = rows.next() else {
        return Err(ParseFailure::Empty);
    };

    let header = split_fields(header_line);
    if header != EXPECTED_HEADER {
        return Err(FormatError::Header {
            expected: EXPECTED_HEADER.iter().map(|s| s.to_string()).collect(),
            actual: header,
        }
        .into());
    }

    let mut sets = Vec::new();
    for (row, line) in rows {
        sets.push(parse_row(row, line)?);
    }

    if sets.is_empty() {
        return Err(ParseFailure::NoSets);
    }
    Ok(sets)
}

fn parse_row(row: usize, line: &str) -> Result<WorkoutSet, FormatError> {
    let fields = split_fields(line);
    if fields.len() != EXPECTED_HEADER.len() {
        return Err(FormatError::FieldCount {
            row,
            expected: EXPECTED_HEADER.len(),
            actual: fields.len(),
        });
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let (order, name, duration, side, description) = (next(), next(), next(), next(), next());

    let order = parse_positive(row, "order", &order)?;
    let duration = parse_positive(row, "duration", &duration)?;

    if name.trim().is_empty() {
        return Err(FormatError::EmptyName { row });
    }

    let side = Side::parse(&side).ok_or(FormatError::InvalidSide { row, value: side })?;

    Ok(WorkoutSet {
        order,
        name,
        duration,
        side,
        description,
    })
}

fn parse_positive(row: usize, field: &'static str, value: &str) -> Result<u32, FormatError> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| FormatError::NotAnInteger {
            row,
            field,
            value: value.to_string(),
        })?;

    if n <= 0 {
        return Err(FormatError::NotPositive { row, field });
    }
    u32::try_from(n).map_err(|_| FormatError::NotAnInteger {
        row,
        field,
        value: value.to_string(),
    })
}

/// Split one line on `;`. Double-quoted fields may contain the delimiter,
/// and `""` inside quotes is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            c if c == DELIMITER && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);

    fields
}
