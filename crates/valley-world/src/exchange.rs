//! Plain-text import and export.
//!
//! One unit per line as `SpeciesName row column`, whitespace separated.
//! Blank lines and lines starting with `#` are skipped. Only species and
//! position travel through this format; every imported unit starts from its
//! species' default state.

use crate::registry::Registry;
use crate::simulation::Valley;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};
use valley_core::{Error, Position, Result, ValleyConfig};

/// Build a fresh valley from text using the built-in species
pub fn import_str(text: &str, config: ValleyConfig) -> Result<Valley> {
    import_with(text, config, &Registry::default())
}

/// Build a fresh valley from text, resolving species names through
/// `registry`. The first bad line aborts the import.
pub fn import_with(text: &str, config: ValleyConfig, registry: &Registry) -> Result<Valley> {
    let mut valley = Valley::new(config)?;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        let (name, pos) = parse_record(record, line)?;
        if !valley.grid().in_bounds(pos) {
            return Err(Error::OutOfBounds {
                row: pos.row,
                column: pos.column,
                size: valley.size(),
            }
            .at_line(line));
        }
        let body = registry.build(name).ok_or_else(|| Error::UnknownSpecies {
            line,
            name: name.to_string(),
        })?;
        valley.insert(pos, body).map_err(|err| err.at_line(line))?;
        debug!(line, species = name, row = pos.row, column = pos.column, "Imported unit");
    }

    info!(population = valley.grid().population(), "Valley imported");
    Ok(valley)
}

fn parse_record(record: &str, line: usize) -> Result<(&str, Position)> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    let &[name, row, column] = tokens.as_slice() else {
        return Err(Error::MalformedRecord {
            line,
            reason: format!("expected 'Species row column', got {} tokens", tokens.len()),
        });
    };

    let coordinate = |token: &str| {
        token.parse::<i32>().map_err(|_| Error::MalformedRecord {
            line,
            reason: format!("'{}' is not an integer coordinate", token),
        })
    };
    Ok((name, Position::new(coordinate(row)?, coordinate(column)?)))
}

pub fn import_file(path: impl AsRef<Path>, config: ValleyConfig) -> Result<Valley> {
    let text = std::fs::read_to_string(path)?;
    import_str(&text, config)
}

/// One line per occupied cell, row-major
pub fn export_string(valley: &Valley) -> String {
    let mut out = String::new();
    for unit in valley.grid().units() {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{} {} {}",
            unit.species().name(),
            unit.position.row,
            unit.position.column
        );
    }
    out
}

pub fn export_file(valley: &Valley, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, export_string(valley))?;
    Ok(())
}
