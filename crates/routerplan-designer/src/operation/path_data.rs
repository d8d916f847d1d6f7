//! Path data syntax.
//!
//! Commands are separated by `;`. Each command is one letter followed by a
//! comma-separated list of measurements, read in x/y pairs:
//!
//! | Command | Values | Meaning                         |
//! |---------|--------|---------------------------------|
//! | `M`     | 2      | start a subpath                 |
//! | `L`     | 2      | line to                         |
//! | `Q`     | 4      | quadratic curve (control, end)  |
//! | `C`     | 6      | cubic curve (two controls, end) |
//! | `Z`     | 0      | close the subpath               |
//! | `E`     | 0      | end the subpath open            |
//!
//! Every `M` must be closed by `Z` or ended by `E` before the next `M` and
//! before the end of the data.

use routerplan_core::RawMeasurement;

use crate::error::{ResolveError, ResolveResult};

/// One x/y measurement pair, still textual
#[derive(Debug, Clone, PartialEq)]
pub struct PathPair {
    pub x: RawMeasurement,
    pub y: RawMeasurement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(PathPair),
    LineTo(PathPair),
    QuadraticTo(PathPair, PathPair),
    CubicTo(PathPair, PathPair, PathPair),
    Close,
    End,
}

/// Parse and syntax-check path data. Measurements are not evaluated here.
pub fn parse_path_data(data: &str) -> ResolveResult<Vec<PathCommand>> {
    let mut commands = Vec::new();
    for (index, part) in data
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
    {
        commands.push(parse_command(index, part)?);
    }

    if commands.is_empty() {
        return Err(ResolveError::malformed_path(0, "empty path data"));
    }
    check_balanced(&commands)?;
    Ok(commands)
}

fn parse_command(index: usize, part: &str) -> ResolveResult<PathCommand> {
    let mut chars = part.chars();
    let letter = chars.next().map(|c| c.to_ascii_uppercase());
    let rest = chars.as_str().trim();
    let values: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };
    if let Some(position) = values.iter().position(|v| v.is_empty()) {
        return Err(ResolveError::malformed_path(
            index,
            format!("empty value at position {}", position + 1),
        ));
    }

    let expected = match letter {
        Some('M') | Some('L') => 2,
        Some('Q') => 4,
        Some('C') => 6,
        Some('Z') | Some('E') => 0,
        _ => {
            return Err(ResolveError::malformed_path(
                index,
                format!("unknown command '{}'", part),
            ))
        }
    };
    if values.len() != expected {
        return Err(ResolveError::malformed_path(
            index,
            format!("expected {} values, found {}", expected, values.len()),
        ));
    }

    let mut pairs = values.chunks(2).map(|pair| PathPair {
        x: RawMeasurement::parse(pair[0]),
        y: RawMeasurement::parse(pair[1]),
    });
    let mut next = || {
        pairs
            .next()
            .ok_or_else(|| ResolveError::malformed_path(index, "missing coordinate pair"))
    };

    Ok(match letter {
        Some('M') => PathCommand::MoveTo(next()?),
        Some('L') => PathCommand::LineTo(next()?),
        Some('Q') => PathCommand::QuadraticTo(next()?, next()?),
        Some('C') => PathCommand::CubicTo(next()?, next()?, next()?),
        Some('Z') => PathCommand::Close,
        _ => PathCommand::End,
    })
}

fn check_balanced(commands: &[PathCommand]) -> ResolveResult<()> {
    let mut open = false;
    for (index, command) in commands.iter().enumerate() {
        match command {
            PathCommand::MoveTo(_) => {
                if open {
                    return Err(ResolveError::malformed_path(
                        index,
                        "previous subpath was not closed or ended",
                    ));
                }
                open = true;
            }
            PathCommand::LineTo(_) | PathCommand::QuadraticTo(..) | PathCommand::CubicTo(..) => {
                if !open {
                    return Err(ResolveError::malformed_path(
                        index,
                        "drawing command outside a subpath",
                    ));
                }
            }
            PathCommand::Close | PathCommand::End => {
                if !open {
                    return Err(ResolveError::malformed_path(index, "no open subpath"));
                }
                open = false;
            }
        }
    }
    if open {
        return Err(ResolveError::malformed_path(
            commands.len(),
            "last subpath was not closed or ended",
        ));
    }
    Ok(())
}
