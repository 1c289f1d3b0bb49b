// src/session.rs
use anyhow::{bail, Result};
use std::io::BufRead;
use tracing::{info, warn};

use crate::{
    dashboard::Dashboard,
    filter::{parse_date, DateRange},
    render::Presenter,
};

/// One line of interactive input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Re-render for this range.
    Range(DateRange),
    /// Back to the full table bounds.
    Reset,
    Quit,
    /// Blank line, ignored.
    Skip,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [] => Ok(Command::Skip),
        [word] if matches!(word.to_ascii_lowercase().as_str(), "quit" | "exit" | "q") => {
            Ok(Command::Quit)
        }
        [word] if word.eq_ignore_ascii_case("all") => Ok(Command::Reset),
        [start, end] => Ok(Command::Range(DateRange::new(
            parse_date(start)?,
            parse_date(end)?,
        )?)),
        _ => bail!("expected `START END` (YYYY-MM-DD), `all` or `quit`, got `{}`", line.trim()),
    }
}

/// Render `initial`, then re-render once per range read from `input` until
/// `quit` or end of input. Bad lines are logged and skipped.
pub fn run<R: BufRead>(
    dashboard: &Dashboard,
    initial: DateRange,
    input: R,
    presenter: &mut dyn Presenter,
) -> Result<usize> {
    dashboard.render(initial, presenter)?;
    let mut renders = 1;

    for line in input.lines() {
        let line = line?;
        let range = match parse_command(&line) {
            Ok(Command::Range(range)) => range,
            Ok(Command::Reset) => dashboard.bounds().map(DateRange::from).unwrap_or(initial),
            Ok(Command::Quit) => break,
            Ok(Command::Skip) => continue,
            Err(e) => {
                warn!("ignoring input: {:#}", e);
                continue;
            }
        };
        dashboard.render(range, presenter)?;
        renders += 1;
    }

    info!(renders, "session finished");
    Ok(renders)
}
