//! Interactive shell loop
//!
//! Reads one command per line until an exit word or end of input. Bad input
//! is reported and the loop keeps going.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;

use super::commands::{execute, Outcome, ShellLine};
use super::tokenize::tokenize;
use crate::config::settings::Settings;
use crate::error::DiaryResult;
use crate::ledger::Ledger;
use crate::storage::LedgerStore;

const EXIT_WORDS: [&str; 4] = ["exit", "stop", "x", "bye"];

const PROMPT: &str = "diary> ";

/// Check whether a line ends the session
pub fn is_exit_word(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    EXIT_WORDS.contains(&line.as_str())
}

/// Run the shell until an exit word or end of input
///
/// Pending changes are saved on the way out when `autosave_on_exit` is set.
pub async fn run_shell<S, R, W>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    input: R,
    out: &mut W,
) -> DiaryResult<()>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if is_exit_word(trimmed) {
            break;
        }

        let parsed = match ShellLine::try_parse_from(tokenize(trimmed)) {
            Ok(parsed) => parsed,
            Err(e) => {
                if !matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    tracing::warn!("Could not parse '{}'", trimmed);
                }
                write!(out, "{}", e)?;
                continue;
            }
        };

        match execute(ledger, settings, parsed.command, out).await {
            Ok(Outcome::Done) => {}
            Ok(Outcome::Rejected) => writeln!(out, "Rejected: {}", trimmed)?,
            Err(e) => {
                tracing::warn!("Command '{}' failed: {}", trimmed, e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    if settings.autosave_on_exit && ledger.has_unsaved_changes() {
        ledger.save().await?;
        writeln!(out, "Saved.")?;
    }

    Ok(())
}
