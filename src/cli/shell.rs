//! Interactive shell
//!
//! Reads commands line by line and runs them against one in-memory
//! storage, so customers and accounts created earlier in the session are
//! still there for later commands. Each line is parsed by the same clap
//! command set as the one-shot binary.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::error::ErrorKind;
use clap::Parser;
use shell_words::split;

use super::{dispatch, Commands, Context};
use crate::error::TellerResult;

#[derive(Parser)]
#[command(
    name = "teller",
    no_binary_name = true,
    disable_version_flag = true,
    after_help = "Type 'exit' or 'quit' to leave the shell."
)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Outcome of reading one line
pub enum LineInput {
    /// Blank line or comment
    Empty,
    /// `exit` / `quit`
    Exit,
    /// Text to show as-is, such as help output
    Message(String),
    Command(Commands),
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Parse one shell line
///
/// The error is a ready-to-print message.
pub fn parse_line(line: &str) -> Result<LineInput, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(LineInput::Empty);
    }

    let tokens = split(line).map_err(|err| format!("Error: {}", err))?;

    match tokens.first().map(|t| t.to_ascii_lowercase()).as_deref() {
        None => return Ok(LineInput::Empty),
        Some("exit") | Some("quit") => return Ok(LineInput::Exit),
        _ => {}
    }

    match ShellLine::try_parse_from(tokens) {
        Ok(parsed) => Ok(LineInput::Command(parsed.command)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion => Ok(LineInput::Message(err.to_string())),
            _ => Err(err.to_string()),
        },
    }
}

/// Run a single line against the context
pub fn handle_line(ctx: &Context<'_>, line: &str) -> TellerResult<LoopControl> {
    match parse_line(line) {
        Ok(LineInput::Empty) => Ok(LoopControl::Continue),
        Ok(LineInput::Exit) => Ok(LoopControl::Exit),
        Ok(LineInput::Message(text)) => {
            print!("{}", text);
            Ok(LoopControl::Continue)
        }
        Ok(LineInput::Command(cmd)) => {
            tracing::debug!(line, "shell command");
            dispatch(ctx, cmd)?;
            Ok(LoopControl::Continue)
        }
        Err(message) => {
            eprint!("{}", message);
            if !message.ends_with('\n') {
                eprintln!();
            }
            Ok(LoopControl::Continue)
        }
    }
}

/// Run the shell until `exit`, `quit` or end of input
///
/// A prompt is shown only when stdin is a terminal, so piped scripts get
/// clean output. Command failures are reported and the shell carries on.
pub fn run_shell(ctx: &Context<'_>) -> TellerResult<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    if interactive {
        println!("teller shell. Type 'help' for commands, 'exit' to quit.");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("teller> ");
            io::stdout().flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match handle_line(ctx, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                tracing::warn!(error = %err, "command failed");
                eprintln!("Error: {}", err);
            }
        }
    }

    tracing::info!("shell closed");
    Ok(())
}
