//! Interactive loop for the terminal.

use std::future::Future;
use std::io::{self, Write};

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::agent::DoctorAgent;

pub const BANNER: &str = "Doctor Finder is ready! (Type 'quit' or 'exit' to stop)";
const THINKING: &str = "Agent: Thinking...";

fn clear_thinking(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\r{:width$}\r", "", width = THINKING.len() + 2)
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

/// Read lines from `input` until quit, end of input or `shutdown`.
///
/// Turn failures are reported and the loop continues.
pub async fn run<R, W, S>(
    agent: &mut DoctorAgent,
    input: R,
    out: &mut W,
    shutdown: S,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{}", "-".repeat(50))?;

    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        write!(out, "\n{} ", "You:".bold())?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut shutdown => None,
        };
        let Some(line) = line else {
            writeln!(out, "\nGoodbye!")?;
            return Ok(());
        };

        let text = line.trim();
        if is_quit(text) {
            writeln!(out, "Goodbye!")?;
            return Ok(());
        }
        if text.is_empty() {
            continue;
        }

        write!(out, "{THINKING}")?;
        out.flush()?;

        let result = tokio::select! {
            r = agent.run_turn(text) => Some(r),
            () = &mut shutdown => None,
        };
        clear_thinking(out)?;

        match result {
            Some(Ok(answer)) => writeln!(out, "{} {answer}", "Agent:".green().bold())?,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "turn failed");
                writeln!(out, "\n{} {e}", "An error occurred:".red())?;
            }
            None => {
                writeln!(out, "\nGoodbye!")?;
                return Ok(());
            }
        }
    }
}
