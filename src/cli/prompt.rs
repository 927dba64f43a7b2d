//! Interactive prompts on stderr.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Ask `question` on stderr and read the answer from stdin.
pub fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    confirm_with(question, &mut stdin.lock(), &mut stderr)
}

/// Only `y` or `yes` (any case) confirms; end of input declines.
pub fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<bool> {
    write!(writer, "{question} [y/N]: ")?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(false);
    }

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Ask `question` on stderr, offering `default`, and read the answer from stdin.
pub fn ask(question: &str, default: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    ask_with(question, default, &mut stdin.lock(), &mut stderr)
}

/// An empty answer or end of input keeps `default`.
pub fn ask_with<R: BufRead, W: Write>(
    question: &str,
    default: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<String> {
    write!(writer, "{question} [{default}]: ")?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(default.to_string());
    }

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}
