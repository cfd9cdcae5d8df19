//! Human input collaborators.
//!
//! A `MoveSource` blocks until a line is available. There is no timeout
//! and no cancellation: closing the underlying input is the only way to
//! unblock a waiting read, and it surfaces as `InputError::Closed`.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::InputError;

/// Line-oriented source of raw move strings.
pub trait MoveSource: Send {
    /// Show `prompt` and wait for the next line.
    fn read_move(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Reads moves from a buffered reader, writing prompts to a writer.
pub struct LineSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead + Send, W: Write + Send> LineSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead + Send, W: Write + Send> MoveSource for LineSource<R, W> {
    fn read_move(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

/// Prompts on stdout and reads from the process-wide stdin buffer.
///
/// Several of these can coexist, one per human seat, without stealing
/// each other's lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdinSource;

impl MoveSource for StdinSource {
    fn read_move(&mut self, prompt: &str) -> Result<String, InputError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

/// Pre-recorded lines, for tests and replays. Closed once drained.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl MoveSource for ScriptedInput {
    fn read_move(&mut self, _prompt: &str) -> Result<String, InputError> {
        self.lines
            .pop_front()
            .map(|line| line.trim().to_string())
            .ok_or(InputError::Closed)
    }
}
