//! Display collaborator for user-visible text.
//!
//! The turn loop never writes to stdout or stderr directly; it reports
//! through a `Console`, so tests can capture what a user would see.

/// Sink for user-facing messages.
pub trait Console {
    /// Regular output.
    fn display(&mut self, text: &str);

    /// Error output.
    fn error(&mut self, text: &str);
}

/// Writes to stdout and stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn display(&mut self, text: &str) {
        println!("{text}");
    }

    fn error(&mut self, text: &str) {
        eprintln!("ERROR: {text}");
    }
}

/// One captured line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleLine {
    Display(String),
    Error(String),
}

/// Records everything in memory.
#[derive(Clone, Debug, Default)]
pub struct CapturedConsole {
    lines: Vec<ConsoleLine>,
}

impl CapturedConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// Text of every `display` line, in order.
    pub fn displayed(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ConsoleLine::Display(text) => Some(text.as_str()),
            ConsoleLine::Error(_) => None,
        })
    }

    /// Text of every `error` line, in order.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ConsoleLine::Error(text) => Some(text.as_str()),
            ConsoleLine::Display(_) => None,
        })
    }
}

impl Console for CapturedConsole {
    fn display(&mut self, text: &str) {
        self.lines.push(ConsoleLine::Display(text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.lines.push(ConsoleLine::Error(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_console_keeps_order() {
        let mut console = CapturedConsole::new();
        console.display("one");
        console.error("two");
        console.display("three");

        assert_eq!(console.lines().len(), 3);
        assert_eq!(console.displayed().collect::<Vec<_>>(), ["one", "three"]);
        assert_eq!(console.errors().collect::<Vec<_>>(), ["two"]);
    }
}
