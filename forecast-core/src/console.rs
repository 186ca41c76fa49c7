use anyhow::Result;

/// Outcome of an interactive prompt: a validated value, or a request to end the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Value(T),
    Exit,
}

/// Line-oriented terminal used by the session.
///
/// Implemented by the CLI on top of a real terminal and by scripted doubles in tests.
pub trait Console {
    /// Ask for one line of input. `Ok(None)` means input was closed or cancelled.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line of output for the user.
    fn say(&mut self, line: &str);
}
