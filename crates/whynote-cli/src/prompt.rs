use std::io::{self, BufRead, Write};

/// Interactive input. Every method may be cancelled; a cancelled prompt must
/// abandon the command before anything is written.
pub trait Prompter {
    /// Ask for a line of text. `None` means cancelled. When `initial` is given
    /// and the answer is blank, the initial value is returned.
    fn input(&mut self, message: &str, initial: Option<&str>) -> Option<String>;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompts on stderr, reads answers from stdin. End of input cancels.
pub struct StdinPrompter<R> {
    input: R,
}

impl StdinPrompter<io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> StdinPrompter<R> {
    #[cfg(test)]
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from stdin");
                None
            }
        }
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn input(&mut self, message: &str, initial: Option<&str>) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = match initial {
            Some(value) => write!(stderr, "{} [{}]: ", message, value),
            None => write!(stderr, "{}: ", message),
        };
        let _ = stderr.flush();

        let answer = self.read_line()?;
        match initial {
            Some(value) if answer.trim().is_empty() => Some(value.to_string()),
            _ => Some(answer),
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N]: ", message);
        let _ = stderr.flush();

        matches!(
            self.read_line().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }
}

/// Replays canned answers in order. Running out of answers cancels.
#[cfg(test)]
pub(crate) struct Scripted {
    pub inputs: std::collections::VecDeque<Option<String>>,
    pub confirms: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new(inputs: &[Option<&str>], confirms: &[bool]) -> Self {
        Self {
            inputs: inputs.iter().map(|i| i.map(str::to_string)).collect(),
            confirms: confirms.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for Scripted {
    fn input(&mut self, message: &str, initial: Option<&str>) -> Option<String> {
        self.asked.push(message.to_string());
        let answer = self.inputs.pop_front().flatten()?;
        match initial {
            Some(value) if answer.trim().is_empty() => Some(value.to_string()),
            _ => Some(answer),
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }
}
