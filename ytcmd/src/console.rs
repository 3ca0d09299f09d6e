use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait InputProvider {
    /// Shows `prompt` and returns the next line without its line ending, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Destination for user-facing messages.
pub trait OutputSink: Send {
    fn line(&mut self, text: &str);

    /// Replaces the current status line instead of appending a new one.
    fn status(&mut self, text: &str);
}

#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputProvider for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Writes to stdout; status updates redraw a single line with a carriage return.
#[derive(Debug, Default)]
pub struct TerminalOutput {
    status_width: Option<usize>
}

impl OutputSink for TerminalOutput {
    fn line(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if self.status_width.take().is_some() {
            let _ = writeln!(stdout);
        }
        let _ = writeln!(stdout, "{text}");
    }

    fn status(&mut self, text: &str) {
        let width = text.chars().count();
        let pad = self.status_width.unwrap_or(0).saturating_sub(width);
        self.status_width = Some(width);

        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\r{text}{:pad$}", "");
        let _ = stdout.flush();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::io;

    use super::{InputProvider, OutputSink};

    /// Replays canned answers and remembers every prompt shown.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        answers: VecDeque<String>,
        pub prompts: Vec<String>
    }

    impl ScriptedInput {
        pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                prompts: Vec::new()
            }
        }
    }

    impl InputProvider for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.pop_front())
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub lines: Vec<String>,
        pub statuses: Vec<String>
    }

    impl RecordingSink {
        pub fn contains(&self, needle: &str) -> bool {
            self.lines.iter().any(|l| l.contains(needle))
        }
    }

    impl OutputSink for RecordingSink {
        fn line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn status(&mut self, text: &str) {
            self.statuses.push(text.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingSink, ScriptedInput};
    use super::*;

    #[test]
    fn test_scripted_input_runs_out() {
        let mut input = ScriptedInput::new(["first"]);
        assert_eq!(input.read_line("a: ").unwrap(), Some("first".to_string()));
        assert_eq!(input.read_line("b: ").unwrap(), None);
        assert_eq!(input.prompts, vec!["a: ", "b: "]);
    }

    #[test]
    fn test_recording_sink_keeps_status_apart() {
        let mut sink = RecordingSink::default();
        sink.status("Progress: 10.0%");
        sink.line("done");
        assert_eq!(sink.statuses, vec!["Progress: 10.0%"]);
        assert!(sink.contains("done"));
        assert!(!sink.contains("Progress"));
    }

    #[test]
    fn test_terminal_output_tracks_status_width() {
        let mut output = TerminalOutput::default();
        output.status("Progress: 10.0% | Speed: 1.00 MB/s | ETA: 00:10");
        assert_eq!(output.status_width, Some(47));
        output.status("Progress: 11.0%");
        assert_eq!(output.status_width, Some(15));
        output.line("");
        assert_eq!(output.status_width, None);
    }
}
