//! Line-based interactive prompts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use swiftly_core::{Error, Result};

/// Capability to ask the user a question and read a single line back.
pub trait Prompt {
    /// Show `message` and read one line of input.
    ///
    /// Returns `None` when input is exhausted.
    fn ask(&mut self, message: &str) -> Result<Option<String>>;
}

/// Prompt that reads answers from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for StdinPrompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        eprint!("{}", message);
        io::stderr().flush().map_err(|e| Error::Io {
            message: "failed to flush stderr".to_string(),
            path: None,
            source: e,
        })?;

        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| Error::Io {
                message: "failed to read input".to_string(),
                path: None,
                source: e,
            })?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Prompt that answers from a fixed script.
///
/// Used for `--assume-yes` and in tests. Every message asked is recorded.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    repeat: Option<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Answer with each of `answers` in turn, then report end of input.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            repeat: None,
            asked: Vec::new(),
        }
    }

    /// Answer every question with `answer`.
    pub fn always(answer: impl Into<String>) -> Self {
        Self {
            answers: VecDeque::new(),
            repeat: Some(answer.into()),
            asked: Vec::new(),
        }
    }

    /// Messages that were asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop_front().or_else(|| self.repeat.clone()))
    }
}

/// Ask a yes/no question. Only `y` proceeds; anything else, including empty
/// input or end of input, declines.
pub fn confirm(prompt: &mut dyn Prompt, message: &str) -> Result<bool> {
    let answer = prompt.ask(&format!("{} (y/N): ", message))?;
    Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
}
