//! Line-based prompts that keep asking until the answer is usable.

use std::io::{BufRead, Write};

use crate::error::ConsoleError;

/// Reads answers from `input` and writes prompts and guidance to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a full line.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `prompt` and return the next line, trimmed.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Keep the transcript tidy when input ends mid-prompt.
            writeln!(self.output)?;
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_text(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("This field cannot be empty.")?;
        }
    }

    pub fn ask_non_negative_int(&mut self, prompt: &str) -> Result<i64, ConsoleError> {
        loop {
            match self.ask(prompt)?.parse::<i64>() {
                Ok(v) if v >= 0 => return Ok(v),
                Ok(_) => self.say("Must be an integer >= 0.")?,
                Err(_) => self.say("Enter a valid integer.")?,
            }
        }
    }

    pub fn ask_non_negative_number(&mut self, prompt: &str) -> Result<f64, ConsoleError> {
        loop {
            match self.ask(prompt)?.parse::<f64>() {
                Ok(v) if !v.is_finite() => self.say("Enter a valid number (e.g. 10.5).")?,
                Ok(v) if v >= 0.0 => return Ok(v),
                Ok(_) => self.say("Must be a number >= 0.")?,
                Err(_) => self.say("Enter a valid number (e.g. 10.5).")?,
            }
        }
    }
}
