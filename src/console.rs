//! Interactive control surface
//!
//! Prompts the operator for root categories and the results file. The
//! crawl engine never reads input itself; the binary drives it through
//! this module, one root category at a time.

use std::io::{self, BufRead, Write};

/// Input that ends the category loop
pub const QUIT: &str = "q";

/// Line-oriented prompter over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console reading answers from `input` and writing prompts to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `message` and reads one trimmed line
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until a non-empty answer is given
    fn prompt_required(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            match self.prompt(message)? {
                Some(answer) if answer.is_empty() => continue,
                other => return Ok(other),
            }
        }
    }

    /// Asks for the first root category
    pub fn ask_root_category(&mut self) -> io::Result<Option<String>> {
        self.prompt_required("Enter a category to scrape: ")
    }

    /// Asks for the results file name
    pub fn ask_output_file(&mut self) -> io::Result<Option<String>> {
        self.prompt_required("Name of file to store scraped results: ")
    }

    /// Asks for another root category
    ///
    /// Returns `Ok(None)` when the operator enters `q` or input ends.
    pub fn ask_next_category(&mut self) -> io::Result<Option<String>> {
        match self.prompt_required("Enter another category to scrape, q to quit: ")? {
            Some(answer) if answer == QUIT => Ok(None),
            other => Ok(other),
        }
    }
}
