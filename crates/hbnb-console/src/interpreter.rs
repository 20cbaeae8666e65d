use std::io::{self, BufRead, Write};

use colored::Colorize;
use hbnb_store::Storage;
use tracing::debug;

use crate::commands;
use crate::parse::{self, Verb};

/// Default prompt text.
pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Whether the session continues after a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented command interpreter over a [`Storage`].
///
/// Output and diagnostics both go to `out`. Only I/O errors on `out` or on
/// the input end a session early; command failures are printed and the
/// session continues.
pub struct Interpreter<W: Write> {
    storage: Storage,
    out: W,
    prompt: String,
    show_prompt: bool,
    color: bool,
}

impl<W: Write> Interpreter<W> {
    /// An interpreter that prints no prompt and no color.
    pub fn new(storage: Storage, out: W) -> Self {
        Self {
            storage,
            out,
            prompt: DEFAULT_PROMPT.to_string(),
            show_prompt: false,
            color: false,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>, show: bool) -> Self {
        self.prompt = prompt.into();
        self.show_prompt = show;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute one line.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let invocation = match parse::parse_line(line) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return Ok(Flow::Continue),
            Err(diagnostic) => {
                self.print_diagnostic(&diagnostic.to_string())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(verb = %invocation.verb, args = %invocation.args, "executing");

        match invocation.verb {
            Verb::Quit => return Ok(Flow::Quit),
            Verb::Eof => {
                if self.show_prompt {
                    writeln!(self.out)?;
                }
                return Ok(Flow::Quit);
            }
            _ => {}
        }
        match commands::run_command(&mut self.storage, invocation.verb, &invocation.args) {
            Ok(Some(text)) => writeln!(self.out, "{text}")?,
            Ok(None) => {}
            Err(diagnostic) => self.print_diagnostic(&diagnostic.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Read and execute lines until `quit`, `EOF` or end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so such a
    /// line is reported like any other bad input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            if self.show_prompt {
                write!(self.out, "{}", self.prompt)?;
                self.out.flush()?;
            }
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                if self.show_prompt {
                    writeln!(self.out)?;
                }
                debug!("end of input");
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if self.execute(line.trim_end_matches(['\n', '\r']))? == Flow::Quit {
                break;
            }
            self.out.flush()?;
        }
        self.out.flush()
    }

    fn print_diagnostic(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", message.red())
        } else {
            writeln!(self.out, "{message}")
        }
    }
}
