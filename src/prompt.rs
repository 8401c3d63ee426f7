//! Console prompts
//!
//! Every text prompt honours the quit keystroke: a line equal to `q` or
//! `Q` ends the session with `OrderdeskError::Quit`, no matter how deep
//! in a validation loop the prompt sits. A closed stdin ends it the same
//! way.

use crate::error::{OrderdeskError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Line-oriented prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Read passwords with echo disabled
    hide_passwords: bool,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin/stdout
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let hide_passwords = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            hide_passwords,
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt over arbitrary streams; passwords are read as plain lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_passwords: false,
        }
    }

    /// Consume the prompter, returning the writer (tests read it back)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn ask(&mut self, msg: &str) -> Result<()> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<String> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(OrderdeskError::Quit);
        }
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(buf)
    }

    /// Read one line of text
    pub fn line(&mut self, msg: &str) -> Result<String> {
        self.ask(msg)?;
        let text = self.read_raw()?;
        if is_quit(&text) {
            return Err(OrderdeskError::Quit);
        }
        Ok(text)
    }

    /// Read a password. Not subject to the quit keystroke.
    pub fn password(&mut self, msg: &str) -> Result<String> {
        self.ask(msg)?;
        if self.hide_passwords {
            let secret = read_hidden_line()?;
            writeln!(self.output)?;
            Ok(secret)
        } else {
            self.read_raw()
        }
    }

    /// Read a number, re-prompting until it parses and falls in `range`
    pub fn number<T>(&mut self, msg: &str, range: RangeInclusive<T>) -> Result<T>
    where
        T: FromStr + PartialOrd + Display,
    {
        let mut text = self.line(msg)?;
        loop {
            if let Ok(value) = text.trim().parse::<T>() {
                if range.contains(&value) {
                    return Ok(value);
                }
            }
            text = self.line(&format!(
                "Invalid input. Please enter a number between {} and {}: ",
                range.start(),
                range.end()
            ))?;
        }
    }

    /// Read a line, re-prompting with `complaint` until `check` accepts it
    pub fn validated(
        &mut self,
        msg: &str,
        check: impl Fn(&str) -> bool,
        complaint: &str,
    ) -> Result<String> {
        let mut text = self.line(msg)?;
        while !check(&text) {
            self.say(complaint)?;
            text = self.line(msg)?;
        }
        Ok(text)
    }
}

fn is_quit(text: &str) -> bool {
    text.eq_ignore_ascii_case("q")
}

/// Read a line from the terminal without echoing it
fn read_hidden_line() -> io::Result<String> {
    terminal::enable_raw_mode()?;
    let result = collect_hidden_keys();
    terminal::disable_raw_mode()?;
    result
}

fn collect_hidden_keys() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}
