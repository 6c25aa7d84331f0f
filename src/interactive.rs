//! Console interaction: confirmation prompts and pause detection.
//!
//! Standard input is read line by line on a background thread so the
//! cleanup loop can poll for a pending keypress without blocking. Pauses are
//! only polled when standard input is a terminal; piped input is kept for
//! prompts.

use crate::error::{Result, SweepError};
use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Two-way channel to the person running the cleanup.
pub trait InteractiveChannel {
    /// Show `message` without a trailing newline.
    fn prompt(&mut self, message: &str) -> Result<()>;

    /// Whether input is waiting to be read. Never blocks.
    fn response_pending(&mut self) -> bool;

    /// Block until a line is available and return it without its terminator.
    /// End of input reads as an empty line.
    fn read_line(&mut self) -> Result<String>;
}

/// [`InteractiveChannel`] over the process console.
#[derive(Default)]
pub struct ConsoleChannel {
    lines: Option<Receiver<io::Result<String>>>,
    buffered: VecDeque<io::Result<String>>,
    poll_pauses: bool,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self {
            poll_pauses: io::stdin().is_terminal(),
            ..Self::default()
        }
    }

    fn receiver(&mut self) -> &Receiver<io::Result<String>> {
        self.lines.get_or_insert_with(|| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for line in io::stdin().lock().lines() {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            });
            rx
        })
    }
}

impl InteractiveChannel for ConsoleChannel {
    fn prompt(&mut self, message: &str) -> Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", message.yellow())
            .and_then(|_| stdout.flush())
            .map_err(|e| SweepError::Interactive(e.to_string()))
    }

    fn response_pending(&mut self) -> bool {
        if !self.poll_pauses {
            return false;
        }
        if !self.buffered.is_empty() {
            return true;
        }
        let next = self.receiver().try_recv();
        match next {
            Ok(line) => {
                self.buffered.push_back(line);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let next = match self.buffered.pop_front() {
            Some(line) => Ok(line),
            None => self.receiver().recv(),
        };
        match next {
            Ok(line) => line.map_err(|e| SweepError::Interactive(e.to_string())),
            // Reader thread finished: stdin is closed.
            Err(_) => Ok(String::new()),
        }
    }
}

/// Whether `answer` confirms a yes/no prompt.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Whether `answer` asks to stop processing.
pub fn is_quit(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("q")
}
