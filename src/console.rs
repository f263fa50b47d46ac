//! Line console standing in for the light form's text inputs.
//!
//! A background thread reads lines and forwards them over a channel; the UI
//! thread drains the channel once per frame, so only it ever touches the scene.

use std::io::{self, BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

pub struct FormConsole {
    lines: Receiver<String>,
    closed: bool,
}

impl FormConsole {
    /// Reads form lines from stdin.
    pub fn spawn() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            closed: false,
        }
    }

    /// Every line received since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            match self.lines.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        log::info!("Form console input closed; the light form no longer accepts input");
                    }
                    self.closed = true;
                    break;
                }
            }
        }
        lines
    }

    /// True once the reader hit end of input and every line was drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
