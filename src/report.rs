//! Report sink for user-facing diagnostics.
//!
//! Diagnostics are plain formatted text for the person at the terminal. They
//! are separate from the `tracing` event stream.

use std::sync::Mutex;

pub trait Reporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes each message to stdout, framed by blank lines.
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn report(&self, message: &str) {
        println!("\n{}\n", message);
    }
}

/// Keeps messages in memory.
#[derive(Default)]
pub struct BufferedReporter {
    messages: Mutex<Vec<String>>,
}

impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Reporter for BufferedReporter {
    fn report(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
