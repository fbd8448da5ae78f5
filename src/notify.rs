use crate::{core::request::Notifier, prelude::*};

/// Prints failure notifications to the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_error(&self, message: &str) {
        warn!("{message}");
        eprintln!("✗ {message}");
    }
}
