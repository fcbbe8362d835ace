use itertools::Itertools as _;

use super::DragController;
use super::server::ServerSession;

impl<S: ServerSession> DragController<S> {
    /// Records one line, both to the `log` facade and (if enabled) to the in-memory ring buffer.
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message);
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[event {}] {}", self.debug_event, message));
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// The ring buffer as one string, one event per line, ready to copy-paste.
    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().join("\n")
    }
}
