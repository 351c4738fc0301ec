use std::collections::VecDeque;

/// Messages shown one at a time in a modal until the user dismisses them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertQueue {
    pending: VecDeque<String>,
}

impl AlertQueue {
    pub fn push(&mut self, message: impl Into<String>) {
        self.pending.push_back(message.into());
    }

    /// Oldest undismissed alert.
    pub fn current(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
