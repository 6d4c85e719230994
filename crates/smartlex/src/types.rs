use std::time::Instant;

use protocol::Toast;

/// Which Home input currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Term,
    Context,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Term => Focus::Context,
            Focus::Context => Focus::Term,
        }
    }
}

/// A toast plus the moment it appeared; expired ones are dropped on poll.
pub struct ActiveToast {
    pub toast: Toast,
    pub shown_at: Instant,
}

impl ActiveToast {
    pub fn new(toast: Toast) -> Self {
        Self {
            toast,
            shown_at: Instant::now(),
        }
    }
}
