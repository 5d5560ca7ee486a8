use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Pages the client can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    Dashboard,
}

impl Destination {
    /// Relative location of the page
    pub fn path(self) -> &'static str {
        match self {
            Destination::Login => "login.html",
            Destination::Dashboard => "dashboard.html",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Capability to move the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Navigator that only records where it was asked to go.
///
/// Front ends without real pages inspect the record after each action.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All destinations in the order they were requested
    pub fn visits(&self) -> Vec<Destination> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Destination> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Drain the record, returning what was in it
    pub fn take(&self) -> Vec<Destination> {
        std::mem::take(&mut *self.visits.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(destination);
    }
}
