//! One-time wiring of logout controls once the page is ready.
//!
//! The page hands its controls in explicitly; nothing here queries a
//! document.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::auth::Session;

/// Identifier shared by every logout control
pub const LOGOUT_CONTROL_ID: &str = "logout-btn";

/// A click delivered to a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the control's built-in action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type ClickHandler = Box<dyn Fn(&mut ClickEvent) + Send + Sync>;

/// A clickable element on the page.
pub trait Control {
    fn id(&self) -> &str;
    fn on_click(&mut self, handler: ClickHandler);
}

/// Minimal control that runs its handlers in registration order.
pub struct Button {
    id: String,
    handlers: Vec<ClickHandler>,
}

impl Button {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handlers: Vec::new(),
        }
    }

    /// Dispatch a click and return the event after all handlers ran
    pub fn click(&self) -> ClickEvent {
        let mut event = ClickEvent::new();
        for handler in &self.handlers {
            handler(&mut event);
        }
        event
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Control for Button {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_click(&mut self, handler: ClickHandler) {
        self.handlers.push(handler);
    }
}

/// Pick out the controls that follow the logout identifier convention
pub fn logout_controls<'a, C, I>(controls: I) -> Vec<&'a mut C>
where
    C: Control + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    controls
        .into_iter()
        .filter(|c| c.id() == LOGOUT_CONTROL_ID)
        .collect()
}

/// Make every given control log the session out when clicked.
/// Returns how many controls were wired.
pub fn wire_logout_controls<'a, C, I>(session: &Session, controls: I) -> usize
where
    C: Control + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    let mut wired = 0;
    for control in controls {
        let session = session.clone();
        control.on_click(Box::new(move |event: &mut ClickEvent| {
            event.prevent_default();
            session.logout();
        }));
        wired += 1;
    }
    wired
}

/// Page-ready hook that runs at most once.
#[derive(Debug, Default)]
pub struct Bootstrap {
    done: AtomicBool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the logout controls among `controls`.
    /// Returns `None` if the hook already ran.
    pub fn run<'a, C, I>(&self, session: &Session, controls: I) -> Option<usize>
    where
        C: Control + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut C>,
    {
        if self.done.swap(true, Ordering::SeqCst) {
            return None;
        }
        let wired = wire_logout_controls(session, logout_controls(controls));
        debug!(wired, "Logout controls wired");
        Some(wired)
    }

    pub fn has_run(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}
