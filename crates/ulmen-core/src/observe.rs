use crate::runtime::Phase;

/// Lifecycle notification emitted by a [`Runtime`](crate::Runtime).
///
/// `depth` is the nesting level of the update cycle that produced the event:
/// `1` for a message sent from outside, `2` for one sent by a view or effect
/// while the first cycle was still running, and so on. The init cycle run by
/// `start` counts as depth `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started,
    /// `update` returned; the new model is about to be installed.
    Updated { depth: usize },
    /// An effect is about to run.
    Effect { depth: usize },
    /// `view` returned.
    Rendered { depth: usize },
    /// A message arrived while the runtime was not running, or before the
    /// init model was installed.
    Dropped { phase: Phase },
    Stopped { done: bool },
}

/// Injectable hook for watching a runtime.
///
/// Observers are called synchronously from the runtime's call stack, so they
/// should be cheap. Closures taking `&LifecycleEvent` implement it.
pub trait Observer {
    fn on_event(&self, event: &LifecycleEvent);
}

impl<F> Observer for F
where
    F: Fn(&LifecycleEvent),
{
    fn on_event(&self, event: &LifecycleEvent) {
        self(event)
    }
}

/// Forwards lifecycle events to the `log` facade.
///
/// Start and stop go out at `debug`; per-message events at `trace`.
#[derive(Clone, Debug)]
pub struct LogObserver {
    name: String,
}

impl LogObserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new("ulmen")
    }
}

impl Observer for LogObserver {
    fn on_event(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::Started => log::debug!("[{}] started", self.name),
            LifecycleEvent::Stopped { done } => {
                log::debug!("[{}] stopped (done hook ran: {done})", self.name)
            }
            LifecycleEvent::Dropped { phase } => {
                log::trace!("[{}] message dropped while {phase}", self.name)
            }
            LifecycleEvent::Updated { depth } => log::trace!("[{}] update @{depth}", self.name),
            LifecycleEvent::Effect { depth } => log::trace!("[{}] effect @{depth}", self.name),
            LifecycleEvent::Rendered { depth } => log::trace!("[{}] view @{depth}", self.name),
        }
    }
}
