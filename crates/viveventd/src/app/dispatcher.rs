use std::ops::AddAssign;

use ahash::AHashMap;
use colored::Colorize;
use thiserror::Error;

use crate::{print_error, print_info};
use super::event::{ControllerEvent, EventKind};

/// Error a listener can hand back to the dispatcher.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ListenerResult = Result<(), ListenerError>;

/// Callback invoked for every event of the kind it was registered for.
pub type Listener = Box<dyn FnMut(&ControllerEvent) -> ListenerResult>;

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Outcome of dispatching one or more events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Events fired, including ones nobody listens to.
    pub fired: usize,
    /// Listener calls that returned `Ok`.
    pub delivered: usize,
    /// Listener calls that returned `Err`.
    pub failed: usize,
}

impl AddAssign for DispatchReport {
    fn add_assign(&mut self, rhs: Self) {
        self.fired += rhs.fired;
        self.delivered += rhs.delivered;
        self.failed += rhs.failed;
    }
}

struct Subscription {
    id: ListenerId,
    listener: Listener,
}

/// Fans events out to the listeners registered for their kind.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: AHashMap<EventKind, Vec<Subscription>>,
    next_id: u64,
    trace: bool,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log every fired event, whether or not someone listens to it.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&ControllerEvent) -> ListenerResult + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push(Subscription {
            id,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for subs in self.listeners.values_mut() {
            if let Some(pos) = subs.iter().position(|s| s.id == id) {
                // `remove` keeps registration order for the rest.
                subs.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Invoke every listener of the event's kind in registration order.
    pub fn dispatch(&mut self, event: &ControllerEvent) -> DispatchReport {
        let mut report = DispatchReport {
            fired: 1,
            ..DispatchReport::default()
        };
        if self.trace {
            print_info!("{event}");
        }

        let Some(subs) = self.listeners.get_mut(&event.kind) else {
            return report;
        };
        for sub in subs.iter_mut() {
            match (sub.listener)(event) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    print_error!("listener {:?} failed on {event}: {e}", sub.id);
                }
            }
        }
        report
    }

    pub fn dispatch_all<'a, I>(&mut self, events: I) -> DispatchReport
    where
        I: IntoIterator<Item = &'a ControllerEvent>,
    {
        let mut report = DispatchReport::default();
        for event in events {
            report += self.dispatch(event);
        }
        report
    }
}
