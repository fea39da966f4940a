use std::time::Duration;

use vivevents_device::{ControllerSample, DeviceProvider, Hand};
use vivevents_profile::{Profile, Thresholds};

use super::classifier::{EdgeClassifier, Events, HandState};
use super::dispatcher::{DispatchReport, EventDispatcher, ListenerId, ListenerResult};
use super::event::{ControllerEvent, EventKind};

/// Owns the classifier and the dispatcher and runs both once per tick.
///
/// The host constructs one manager and hands out `&mut` access to whatever
/// needs to register listeners.
pub struct EventManager {
    classifier: EdgeClassifier,
    dispatcher: EventDispatcher,
    events: Events,
}

impl EventManager {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            classifier: EdgeClassifier::new(thresholds),
            dispatcher: EventDispatcher::new(),
            events: Events::new(),
        }
    }

    pub fn from_profile(profile: &Profile) -> Self {
        let mut manager = Self::new(profile.thresholds);
        manager.set_trace(profile.trace);
        manager
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.classifier.thresholds()
    }

    pub fn hand_state(&self, hand: Hand) -> &HandState {
        self.classifier.hand_state(hand)
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.dispatcher.set_trace(trace);
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&ControllerEvent) -> ListenerResult + 'static,
    {
        self.dispatcher.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.dispatcher.listener_count(kind)
    }

    /// Events raised by the most recent tick, in dispatch order.
    pub fn last_events(&self) -> &[ControllerEvent] {
        &self.events
    }

    /// Classify one tick and dispatch the resulting events.
    pub fn tick(
        &mut self,
        dt: Duration,
        left: Option<&ControllerSample>,
        right: Option<&ControllerSample>,
    ) -> DispatchReport {
        self.events.clear();
        self.classifier.tick_into(dt, left, right, &mut self.events);
        self.dispatcher.dispatch_all(self.events.iter())
    }

    /// Sample both hands from `provider` and tick. Returns `None` once the
    /// provider has no more input.
    pub fn poll<P>(&mut self, provider: &mut P, dt: Duration) -> Option<DispatchReport>
    where
        P: DeviceProvider + ?Sized,
    {
        if !provider.advance() {
            return None;
        }
        let left = provider.sample(Hand::Left);
        let right = provider.sample(Hand::Right);
        Some(self.tick(dt, left.as_ref(), right.as_ref()))
    }
}
