use std::time::Duration;

use smallvec::SmallVec;
use vivevents_device::{Control, ControllerSample, Hand, Vec2};
use vivevents_profile::Thresholds;

use super::event::{ControllerEvent, EventKind, SwipeDirection};

/// Events raised during one tick. Typical ticks raise a handful.
pub type Events = SmallVec<[ControllerEvent; 8]>;

/// Per-hand memory of the classifier between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandState {
    pub trigger_started: bool,
    pub trigger_clicked: bool,
    pub grip_pressed_at: Option<Duration>,
    pub touch_started_at: Option<Duration>,
    pub touch_start_point: Vec2,
    pub touchpad_pressed_at: Option<Duration>,
}

/// Turns per-tick controller samples into discrete events.
#[derive(Debug, Clone)]
pub struct EdgeClassifier {
    thresholds: Thresholds,
    clock: Duration,
    hands: [HandState; 2],
}

impl EdgeClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            clock: Duration::ZERO,
            hands: [HandState::default(); 2],
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Time accumulated from every tick's `dt`.
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn hand_state(&self, hand: Hand) -> &HandState {
        &self.hands[hand.index()]
    }

    /// Advance the clock by `dt` and classify both hands, left first.
    ///
    /// The position of a sample decides which hand it drives. A `None`
    /// sample means the hand is not connected and is skipped.
    pub fn tick(
        &mut self,
        dt: Duration,
        left: Option<&ControllerSample>,
        right: Option<&ControllerSample>,
    ) -> Events {
        let mut out = Events::new();
        self.tick_into(dt, left, right, &mut out);
        out
    }

    /// Same as [`EdgeClassifier::tick`], appending to a caller-owned buffer.
    pub fn tick_into(
        &mut self,
        dt: Duration,
        left: Option<&ControllerSample>,
        right: Option<&ControllerSample>,
        out: &mut Events,
    ) {
        self.clock = self.clock.saturating_add(dt);
        for (hand, sample) in Hand::ALL.into_iter().zip([left, right]) {
            if let Some(sample) = sample {
                self.classify(hand, sample, out);
            }
        }
    }

    fn classify(&mut self, hand: Hand, sample: &ControllerSample, out: &mut Events) {
        let now = self.clock;
        let thresholds = self.thresholds;
        let state = &mut self.hands[hand.index()];

        let base = ControllerEvent {
            kind: EventKind::TriggerPress,
            hand,
            device: sample.device,
            pose: sample.pose,
            pressure: sample.trigger,
            trigger_clicked: state.trigger_clicked,
            touch_point: sample.touchpad,
            swipe: None,
        };
        let mut emit = |kind: EventKind| out.push(ControllerEvent { kind, ..base });

        let touch = &sample.touch;
        let press = &sample.press;

        // Trigger
        if touch.is_down(Control::Trigger) {
            emit(EventKind::TriggerPressStart);
            state.trigger_started = true;
            state.trigger_clicked = false;
        }
        if touch.is_held(Control::Trigger) {
            if !state.trigger_started {
                // The down edge was missed, e.g. the hand just reconnected.
                emit(EventKind::TriggerPressStart);
                state.trigger_started = true;
            } else if !state.trigger_clicked && sample.trigger >= 1.0 {
                emit(EventKind::TriggerClick);
                state.trigger_clicked = true;
            } else {
                emit(EventKind::TriggerPress);
                if sample.trigger < 1.0 {
                    state.trigger_clicked = false;
                }
            }
        }
        if touch.is_up(Control::Trigger) {
            emit(EventKind::TriggerPressEnd);
            state.trigger_started = false;
            state.trigger_clicked = false;
        }

        // Grip
        if press.is_down(Control::Grip) {
            state.grip_pressed_at = Some(now);
            emit(EventKind::GripPressStart);
        }
        if press.is_held(Control::Grip) {
            emit(EventKind::GripPress);
        }
        if press.is_up(Control::Grip) {
            emit(EventKind::GripPressEnd);
            if is_quick(state.grip_pressed_at.take(), now, thresholds.click_time) {
                emit(EventKind::GripClick);
            }
        }

        // Touchpad touch
        if touch.is_down(Control::Touchpad) {
            state.touch_started_at = Some(now);
            state.touch_start_point = sample.touchpad;
            emit(EventKind::TouchStart);
        }
        if touch.is_held(Control::Touchpad) {
            emit(EventKind::TouchMove);
        }
        if touch.is_up(Control::Touchpad) {
            emit(EventKind::TouchEnd);
            if let Some(started_at) = state.touch_started_at.take() {
                let elapsed = now.saturating_sub(started_at);
                let swipe = if elapsed < thresholds.swipe_time {
                    SwipeDirection::from_delta(
                        sample.touchpad - state.touch_start_point,
                        thresholds.swipe_distance,
                    )
                } else {
                    None
                };
                // A swipe suppresses the tap for either hand.
                if let Some(direction) = swipe {
                    out.push(ControllerEvent {
                        kind: EventKind::TouchSwipe,
                        swipe: Some(direction),
                        ..base
                    });
                } else if elapsed < thresholds.click_time {
                    out.push(ControllerEvent {
                        kind: EventKind::TouchTap,
                        ..base
                    });
                }
            }
        }

        let mut emit = |kind: EventKind| out.push(ControllerEvent { kind, ..base });

        // Touchpad press
        if press.is_down(Control::Touchpad) {
            state.touchpad_pressed_at = Some(now);
            emit(EventKind::TouchpadPressStart);
        }
        if press.is_held(Control::Touchpad) {
            emit(EventKind::TouchpadPress);
        }
        if press.is_up(Control::Touchpad) {
            emit(EventKind::TouchpadPressEnd);
            if is_quick(state.touchpad_pressed_at.take(), now, thresholds.click_time) {
                emit(EventKind::TouchpadClick);
            }
        }
    }
}

#[inline]
fn is_quick(started_at: Option<Duration>, now: Duration, window: Duration) -> bool {
    started_at.is_some_and(|start| now.saturating_sub(start) < window)
}

#[cfg(test)]
mod tests {
    use vivevents_device::{ButtonEdges, ControlMask};

    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    /// Drives one hand through level changes like a polling provider would.
    struct Poller {
        hand: Hand,
        touched: ControlMask,
        pressed: ControlMask,
    }

    impl Poller {
        fn new(hand: Hand) -> Self {
            Self {
                hand,
                touched: ControlMask::empty(),
                pressed: ControlMask::empty(),
            }
        }

        fn sample(
            &mut self,
            touched: &[Control],
            pressed: &[Control],
            trigger: f32,
            touchpad: Vec2,
        ) -> ControllerSample {
            let touched = ControlMask::new(touched);
            let pressed = ControlMask::new(pressed);
            let sample = ControllerSample::new(self.hand, 7)
                .with_trigger(trigger)
                .with_touchpad(touchpad)
                .with_touch(ButtonEdges::from_levels(self.touched, touched))
                .with_press(ButtonEdges::from_levels(self.pressed, pressed));
            self.touched = touched;
            self.pressed = pressed;
            sample
        }

        fn trigger(&mut self, pressure: f32) -> ControllerSample {
            let touched: &[Control] = if pressure > 0.0 { &[Control::Trigger] } else { &[] };
            self.sample(touched, &[], pressure, Vec2::ZERO)
        }
    }

    fn kinds(events: &Events) -> Vec<EventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    fn left_tick(c: &mut EdgeClassifier, dt: Duration, s: &ControllerSample) -> Events {
        c.tick(dt, Some(s), None)
    }

    #[test]
    fn trigger_clicks_once_per_full_pull() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);

        let mut clicks = 0;
        for pressure in [0.3, 1.0, 1.0, 1.0, 0.8, 1.0, 1.0, 0.0] {
            let sample = hand.trigger(pressure);
            let events = left_tick(&mut c, TICK, &sample);
            clicks += events
                .iter()
                .filter(|e| e.kind == EventKind::TriggerClick)
                .count();
        }
        assert_eq!(clicks, 2);
    }

    #[test]
    fn trigger_lifecycle() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);

        let s = hand.trigger(0.4);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![EventKind::TriggerPressStart, EventKind::TriggerPress]
        );
        let s = hand.trigger(1.0);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TriggerClick]);
        assert!(c.hand_state(Hand::Left).trigger_clicked);

        let s = hand.trigger(1.0);
        let events = left_tick(&mut c, TICK, &s);
        assert_eq!(kinds(&events), vec![EventKind::TriggerPress]);
        assert!(events[0].trigger_clicked);

        let s = hand.trigger(0.0);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TriggerPressEnd]);
        assert_eq!(*c.hand_state(Hand::Left), HandState::default());
    }

    #[test]
    fn fresh_press_after_reconnect_clicks_again() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);
        let s = hand.trigger(0.5);
        left_tick(&mut c, TICK, &s);
        let s = hand.trigger(1.0);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TriggerClick]);

        // Trigger released while the hand was away.
        assert!(c.tick(TICK, None, None).is_empty());
        let mut hand = Poller::new(Hand::Left);

        let s = hand.trigger(1.0);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![EventKind::TriggerPressStart, EventKind::TriggerClick]
        );
        let s = hand.trigger(1.0);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TriggerPress]);
    }

    #[test]
    fn missed_down_edge_still_starts_press() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let held = ButtonEdges {
            held: ControlMask::new(&[Control::Trigger]),
            ..ButtonEdges::idle()
        };
        let s = ControllerSample::new(Hand::Left, 1)
            .with_trigger(1.0)
            .with_touch(held);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![EventKind::TriggerPressStart]
        );
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TriggerClick]);
    }

    fn grip_for(held_for: Duration) -> Vec<EventKind> {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Right);
        let down = hand.sample(&[], &[Control::Grip], 0.0, Vec2::ZERO);
        c.tick(TICK, None, Some(&down));
        let up = hand.sample(&[], &[], 0.0, Vec2::ZERO);
        kinds(&c.tick(held_for, None, Some(&up)))
    }

    #[test]
    fn quick_grip_release_clicks() {
        assert_eq!(
            grip_for(Duration::from_millis(100)),
            vec![EventKind::GripPressEnd, EventKind::GripClick]
        );
    }

    #[test]
    fn slow_grip_release_does_not_click() {
        assert_eq!(grip_for(Duration::from_millis(500)), vec![EventKind::GripPressEnd]);
        assert_eq!(grip_for(Duration::from_millis(300)), vec![EventKind::GripPressEnd]);
    }

    #[test]
    fn grip_emits_press_every_held_tick() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);
        let s = hand.sample(&[], &[Control::Grip], 0.0, Vec2::ZERO);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![EventKind::GripPressStart, EventKind::GripPress]
        );
        let s = hand.sample(&[], &[Control::Grip], 0.0, Vec2::ZERO);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::GripPress]);
    }

    fn touch_gesture(hand: Hand, from: Vec2, to: Vec2, duration: Duration) -> Events {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut h = Poller::new(hand);
        let tick = |c: &mut EdgeClassifier, dt, s: &ControllerSample| match hand {
            Hand::Left => c.tick(dt, Some(s), None),
            Hand::Right => c.tick(dt, None, Some(s)),
        };
        let down = h.sample(&[Control::Touchpad], &[], 0.0, from);
        tick(&mut c, TICK, &down);
        let up = h.sample(&[], &[], 0.0, to);
        tick(&mut c, duration, &up)
    }

    #[test]
    fn short_still_touch_is_tap() {
        let events = touch_gesture(
            Hand::Left,
            Vec2::new(0.1, 0.1),
            Vec2::new(0.1, 0.1),
            Duration::from_millis(200),
        );
        assert_eq!(kinds(&events), vec![EventKind::TouchEnd, EventKind::TouchTap]);
    }

    #[test]
    fn fast_horizontal_move_is_swipe_not_tap_on_both_hands() {
        for hand in Hand::ALL {
            let events = touch_gesture(
                hand,
                Vec2::new(-0.3, 0.0),
                Vec2::new(0.3, 0.05),
                Duration::from_millis(200),
            );
            assert_eq!(kinds(&events), vec![EventKind::TouchEnd, EventKind::TouchSwipe]);
            assert_eq!(events[1].swipe, Some(SwipeDirection::PositiveX));
            assert_eq!(events[1].hand, hand);
        }

        let events = touch_gesture(
            Hand::Right,
            Vec2::new(0.3, 0.0),
            Vec2::new(-0.3, 0.0),
            Duration::from_millis(200),
        );
        assert_eq!(events[1].swipe, Some(SwipeDirection::NegativeX));
    }

    #[test]
    fn slow_move_is_neither_swipe_nor_tap() {
        let events = touch_gesture(
            Hand::Left,
            Vec2::new(0.0, -0.4),
            Vec2::new(0.0, 0.4),
            Duration::from_millis(600),
        );
        assert_eq!(kinds(&events), vec![EventKind::TouchEnd]);
    }

    #[test]
    fn vertical_swipe_between_tap_and_swipe_windows() {
        let events = touch_gesture(
            Hand::Left,
            Vec2::new(0.0, 0.4),
            Vec2::new(0.1, -0.4),
            Duration::from_millis(400),
        );
        assert_eq!(kinds(&events), vec![EventKind::TouchEnd, EventKind::TouchSwipe]);
        assert_eq!(events[1].swipe, Some(SwipeDirection::NegativeY));
    }

    #[test]
    fn touch_move_reports_current_point() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);
        let s = hand.sample(&[Control::Touchpad], &[], 0.0, Vec2::new(0.2, 0.0));
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![EventKind::TouchStart, EventKind::TouchMove]
        );
        let s = hand.sample(&[Control::Touchpad], &[], 0.0, Vec2::new(0.4, 0.1));
        let events = left_tick(&mut c, TICK, &s);
        assert_eq!(events[0].touch_point, Vec2::new(0.4, 0.1));
        assert_eq!(c.hand_state(Hand::Left).touch_start_point, Vec2::new(0.2, 0.0));
    }

    #[test]
    fn touchpad_press_is_separate_from_touch() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);
        let s = hand.sample(&[Control::Touchpad], &[Control::Touchpad], 0.0, Vec2::ZERO);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![
                EventKind::TouchStart,
                EventKind::TouchMove,
                EventKind::TouchpadPressStart,
                EventKind::TouchpadPress,
            ]
        );
        let s = hand.sample(&[], &[], 0.0, Vec2::ZERO);
        assert_eq!(
            kinds(&left_tick(&mut c, TICK, &s)),
            vec![
                EventKind::TouchEnd,
                EventKind::TouchTap,
                EventKind::TouchpadPressEnd,
                EventKind::TouchpadClick,
            ]
        );
    }

    #[test]
    fn disconnected_hand_emits_nothing() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut hand = Poller::new(Hand::Left);
        let s = hand.sample(&[], &[Control::Grip], 0.0, Vec2::ZERO);
        left_tick(&mut c, TICK, &s);
        let before = *c.hand_state(Hand::Left);

        let events = c.tick(TICK, None, None);
        assert!(events.is_empty());
        assert_eq!(*c.hand_state(Hand::Left), before);
        assert_eq!(c.now(), TICK * 2);
    }

    #[test]
    fn left_events_precede_right() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let mut left = Poller::new(Hand::Left);
        let mut right = Poller::new(Hand::Right);
        let (l, r) = (left.trigger(0.5), right.trigger(0.5));
        c.tick(TICK, Some(&l), Some(&r));
        let (l, r) = (left.trigger(1.0), right.trigger(1.0));
        let events = c.tick(TICK, Some(&l), Some(&r));
        let order: Vec<(Hand, EventKind)> = events.iter().map(|e| (e.hand, e.kind)).collect();
        assert_eq!(
            order,
            vec![
                (Hand::Left, EventKind::TriggerClick),
                (Hand::Right, EventKind::TriggerClick),
            ]
        );
    }

    #[test]
    fn release_without_recorded_touch_only_ends() {
        let mut c = EdgeClassifier::new(Thresholds::default());
        let up = ButtonEdges {
            up: ControlMask::new(&[Control::Touchpad]),
            ..ButtonEdges::idle()
        };
        let s = ControllerSample::new(Hand::Left, 1).with_touch(up);
        assert_eq!(kinds(&left_tick(&mut c, TICK, &s)), vec![EventKind::TouchEnd]);
    }
}
