//! Pointer tracking as an explicit state machine.
//!
//! ```text
//!            press                 release / leave
//!   Idle ──────────────► Tracking ─────────────────► Idle
//!                         │    ▲
//!                         └────┘ move (append one point)
//! ```
//!
//! Moves while idle are dropped. A press while tracking discards the
//! points gathered so far and starts over from the new position.

use egui::Pos2;

use super::InputEvent;
use crate::stroke::StrokeStyle;

/// Where the tracker currently is
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrackerState {
    #[default]
    Idle,
    Tracking {
        points: Vec<Pos2>,
        style: StrokeStyle,
    },
}

/// Side effect requested by a transition, points in surface space
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerAction {
    /// Nothing to do
    Ignored,
    /// A new stroke began at `point`
    Started { point: Pos2, style: StrokeStyle },
    /// One segment was appended to the live stroke
    Extended { from: Pos2, to: Pos2, style: StrokeStyle },
    /// Tracking ended with these points; commit them
    Finished { points: Vec<Pos2>, style: StrokeStyle },
    /// Tracking ended without anything to commit
    Discarded,
}

/// Pure transition function
///
/// `origin` is the surface's top-left corner in client space and `style`
/// the brush at the time of the event; it is only read on a press.
pub fn transition(
    state: TrackerState,
    event: InputEvent,
    origin: Pos2,
    style: StrokeStyle,
) -> (TrackerState, TrackerAction) {
    let to_local = |p: Pos2| client_to_surface(p, origin);

    match (state, event) {
        (_, InputEvent::PointerDown { position }) => {
            let point = to_local(position);
            (
                TrackerState::Tracking {
                    points: vec![point],
                    style,
                },
                TrackerAction::Started { point, style },
            )
        }
        (TrackerState::Tracking { mut points, style }, InputEvent::PointerMove { position }) => {
            let to = to_local(position);
            let from = points.last().copied().unwrap_or(to);
            points.push(to);
            (
                TrackerState::Tracking { points, style },
                TrackerAction::Extended { from, to, style },
            )
        }
        (
            TrackerState::Tracking { points, style },
            InputEvent::PointerUp | InputEvent::PointerLeave,
        ) => {
            let action = if points.is_empty() {
                TrackerAction::Discarded
            } else {
                TrackerAction::Finished { points, style }
            };
            (TrackerState::Idle, action)
        }
        (TrackerState::Idle, _) => (TrackerState::Idle, TrackerAction::Ignored),
    }
}

/// Owns the tracker state between events
#[derive(Debug, Default)]
pub struct InputTracker {
    state: TrackerState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent, origin: Pos2, style: StrokeStyle) -> TrackerAction {
        let state = std::mem::take(&mut self.state);
        let (next, action) = transition(state, event, origin, style);
        if !matches!(action, TrackerAction::Ignored) {
            log::debug!("tracker: {:?} -> {}", event, next.name());
        }
        self.state = next;
        action
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackerState::Tracking { .. })
    }

    /// Points gathered so far for the live stroke
    pub fn live_points(&self) -> &[Pos2] {
        match &self.state {
            TrackerState::Tracking { points, .. } => points,
            TrackerState::Idle => &[],
        }
    }

    /// Drop any live stroke without committing it
    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
    }
}

impl TrackerState {
    pub fn name(&self) -> &'static str {
        match self {
            TrackerState::Idle => "Idle",
            TrackerState::Tracking { .. } => "Tracking",
        }
    }
}

/// Offset from client space into surface space
pub fn client_to_surface(position: Pos2, origin: Pos2) -> Pos2 {
    (position - origin).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeMode;
    use egui::{Color32, pos2};

    fn brush() -> StrokeStyle {
        StrokeStyle::new(Color32::BLACK, 5.0, StrokeMode::Draw)
    }

    #[test]
    fn test_press_seeds_local_point() {
        let mut tracker = InputTracker::new();
        let origin = pos2(100.0, 40.0);
        let action = tracker.handle(
            InputEvent::PointerDown { position: pos2(110.0, 50.0) },
            origin,
            brush(),
        );
        assert_eq!(action, TrackerAction::Started { point: pos2(10.0, 10.0), style: brush() });
        assert_eq!(tracker.live_points(), &[pos2(10.0, 10.0)]);
    }

    #[test]
    fn test_moves_while_idle_are_ignored() {
        let mut tracker = InputTracker::new();
        let action = tracker.handle(
            InputEvent::PointerMove { position: pos2(1.0, 1.0) },
            Pos2::ZERO,
            brush(),
        );
        assert_eq!(action, TrackerAction::Ignored);
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.handle(InputEvent::PointerUp, Pos2::ZERO, brush()), TrackerAction::Ignored);
    }

    #[test]
    fn test_each_move_appends_one_point() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::PointerDown { position: pos2(0.0, 0.0) }, Pos2::ZERO, brush());
        let action = tracker.handle(
            InputEvent::PointerMove { position: pos2(3.0, 4.0) },
            Pos2::ZERO,
            brush(),
        );
        assert_eq!(
            action,
            TrackerAction::Extended { from: pos2(0.0, 0.0), to: pos2(3.0, 4.0), style: brush() }
        );
        tracker.handle(InputEvent::PointerMove { position: pos2(3.0, 4.0) }, Pos2::ZERO, brush());
        assert_eq!(tracker.live_points().len(), 3);
    }

    #[test]
    fn test_release_and_leave_finish() {
        for end in [InputEvent::PointerUp, InputEvent::PointerLeave] {
            let mut tracker = InputTracker::new();
            tracker.handle(InputEvent::PointerDown { position: pos2(1.0, 1.0) }, Pos2::ZERO, brush());
            tracker.handle(InputEvent::PointerMove { position: pos2(2.0, 2.0) }, Pos2::ZERO, brush());
            let action = tracker.handle(end, Pos2::ZERO, brush());
            assert_eq!(
                action,
                TrackerAction::Finished {
                    points: vec![pos2(1.0, 1.0), pos2(2.0, 2.0)],
                    style: brush()
                }
            );
            assert!(!tracker.is_tracking());
            assert!(tracker.live_points().is_empty());
        }
    }

    #[test]
    fn test_style_is_captured_at_press() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::PointerDown { position: pos2(1.0, 1.0) }, Pos2::ZERO, brush());

        let eraser = StrokeStyle::new(Color32::WHITE, 12.0, StrokeMode::Erase);
        let action = tracker.handle(InputEvent::PointerUp, Pos2::ZERO, eraser);
        match action {
            TrackerAction::Finished { style, .. } => assert_eq!(style, brush()),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_second_press_restarts() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::PointerDown { position: pos2(1.0, 1.0) }, Pos2::ZERO, brush());
        tracker.handle(InputEvent::PointerMove { position: pos2(2.0, 2.0) }, Pos2::ZERO, brush());
        tracker.handle(InputEvent::PointerDown { position: pos2(9.0, 9.0) }, Pos2::ZERO, brush());
        assert_eq!(tracker.live_points(), &[pos2(9.0, 9.0)]);
    }
}
