use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

use crate::command::Command;

pub mod tracker;

pub use tracker::{InputTracker, TrackerAction, TrackerState};

/// Pointer events the canvas reacts to, positions in client (screen) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button or touch went down over the surface
    PointerDown { position: Pos2 },
    /// Pointer moved while over the surface
    PointerMove { position: Pos2 },
    /// Primary button or touch was released
    PointerUp,
    /// Pointer left the surface
    PointerLeave,
}

impl InputEvent {
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { position } | InputEvent::PointerMove { position } => {
                Some(*position)
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => None,
        }
    }
}

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// A press started inside the canvas and has not been released yet
    drag_active: bool,
    /// The pointer left the canvas during the current drag
    left_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input for the canvas rect and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        ctx.input(|input| {
            let pointer = &input.pointer;
            self.translate(
                pointer.latest_pos(),
                pointer.primary_pressed(),
                pointer.primary_down(),
                pointer.primary_released(),
                canvas_rect,
            )
        })
    }

    /// Turn one frame's pointer state into events
    pub fn translate(
        &mut self,
        pos: Option<Pos2>,
        pressed: bool,
        down: bool,
        released: bool,
        canvas_rect: Rect,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let inside = pos.is_some_and(|p| canvas_rect.contains(p));

        if pressed && inside {
            if let Some(position) = pos {
                events.push(InputEvent::PointerDown { position });
                self.drag_active = true;
                self.left_canvas = false;
            }
        } else if self.drag_active && down && pos != self.last_pointer_pos {
            match pos {
                Some(position) if inside && !self.left_canvas => {
                    events.push(InputEvent::PointerMove { position });
                }
                _ if !self.left_canvas => {
                    events.push(InputEvent::PointerLeave);
                    self.left_canvas = true;
                }
                _ => {}
            }
        }

        if released && self.drag_active {
            events.push(InputEvent::PointerUp);
            self.drag_active = false;
            self.left_canvas = false;
        }

        self.last_pointer_pos = pos;
        events
    }

    /// Consume undo/redo shortcuts pressed this frame
    pub fn shortcut_commands(&self, ctx: &Context) -> Vec<Command> {
        ctx.input_mut(|input| {
            let mut commands = Vec::new();
            // redo first: the undo pattern also matches with shift held
            if input.consume_shortcut(&REDO) || input.consume_shortcut(&REDO_ALT) {
                commands.push(Command::Redo);
            }
            if input.consume_shortcut(&UNDO) {
                commands.push(Command::Undo);
            }
            commands
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn canvas() -> Rect {
        Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 250.0))
    }

    #[test]
    fn test_press_move_release() {
        let mut handler = InputHandler::new();
        let rect = canvas();

        let down = handler.translate(Some(pos2(110.0, 60.0)), true, true, false, rect);
        assert_eq!(down, vec![InputEvent::PointerDown { position: pos2(110.0, 60.0) }]);

        let moved = handler.translate(Some(pos2(120.0, 70.0)), false, true, false, rect);
        assert_eq!(moved, vec![InputEvent::PointerMove { position: pos2(120.0, 70.0) }]);

        let up = handler.translate(Some(pos2(120.0, 70.0)), false, false, true, rect);
        assert_eq!(up, vec![InputEvent::PointerUp]);
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut handler = InputHandler::new();
        let rect = canvas();

        assert!(handler.translate(Some(pos2(5.0, 5.0)), true, true, false, rect).is_empty());
        assert!(handler.translate(Some(pos2(150.0, 60.0)), false, true, false, rect).is_empty());
        assert!(handler.translate(Some(pos2(150.0, 60.0)), false, false, true, rect).is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut handler = InputHandler::new();
        let rect = canvas();

        handler.translate(Some(pos2(110.0, 60.0)), true, true, false, rect);
        let left = handler.translate(Some(pos2(400.0, 60.0)), false, true, false, rect);
        assert_eq!(left, vec![InputEvent::PointerLeave]);

        let back = handler.translate(Some(pos2(150.0, 60.0)), false, true, false, rect);
        assert!(back.is_empty());
    }

    #[test]
    fn test_stationary_pointer_does_not_move() {
        let mut handler = InputHandler::new();
        let rect = canvas();

        handler.translate(Some(pos2(110.0, 60.0)), true, true, false, rect);
        let idle = handler.translate(Some(pos2(110.0, 60.0)), false, true, false, rect);
        assert!(idle.is_empty());
    }
}
