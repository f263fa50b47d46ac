//! Keyboard panning and mouse-drag orbiting of the camera.

use glam::{Vec2, Vec3};
use minifb::{KeyRepeat, MouseButton, MouseMode, Window};

use crate::core::Camera;

/// Distance one key press moves the camera.
pub const MOVE_STEP: f32 = 0.1;
/// Radians of rotation per pixel of drag.
pub const MOUSE_SENSITIVITY: f32 = 0.005;

/// Input as the controller understands it, independent of the window backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(char),
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Holds the cursor position of the last press or move.
    Dragging { last: Vec2 },
}

#[derive(Debug, Default)]
pub struct InputController {
    drag: DragState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn handle(&mut self, event: InputEvent, camera: &mut Camera) {
        match event {
            InputEvent::Key(key) => {
                Self::handle_key(key, camera);
            }
            InputEvent::PointerDown(pos) => self.press(pos),
            InputEvent::PointerMove(pos) => self.move_to(pos, camera),
            InputEvent::PointerUp => self.release(),
        }
    }

    /// Pans the camera for w/a/s/d. Returns false for any other key.
    pub fn handle_key(key: char, camera: &mut Camera) -> bool {
        let offset = match key {
            'w' => Vec3::new(0.0, 0.0, -MOVE_STEP),
            'a' => Vec3::new(-MOVE_STEP, 0.0, 0.0),
            's' => Vec3::new(0.0, 0.0, MOVE_STEP),
            'd' => Vec3::new(MOVE_STEP, 0.0, 0.0),
            _ => return false,
        };
        camera.translate(offset);
        true
    }

    pub fn press(&mut self, pos: Vec2) {
        self.drag = DragState::Dragging { last: pos };
    }

    pub fn move_to(&mut self, pos: Vec2, camera: &mut Camera) {
        if let DragState::Dragging { last } = self.drag {
            let delta = pos - last;
            camera.rotate(
                -delta.y * MOUSE_SENSITIVITY,
                -delta.x * MOUSE_SENSITIVITY,
            );
            self.drag = DragState::Dragging { last: pos };
        }
    }

    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }
}

/// Turns minifb's polled window state into discrete [`InputEvent`]s.
///
/// minifb has no event queue, so press/release edges and cursor moves are
/// derived by comparing against the previous poll.
#[derive(Debug, Default)]
pub struct WindowInput {
    left_down: bool,
    last_cursor: Option<Vec2>,
}

impl WindowInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, window: &Window) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = window
            .get_keys_pressed(KeyRepeat::Yes)
            .into_iter()
            .filter_map(key_to_char)
            .map(InputEvent::Key)
            .collect();

        let cursor = window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Vec2::new(x, y));
        let down = window.get_mouse_down(MouseButton::Left);
        events.extend(self.pointer_events(cursor, down));
        events
    }

    /// Motion seen while the button was held is reported before its release,
    /// so the final stretch of a drag still counts.
    fn pointer_events(&mut self, cursor: Option<Vec2>, down: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if let (false, true, Some(pos)) = (self.left_down, down, cursor) {
            events.push(InputEvent::PointerDown(pos));
        }
        if let Some(pos) = cursor {
            if self.left_down && self.last_cursor != Some(pos) {
                events.push(InputEvent::PointerMove(pos));
            }
            self.last_cursor = Some(pos);
        }
        if self.left_down && !down {
            events.push(InputEvent::PointerUp);
        }
        self.left_down = down && (self.left_down || cursor.is_some());
        events
    }
}

fn key_to_char(key: minifb::Key) -> Option<char> {
    match key {
        minifb::Key::W => Some('w'),
        minifb::Key::A => Some('a'),
        minifb::Key::S => Some('s'),
        minifb::Key::D => Some('d'),
        _ => None,
    }
}
