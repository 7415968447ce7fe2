use std::collections::HashSet;

use glam::Vec2;

use super::frame::InputFrame;
use super::types::{MouseButton, PointerEvent, PointerEventKind};

/// Current pointer state for a single window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<Vec2>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: PointerEvent) {
        match ev.kind {
            PointerEventKind::Moved => {
                self.pointer_pos = Some(ev.position());
            }

            PointerEventKind::Pressed(button) => {
                self.pointer_pos = Some(ev.position());
                if self.buttons_down.insert(button) {
                    frame.buttons_pressed.insert(button);
                }
            }

            PointerEventKind::Released(button) => {
                self.pointer_pos = Some(ev.position());
                if self.buttons_down.remove(&button) {
                    frame.buttons_released.insert(button);
                }
            }

            PointerEventKind::Left => {
                // Releases outside the window are never reported; drop held
                // buttons so nothing stays stuck.
                self.pointer_pos = None;
                self.buttons_down.clear();
            }
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_tracks_transitions() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, PointerEvent::pressed(MouseButton::Left, 3.0, 4.0, 0.0));
        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(state.pointer_pos, Some(Vec2::new(3.0, 4.0)));

        state.apply_event(&mut frame, PointerEvent::released(MouseButton::Left, 3.0, 4.0, 10.0));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn repeated_press_is_not_a_new_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, PointerEvent::pressed(MouseButton::Right, 0.0, 0.0, 0.0));
        frame.clear();

        state.apply_event(&mut frame, PointerEvent::pressed(MouseButton::Right, 0.0, 0.0, 1.0));
        assert!(frame.buttons_pressed.is_empty());
    }

    #[test]
    fn leaving_clears_pointer_and_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, PointerEvent::pressed(MouseButton::Left, 1.0, 1.0, 0.0));
        state.apply_event(&mut frame, PointerEvent::left(5.0));

        assert_eq!(state.pointer_pos, None);
        assert!(state.buttons_down.is_empty());
    }
}
