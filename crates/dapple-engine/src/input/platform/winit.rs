use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::window::Window;

use crate::input::{InputState, MouseButton, PointerEvent, PointerEventKind};

/// Translates a winit `WindowEvent` into a pointer event stamped `time_ms`.
///
/// Returns `None` for events the input subsystem does not represent.
pub fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
    time_ms: f64,
) -> Option<PointerEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let p = to_logical(window, *position);
            Some(PointerEvent::new(PointerEventKind::Moved, p.x, p.y, time_ms))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);
            let kind = match st {
                ElementState::Pressed => PointerEventKind::Pressed(button),
                ElementState::Released => PointerEventKind::Released(button),
            };

            // winit 0.30 has no cursor query; use the tracked pointer position.
            let p = state.pointer_pos.unwrap_or(Vec2::ZERO);
            Some(PointerEvent::new(kind, p.x, p.y, time_ms))
        }

        WindowEvent::CursorLeft { .. } => Some(PointerEvent::left(time_ms)),

        // Focus loss can swallow a release; report it as the pointer leaving.
        WindowEvent::Focused(false) => Some(PointerEvent::left(time_ms)),

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
