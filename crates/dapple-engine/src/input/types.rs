use glam::Vec2;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// What happened to the pointer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerEventKind {
    Moved,
    Pressed(MouseButton),
    Released(MouseButton),
    /// Pointer left the window surface.
    Left,
}

/// Platform-agnostic pointer event in logical pixels.
///
/// `time_ms` is a monotonic timestamp relative to runtime start; click and
/// double-click detection only compare timestamps, never wall clocks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub time_ms: f64,
}

impl PointerEvent {
    #[inline]
    pub fn new(kind: PointerEventKind, x: f32, y: f32, time_ms: f64) -> Self {
        Self { kind, x, y, time_ms }
    }

    #[inline]
    pub fn moved(x: f32, y: f32, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Moved, x, y, time_ms)
    }

    #[inline]
    pub fn pressed(button: MouseButton, x: f32, y: f32, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Pressed(button), x, y, time_ms)
    }

    #[inline]
    pub fn released(button: MouseButton, x: f32, y: f32, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Released(button), x, y, time_ms)
    }

    #[inline]
    pub fn left(time_ms: f64) -> Self {
        Self::new(PointerEventKind::Left, 0.0, 0.0, time_ms)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
