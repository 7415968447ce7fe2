use std::fmt;

use glam::{Vec2, Vec4};

use crate::coords::Rect;

slotmap::new_key_type! {
    /// Stable handle to an `AnimatedSprite` owned by a `SceneGraph`.
    pub struct SpriteId;

    /// Stable handle to a `GradientCircle` owned by a `SceneGraph`.
    pub struct CircleId;
}

/// Object kinds the scene stores and the renderer dispatches on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Sprite,
    Circle,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Sprite => f.write_str("sprite"),
            ObjectKind::Circle => f.write_str("circle"),
        }
    }
}

/// Handle to any live scene object.
///
/// Handles are generational: once an object is deleted its id never resolves
/// again, even if the slot is reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectId {
    Sprite(SpriteId),
    Circle(CircleId),
}

impl ObjectId {
    #[inline]
    pub fn kind(self) -> ObjectKind {
        match self {
            ObjectId::Sprite(_) => ObjectKind::Sprite,
            ObjectId::Circle(_) => ObjectKind::Circle,
        }
    }
}

impl From<SpriteId> for ObjectId {
    #[inline]
    fn from(id: SpriteId) -> Self {
        ObjectId::Sprite(id)
    }
}

impl From<CircleId> for ObjectId {
    #[inline]
    fn from(id: CircleId) -> Self {
        ObjectId::Circle(id)
    }
}

/// Builds the homogeneous position every object carries.
#[inline]
pub fn position_at(x: f32, y: f32) -> Vec4 {
    Vec4::new(x, y, 0.0, 1.0)
}

/// Capabilities shared by every scene object.
///
/// `position` is the top-left corner of the object's bounds in canvas pixels.
/// Only `x` and `y` take part in 2D logic; `z` and `w` ride along so the value
/// can be fed to 4x4 transforms unchanged.
pub trait SceneObject {
    fn kind(&self) -> ObjectKind;

    fn position(&self) -> Vec4;

    fn set_position(&mut self, position: Vec4);

    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Point containment test in canvas pixels.
    fn contains(&self, x: f32, y: f32) -> bool;

    /// Moves the top-left corner, keeping `z` and `w`.
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.position();
        self.set_position(Vec4::new(x, y, p.z, p.w));
    }

    fn bounds(&self) -> Rect {
        let p = self.position();
        Rect::new(p.x, p.y, self.width(), self.height())
    }

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}
