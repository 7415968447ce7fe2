use std::rc::Rc;

use glam::Vec4;

use crate::error::SceneError;

use super::object::{position_at, ObjectKind, SceneObject};
use super::sprite_type::{AnimatedSpriteType, AnimationFrame};

/// Direction in which a sprite walks its current sequence.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// Sprite instance animated from a shared [`AnimatedSpriteType`].
///
/// Invariant: `frame_index` always indexes a frame of `sequence` in `ty`.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    ty: Rc<AnimatedSpriteType>,
    position: Vec4,
    sequence: String,
    direction: PlayDirection,
    elapsed_in_frame_ms: f64,
    frame_index: usize,
}

impl AnimatedSprite {
    /// Creates a sprite at the origin playing `sequence` forward.
    pub fn new(ty: Rc<AnimatedSpriteType>, sequence: &str) -> Result<Self, SceneError> {
        if !ty.has_sequence(sequence) {
            return Err(unknown_sequence(&ty, sequence));
        }
        Ok(Self {
            ty,
            position: position_at(0.0, 0.0),
            sequence: sequence.to_string(),
            direction: PlayDirection::Forward,
            elapsed_in_frame_ms: 0.0,
            frame_index: 0,
        })
    }

    /// Creates a sprite centred on `(cx, cy)`.
    pub fn centered_at(ty: Rc<AnimatedSpriteType>, sequence: &str, cx: f32, cy: f32) -> Result<Self, SceneError> {
        let mut sprite = Self::new(ty, sequence)?;
        let x = cx - sprite.ty.sprite_width() * 0.5;
        let y = cy - sprite.ty.sprite_height() * 0.5;
        sprite.move_to(x, y);
        Ok(sprite)
    }

    pub fn with_direction(mut self, direction: PlayDirection) -> Self {
        self.set_direction(direction);
        self
    }

    pub fn sprite_type(&self) -> &Rc<AnimatedSpriteType> {
        &self.ty
    }

    pub fn current_sequence(&self) -> &str {
        &self.sequence
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn elapsed_in_frame_ms(&self) -> f64 {
        self.elapsed_in_frame_ms
    }

    pub fn current_frame_index(&self) -> usize {
        self.frame_index
    }

    /// Frame currently on screen.
    pub fn current_frame(&self) -> &AnimationFrame {
        &self.frames()[self.frame_index]
    }

    /// Switches to another sequence of the same type and restarts it.
    ///
    /// Unknown names are rejected and leave the sprite untouched.
    pub fn set_sequence(&mut self, sequence: &str) -> Result<(), SceneError> {
        if !self.ty.has_sequence(sequence) {
            return Err(unknown_sequence(&self.ty, sequence));
        }
        self.sequence = sequence.to_string();
        self.restart();
        Ok(())
    }

    pub fn set_direction(&mut self, direction: PlayDirection) {
        if self.direction != direction {
            self.direction = direction;
            self.restart();
        }
    }

    /// Advances the animation clock by `delta_ms`.
    ///
    /// Steps one frame each time the elapsed time reaches the current frame's
    /// duration, wrapping at the end of the sequence. Whole passes through the
    /// sequence are skipped arithmetically, so the cost is bounded by the
    /// sequence length whatever the delta or frame durations.
    pub fn update(&mut self, delta_ms: f64) {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return;
        }

        // A full cycle from any frame lands back on that frame.
        let cycle_ms: f64 = self.frames().iter().map(|f| f.duration_ms).sum();
        let delta_ms = if cycle_ms.is_finite() { delta_ms % cycle_ms } else { delta_ms };
        self.elapsed_in_frame_ms += delta_ms;

        loop {
            let duration = self.current_frame().duration_ms;
            if self.elapsed_in_frame_ms < duration {
                break;
            }
            self.elapsed_in_frame_ms -= duration;
            self.step();
        }
    }

    fn frames(&self) -> &[AnimationFrame] {
        // `sequence` is validated against `ty` on every assignment.
        self.ty.sequence(&self.sequence).unwrap_or(&[])
    }

    fn step(&mut self) {
        let len = self.frames().len();
        self.frame_index = match self.direction {
            PlayDirection::Forward => (self.frame_index + 1) % len,
            PlayDirection::Reverse => (self.frame_index + len - 1) % len,
        };
    }

    fn restart(&mut self) {
        self.elapsed_in_frame_ms = 0.0;
        self.frame_index = match self.direction {
            PlayDirection::Forward => 0,
            PlayDirection::Reverse => self.frames().len().saturating_sub(1),
        };
    }
}

impl SceneObject for AnimatedSprite {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Sprite
    }

    fn position(&self) -> Vec4 {
        self.position
    }

    fn set_position(&mut self, position: Vec4) {
        self.position = position;
    }

    fn width(&self) -> f32 {
        self.ty.sprite_width()
    }

    fn height(&self) -> f32 {
        self.ty.sprite_height()
    }

    /// Axis-aligned test against the type's sprite size, edges inclusive.
    fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(glam::Vec2::new(x, y))
    }
}

fn unknown_sequence(ty: &AnimatedSpriteType, sequence: &str) -> SceneError {
    SceneError::UnknownSequence {
        sprite_type: ty.name().to_string(),
        sequence: sequence.to_string(),
    }
}
