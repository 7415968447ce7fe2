use std::collections::HashMap;

use crate::coords::Rect;
use crate::error::SceneError;

/// One frame of an animation sequence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationFrame {
    /// Source region inside the sprite atlas, in atlas pixels.
    pub region: Rect,
    /// How long the frame stays on screen.
    pub duration_ms: f64,
}

impl AnimationFrame {
    #[inline]
    pub const fn new(region: Rect, duration_ms: f64) -> Self {
        Self { region, duration_ms }
    }
}

/// Immutable animation data shared by every sprite of one type.
///
/// Built once through [`AnimatedSpriteTypeBuilder`], then handed out behind an
/// `Rc`. There is no mutable access, so live sprites can rely on frame indices
/// staying valid.
#[derive(Debug, PartialEq)]
pub struct AnimatedSpriteType {
    name: String,
    sprite_width: f32,
    sprite_height: f32,
    sequences: HashMap<String, Vec<AnimationFrame>>,
    default_sequence: String,
}

impl AnimatedSpriteType {
    pub fn builder(name: impl Into<String>, sprite_width: f32, sprite_height: f32) -> AnimatedSpriteTypeBuilder {
        AnimatedSpriteTypeBuilder {
            name: name.into(),
            sprite_width,
            sprite_height,
            sequences: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sprite_width(&self) -> f32 {
        self.sprite_width
    }

    pub fn sprite_height(&self) -> f32 {
        self.sprite_height
    }

    /// The first sequence registered on the builder.
    pub fn default_sequence(&self) -> &str {
        &self.default_sequence
    }

    pub fn sequence(&self, name: &str) -> Option<&[AnimationFrame]> {
        self.sequences.get(name).map(Vec::as_slice)
    }

    pub fn has_sequence(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }
}

/// Collects sequences and validates them into an [`AnimatedSpriteType`].
#[derive(Debug, Clone)]
pub struct AnimatedSpriteTypeBuilder {
    name: String,
    sprite_width: f32,
    sprite_height: f32,
    sequences: Vec<(String, Vec<AnimationFrame>)>,
}

impl AnimatedSpriteTypeBuilder {
    /// Adds (or replaces) a named sequence.
    pub fn sequence(mut self, name: impl Into<String>, frames: impl IntoIterator<Item = AnimationFrame>) -> Self {
        let name = name.into();
        let frames: Vec<_> = frames.into_iter().collect();
        match self.sequences.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = frames,
            None => self.sequences.push((name, frames)),
        }
        self
    }

    pub fn build(self) -> Result<AnimatedSpriteType, SceneError> {
        let valid_size = |v: f32| v.is_finite() && v > 0.0;
        if !valid_size(self.sprite_width) || !valid_size(self.sprite_height) {
            return Err(SceneError::InvalidSpriteSize {
                sprite_type: self.name,
                width: self.sprite_width,
                height: self.sprite_height,
            });
        }

        let Some((default_sequence, _)) = self.sequences.first() else {
            return Err(SceneError::EmptySequence { sprite_type: self.name, sequence: String::new() });
        };
        let default_sequence = default_sequence.clone();

        for (sequence, frames) in &self.sequences {
            if frames.is_empty() {
                return Err(SceneError::EmptySequence {
                    sprite_type: self.name.clone(),
                    sequence: sequence.clone(),
                });
            }
            if let Some((frame, f)) = frames
                .iter()
                .enumerate()
                .find(|(_, f)| !(f.duration_ms.is_finite() && f.duration_ms > 0.0))
            {
                return Err(SceneError::InvalidFrameDuration {
                    sprite_type: self.name.clone(),
                    sequence: sequence.clone(),
                    frame,
                    duration_ms: f.duration_ms,
                });
            }
        }

        Ok(AnimatedSpriteType {
            name: self.name,
            sprite_width: self.sprite_width,
            sprite_height: self.sprite_height,
            sequences: self.sequences.into_iter().collect(),
            default_sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x: f32, ms: f64) -> AnimationFrame {
        AnimationFrame::new(Rect::new(x, 0.0, 32.0, 32.0), ms)
    }

    #[test]
    fn build_keeps_sequences_and_default() {
        let ty = AnimatedSpriteType::builder("walker", 32.0, 32.0)
            .sequence("FORWARD", [frame(0.0, 100.0), frame(32.0, 100.0)])
            .sequence("IDLE", [frame(64.0, 250.0)])
            .build()
            .unwrap();

        assert_eq!(ty.default_sequence(), "FORWARD");
        assert_eq!(ty.sequence("FORWARD").map(<[_]>::len), Some(2));
        assert!(ty.has_sequence("IDLE"));
        assert!(ty.sequence("JUMP").is_none());
    }

    #[test]
    fn re_adding_a_sequence_replaces_it() {
        let ty = AnimatedSpriteType::builder("walker", 32.0, 32.0)
            .sequence("FORWARD", [frame(0.0, 100.0)])
            .sequence("FORWARD", [frame(0.0, 100.0), frame(32.0, 100.0)])
            .build()
            .unwrap();
        assert_eq!(ty.sequence("FORWARD").map(<[_]>::len), Some(2));
    }

    #[test]
    fn no_sequences_is_rejected() {
        let err = AnimatedSpriteType::builder("empty", 32.0, 32.0).build().unwrap_err();
        assert!(matches!(err, SceneError::EmptySequence { .. }));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = AnimatedSpriteType::builder("walker", 32.0, 32.0)
            .sequence("FORWARD", [])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::EmptySequence { sprite_type: "walker".into(), sequence: "FORWARD".into() }
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = AnimatedSpriteType::builder("walker", 32.0, 32.0)
            .sequence("FORWARD", [frame(0.0, 100.0), frame(32.0, 0.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidFrameDuration { frame: 1, .. }));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let err = AnimatedSpriteType::builder("flat", 32.0, 0.0)
            .sequence("FORWARD", [frame(0.0, 100.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidSpriteSize { .. }));
    }
}
