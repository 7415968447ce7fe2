//! Scene model.
//!
//! Responsibilities:
//! - scene objects (gradient circles, animated sprites) and their shared data
//! - the scene graph: ownership, hit queries, per-frame update and visible set
//! - commands the UI layer uses to request changes

mod circle;
mod command;
mod graph;
mod object;
mod sprite;
mod sprite_type;
mod store;

pub use circle::{GradientCircle, DEFAULT_DIAMETER};
pub use command::SceneCommand;
pub use graph::SceneGraph;
pub use object::{position_at, CircleId, ObjectId, ObjectKind, SceneObject, SpriteId};
pub use sprite::{AnimatedSprite, PlayDirection};
pub use sprite_type::{AnimatedSpriteType, AnimatedSpriteTypeBuilder, AnimationFrame};
