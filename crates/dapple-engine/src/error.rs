use thiserror::Error;

/// Errors raised while building scene content.
///
/// All of these indicate a configuration problem (bad or missing sprite data)
/// and are meant to abort scene construction rather than be recovered from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("unknown animated sprite type `{0}`")]
    UnknownSpriteType(String),

    #[error("sprite type `{sprite_type}` has no animation sequence `{sequence}`")]
    UnknownSequence { sprite_type: String, sequence: String },

    #[error("sprite type `{sprite_type}`: sequence `{sequence}` has no frames")]
    EmptySequence { sprite_type: String, sequence: String },

    #[error("sprite type `{sprite_type}`: frame {frame} of `{sequence}` has invalid duration {duration_ms}ms")]
    InvalidFrameDuration {
        sprite_type: String,
        sequence: String,
        frame: usize,
        duration_ms: f64,
    },

    #[error("sprite type `{sprite_type}` has invalid size {width}x{height}")]
    InvalidSpriteSize { sprite_type: String, width: f32, height: f32 },

    #[error("atlas image is {width}x{height} but holds {len} bytes (expected {expected})")]
    InvalidAtlas { width: u32, height: u32, len: usize, expected: usize },
}
