use crate::paint::Color;
use crate::scene::DEFAULT_DIAMETER;
use crate::time::{DEFAULT_MAX_UPDATE_STEPS, DEFAULT_TIMESTEP_MS};

/// Scene host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Fixed simulation step.
    pub timestep_ms: f64,

    /// Updates per frame before the loop declares a panic.
    pub max_update_steps: u32,

    /// Diameter of spawned circles, in logical pixels.
    pub circle_diameter: f32,

    /// Sprite type ids eligible for spawning. Each is as likely as a circle.
    pub spawn_sprite_types: Vec<String>,

    /// Sequence spawned sprites start in.
    pub initial_sequence: String,

    /// Background color.
    pub clear_color: Color,

    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            timestep_ms: DEFAULT_TIMESTEP_MS,
            max_update_steps: DEFAULT_MAX_UPDATE_STEPS,
            circle_diameter: DEFAULT_DIAMETER,
            spawn_sprite_types: Vec::new(),
            initial_sequence: "FORWARD".to_string(),
            clear_color: Color::from_srgb_u8(0xd0, 0xd8, 0xe0, 0xff),
            seed: None,
        }
    }
}
