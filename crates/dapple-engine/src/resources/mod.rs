//! Shared scene resources: sprite-type registry and the sprite atlas.

mod atlas;
mod manager;

pub use atlas::AtlasImage;
pub use manager::ResourceManager;
