//! Pixel-space geometry shared by the scene and the renderers.
//!
//! Canonical CPU space:
//! - logical pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Conversion to NDC happens in `math::transform`.

mod rect;
mod viewport;

pub use rect::Rect;
pub use viewport::Viewport;
