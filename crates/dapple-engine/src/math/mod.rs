//! Transform math.
//!
//! Matrices and vectors are `glam` types. This module only adds the 2D-canvas
//! conventions on top: pixel to NDC mapping and model transform composition
//! for the unit quad every object is drawn with.

mod transform;

pub use transform::{model, pixel_to_ndc, quad_transform};
