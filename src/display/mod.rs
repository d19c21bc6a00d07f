//! Display adapter
//!
//! Reads world-space physics state and produces pixel-space circle handles
//! for whatever draws them. Nothing here writes back into the simulation.

pub mod scene;
pub mod shapes;

pub use scene::{CircleHandle, Scene};
pub use shapes::{circle_outline, segments_for_radius};
