//! Pixel-space scene mirrored from the simulation
//!
//! The scene is a container (positioned at the viewport center) holding one
//! circle handle per ball plus the bounding circle. `sync` copies physics
//! positions across each frame, scaled from world units to pixels.

use glam::Vec2;

use super::shapes::{circle_outline, segments_for_radius};
use crate::consts::BOUNDARY_RADIUS;
use crate::settings::Settings;
use crate::sim::World;

/// A drawable circle, relative to the scene origin
#[derive(Debug, Clone, PartialEq)]
pub struct CircleHandle {
    /// Pixels from the scene origin
    pub center: Vec2,
    pub radius_px: f32,
    /// Draw as a filled disc, otherwise as an outline
    pub filled: bool,
}

impl CircleHandle {
    /// Outline polygon in absolute screen pixels
    pub fn polygon(&self, origin: Vec2, max_segments: u32) -> Vec<Vec2> {
        let segments = segments_for_radius(self.radius_px, max_segments);
        circle_outline(origin + self.center, self.radius_px, segments)
    }
}

/// Display state for one world
#[derive(Debug, Clone)]
pub struct Scene {
    /// Container position on screen (pixels)
    pub origin: Vec2,
    /// Pixels per world unit
    pub scale: f32,
    pub boundary: CircleHandle,
    /// One handle per ball, same order as `World::balls`
    pub balls: Vec<CircleHandle>,
}

impl Scene {
    pub fn new(world: &World, settings: &Settings) -> Self {
        let scale = settings.scale;
        let boundary = CircleHandle {
            center: Vec2::ZERO,
            radius_px: BOUNDARY_RADIUS as f32 * scale,
            filled: false,
        };
        let balls = world
            .balls
            .iter()
            .map(|b| CircleHandle {
                center: Vec2::from(b.pos) * scale,
                radius_px: b.radius as f32 * scale,
                filled: true,
            })
            .collect();

        Self {
            origin: Vec2::ZERO,
            scale,
            boundary,
            balls,
        }
    }

    /// Copy current ball positions into their handles
    pub fn sync(&mut self, world: &World) {
        for (handle, ball) in self.balls.iter_mut().zip(&world.balls) {
            handle.center = Vec2::from(ball.pos) * self.scale;
        }
    }

    /// Put the container at the center of a `width` x `height` viewport
    pub fn recenter(&mut self, width: f32, height: f32) {
        self.origin = Vec2::new(width / 2.0, height / 2.0);
    }

    /// Absolute screen position of a handle's center
    pub fn to_screen(&self, handle: &CircleHandle) -> Vec2 {
        self.origin + handle.center
    }
}
