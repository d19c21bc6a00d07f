//! Polygon generation for circles

use glam::Vec2;
use std::f32::consts::PI;

/// Fewest segments drawn for any circle
pub const MIN_SEGMENTS: u32 = 8;

/// Points around a circle, counter-clockwise from +x.
///
/// The outline is open: the last point is not repeated, callers close the
/// path themselves.
pub fn circle_outline(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(MIN_SEGMENTS);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            center + Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Segment count for a circle of `radius_px` pixels, capped at `max`.
///
/// Aims for roughly one segment every 4 pixels of circumference.
pub fn segments_for_radius(radius_px: f32, max: u32) -> u32 {
    let circumference = 2.0 * PI * radius_px.max(0.0);
    ((circumference / 4.0).ceil() as u32).clamp(MIN_SEGMENTS, max.max(MIN_SEGMENTS))
}
