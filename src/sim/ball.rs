//! Ball entity and its per-tick physics update

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::boundary::{contact_fraction, impact_correction, penetrates, reflect_off_wall};
use super::vector::Vector2;
use crate::consts::*;
use crate::polar_to_cartesian;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The ball hit the bounding circle and was reflected
    pub bounced: bool,
    /// Vertical velocity crossed zero and was snapped to rest
    pub apex: bool,
}

/// A ball entity
///
/// Position and velocity are plain world-space values; the display layer
/// reads them and never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// World units
    pub radius: f64,
    /// World units, origin at the center of the bounding circle
    pub pos: Vector2,
    /// World units per second
    pub vel: Vector2,
}

impl Ball {
    pub fn new(id: u32, radius: f64, pos: Vector2) -> Self {
        Self {
            id,
            radius,
            pos,
            vel: Vector2::ZERO,
        }
    }

    /// Spawn a ball of random size at a uniformly random angle and distance
    /// that keeps it fully inside the bounding circle, at rest.
    pub fn random<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Self {
        let radius = BALL_RADIUS_MIN + rng.random::<f64>() * BALL_RADIUS_SPREAD;
        let theta = rng.random::<f64>() * TAU;
        let r = rng.random::<f64>() * (BOUNDARY_RADIUS - radius);
        Self::new(id, radius, polar_to_cartesian(r, theta))
    }

    /// Overlap test against another ball. Symmetric.
    pub fn is_colliding(&self, other: &Ball) -> bool {
        (other.pos - self.pos).distance() < other.radius + self.radius
    }

    /// Advance the ball by `time_delta_ms` milliseconds.
    ///
    /// Integrates free motion, resolves a boundary hit at the contact point,
    /// then applies gravity. The new velocity is built up locally and
    /// assigned once at the end.
    pub fn tick(&mut self, time_delta_ms: f64) -> TickReport {
        let mut report = TickReport::default();
        let dt = time_delta_ms / 1000.0;

        let start = self.pos;
        let displacement = self.vel * dt;
        self.pos = start + displacement;

        let mut vel = self.vel;

        if penetrates(self.pos, self.radius) {
            let t = contact_fraction(start, displacement, self.radius);
            let penetrated = self.pos;
            self.pos = start + displacement * t;
            let dy = penetrated.y - self.pos.y;

            vel = reflect_off_wall(self.vel, self.pos);
            vel.y -= impact_correction(dy);

            report.bounced = true;
            log::trace!(
                "ball {} hit wall at ({:.4}, {:.4}), t={:.4}",
                self.id,
                self.pos.x,
                self.pos.y,
                t
            );
        }

        let pre_gravity_y = vel.y;
        vel.y += dt * GRAVITY;

        if pre_gravity_y < 0.0 && vel.y >= 0.0 {
            self.pos.y += pre_gravity_y * dt;
            vel.y = 0.0;
            report.apex = true;
        }

        self.vel = vel;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME: f64 = 16.67;

    fn contained(ball: &Ball, tolerance: f64) -> bool {
        ball.pos.distance() + ball.radius <= BOUNDARY_RADIUS + tolerance
    }

    #[test]
    fn test_random_ball_is_contained_and_at_rest() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let ball = Ball::random(id, &mut rng);
            assert!(ball.radius >= BALL_RADIUS_MIN);
            assert!(ball.radius < BALL_RADIUS_MIN + BALL_RADIUS_SPREAD);
            assert!(contained(&ball, 1e-12));
            assert_eq!(ball.vel, Vector2::ZERO);
        }
    }

    #[test]
    fn test_tick_at_rest_falls() {
        let mut ball = Ball::new(1, 0.2, Vector2::ZERO);
        let report = ball.tick(FRAME);

        assert_eq!(ball.pos, Vector2::ZERO);
        assert_eq!(ball.vel.x, 0.0);
        assert!((ball.vel.y - 9.8 * 0.01667).abs() < 1e-12);
        assert!((ball.vel.y - 0.1634).abs() < 1e-4);
        assert_eq!(report, TickReport::default());
    }

    #[test]
    fn test_tick_free_motion_is_exact() {
        let mut ball = Ball::new(1, 0.2, Vector2::new(0.3, -0.4));
        ball.vel = Vector2::new(1.25, 0.5);
        let expected = ball.pos + ball.vel * (FRAME / 1000.0);

        let report = ball.tick(FRAME);
        assert!(!report.bounced);
        assert_eq!(ball.pos, expected);
        assert_eq!(ball.vel.x, 1.25);
    }

    #[test]
    fn test_tick_wall_hit_resolves_to_contact() {
        let mut ball = Ball::new(1, 0.2, Vector2::new(1.79, 0.0));
        ball.vel = Vector2::new(5.0, 0.0);

        let report = ball.tick(FRAME);
        assert!(report.bounced);
        assert!(!report.apex);

        // Surface sits epsilon inside the wall
        let gap = ball.pos.distance() + ball.radius;
        assert!((gap - (BOUNDARY_RADIUS - CONTACT_EPSILON)).abs() < 1e-9);

        // Outward radial component reversed
        assert!(ball.vel.dot(ball.pos.normalize()) < 0.0);
        assert!((ball.vel.x + 5.0).abs() < 1e-9);
        // No vertical drop, so only gravity touches y
        assert!((ball.vel.y - 9.8 * FRAME / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_floor_hit_removes_sink_energy() {
        let mut ball = Ball::new(1, 0.2, Vector2::new(0.0, 1.7));
        ball.vel = Vector2::new(0.0, 6.0);

        let report = ball.tick(FRAME);
        assert!(report.bounced);

        // Reflected to -6 then corrected upward by the sink distance
        let dt = FRAME / 1000.0;
        let sink = (1.7 + 6.0 * dt) - ball.pos.y;
        let expected = -6.0 - impact_correction(sink) + 9.8 * dt;
        assert!((ball.vel.y - expected).abs() < 1e-9);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_tick_apex_correction() {
        let mut ball = Ball::new(1, 0.2, Vector2::ZERO);
        ball.vel = Vector2::new(0.0, -1.0);

        // 200 ms of gravity adds 1.96 > 1.0, so vertical speed crosses zero
        let report = ball.tick(200.0);
        assert!(report.apex);
        assert!(!report.bounced);

        // Free motion -0.2, then the correction moves another -1.0 * 0.2
        assert!((ball.pos.y - (-0.4)).abs() < 1e-12);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_is_colliding() {
        let a = Ball::new(1, 0.2, Vector2::new(0.0, 0.0));
        let b = Ball::new(2, 0.2, Vector2::new(0.39, 0.0));
        let c = Ball::new(3, 0.2, Vector2::new(0.41, 0.0));

        assert!(a.is_colliding(&b));
        assert!(!a.is_colliding(&c));

        // Touching exactly is not a collision
        let d = Ball::new(4, 0.25, Vector2::new(0.0, 0.5));
        let e = Ball::new(5, 0.25, Vector2::new(0.0, 1.0));
        assert!(!d.is_colliding(&e));
    }

    #[test]
    fn test_tick_radial_exit_from_outer_band_pulls_back() {
        // Spawned past the contact circle (1.79) but inside the wall
        let mut ball = Ball::new(1, 0.2, Vector2::new(1.795, 0.0));
        ball.vel = Vector2::new(10.0, 0.0);
        let report = ball.tick(FRAME);

        assert!(report.bounced);
        // Negative contact fraction: pulled back onto the contact circle
        assert!((ball.pos.x - 1.79).abs() < 1e-9);
        assert!(ball.pos.y.abs() < 1e-9);
        assert!((ball.vel.x + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_tangential_exit_from_outer_band_goes_nan() {
        // Moving along the wall from outside the contact circle leaves no
        // real contact root; the state is not guarded
        let mut ball = Ball::new(1, 0.2, Vector2::new(1.795, 0.0));
        ball.vel = Vector2::new(0.0, 10.0);
        let report = ball.tick(FRAME);

        assert!(report.bounced);
        assert!(ball.pos.x.is_nan() && ball.pos.y.is_nan());
        assert!(ball.vel.x.is_nan() && ball.vel.y.is_nan());
    }

    proptest! {
        #[test]
        fn tick_keeps_ball_inside(
            r0 in 0.0f64..1.7,
            theta in 0.0f64..std::f64::consts::TAU,
            vx in -30.0f64..30.0,
            vy in -30.0f64..30.0,
            radius in 0.15f64..0.25,
            dt in 0.0f64..MAX_FRAME_MS,
        ) {
            let start = polar_to_cartesian(r0, theta);
            prop_assume!(start.distance() + radius <= BOUNDARY_RADIUS - CONTACT_EPSILON);

            let mut ball = Ball::new(0, radius, start);
            ball.vel = Vector2::new(vx, vy);
            ball.tick(dt);

            prop_assert!(contained(&ball, CONTACT_EPSILON));
        }

        #[test]
        fn is_colliding_is_symmetric(
            ax in -2.0f64..2.0, ay in -2.0f64..2.0,
            bx in -2.0f64..2.0, by in -2.0f64..2.0,
            ra in 0.15f64..0.25, rb in 0.15f64..0.25,
        ) {
            let a = Ball::new(1, ra, Vector2::new(ax, ay));
            let b = Ball::new(2, rb, Vector2::new(bx, by));
            prop_assert_eq!(a.is_colliding(&b), b.is_colliding(&a));
        }
    }
}
