//! Bounding circle geometry
//!
//! The boundary is a fixed circle of radius [`BOUNDARY_RADIUS`] centered at
//! the origin. A ball that crosses it during a step is pulled back to the
//! point where its surface first touched the wall, and its velocity is
//! mirrored about the wall normal there.

use super::vector::Vector2;
use crate::consts::{BOUNDARY_RADIUS, CONTACT_EPSILON, DEGENERATE_DENOMINATOR, GRAVITY};

/// Whether a ball at `position` reaches past the bounding circle
#[inline]
pub fn penetrates(position: Vector2, radius: f64) -> bool {
    position.distance() + radius > BOUNDARY_RADIUS
}

/// Fraction of `displacement` at which a ball starting at `start` touches
/// the wall.
///
/// Solves `|start + displacement * t| = R - radius - ε` for the forward
/// root. The ε keeps the resolved ball strictly inside so the next tick
/// does not register the same contact.
pub fn contact_fraction(start: Vector2, displacement: Vector2, radius: f64) -> f64 {
    let reach = BOUNDARY_RADIUS - radius - CONTACT_EPSILON;
    let len_sq = displacement.length_squared();
    let cross = start.cross(displacement);

    let discriminant = reach * reach * len_sq - cross * cross;
    let denom = if len_sq == 0.0 {
        DEGENERATE_DENOMINATOR
    } else {
        len_sq
    };

    (-start.dot(displacement) + discriminant.sqrt()) / denom
}

/// Mirror `velocity` about the wall normal at `contact`.
///
/// With `A = atan2(-y, x)` this is the rotation by `2A` of the negated
/// velocity, with the y component flipped back. Equivalent to
/// `v - 2(v·n)n` for the outward normal `n`.
pub fn reflect_off_wall(velocity: Vector2, contact: Vector2) -> Vector2 {
    let a = (-contact.y).atan2(contact.x);
    let (sin2a, cos2a) = (2.0 * a).sin_cos();

    let x = -velocity.x * cos2a - -velocity.y * sin2a;
    let y = -velocity.x * sin2a + -velocity.y * cos2a;
    Vector2::new(x, -y)
}

/// Vertical speed to remove after a bounce.
///
/// `dy` is how far the ball sank below the contact point during the step
/// (pre-resolution y minus contact y). Resolving the hit at a single point
/// skips that drop, so the bounce would otherwise gain `g·dy` of energy.
#[inline]
pub fn impact_correction(dy: f64) -> f64 {
    GRAVITY - (GRAVITY * GRAVITY - 2.0 * GRAVITY * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_penetrates() {
        assert!(!penetrates(Vector2::new(1.0, 0.0), 0.2));
        assert!(!penetrates(Vector2::new(1.79, 0.0), 0.2));
        assert!(penetrates(Vector2::new(1.81, 0.0), 0.2));
        assert!(penetrates(Vector2::new(0.0, -1.9), 0.2));
    }

    #[test]
    fn test_contact_fraction_straight_out() {
        // Start at origin, move 4 units right: wall contact at 2 - 0.2 - 0.01
        let t = contact_fraction(Vector2::ZERO, Vector2::new(4.0, 0.0), 0.2);
        assert!((t - 1.79 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_contact_fraction_starting_on_contact_circle() {
        let t = contact_fraction(Vector2::new(1.79, 0.0), Vector2::new(0.1, 0.0), 0.2);
        assert!(t.abs() < 1e-9);
    }

    #[test]
    fn test_contact_fraction_zero_displacement_is_finite() {
        // Numerator collapses to zero, the floored denominator keeps it finite
        let t = contact_fraction(Vector2::new(1.0, 0.0), Vector2::ZERO, 0.2);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_reflect_right_wall() {
        let v = reflect_off_wall(Vector2::new(5.0, 1.0), Vector2::new(1.79, 0.0));
        assert!((v.x + 5.0).abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_floor() {
        // +y is down, so the floor sits at positive y
        let v = reflect_off_wall(Vector2::new(0.5, 3.0), Vector2::new(0.0, 1.79));
        assert!((v.x - 0.5).abs() < 1e-12);
        assert!((v.y + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_impact_correction() {
        assert!(impact_correction(0.0).abs() < 1e-12);

        let dy = 0.05;
        let expected = GRAVITY - (GRAVITY * GRAVITY - 2.0 * GRAVITY * dy).sqrt();
        assert_eq!(impact_correction(dy), expected);
        assert!(impact_correction(dy) > 0.0);
        // Sinking upward (negative dy) gives a negative correction
        assert!(impact_correction(-dy) < 0.0);
    }

    proptest! {
        #[test]
        fn reflection_preserves_speed(
            vx in -20.0f64..20.0,
            vy in -20.0f64..20.0,
            theta in 0.0f64..std::f64::consts::TAU,
        ) {
            let contact = Vector2::new(theta.cos(), theta.sin()) * 1.79;
            let v = Vector2::new(vx, vy);
            let reflected = reflect_off_wall(v, contact);
            prop_assert!((reflected.distance() - v.distance()).abs() < 1e-9);
        }

        #[test]
        fn reflection_matches_normal_mirror(
            vx in -20.0f64..20.0,
            vy in -20.0f64..20.0,
            theta in 0.0f64..std::f64::consts::TAU,
        ) {
            let contact = Vector2::new(theta.cos(), theta.sin()) * 1.5;
            let n = contact.normalize();
            let v = Vector2::new(vx, vy);
            let mirrored = v - n * (2.0 * v.dot(n));
            let reflected = reflect_off_wall(v, contact);
            prop_assert!((reflected - mirrored).distance() < 1e-9);
        }

        #[test]
        fn contact_point_lies_on_contact_circle(
            r0 in 0.0f64..1.5,
            theta in 0.0f64..std::f64::consts::TAU,
            dx in -5.0f64..5.0,
            dy in -5.0f64..5.0,
            radius in 0.15f64..0.25,
        ) {
            let start = Vector2::new(theta.cos(), theta.sin()) * r0;
            let d = Vector2::new(dx, dy);
            prop_assume!(penetrates(start + d, radius));

            let t = contact_fraction(start, d, radius);
            let contact = start + d * t;
            let reach = BOUNDARY_RADIUS - radius - CONTACT_EPSILON;
            prop_assert!(t >= 0.0 && t <= 1.0);
            prop_assert!((contact.distance() - reach).abs() < 1e-9);
        }
    }
}
