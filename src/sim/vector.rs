//! 2D vector value type for world-space physics
//!
//! Arithmetic goes through the std operator traits, so `a + b`, `a - b`,
//! `v * s` and `v / s` all return new values. The only in-place helper is
//! [`Vector2::set`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D vector in world units (f64 precision).
///
/// No invariants beyond finite components; division by zero yields
/// inf/NaN and is allowed to propagate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean norm
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean norm (distance from the origin)
    #[inline]
    pub fn distance(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// `self / self.distance()`; NaN for the zero vector
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.distance()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product of (x, y, 0) vectors
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Overwrite this vector with `other`
    #[inline]
    pub fn set(&mut self, other: Self) {
        self.x = other.x;
        self.y = other.y;
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    /// `self - rhs`
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x as f32, v.y as f32)
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x as f64, v.y as f64)
    }
}
