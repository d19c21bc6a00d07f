//! World state and the per-frame driver
//!
//! The world owns the fixed ball population. Everything here is
//! deterministic for a given seed and sequence of frame times.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::clock::clamp_frame_ms;
use crate::consts::*;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Summary of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Milliseconds the simulation actually advanced (after clamping)
    pub elapsed_ms: f64,
    /// Balls that hit the wall this frame
    pub bounces: usize,
    /// Balls whose vertical velocity was snapped to zero at the apex
    pub apexes: usize,
    /// Frame was skipped because the world is paused
    pub skipped: bool,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub rng_state: RngState,
    /// Balls in fixed update order
    pub balls: Vec<Ball>,
    /// Frames advanced so far (paused frames excluded)
    pub frames: u64,
    paused: bool,
}

impl World {
    /// Create a world with [`BALL_COUNT`] balls placed from `seed`
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let balls = (0..BALL_COUNT as u32)
            .map(|id| Ball::random(id, &mut rng))
            .collect();

        log::debug!("World created with seed {seed} ({BALL_COUNT} balls)");

        Self {
            rng_state,
            balls,
            frames: 0,
            paused: false,
        }
    }

    /// Create a world from an explicit ball list
    pub fn with_balls(balls: Vec<Ball>) -> Self {
        Self {
            rng_state: RngState::new(0),
            balls,
            frames: 0,
            paused: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Advance every ball once by `elapsed_ms`, clamped to a 60 Hz step.
    ///
    /// Balls update in array order and never read each other's state.
    pub fn frame(&mut self, elapsed_ms: f64) -> FrameReport {
        if self.paused {
            return FrameReport {
                skipped: true,
                ..Default::default()
            };
        }

        let elapsed_ms = clamp_frame_ms(elapsed_ms);
        let mut report = FrameReport {
            elapsed_ms,
            ..Default::default()
        };

        for ball in &mut self.balls {
            let tick = ball.tick(elapsed_ms);
            report.bounces += tick.bounced as usize;
            report.apexes += tick.apex as usize;
        }

        self.frames += 1;
        report
    }

    /// Index pairs `(i, j)`, `i < j`, of balls that currently overlap.
    ///
    /// Balls pass through each other; this is only an inspection query.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.balls.iter().enumerate() {
            for (j, b) in self.balls.iter().enumerate().skip(i + 1) {
                if a.is_colliding(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Kinetic plus potential energy per unit mass, summed over all balls.
    ///
    /// +y is down, so potential energy is `-g·y`.
    pub fn mechanical_energy(&self) -> f64 {
        self.balls
            .iter()
            .map(|b| 0.5 * b.vel.length_squared() - GRAVITY * b.pos.y)
            .sum()
    }
}
