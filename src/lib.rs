//! Flappy Cone - tap-to-fly arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (physics clock, contact classification, obstacle spawner, run state)
//! - `tuning`: Data-driven game balance, validated at construction
//! - `web`: wasm-bindgen facade for a browser renderer (wasm32 only)
//!
//! Rendering, audio and input devices live outside this crate. They drive a
//! [`Game`] through `activate()` / `tick(dt)` and read snapshots back.

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{Game, GameEvent, GamePhase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Default game constants (points, seconds; origin at playfield center, +y up)
pub mod consts {
    /// Fixed simulation micro-step (120 Hz)
    pub const FIXED_DT: f32 = 1.0 / 120.0;
    /// Largest frame delta accepted by `tick` before clamping
    pub const MAX_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 750.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1334.0;

    /// Downward acceleration: 6 m/s² at 150 points per meter
    pub const GRAVITY: f32 = 900.0;
    /// Upward velocity set by each activation
    pub const JUMP_VELOCITY: f32 = 420.0;

    /// Actor (circle) defaults
    pub const ACTOR_RADIUS: f32 = 20.0;
    pub const ACTOR_START_X: f32 = -100.0;
    pub const ACTOR_START_Y: f32 = 0.0;

    /// Ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Obstacle pair geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 500.0;
    pub const GAP_HEIGHT: f32 = 170.0;
    /// Gap center is drawn from [-GAP_RANGE, GAP_RANGE]
    pub const GAP_RANGE: f32 = 100.0;
    pub const SENSOR_WIDTH: f32 = 10.0;

    /// Spawner timing
    pub const SPAWN_PERIOD: f32 = 2.5;
    /// Pairs appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Time for a pair to cross the playfield plus both margins
    pub const SCROLL_DURATION: f32 = 4.0;
}
