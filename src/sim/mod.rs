//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Fixed micro-steps only
//! - One owned [`Run`] per play-through, replaced wholesale on reset
//! - Stable contact resolution order (by body ID)

pub mod body;
pub mod collision;
pub mod contact;
pub mod game;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Aabb, Body, BodyId, Category, CategorySet, Shape};
pub use collision::{CollisionResult, body_collision};
pub use contact::{Contact, ContactOutcome, classify};
pub use game::{ActorView, Game, ObstacleView, Snapshot};
pub use physics::ContactTracker;
pub use score::Score;
pub use spawner::{ObstaclePair, PairId, Spawner};
pub use state::{Activation, GameEvent, GamePhase, Run};
pub use tick::tick;
