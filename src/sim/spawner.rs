//! Obstacle pairs and the repeating spawn countdown
//!
//! A pair is two blocking rectangles with a scoring sensor between them. It
//! scrolls left at a constant speed from just past the right edge and is
//! removed once it has crossed the playfield, scored or not.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Category};
use crate::tuning::Tuning;

/// Float slack for timer thresholds, so 2.5 s of 1/120 s steps fires at 2.5 s
pub const TIME_EPSILON: f32 = 1e-4;

/// Upper bound on spawns reported by a single [`Spawner::advance`]
pub const MAX_SPAWNS_PER_ADVANCE: u32 = 4;

/// Run-unique obstacle pair identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(pub u32);

/// One spawned unit: lower and upper obstacle plus the gap sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: PairId,
    /// Run time (seconds) at which the pair appeared
    pub spawned_at: f32,
    /// Current horizontal position of the pair's center line
    pub x: f32,
    /// Vertical center of the gap, fixed at spawn
    pub gap_center: f32,
    pub lower: Body,
    pub upper: Body,
    /// `None` once the sensor has been consumed by a scoring contact
    pub gap: Option<Body>,
    /// Seconds of scroll completed
    pub scrolled: f32,
}

impl ObstaclePair {
    /// Build a pair at the right edge with its gap centered on `gap_center`
    pub fn new(
        id: PairId,
        body_ids: [BodyId; 3],
        gap_center: f32,
        spawned_at: f32,
        tuning: &Tuning,
    ) -> Self {
        let x = tuning.spawn_x();
        let obstacle_size = Vec2::new(tuning.obstacle_width, tuning.obstacle_height);
        let offset = tuning.gap_height / 2.0 + tuning.obstacle_height / 2.0;
        let [lower_id, upper_id, gap_id] = body_ids;

        Self {
            id,
            spawned_at,
            x,
            gap_center,
            lower: Body::fixed_rect(
                lower_id,
                Category::Obstacle,
                Vec2::new(x, gap_center - offset),
                obstacle_size,
            ),
            upper: Body::fixed_rect(
                upper_id,
                Category::Obstacle,
                Vec2::new(x, gap_center + offset),
                obstacle_size,
            ),
            gap: Some(Body::fixed_rect(
                gap_id,
                Category::ScoreGap,
                Vec2::new(x, gap_center),
                Vec2::new(tuning.sensor_width, tuning.gap_height),
            )),
            scrolled: 0.0,
        }
    }

    /// All bodies still in the simulation
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        [&self.lower, &self.upper]
            .into_iter()
            .chain(self.gap.as_ref())
    }

    /// Advance the scroll; position is a pure function of elapsed scroll time
    pub fn scroll(&mut self, dt: f32, tuning: &Tuning) {
        self.scrolled = (self.scrolled + dt).min(tuning.scroll_duration);
        self.x = tuning.spawn_x() - tuning.scroll_speed() * self.scrolled;
        self.lower.pos.x = self.x;
        self.upper.pos.x = self.x;
        if let Some(gap) = &mut self.gap {
            gap.pos.x = self.x;
        }
    }

    /// Whether the pair has crossed the trailing edge
    pub fn is_finished(&self, tuning: &Tuning) -> bool {
        self.scrolled + TIME_EPSILON >= tuning.scroll_duration
    }

    /// Take the sensor out of the simulation. Returns false if it was already gone
    /// or belongs to another pair.
    pub fn remove_gap(&mut self, id: BodyId) -> bool {
        match &self.gap {
            Some(gap) if gap.id == id => {
                self.gap = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating spawn countdown plus the placement RNG
#[derive(Debug, Clone)]
pub struct Spawner {
    elapsed: f32,
    active: bool,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            elapsed: 0.0,
            active: false,
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Begin counting; the first pair is due one full period from now
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Halt the countdown in place
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds accumulated toward the next spawn
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate `dt` and return how many spawns came due. Overshoot carries
    /// into the next period; anything past [`MAX_SPAWNS_PER_ADVANCE`] is
    /// dropped.
    pub fn advance(&mut self, dt: f32, period: f32) -> u32 {
        if !self.active || period.is_nan() || period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed + TIME_EPSILON >= period {
            if due == MAX_SPAWNS_PER_ADVANCE {
                self.elapsed = self.elapsed.rem_euclid(period);
                break;
            }
            self.elapsed -= period;
            due += 1;
        }
        due
    }

    /// Uniform draw from `[-range, range]`
    pub fn draw_gap_center(&mut self, range: f32) -> f32 {
        if range <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-range..=range)
    }

    /// Derive an independent generator for the next run
    pub fn fork_rng(&mut self) -> Pcg32 {
        Pcg32::from_rng(&mut self.rng)
    }
}
