//! Collaborator-facing game handle
//!
//! [`Game`] owns the validated tuning and the current [`Run`]. Input and
//! frame pacing come in through `activate()` / `tick(dt)`; renderers read
//! phase, score and snapshots back out and never touch simulation state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::Aabb;
use super::spawner::{ObstaclePair, PairId};
use super::state::{Activation, GameEvent, GamePhase, Run};
use crate::tuning::{Tuning, TuningError};

/// Actor state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// One obstacle pair for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: PairId,
    pub x: f32,
    pub gap_center: f32,
    pub lower: Aabb,
    pub upper: Aabb,
    /// `None` once scored
    pub gap: Option<Aabb>,
}

impl From<&ObstaclePair> for ObstacleView {
    fn from(pair: &ObstaclePair) -> Self {
        Self {
            id: pair.id,
            x: pair.x,
            gap_center: pair.gap_center,
            lower: pair.lower.bounds(),
            upper: pair.upper.bounds(),
            gap: pair.gap.as_ref().map(|g| g.bounds()),
        }
    }
}

/// Owned, serializable view of a whole frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub generation: u64,
    pub time: f32,
    pub actor: ActorView,
    pub ground: Aabb,
    pub obstacles: Vec<ObstacleView>,
}

/// The game: tuning plus the current run
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    run: Run,
}

impl Game {
    /// Validate the tuning and create an Idle run seeded from OS entropy
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(tuning, rng)
    }

    /// Same as [`Game::new`] with reproducible obstacle placement
    pub fn with_seed(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, rng: Pcg32) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!(
            "game ready: playfield {}x{}, spawn every {}s",
            tuning.playfield_width,
            tuning.playfield_height,
            tuning.spawn_period
        );
        Ok(Self::assemble(tuning, rng))
    }

    /// Build the first run; `tuning` must already be valid
    fn assemble(tuning: Tuning, rng: Pcg32) -> Self {
        let mut run = Run::new(&tuning, rng, 0);
        run.push_event(GameEvent::Reset { generation: 0 });
        Self { tuning, run }
    }

    /// One discrete player intent: start, jump, or reset depending on phase
    pub fn activate(&mut self) {
        if self.run.activate(&self.tuning) == Activation::ResetRequested {
            self.reset();
        }
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, dt: f32) {
        super::tick::tick(&mut self.run, &self.tuning, dt);
    }

    /// Discard the current run and swap in a fresh Idle one
    fn reset(&mut self) {
        let generation = self.run.generation + 1;
        let rng = self.run.spawner.fork_rng();
        let mut fresh = Run::new(&self.tuning, rng, generation);
        fresh.push_event(GameEvent::Reset { generation });
        log::info!(
            "reset: run {} (score {}) replaced by run {}",
            self.run.generation,
            self.run.score.value(),
            generation
        );
        self.run = fresh;
    }

    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    pub fn score(&self) -> u32 {
        self.run.score.value()
    }

    /// Number of resets so far; changes whenever the run is replaced
    pub fn generation(&self) -> u64 {
        self.run.generation
    }

    pub fn actor_position(&self) -> Vec2 {
        self.run.actor.pos
    }

    pub fn obstacle_list(&self) -> &[ObstaclePair] {
        &self.run.pairs
    }

    pub fn ground_bounds(&self) -> Aabb {
        self.run.ground.bounds()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only access to the current run
    pub fn run(&self) -> &Run {
        &self.run
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.run.drain_events()
    }

    pub fn snapshot(&self) -> Snapshot {
        let actor = &self.run.actor;
        Snapshot {
            phase: self.run.phase,
            score: self.run.score.value(),
            generation: self.run.generation,
            time: self.run.time,
            actor: ActorView {
                pos: actor.pos,
                vel: actor.vel,
                radius: self.tuning.actor_radius,
            },
            ground: self.ground_bounds(),
            obstacles: self.run.pairs.iter().map(ObstacleView::from).collect(),
        }
    }
}

impl Default for Game {
    /// Built-in tuning, entropy-seeded
    fn default() -> Self {
        Self::assemble(Tuning::default(), Pcg32::from_rng(&mut rand::rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyId, Category};
    use crate::sim::contact::Contact;
    use proptest::prelude::*;

    fn game() -> Game {
        Game::with_seed(Tuning::default(), 2024).unwrap()
    }

    /// Keep the actor clear of everything while time passes
    fn hover(game: &mut Game, seconds: f32) {
        for _ in 0..(seconds * 60.0).round() as u32 {
            game.run.actor.pos = Vec2::new(-1000.0, 0.0);
            game.run.actor.vel = Vec2::ZERO;
            game.tick(1.0 / 60.0);
        }
    }

    fn synthetic_lethal() -> Contact {
        Contact {
            a: BodyId(1),
            a_category: Category::Actor,
            b: BodyId(2),
            b_category: Category::Ground,
        }
    }

    #[test]
    fn test_construction_is_validated() {
        let bad = Tuning {
            gap_height: -5.0,
            ..Default::default()
        };
        assert!(Game::new(bad.clone()).is_err());
        assert!(Game::with_seed(bad, 1).is_err());
        assert!(Game::new(Tuning::default()).is_ok());
        assert_eq!(Game::default().phase(), GamePhase::Idle);
    }

    #[test]
    fn test_scenario_start_die_reset() {
        let mut game = game();
        game.activate();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);

        game.run.resolve_contact(&synthetic_lethal());
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.score(), 0);

        game.activate();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.obstacle_list().len(), 0);
    }

    #[test]
    fn test_scenario_spawn_schedule() {
        let mut game = game();
        game.activate();
        let before = game.obstacle_list().len();

        hover(&mut game, 2.5);
        assert_eq!(game.obstacle_list().len(), before + 1);

        hover(&mut game, 2.5);
        assert_eq!(game.obstacle_list().len(), before + 2);
        let range = game.tuning().gap_range;
        for pair in game.obstacle_list() {
            assert!(pair.gap_center >= -range && pair.gap_center <= range);
        }
        assert_ne!(game.obstacle_list()[0].id, game.obstacle_list()[1].id);
    }

    #[test]
    fn test_reset_builds_fresh_run() {
        let mut game = game();
        game.activate();
        hover(&mut game, 3.0);
        // Score a point through the live gap
        let gap = game.obstacle_list()[0].gap.as_ref().map(|g| g.id).unwrap();
        game.run.scoring_contact(gap);
        assert_eq!(game.score(), 1);
        game.run.lethal_contact();
        let old_generation = game.generation();
        let old_time = game.run().time;

        game.activate();
        let tuning = game.tuning().clone();
        assert_eq!(game.generation(), old_generation + 1);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert!(game.obstacle_list().is_empty());
        assert_eq!(
            game.actor_position(),
            Vec2::new(tuning.actor_start_x, tuning.actor_start_y)
        );
        assert!(!game.run().actor.dynamic);
        assert_eq!(game.run().time, 0.0);
        assert!(old_time > 0.0);
        assert!(!game.run().spawner.is_active());
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Reset {
                generation: old_generation + 1
            }]
        );
    }

    #[test]
    fn test_reset_then_play_again() {
        let mut game = game();
        game.activate();
        game.run.lethal_contact();
        game.activate();
        game.activate();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.run().actor.vel.y, game.tuning().jump_velocity);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut game = game();
        game.activate();
        hover(&mut game, 2.6);
        let snap = game.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.ground, game.ground_bounds());
        assert_eq!(snap.actor.pos, game.actor_position());
        assert!(snap.obstacles[0].gap.is_some());

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["obstacles"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_events_across_a_run() {
        let mut game = game();
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Reset { generation: 0 }]
        );
        game.activate();
        hover(&mut game, 2.5);
        game.run.lethal_contact();
        let events = game.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert_eq!(events[1], GameEvent::Jumped);
        assert!(matches!(events[2], GameEvent::PairSpawned { .. }));
        assert_eq!(events[3], GameEvent::GameOver { score: 0 });
        assert!(game.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn idle_actor_stays_frozen(dts in proptest::collection::vec(-0.5f32..0.5, 0..64)) {
            let mut game = game();
            let start = game.actor_position();
            for dt in dts {
                game.tick(dt);
            }
            prop_assert_eq!(game.phase(), GamePhase::Idle);
            prop_assert_eq!(game.actor_position(), start);
            prop_assert_eq!(game.run().actor.vel, Vec2::ZERO);
        }

        #[test]
        fn score_never_decreases(taps in proptest::collection::vec(0u8..4, 1..200)) {
            let mut game = game();
            let mut last_score = 0;
            let mut last_generation = 0;
            for tap in taps {
                if tap == 0 {
                    game.activate();
                }
                game.tick(1.0 / 30.0);
                if game.generation() != last_generation {
                    last_generation = game.generation();
                    last_score = 0;
                }
                prop_assert!(game.score() >= last_score);
                last_score = game.score();
            }
        }
    }
}
