//! Run state and the phase machine
//!
//! A [`Run`] is one play-through. It owns every body in the simulation and is
//! the only place phase and score change.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Category};
use super::contact::{Contact, ContactOutcome};
use super::physics::{self, ContactTracker};
use super::score::Score;
use super::spawner::{ObstaclePair, PairId, Spawner};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actor frozen, waiting for the first activation
    Idle,
    /// Active gameplay
    Running,
    /// Everything frozen in place until the next activation resets
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Lifecycle notifications for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run replaced the previous one
    Reset { generation: u64 },
    Started,
    Jumped,
    Scored { score: u32 },
    GameOver { score: u32 },
    PairSpawned { pair: PairId, gap_center: f32 },
    PairDespawned { pair: PairId },
}

/// Pending events kept when nobody drains them (oldest dropped first)
pub const MAX_PENDING_EVENTS: usize = 256;

/// What an activation did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    Jumped,
    /// The run is over; the owner must replace it with a fresh one
    ResetRequested,
}

/// One play-through
#[derive(Debug, Clone)]
pub struct Run {
    /// How many resets produced this run (0 for the first)
    pub generation: u64,
    pub phase: GamePhase,
    pub score: Score,
    /// Simulated seconds since the run was created
    pub time: f32,
    pub actor: Body,
    pub ground: Body,
    /// Live obstacle pairs, oldest first
    pub pairs: Vec<ObstaclePair>,
    pub spawner: Spawner,
    contacts: ContactTracker,
    events: Vec<GameEvent>,
    next_id: u32,
    next_pair_id: u32,
}

impl Run {
    /// Create a run in the Idle phase with a frozen actor and no obstacles
    pub fn new(tuning: &Tuning, rng: Pcg32, generation: u64) -> Self {
        let mut next_id = 1;
        let mut alloc = || {
            let id = BodyId(next_id);
            next_id += 1;
            id
        };

        let actor = Body::actor(
            alloc(),
            Vec2::new(tuning.actor_start_x, tuning.actor_start_y),
            tuning.actor_radius,
        );
        let ground = Body::fixed_rect(
            alloc(),
            Category::Ground,
            Vec2::new(0.0, tuning.ground_y()),
            Vec2::new(tuning.playfield_width * 2.0, tuning.ground_height),
        );

        Self {
            generation,
            phase: GamePhase::Idle,
            score: Score::new(),
            time: 0.0,
            actor,
            ground,
            pairs: Vec::new(),
            spawner: Spawner::new(rng),
            contacts: ContactTracker::new(),
            events: Vec::new(),
            next_id,
            next_pair_id: 1,
        }
    }

    /// Allocate a new body ID
    pub fn next_entity_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    fn next_pair(&mut self) -> PairId {
        let id = PairId(self.next_pair_id);
        self.next_pair_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Dispatch one activation signal by phase
    pub fn activate(&mut self, tuning: &Tuning) -> Activation {
        match self.phase {
            GamePhase::Idle => {
                self.actor.dynamic = true;
                self.spawner.start();
                self.phase = GamePhase::Running;
                self.push_event(GameEvent::Started);
                log::info!("run {} started", self.generation);
                self.jump(tuning);
                Activation::Started
            }
            GamePhase::Running => {
                self.jump(tuning);
                Activation::Jumped
            }
            GamePhase::GameOver => Activation::ResetRequested,
        }
    }

    /// Zero vertical velocity, then apply the fixed upward impulse
    fn jump(&mut self, tuning: &Tuning) {
        self.actor.vel.y = 0.0;
        self.actor.vel.y += tuning.jump_velocity;
        self.push_event(GameEvent::Jumped);
    }

    /// Freeze everything in place. Ignored unless Running.
    pub fn lethal_contact(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.spawner.stop();
        physics::halt(&mut self.actor);
        let score = self.score.value();
        self.push_event(GameEvent::GameOver { score });
        log::info!(
            "run {} over: score {} after {:.2}s",
            self.generation,
            score,
            self.time
        );
        true
    }

    /// Consume a score gap and award a point. Ignored unless Running or if
    /// the gap is already gone.
    pub fn scoring_contact(&mut self, gap: BodyId) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let removed = self.pairs.iter_mut().any(|p| p.remove_gap(gap));
        if !removed {
            return false;
        }
        let score = self.score.increment();
        self.push_event(GameEvent::Scored { score });
        log::debug!("scored through gap {:?}: {}", gap, score);
        true
    }

    /// Apply a classified contact. Outcomes arriving outside Running are dropped.
    pub fn resolve_contact(&mut self, contact: &Contact) -> ContactOutcome {
        if self.phase != GamePhase::Running {
            return ContactOutcome::Ignored;
        }
        match contact.outcome() {
            ContactOutcome::Lethal => {
                self.lethal_contact();
                ContactOutcome::Lethal
            }
            ContactOutcome::Scoring => match contact.body_of(Category::ScoreGap) {
                Some(gap) if self.scoring_contact(gap) => ContactOutcome::Scoring,
                _ => ContactOutcome::Ignored,
            },
            ContactOutcome::Ignored => ContactOutcome::Ignored,
        }
    }

    /// Create one obstacle pair at the right edge with a random gap center
    pub fn spawn_pair(&mut self, tuning: &Tuning) -> PairId {
        let gap_center = self.spawner.draw_gap_center(tuning.gap_range);
        let id = self.next_pair();
        let body_ids = [
            self.next_entity_id(),
            self.next_entity_id(),
            self.next_entity_id(),
        ];
        self.pairs
            .push(ObstaclePair::new(id, body_ids, gap_center, self.time, tuning));
        self.push_event(GameEvent::PairSpawned {
            pair: id,
            gap_center,
        });
        log::debug!("spawned pair {:?} gap center {:.1}", id, gap_center);
        id
    }

    /// Scroll every pair and drop the ones that finished crossing
    pub(crate) fn scroll_pairs(&mut self, tuning: &Tuning, dt: f32) {
        for pair in &mut self.pairs {
            pair.scroll(dt, tuning);
        }
        let mut finished = Vec::new();
        self.pairs.retain(|p| {
            let done = p.is_finished(tuning);
            if done {
                finished.push(p.id);
            }
            !done
        });
        for pair in finished {
            log::debug!("despawned pair {:?}", pair);
            self.push_event(GameEvent::PairDespawned { pair });
        }
    }

    /// Begin-overlap contacts across every body, ordered by body id
    pub(crate) fn detect_contacts(&mut self) -> Vec<Contact> {
        let mut bodies: Vec<&Body> = Vec::with_capacity(2 + self.pairs.len() * 3);
        bodies.push(&self.actor);
        bodies.push(&self.ground);
        for pair in &self.pairs {
            bodies.extend(pair.bodies());
        }
        self.contacts.detect(&bodies)
    }

    /// Push the actor out of whatever it is blocked by
    pub(crate) fn resolve_blocking(&mut self) {
        let others =
            std::iter::once(&self.ground).chain(self.pairs.iter().flat_map(|p| p.bodies()));
        physics::resolve_blocking(&mut self.actor, others);
    }

    /// Look up a live pair
    pub fn pair(&self, id: PairId) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Find the live sensor body with this id
    pub fn gap_body(&self, id: BodyId) -> Option<&Body> {
        self.pairs
            .iter()
            .filter_map(|p| p.gap.as_ref())
            .find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run() -> (Run, Tuning) {
        let tuning = Tuning::default();
        (Run::new(&tuning, Pcg32::seed_from_u64(7), 0), tuning)
    }

    fn synthetic(a: Category, b: Category, b_id: BodyId) -> Contact {
        Contact {
            a: BodyId(1),
            a_category: a,
            b: b_id,
            b_category: b,
        }
    }

    #[test]
    fn test_new_run_is_idle_and_frozen() {
        let (run, tuning) = run();
        assert_eq!(run.phase, GamePhase::Idle);
        assert_eq!(run.score.value(), 0);
        assert!(!run.actor.dynamic);
        assert_eq!(run.actor.vel, Vec2::ZERO);
        assert_eq!(run.actor.pos, Vec2::new(tuning.actor_start_x, tuning.actor_start_y));
        assert!(run.pairs.is_empty());
        assert!(!run.spawner.is_active());
        assert_ne!(run.actor.id, run.ground.id);
    }

    #[test]
    fn test_ground_spans_playfield() {
        let (run, tuning) = run();
        let bounds = run.ground.bounds();
        assert!(bounds.min.x <= -tuning.playfield_width / 2.0);
        assert!(bounds.max.x >= tuning.playfield_width / 2.0);
        assert_eq!(bounds.min.y, -tuning.playfield_height / 2.0);
    }

    #[test]
    fn test_activate_from_idle_starts_and_jumps() {
        let (mut run, tuning) = run();
        assert_eq!(run.activate(&tuning), Activation::Started);
        assert_eq!(run.phase, GamePhase::Running);
        assert!(run.actor.dynamic);
        assert!(run.spawner.is_active());
        assert_eq!(run.actor.vel.y, tuning.jump_velocity);
        assert_eq!(
            run.drain_events(),
            vec![GameEvent::Started, GameEvent::Jumped]
        );
    }

    #[test]
    fn test_jump_zeroes_vertical_velocity_first() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        for vy in [-750.0, -1.0, 0.0, 300.0] {
            run.actor.vel.y = vy;
            assert_eq!(run.activate(&tuning), Activation::Jumped);
            assert_eq!(run.actor.vel.y, tuning.jump_velocity);
        }
    }

    #[test]
    fn test_lethal_only_while_running() {
        let (mut run, tuning) = run();
        let hit = synthetic(Category::Actor, Category::Obstacle, BodyId(50));

        // Idle: ignored
        assert_eq!(run.resolve_contact(&hit), ContactOutcome::Ignored);
        assert_eq!(run.phase, GamePhase::Idle);

        run.activate(&tuning);
        run.spawn_pair(&tuning);
        run.actor.vel = Vec2::new(0.0, -200.0);
        assert_eq!(run.resolve_contact(&hit), ContactOutcome::Lethal);
        assert_eq!(run.phase, GamePhase::GameOver);
        assert!(!run.spawner.is_active());
        assert_eq!(run.actor.vel, Vec2::ZERO);
        assert!(!run.actor.dynamic);

        // Late contact after the freeze is discarded
        assert_eq!(run.resolve_contact(&hit), ContactOutcome::Ignored);
        assert!(!run.lethal_contact());
        let over = run
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(over, 1);
    }

    #[test]
    fn test_activate_in_game_over_requests_reset() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        run.lethal_contact();
        assert_eq!(run.activate(&tuning), Activation::ResetRequested);
        assert_eq!(run.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_scoring_removes_gap_once() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        let pair = run.spawn_pair(&tuning);
        let gap_id = run.pair(pair).and_then(|p| p.gap.as_ref()).map(|g| g.id).unwrap();
        let contact = synthetic(Category::Actor, Category::ScoreGap, gap_id);

        assert_eq!(run.resolve_contact(&contact), ContactOutcome::Scoring);
        assert_eq!(run.score.value(), 1);
        assert!(run.gap_body(gap_id).is_none());
        assert!(run.pair(pair).is_some(), "obstacles stay after scoring");

        assert_eq!(run.resolve_contact(&contact), ContactOutcome::Ignored);
        assert_eq!(run.score.value(), 1);
    }

    #[test]
    fn test_scoring_ignored_outside_running() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        let pair = run.spawn_pair(&tuning);
        let gap_id = run.pair(pair).and_then(|p| p.gap.as_ref()).map(|g| g.id).unwrap();
        run.lethal_contact();

        let contact = synthetic(Category::ScoreGap, Category::Actor, gap_id);
        assert_eq!(run.resolve_contact(&contact), ContactOutcome::Ignored);
        assert_eq!(run.score.value(), 0);
        assert!(run.gap_body(gap_id).is_some());
    }

    #[test]
    fn test_ignored_pairs_are_no_ops() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        let contact = Contact {
            a: BodyId(10),
            a_category: Category::Obstacle,
            b: BodyId(12),
            b_category: Category::ScoreGap,
        };
        assert_eq!(run.resolve_contact(&contact), ContactOutcome::Ignored);
        assert_eq!(run.phase, GamePhase::Running);
        assert_eq!(run.score.value(), 0);
    }

    #[test]
    fn test_spawn_allocates_unique_ids() {
        let (mut run, tuning) = run();
        let a = run.spawn_pair(&tuning);
        let b = run.spawn_pair(&tuning);
        assert_ne!(a, b);
        let mut ids: Vec<BodyId> = run
            .pairs
            .iter()
            .flat_map(|p| p.bodies().map(|b| b.id))
            .chain([run.actor.id, run.ground.id])
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 8);
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let (mut run, tuning) = run();
        run.activate(&tuning);
        for _ in 0..(MAX_PENDING_EVENTS * 2) {
            run.activate(&tuning);
        }
        assert_eq!(run.pending_events().len(), MAX_PENDING_EVENTS);
    }
}
