//! Frame tick
//!
//! Clamps the frame delta, splits it into fixed micro-steps and runs each
//! step in a fixed order: integrate, scroll, detect, block, resolve, spawn.

use super::contact::ContactOutcome;
use super::state::{GamePhase, Run};
use crate::consts::{FIXED_DT, MAX_DT};
use crate::tuning::Tuning;

/// Advance the run by one frame of `dt` seconds
pub fn tick(run: &mut Run, tuning: &Tuning, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    // Clamp dt to prevent large jumps
    let clamped_dt = dt.min(MAX_DT);

    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        // Nothing moves after game over; the frozen scene waits for a reset
        if run.phase == GamePhase::GameOver {
            return;
        }
        let step_dt = remaining_dt.min(FIXED_DT);
        remaining_dt -= step_dt;
        step(run, tuning, step_dt);
    }
}

/// One fixed micro-step
pub fn step(run: &mut Run, tuning: &Tuning, dt: f32) {
    run.time += dt;

    // 1. Integrate dynamic bodies (the actor, once unfrozen)
    super::physics::integrate(&mut run.actor, tuning.gravity, dt);

    // 2. Scroll obstacles and drop the ones past the trailing edge
    if run.phase == GamePhase::Running {
        run.scroll_pairs(tuning, dt);
    }

    // 3. Detect new overlaps, then 4. push the actor out of blockers
    let contacts = run.detect_contacts();
    run.resolve_blocking();

    // 5. Resolve in body-id order; the first lethal contact ends the run
    for contact in &contacts {
        if run.resolve_contact(contact) == ContactOutcome::Lethal {
            break;
        }
    }

    // 6. Spawn countdown (stopped by a lethal contact above)
    if run.phase == GamePhase::Running {
        let due = run.spawner.advance(dt, tuning.spawn_period);
        for _ in 0..due {
            run.spawn_pair(tuning);
        }
    }
}
