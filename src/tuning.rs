//! Game balance and playfield geometry
//!
//! Every constant the simulation reads comes through [`Tuning`]. Defaults match
//! [`crate::consts`]; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning is refused at construction time
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("spawn period {period} is shorter than one physics step ({min})")]
    PeriodTooShort { period: f32, min: f32 },
    #[error("gap range {range} plus half gap {half_gap} reaches the ground or ceiling (limit {limit})")]
    GapTooLarge {
        range: f32,
        half_gap: f32,
        limit: f32,
    },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    /// Downward acceleration magnitude
    pub gravity: f32,
    /// Vertical velocity after an activation (pre-existing vy is discarded)
    pub jump_velocity: f32,

    pub actor_radius: f32,
    pub actor_start_x: f32,
    pub actor_start_y: f32,

    pub ground_height: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub gap_height: f32,
    /// Half-width of the uniform range the gap center is drawn from
    pub gap_range: f32,
    pub sensor_width: f32,

    pub spawn_period: f32,
    pub spawn_margin: f32,
    pub scroll_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            actor_radius: ACTOR_RADIUS,
            actor_start_x: ACTOR_START_X,
            actor_start_y: ACTOR_START_Y,

            ground_height: GROUND_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            gap_height: GAP_HEIGHT,
            gap_range: GAP_RANGE,
            sensor_width: SENSOR_WIDTH,

            spawn_period: SPAWN_PERIOD,
            spawn_margin: SPAWN_MARGIN,
            scroll_duration: SCROLL_DURATION,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field once; the simulation assumes a validated tuning
    pub fn validate(&self) -> Result<(), TuningError> {
        let all = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("actor_radius", self.actor_radius),
            ("actor_start_x", self.actor_start_x),
            ("actor_start_y", self.actor_start_y),
            ("ground_height", self.ground_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_height", self.gap_height),
            ("gap_range", self.gap_range),
            ("sensor_width", self.sensor_width),
            ("spawn_period", self.spawn_period),
            ("spawn_margin", self.spawn_margin),
            ("scroll_duration", self.scroll_duration),
        ];
        if let Some(&(field, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite { field });
        }

        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("actor_radius", self.actor_radius),
            ("ground_height", self.ground_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_height", self.gap_height),
            ("sensor_width", self.sensor_width),
            ("spawn_period", self.spawn_period),
            ("scroll_duration", self.scroll_duration),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(TuningError::NonPositive { field, value });
        }

        // At most one spawn per micro-step
        if self.spawn_period < FIXED_DT {
            return Err(TuningError::PeriodTooShort {
                period: self.spawn_period,
                min: FIXED_DT,
            });
        }

        // Zero range is allowed (fixed gap); negative is not
        if self.gap_range < 0.0 {
            return Err(TuningError::NonPositive {
                field: "gap_range",
                value: self.gap_range,
            });
        }

        let limit = self.playfield_height / 2.0 - self.ground_height;
        let half_gap = self.gap_height / 2.0;
        if self.gap_range + half_gap >= limit {
            return Err(TuningError::GapTooLarge {
                range: self.gap_range,
                half_gap,
                limit,
            });
        }

        Ok(())
    }

    /// X where new pairs appear
    pub fn spawn_x(&self) -> f32 {
        self.playfield_width / 2.0 + self.spawn_margin
    }

    /// Total leftward travel of a pair over its lifetime
    pub fn scroll_distance(&self) -> f32 {
        self.playfield_width + 2.0 * self.spawn_margin
    }

    /// Constant leftward speed of every pair
    pub fn scroll_speed(&self) -> f32 {
        self.scroll_distance() / self.scroll_duration
    }

    /// X at which a pair has finished its scroll and is removed
    pub fn trailing_edge(&self) -> f32 {
        self.spawn_x() - self.scroll_distance()
    }

    /// Y of the ground strip's center
    pub fn ground_y(&self) -> f32 {
        -self.playfield_height / 2.0 + self.ground_height / 2.0
    }
}
