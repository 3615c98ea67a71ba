//! Bomb entity and its lifecycle state machine
//!
//! A bomb is plain data owned by the round. It never reaches outward: every
//! observable effect is returned to the caller as a [`BombEvent`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::{fall_velocity, sanitize_dt};

/// Round-unique bomb identifier (what a pointer event resolves to)
pub type BombId = u32;

/// Lifecycle state of a bomb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BombState {
    /// Moving and clickable
    Falling,
    /// Clicked; shrinking away for `remaining` seconds
    Caught { remaining: f32 },
    /// Hit the floor (or forced at game over); exploding for `remaining` seconds
    Exploding { remaining: f32 },
    /// Terminal animation done, ready to be discarded
    Removed,
}

impl BombState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BombState::Caught { .. } | BombState::Exploding { .. })
    }
}

/// Signal raised by a single bomb transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombEvent {
    Caught,
    FloorHit,
    Finished,
}

/// Horizontal walls and floor a falling bomb collides with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub floor_y: f32,
}

impl Bounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            min_x: config.bomb_half_width,
            max_x: config.canvas_width - config.bomb_half_width,
            floor_y: config.floor_y,
        }
    }
}

/// A falling bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: BombId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual spin (radians), no gameplay effect
    pub rotation: f32,
    pub state: BombState,
}

impl Bomb {
    /// Create a bomb at `(x, y)` heading `angle_deg` away from straight down
    pub fn spawn(id: BombId, x: f32, y: f32, speed: f32, angle_deg: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            vel: fall_velocity(speed, angle_deg),
            rotation: 0.0,
            state: BombState::Falling,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.state == BombState::Falling
    }

    pub fn is_removed(&self) -> bool {
        self.state == BombState::Removed
    }

    /// Integrate motion for one step. Returns `FloorHit` the one time the
    /// bomb crosses the floor; the bomb is then `Exploding`.
    pub fn advance(
        &mut self,
        dt: f32,
        bounds: &Bounds,
        spin_speed: f32,
        explode_secs: f32,
    ) -> Option<BombEvent> {
        if !self.is_falling() {
            return None;
        }
        let dt = sanitize_dt(dt);

        self.pos += self.vel * dt;
        self.rotation += spin_speed * dt;

        // Mirror off the side walls; |vx| is unchanged
        if self.pos.x < bounds.min_x {
            self.pos.x = bounds.min_x;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > bounds.max_x {
            self.pos.x = bounds.max_x;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y >= bounds.floor_y {
            self.state = BombState::Exploding {
                remaining: explode_secs,
            };
            return Some(BombEvent::FloorHit);
        }
        None
    }

    /// Player click. Only a falling bomb can be caught.
    pub fn catch(&mut self, anim_secs: f32) -> Option<BombEvent> {
        if !self.is_falling() {
            return None;
        }
        self.state = BombState::Caught {
            remaining: anim_secs,
        };
        Some(BombEvent::Caught)
    }

    /// Force the explosion animation. Returns whether the bomb changed state.
    pub fn explode(&mut self, anim_secs: f32) -> bool {
        if !self.is_falling() {
            return false;
        }
        self.state = BombState::Exploding {
            remaining: anim_secs,
        };
        true
    }

    /// Count down a running terminal animation
    pub fn advance_animation(&mut self, dt: f32) -> Option<BombEvent> {
        let dt = sanitize_dt(dt);
        match &mut self.state {
            BombState::Caught { remaining } | BombState::Exploding { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.state = BombState::Removed;
                    Some(BombEvent::Finished)
                } else {
                    None
                }
            }
            BombState::Falling | BombState::Removed => None,
        }
    }

    /// Complete the terminal animation now (view reported it finished)
    pub fn finish(&mut self) -> Option<BombEvent> {
        if !self.state.is_terminal() {
            return None;
        }
        self.state = BombState::Removed;
        Some(BombEvent::Finished)
    }
}
