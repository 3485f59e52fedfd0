//! Game state and core simulation types
//!
//! A `GameSession` is one attempt: player, live obstacles, score and phase.
//! Restarting throws the whole session away and builds a new one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::assets::{AssetCatalog, AssetId};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (a new session starts here)
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Side effects the host must act on, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An obstacle left the screen and scored a point
    Scored,
    /// The player touched an obstacle
    Hit,
    /// The run just ended
    GameOver,
    /// Start background music from the beginning
    StartMusic,
    /// Halt background music
    StopMusic,
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Playfield carved out of a window by a fractional scale
    pub fn from_window(window_width: f32, window_height: f32, scale: (f32, f32)) -> Self {
        Self::new(window_width * scale.0, window_height * scale.1)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (x never changes)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_DEFAULT_HEIGHT),
        }
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Highest allowed y for this viewport
    pub fn max_y(&self, viewport: &Viewport) -> f32 {
        (viewport.height - self.size.y).max(0.0)
    }

    /// Pull y back inside `[0, viewport.height - height]`
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        self.pos.y = self.pos.y.clamp(0.0, self.max_y(viewport));
    }

    /// Move vertically by `dy`, clamped to the viewport
    pub fn shift(&mut self, dy: f32, viewport: &Viewport) {
        self.pos.y += dy;
        self.clamp_to(viewport);
    }

    /// Match the rocket sprite's proportions once its size is known
    pub fn fit_sprite(&mut self, catalog: &dyn AssetCatalog, viewport: &Viewport) {
        match catalog.aspect_ratio(AssetId::Rocket) {
            Some(aspect) if aspect.is_finite() && aspect > 0.0 => {
                self.size = Vec2::new(PLAYER_WIDTH, PLAYER_WIDTH / aspect);
                self.clamp_to(viewport);
            }
            // Keep the placeholder square until the sprite loads
            _ => {}
        }
    }
}

/// A planet drifting toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner (y fixed at spawn)
    pub pos: Vec2,
    pub size: Vec2,
    pub asset: AssetId,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True once the trailing edge has crossed the left border
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// One game attempt
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Obstacles passed (only ever increases)
    pub score: u32,
    pub phase: GamePhase,
    /// Timestamp (ms) of the most recent spawn
    pub last_spawn_ms: f64,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub viewport: Viewport,
    /// Pending side effects, drained by the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create a session; it is playing immediately
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Playing,
            last_spawn_ms: 0.0,
            player: Player::default(),
            obstacles: Vec::new(),
            viewport,
            events: Vec::new(),
            next_id: 1,
        };
        session.player.clamp_to(&session.viewport);
        session.events.push(GameEvent::StartMusic);
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Restart button/prompt is only offered after a run ends
    pub fn restart_visible(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Adopt new viewport dimensions, keeping the player on screen
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.clamp_to(&self.viewport);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
