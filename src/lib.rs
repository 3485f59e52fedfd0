//! Star Dodger - steer a rocket through a field of drifting planets
//!
//! Core modules:
//! - `sim`: Simulation (spawning, difficulty, movement, collisions, game phase)
//! - `assets`: Asset identities and intrinsic-size lookup
//! - `audio`: Fire-and-forget sound effects and background music
//! - `renderer`: Per-frame draw command lists for the host surface
//! - `platform`: Host collaborator contracts (clock, viewport, surface)
//! - `input`: Discrete player commands
//! - `settings`: JSON-backed configuration
//! - `game`: Host driver tying the session to its collaborators

pub mod assets;
pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Milliseconds between obstacle spawns (fixed, not scaled by score)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Scroll speed at score 0 (pixels per tick)
    pub const BASE_SPEED: f32 = 20.0;
    /// Speed added every `SPEED_STEP_SCORE` points
    pub const SPEED_INCREMENT: f32 = 0.5;
    pub const SPEED_STEP_SCORE: u32 = 5;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    /// Height used until the rocket sprite reports its size
    pub const PLAYER_DEFAULT_HEIGHT: f32 = 60.0;
    /// Vertical distance covered by one move command
    pub const PLAYER_STEP: f32 = 30.0;

    /// Obstacle base size range `[MIN, MAX)`
    pub const OBSTACLE_MIN_SIZE: f32 = 60.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 100.0;

    /// Number of planet visuals in the obstacle pool
    pub const PLANET_COUNT: u8 = 11;
}
