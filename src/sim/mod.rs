//! Simulation module
//!
//! All gameplay logic lives here:
//! - Wall-clock timing only (no frame counting)
//! - Seeded RNG only
//! - Obstacles iterated in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::{format_speed, speed};
pub use spawn::{SpawnedObstacle, maybe_spawn, spawn_due, spawn_ready};
pub use state::{GameEvent, GamePhase, GameSession, Obstacle, Player, Viewport};
pub use tick::{AdvanceOutcome, TickContext, advance, apply_command, enter_game_over, restart, tick};
