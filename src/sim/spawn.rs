//! Obstacle spawning
//!
//! A new planet appears at the right edge whenever more than one spawn
//! interval has passed since the previous one. Size, visual and height are
//! drawn from the supplied RNG so runs can be replayed from a seed.

use glam::Vec2;
use rand::Rng;

use super::state::{GameSession, Obstacle, Viewport};
use crate::assets::{AssetCatalog, AssetId, aspect_or_square};
use crate::consts::{OBSTACLE_MAX_SIZE, OBSTACLE_MIN_SIZE, PLANET_COUNT};

/// Geometry and visual chosen for a new obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedObstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub asset: AssetId,
}

/// True once strictly more than `interval_ms` has elapsed
#[inline]
pub fn spawn_ready(now_ms: f64, last_spawn_ms: f64, interval_ms: f64) -> bool {
    now_ms - last_spawn_ms > interval_ms
}

/// Roll a new obstacle if the spawn interval has elapsed
pub fn maybe_spawn<R: Rng>(
    now_ms: f64,
    last_spawn_ms: f64,
    interval_ms: f64,
    viewport: &Viewport,
    catalog: &dyn AssetCatalog,
    rng: &mut R,
) -> Option<SpawnedObstacle> {
    if !spawn_ready(now_ms, last_spawn_ms, interval_ms) {
        return None;
    }

    let width = rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
    let asset = AssetId::Planet(rng.random_range(1..=PLANET_COUNT));
    let height = width / aspect_or_square(catalog, asset);

    // Planets taller than the playfield hug the top edge
    let y_range = viewport.height - height;
    let y = if y_range > 0.0 {
        rng.random_range(0.0..y_range)
    } else {
        0.0
    };

    Some(SpawnedObstacle {
        pos: Vec2::new(viewport.width, y),
        size: Vec2::new(width, height),
        asset,
    })
}

/// Spawn into the session if due, resetting the spawn timestamp
///
/// Returns the new obstacle's id when one was spawned.
pub fn spawn_due(
    session: &mut GameSession,
    now_ms: f64,
    interval_ms: f64,
    catalog: &dyn AssetCatalog,
) -> Option<u32> {
    let spawned = maybe_spawn(
        now_ms,
        session.last_spawn_ms,
        interval_ms,
        &session.viewport,
        catalog,
        &mut session.rng,
    )?;

    let id = session.next_entity_id();
    log::debug!(
        "Spawned obstacle {} ({}) at y={:.1} size={:.1}x{:.1}",
        id,
        spawned.asset.file_name(),
        spawned.pos.y,
        spawned.size.x,
        spawned.size.y
    );
    session.obstacles.push(Obstacle {
        id,
        pos: spawned.pos,
        size: spawned.size,
        asset: spawned.asset,
    });
    session.last_spawn_ms = now_ms;
    Some(id)
}
