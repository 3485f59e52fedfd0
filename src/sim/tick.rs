//! Per-frame simulation tick
//!
//! The host calls `tick` once per display refresh with the current clock
//! reading. Timing is wall-clock based; nothing here counts frames.

use rand::RngCore;

use super::difficulty::speed;
use super::spawn::spawn_due;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::assets::AssetCatalog;
use crate::consts::{PLAYER_STEP, SPAWN_INTERVAL_MS};
use crate::input::Command;

/// Everything a tick needs besides the session itself
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    /// Minimum gap between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Intrinsic sizes for sprites
    pub catalog: &'a dyn AssetCatalog,
}

impl<'a> TickContext<'a> {
    pub fn new(catalog: &'a dyn AssetCatalog) -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            catalog,
        }
    }

    pub fn with_interval(mut self, spawn_interval_ms: f64) -> Self {
        self.spawn_interval_ms = spawn_interval_ms;
        self
    }
}

/// What one movement step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Obstacles that left the screen this step
    pub scored: u32,
    /// Player overlaps at least one remaining obstacle
    pub collided: bool,
}

/// Scroll obstacles left, retire the ones past the edge, test for hits
///
/// Only the obstacle list, score and event queue change here; the caller
/// decides what a collision means for the phase.
pub fn advance(session: &mut GameSession, speed: f32) -> AdvanceOutcome {
    for obs in &mut session.obstacles {
        obs.pos.x -= speed;
    }

    let before = session.obstacles.len();
    session.obstacles.retain(|obs| !obs.is_offscreen());
    let scored = (before - session.obstacles.len()) as u32;

    session.score += scored;
    for _ in 0..scored {
        session.events.push(GameEvent::Scored);
    }

    let player = session.player.aabb();
    let collided = session
        .obstacles
        .iter()
        .any(|obs| player.overlaps(&obs.aabb()));
    if collided {
        session.events.push(GameEvent::Hit);
    }

    AdvanceOutcome { scored, collided }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, now_ms: f64, ctx: &TickContext) {
    // Frozen until restart
    if session.phase == GamePhase::GameOver {
        return;
    }

    let viewport = session.viewport;
    session.player.fit_sprite(ctx.catalog, &viewport);

    spawn_due(session, now_ms, ctx.spawn_interval_ms, ctx.catalog);

    let outcome = advance(session, speed(session.score));
    if outcome.collided {
        enter_game_over(session);
    }
}

/// Transition into GameOver and queue its side effects
pub fn enter_game_over(session: &mut GameSession) {
    if session.phase == GamePhase::GameOver {
        return;
    }
    session.phase = GamePhase::GameOver;
    session.events.push(GameEvent::StopMusic);
    session.events.push(GameEvent::GameOver);
    log::info!("Game over: score {} (seed {})", session.score, session.seed);
}

/// Replace the session with a fresh one, keeping the viewport
///
/// Events still queued on the old session are kept ahead of the new
/// session's own.
pub fn restart(session: &mut GameSession, seed: u64) {
    let mut pending = session.drain_events();
    *session = GameSession::new(seed, session.viewport);
    pending.append(&mut session.events);
    session.events = pending;
    log::info!("Restarted with seed {}", seed);
}

/// Apply a player command immediately
///
/// Moves only apply while playing; restart only from GameOver.
/// Returns whether the command changed anything.
pub fn apply_command(session: &mut GameSession, command: Command) -> bool {
    match (command, session.phase) {
        (Command::MoveUp, GamePhase::Playing) => {
            let before = session.player.pos.y;
            let viewport = session.viewport;
            session.player.shift(-PLAYER_STEP, &viewport);
            session.player.pos.y != before
        }
        (Command::MoveDown, GamePhase::Playing) => {
            let before = session.player.pos.y;
            let viewport = session.viewport;
            session.player.shift(PLAYER_STEP, &viewport);
            session.player.pos.y != before
        }
        (Command::Restart, GamePhase::GameOver) => {
            // Derive the next run's seed from this run so replays chain
            let seed = session.rng.next_u64();
            restart(session, seed);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::sim::state::{Obstacle, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn session() -> GameSession {
        let mut s = GameSession::new(12345, Viewport::new(800.0, 600.0));
        s.drain_events();
        s
    }

    fn push_obstacle(s: &mut GameSession, x: f32, y: f32, size: f32) {
        let id = s.next_entity_id();
        s.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(size),
            asset: crate::assets::AssetId::Planet(1),
        });
    }

    /// Far enough below the player (y 100..160) to never touch it
    const SAFE_Y: f32 = 400.0;

    #[test]
    fn test_advance_moves_and_scores() {
        let mut s = session();
        push_obstacle(&mut s, 10.0, SAFE_Y, 60.0); // 10 + 60 - 20 = 50, stays
        push_obstacle(&mut s, -30.0, SAFE_Y, 60.0); // -30 + 60 - 20 = 10, stays
        push_obstacle(&mut s, -45.0, SAFE_Y, 60.0); // -5, removed
        push_obstacle(&mut s, -50.0, SAFE_Y, 60.0); // -10, removed

        let outcome = advance(&mut s, 20.0);
        assert_eq!(outcome, AdvanceOutcome { scored: 2, collided: false });
        assert_eq!(s.score, 2);
        assert_eq!(s.obstacles.len(), 2);
        assert_eq!(s.obstacles[0].pos.x, -10.0);
        assert_eq!(s.obstacles[1].pos.x, -50.0);
        assert_eq!(s.events, vec![GameEvent::Scored, GameEvent::Scored]);
    }

    #[test]
    fn test_trailing_edge_at_zero_is_not_removed() {
        let mut s = session();
        push_obstacle(&mut s, -40.0, SAFE_Y, 60.0); // -60 + 60 == 0
        let outcome = advance(&mut s, 20.0);
        assert_eq!(outcome.scored, 0);
        assert_eq!(s.obstacles.len(), 1);
    }

    #[test]
    fn test_adjacent_removals_are_not_skipped() {
        let mut s = session();
        for _ in 0..5 {
            push_obstacle(&mut s, -100.0, SAFE_Y, 60.0);
        }
        let outcome = advance(&mut s, 20.0);
        assert_eq!(outcome.scored, 5);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.score, 5);
    }

    #[test]
    fn test_advance_reports_collision_without_phase_change() {
        let mut s = session();
        // Player spans x 50..110, y 100..160
        push_obstacle(&mut s, 120.0, 120.0, 60.0);
        let outcome = advance(&mut s, 20.0);
        assert!(outcome.collided);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.events, vec![GameEvent::Hit]);
    }

    #[test]
    fn test_touching_after_move_is_not_collision() {
        let mut s = session();
        // After moving 20 the left edge sits exactly on the player's right edge
        push_obstacle(&mut s, 130.0, 100.0, 60.0);
        assert!(!advance(&mut s, 20.0).collided);
        // One more unit of travel overlaps
        assert!(advance(&mut s, 1.0).collided);
    }

    #[test]
    fn test_tick_spawn_timing() {
        let mut s = session();
        let ctx = TickContext::new(&NoAssets);

        tick(&mut s, 1000.0, &ctx);
        tick(&mut s, 1500.0, &ctx);
        assert!(s.obstacles.is_empty());

        tick(&mut s, 1516.0, &ctx);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.last_spawn_ms, 1516.0);

        // Spawned at the right edge, then scrolled once in the same tick
        assert_eq!(s.obstacles[0].pos.x, 800.0 - 20.0);

        tick(&mut s, 3000.0, &ctx);
        assert_eq!(s.obstacles.len(), 1);
    }

    #[test]
    fn test_tick_collision_enters_game_over() {
        let mut s = session();
        let ctx = TickContext::new(&NoAssets);
        push_obstacle(&mut s, 100.0, 100.0, 60.0);

        tick(&mut s, 10.0, &ctx);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.restart_visible());
        assert_eq!(
            s.events,
            vec![GameEvent::Hit, GameEvent::StopMusic, GameEvent::GameOver]
        );

        // Frozen: later ticks change nothing
        let x = s.obstacles[0].pos.x;
        tick(&mut s, 99_999.0, &ctx);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].pos.x, x);
        assert_eq!(s.events.len(), 3);
    }

    #[test]
    fn test_commands_gated_by_phase() {
        let mut s = session();
        assert!(!apply_command(&mut s, Command::Restart));
        assert_eq!(s.phase, GamePhase::Playing);

        assert!(apply_command(&mut s, Command::MoveUp));
        assert_eq!(s.player.pos.y, 70.0);

        enter_game_over(&mut s);
        assert!(!apply_command(&mut s, Command::MoveDown));
        assert_eq!(s.player.pos.y, 70.0);
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let mut s = session();
        for _ in 0..10 {
            apply_command(&mut s, Command::MoveUp);
        }
        assert_eq!(s.player.pos.y, 0.0);
        assert!(!apply_command(&mut s, Command::MoveUp));

        for _ in 0..100 {
            apply_command(&mut s, Command::MoveDown);
        }
        assert_eq!(s.player.pos.y, 540.0);
    }

    #[test]
    fn test_restart_yields_fresh_session() {
        let mut s = session();
        let ctx = TickContext::new(&NoAssets);
        s.score = 17;
        push_obstacle(&mut s, 300.0, SAFE_Y, 80.0);
        push_obstacle(&mut s, 100.0, 100.0, 60.0);
        tick(&mut s, 10.0, &ctx);
        assert_eq!(s.phase, GamePhase::GameOver);
        s.drain_events();

        assert!(apply_command(&mut s, Command::Restart));
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.last_spawn_ms, 0.0);
        assert_eq!(s.viewport, Viewport::new(800.0, 600.0));
        assert_eq!(s.events, vec![GameEvent::StartMusic]);
        assert!(!s.restart_visible());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut s = session();
        let ctx = TickContext::new(&NoAssets);
        assert_eq!((s.score, s.phase), (0, GamePhase::Playing));

        // Three planets well below the rocket; one more step takes each
        // trailing edge past x = 0
        for x in [-31.0, -35.0, -39.0] {
            push_obstacle(&mut s, x, SAFE_Y, 50.0);
        }
        tick(&mut s, 100.0, &ctx);
        assert_eq!(s.score, 3);
        assert_eq!(s.phase, GamePhase::Playing);

        // One planet right on top of the rocket
        push_obstacle(&mut s, 60.0, 110.0, 60.0);
        tick(&mut s, 200.0, &ctx);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.score, 3);
        assert!(s.restart_visible());

        apply_command(&mut s, Command::Restart);
        assert_eq!(s.score, 0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let ctx = TickContext::new(&NoAssets);
        let mut a = GameSession::new(99999, Viewport::default());
        let mut b = GameSession::new(99999, Viewport::default());

        let mut now = 0.0;
        for _ in 0..600 {
            now += 16.0;
            tick(&mut a, now, &ctx);
            tick(&mut b, now, &ctx);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.size, y.size);
            assert_eq!(x.asset, y.asset);
        }
    }

    fn command() -> impl Strategy<Value = Command> {
        prop_oneof![Just(Command::MoveUp), Just(Command::MoveDown)]
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            height in 40.0f32..1200.0,
            commands in proptest::collection::vec(command(), 0..200),
        ) {
            let mut s = GameSession::new(1, Viewport::new(800.0, height));
            for cmd in commands {
                apply_command(&mut s, cmd);
                let y = s.player.pos.y;
                prop_assert!(y >= 0.0);
                prop_assert!(y <= s.player.max_y(&s.viewport));
            }
        }

        #[test]
        fn prop_score_counts_removals(
            seed in any::<u64>(),
            steps in proptest::collection::vec(1.0f64..200.0, 1..300),
        ) {
            let ctx = TickContext::new(&NoAssets);
            let mut s = GameSession::new(seed, Viewport::new(640.0, 480.0));
            let mut now = 0.0;
            for dt in steps {
                now += dt;
                let score = s.score;
                tick(&mut s, now, &ctx);
                let scored = s.drain_events().iter().filter(|e| **e == GameEvent::Scored).count();
                prop_assert!(s.score >= score);
                prop_assert_eq!((s.score - score) as usize, scored);
            }
        }
    }
}
