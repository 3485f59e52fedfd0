//! Draw command lists for one frame
//!
//! The surface decides how to draw. A sprite whose image is not ready is
//! drawn as a solid rect in its fallback colour.

use glam::Vec2;

use crate::assets::{AssetCatalog, AssetId};
use crate::sim::{Aabb, GameSession, format_speed, speed};

pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
/// Placeholder for the rocket before its sprite loads
pub const PLAYER_FALLBACK: Color = [0.0, 1.0, 0.0, 1.0];
/// Placeholder for planets before their sprites load
pub const OBSTACLE_FALLBACK: Color = [1.0, 0.0, 0.0, 1.0];

pub const GAME_OVER_TITLE: &str = "🚀 Game Over 🚀";

pub const HUD_FONT_SIZE: f32 = 16.0;
pub const OVERLAY_FONT_SIZE: f32 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport
    Clear { color: Color },
    /// Image at `rect`, or a `fallback` rect when the image isn't ready
    Sprite {
        rect: Aabb,
        asset: AssetId,
        image_ready: bool,
        fallback: Color,
    },
    /// Text anchored at its baseline
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Everything the surface needs for one refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Whether the restart button should be shown
    pub restart_visible: bool,
}

impl Frame {
    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = (&Aabb, AssetId, bool)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Sprite {
                rect,
                asset,
                image_ready,
                ..
            } => Some((rect, *asset, *image_ready)),
            _ => None,
        })
    }
}

fn sprite(rect: Aabb, asset: AssetId, catalog: &dyn AssetCatalog, fallback: Color) -> DrawCommand {
    DrawCommand::Sprite {
        rect,
        asset,
        image_ready: catalog.aspect_ratio(asset).is_some(),
        fallback,
    }
}

fn text(text: String, x: f32, y: f32, size: f32, align: TextAlign) -> DrawCommand {
    DrawCommand::Text {
        text,
        pos: Vec2::new(x, y),
        size,
        align,
        color: TEXT,
    }
}

/// Build the draw list for the session's current state
pub fn build_frame(session: &GameSession, catalog: &dyn AssetCatalog) -> Frame {
    let mut commands = Vec::with_capacity(session.obstacles.len() + 6);

    commands.push(DrawCommand::Clear { color: BACKGROUND });
    commands.push(sprite(
        session.player.aabb(),
        AssetId::Rocket,
        catalog,
        PLAYER_FALLBACK,
    ));
    for obs in &session.obstacles {
        commands.push(sprite(obs.aabb(), obs.asset, catalog, OBSTACLE_FALLBACK));
    }

    // HUD
    commands.push(text(
        format!("Score: {}", session.score),
        10.0,
        25.0,
        HUD_FONT_SIZE,
        TextAlign::Left,
    ));
    commands.push(text(
        format!("Speed: {}", format_speed(speed(session.score))),
        10.0,
        50.0,
        HUD_FONT_SIZE,
        TextAlign::Left,
    ));

    let restart_visible = session.restart_visible();
    if restart_visible {
        let cx = session.viewport.width / 2.0;
        let cy = session.viewport.height / 2.0;
        commands.push(text(
            GAME_OVER_TITLE.to_string(),
            cx,
            cy - 20.0,
            OVERLAY_FONT_SIZE,
            TextAlign::Center,
        ));
        commands.push(text(
            format!("Score: {}", session.score),
            cx,
            cy + 30.0,
            OVERLAY_FONT_SIZE,
            TextAlign::Center,
        ));
    }

    Frame {
        commands,
        restart_visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetTable, NoAssets};
    use crate::sim::{Obstacle, Viewport, enter_game_over};

    fn session_with_obstacle() -> GameSession {
        let mut session = GameSession::new(1, Viewport::new(800.0, 600.0));
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(500.0, 300.0),
            size: Vec2::splat(70.0),
            asset: AssetId::Planet(4),
        });
        session
    }

    #[test]
    fn test_playing_frame() {
        let mut session = session_with_obstacle();
        session.score = 7;
        let frame = build_frame(&session, &NoAssets);

        assert!(!frame.restart_visible);
        assert_eq!(frame.commands[0], DrawCommand::Clear { color: BACKGROUND });
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(texts, vec!["Score: 7", "Speed: 20.5"]);

        let sprites: Vec<_> = frame.sprites().collect();
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].1, AssetId::Rocket);
        assert_eq!(sprites[1].1, AssetId::Planet(4));
        assert_eq!(sprites[1].0.min, Vec2::new(500.0, 300.0));
        // Nothing loaded: placeholders
        assert!(sprites.iter().all(|(_, _, ready)| !ready));
    }

    #[test]
    fn test_loaded_sprites_are_ready() {
        let session = session_with_obstacle();
        let mut table = AssetTable::new();
        table.mark_loaded(AssetId::Planet(4), 64, 64);
        let frame = build_frame(&session, &table);
        let ready: Vec<_> = frame.sprites().map(|(_, _, ready)| ready).collect();
        assert_eq!(ready, vec![false, true]);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = session_with_obstacle();
        session.score = 3;
        enter_game_over(&mut session);
        let frame = build_frame(&session, &NoAssets);

        assert!(frame.restart_visible);
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(
            texts,
            vec!["Score: 3", "Speed: 20.0", GAME_OVER_TITLE, "Score: 3"]
        );
        match frame.commands.last() {
            Some(DrawCommand::Text { pos, align, .. }) => {
                assert_eq!(*pos, Vec2::new(400.0, 330.0));
                assert_eq!(*align, TextAlign::Center);
            }
            other => panic!("expected overlay text, got {:?}", other),
        }
    }
}
