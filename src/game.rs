//! Host driver
//!
//! Owns the live session and its collaborators. The host calls `frame`
//! once per display refresh and `command` whenever the player presses
//! something.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::AssetTable;
use crate::audio::{AudioBackend, AudioManager};
use crate::input::Command;
use crate::platform::{Clock, Surface, ViewportSource};
use crate::renderer::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameSession, TickContext, Viewport, apply_command, tick};

/// Seed from the wall clock, for runs without a configured seed
fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Game instance holding all state
pub struct Game<B: AudioBackend> {
    session: GameSession,
    audio: AudioManager<B>,
    assets: AssetTable,
    settings: Settings,
}

impl<B: AudioBackend> Game<B> {
    pub fn new(settings: Settings, viewport: Viewport, backend: B) -> Self {
        let seed = settings.seed.unwrap_or_else(entropy_seed);
        log::info!(
            "New game: seed {}, viewport {}x{}",
            seed,
            viewport.width,
            viewport.height
        );
        Self {
            session: GameSession::new(seed, viewport),
            audio: AudioManager::from_settings(backend, &settings),
            assets: AssetTable::new(),
            settings,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    /// Asset sizes, for the host to fill in as images load
    pub fn assets_mut(&mut self) -> &mut AssetTable {
        &mut self.assets
    }

    /// Whether frames still advance the simulation
    pub fn is_running(&self) -> bool {
        self.session.is_playing()
    }

    /// Advance one refresh and produce the frame to draw
    pub fn frame(&mut self, now_ms: f64, viewport: Viewport) -> Frame {
        if viewport != self.session.viewport {
            self.session.resize(viewport);
        }

        let ctx = TickContext::new(&self.assets).with_interval(self.settings.spawn_interval_ms);
        tick(&mut self.session, now_ms, &ctx);
        self.dispatch_events();

        build_frame(&self.session, &self.assets)
    }

    /// One refresh driven entirely by host collaborators
    pub fn run_frame(
        &mut self,
        clock: &dyn Clock,
        viewport: &dyn ViewportSource,
        surface: &mut dyn Surface,
    ) {
        let frame = self.frame(clock.now_ms(), viewport.viewport());
        surface.present(&frame);
    }

    /// Apply a player command right away
    pub fn command(&mut self, command: Command) -> bool {
        let changed = apply_command(&mut self.session, command);
        self.dispatch_events();
        changed
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            self.audio.handle(event);
        }
    }
}
