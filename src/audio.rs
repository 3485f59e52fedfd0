//! Audio: sound effects and background music
//!
//! Playback itself belongs to the host. The manager turns game events into
//! backend calls with the configured volumes applied. Effects are
//! fire-and-forget: every trigger starts its own instance, so two
//! overlapping "score" blips are both heard.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Obstacle passed
    Score,
    /// Rocket hit a planet
    Hit,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Clip file the host plays for this effect
    pub fn clip(&self) -> &'static str {
        match self {
            SoundEffect::Score => "score.mp3",
            SoundEffect::Hit => "hit.mp3",
            SoundEffect::GameOver => "gameover.mp3",
        }
    }
}

/// Background music track
pub const MUSIC_CLIP: &str = "bgm.mp3";

/// Host audio backend
///
/// `play_effect` must not block and must not cut off an earlier instance
/// of the same clip. Missing or unloaded clips are silently skipped.
pub trait AudioBackend {
    /// Start a new, independent instance of `clip`
    fn play_effect(&mut self, clip: &str, volume: f32);
    /// Play `clip` on loop from the beginning, replacing any current track
    fn start_music(&mut self, clip: &str, volume: f32);
    /// Change the volume of the current track without restarting it
    fn set_music_volume(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_effect(&mut self, clip: &str, volume: f32) {
        log::debug!("sfx {} @ {:.2}", clip, volume);
    }

    fn start_music(&mut self, clip: &str, volume: f32) {
        log::debug!("music {} @ {:.2} (from start)", clip, volume);
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("music volume {:.2}", volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Track is started (possibly at zero volume)
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
            music_playing: false,
        }
    }

    /// Take volumes and mute state from settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music_volume();
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn sync_music_volume(&mut self) {
        if self.music_playing {
            let vol = self.effective(self.music_volume);
            self.backend.set_music_volume(vol);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_effect(effect.clip(), vol);
    }

    /// Restart background music from the top
    ///
    /// The track starts even when silent so unmuting picks it up mid-run.
    pub fn start_music(&mut self) {
        let vol = self.effective(self.music_volume);
        self.backend.start_music(MUSIC_CLIP, vol);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        self.backend.stop_music();
        self.music_playing = false;
    }

    /// Act on one simulation event
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Scored => self.play(SoundEffect::Score),
            GameEvent::Hit => self.play(SoundEffect::Hit),
            GameEvent::GameOver => self.play(SoundEffect::GameOver),
            GameEvent::StartMusic => self.start_music(),
            GameEvent::StopMusic => self.stop_music(),
        }
    }
}
