//! Audio system
//!
//! Procedurally generated sound effects on the Web Audio API; no sound
//! files needed. Native builds keep the same interface but stay silent.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{EnemyKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player spray
    Shoot,
    /// Enemy volley
    EnemyShoot,
    /// Projectile hits an enemy
    Hit,
    /// Trash can destroyed
    TrashDestroyed,
    /// Raccoon defeated
    RaccoonDefeated,
    /// Player takes damage
    PlayerHurt,
    /// Seed dropped by an enemy
    SeedDrop,
    /// Seed collected
    SeedPickup,
    /// Wave cleared
    WaveClear,
    /// Player died
    GameOver,
    /// Upgrade bought
    Purchase,
    /// Menu cursor / button
    MenuSelect,
}

impl SoundEffect {
    /// Sound for a simulation event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PlayerFired => SoundEffect::Shoot,
            GameEvent::EnemyFired => SoundEffect::EnemyShoot,
            GameEvent::EnemyHit => SoundEffect::Hit,
            GameEvent::EnemyKilled(EnemyKind::Trash) => SoundEffect::TrashDestroyed,
            GameEvent::EnemyKilled(EnemyKind::Raccoon) => SoundEffect::RaccoonDefeated,
            GameEvent::PlayerHurt => SoundEffect::PlayerHurt,
            GameEvent::SeedDropped => SoundEffect::SeedDrop,
            GameEvent::SeedCollected => SoundEffect::SeedPickup,
            GameEvent::WaveCleared => SoundEffect::WaveClear,
            GameEvent::PlayerDied => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Most recent effect requested
    pub last_played: Option<SoundEffect>,
    /// Effects requested so far
    pub play_count: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: {
                // May fail outside a secure context
                let ctx = AudioContext::new().ok();
                if ctx.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                }
                ctx
            },
            music_volume: 0.7,
            sfx_volume: 0.8,
            muted: false,
            last_played: None,
            play_count: 0,
        }
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Play the sound for each event
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().map(|e| SoundEffect::for_event(*e)) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        self.last_played = Some(effect);
        self.play_count += 1;

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        self.synthesize(effect, vol);
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn synthesize(&self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shoot => self.blip(ctx, 900.0, 600.0, 0.05, vol * 0.08, OscillatorType::Square),
            SoundEffect::EnemyShoot => {
                self.blip(ctx, 300.0, 180.0, 0.08, vol * 0.1, OscillatorType::Sawtooth)
            }
            SoundEffect::Hit => self.blip(ctx, 300.0, 200.0, 0.05, vol * 0.25, OscillatorType::Triangle),
            SoundEffect::TrashDestroyed => self.play_clang(ctx, vol),
            SoundEffect::RaccoonDefeated => {
                self.blip(ctx, 700.0, 150.0, 0.3, vol * 0.3, OscillatorType::Sawtooth)
            }
            SoundEffect::PlayerHurt => self.blip(ctx, 150.0, 60.0, 0.12, vol * 0.5, OscillatorType::Sine),
            SoundEffect::SeedDrop => self.blip(ctx, 500.0, 700.0, 0.08, vol * 0.15, OscillatorType::Sine),
            SoundEffect::SeedPickup => self.arpeggio(ctx, &[600.0, 800.0, 1000.0], 0.08, vol * 0.25, OscillatorType::Sine),
            SoundEffect::WaveClear => {
                self.arpeggio(ctx, &[400.0, 500.0, 600.0, 800.0], 0.1, vol * 0.3, OscillatorType::Triangle)
            }
            SoundEffect::GameOver => {
                self.arpeggio(ctx, &[400.0, 350.0, 300.0, 200.0], 0.2, vol * 0.3, OscillatorType::Sine)
            }
            SoundEffect::Purchase => {
                self.arpeggio(ctx, &[500.0, 700.0, 1000.0], 0.06, vol * 0.25, OscillatorType::Triangle)
            }
            SoundEffect::MenuSelect => self.blip(ctx, 400.0, 400.0, 0.06, vol * 0.2, OscillatorType::Sine),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single tone sweeping `from` -> `to` with a decaying envelope
    fn blip(&self, ctx: &AudioContext, from: f32, to: f32, length: f64, peak: f32, osc_type: OscillatorType) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + length)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + length + 0.05).ok();
    }

    /// Notes played one after another
    fn arpeggio(&self, ctx: &AudioContext, notes: &[f32], step: f64, peak: f32, osc_type: OscillatorType) {
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(peak, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Metallic clang of a trash can going down
    fn play_clang(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Deep bass impact
        if let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        // Metallic ring
        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.1).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_has_a_sound() {
        assert_eq!(
            SoundEffect::for_event(GameEvent::EnemyKilled(EnemyKind::Raccoon)),
            SoundEffect::RaccoonDefeated
        );
        assert_eq!(
            SoundEffect::for_event(GameEvent::SeedCollected),
            SoundEffect::SeedPickup
        );
    }

    #[test]
    fn test_play_events_records_last() {
        let mut audio = AudioManager::new();
        audio.play_events(&[GameEvent::PlayerFired, GameEvent::WaveCleared]);
        assert_eq!(audio.play_count, 2);
        assert_eq!(audio.last_played, Some(SoundEffect::WaveClear));
    }

    #[test]
    fn test_muted_still_records() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.play(SoundEffect::Purchase);
        assert_eq!(audio.play_count, 1);
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut audio = AudioManager::new();
        audio.set_music_volume(1.5);
        audio.set_sfx_volume(-0.2);
        assert_eq!(audio.music_volume(), 1.0);
        assert_eq!(audio.sfx_volume(), 0.0);
    }
}
