//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no sample files to load.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;

/// Audio manager for the gallery
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set effective volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Fire => self.play_fire(ctx, vol),
            SoundCue::Score => self.play_score(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Blaster shot - falling laser zap
    fn play_fire(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 1400.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(1400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(180.0, t + 0.18)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        // Short low kick under the zap
        if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Target hit - bright two-note chime
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
            let start = t + i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.35, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.3).ok();
            }
        }
    }
}
