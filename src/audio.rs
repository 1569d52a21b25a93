//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no sample files. One-shot cues fire and
//! forget; the grind loop and background music are held nodes so replaying
//! them is a no-op and stopping them is explicit.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Ollie trick landed
    Ollie,
    /// Wiped out on an obstacle
    Collision,
    /// Coin collected
    Coin,
    /// Power-up collected
    PowerUp,
    /// Run ended
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    grind_loop: Option<(OscillatorNode, GainNode)>,
    music_loop: Option<(OscillatorNode, OscillatorNode, GainNode)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game keeps running silent
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
            grind_loop: None,
            music_loop: None,
        }
    }

    pub fn set_volumes(&mut self, master: f32, sfx: f32, music: f32) {
        self.master_volume = master.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
        self.music_volume = music.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio, silencing held loops in place
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let loop_gain = if muted { 0.0 } else { self.master_volume * self.sfx_volume * 0.15 };
        if let Some((_, gain)) = &self.grind_loop {
            gain.gain().set_value(loop_gain);
        }
        let music_gain = if muted { 0.0 } else { self.master_volume * self.music_volume };
        if let Some((_, _, gain)) = &self.music_loop {
            gain.gain().set_value(music_gain);
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Resume the context if the browser suspended it pending a user gesture
    fn ensure_running(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.ensure_running();

        match cue {
            SoundCue::Jump => self.beep(ctx, 660.0, 0.1, vol * 0.5, OscillatorType::Sine),
            SoundCue::Ollie => self.beep(ctx, 550.0, 0.15, vol * 0.5, OscillatorType::Triangle),
            SoundCue::Collision => self.play_collision(ctx, vol),
            SoundCue::Coin => self.beep(ctx, 880.0, 0.1, vol * 0.4, OscillatorType::Sine),
            SoundCue::PowerUp => self.play_power_up(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Start the looping grind sparks; a no-op if already running
    pub fn start_grind(&mut self) {
        if self.grind_loop.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.ensure_running();
        let Some((osc, gain)) = create_osc(ctx, 330.0, OscillatorType::Sawtooth) else {
            return;
        };
        let vol = self.sfx_gain();
        gain.gain().set_value(vol * 0.15);
        if osc.start().is_ok() {
            self.grind_loop = Some((osc, gain));
        }
    }

    /// Stop the grind loop; a no-op if not running
    pub fn stop_grind(&mut self) {
        if let Some((osc, _)) = self.grind_loop.take() {
            let _ = osc.stop();
        }
    }

    /// Start the background music loop; a no-op if already running
    pub fn start_music(&mut self) {
        if self.music_loop.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.ensure_running();

        // Two detuned oscillators through one gain give the looping drone
        let Some((low, gain)) = create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let Some(high) = ctx.create_oscillator().ok() else { return };
        high.set_type(OscillatorType::Sine);
        high.frequency().set_value(330.0);
        if high.connect_with_audio_node(&gain).is_err() {
            return;
        }

        let vol = if self.muted { 0.0 } else { self.master_volume * self.music_volume };
        gain.gain().set_value(vol);
        if low.start().is_ok() && high.start().is_ok() {
            self.music_loop = Some((low, high, gain));
        }
    }

    /// Stop the background music; a no-op if not running
    pub fn stop_music(&mut self) {
        if let Some((low, high, _)) = self.music_loop.take() {
            let _ = low.stop();
            let _ = high.stop();
        }
    }

    /// Simple decaying beep
    fn beep(&self, ctx: &AudioContext, freq: f32, secs: f64, vol: f32, osc_type: OscillatorType) {
        let Some((osc, gain)) = create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + secs)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + secs + 0.05).ok();
    }

    /// Collision - low thud with a dropping pitch
    fn play_collision(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.3)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Power-up - rising chime
    fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1100.0, 1320.0, 1650.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Game over - sad descending notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

/// Create an oscillator routed through a fresh gain node
fn create_osc(
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
