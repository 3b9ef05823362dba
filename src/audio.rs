//! Procedural sound effects over the Web Audio API.
//!
//! Every effect is a short list of oscillator sweeps, so there are no
//! audio files to fetch. Playback failures are swallowed; the simulation
//! never waits on audio.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::sim::TargetKind;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Shrimp caught
    Catch,
    /// Golden shrimp caught
    GoldenCatch,
    /// Bomb tapped
    Explosion,
    /// Octopus tapped
    Ink,
    /// Countdown tick (3, 2, 1)
    CountdownBeep,
    LevelUp,
    GameOver,
}

impl SoundEffect {
    pub fn for_hit(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Shrimp => SoundEffect::Catch,
            TargetKind::GoldenShrimp => SoundEffect::GoldenCatch,
            TargetKind::Bomb => SoundEffect::Explosion,
            TargetKind::Octopus => SoundEffect::Ink,
        }
    }

    /// The sweeps making up this effect
    fn tones(self) -> Vec<Tone> {
        use OscillatorType::*;
        match self {
            SoundEffect::Catch => vec![Tone::sweep(Triangle, 660.0, 990.0, 0.08, 0.4)],
            SoundEffect::GoldenCatch => vec![
                Tone::sweep(Sine, 880.0, 880.0, 0.12, 0.35),
                Tone::sweep(Sine, 1320.0, 1320.0, 0.2, 0.35).after(0.08),
            ],
            SoundEffect::Explosion => vec![
                Tone::sweep(Sine, 120.0, 30.0, 0.4, 0.7),
                Tone::sweep(Square, 400.0, 60.0, 0.25, 0.2),
            ],
            SoundEffect::Ink => vec![Tone::sweep(Sawtooth, 220.0, 90.0, 0.2, 0.4)],
            SoundEffect::CountdownBeep => vec![Tone::sweep(Sine, 880.0, 880.0, 0.1, 0.3)],
            SoundEffect::LevelUp => [523.25, 659.25, 783.99, 1046.5]
                .into_iter()
                .enumerate()
                .map(|(i, f)| Tone::sweep(Triangle, f, f, 0.15, 0.3).after(i as f64 * 0.09))
                .collect(),
            SoundEffect::GameOver => [392.0, 329.63, 261.63]
                .into_iter()
                .enumerate()
                .map(|(i, f)| Tone::sweep(Sawtooth, f, f * 0.97, 0.3, 0.35).after(i as f64 * 0.25))
                .collect(),
        }
    }
}

/// One oscillator with an exponential pitch sweep and decay
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: OscillatorType,
    from_hz: f32,
    to_hz: f32,
    secs: f64,
    gain: f32,
    delay: f64,
}

impl Tone {
    fn sweep(wave: OscillatorType, from_hz: f32, to_hz: f32, secs: f64, gain: f32) -> Self {
        Self {
            wave,
            from_hz,
            to_hz,
            secs,
            gain,
            delay: 0.0,
        }
    }

    fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Schedule on the context; `None` if any node could not be built
    fn schedule(&self, ctx: &AudioContext, volume: f32) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let amp = ctx.create_gain().ok()?;
        osc.set_type(self.wave);
        osc.connect_with_audio_node(&amp).ok()?;
        amp.connect_with_audio_node(&ctx.destination()).ok()?;

        let start = ctx.current_time() + self.delay;
        let end = start + self.secs;
        let level = amp.gain();
        level.set_value_at_time(self.gain * volume, start).ok()?;
        level.exponential_ramp_to_value_at_time(0.01, end).ok()?;
        let pitch = osc.frequency();
        pitch.set_value_at_time(self.from_hz, start).ok()?;
        pitch.exponential_ramp_to_value_at_time(self.to_hz, end).ok()?;

        osc.start_with_when(start).ok()?;
        osc.stop_with_when(end + 0.02).ok()
    }
}

/// Owns the page's AudioContext
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Unavailable outside secure contexts
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("No AudioContext, sound disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers start the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            if tone.schedule(ctx, self.volume).is_none() {
                log::debug!("Dropped {:?} tone", effect);
            }
        }
    }
}
