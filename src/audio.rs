//! Sound effects
//!
//! The game only says *which* effect to play. Each effect is described as a
//! handful of synthesised [`Voice`]s; on the web [`WebAudio`] renders them
//! with oscillators (no asset files), natively [`SilentAudio`] drops them.
//! Playback failures never reach gameplay.

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bomb caught
    Catch,
    /// Bomb exploded on the floor
    Explode,
    /// Round over
    GameOver,
    /// Finished round took first place on the leaderboard
    HighScore,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Catch,
        SoundEffect::Explode,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
    ];
}

/// Fire-and-forget sound output
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);

    /// Volume or mute preferences changed
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Effective gain from player settings (0 when muted)
pub fn effective_volume(settings: &Settings) -> f32 {
    if settings.muted {
        0.0
    } else {
        (settings.master_volume * settings.sfx_volume).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One oscillator note: pitch glides from `from_hz` to `to_hz` while the gain
/// decays from `peak` over `length` seconds, starting `delay` seconds in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub wave: Wave,
    pub from_hz: f32,
    pub to_hz: f32,
    pub peak: f32,
    pub delay: f64,
    pub length: f64,
}

impl Voice {
    const fn note(wave: Wave, hz: f32, peak: f32, delay: f64, length: f64) -> Self {
        Self {
            wave,
            from_hz: hz,
            to_hz: hz,
            peak,
            delay,
            length,
        }
    }

    const fn glide(wave: Wave, from_hz: f32, to_hz: f32, peak: f32, length: f64) -> Self {
        Self {
            wave,
            from_hz,
            to_hz,
            peak,
            delay: 0.0,
            length,
        }
    }
}

/// Notes making up `effect`
pub fn voices(effect: SoundEffect) -> Vec<Voice> {
    match effect {
        // Short upward chirp
        SoundEffect::Catch => vec![
            Voice::glide(Wave::Triangle, 660.0, 1320.0, 0.3, 0.1),
            Voice::note(Wave::Sine, 1320.0, 0.15, 0.06, 0.08),
        ],
        // Noisy drop with a low thud underneath
        SoundEffect::Explode => vec![
            Voice::glide(Wave::Sawtooth, 220.0, 35.0, 0.35, 0.45),
            Voice::glide(Wave::Square, 90.0, 45.0, 0.2, 0.2),
            Voice::glide(Wave::Sine, 70.0, 40.0, 0.5, 0.3),
        ],
        // Slow falling steps
        SoundEffect::GameOver => [392.0, 311.0, 262.0, 196.0]
            .into_iter()
            .enumerate()
            .map(|(i, hz)| Voice::note(Wave::Sine, hz, 0.3, i as f64 * 0.25, 0.35))
            .collect(),
        // Major arpeggio up to the octave
        SoundEffect::HighScore => [523.0, 659.0, 784.0, 1047.0]
            .into_iter()
            .enumerate()
            .map(|(i, hz)| Voice::note(Wave::Triangle, hz, 0.25, i as f64 * 0.09, 0.22))
            .collect(),
    }
}

/// No audio device: effects are only logged
#[derive(Debug, Default)]
pub struct SilentAudio;

impl SoundPlayer for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {:?}", effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{SoundEffect, SoundPlayer, Voice, Wave, effective_volume, voices};
    use crate::settings::Settings;

    /// Gain floor for exponential ramps (which can't reach zero)
    const SILENCE: f32 = 0.001;

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context; the game then runs silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("No AudioContext available, sound disabled");
            }
            Self {
                ctx,
                volume: effective_volume(settings),
            }
        }

        fn schedule(ctx: &AudioContext, voice: &Voice, volume: f32) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(voice.wave.into());
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let start = ctx.current_time() + voice.delay;
            let end = start + voice.length;

            let pitch = osc.frequency();
            pitch.set_value_at_time(voice.from_hz, start).ok()?;
            if voice.to_hz != voice.from_hz {
                pitch.exponential_ramp_to_value_at_time(voice.to_hz, end).ok()?;
            }

            let level = gain.gain();
            level
                .set_value_at_time((voice.peak * volume).max(SILENCE), start)
                .ok()?;
            level.exponential_ramp_to_value_at_time(SILENCE, end).ok()?;

            osc.start_with_when(start).ok()?;
            osc.stop_with_when(end + 0.05).ok()
        }
    }

    impl SoundPlayer for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for voice in voices(effect) {
                if Self::schedule(ctx, &voice, self.volume).is_none() {
                    log::debug!("Dropped a voice of {:?}", effect);
                }
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = effective_volume(settings);
        }
    }
}
