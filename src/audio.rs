//! Audio system using Web Audio API
//!
//! Every cue is a short square-wave blip; no external files needed.

use crate::sim::SoundCue;

/// Synthesis parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Starting gain before the decay
    pub gain: f32,
    /// Decay length in seconds
    pub duration: f64,
}

const GAIN: f32 = 0.1;
const DECAY_SECS: f64 = 0.2;

/// Tone played for a cue
pub fn tone_for(cue: SoundCue) -> Tone {
    let frequency = match cue {
        SoundCue::Click => 800.0,
        SoundCue::Collect => 1200.0,
        SoundCue::Damage => 300.0,
        SoundCue::Jump => 600.0,
        SoundCue::Move => 400.0,
        SoundCue::Start => 1000.0,
        SoundCue::GameOver => 200.0,
        SoundCue::Achievement => 1500.0,
    };
    Tone {
        frequency,
        gain: GAIN,
        duration: DECAY_SECS,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Tone, tone_for};
    use crate::sim::SoundCue;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(enabled: bool) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                muted: !enabled,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, cue: SoundCue) {
            if self.muted {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.play_tone(ctx, tone_for(cue));
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Square);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: Tone) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.frequency) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }
}
