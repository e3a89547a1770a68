//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::{RoundEvent, ShotRejection};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball struck
    Kick,
    /// Shot refused (not aimed upward)
    Refused,
    /// Ball in the net
    Goal,
    /// Ball stopped outside the goal
    Miss,
    /// Discount code revealed
    RewardUnlocked,
}

impl SoundEffect {
    /// Sound to play for a round event, if any
    pub fn for_event(event: &RoundEvent) -> Option<Self> {
        match event {
            RoundEvent::ShotLaunched { .. } => Some(SoundEffect::Kick),
            RoundEvent::ShotRejected(ShotRejection::NotUpward) => Some(SoundEffect::Refused),
            RoundEvent::GoalScored { .. } => Some(SoundEffect::Goal),
            RoundEvent::ShotMissed { .. } => Some(SoundEffect::Miss),
            RoundEvent::RewardUnlocked { .. } => Some(SoundEffect::RewardUnlocked),
            RoundEvent::GestureStarted { .. } | RoundEvent::RoundReset => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Kick => self.play_kick(ctx, vol),
                SoundEffect::Refused => self.play_refused(ctx, vol),
                SoundEffect::Goal => self.play_goal(ctx, vol),
                SoundEffect::Miss => self.play_miss(ctx, vol),
                SoundEffect::RewardUnlocked => self.play_reward(ctx, vol),
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        /// Release the audio context
        pub fn close(&mut self) {
            if let Some(ctx) = self.ctx.take() {
                let _ = ctx.close();
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

        /// Kick - solid thump with a short whoosh
        fn play_kick(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(600.0, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }

        /// Refused - soft low buzz
        fn play_refused(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Goal - rising arpeggio
        fn play_goal(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Miss - short descending pair
        fn play_miss(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [350.0, 250.0].iter().enumerate() {
                let delay = i as f64 * 0.18;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
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

        /// Reward - celebratory run
        fn play_reward(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = 0.45 + i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
