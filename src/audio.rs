//! Feedback outputs using Web Audio and the Vibration API
//!
//! Procedurally generated cue tones - no external files needed!

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{ToneOutput, Vibrator};

/// Cue tone volume
const TONE_GAIN: f32 = 0.1;

/// Tone player for cue beeps
///
/// The AudioContext is created lazily on the first cue, which always follows
/// a user gesture, so browsers allow it to start.
#[derive(Default)]
pub struct WebTone {
    ctx: Option<AudioContext>,
    failed: bool,
}

impl WebTone {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.failed {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.failed = true;
                }
            }
        }
        let ctx = self.ctx.as_ref()?;
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator routed through a gain node
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
}

impl ToneOutput for WebTone {
    fn tone(&mut self, hz: f32, duration_s: f64) {
        let Some(ctx) = self.context() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, hz, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value(TONE_GAIN);
        osc.start().ok();
        osc.stop_with_when(t + duration_s).ok();
    }
}

/// `navigator.vibrate`, silently absent on desktop browsers
#[derive(Default)]
pub struct WebVibrator;

impl Vibrator for WebVibrator {
    fn vibrate(&mut self, pattern: &[u32]) {
        let Some(window) = web_sys::window() else { return };
        let navigator = window.navigator();
        match pattern {
            [single] => {
                navigator.vibrate_with_duration(*single);
            }
            _ => {
                let steps: js_sys::Array = pattern.iter().map(|ms| JsValue::from(*ms)).collect();
                navigator.vibrate_with_pattern(&steps);
            }
        }
    }
}
