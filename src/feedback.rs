//! Audio/haptic feedback cues
//!
//! The engine only ever calls [`FeedbackSink::cue`]. Sinks are best-effort:
//! they have no error channel and must never block.

use std::cell::Cell;
use std::rc::Rc;

use crate::settings::Settings;
use crate::sim::RoundOutcome;

/// Feedback requests raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCue {
    /// Session started
    Start,
    /// Correct counter
    Win,
    /// Wrong counter
    Lose,
    /// Window ran out (sounds like a loss, vibrates differently)
    Timeout,
}

impl FeedbackCue {
    pub fn for_outcome(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::Win => FeedbackCue::Win,
            RoundOutcome::Lose => FeedbackCue::Lose,
            RoundOutcome::Timeout => FeedbackCue::Timeout,
        }
    }

    /// Oscillator frequency (Hz)
    pub fn tone_hz(self) -> f32 {
        match self {
            FeedbackCue::Start => 220.0,
            FeedbackCue::Win => 420.0,
            FeedbackCue::Lose | FeedbackCue::Timeout => 160.0,
        }
    }

    /// Vibration pattern in ms (on, off, on, ...)
    pub fn vibration(self) -> &'static [u32] {
        match self {
            FeedbackCue::Start => &[20],
            FeedbackCue::Win => &[40],
            FeedbackCue::Lose => &[20, 30, 20],
            FeedbackCue::Timeout => &[60],
        }
    }
}

/// Length of every cue tone (seconds)
pub const TONE_DURATION_S: f64 = 0.2;

/// Receives cues from the engine
pub trait FeedbackSink {
    fn cue(&mut self, cue: FeedbackCue);
}

/// Sink for when no feedback device exists
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn cue(&mut self, _cue: FeedbackCue) {}
}

/// Something that can beep
pub trait ToneOutput {
    fn tone(&mut self, hz: f32, duration_s: f64);
}

/// Something that can buzz
pub trait Vibrator {
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Routes cues to tone/vibration outputs according to the player's toggles
///
/// Settings are shared with the presentation layer so a toggle takes effect
/// on the next cue.
pub struct GatedFeedback<T: ToneOutput, V: Vibrator> {
    tones: T,
    vibrator: V,
    settings: Rc<Cell<Settings>>,
}

impl<T: ToneOutput, V: Vibrator> GatedFeedback<T, V> {
    pub fn new(tones: T, vibrator: V, settings: Rc<Cell<Settings>>) -> Self {
        Self {
            tones,
            vibrator,
            settings,
        }
    }
}

impl<T: ToneOutput, V: Vibrator> FeedbackSink for GatedFeedback<T, V> {
    fn cue(&mut self, cue: FeedbackCue) {
        let settings = self.settings.get();
        if settings.sounds {
            self.tones.tone(cue.tone_hz(), TONE_DURATION_S);
        }
        if settings.haptics {
            self.vibrator.vibrate(cue.vibration());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl ToneOutput for Log {
        fn tone(&mut self, hz: f32, _duration_s: f64) {
            self.0.borrow_mut().push(format!("tone {hz}"));
        }
    }

    impl Vibrator for Log {
        fn vibrate(&mut self, pattern: &[u32]) {
            self.0.borrow_mut().push(format!("buzz {pattern:?}"));
        }
    }

    #[test]
    fn test_both_enabled() {
        let log = Log::default();
        let settings = Rc::new(Cell::new(Settings::default()));
        let mut sink = GatedFeedback::new(log.clone(), log.clone(), settings);
        sink.cue(FeedbackCue::Lose);
        assert_eq!(*log.0.borrow(), vec!["tone 160", "buzz [20, 30, 20]"]);
    }

    #[test]
    fn test_toggles_gate_outputs() {
        let log = Log::default();
        let settings = Rc::new(Cell::new(Settings::default()));
        let mut sink = GatedFeedback::new(log.clone(), log.clone(), settings.clone());

        settings.set(Settings {
            sounds: false,
            haptics: true,
        });
        sink.cue(FeedbackCue::Win);
        settings.set(Settings {
            sounds: true,
            haptics: false,
        });
        sink.cue(FeedbackCue::Start);
        settings.set(Settings {
            sounds: false,
            haptics: false,
        });
        sink.cue(FeedbackCue::Timeout);

        assert_eq!(*log.0.borrow(), vec!["buzz [40]", "tone 220"]);
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(FeedbackCue::for_outcome(RoundOutcome::Win), FeedbackCue::Win);
        assert_eq!(FeedbackCue::for_outcome(RoundOutcome::Lose), FeedbackCue::Lose);
        assert_eq!(FeedbackCue::for_outcome(RoundOutcome::Timeout), FeedbackCue::Timeout);
        assert_eq!(FeedbackCue::Timeout.tone_hz(), FeedbackCue::Lose.tone_hz());
    }
}
