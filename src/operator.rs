//! Single FM operator: a sine voice with a phase-modulation input.
//!
//! Operators render additively into a caller buffer so a host can stack
//! them into whatever topology it wants; algorithm selection between
//! operators stays outside the core.

use crate::fast_math::fast_sin;
use crate::patch::OperatorPatch;

#[derive(Debug, Default)]
pub struct Operator {
    phase: f32,
    amplitude: f32,
    one_hz: f32,
}

impl Operator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, sample_rate: f32) {
        self.one_hz = 1.0 / sample_rate;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.amplitude = 0.0;
    }

    /// Renders the operator additively into `out`.
    ///
    /// `note_frequency` is the voice fundamental in Hz, scaled by the
    /// patch coarse ratio; the result saturates at the 0.5 normalized
    /// bound. `modulation`, when given, is a per-sample phase offset in
    /// cycles from a modulating operator and must cover the whole block.
    /// The amplitude ramps linearly to the patched level over the block
    /// to avoid zipper noise.
    pub fn render_add(
        &mut self,
        patch: &OperatorPatch,
        note_frequency: f32,
        modulation: Option<&[f32]>,
        out: &mut [f32],
    ) {
        if out.is_empty() {
            return;
        }
        if let Some(modulation) = modulation {
            debug_assert!(modulation.len() >= out.len());
        }

        let mut frequency = note_frequency * patch.frequency_ratio() * self.one_hz;
        if frequency >= 0.5 {
            frequency = 0.5;
        }

        let amplitude_increment = (patch.amplitude - self.amplitude) / out.len() as f32;

        for (i, out_sample) in out.iter_mut().enumerate() {
            self.phase += frequency;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }

            let pm = modulation.map_or(0.0, |m| m[i]);
            self.amplitude += amplitude_increment;
            *out_sample += self.amplitude * fast_sin((self.phase + pm) as f64);
        }
    }
}
