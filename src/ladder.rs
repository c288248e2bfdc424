//! Nonlinear four-pole transistor ladder lowpass filter.
//!
//! Discrete-time simulation of the analog ladder: four saturating
//! one-pole stages with global feedback from the last stage into the
//! first, integrated with the trapezoidal rule. Resonance spans 0 to 4;
//! the top of the range approaches self-oscillation, which is intended
//! behavior. Each voice owns its own instance; nothing is shared.

use crate::fast_math::fast_tanh;
use crate::{audible_nyquist, ParameterError};

/// Thermal-voltage-like constant setting the saturation knee.
const VT: f32 = 0.312;

/// Highest cutoff accepted at a given sample rate: the audible bound,
/// additionally capped below `sample_rate / π` so the prewarp factor
/// `1 - period_cut` keeps its sign and the recursion stays stable.
#[inline]
pub fn max_cutoff(sample_rate: f32) -> f32 {
    f32::min(
        audible_nyquist(sample_rate),
        sample_rate / core::f32::consts::PI,
    )
}

#[derive(Debug, Default)]
pub struct LadderFilter {
    // Tap voltages, their previous derivatives, and their saturated values.
    v: [f32; 4],
    dv: [f32; 4],
    tv: [f32; 4],

    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
    drive: f32,
    period_cut: f32,
    cut_gain: f32,
}

impl LadderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.resonance = 0.0;
        self.drive = 1.0;
        self.update_cutoff(1000.0);
        self.reset();
    }

    /// Zeroes the filter memory without touching cutoff, resonance or
    /// drive. Call before first use and on retrigger, where stale state
    /// would otherwise click.
    pub fn reset(&mut self) {
        self.v = [0.0; 4];
        self.dv = [0.0; 4];
        self.tv = [0.0; 4];
    }

    /// Sets the cutoff in Hz, rejecting values outside
    /// `0..=max_cutoff(sample_rate)` before any coefficient changes.
    pub fn set_cutoff(&mut self, cutoff: f32) -> Result<(), ParameterError> {
        if !(0.0..=max_cutoff(self.sample_rate)).contains(&cutoff) {
            return Err(ParameterError::CutoffOutOfRange(cutoff));
        }
        self.update_cutoff(cutoff);
        Ok(())
    }

    /// Sets the resonance, rejecting values outside `0..=4`.
    pub fn set_resonance(&mut self, resonance: f32) -> Result<(), ParameterError> {
        if !(0.0..=4.0).contains(&resonance) {
            return Err(ParameterError::ResonanceOutOfRange(resonance));
        }
        self.resonance = resonance;
        Ok(())
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive;
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    #[inline]
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    #[inline]
    pub fn drive(&self) -> f32 {
        self.drive
    }

    // Both derived coefficients update together so they can never be
    // stale relative to the cutoff.
    fn update_cutoff(&mut self, cutoff: f32) {
        let pi = core::f32::consts::PI;
        self.cutoff = cutoff;
        self.period_cut = pi * cutoff / self.sample_rate;
        self.cut_gain =
            4.0 * pi * VT * cutoff * (1.0 - self.period_cut) / (1.0 + self.period_cut);
    }

    /// Filters the buffer in place.
    ///
    /// Strictly sequential: the saturated last tap of one sample feeds
    /// the first tap of the next through the resonance path, so samples
    /// cannot be reordered or split across lanes. Inputs are assumed
    /// finite; that contract is only checked in debug builds.
    pub fn process(&mut self, in_out: &mut [f32]) {
        let half_step = 1.0 / (2.0 * self.sample_rate);
        let knee = 1.0 / (2.0 * VT);

        for sample in in_out.iter_mut() {
            debug_assert!(sample.is_finite());

            // Input stage: drive plus feedback from the previous sample's
            // saturated output.
            let dv0 = -self.cut_gain
                * (fast_tanh((self.drive * *sample + self.resonance * self.tv[3]) * knee)
                    + self.tv[0]);
            self.v[0] += (dv0 + self.dv[0]) * half_step;
            self.dv[0] = dv0;
            self.tv[0] = fast_tanh(self.v[0] * knee);

            // Remaining stages, each driven by the saturated value the
            // previous tap just produced.
            for i in 1..4 {
                let dv = self.cut_gain * (self.tv[i - 1] - self.tv[i]);
                self.v[i] += (dv + self.dv[i]) * half_step;
                self.dv[i] = dv;
                self.tv[i] = fast_tanh(self.v[i] * knee);
            }

            *sample = self.v[3];
        }
    }
}
