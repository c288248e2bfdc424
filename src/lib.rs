#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod cos_tilt;
pub mod envelope;
pub mod fast_math;
pub mod ladder;
pub mod operator;
pub mod patch;

use core::fmt;

/// Default audio sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48000.0;

/// Upper bound for audible frequency parameters at a given sample rate.
#[inline]
pub fn audible_nyquist(sample_rate: f32) -> f32 {
    f32::min(0.5 * sample_rate, 20_000.0)
}

/// Rejection returned by parameter setters when a value would corrupt the
/// audio-rate state. The setter leaves its state untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterError {
    /// Cutoff outside the range accepted by the filter at its sample rate.
    CutoffOutOfRange(f32),
    /// Resonance outside `0..=4`.
    ResonanceOutOfRange(f32),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CutoffOutOfRange(value) => {
                write!(f, "cutoff of {value} Hz outside the supported range")
            }
            Self::ResonanceOutOfRange(value) => {
                write!(f, "resonance of {value} outside 0..=4")
            }
        }
    }
}

impl core::error::Error for ParameterError {}
