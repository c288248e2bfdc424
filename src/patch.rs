//! Read-only operator patch data.
//!
//! The host owns patch storage and editing; the signal path only reads
//! these values while rendering.

/// Coarse frequency ratios relative to the note fundamental, indexed by
/// [`OperatorPatch::coarse`]. Index 0 is the sub-octave, the rest are
/// integer harmonics.
#[rustfmt::skip]
pub const COARSE_RATIOS: [f32; 32] = [
     0.5,  1.0,  2.0,  3.0,  4.0,  5.0,  6.0,  7.0,
     8.0,  9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
    16.0, 17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0,
    24.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0, 31.0,
];

/// Per-operator parameters supplied by the host. The core never mutates
/// or retains a patch; it is consumed by value per render call.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OperatorPatch {
    /// Index into [`COARSE_RATIOS`].
    pub coarse: u8,
    /// Linear output amplitude in `0..=1`.
    pub amplitude: f32,
}

impl OperatorPatch {
    pub fn new(coarse: u8, amplitude: f32) -> Self {
        Self { coarse, amplitude }
    }

    /// Frequency ratio for the patched coarse index. Indices past the
    /// table fall back to unity rather than panicking mid-render.
    #[inline]
    pub fn frequency_ratio(&self) -> f32 {
        *COARSE_RATIOS.get(self.coarse as usize).unwrap_or(&1.0)
    }
}
