//! Fast transcendental approximations shared by the audio-rate code.
//!
//! The cosine table is the only process-wide state in the crate: build it
//! once with [`init_tables`] before the first render call. Reads are
//! lock-free and the table is immutable after construction, so concurrent
//! voices on separate threads may share it freely.

#[allow(unused_imports)]
use num_traits::float::Float;

use spin::Once;

pub const COS_TABLE_BITS: usize = 10;

/// Number of intervals covering one cycle in the cosine table.
pub const COS_TABLE_SIZE: usize = 1 << COS_TABLE_BITS;

// Two guard points so interpolation at a phase that rounds up to 1.0
// stays in bounds.
static COS_TABLE: Once<[f32; COS_TABLE_SIZE + 2]> = Once::new();

/// Builds the shared cosine table. Idempotent; must complete before the
/// first call to [`fast_cos`] or [`fast_sin`].
pub fn init_tables() {
    COS_TABLE.call_once(|| {
        let mut table = [0.0; COS_TABLE_SIZE + 2];
        for (i, entry) in table.iter_mut().enumerate() {
            let phase = i as f32 / COS_TABLE_SIZE as f32;
            *entry = (2.0 * core::f32::consts::PI * phase).cos();
        }
        table
    });
}

/// Cosine of a phase expressed in cycles (period 1). Any finite phase is
/// valid; it wraps before the lookup, in `f64` so the error bound holds
/// for phases accumulated over long renders. Absolute error vs
/// `cos(2πx)` stays below 1e-5.
///
/// Panics if [`init_tables`] has not run — calling into the audio path
/// before initialization is a programming error, not a runtime fault.
#[inline]
pub fn fast_cos(phase: f64) -> f32 {
    let table = COS_TABLE
        .get()
        .expect("fast_math::init_tables() must run before the first lookup");

    let index = (phase - phase.floor()) as f32 * COS_TABLE_SIZE as f32;
    let integral = index as usize;
    let fractional = index - integral as f32;
    let a = table[integral];
    let b = table[integral + 1];

    a + (b - a) * fractional
}

/// Sine as a quarter-cycle shift of [`fast_cos`].
#[inline]
pub fn fast_sin(phase: f64) -> f32 {
    fast_cos(phase - 0.25)
}

/// Rational approximation of the hyperbolic tangent.
///
/// Uses the `x·(27 + x²) / (27 + 9·x²)` segment up to |x| = 3, where it
/// reaches exactly ±1, and saturates beyond. Odd, monotone, bounded in
/// `[-1, 1]` and finite for every finite input, which covers the
/// ladder's |x| < 20 operating range. No initialization required.
#[inline]
pub fn fast_tanh(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
    }
}
