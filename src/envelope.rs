//! Attack/decay amplitude envelope.
//!
//! Both segments ramp linearly: attack from 0 to the velocity-scaled peak,
//! decay from the peak back to 0. The linear shape is a deliberate part of
//! the contract, matching the piecewise-linear level interpolation used
//! elsewhere in the signal path.

/// Lifecycle of the envelope. [`AdEnvelope::start`] enters `Attack` from
/// any state; `Decay` returns to `Idle` when it completes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    #[default]
    Idle,
    Attack,
    Decay,
}

#[derive(Debug, Default)]
pub struct AdEnvelope {
    state: EnvelopeState,
    phase: f32,
    attack_increment: f32,
    decay_increment: f32,
    peak: f32,
    sample_rate: f32,
}

impl AdEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.attack_increment = 0.0;
        self.decay_increment = 0.0;
        self.peak = 0.0;
        self.reset();
    }

    /// Forces the envelope back to idle, discarding in-flight progress.
    /// Used for voice stealing and abrupt cutoff.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.phase = 0.0;
    }

    /// (Re)triggers the envelope, entering the attack segment from any
    /// state.
    ///
    /// `attack` and `decay` are durations in seconds, `velocity` in
    /// `0..=1` scales the peak level. A duration of zero makes the
    /// segment complete within the same [`Self::sample`] call; a velocity
    /// of zero yields a valid, silent envelope.
    pub fn start(&mut self, attack: f32, decay: f32, velocity: f32) {
        self.attack_increment = segment_increment(attack, self.sample_rate);
        self.decay_increment = segment_increment(decay, self.sample_rate);
        self.peak = velocity;
        self.phase = 0.0;
        self.state = EnvelopeState::Attack;
    }

    #[inline]
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Advances the envelope by one sample period and returns the current
    /// amplitude. Idle envelopes return 0 without mutating anything.
    #[inline]
    pub fn sample(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => 0.0,
            EnvelopeState::Attack => {
                self.phase += self.attack_increment;
                if self.phase < 1.0 {
                    self.peak * self.phase
                } else {
                    self.state = EnvelopeState::Decay;
                    self.phase = 0.0;
                    // A zero-length attack must not stall for a sample.
                    self.decay_sample()
                }
            }
            EnvelopeState::Decay => self.decay_sample(),
        }
    }

    #[inline]
    fn decay_sample(&mut self) -> f32 {
        self.phase += self.decay_increment;
        if self.phase < 1.0 {
            self.peak * (1.0 - self.phase)
        } else {
            self.state = EnvelopeState::Idle;
            self.phase = 0.0;
            0.0
        }
    }
}

#[inline]
fn segment_increment(duration: f32, sample_rate: f32) -> f32 {
    if duration <= 0.0 {
        // Completes on the first advance instead of dividing by zero.
        2.0
    } else {
        1.0 / (duration * sample_rate)
    }
}
