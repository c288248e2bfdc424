//! Tests for the nonlinear ladder filter.


use fm_synth_dsp::ladder::{self, LadderFilter};
use fm_synth_dsp::{ParameterError, SAMPLE_RATE};

const BLOCK_SIZE: usize = 24;

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0, |acc, s| f32::max(acc, s.abs()))
}

#[test]
fn impulse_response_decays() {
    for cutoff in [100.0, 1000.0, 8000.0] {
        for resonance in [0.0, 0.5, 2.0, 3.5] {
            let mut filter = LadderFilter::new();
            filter.init(SAMPLE_RATE);
            filter.set_cutoff(cutoff).unwrap();
            filter.set_resonance(resonance).unwrap();
            filter.reset();

            let mut buffer = vec![0.0f32; 10_000];
            buffer[0] = 1.0;
            filter.process(&mut buffer);

            assert!(buffer.iter().all(|s| s.is_finite()));
            let early = peak(&buffer[..5_000]);
            let late = peak(&buffer[5_000..]);
            assert!(
                late < f32::max(early, 1e-6),
                "cutoff {cutoff} resonance {resonance}: {late} vs {early}"
            );
        }
    }
}

#[test]
fn self_oscillation_stays_bounded() {
    let mut filter = LadderFilter::new();
    filter.init(SAMPLE_RATE);
    filter.set_cutoff(1000.0).unwrap();
    filter.set_resonance(4.0).unwrap();
    filter.reset();

    let mut buffer = vec![0.0f32; 10_000];
    buffer[0] = 1.0;
    filter.process(&mut buffer);

    assert!(buffer.iter().all(|s| s.is_finite() && s.abs() < 10.0));
}

#[test]
fn zero_state_zero_input_stays_zero() {
    let mut filter = LadderFilter::new();
    filter.init(SAMPLE_RATE);
    filter.set_cutoff(5000.0).unwrap();
    filter.set_resonance(1.0).unwrap();
    filter.reset();

    let mut buffer = [0.0f32; 1024];
    filter.process(&mut buffer);

    assert!(buffer.iter().all(|s| *s == 0.0));
}

#[test]
fn constant_input_settles_to_dc_gain() {
    const VT: f32 = 0.312;

    let mut filter = LadderFilter::new();
    filter.init(SAMPLE_RATE);
    filter.set_cutoff(1000.0).unwrap();
    filter.set_resonance(0.1).unwrap();
    filter.reset();

    let mut buffer = vec![0.5f32; 48_000];
    filter.process(&mut buffer);

    let settled = buffer[47_999];
    assert!(settled.is_finite());
    assert!((buffer[47_000] - settled).abs() < 1e-4);
    assert!(settled.abs() < 0.5);

    // Small-signal DC gain of the structure; the input stage inverts the
    // sign and the saturation at this input level widens the tolerance.
    let expected = -0.5 / (1.0 + 0.1 / (2.0 * VT));
    assert!((settled - expected).abs() < 0.05, "{settled} vs {expected}");
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let mut filter = LadderFilter::new();
    filter.init(SAMPLE_RATE);
    filter.set_cutoff(1234.0).unwrap();

    assert!(matches!(
        filter.set_cutoff(-1.0),
        Err(ParameterError::CutoffOutOfRange(_))
    ));
    assert!(filter.set_cutoff(f32::NAN).is_err());
    assert!(filter.set_cutoff(16_000.0).is_err());
    assert!(matches!(
        filter.set_resonance(4.5),
        Err(ParameterError::ResonanceOutOfRange(_))
    ));
    assert!(filter.set_resonance(-0.1).is_err());

    // Rejection leaves the previous configuration untouched.
    assert_eq!(filter.cutoff(), 1234.0);
    assert_eq!(filter.resonance(), 0.0);

    assert!(filter.set_cutoff(ladder::max_cutoff(SAMPLE_RATE)).is_ok());
    assert!(filter.set_cutoff(0.0).is_ok());
    assert!(filter.set_resonance(4.0).is_ok());
    assert!(filter.set_resonance(0.0).is_ok());
}

#[test]
fn cutoff_sweep_render() {
    let duration = 2.0;

    let mut filter = LadderFilter::new();
    filter.init(SAMPLE_RATE);
    filter.set_resonance(3.0).unwrap();
    filter.set_drive(1.0);
    filter.reset();

    let mut out = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();
    let blocks = (duration * SAMPLE_RATE / (BLOCK_SIZE as f32)) as usize;
    let f = 55.0 / SAMPLE_RATE;
    let mut phase = 0.0f32;

    for n in 0..blocks {
        for sample in out.iter_mut() {
            phase += f;
            if phase >= 1.0 {
                phase -= 1.0;
            }
            *sample = 2.0 * phase - 1.0;
        }

        let sweep = n as f32 / blocks as f32;
        let cutoff = 100.0 * (4000.0f32 / 100.0).powf(sweep);
        filter.set_cutoff(cutoff).unwrap();
        filter.process(&mut out);
        wav_data.extend_from_slice(&out);
    }

    wav_writer::write("ladder/sweep.wav", &wav_data).ok();
}
