//! Renders a short FM phrase through the whole signal path and writes it
//! to `out/render_voice.wav`.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use fm_synth_dsp::cos_tilt::CosTiltLfo;
use fm_synth_dsp::envelope::AdEnvelope;
use fm_synth_dsp::fast_math;
use fm_synth_dsp::ladder::LadderFilter;
use fm_synth_dsp::operator::Operator;
use fm_synth_dsp::patch::OperatorPatch;
use fm_synth_dsp::SAMPLE_RATE;

const BLOCK_SIZE: usize = 24;
const NOTES: [f32; 4] = [110.0, 146.83, 164.81, 220.0];
const NOTE_DURATION: f32 = 0.5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logger::SimpleLogger::new().init()?;

    fast_math::init_tables();

    let mut carrier = Operator::new();
    let mut modulator = Operator::new();
    let mut envelope = AdEnvelope::new();
    let mut lfo = CosTiltLfo::new();
    let mut filter = LadderFilter::new();

    carrier.init(SAMPLE_RATE);
    modulator.init(SAMPLE_RATE);
    envelope.init(SAMPLE_RATE);
    lfo.init(SAMPLE_RATE);
    filter.init(SAMPLE_RATE);
    filter.set_resonance(2.5)?;

    let carrier_patch = OperatorPatch::new(1, 1.0);
    let modulator_patch = OperatorPatch::new(4, 0.6);

    let mut wav_data = Vec::new();
    let note_blocks = (NOTE_DURATION * SAMPLE_RATE) as usize / BLOCK_SIZE;

    for (n, note) in NOTES.iter().enumerate() {
        info!("rendering note {}/{} ({note} Hz)", n + 1, NOTES.len());

        envelope.start(0.01, 0.4, 1.0);
        filter.reset();

        let mut mod_buf = [0.0f32; BLOCK_SIZE];
        let mut out = [0.0f32; BLOCK_SIZE];
        let mut cutoff_mod = [0.0f32; BLOCK_SIZE];

        for _ in 0..note_blocks {
            mod_buf.fill(0.0);
            out.fill(0.0);
            modulator.render_add(&modulator_patch, *note, None, &mut mod_buf);
            carrier.render_add(&carrier_patch, *note, Some(&mod_buf), &mut out);

            for sample in out.iter_mut() {
                *sample *= envelope.sample();
            }

            lfo.render(0.4, 2.0, 0.8, &mut cutoff_mod);
            let cutoff = 600.0 + 500.0 * (1.0 + cutoff_mod[0]);
            filter.set_cutoff(cutoff)?;
            filter.process(&mut out);

            wav_data.extend_from_slice(&out);
        }
    }

    write_wav("out/render_voice.wav", &wav_data)?;
    info!("wrote out/render_voice.wav ({} samples)", wav_data.len());

    Ok(())
}

fn write_wav(filename: &str, samples: &[f32]) -> Result<(), hound::Error> {
    let path = Path::new(filename);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;

    for sample in samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;

    Ok(())
}
