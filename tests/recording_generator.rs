use hound::{WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::PathBuf;

/// Write a sung-vowel-like tone with light vibrato for use as a recording fixture
pub fn generate_vocal_take(
    frequency: f32,
    duration_secs: f32,
    sample_rate: u32,
    filename: &str,
) -> PathBuf {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    let amplitude = i16::MAX as f32 * 0.5;
    let vibrato_rate = 5.5;
    let vibrato_depth = 0.01;

    let path = PathBuf::from(filename);
    let mut writer = WavWriter::create(&path, spec).unwrap();

    let mut phase = 0.0f32;
    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;
        let freq = frequency * (1.0 + vibrato_depth * (2.0 * PI * vibrato_rate * t).sin());
        phase += 2.0 * PI * freq / sample_rate as f32;
        // Fundamental plus two weaker harmonics
        let sample = phase.sin() + 0.4 * (2.0 * phase).sin() + 0.2 * (3.0 * phase).sin();
        writer.write_sample((sample / 1.6 * amplitude) as i16).unwrap();
    }

    writer.finalize().unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_vocal_take() {
        let path = generate_vocal_take(220.0, 0.25, 44100, "/tmp/vocal_feedback_take.wav");
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }
}
