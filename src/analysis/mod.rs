use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::Config;
use crate::error::AnalysisError;
use crate::metrics::AnalysisSnapshot;
use crate::recommend::{recommend, Recommendation};

const PITCH_TRACE_POINTS: usize = 50;
const RHYTHM_TRACE_BEATS: u32 = 20;

/// Metadata of a submitted audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub file_name: String,
    pub file_size: u64,
}

impl Recording {
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
        }
    }

    /// Read name and size of a file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(file_name, metadata.len()))
    }

    /// Upper-cased file extension, e.g. "WAV"
    pub fn format(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_uppercase())
            .filter(|ext| !ext.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchPoint {
    /// Seconds from the start of the recording
    pub time: f64,
    /// Sung pitch in Hz
    pub pitch: f64,
    /// Target pitch in Hz
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmBeat {
    pub beat: u32,
    pub accuracy: f64,
    pub timing_offset_ms: f64,
}

/// Everything produced by analysing one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_name: String,
    pub file_size: u64,
    pub format: String,
    pub duration_secs: u32,
    pub analyzed_at: DateTime<Utc>,
    pub snapshot: AnalysisSnapshot,
    pub pitch_trace: Vec<PitchPoint>,
    pub rhythm_trace: Vec<RhythmBeat>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    /// Load a result previously saved as JSON
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the result as pretty-printed JSON
    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Values drawn for one recording before the artificial delay
struct Draw {
    snapshot: AnalysisSnapshot,
    resonance: f64,
    duration_secs: u32,
    pitch_trace: Vec<PitchPoint>,
    rhythm_trace: Vec<RhythmBeat>,
}

/// Produces synthetic analysis results; no audio is decoded.
///
/// The random source is injected so tests can seed it.
pub struct MockAnalyzer<R = StdRng> {
    rng: Mutex<R>,
    delay: Duration,
    supported_formats: Vec<String>,
    max_file_size_bytes: u64,
    min_recommendations: usize,
}

impl MockAnalyzer<StdRng> {
    /// Create an analyzer from configuration; seeded when `config.seed` is set
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                info!("Using fixed analysis seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self {
            rng: Mutex::new(rng),
            delay: Duration::from_millis(config.analysis_delay_ms),
            supported_formats: config.supported_formats.clone(),
            max_file_size_bytes: config.max_file_size_bytes,
            min_recommendations: config.min_recommendations,
        }
    }
}

impl<R: Rng + Send> MockAnalyzer<R> {
    /// Create an analyzer around any random source, with default limits
    pub fn with_rng(rng: R, delay: Duration) -> Self {
        let defaults = Config::default();
        Self {
            rng: Mutex::new(rng),
            delay,
            supported_formats: defaults.supported_formats,
            max_file_size_bytes: defaults.max_file_size_bytes,
            min_recommendations: defaults.min_recommendations,
        }
    }

    /// Analyse one recording after the configured delay
    pub async fn analyze(&self, recording: &Recording) -> Result<AnalysisResult, AnalysisError> {
        let format = self.check(recording)?;
        debug!("Analysing {} ({} bytes)", recording.file_name, recording.file_size);

        // Values are drawn before sleeping so concurrent callers draw in poll order
        let draw = self.draw();
        tokio::time::sleep(self.delay).await;

        let recommendations = recommend(&draw.snapshot, draw.resonance, self.min_recommendations);
        info!(
            "Analysed {}: {} recommendation(s)",
            recording.file_name,
            recommendations.len()
        );

        Ok(AnalysisResult {
            file_name: recording.file_name.clone(),
            file_size: recording.file_size,
            format,
            duration_secs: draw.duration_secs,
            analyzed_at: Utc::now(),
            snapshot: draw.snapshot,
            pitch_trace: draw.pitch_trace,
            rhythm_trace: draw.rhythm_trace,
            recommendations,
        })
    }

    /// Analyse two recordings concurrently; fails if either analysis fails
    pub async fn analyze_pair(
        &self,
        previous: &Recording,
        current: &Recording,
    ) -> Result<(AnalysisResult, AnalysisResult), AnalysisError> {
        tokio::try_join!(self.analyze(previous), self.analyze(current))
    }

    fn check(&self, recording: &Recording) -> Result<String, AnalysisError> {
        if recording.file_size == 0 {
            return Err(AnalysisError::EmptyRecording(recording.file_name.clone()));
        }
        if recording.file_size > self.max_file_size_bytes {
            return Err(AnalysisError::FileTooLarge {
                file_name: recording.file_name.clone(),
                size: recording.file_size,
                limit: self.max_file_size_bytes,
            });
        }
        recording
            .format()
            .filter(|format| {
                self.supported_formats
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(format))
            })
            .ok_or_else(|| AnalysisError::UnsupportedFormat(recording.file_name.clone()))
    }

    fn draw(&self) -> Draw {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            // The generator holds no invariants a panic could break
            Err(poisoned) => poisoned.into_inner(),
        };

        let pitch_accuracy = rng.gen_range(65.0..95.0);
        let rhythm_accuracy = rng.gen_range(60.0..95.0);
        let dynamic_range = rng.gen_range(15.0..40.0);
        let vocal_stability = rng.gen_range(55.0..95.0);
        let resonance = rng.gen_range(65.0..95.0);
        let duration_secs = rng.gen_range(30..210);

        let pitch_trace = (0..PITCH_TRACE_POINTS)
            .map(|i| {
                let i = i as f64;
                PitchPoint {
                    time: i * 0.1,
                    pitch: 220.0 + rng.gen::<f64>() * 440.0 + (i * 0.2).sin() * 50.0,
                    target: 220.0 + rng.gen::<f64>() * 440.0,
                }
            })
            .collect();

        let rhythm_trace = (1..=RHYTHM_TRACE_BEATS)
            .map(|beat| RhythmBeat {
                beat,
                accuracy: rng.gen_range(70.0..95.0),
                timing_offset_ms: (rng.gen::<f64>() - 0.5) * 100.0,
            })
            .collect();

        Draw {
            snapshot: AnalysisSnapshot::new(
                pitch_accuracy,
                rhythm_accuracy,
                vocal_stability,
                dynamic_range,
            ),
            resonance,
            duration_secs,
            pitch_trace,
            rhythm_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_format() {
        assert_eq!(Recording::new("take1.wav", 10).format(), Some("WAV".to_string()));
        assert_eq!(Recording::new("song.Mp3", 10).format(), Some("MP3".to_string()));
        assert_eq!(Recording::new("README", 10).format(), None);
    }

    #[test]
    fn test_check_rejects_bad_recordings() {
        let analyzer = MockAnalyzer::with_rng(StdRng::seed_from_u64(1), Duration::ZERO);
        assert!(matches!(
            analyzer.check(&Recording::new("empty.wav", 0)),
            Err(AnalysisError::EmptyRecording(_))
        ));
        assert!(matches!(
            analyzer.check(&Recording::new("notes.txt", 12)),
            Err(AnalysisError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            analyzer.check(&Recording::new("long.wav", 10 * 1024 * 1024 + 1)),
            Err(AnalysisError::FileTooLarge {
                limit: 10_485_760,
                ..
            })
        ));
        assert_eq!(
            analyzer
                .check(&Recording::new("limit.wav", 10 * 1024 * 1024))
                .unwrap(),
            "WAV"
        );
        assert_eq!(
            analyzer.check(&Recording::new("take.flac", 12)).unwrap(),
            "FLAC"
        );
    }

    #[test]
    fn test_draw_trace_shapes() {
        let analyzer = MockAnalyzer::with_rng(StdRng::seed_from_u64(7), Duration::ZERO);
        let draw = analyzer.draw();
        assert_eq!(draw.pitch_trace.len(), PITCH_TRACE_POINTS);
        assert_eq!(draw.rhythm_trace.len(), RHYTHM_TRACE_BEATS as usize);
        assert_eq!(draw.rhythm_trace[0].beat, 1);
        assert!(draw.snapshot.validate("current").is_ok());
        assert!((65.0..95.0).contains(&draw.resonance));
    }
}
