//! In-memory audio clips — the unit of exchange with the recognition service.
//!
//! An [`AudioClip`] is raw encoded bytes plus a format tag. Clips are
//! ephemeral: produced by the recorder or a file upload, consumed once by
//! the recognition adapter, never persisted.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

// ---------------------------------------------------------------------------
// AudioFormat
// ---------------------------------------------------------------------------

/// Container format of an [`AudioClip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// MIME type sent alongside the clip bytes.
    pub fn mime(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<AudioFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ClipError
// ---------------------------------------------------------------------------

/// Errors that can occur while building an [`AudioClip`].
#[derive(Debug, Error)]
pub enum ClipError {
    /// The uploaded file has an extension outside the wav/mp3 set.
    #[error("unsupported audio format: {0} (expected wav or mp3)")]
    UnsupportedFormat(String),

    /// Reading the uploaded file failed.
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    /// WAV encoding of captured samples failed.
    #[error("failed to encode WAV: {0}")]
    Encode(String),

    /// There were no samples to encode.
    #[error("recording contained no audio")]
    Empty,
}

// ---------------------------------------------------------------------------
// AudioClip
// ---------------------------------------------------------------------------

/// Raw encoded audio bytes plus their container format.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Encoded file contents (a complete WAV or MP3 file).
    pub bytes: Vec<u8>,
    /// Container format of `bytes`.
    pub format: AudioFormat,
}

impl AudioClip {
    /// Encode captured PCM samples into an in-memory WAV clip.
    ///
    /// `samples` are interleaved `f32` in `[-1.0, 1.0]` exactly as delivered
    /// by the capture callback; the clip keeps the device's native
    /// `sample_rate` and `channels` — the recognition service takes the
    /// waveform however the source provided it.
    pub fn from_samples(
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, ClipError> {
        if samples.is_empty() {
            return Err(ClipError::Empty);
        }

        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| ClipError::Encode(e.to_string()))?;
            for &sample in samples {
                let clamped = sample.clamp(-1.0, 1.0);
                writer
                    .write_sample((clamped * i16::MAX as f32) as i16)
                    .map_err(|e| ClipError::Encode(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| ClipError::Encode(e.to_string()))?;
        }

        Ok(Self {
            bytes: cursor.into_inner(),
            format: AudioFormat::Wav,
        })
    }

    /// Read an uploaded audio file, inferring the format from its extension.
    ///
    /// # Errors
    ///
    /// [`ClipError::UnsupportedFormat`] when the extension is not wav/mp3;
    /// [`ClipError::Io`] when the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClipError> {
        let path = path.as_ref();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let format = AudioFormat::from_extension(ext)
            .ok_or_else(|| ClipError::UnsupportedFormat(ext.to_string()))?;

        let bytes = std::fs::read(path)?;
        Ok(Self { bytes, format })
    }

    /// Filename hint sent with the multipart upload (`clip.wav` / `clip.mp3`).
    pub fn file_name(&self) -> String {
        format!("clip.{}", self.format.extension())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_produces_wav_header() {
        let samples = vec![0.0f32; 1_600];
        let clip = AudioClip::from_samples(&samples, 16_000, 1).unwrap();
        assert_eq!(clip.format, AudioFormat::Wav);
        // RIFF....WAVE container magic.
        assert_eq!(&clip.bytes[0..4], b"RIFF");
        assert_eq!(&clip.bytes[8..12], b"WAVE");
    }

    #[test]
    fn from_samples_preserves_native_rate_and_channels() {
        let samples = vec![0.1f32; 4_410 * 2];
        let clip = AudioClip::from_samples(&samples, 44_100, 2).unwrap();

        let reader = hound::WavReader::new(Cursor::new(clip.bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.bits_per_sample, 16);
    }

    #[test]
    fn from_samples_rejects_empty_input() {
        let err = AudioClip::from_samples(&[], 16_000, 1).unwrap_err();
        assert!(matches!(err, ClipError::Empty));
    }

    #[test]
    fn from_samples_clamps_out_of_range() {
        // Samples beyond [-1, 1] must not wrap when converted to i16.
        let samples = vec![2.0f32, -2.0f32, 0.0f32, 0.0f32];
        let clip = AudioClip::from_samples(&samples, 8_000, 1).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(clip.bytes)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded[0], i16::MAX);
        assert_eq!(decoded[1], -i16::MAX);
    }

    #[test]
    fn from_file_reads_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.wav");
        std::fs::write(&path, b"RIFF fake wav body").unwrap();

        let clip = AudioClip::from_file(&path).unwrap();
        assert_eq!(clip.format, AudioFormat::Wav);
        assert_eq!(clip.bytes, b"RIFF fake wav body");
        assert_eq!(clip.file_name(), "clip.wav");
    }

    #[test]
    fn from_file_reads_mp3_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.MP3");
        std::fs::write(&path, b"mp3 body").unwrap();

        let clip = AudioClip::from_file(&path).unwrap();
        assert_eq!(clip.format, AudioFormat::Mp3);
        assert_eq!(clip.file_name(), "clip.mp3");
    }

    #[test]
    fn from_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.ogg");
        std::fs::write(&path, b"ogg body").unwrap();

        let err = AudioClip::from_file(&path).unwrap_err();
        assert!(matches!(err, ClipError::UnsupportedFormat(_)));
    }

    #[test]
    fn from_file_rejects_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech");
        std::fs::write(&path, b"body").unwrap();

        assert!(matches!(
            AudioClip::from_file(&path).unwrap_err(),
            ClipError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn mime_types() {
        assert_eq!(AudioFormat::Wav.mime(), "audio/wav");
        assert_eq!(AudioFormat::Mp3.mime(), "audio/mpeg");
    }
}
