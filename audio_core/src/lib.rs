//! In-memory audio pipeline: decode with Symphonia, slice, re-encode as
//! 16-bit PCM WAV.

pub mod decode;
pub mod wav;

pub use decode::{decode, DecodeError};
pub use wav::{encode, encode_frames, InvalidBufferError, WavFile, WAV_MIME_TYPE};

use thiserror::Error;

/// Decoded planar audio: one f32 sample buffer per channel, all the same
/// length, nominally in [-1.0, 1.0]. Decoder artifacts and gain may push
/// samples outside that range; the encoder clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

#[derive(Debug, Error, PartialEq)]
pub enum TrimError {
    #[error("trim range {start_secs}s..{end_secs}s is empty or reversed")]
    EmptyRange { start_secs: f64, end_secs: f64 },

    #[error("trim range ends at {end_secs}s but the clip lasts {duration_secs:.3}s")]
    OutOfBounds { end_secs: f64, duration_secs: f64 },
}

impl AudioClip {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Samples per channel. If the channels disagree, the shortest wins.
    pub fn frames(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Copy out the `start_secs..end_secs` range as a fresh clip.
    ///
    /// Frame indices are derived the way the sample positions are addressed
    /// during playback: seconds times sample rate, truncated.
    pub fn trim(&self, start_secs: f64, end_secs: f64) -> Result<AudioClip, TrimError> {
        if !(start_secs >= 0.0) || !(end_secs > start_secs) {
            return Err(TrimError::EmptyRange {
                start_secs,
                end_secs,
            });
        }

        let start_frame = (start_secs * self.sample_rate as f64) as usize;
        let end_frame = (end_secs * self.sample_rate as f64) as usize;
        if end_frame > self.frames() {
            return Err(TrimError::OutOfBounds {
                end_secs,
                duration_secs: self.duration_secs(),
            });
        }
        if start_frame >= end_frame {
            return Err(TrimError::EmptyRange {
                start_secs,
                end_secs,
            });
        }

        let channels = self
            .channels
            .iter()
            .map(|channel| channel[start_frame..end_frame].to_vec())
            .collect();
        Ok(AudioClip::new(self.sample_rate, channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_clip(sample_rate: u32, frames: usize) -> AudioClip {
        let ramp: Vec<f32> = (0..frames).map(|i| i as f32 / frames as f32).collect();
        AudioClip::new(sample_rate, vec![ramp])
    }

    #[test]
    fn frames_and_duration() {
        let clip = ramp_clip(100, 250);
        assert_eq!(clip.frames(), 250);
        assert_eq!(clip.channel_count(), 1);
        assert!((clip.duration_secs() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn trim_selects_the_expected_frame_range() {
        let clip = ramp_clip(100, 400);
        let cut = clip.trim(1.0, 3.0).unwrap();
        assert_eq!(cut.frames(), 200);
        assert_eq!(cut.sample_rate(), 100);
        assert_eq!(cut.channels()[0][0], clip.channels()[0][100]);
        assert_eq!(cut.channels()[0][199], clip.channels()[0][299]);
    }

    #[test]
    fn trim_trims_all_channels() {
        let clip = AudioClip::new(10, vec![vec![0.1; 50], vec![0.2; 50]]);
        let cut = clip.trim(0.5, 2.5).unwrap();
        assert_eq!(cut.channel_count(), 2);
        assert_eq!(cut.frames(), 20);
    }

    #[test]
    fn trim_rejects_reversed_and_out_of_range_selections() {
        let clip = ramp_clip(100, 100);
        assert!(matches!(
            clip.trim(0.8, 0.2),
            Err(TrimError::EmptyRange { .. })
        ));
        assert!(matches!(
            clip.trim(-0.5, 0.5),
            Err(TrimError::EmptyRange { .. })
        ));
        assert!(matches!(
            clip.trim(0.0, 2.0),
            Err(TrimError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn trimmed_clip_encodes() {
        let clip = ramp_clip(8000, 8000);
        let cut = clip.trim(0.25, 0.75).unwrap();
        let wav = encode(&cut).unwrap();
        assert_eq!(wav.len(), 44 + 4000 * 2);
    }
}
