//! 16-bit PCM WAV (RIFF) encoding.
//!
//! Produces a byte-exact canonical container: a 44-byte header followed by
//! frame-interleaved signed 16-bit little-endian samples. The encoder is a
//! pure function over an [`AudioClip`]; it never touches the filesystem.

use thiserror::Error;

use crate::AudioClip;

/// MIME type of the produced container.
pub const WAV_MIME_TYPE: &str = "audio/wav";

const HEADER_LEN: usize = 44;
const BYTES_PER_SAMPLE: usize = 2;

/// Rejected input. Raised before any output byte is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBufferError {
    #[error("audio buffer has no channels")]
    NoChannels,

    #[error("audio buffer has {0} channels, the container caps at 65535")]
    TooManyChannels(usize),

    #[error("channel {channel} holds {available} samples, {requested} requested")]
    ShortChannel {
        channel: usize,
        available: usize,
        requested: usize,
    },
}

/// A complete in-memory WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFile {
    bytes: Vec<u8>,
}

impl WavFile {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total size in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }
}

/// Little-endian byte writer for RIFF chunks. Owns the write cursor so the
/// header layout reads as a flat sequence of typed writes.
struct RiffWriter {
    buf: Vec<u8>,
}

impl RiffWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn tag(&mut self, tag: &[u8; 4]) {
        self.buf.extend_from_slice(tag);
    }

    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a whole clip as 16-bit PCM WAV.
pub fn encode(clip: &AudioClip) -> Result<WavFile, InvalidBufferError> {
    encode_frames(clip, clip.frames())
}

/// Encode the first `frames` frames of a clip as 16-bit PCM WAV.
///
/// Every channel must hold at least `frames` samples; `frames` may be zero,
/// which yields the 44-byte header with an empty data chunk.
pub fn encode_frames(clip: &AudioClip, frames: usize) -> Result<WavFile, InvalidBufferError> {
    let channels = clip.channels();
    if channels.is_empty() {
        return Err(InvalidBufferError::NoChannels);
    }
    if channels.len() > u16::MAX as usize {
        return Err(InvalidBufferError::TooManyChannels(channels.len()));
    }
    for (i, channel) in channels.iter().enumerate() {
        if channel.len() < frames {
            return Err(InvalidBufferError::ShortChannel {
                channel: i,
                available: channel.len(),
                requested: frames,
            });
        }
    }

    let channel_count = channels.len();
    let data_len = frames * channel_count * BYTES_PER_SAMPLE;
    let total_len = HEADER_LEN + data_len;
    let block_align = (channel_count * BYTES_PER_SAMPLE) as u16;
    let byte_rate = clip.sample_rate() * block_align as u32;

    let mut w = RiffWriter::with_capacity(total_len);
    w.tag(b"RIFF");
    w.u32((total_len - 8) as u32);
    w.tag(b"WAVE");

    w.tag(b"fmt ");
    w.u32(16); // fmt chunk size for plain PCM
    w.u16(1); // audio format: uncompressed linear PCM
    w.u16(channel_count as u16);
    w.u32(clip.sample_rate());
    w.u32(byte_rate);
    w.u16(block_align);
    w.u16(16); // bits per sample

    w.tag(b"data");
    w.u32(data_len as u32);

    for frame in 0..frames {
        for channel in channels {
            w.i16(quantize(channel[frame]));
        }
    }

    Ok(WavFile {
        bytes: w.into_inner(),
    })
}

/// Map a float sample to signed 16-bit.
///
/// Clamps to [-1.0, 1.0], scales negatives by 32768 and non-negatives by
/// 32767 so both ends of the i16 range are reachable, then truncates toward
/// zero. Matches the asymmetric-scale-and-truncate behavior standard players
/// expect from minimal encoders.
fn quantize(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    fn payload_i16(bytes: &[u8]) -> Vec<i16> {
        bytes[HEADER_LEN..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect()
    }

    #[test]
    fn header_and_payload_for_known_mono_clip() {
        let clip = AudioClip::new(44100, vec![vec![0.0, 0.5, -0.5, 1.0, -1.0]]);
        let wav = encode(&clip).unwrap();
        let bytes = wav.bytes();

        assert_eq!(bytes.len(), 54);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(bytes, 4), 54 - 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(bytes, 16), 16);
        assert_eq!(u16_at(bytes, 20), 1);
        assert_eq!(u16_at(bytes, 22), 1);
        assert_eq!(u32_at(bytes, 24), 44100);
        assert_eq!(u32_at(bytes, 28), 88200);
        assert_eq!(u16_at(bytes, 32), 2);
        assert_eq!(u16_at(bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(bytes, 40), 10);

        assert_eq!(payload_i16(bytes), vec![0, 16383, -16384, 32767, -32768]);
    }

    #[test]
    fn output_length_matches_frame_and_channel_counts() {
        for (channels, frames) in [(1usize, 0usize), (1, 7), (2, 3), (6, 11)] {
            let clip = AudioClip::new(8000, vec![vec![0.25; frames]; channels]);
            let wav = encode(&clip).unwrap();
            assert_eq!(wav.len(), HEADER_LEN + frames * channels * 2);
        }
    }

    #[test]
    fn out_of_range_samples_clamp_to_full_scale() {
        let hot = AudioClip::new(22050, vec![vec![1.5, -2.0]]);
        let flat = AudioClip::new(22050, vec![vec![1.0, -1.0]]);
        assert_eq!(encode(&hot).unwrap(), encode(&flat).unwrap());
        assert_eq!(
            payload_i16(encode(&hot).unwrap().bytes()),
            vec![32767, -32768]
        );
    }

    #[test]
    fn stereo_payload_interleaves_frame_major() {
        let clip = AudioClip::new(
            48000,
            vec![vec![0.1, 0.2, 0.3], vec![-0.1, -0.2, -0.3]],
        );
        let wav = encode(&clip).unwrap();
        let samples = payload_i16(wav.bytes());

        let expected: Vec<i16> = [0.1f32, -0.1, 0.2, -0.2, 0.3, -0.3]
            .iter()
            .map(|&s| quantize(s))
            .collect();
        assert_eq!(samples, expected);
    }

    #[test]
    fn zero_frames_yields_header_only() {
        let clip = AudioClip::new(44100, vec![vec![], vec![]]);
        let wav = encode(&clip).unwrap();
        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(u32_at(wav.bytes(), 40), 0);
        assert_eq!(u32_at(wav.bytes(), 4), 36);
    }

    #[test]
    fn partial_export_reads_only_requested_frames() {
        let clip = AudioClip::new(44100, vec![vec![0.5, 0.5, 0.5, 0.5]]);
        let wav = encode_frames(&clip, 2).unwrap();
        assert_eq!(wav.len(), HEADER_LEN + 4);
        assert_eq!(payload_i16(wav.bytes()), vec![16383, 16383]);
    }

    #[test]
    fn rejects_clip_without_channels() {
        let clip = AudioClip::new(44100, vec![]);
        assert_eq!(encode(&clip), Err(InvalidBufferError::NoChannels));
    }

    #[test]
    fn rejects_short_channel_before_writing() {
        let clip = AudioClip::new(44100, vec![vec![0.0; 5], vec![0.0; 3]]);
        assert_eq!(
            encode_frames(&clip, 5),
            Err(InvalidBufferError::ShortChannel {
                channel: 1,
                available: 3,
                requested: 5,
            })
        );
    }

    #[test]
    fn quantization_is_asymmetric_and_truncating() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32768);
        assert_eq!(quantize(0.5), 16383);
        assert_eq!(quantize(-0.5), -16384);
        // 0.9999 * 32767 = 32763.7..; truncation toward zero, not rounding.
        assert_eq!(quantize(0.9999), 32763);
        assert_eq!(quantize(-0.75), -24576);
    }

    #[test]
    fn hound_parses_the_container_and_round_trips_amplitudes() {
        let input = vec![0.0f32, 0.25, -0.25, 0.9, -0.9, 1.0, -1.0];
        let clip = AudioClip::new(44100, vec![input.clone()]);
        let wav = encode(&clip).unwrap();

        let mut reader =
            hound::WavReader::new(std::io::Cursor::new(wav.into_bytes())).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(decoded.len(), input.len());
        for (&original, &code) in input.iter().zip(&decoded) {
            let scale = if original < 0.0 { 32768.0 } else { 32767.0 };
            let restored = code as f32 / scale;
            assert!(
                (restored - original).abs() <= 1.0 / 32767.0,
                "sample {original} decoded to {restored}"
            );
        }
    }
}
