//! Audio decoding via Symphonia.
//!
//! Probe, track selection and the codec are all constructed per call and
//! dropped when the call returns; there is no process-wide decoding context.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::AudioClip;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized or unsupported audio format")]
    UnsupportedFormat(#[source] SymphoniaError),

    #[error("no decodable audio track")]
    NoAudioTrack,

    #[error("decoded stream contains no samples")]
    EmptyStream,

    #[error("decode failed: {0}")]
    Codec(#[from] SymphoniaError),
}

/// Decode a compressed audio file held in memory into planar f32 samples.
///
/// The first track carrying a sample rate and channel layout is decoded in
/// full. Damaged packets are skipped, matching player behavior.
pub fn decode(data: &[u8]) -> Result<AudioClip, DecodeError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(DecodeError::UnsupportedFormat)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.sample_rate.is_some() && t.codec_params.channels.is_some())
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params.sample_rate.ok_or(DecodeError::NoAudioTrack)?;
    let channel_count = codec_params
        .channels
        .ok_or(DecodeError::NoAudioTrack)?
        .count();
    if channel_count == 0 {
        return Err(DecodeError::NoAudioTrack);
    }

    let mut decoder =
        symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an I/O error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    let duration = decoded.capacity() as u64;
                    sample_buf = Some(SampleBuffer::new(duration, spec));
                }
                if let Some(buf) = &mut sample_buf {
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
            }
            Err(SymphoniaError::IoError(_)) => break,
            // Skip damaged packets.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(DecodeError::Codec(e)),
        }
    }

    if interleaved.is_empty() {
        return Err(DecodeError::EmptyStream);
    }

    let frames = interleaved.len() / channel_count;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(AudioClip::new(sample_rate, channels))
}
