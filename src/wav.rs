//! Canonical RIFF/WAVE serialization.
//!
//! The container is a 44-byte header followed by interleaved 16-bit integer
//! PCM frames, left channel first. Every multi-byte field is written
//! least-significant-byte first regardless of host byte order.

use std::io::{self, Write};

use crate::config::SampleRate;
use crate::render::StereoBuffer;

/// Header length in bytes.
pub const HEADER_LEN: usize = 44;

const NUM_CHANNELS: u16 = 2;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = NUM_CHANNELS * BITS_PER_SAMPLE / 8;

/// The fixed metadata preceding the sample data: a pure function of the
/// sample rate and frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    sample_rate: u32,
    num_samples: u32,
}

impl WaveHeader {
    pub fn new(sample_rate: SampleRate, num_samples: usize) -> Self {
        Self {
            sample_rate: sample_rate.as_u32(),
            num_samples: num_samples as u32,
        }
    }

    /// Size of the `data` chunk in bytes.
    pub fn data_bytes(&self) -> u32 {
        self.num_samples * BLOCK_ALIGN as u32
    }

    /// Serializes the header into its exact byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let byte_rate = self.sample_rate * BLOCK_ALIGN as u32;
        let data_bytes = self.data_bytes();

        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(b"RIFF");
        bytes[4..8].copy_from_slice(&(36 + data_bytes).to_le_bytes());
        bytes[8..12].copy_from_slice(b"WAVE");
        bytes[12..16].copy_from_slice(b"fmt ");
        bytes[16..20].copy_from_slice(&16u32.to_le_bytes()); // PCM fmt chunk size
        bytes[20..22].copy_from_slice(&1u16.to_le_bytes()); // integer PCM
        bytes[22..24].copy_from_slice(&NUM_CHANNELS.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[28..32].copy_from_slice(&byte_rate.to_le_bytes());
        bytes[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
        bytes[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        bytes[36..40].copy_from_slice(b"data");
        bytes[40..44].copy_from_slice(&data_bytes.to_le_bytes());
        bytes
    }
}

/// Writes the header and interleaved samples to a byte sink.
///
/// The whole buffer is already materialized, so this is a single sequential
/// pass; a failure partway leaves a truncated file that must be treated as
/// corrupt in its entirety.
pub fn write_wav<W: Write>(
    sink: &mut W,
    sample_rate: SampleRate,
    buffer: &StereoBuffer,
) -> io::Result<()> {
    let header = WaveHeader::new(sample_rate, buffer.len());
    sink.write_all(&header.to_bytes())?;

    for (left, right) in buffer.left.iter().zip(&buffer.right) {
        sink.write_all(&left.to_le_bytes())?;
        sink.write_all(&right.to_le_bytes())?;
    }
    sink.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(left: Vec<i16>, right: Vec<i16>) -> StereoBuffer {
        StereoBuffer { left, right }
    }

    #[test]
    fn test_header_layout() {
        let header = WaveHeader::new(SampleRate::Hz48000, 48_000);
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(&bytes[36..40], b"data");

        let data_bytes = 48_000u32 * 4;
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36 + data_bytes);
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 48_000);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 192_000);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 4);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), data_bytes);
    }

    #[test]
    fn test_samples_are_interleaved_little_endian() {
        let mut out = Vec::new();
        let buf = buffer(vec![1, -2], vec![256, 0x1234]);
        write_wav(&mut out, SampleRate::Hz44100, &buf).unwrap();

        assert_eq!(out.len(), HEADER_LEN + 8);
        let data = &out[HEADER_LEN..];
        assert_eq!(data[0..2], 1i16.to_le_bytes());
        assert_eq!(data[2..4], 256i16.to_le_bytes());
        assert_eq!(data[4..6], (-2i16).to_le_bytes());
        assert_eq!(data[6..8], 0x1234i16.to_le_bytes());
        // explicit little-endian spot check
        assert_eq!(&data[2..4], &[0x00, 0x01]);
        assert_eq!(&data[6..8], &[0x34, 0x12]);
    }

    #[test]
    fn test_written_file_parses_with_independent_reader() {
        let mut out = Vec::new();
        let buf = buffer(vec![100, 200, 300], vec![-100, -200, -300]);
        write_wav(&mut out, SampleRate::Hz48000, &buf).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(out)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 48_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![100, -100, 200, -200, 300, -300]);
    }

    #[test]
    fn test_empty_buffer_writes_header_only() {
        let mut out = Vec::new();
        write_wav(&mut out, SampleRate::Hz44100, &buffer(vec![], vec![])).unwrap();
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(u32::from_le_bytes(out[40..44].try_into().unwrap()), 0);
    }
}
