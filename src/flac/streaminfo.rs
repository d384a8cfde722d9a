// STREAMINFO block decoding
//
// STREAMINFO is the mandatory first metadata block of a FLAC stream. Its
// 34-byte payload is bit-packed; the sample-rate and total-samples fields
// straddle byte boundaries and are extracted with the shift/mask scheme
// documented on `parse`.

use std::io::{self, Read};

use crate::utils::io::be_bytes_to_u64;

/// STREAMINFO payload size in bytes, fixed by the format.
pub const STREAMINFO_LEN: usize = 34;

/// Decoded STREAMINFO record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Minimum block size in samples
    pub min_block_size: u16,
    /// Maximum block size in samples
    pub max_block_size: u16,
    /// Minimum frame size in bytes (0 = unknown)
    pub min_frame_size: u32,
    /// Maximum frame size in bytes (0 = unknown)
    pub max_frame_size: u32,
    /// Sample rate in Hz (0 is invalid per the format)
    pub sample_rate: u32,
    /// Number of channels (1-8)
    pub channels: u8,
    /// Bits per sample (4-32)
    pub bits_per_sample: u8,
    /// Total inter-channel samples in the stream (0 = unknown)
    pub total_samples: u64,
    /// MD5 signature of the unencoded audio data
    pub md5: [u8; 16],
}

impl StreamInfo {
    /// Read and decode a STREAMINFO payload from the reader
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut payload = [0u8; STREAMINFO_LEN];
        reader.read_exact(&mut payload)?;
        Ok(Self::parse(&payload))
    }

    /// Decode the fixed 34-byte STREAMINFO payload.
    ///
    /// Byte layout (0-indexed):
    ///   0-1   min block size (16 bits)
    ///   2-3   max block size (16 bits)
    ///   4-6   min frame size (24 bits)
    ///   7-9   max frame size (24 bits)
    ///   10-13 sample rate (20 bits), channels-1 (3 bits),
    ///         bits-per-sample-1 (5 bits), top 4 bits of total samples
    ///   14-17 low 32 bits of the 36-bit total-samples field
    ///   18-33 MD5 signature
    pub fn parse(payload: &[u8; STREAMINFO_LEN]) -> Self {
        let min_block_size = be_bytes_to_u64(&payload[0..2]) as u16;
        let max_block_size = be_bytes_to_u64(&payload[2..4]) as u16;
        let min_frame_size = be_bytes_to_u64(&payload[4..7]) as u32;
        let max_frame_size = be_bytes_to_u64(&payload[7..10]) as u32;

        // Top 20 of the 24 bits in bytes 10-12; the low 4 bits belong to
        // the channel-count field.
        let sample_rate = (be_bytes_to_u64(&payload[10..13]) >> 4) as u32;
        let channels = ((payload[12] >> 1) & 0x07) + 1;
        let bits_per_sample = (((payload[12] & 0x01) << 4) | (payload[13] >> 4)) + 1;

        // Low 4 bits of byte 13 concatenated with bytes 14-17
        let sample_bytes = [
            payload[13] & 0x0F,
            payload[14],
            payload[15],
            payload[16],
            payload[17],
        ];
        let total_samples = be_bytes_to_u64(&sample_bytes);

        let mut md5 = [0u8; 16];
        md5.copy_from_slice(&payload[18..34]);

        StreamInfo {
            min_block_size,
            max_block_size,
            min_frame_size,
            max_frame_size,
            sample_rate,
            channels,
            bits_per_sample,
            total_samples,
            md5,
        }
    }

    /// Stream duration in seconds, or `None` when the sample rate is the
    /// invalid value 0.
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.sample_rate == 0 {
            return None;
        }
        Some(self.total_samples as f64 / f64::from(self.sample_rate))
    }
}
