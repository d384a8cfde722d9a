// FLAC metadata parsing
//
// Walks the metadata block sequence of a FLAC file far enough to decode the
// STREAMINFO record and derive the stream duration. The audio-frame payload
// is never read.

pub mod metadata;
pub mod streaminfo;

pub use metadata::{BlockHeader, BlockType, FLAC_SIGNATURE};
pub use streaminfo::{StreamInfo, STREAMINFO_LEN};

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Errors surfaced by the FLAC metadata parser
#[derive(Debug)]
pub enum FlacError {
    /// The file does not start with the `fLaC` signature
    InvalidFormat,
    /// An underlying read failed
    Io(io::Error),
    /// The stream ended before a STREAMINFO block appeared
    StreaminfoNotFound,
    /// STREAMINFO declares a sample rate of zero
    InvalidSampleRate,
}

impl std::fmt::Display for FlacError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlacError::InvalidFormat => write!(f, "not a FLAC file (bad signature)"),
            FlacError::Io(e) => write!(f, "I/O error: {}", e),
            FlacError::StreaminfoNotFound => {
                write!(f, "no STREAMINFO block before end of stream")
            }
            FlacError::InvalidSampleRate => {
                write!(f, "STREAMINFO declares a sample rate of zero")
            }
        }
    }
}

impl std::error::Error for FlacError {}

impl From<io::Error> for FlacError {
    fn from(e: io::Error) -> Self {
        FlacError::Io(e)
    }
}

/// Return the duration of a FLAC file in seconds.
pub fn parse_duration<P: AsRef<Path>>(path: P) -> Result<f64, FlacError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_duration_from(&mut reader)
}

/// Read the stream duration from an open FLAC byte stream.
///
/// Validates the signature, then walks metadata block headers, skipping
/// every block until STREAMINFO (type 0). Duration is total samples over
/// sample rate; blocks past STREAMINFO are never read.
pub fn read_duration_from<R: Read>(reader: &mut R) -> Result<f64, FlacError> {
    let mut signature = [0u8; 4];
    match reader.read_exact(&mut signature) {
        Ok(()) => {}
        // A file shorter than the signature is not a FLAC file
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(FlacError::InvalidFormat)
        }
        Err(e) => return Err(FlacError::Io(e)),
    }
    if signature != *FLAC_SIGNATURE {
        return Err(FlacError::InvalidFormat);
    }

    loop {
        let header = match BlockHeader::read(reader) {
            Ok(header) => header,
            // Running out of headers means the stream carried no STREAMINFO
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(FlacError::StreaminfoNotFound)
            }
            Err(e) => return Err(FlacError::Io(e)),
        };

        if header.block_type != BlockType::StreamInfo {
            header.skip_payload(reader)?;
            continue;
        }

        // STREAMINFO payloads are always 34 bytes
        let info = StreamInfo::read(reader)?;
        return info.duration_seconds().ok_or(FlacError::InvalidSampleRate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write as _;

    /// STREAMINFO payload for a mono 16-bit stream
    fn streaminfo_payload(sample_rate: u32, total_samples: u64) -> [u8; STREAMINFO_LEN] {
        let mut p = [0u8; STREAMINFO_LEN];
        p[0..2].copy_from_slice(&4096u16.to_be_bytes());
        p[2..4].copy_from_slice(&4096u16.to_be_bytes());
        let rate_bits = sample_rate << 4;
        p[10] = (rate_bits >> 16) as u8;
        p[11] = (rate_bits >> 8) as u8;
        p[12] = rate_bits as u8;
        p[13] = 0xF0 | ((total_samples >> 32) & 0x0F) as u8;
        p[14..18].copy_from_slice(&((total_samples & 0xFFFF_FFFF) as u32).to_be_bytes());
        p
    }

    /// Assemble signature + (type, payload) blocks into a byte stream
    fn flac_stream(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
        let mut data = FLAC_SIGNATURE.to_vec();
        for (block_type, payload) in blocks {
            data.push(*block_type);
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..4]);
            data.extend_from_slice(payload);
        }
        data
    }

    #[test]
    fn test_rejects_bad_signature() {
        let mut cursor = Cursor::new(b"fLaX\x00\x00\x00\x22".to_vec());
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::InvalidFormat)
        ));
    }

    #[test]
    fn test_rejects_empty_stream() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::InvalidFormat)
        ));
    }

    #[test]
    fn test_signature_only_is_streaminfo_not_found() {
        let mut cursor = Cursor::new(FLAC_SIGNATURE.to_vec());
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::StreaminfoNotFound)
        ));
    }

    #[test]
    fn test_streaminfo_first_block() {
        let stream = flac_stream(&[(0, streaminfo_payload(44100, 441_000).to_vec())]);
        let mut cursor = Cursor::new(stream);
        assert_eq!(read_duration_from(&mut cursor).unwrap(), 10.0);
    }

    #[test]
    fn test_skips_preceding_blocks() {
        let stream = flac_stream(&[
            (1, vec![0u8; 17]),                                 // padding
            (4, b"vendor and comments".to_vec()),               // vorbis comment
            (1, Vec::new()),                                    // zero-length padding
            (0, streaminfo_payload(16_000, 8_000).to_vec()),
        ]);
        let mut cursor = Cursor::new(stream);
        assert_eq!(read_duration_from(&mut cursor).unwrap(), 0.5);
    }

    #[test]
    fn test_stops_at_streaminfo() {
        // Bytes after the STREAMINFO block are not valid headers; they must
        // never be read.
        let mut stream = flac_stream(&[(0, streaminfo_payload(44100, 44100).to_vec())]);
        stream.extend_from_slice(&[0xFF, 0xF8, 0x69, 0x18]);
        let mut cursor = Cursor::new(stream);
        assert_eq!(read_duration_from(&mut cursor).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_sample_rate() {
        let stream = flac_stream(&[(0, streaminfo_payload(0, 441_000).to_vec())]);
        let mut cursor = Cursor::new(stream);
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::InvalidSampleRate)
        ));
    }

    #[test]
    fn test_truncated_streaminfo_payload_is_io_error() {
        let mut stream = FLAC_SIGNATURE.to_vec();
        stream.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
        stream.extend_from_slice(&[0u8; 5]);
        let mut cursor = Cursor::new(stream);
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::Io(_))
        ));
    }

    #[test]
    fn test_truncated_trailing_header_is_streaminfo_not_found() {
        let mut stream = flac_stream(&[(1, vec![0u8; 4])]);
        stream.extend_from_slice(&[0x00, 0x00]); // two header bytes, then EOF
        let mut cursor = Cursor::new(stream);
        assert!(matches!(
            read_duration_from(&mut cursor),
            Err(FlacError::StreaminfoNotFound)
        ));
    }

    #[test]
    fn test_parse_duration_from_file() {
        let stream = flac_stream(&[
            (4, b"reference encoder".to_vec()),
            (0, streaminfo_payload(22_050, 66_150).to_vec()),
        ]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&stream).unwrap();

        assert_eq!(parse_duration(file.path()).unwrap(), 3.0);
    }

    #[test]
    fn test_parse_duration_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_duration(dir.path().join("nope.flac"));
        assert!(matches!(result, Err(FlacError::Io(_))));
    }
}
