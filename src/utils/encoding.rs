// Encoding utilities for transcript side-car files

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Decode transcript file contents.
///
/// Transcripts are UTF-8 in practice, but field recordings occasionally ship
/// with legacy single-byte encodings; bytes that are not valid UTF-8 are
/// decoded as Windows-1252. A leading UTF-8 BOM is stripped.
pub fn decode_transcript(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            Cow::Owned(text.into_owned())
        }
    }
}
