// flacdur - FLAC duration extraction and speech corpus indexing
//
// The `flac` module parses just enough of a FLAC container to compute the
// stream duration; the `corpus` module pairs those durations with
// transcript text for a directory of recordings.

pub mod corpus;
pub mod flac;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use corpus::{CorpusEntry, CorpusError, CorpusIndex, ScanFailure};
pub use flac::{parse_duration, FlacError, StreamInfo};
