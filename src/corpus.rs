// Speech corpus indexing
//
// Pairs per-file FLAC durations with transcript text from a side-car file.
// Transcript lines are `<key> <spoken text>`, keyed by the FLAC filename
// stem. One unreadable file must not abort a scan, so per-file parse
// failures are collected on the index instead of propagated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::flac;
use crate::utils::encoding::decode_transcript;

/// One indexed utterance
#[derive(Debug, Clone, Serialize)]
pub struct CorpusEntry {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub transcript: Option<String>,
}

/// A FLAC file the scan could not parse
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Index of a corpus directory, keyed by FLAC filename stem
#[derive(Debug, Serialize)]
pub struct CorpusIndex {
    pub generated_at: DateTime<Utc>,
    pub entries: BTreeMap<String, CorpusEntry>,
    pub failures: Vec<ScanFailure>,
}

/// Errors that abort a corpus scan outright
#[derive(Debug)]
pub enum CorpusError {
    /// The directory path could not be turned into a glob pattern
    Pattern(glob::PatternError),
    /// Reading the directory or the transcript file failed
    Io(io::Error),
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::Pattern(e) => write!(f, "Invalid scan pattern: {}", e),
            CorpusError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CorpusError {}

impl From<glob::PatternError> for CorpusError {
    fn from(e: glob::PatternError) -> Self {
        CorpusError::Pattern(e)
    }
}

impl From<io::Error> for CorpusError {
    fn from(e: io::Error) -> Self {
        CorpusError::Io(e)
    }
}

impl CorpusIndex {
    /// Scan `dir` for `*.flac` files and build the index.
    ///
    /// `transcript` names the side-car transcript file; when `None`, the
    /// first non-FLAC regular file in the directory (lexicographic order)
    /// is used, and if there is none every entry gets `transcript: None`.
    pub fn build(dir: &Path, transcript: Option<&Path>) -> Result<Self, CorpusError> {
        let pattern = dir.join("*.flac");
        let mut paths = Vec::new();
        let mut failures = Vec::new();

        for entry in glob::glob(&pattern.to_string_lossy())? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => failures.push(ScanFailure {
                    path: e.path().to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }
        paths.sort();

        let transcripts = match transcript {
            Some(path) => read_transcripts(path)?,
            None => match locate_transcript(dir)? {
                Some(path) => read_transcripts(&path)?,
                None => HashMap::new(),
            },
        };

        let mut entries = BTreeMap::new();
        for path in paths {
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            match flac::parse_duration(&path) {
                Ok(duration_seconds) => {
                    entries.insert(
                        stem.clone(),
                        CorpusEntry {
                            transcript: transcripts.get(&stem).cloned(),
                            duration_seconds,
                            path,
                        },
                    );
                }
                Err(e) => failures.push(ScanFailure {
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(CorpusIndex {
            generated_at: Utc::now(),
            entries,
            failures,
        })
    }
}

/// Find the side-car transcript: the first non-`.flac` regular file in the
/// directory, in lexicographic order.
fn locate_transcript(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && !path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("flac"))
        })
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Parse a transcript file into key -> text pairs.
///
/// Each line is split at its first whitespace run; the remainder is the
/// spoken text. Blank lines are skipped and a duplicated key keeps the
/// last occurrence.
pub fn read_transcripts(path: &Path) -> io::Result<HashMap<String, String>> {
    let bytes = fs::read(path)?;
    Ok(parse_transcript_lines(&decode_transcript(&bytes)))
}

fn parse_transcript_lines(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let (key, text) = match line.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim_start()),
            None => (line, ""),
        };
        map.insert(key.to_string(), text.to_string());
    }
    map
}
