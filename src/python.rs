// Python bindings for flacdur
//
// Compiled only with the `python` feature (built as an extension module
// via maturin).

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::PathBuf;

use crate::corpus::CorpusIndex;
use crate::flac::{self, FlacError};

fn flac_err_to_py(err: FlacError) -> PyErr {
    match err {
        FlacError::Io(e) => PyOSError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Return the duration of a FLAC file in seconds.
#[pyfunction]
fn get_flac_duration(path: PathBuf) -> PyResult<f64> {
    flac::parse_duration(&path).map_err(flac_err_to_py)
}

/// Build a corpus index for a directory of FLAC files.
///
/// Returns a dict keyed by filename stem with per-entry path, duration
/// and transcript.
#[pyfunction]
#[pyo3(signature = (directory, transcript=None))]
fn build_corpus_index(
    py: Python<'_>,
    directory: PathBuf,
    transcript: Option<PathBuf>,
) -> PyResult<Py<PyDict>> {
    let index = CorpusIndex::build(&directory, transcript.as_deref())
        .map_err(|e| PyOSError::new_err(e.to_string()))?;

    let entries = PyDict::new(py);
    for (key, entry) in &index.entries {
        let item = PyDict::new(py);
        item.set_item("path", &entry.path)?;
        item.set_item("duration_seconds", entry.duration_seconds)?;
        item.set_item("transcript", entry.transcript.as_deref())?;
        entries.set_item(key, item)?;
    }
    Ok(entries.unbind())
}

#[pymodule]
fn flacdur(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_flac_duration, m)?)?;
    m.add_function(wrap_pyfunction!(build_corpus_index, m)?)?;
    Ok(())
}
