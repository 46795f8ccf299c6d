//! Recorder log reading
//!
//! Reads a newline-delimited log and drives a [`Reconstructor`] over it.
//! Bad lines (invalid JSON, wrong shape, invalid UTF-8) are skipped and
//! counted. Only a missing or unreadable file is an error.

use crate::error::{self, InputError};
use crate::event::RawEvent;
use crate::output::{source_name, ReconstructionResult};
use crate::reconstruct::{ReconstructStats, Reconstruction, Reconstructor};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reconstruct lines from a log file
///
/// The file handle is held only for the duration of the read.
pub fn reconstruct_file(path: &Path) -> Result<Reconstruction, InputError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!("Reading recorder log {:?}", path);

    reconstruct_reader(BufReader::new(file)).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reconstruct a log file into a result document stamped with the
/// current time, along with the run's counters
pub fn reconstruct_log(path: &Path) -> error::Result<(ReconstructionResult, ReconstructStats)> {
    let reconstruction = reconstruct_file(path)?;
    let result = ReconstructionResult::new(source_name(path), reconstruction.lines);
    Ok((result, reconstruction.stats))
}

/// Reconstruct lines from any buffered reader
pub fn reconstruct_reader<R: BufRead>(reader: R) -> io::Result<Reconstruction> {
    let mut reconstructor = Reconstructor::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::debug!("Line {}: not valid UTF-8, skipping", line_no);
                reconstructor.record_malformed();
                continue;
            }
            Err(e) => return Err(e),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match RawEvent::from_json(line) {
            Ok(event) => reconstructor.feed(&event),
            Err(e) => {
                tracing::debug!("Line {}: malformed record ({}), skipping", line_no, e);
                reconstructor.record_malformed();
            }
        }
    }

    Ok(reconstructor.finish())
}
