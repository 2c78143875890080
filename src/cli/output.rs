//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ScanError;

/// Map domain errors to a single line for stderr.
pub fn map_error(e: &ScanError) -> String {
    format!("chownscan: {}", e)
}

/// Whether the error only means stdout was closed by the reader (e.g. `| head`).
pub fn is_broken_pipe(e: &ScanError) -> bool {
    matches!(e, ScanError::Output(io) if io.kind() == std::io::ErrorKind::BrokenPipe)
}
