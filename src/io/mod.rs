pub mod vtk;

pub use vtk::{from_vtk_str, read_vtk, to_vtk_string, write_vtk, write_vtk_to};

/// Generic I/O and format‑conversion errors.
///
/// A failed write leaves the in-memory mesh untouched; the target file may be
/// empty or truncated.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("Could not parse float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
    #[error("Could not parse integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),
}
