//! MATLAB Level 5 MAT-file reader.
//!
//! Supports the v5/v6/v7 container (optionally zlib-compressed) and decodes
//! numeric, char, cell and struct arrays. MAT v4 and v7.3 (HDF5) files,
//! sparse, complex and object arrays are rejected.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mat = hand2voc::mat::read_mat_file(Path::new("annotations/Buffy_1.mat"))?;
//! if let Some(boxes) = mat.get("boxes") {
//!     println!("boxes: {} x {}", boxes.dims()[0], boxes.dims()[1]);
//! }
//! # Ok::<(), hand2voc::Hand2VocError>(())
//! ```

mod array;
mod reader;

use std::fs;
use std::path::{Path, PathBuf};

pub use array::MatArray;
pub use reader::Endian;

use crate::error::Hand2VocError;

/// Fields of the 128-byte MAT-file header.
#[derive(Clone, Debug, PartialEq)]
pub struct MatHeader {
    /// Human-readable header text, trailing padding removed.
    pub description: String,
    pub version: u16,
    pub endian: Endian,
}

/// A named top-level variable.
#[derive(Clone, Debug, PartialEq)]
pub struct MatVariable {
    pub name: String,
    pub array: MatArray,
}

/// A parsed MAT file. Variables keep their file order.
#[derive(Clone, Debug, PartialEq)]
pub struct MatFile {
    pub header: MatHeader,
    pub variables: Vec<MatVariable>,
}

impl MatFile {
    /// Returns the first variable with the given name.
    pub fn get(&self, name: &str) -> Option<&MatArray> {
        self.variables
            .iter()
            .find(|variable| variable.name == name)
            .map(|variable| &variable.array)
    }
}

/// Read and parse a MAT file from disk.
pub fn read_mat_file(path: &Path) -> Result<MatFile, Hand2VocError> {
    let bytes = fs::read(path).map_err(|source| Hand2VocError::MatRead {
        path: path.to_path_buf(),
        source,
    })?;
    reader::parse_mat(&bytes, path)
}

/// Parse a MAT file held in memory.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_mat_slice(bytes: &[u8]) -> Result<MatFile, Hand2VocError> {
    reader::parse_mat(bytes, &PathBuf::from("<memory>"))
}
