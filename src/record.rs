//! Hand annotation records stored as MAT files.
//!
//! Each record holds a `boxes` cell array with one cell per hand. A cell is
//! either a struct whose first four fields (`a`, `b`, `c`, `d` in the Oxford
//! hand dataset) are `(x, y)` pairs, or a 4x2 numeric matrix with one corner
//! per row. Further struct fields (such as hand side labels) are ignored.

use std::path::Path;

use crate::error::Hand2VocError;
use crate::geometry::{BBoxXYXY, Coord, ExtentFloor};
use crate::mat::{self, MatArray, MatFile};

/// Name of the variable holding the per-object corner points.
pub const BOXES_VARIABLE: &str = "boxes";

/// Every object is described by exactly this many corner points.
pub const CORNERS_PER_OBJECT: usize = 4;

/// One annotated hand: four unordered corner points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectEntry {
    pub corners: [Coord; CORNERS_PER_OBJECT],
}

impl ObjectEntry {
    pub fn new(corners: [Coord; CORNERS_PER_OBJECT]) -> Self {
        Self { corners }
    }

    /// Axis-aligned envelope of the four corners.
    pub fn bounding_box(&self, floor: ExtentFloor) -> BBoxXYXY {
        BBoxXYXY::enclosing(&self.corners, floor)
    }
}

/// Read one record file and return its objects in source order.
pub fn read_record(path: &Path) -> Result<Vec<ObjectEntry>, Hand2VocError> {
    let mat = mat::read_mat_file(path)?;
    objects_from_mat(&mat, path)
}

/// Extract the objects of an already-parsed MAT file, in source order.
///
/// Cells are visited in MATLAB's column-major order, which is plain index
/// order for the 1xN cell arrays the dataset uses.
pub fn objects_from_mat(mat: &MatFile, path: &Path) -> Result<Vec<ObjectEntry>, Hand2VocError> {
    let boxes = mat
        .get(BOXES_VARIABLE)
        .ok_or_else(|| malformed(path, format!("missing '{BOXES_VARIABLE}' variable")))?;

    let MatArray::Cell { cells, .. } = boxes else {
        return Err(malformed(
            path,
            format!(
                "'{BOXES_VARIABLE}' must be a cell array, found {}",
                boxes.class_name()
            ),
        ));
    };

    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| object_entry(cell, index, path))
        .collect()
}

/// Fuzz-only entrypoint: parse an in-memory record and reduce every object.
#[cfg(feature = "fuzzing")]
pub fn fuzz_record_boxes(bytes: &[u8]) -> Result<(), Hand2VocError> {
    let mat = mat::from_mat_slice(bytes)?;
    for object in objects_from_mat(&mat, Path::new("<fuzz>"))? {
        let _ = object.bounding_box(ExtentFloor::NegInfinity);
    }
    Ok(())
}

fn object_entry(cell: &MatArray, index: usize, path: &Path) -> Result<ObjectEntry, Hand2VocError> {
    let corners: Vec<Coord> = match cell {
        MatArray::Struct {
            fields, elements, ..
        } => {
            if fields.len() < CORNERS_PER_OBJECT {
                return Err(malformed(
                    path,
                    format!(
                        "object {index} has {} field(s); expected at least {CORNERS_PER_OBJECT} corner points",
                        fields.len()
                    ),
                ));
            }
            let first = elements
                .first()
                .ok_or_else(|| malformed(path, format!("object {index} is an empty struct array")))?;
            first
                .iter()
                .take(CORNERS_PER_OBJECT)
                .enumerate()
                .map(|(corner, value)| corner_point(value, index, corner, path))
                .collect::<Result<_, _>>()?
        }
        MatArray::Numeric { dims, values } => {
            if dims.as_slice() != [CORNERS_PER_OBJECT, 2] {
                return Err(malformed(
                    path,
                    format!("object {index} is a {dims:?} matrix; expected [4, 2]"),
                ));
            }
            if values.len() != 2 * CORNERS_PER_OBJECT {
                return Err(malformed(
                    path,
                    format!(
                        "object {index} is a [4, 2] matrix holding {} value(s)",
                        values.len()
                    ),
                ));
            }
            let (xs, ys) = values.split_at(CORNERS_PER_OBJECT);
            xs.iter().zip(ys).map(|(&x, &y)| Coord::new(x, y)).collect()
        }
        other => {
            return Err(malformed(
                path,
                format!(
                    "object {index} is a {} array; expected a struct or a 4x2 matrix",
                    other.class_name()
                ),
            ));
        }
    };

    let corners: [Coord; CORNERS_PER_OBJECT] = corners.try_into().map_err(|found: Vec<Coord>| {
        malformed(
            path,
            format!(
                "object {index} has {} corner point(s); expected {CORNERS_PER_OBJECT}",
                found.len()
            ),
        )
    })?;

    Ok(ObjectEntry::new(corners))
}

fn corner_point(
    value: &MatArray,
    index: usize,
    corner: usize,
    path: &Path,
) -> Result<Coord, Hand2VocError> {
    match value.as_numeric() {
        Some(&[x, y]) => Ok(Coord::new(x, y)),
        Some(values) => Err(malformed(
            path,
            format!(
                "object {index} corner {corner} has {} value(s); expected an (x, y) pair",
                values.len()
            ),
        )),
        None => Err(malformed(
            path,
            format!(
                "object {index} corner {corner} is a {} array; expected numeric",
                value.class_name()
            ),
        )),
    }
}

fn malformed(path: &Path, message: String) -> Hand2VocError {
    Hand2VocError::MalformedRecord {
        path: path.to_path_buf(),
        message,
    }
}
