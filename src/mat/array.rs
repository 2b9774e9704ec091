//! Decoded MATLAB array values.

/// A decoded `miMATRIX` value.
///
/// All element data is stored in MATLAB's column-major order. Numeric
/// classes (integers, singles, doubles and logicals) are widened to `f64`.
#[derive(Clone, Debug, PartialEq)]
pub enum MatArray {
    Numeric {
        dims: Vec<usize>,
        values: Vec<f64>,
    },
    Char {
        dims: Vec<usize>,
        text: String,
    },
    Cell {
        dims: Vec<usize>,
        cells: Vec<MatArray>,
    },
    /// `elements[i][j]` is the value of field `fields[j]` in struct element `i`.
    /// A struct with no fields carries no elements.
    Struct {
        dims: Vec<usize>,
        fields: Vec<String>,
        elements: Vec<Vec<MatArray>>,
    },
}

impl MatArray {
    /// The 0x0 double MATLAB writes for an empty `[]`.
    pub fn empty() -> Self {
        MatArray::Numeric {
            dims: vec![0, 0],
            values: Vec::new(),
        }
    }

    pub fn dims(&self) -> &[usize] {
        match self {
            MatArray::Numeric { dims, .. }
            | MatArray::Char { dims, .. }
            | MatArray::Cell { dims, .. }
            | MatArray::Struct { dims, .. } => dims,
        }
    }

    /// Number of elements (product of the dimensions).
    pub fn numel(&self) -> usize {
        self.dims().iter().product()
    }

    /// Short class label used in error messages.
    pub fn class_name(&self) -> &'static str {
        match self {
            MatArray::Numeric { .. } => "numeric",
            MatArray::Char { .. } => "char",
            MatArray::Cell { .. } => "cell",
            MatArray::Struct { .. } => "struct",
        }
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            MatArray::Numeric { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Looks up a field of one struct element by name.
    pub fn field(&self, element: usize, name: &str) -> Option<&MatArray> {
        match self {
            MatArray::Struct {
                fields, elements, ..
            } => {
                let index = fields.iter().position(|field| field == name)?;
                elements.get(element)?.get(index)
            }
            _ => None,
        }
    }
}
