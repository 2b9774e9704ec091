//! Image dimension lookup.
//!
//! Only the image header is decoded; pixel data is never read.

use std::path::Path;

use image::{ImageDecoder, ImageError, ImageReader};
use serde::Serialize;

use crate::error::Hand2VocError;

/// Pixel dimensions and channel count of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
    /// Number of colour channels (3 for RGB JPEGs, 1 for greyscale).
    pub depth: u8,
}

/// How decoder axes map onto `<width>` and `<height>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisOrder {
    /// `width` is the number of columns, `height` the number of rows.
    #[default]
    Columns,
    /// Rows first: `width` holds the row count and `height` the column
    /// count, matching tools that copy an array shape `(rows, cols, ch)`.
    Legacy,
}

/// Read the dimensions of the image at `path`.
///
/// The format is guessed from the file contents, not the extension.
pub fn inspect_image(path: &Path, axis_order: AxisOrder) -> Result<ImageDimensions, Hand2VocError> {
    let image_error = |source: ImageError| Hand2VocError::ImageRead {
        path: path.to_path_buf(),
        source,
    };

    let decoder = ImageReader::open(path)
        .map_err(|source| image_error(ImageError::IoError(source)))?
        .with_guessed_format()
        .map_err(|source| image_error(ImageError::IoError(source)))?
        .into_decoder()
        .map_err(image_error)?;

    let (columns, rows) = decoder.dimensions();
    let depth = decoder.color_type().channel_count();

    let (width, height) = match axis_order {
        AxisOrder::Columns => (columns, rows),
        AxisOrder::Legacy => (rows, columns),
    };

    Ok(ImageDimensions {
        width,
        height,
        depth,
    })
}
