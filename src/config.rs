//! Conversion settings.
//!
//! [`ConvertConfig`] is built by the CLI but carries no clap types, so the
//! library can be driven directly.

use std::path::PathBuf;

use crate::geometry::ExtentFloor;
use crate::image_info::AxisOrder;

pub const DEFAULT_ANNOTATIONS_DIR: &str = "annotations";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_OUTPUT_DIR: &str = "annotations_xml";

/// Inputs, output and numeric policies for one conversion run.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertConfig {
    /// Directory holding the `.mat` annotation records.
    pub annotations_dir: PathBuf,
    /// Directory holding `{base}.jpg` for every record.
    pub images_dir: PathBuf,
    /// Existing directory that receives `{base}.xml`.
    pub output_dir: PathBuf,
    pub extent_floor: ExtentFloor,
    pub axis_order: AxisOrder,
}

impl ConvertConfig {
    pub fn new(
        annotations_dir: impl Into<PathBuf>,
        images_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            annotations_dir: annotations_dir.into(),
            images_dir: images_dir.into(),
            output_dir: output_dir.into(),
            extent_floor: ExtentFloor::default(),
            axis_order: AxisOrder::default(),
        }
    }

    pub fn with_extent_floor(mut self, extent_floor: ExtentFloor) -> Self {
        self.extent_floor = extent_floor;
        self
    }

    pub fn with_axis_order(mut self, axis_order: AxisOrder) -> Self {
        self.axis_order = axis_order;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOTATIONS_DIR, DEFAULT_IMAGES_DIR, DEFAULT_OUTPUT_DIR)
    }
}
