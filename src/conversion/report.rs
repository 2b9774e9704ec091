//! Conversion report types.
//!
//! A report lists every record that was converted, in processing order,
//! together with the hidden files that were skipped.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::ConvertConfig;
use crate::geometry::ExtentFloor;
use crate::image_info::{AxisOrder, ImageDimensions};

/// Summary of one conversion run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extent_floor: ExtentFloor,
    pub axis_order: AxisOrder,
    /// Converted records, in processing order.
    pub files: Vec<FileOutcome>,
    /// Dot-files found in the annotation directory and never read.
    pub skipped_hidden: Vec<PathBuf>,
}

impl ConversionReport {
    /// Create an empty report for a run with the given settings.
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            annotations_dir: config.annotations_dir.clone(),
            images_dir: config.images_dir.clone(),
            output_dir: config.output_dir.clone(),
            extent_floor: config.extent_floor,
            axis_order: config.axis_order,
            ..Default::default()
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of `<object>` entries written.
    pub fn object_count(&self) -> usize {
        self.files.iter().map(|file| file.objects).sum()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} record(s) with {} hand(s) from {} into {}",
            self.file_count(),
            self.object_count(),
            self.annotations_dir.display(),
            self.output_dir.display()
        )?;

        for file in &self.files {
            writeln!(
                f,
                "  {} -> {}: {} hand(s), {}x{}x{}",
                file.record.display(),
                file.output.display(),
                file.objects,
                file.size.width,
                file.size.height,
                file.size.depth
            )?;
        }

        if !self.skipped_hidden.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped hidden files ({}):", self.skipped_hidden.len())?;
            for path in &self.skipped_hidden {
                writeln!(f, "  - {}", path.display())?;
            }
        }

        Ok(())
    }
}

/// Result of converting a single record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileOutcome {
    /// Source `.mat` record.
    pub record: PathBuf,
    /// Image whose dimensions were used.
    pub image: PathBuf,
    /// Written XML document.
    pub output: PathBuf,
    /// Number of `<object>` entries in the document.
    pub objects: usize,
    pub size: ImageDimensions,
}
