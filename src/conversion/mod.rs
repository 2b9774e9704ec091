//! The record-to-VOC conversion pipeline.
//!
//! For every record in the annotation directory: parse the corner points,
//! reduce each object to its bounding box, look up the image size and write
//! `{base}.xml`. Records are processed one at a time in file-name order and
//! the first failure aborts the run; files already written are kept.

pub mod report;

pub use report::{ConversionReport, FileOutcome};

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ConvertConfig;
use crate::error::Hand2VocError;
use crate::geometry::BBoxXYXY;
use crate::image_info;
use crate::record;
use crate::voc::{self, AnnotationDocument, IMAGE_EXTENSION, VOC_XML_EXTENSION};

/// Regular files found directly inside the annotation directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationListing {
    /// Records to convert, sorted by file name.
    pub files: Vec<PathBuf>,
    /// Files whose name starts with `.`; these are never opened.
    pub hidden: Vec<PathBuf>,
}

/// List the records in `dir` without descending into subdirectories.
///
/// Symlinks are followed; one whose target is missing is not a regular
/// file and is skipped.
pub fn list_annotation_files(dir: &Path) -> Result<AnnotationListing, Hand2VocError> {
    if let Ok(metadata) = fs::metadata(dir) {
        if !metadata.is_dir() {
            return Err(Hand2VocError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
    }

    let mut listing = AnnotationListing::default();

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling_link(&err) => {
                if let Some(path) = err.path() {
                    log::warn!("skipping {}: symlink target is missing", path.display());
                }
                continue;
            }
            Err(source) => {
                return Err(Hand2VocError::DirectoryRead {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if is_hidden(entry.file_name()) {
            listing.hidden.push(entry.into_path());
        } else {
            listing.files.push(entry.into_path());
        }
    }

    Ok(listing)
}

/// Convert every record listed in `config.annotations_dir`.
pub fn convert_dataset(config: &ConvertConfig) -> Result<ConversionReport, Hand2VocError> {
    if !config.output_dir.is_dir() {
        return Err(Hand2VocError::OutputDirMissing {
            path: config.output_dir.clone(),
        });
    }

    let listing = list_annotation_files(&config.annotations_dir)?;
    let mut report = ConversionReport::new(config);

    for hidden in listing.hidden {
        log::debug!("skipping hidden file {}", hidden.display());
        report.skipped_hidden.push(hidden);
    }

    for record_path in &listing.files {
        let outcome = convert_file(config, record_path)?;
        if outcome.objects == 0 {
            log::warn!("{} contains no hand annotations", record_path.display());
        }
        report.files.push(outcome);
    }

    log::info!(
        "converted {} record(s) with {} hand(s) into {}",
        report.file_count(),
        report.object_count(),
        config.output_dir.display()
    );

    Ok(report)
}

/// Convert a single record into `{output_dir}/{base}.xml`.
///
/// The image is inspected before anything is written, so a missing image
/// leaves no output behind for this record.
pub fn convert_file(
    config: &ConvertConfig,
    record_path: &Path,
) -> Result<FileOutcome, Hand2VocError> {
    let base = record_base_name(record_path);

    let objects = record::read_record(record_path)?;
    let boxes: Vec<BBoxXYXY> = objects
        .iter()
        .map(|object| object.bounding_box(config.extent_floor))
        .collect();

    for (index, bbox) in boxes.iter().enumerate() {
        if !bbox.is_finite() {
            log::warn!(
                "{}: object {index} has non-finite coordinates {bbox:?}",
                record_path.display()
            );
        }
    }

    let image_path = config
        .images_dir
        .join(format!("{base}.{IMAGE_EXTENSION}"));
    let size = image_info::inspect_image(&image_path, config.axis_order)?;

    let document = AnnotationDocument::for_hands(&base, size, boxes);
    let xml_path = config
        .output_dir
        .join(format!("{base}.{VOC_XML_EXTENSION}"));
    voc::write_voc_xml(&xml_path, &document)?;

    log::debug!(
        "{} -> {} ({} hand(s))",
        record_path.display(),
        xml_path.display(),
        document.objects.len()
    );

    Ok(FileOutcome {
        record: record_path.to_path_buf(),
        image: image_path,
        output: xml_path,
        objects: document.objects.len(),
        size,
    })
}

/// File name up to its first `.` (`Buffy_1.mat` -> `Buffy_1`, `img.v2.mat` -> `img`).
fn record_base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() == 1
        && err
            .io_error()
            .is_some_and(|source| source.kind() == io::ErrorKind::NotFound)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
