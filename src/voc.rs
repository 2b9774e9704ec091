//! Pascal VOC XML writer.
//!
//! One document is written per image. The hand dataset has a single class,
//! so every object carries the same fixed metadata; only the box differs.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Hand2VocError;
use crate::geometry::BBoxXYXY;
use crate::image_info::ImageDimensions;

/// Folder label written into every document.
pub const FOLDER: &str = "imgs/";
/// The single object class.
pub const CLASS_NAME: &str = "hand";
pub const POSE: &str = "Unspecified";

/// Extension of the images the documents refer to.
pub const IMAGE_EXTENSION: &str = "jpg";
pub const VOC_XML_EXTENSION: &str = "xml";

/// One `<object>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct VocObject {
    pub name: String,
    pub pose: String,
    pub truncated: bool,
    pub difficult: bool,
    pub bbox: BBoxXYXY,
}

impl VocObject {
    /// A `hand` object with the dataset's fixed metadata.
    pub fn hand(bbox: BBoxXYXY) -> Self {
        Self {
            name: CLASS_NAME.to_string(),
            pose: POSE.to_string(),
            truncated: false,
            difficult: false,
            bbox,
        }
    }
}

/// Contents of one VOC annotation file.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationDocument {
    pub folder: String,
    pub filename: String,
    pub path: String,
    pub size: ImageDimensions,
    pub segmented: bool,
    pub objects: Vec<VocObject>,
}

impl AnnotationDocument {
    /// Build the document for the image `{base}.jpg`.
    ///
    /// `boxes` are given in source-record order. Each box is prepended, so
    /// the document lists them last-read first.
    pub fn for_hands(
        base: &str,
        size: ImageDimensions,
        boxes: impl IntoIterator<Item = BBoxXYXY>,
    ) -> Self {
        let filename = format!("{base}.{IMAGE_EXTENSION}");
        let mut objects: Vec<VocObject> = boxes.into_iter().map(VocObject::hand).collect();
        objects.reverse();

        Self {
            folder: FOLDER.to_string(),
            path: filename.clone(),
            filename,
            size,
            segmented: false,
            objects,
        }
    }
}

/// Render a document as indented UTF-8 XML.
///
/// Box coordinates are fixed-point with two fractional digits.
pub fn render_voc_xml(document: &AnnotationDocument) -> String {
    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(xml, "<annotation>").expect("write to string");
    writeln!(xml, "  <folder>{}</folder>", xml_escape(&document.folder)).expect("write to string");
    writeln!(
        xml,
        "  <filename>{}</filename>",
        xml_escape(&document.filename)
    )
    .expect("write to string");
    writeln!(xml, "  <path>{}</path>", xml_escape(&document.path)).expect("write to string");
    writeln!(xml, "  <size>").expect("write to string");
    writeln!(xml, "    <width>{}</width>", document.size.width).expect("write to string");
    writeln!(xml, "    <height>{}</height>", document.size.height).expect("write to string");
    writeln!(xml, "    <depth>{}</depth>", document.size.depth).expect("write to string");
    writeln!(xml, "  </size>").expect("write to string");
    writeln!(
        xml,
        "  <segmented>{}</segmented>",
        bool_flag(document.segmented)
    )
    .expect("write to string");

    for object in &document.objects {
        writeln!(xml, "  <object>").expect("write to string");
        writeln!(xml, "    <name>{}</name>", xml_escape(&object.name)).expect("write to string");
        writeln!(xml, "    <pose>{}</pose>", xml_escape(&object.pose)).expect("write to string");
        writeln!(
            xml,
            "    <truncated>{}</truncated>",
            bool_flag(object.truncated)
        )
        .expect("write to string");
        writeln!(
            xml,
            "    <difficult>{}</difficult>",
            bool_flag(object.difficult)
        )
        .expect("write to string");
        writeln!(xml, "    <bndbox>").expect("write to string");
        writeln!(xml, "      <xmin>{:.2}</xmin>", object.bbox.xmin()).expect("write to string");
        writeln!(xml, "      <ymin>{:.2}</ymin>", object.bbox.ymin()).expect("write to string");
        writeln!(xml, "      <xmax>{:.2}</xmax>", object.bbox.xmax()).expect("write to string");
        writeln!(xml, "      <ymax>{:.2}</ymax>", object.bbox.ymax()).expect("write to string");
        writeln!(xml, "    </bndbox>").expect("write to string");
        writeln!(xml, "  </object>").expect("write to string");
    }

    writeln!(xml, "</annotation>").expect("write to string");
    xml
}

/// Render `document` and write it to `xml_path`, replacing any existing file.
pub fn write_voc_xml(xml_path: &Path, document: &AnnotationDocument) -> Result<(), Hand2VocError> {
    fs::write(xml_path, render_voc_xml(document)).map_err(|source| Hand2VocError::XmlWrite {
        path: xml_path.to_path_buf(),
        source,
    })
}

fn bool_flag(value: bool) -> u8 {
    u8::from(value)
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
