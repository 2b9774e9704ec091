#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

const MI_INT8: u32 = 1;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;

const MX_CELL_CLASS: u8 = 1;
const MX_STRUCT_CLASS: u8 = 2;
const MX_CHAR_CLASS: u8 = 4;
const MX_DOUBLE_CLASS: u8 = 6;

const FIELD_NAME_LEN: usize = 32;

/// A MATLAB value the fixture writer can encode.
#[derive(Clone, Debug)]
pub enum MatValue {
    Double { dims: Vec<i32>, values: Vec<f64> },
    Char(String),
    Cell { dims: Vec<i32>, cells: Vec<MatValue> },
    /// A 1x1 struct.
    Struct(Vec<(String, MatValue)>),
}

pub type Corners = [(f64, f64); 4];

/// The dataset's native object layout: a struct with corner fields a..d.
pub fn hand_struct(corners: Corners) -> MatValue {
    let mut fields: Vec<(String, MatValue)> = ["a", "b", "c", "d"]
        .iter()
        .zip(corners)
        .map(|(name, (x, y))| {
            (
                name.to_string(),
                MatValue::Double {
                    dims: vec![1, 2],
                    values: vec![x, y],
                },
            )
        })
        .collect();
    fields.push(("hand".to_string(), MatValue::Char("R".to_string())));
    MatValue::Struct(fields)
}

/// Little-endian Level 5 MAT file with a `boxes` cell of hand structs.
pub fn hand_record_bytes(objects: &[Corners], compressed: bool) -> Vec<u8> {
    let boxes = MatValue::Cell {
        dims: vec![1, objects.len() as i32],
        cells: objects.iter().copied().map(hand_struct).collect(),
    };
    mat_bytes(&[("boxes", boxes)], compressed)
}

pub fn write_hand_record(path: &Path, objects: &[Corners]) {
    write_file(path, &hand_record_bytes(objects, false));
}

pub fn write_compressed_hand_record(path: &Path, objects: &[Corners]) {
    write_file(path, &hand_record_bytes(objects, true));
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::RgbImage::new(width, height)
        .save(path)
        .expect("write jpeg file");
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write file");
}

pub fn mat_bytes(variables: &[(&str, MatValue)], compressed: bool) -> Vec<u8> {
    let mut bytes = b"MATLAB 5.0 MAT-file, Platform: hand2voc tests".to_vec();
    bytes.resize(116, b' ');
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend_from_slice(&0x0100u16.to_le_bytes());
    bytes.extend_from_slice(b"IM");

    for (name, value) in variables {
        let encoded = matrix(name, value);
        if compressed {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&encoded).expect("compress variable");
            let data = encoder.finish().expect("finish compression");
            bytes.extend_from_slice(&MI_COMPRESSED.to_le_bytes());
            bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&data);
        } else {
            bytes.extend(encoded);
        }
    }
    bytes
}

fn element(data_type: u32, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() + 16);
    bytes.extend_from_slice(&data_type.to_le_bytes());
    bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(data);
    bytes.resize(bytes.len() + (8 - data.len() % 8) % 8, 0);
    bytes
}

fn matrix(name: &str, value: &MatValue) -> Vec<u8> {
    let (class, dims, body) = match value {
        MatValue::Double { dims, values } => {
            let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
            (MX_DOUBLE_CLASS, dims.clone(), element(MI_DOUBLE, &data))
        }
        MatValue::Char(text) => {
            let data: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
            let len = text.encode_utf16().count() as i32;
            (MX_CHAR_CLASS, vec![1, len], element(MI_UINT16, &data))
        }
        MatValue::Cell { dims, cells } => {
            let body: Vec<u8> = cells.iter().flat_map(|cell| matrix("", cell)).collect();
            (MX_CELL_CLASS, dims.clone(), body)
        }
        MatValue::Struct(fields) => {
            let mut body = element(MI_INT32, &(FIELD_NAME_LEN as i32).to_le_bytes());
            let mut names = Vec::with_capacity(fields.len() * FIELD_NAME_LEN);
            for (field, _) in fields {
                let mut padded = field.as_bytes().to_vec();
                padded.resize(FIELD_NAME_LEN, 0);
                names.extend(padded);
            }
            body.extend(element(MI_INT8, &names));
            for (_, field_value) in fields {
                body.extend(matrix("", field_value));
            }
            (MX_STRUCT_CLASS, vec![1, 1], body)
        }
    };

    let mut content = element(MI_UINT32, &[class, 0, 0, 0, 0, 0, 0, 0]);
    let dims: Vec<u8> = dims.iter().flat_map(|d| d.to_le_bytes()).collect();
    content.extend(element(MI_INT32, &dims));
    content.extend(element(MI_INT8, name.as_bytes()));
    content.extend(body);
    element(MI_MATRIX, &content)
}
