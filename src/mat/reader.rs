//! Data element decoding for MAT Level 5 files.

use std::io::Read;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;

use super::array::MatArray;
use super::{MatFile, MatHeader, MatVariable};
use crate::error::Hand2VocError;

const HEADER_LEN: usize = 128;
const HEADER_TEXT_LEN: usize = 116;
const TAG_LEN: usize = 8;
const HDF5_MARKER: &[u8] = b"MATLAB 7.3";

// Cells and structs nested deeper than this are rejected.
const MAX_NESTING_DEPTH: usize = 64;

// Upper bound on the inflated size of one miCOMPRESSED element.
const MAX_INFLATED_LEN: u64 = 256 * 1024 * 1024;

const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT16: u32 = 3;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_INT64: u32 = 12;
const MI_UINT64: u32 = 13;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;
const MI_UTF8: u32 = 16;
const MI_UTF16: u32 = 17;

const MX_CELL_CLASS: u8 = 1;
const MX_STRUCT_CLASS: u8 = 2;
const MX_OBJECT_CLASS: u8 = 3;
const MX_CHAR_CLASS: u8 = 4;
const MX_SPARSE_CLASS: u8 = 5;
const MX_DOUBLE_CLASS: u8 = 6;
const MX_UINT64_CLASS: u8 = 15;

// Complex bit of the array flags byte, as laid out in the first flags word.
const COMPLEX_FLAG: u32 = 0x0800;

/// Byte order declared by the header's endian indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(buf),
            Endian::Big => BigEndian::read_u16(buf),
        }
    }

    fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endian::Little => LittleEndian::read_i32(buf),
            Endian::Big => BigEndian::read_i32(buf),
        }
    }
}

pub(crate) fn parse_mat(bytes: &[u8], path: &Path) -> Result<MatFile, Hand2VocError> {
    let header = parse_header(bytes, path)?;
    let decoder = Decoder {
        endian: header.endian,
        path,
        depth: 0,
    };

    let mut reader = decoder.reader(&bytes[HEADER_LEN..]);
    let mut variables = Vec::new();
    while reader.remaining() >= TAG_LEN {
        let element = reader.next_element()?;
        decoder.read_variables(element, &mut variables)?;
    }

    Ok(MatFile { header, variables })
}

fn parse_header(bytes: &[u8], path: &Path) -> Result<MatHeader, Hand2VocError> {
    if bytes.len() < HEADER_LEN {
        return Err(Hand2VocError::MatParse {
            path: path.to_path_buf(),
            message: format!(
                "file is {} byte(s); a Level 5 header needs {HEADER_LEN}",
                bytes.len()
            ),
        });
    }

    let text = &bytes[..HEADER_TEXT_LEN];
    if text.starts_with(HDF5_MARKER) {
        return Err(Hand2VocError::UnsupportedMat {
            path: path.to_path_buf(),
            message: "MAT v7.3 (HDF5) files are not supported".to_string(),
        });
    }

    let endian = match &bytes[126..HEADER_LEN] {
        [b'I', b'M'] => Endian::Little,
        [b'M', b'I'] => Endian::Big,
        other => {
            return Err(Hand2VocError::MatParse {
                path: path.to_path_buf(),
                message: format!(
                    "invalid endian indicator '{}'; not a Level 5 MAT file",
                    String::from_utf8_lossy(other)
                ),
            });
        }
    };

    Ok(MatHeader {
        description: String::from_utf8_lossy(text)
            .trim_end_matches([' ', '\0'])
            .to_string(),
        version: endian.read_u16(&bytes[124..126]),
        endian,
    })
}

struct Element<'a> {
    data_type: u32,
    data: &'a [u8],
}

struct ElementReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    decoder: Decoder<'a>,
}

impl<'a> ElementReader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Hand2VocError> {
        if len > self.remaining() {
            return Err(self.decoder.malformed(format!(
                "element needs {len} byte(s) at offset {} but only {} remain",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn next_element(&mut self) -> Result<Element<'a>, Hand2VocError> {
        let endian = self.decoder.endian;
        let word = endian.read_u32(self.take(4)?);

        // Small data element: byte count in the upper half, payload in the next 4 bytes.
        let small_len = (word >> 16) as usize;
        if small_len != 0 {
            if small_len > 4 {
                return Err(self
                    .decoder
                    .malformed(format!("small data element claims {small_len} bytes")));
            }
            let slot = self.take(4)?;
            return Ok(Element {
                data_type: word & 0xFFFF,
                data: &slot[..small_len],
            });
        }

        let len = endian.read_u32(self.take(4)?) as usize;
        let data = self.take(len)?;
        if word != MI_COMPRESSED {
            let padding = (TAG_LEN - len % TAG_LEN) % TAG_LEN;
            self.pos += padding.min(self.remaining());
        }

        Ok(Element {
            data_type: word,
            data,
        })
    }

    fn expect_element(&mut self, expected: &[u32], what: &str) -> Result<Element<'a>, Hand2VocError> {
        let element = self.next_element()?;
        if !expected.contains(&element.data_type) {
            return Err(self.decoder.malformed(format!(
                "expected {what}, found data type {}",
                element.data_type
            )));
        }
        Ok(element)
    }
}

#[derive(Clone, Copy)]
struct Decoder<'p> {
    endian: Endian,
    path: &'p Path,
    depth: usize,
}

impl<'p> Decoder<'p> {
    fn malformed(&self, message: impl Into<String>) -> Hand2VocError {
        Hand2VocError::MatParse {
            path: self.path.to_path_buf(),
            message: message.into(),
        }
    }

    fn unsupported(&self, message: impl Into<String>) -> Hand2VocError {
        Hand2VocError::UnsupportedMat {
            path: self.path.to_path_buf(),
            message: message.into(),
        }
    }

    fn nested(&self) -> Result<Self, Hand2VocError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.malformed(format!(
                "arrays nested more than {MAX_NESTING_DEPTH} levels deep"
            )));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> ElementReader<'a>
    where
        'p: 'a,
    {
        ElementReader {
            bytes,
            pos: 0,
            decoder: *self,
        }
    }

    fn read_variables(
        &self,
        element: Element<'_>,
        variables: &mut Vec<MatVariable>,
    ) -> Result<(), Hand2VocError> {
        match element.data_type {
            MI_MATRIX => {
                let (name, array) = self.matrix(element.data)?;
                variables.push(MatVariable { name, array });
            }
            MI_COMPRESSED => {
                let inflated = self.inflate(element.data, MAX_INFLATED_LEN)?;
                let decoder = self.nested()?;
                let mut inner = decoder.reader(&inflated);
                while inner.remaining() >= TAG_LEN {
                    let nested = inner.next_element()?;
                    decoder.read_variables(nested, variables)?;
                }
            }
            other => log::debug!(
                "skipping top-level data element of type {other} in {}",
                self.path.display()
            ),
        }
        Ok(())
    }

    fn inflate(&self, data: &[u8], limit: u64) -> Result<Vec<u8>, Hand2VocError> {
        let mut inflated = Vec::new();
        ZlibDecoder::new(data)
            .take(limit.saturating_add(1))
            .read_to_end(&mut inflated)
            .map_err(|source| {
                self.malformed(format!("failed to inflate compressed element: {source}"))
            })?;
        if inflated.len() as u64 > limit {
            return Err(self.malformed(format!(
                "compressed element inflates past {limit} byte(s)"
            )));
        }
        Ok(inflated)
    }

    fn matrix(&self, data: &[u8]) -> Result<(String, MatArray), Hand2VocError> {
        if data.is_empty() {
            return Ok((String::new(), MatArray::empty()));
        }

        let mut reader = self.reader(data);
        let flags = reader.expect_element(&[MI_UINT32], "array flags")?;
        if flags.data.len() < 4 {
            return Err(self.malformed("array flags element is too short"));
        }
        let flags_word = self.endian.read_u32(&flags.data[..4]);
        let class = (flags_word & 0xFF) as u8;

        let dims = self.dims(&reader.expect_element(&[MI_INT32], "dimensions")?)?;
        let name_element = reader.expect_element(&[MI_INT8, MI_UINT8, MI_UTF8], "array name")?;
        let name = String::from_utf8_lossy(name_element.data)
            .trim_end_matches('\0')
            .to_string();

        let array = match class {
            MX_CELL_CLASS => self.cell(&mut reader, dims)?,
            MX_STRUCT_CLASS => self.structure(&mut reader, dims)?,
            MX_CHAR_CLASS => self.char_array(&mut reader, dims)?,
            MX_DOUBLE_CLASS..=MX_UINT64_CLASS => {
                if flags_word & COMPLEX_FLAG != 0 {
                    return Err(self.unsupported(format!("complex array '{name}'")));
                }
                self.numeric(&mut reader, dims)?
            }
            MX_OBJECT_CLASS => return Err(self.unsupported(format!("object array '{name}'"))),
            MX_SPARSE_CLASS => return Err(self.unsupported(format!("sparse array '{name}'"))),
            other => {
                return Err(self.unsupported(format!("array class {other} for '{name}'")));
            }
        };

        Ok((name, array))
    }

    fn dims(&self, element: &Element<'_>) -> Result<Vec<usize>, Hand2VocError> {
        if element.data.len() < 8 || element.data.len() % 4 != 0 {
            return Err(self.malformed("dimensions must hold at least two int32 values"));
        }
        element
            .data
            .chunks_exact(4)
            .map(|chunk| {
                let dim = self.endian.read_i32(chunk);
                usize::try_from(dim).map_err(|_| self.malformed(format!("negative dimension {dim}")))
            })
            .collect()
    }

    fn element_count(&self, dims: &[usize]) -> Result<usize, Hand2VocError> {
        dims.iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| self.malformed(format!("dimensions {dims:?} overflow")))
    }

    fn cell(&self, reader: &mut ElementReader<'_>, dims: Vec<usize>) -> Result<MatArray, Hand2VocError> {
        let count = self.element_count(&dims)?;
        let mut cells = Vec::new();
        for _ in 0..count {
            let element = reader.expect_element(&[MI_MATRIX], "cell element")?;
            cells.push(self.nested()?.matrix(element.data)?.1);
        }
        Ok(MatArray::Cell { dims, cells })
    }

    fn structure(
        &self,
        reader: &mut ElementReader<'_>,
        dims: Vec<usize>,
    ) -> Result<MatArray, Hand2VocError> {
        let name_len = reader.expect_element(&[MI_INT32], "field name length")?;
        if name_len.data.len() != 4 {
            return Err(self.malformed("field name length must be a single int32"));
        }
        let name_len = usize::try_from(self.endian.read_i32(name_len.data))
            .map_err(|_| self.malformed("negative field name length"))?;

        let names = reader.expect_element(&[MI_INT8, MI_UINT8], "field names")?;
        let fields: Vec<String> = if name_len == 0 {
            Vec::new()
        } else {
            if names.data.len() % name_len != 0 {
                return Err(self.malformed(format!(
                    "{} byte(s) of field names is not a multiple of {name_len}",
                    names.data.len()
                )));
            }
            names
                .data
                .chunks(name_len)
                .map(|chunk| {
                    let end = chunk.iter().position(|&byte| byte == 0).unwrap_or(chunk.len());
                    String::from_utf8_lossy(&chunk[..end]).into_owned()
                })
                .collect()
        };

        let mut elements = Vec::new();
        if !fields.is_empty() {
            for _ in 0..self.element_count(&dims)? {
                let mut values = Vec::with_capacity(fields.len());
                for _ in &fields {
                    let element = reader.expect_element(&[MI_MATRIX], "struct field value")?;
                    values.push(self.nested()?.matrix(element.data)?.1);
                }
                elements.push(values);
            }
        }

        Ok(MatArray::Struct {
            dims,
            fields,
            elements,
        })
    }

    fn char_array(
        &self,
        reader: &mut ElementReader<'_>,
        dims: Vec<usize>,
    ) -> Result<MatArray, Hand2VocError> {
        if reader.remaining() == 0 {
            return Ok(MatArray::Char {
                dims,
                text: String::new(),
            });
        }

        let element = reader.next_element()?;
        let text = match element.data_type {
            MI_UTF8 | MI_INT8 | MI_UINT8 => String::from_utf8_lossy(element.data).into_owned(),
            MI_UINT16 | MI_UTF16 => {
                if element.data.len() % 2 != 0 {
                    return Err(self.malformed("odd byte count in UTF-16 char data"));
                }
                let units: Vec<u16> = element
                    .data
                    .chunks_exact(2)
                    .map(|chunk| self.endian.read_u16(chunk))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            other => {
                return Err(self.unsupported(format!("char data stored as data type {other}")));
            }
        };

        Ok(MatArray::Char { dims, text })
    }

    fn numeric(&self, reader: &mut ElementReader<'_>, dims: Vec<usize>) -> Result<MatArray, Hand2VocError> {
        let count = self.element_count(&dims)?;
        if count == 0 && reader.remaining() == 0 {
            return Ok(MatArray::Numeric {
                dims,
                values: Vec::new(),
            });
        }

        let element = reader.next_element()?;
        let values = self.values(&element)?;
        if values.len() != count {
            return Err(self.malformed(format!(
                "numeric array has {} value(s) for dimensions {dims:?}",
                values.len()
            )));
        }

        Ok(MatArray::Numeric { dims, values })
    }

    fn values(&self, element: &Element<'_>) -> Result<Vec<f64>, Hand2VocError> {
        let width = match element.data_type {
            MI_INT8 | MI_UINT8 => 1,
            MI_INT16 | MI_UINT16 => 2,
            MI_INT32 | MI_UINT32 | MI_SINGLE => 4,
            MI_DOUBLE | MI_INT64 | MI_UINT64 => 8,
            other => {
                return Err(self.unsupported(format!("numeric data stored as data type {other}")));
            }
        };
        if element.data.len() % width != 0 {
            return Err(self.malformed(format!(
                "{} byte(s) of numeric data is not a multiple of {width}",
                element.data.len()
            )));
        }

        Ok(match self.endian {
            Endian::Little => decode_values::<LittleEndian>(element.data_type, element.data),
            Endian::Big => decode_values::<BigEndian>(element.data_type, element.data),
        })
    }
}

fn decode_values<B: ByteOrder>(data_type: u32, data: &[u8]) -> Vec<f64> {
    match data_type {
        MI_INT8 => data.iter().map(|&byte| f64::from(byte as i8)).collect(),
        MI_UINT8 => data.iter().map(|&byte| f64::from(byte)).collect(),
        MI_INT16 => data.chunks_exact(2).map(|c| f64::from(B::read_i16(c))).collect(),
        MI_UINT16 => data.chunks_exact(2).map(|c| f64::from(B::read_u16(c))).collect(),
        MI_INT32 => data.chunks_exact(4).map(|c| f64::from(B::read_i32(c))).collect(),
        MI_UINT32 => data.chunks_exact(4).map(|c| f64::from(B::read_u32(c))).collect(),
        MI_SINGLE => data.chunks_exact(4).map(|c| f64::from(B::read_f32(c))).collect(),
        MI_DOUBLE => data.chunks_exact(8).map(B::read_f64).collect(),
        MI_INT64 => data.chunks_exact(8).map(|c| B::read_i64(c) as f64).collect(),
        MI_UINT64 => data.chunks_exact(8).map(|c| B::read_u64(c) as f64).collect(),
        _ => Vec::new(),
    }
}
