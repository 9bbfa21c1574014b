use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How many bytes of the page are grouped into one displayed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellWidth {
    #[default]
    Byte,
    Word,
    DoubleWord,
    QuadWord,
}

impl std::fmt::Display for CellWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellWidth::Byte => write!(f, "Byte(8)"),
            CellWidth::Word => write!(f, "Word(16)"),
            CellWidth::DoubleWord => write!(f, "Double Word(32)"),
            CellWidth::QuadWord => write!(f, "Quad Word(64)"),
        }
    }
}

impl std::str::FromStr for CellWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "byte" | "1" => Ok(CellWidth::Byte),
            "w" | "word" | "2" => Ok(CellWidth::Word),
            "d" | "dword" | "4" => Ok(CellWidth::DoubleWord),
            "q" | "qword" | "8" => Ok(CellWidth::QuadWord),
            other => Err(format!("unknown cell width: {}", other)),
        }
    }
}

impl CellWidth {
    pub fn all() -> &'static [CellWidth] {
        &[
            CellWidth::Byte,
            CellWidth::Word,
            CellWidth::DoubleWord,
            CellWidth::QuadWord,
        ]
    }

    pub fn bytes(self) -> usize {
        match self {
            CellWidth::Byte => 1,
            CellWidth::Word => 2,
            CellWidth::DoubleWord => 4,
            CellWidth::QuadWord => 8,
        }
    }

    /// Rounds `offset` down to the start of the cell containing it.
    pub fn align(self, offset: usize) -> usize {
        offset - offset % self.bytes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCell {
    pub start_offset: usize,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow {
    pub start_offset: usize,
    pub cells: Vec<DecodedCell>,
    pub ascii: String,
}

/// Renders storage-order (little-endian) bytes most significant byte first.
pub fn render_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes.iter().rev() {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

pub fn ascii_char(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

/// The bytes of the cell starting at `offset`, in storage order. Shorter than
/// the cell width when the buffer ends inside the cell.
pub fn cell_bytes(bytes: &[u8], offset: usize, width: CellWidth) -> Option<&[u8]> {
    if offset >= bytes.len() {
        return None;
    }
    let end = (offset + width.bytes()).min(bytes.len());
    Some(&bytes[offset..end])
}

pub fn decode_rows(bytes: &[u8], width: CellWidth, row_length: usize) -> Vec<DecodedRow> {
    if row_length == 0 {
        return Vec::new();
    }

    bytes
        .chunks(row_length)
        .enumerate()
        .map(|(r, row)| {
            let row_start = r * row_length;
            let cells = row
                .chunks(width.bytes())
                .enumerate()
                .map(|(c, cell)| DecodedCell {
                    start_offset: row_start + c * width.bytes(),
                    hex: render_hex(cell),
                })
                .collect();
            DecodedRow {
                start_offset: row_start,
                cells,
                ascii: row.iter().map(|&b| ascii_char(b)).collect(),
            }
        })
        .collect()
}

/// Flattened, row-major cell sequence of `bytes`.
pub fn decode(bytes: &[u8], width: CellWidth, row_length: usize) -> Vec<DecodedCell> {
    decode_rows(bytes, width, row_length)
        .into_iter()
        .flat_map(|row| row.cells)
        .collect()
}
