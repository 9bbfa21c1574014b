use crate::cell::CellWidth;
use crate::error::{Result, ViewerError};

/// Rows and columns of one page. The page size is `rows * columns` bytes and
/// every row holds `columns` bytes. `columns` is a multiple of the widest cell
/// so every cell the grid draws starts on a multiple of its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    rows: u16,
    columns: u16,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            rows: 16,
            columns: 16,
        }
    }
}

impl PageGeometry {
    pub fn new(rows: u16, columns: u16) -> Result<Self> {
        let widest = CellWidth::QuadWord.bytes() as u16;
        if rows == 0 || columns == 0 || columns % widest != 0 {
            return Err(ViewerError::InvalidGeometry);
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn page_size(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }

    pub fn row_length(&self) -> usize {
        self.columns as usize
    }
}

/// Where an address lands once it is split into an aligned page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub base_offset: u64,
    pub offset_within_page: usize,
    pub length: usize,
}

impl PageWindow {
    pub fn address(&self) -> u64 {
        self.base_offset + self.offset_within_page as u64
    }
}

/// Parses hexadecimal address text. The `0x` prefix is optional.
pub fn parse_address(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // from_str_radix accepts a leading '+', an address does not
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ViewerError::InvalidAddress(text.to_string()));
    }

    u64::from_str_radix(digits, 16).map_err(|_| ViewerError::InvalidAddress(text.to_string()))
}

pub fn locate(address: u64, page_size: u64) -> Result<PageWindow> {
    let remainder = address
        .checked_rem(page_size)
        .ok_or(ViewerError::InvalidGeometry)?;
    Ok(PageWindow {
        base_offset: address - remainder,
        offset_within_page: remainder as usize,
        length: page_size as usize,
    })
}

pub fn translate(address_text: &str, page_size: u64) -> Result<PageWindow> {
    let address = parse_address(address_text)?;
    locate(address, page_size)
}

/// Resolves jump dialog input. `+hex` and `-hex` move relative to `current`,
/// anything else is an absolute address.
pub fn parse_jump(text: &str, current: u64) -> Result<u64> {
    let trimmed = text.trim();
    let invalid = || ViewerError::InvalidAddress(text.to_string());

    if let Some(delta) = trimmed.strip_prefix('+') {
        let delta = parse_address(delta).map_err(|_| invalid())?;
        current.checked_add(delta).ok_or_else(invalid)
    } else if let Some(delta) = trimmed.strip_prefix('-') {
        let delta = parse_address(delta).map_err(|_| invalid())?;
        current.checked_sub(delta).ok_or_else(invalid)
    } else {
        parse_address(trimmed).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_splits_address_into_page_and_offset() {
        let window = translate("110", 256).unwrap();
        assert_eq!(window.base_offset, 256);
        assert_eq!(window.offset_within_page, 16);
        assert_eq!(window.length, 256);
        assert_eq!(window.address(), 0x110);
    }

    #[test]
    fn test_translate_address_on_page_boundary() {
        let window = translate("100", 256).unwrap();
        assert_eq!(window.base_offset, 0x100);
        assert_eq!(window.offset_within_page, 0);
    }

    #[test]
    fn test_translate_is_aligned_for_many_addresses() {
        let samples = [
            0u64,
            1,
            0xff,
            0x100,
            0x1234_5678,
            0xdead_beef_cafe,
            u64::MAX - 1,
            u64::MAX,
        ];
        for page_size in [16u64, 256, 4096] {
            for address in samples {
                let window = translate(&format!("{:x}", address), page_size).unwrap();
                assert_eq!(window.base_offset % page_size, 0);
                assert!((window.offset_within_page as u64) < page_size);
                assert_eq!(window.address(), address);
            }
        }
    }

    #[test]
    fn test_translate_accepts_prefix_and_whitespace() {
        assert_eq!(translate(" 0x1F0 ", 256).unwrap().offset_within_page, 0xf0);
        assert_eq!(translate("0XAbC", 256).unwrap().base_offset, 0xa00);
    }

    #[test]
    fn test_translate_rejects_invalid_text() {
        for text in ["", "   ", "0x", "xyz", "12g4", "+10", "-1", "1 2"] {
            assert_eq!(
                translate(text, 256),
                Err(ViewerError::InvalidAddress(text.to_string())),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_translate_rejects_overflowing_address() {
        assert!(matches!(
            translate("1_0000_0000_0000_0000", 256),
            Err(ViewerError::InvalidAddress(_))
        ));
        assert!(matches!(
            translate("10000000000000000", 256),
            Err(ViewerError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_locate_rejects_zero_page_size() {
        assert_eq!(locate(0x10, 0), Err(ViewerError::InvalidGeometry));
    }

    #[test]
    fn test_geometry() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.page_size(), 256);
        assert_eq!(geometry.row_length(), 16);
        assert_eq!(PageGeometry::new(0, 16), Err(ViewerError::InvalidGeometry));
        assert_eq!(PageGeometry::new(8, 32).unwrap().page_size(), 256);
        assert_eq!(PageGeometry::new(2, 24).unwrap().row_length(), 24);
    }

    #[test]
    fn test_geometry_rejects_columns_that_split_wide_cells() {
        for columns in [1, 4, 6, 12, 20] {
            assert_eq!(
                PageGeometry::new(16, columns),
                Err(ViewerError::InvalidGeometry),
                "{} columns",
                columns
            );
        }
    }

    #[test]
    fn test_parse_jump_relative_and_absolute() {
        assert_eq!(parse_jump("+10", 0x100).unwrap(), 0x110);
        assert_eq!(parse_jump("-10", 0x100).unwrap(), 0xf0);
        assert_eq!(parse_jump("2000", 0x100).unwrap(), 0x2000);
        assert_eq!(parse_jump("+0x20", 0x100).unwrap(), 0x120);
    }

    #[test]
    fn test_parse_jump_rejects_wrapping() {
        assert!(parse_jump("-101", 0x100).is_err());
        assert!(parse_jump("+1", u64::MAX).is_err());
        assert!(parse_jump("+", 0).is_err());
        assert!(parse_jump("--1", 0x100).is_err());
    }
}
