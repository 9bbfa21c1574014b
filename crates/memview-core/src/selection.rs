use crate::cell::{self, CellWidth};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected {
        offset: usize,
        /// Cell bytes in storage order.
        value: Vec<u8>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum SelectionEvent<'a> {
    Hover(usize),
    WidthChange(CellWidth),
    PageReplaced {
        page: &'a Page,
        offset_within_page: usize,
    },
}

impl Selection {
    /// Selects the cell containing `offset` on `page`. Offsets past the end of
    /// the page are pulled back onto the last byte.
    pub fn at(page: &Page, offset: usize, width: CellWidth) -> Selection {
        if page.is_empty() {
            return Selection::None;
        }
        let offset = width.align(offset.min(page.len() - 1));
        match cell::cell_bytes(page.bytes(), offset, width) {
            Some(value) => Selection::Selected {
                offset,
                value: value.to_vec(),
            },
            None => Selection::None,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Selection::None => None,
            Selection::Selected { offset, .. } => Some(*offset),
        }
    }

    pub fn value(&self) -> Option<&[u8]> {
        match self {
            Selection::None => None,
            Selection::Selected { value, .. } => Some(value),
        }
    }

    /// Value rendered the way the grid shows it.
    pub fn hex(&self) -> Option<String> {
        self.value().map(cell::render_hex)
    }

    /// Little-endian numeric value of the selected cell.
    pub fn as_u64(&self) -> Option<u64> {
        self.value().map(|value| {
            value
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64)
        })
    }

    /// `page` and `width` describe the view before the event is applied.
    pub fn transition(
        self,
        page: Option<&Page>,
        width: CellWidth,
        event: SelectionEvent<'_>,
    ) -> Selection {
        match event {
            SelectionEvent::Hover(offset) => match page {
                Some(page) if offset < page.len() => Selection::at(page, offset, width),
                _ => self,
            },
            SelectionEvent::WidthChange(new_width) => match (page, self.offset()) {
                (Some(page), Some(offset)) => Selection::at(page, offset, new_width),
                _ => self,
            },
            SelectionEvent::PageReplaced {
                page,
                offset_within_page,
            } => Selection::at(page, offset_within_page, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(0x1000, (0..=255u8).collect())
    }

    #[test]
    fn test_no_selection_before_any_page() {
        let selection = Selection::None.transition(None, CellWidth::Byte, SelectionEvent::Hover(3));
        assert_eq!(selection, Selection::None);
        let selection = selection.transition(
            None,
            CellWidth::Byte,
            SelectionEvent::WidthChange(CellWidth::Word),
        );
        assert_eq!(selection, Selection::None);
    }

    #[test]
    fn test_page_replaced_keeps_translated_offset() {
        let page = page();
        let selection = Selection::None.transition(
            None,
            CellWidth::Byte,
            SelectionEvent::PageReplaced {
                page: &page,
                offset_within_page: 16,
            },
        );
        assert_eq!(selection.offset(), Some(16));
        assert_eq!(selection.value(), Some(&[16u8][..]));
    }

    #[test]
    fn test_hover_moves_selection() {
        let page = page();
        let selection = Selection::at(&page, 0, CellWidth::Word).transition(
            Some(&page),
            CellWidth::Word,
            SelectionEvent::Hover(0x22),
        );
        assert_eq!(selection.offset(), Some(0x22));
        assert_eq!(selection.hex().as_deref(), Some("2322"));
        assert_eq!(selection.as_u64(), Some(0x2322));
    }

    #[test]
    fn test_hover_outside_page_is_ignored() {
        let page = page();
        let before = Selection::at(&page, 8, CellWidth::Byte);
        let after = before
            .clone()
            .transition(Some(&page), CellWidth::Byte, SelectionEvent::Hover(256));
        assert_eq!(before, after);
    }

    #[test]
    fn test_width_change_snaps_to_cell_boundary() {
        let page = page();
        let selection = Selection::at(&page, 13, CellWidth::Byte).transition(
            Some(&page),
            CellWidth::Byte,
            SelectionEvent::WidthChange(CellWidth::QuadWord),
        );
        assert_eq!(selection.offset(), Some(8));
        assert_eq!(selection.value(), Some(&[8u8, 9, 10, 11, 12, 13, 14, 15][..]));
        assert_eq!(selection.hex().as_deref(), Some("0f0e0d0c0b0a0908"));
    }

    #[test]
    fn test_offset_stays_inside_page_for_any_sequence() {
        let page = page();
        let mut width = CellWidth::Byte;
        let mut selection = Selection::None;
        let widths = CellWidth::all();

        for step in 0..500usize {
            let event = match step % 3 {
                0 => SelectionEvent::Hover((step * 97) % 300),
                1 => SelectionEvent::WidthChange(widths[step % widths.len()]),
                _ => SelectionEvent::PageReplaced {
                    page: &page,
                    offset_within_page: (step * 31) % 256,
                },
            };
            selection = selection.transition(Some(&page), width, event);
            if let SelectionEvent::WidthChange(new_width) = event {
                width = new_width;
            }
            if let Some(offset) = selection.offset() {
                assert!(offset < page.len());
                assert_eq!(offset % width.bytes(), 0);
            }
        }
    }

    #[test]
    fn test_empty_page_has_no_selection() {
        let page = Page::new(0, Vec::new());
        assert_eq!(Selection::at(&page, 0, CellWidth::Byte), Selection::None);
    }
}
