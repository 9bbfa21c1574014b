/// One fetched window of remote memory. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    base_offset: u64,
    bytes: Vec<u8>,
}

impl Page {
    pub fn new(base_offset: u64, bytes: Vec<u8>) -> Self {
        Self { base_offset, bytes }
    }

    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn address_of(&self, offset: usize) -> u64 {
        self.base_offset.saturating_add(offset as u64)
    }

    /// Offset of `address` inside this page, if the page covers it.
    pub fn offset_of(&self, address: u64) -> Option<usize> {
        let offset = address.checked_sub(self.base_offset)?;
        if offset < self.bytes.len() as u64 {
            Some(offset as usize)
        } else {
            None
        }
    }
}
