//! Cursor for the detail overlay.
//!
//! The overlay shows one entry from the gallery's currently visible page
//! and steps prev/next over that page only, never the full backing store.

/// Position of the detail overlay within the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCursor {
    index: usize,
    len: usize,
}

impl OverlayCursor {
    /// Create a cursor at `index` over a page of `len` entries.
    ///
    /// Callers guarantee `index < len`; the gallery ignores out-of-range
    /// open requests before constructing a cursor.
    pub fn new(index: usize, len: usize) -> Self {
        debug_assert!(index < len);
        Self { index, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether stepping backwards is possible (disabled at index 0).
    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    /// Whether stepping forwards is possible (disabled at the last entry).
    pub fn can_next(&self) -> bool {
        self.index + 1 < self.len
    }

    /// Step to the previous entry; no-op at the first.
    pub fn prev(&mut self) {
        if self.can_prev() {
            self.index -= 1;
        }
    }

    /// Step to the next entry; no-op at the last.
    pub fn next(&mut self) {
        if self.can_next() {
            self.index += 1;
        }
    }

    /// Re-anchor after the entry at `removed` left the page (which now has
    /// `new_len` entries). Returns `None` when the overlay should close:
    /// either its own entry was removed or the page is now empty.
    pub fn entry_removed(mut self, removed: usize, new_len: usize) -> Option<Self> {
        if removed == self.index || new_len == 0 {
            return None;
        }
        if removed < self.index {
            self.index -= 1;
        }
        self.len = new_len;
        Some(self)
    }
}
