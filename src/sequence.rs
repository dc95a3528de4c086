use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Ordered image list with a cursor
// ---------------------------------------------------------------------------

/// The images of the selected folder and the index of the one on screen.
///
/// `current_index` stays within `0..len` while the list is non-empty and is
/// `0` when it is empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    current_index: usize,
}

impl ImageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list and move the cursor back to the first entry.
    pub fn load(&mut self, paths: Vec<PathBuf>) {
        self.paths = paths;
        self.current_index = 0;
    }

    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.current_index).map(PathBuf::as_path)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// 1-based position of the cursor and the total count, for display.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.current_index + 1, self.paths.len()))
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.paths.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn retreat(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_index -= 1;
        true
    }
}
