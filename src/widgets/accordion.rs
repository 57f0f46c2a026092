//! FAQ accordion: at most one open panel per group.

/// What a question click should do to the panels of its group.
///
/// Rendering always closes every panel first, then opens `open` if set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionChange {
    pub open: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AccordionState {
    open: Option<usize>,
    len: usize,
}

impl AccordionState {
    pub fn new(len: usize, open: Option<usize>) -> Self {
        Self {
            open: open.filter(|&i| i < len),
            len,
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Click on question `index`: an open panel collapses everything,
    /// a closed one collapses everything and then opens itself.
    pub fn click(&mut self, index: usize) -> AccordionChange {
        if index >= self.len {
            return AccordionChange { open: self.open };
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        AccordionChange { open: self.open }
    }
}
