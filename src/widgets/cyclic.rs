//! Wrap-around index used by the lightbox gallery and the testimonial carousel.

/// Index into a fixed-length sequence, always in `[0, len)` when `len > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicIndex {
    index: usize,
    len: usize,
}

impl CyclicIndex {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn get(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `index = (index + 1) mod len`
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// `index = (index - 1 + len) mod len`
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to `index`. Out-of-range requests leave the index untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut idx = CyclicIndex::new(4);
        idx.select(2);
        for _ in 0..4 {
            idx.next();
        }
        assert_eq!(idx.get(), 2);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut idx = CyclicIndex::new(5);
        assert_eq!(idx.prev(), 4);
        assert_eq!(idx.prev(), 3);
    }

    #[test]
    fn test_navigation_matches_modular_offset() {
        let len = 7;
        let start = 3;
        let mut idx = CyclicIndex::new(len);
        idx.select(start);
        for k in 1..20 {
            idx.next();
            assert_eq!(idx.get(), (start + k) % len);
        }
        idx.select(start);
        for k in 1..20 {
            idx.prev();
            assert_eq!(idx.get(), (start + len * 20 - k) % len);
        }
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut idx = CyclicIndex::new(3);
        assert!(!idx.select(3));
        assert_eq!(idx.get(), 0);
        assert!(idx.select(2));
        assert_eq!(idx.get(), 2);
    }

    #[test]
    fn test_empty_sequence_stays_at_zero() {
        let mut idx = CyclicIndex::new(0);
        assert!(idx.is_empty());
        assert_eq!(idx.next(), 0);
        assert_eq!(idx.prev(), 0);
    }
}
