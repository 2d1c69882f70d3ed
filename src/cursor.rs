/// Position of the displayed image. Wraps around at both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// `None` when there is nothing to show.
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Moves by `delta` modulo the length. No-op on an empty sequence.
    pub fn advance(&mut self, delta: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let len = self.len as i128;
        self.index = (self.index as i128 + delta as i128).rem_euclid(len) as usize;
        Some(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_from_last_wraps_to_first() {
        let mut c = Cursor::new(3);
        c.advance(2);
        assert_eq!(c.advance(1), Some(0));
    }

    #[test]
    fn left_from_first_wraps_to_last() {
        let mut c = Cursor::new(3);
        assert_eq!(c.advance(-1), Some(2));
    }

    #[test]
    fn stays_in_range_for_any_moves() {
        for len in 1..6 {
            let mut c = Cursor::new(len);
            for delta in [-7, 3, -1, 1, 11, -100, 0, isize::MAX, isize::MIN] {
                let i = c.advance(delta).unwrap();
                assert!(i < len, "index {i} out of range for len {len}");
                assert_eq!(c.index(), Some(i));
            }
        }
    }

    #[test]
    fn empty_is_a_no_op() {
        let mut c = Cursor::new(0);
        assert_eq!(c.advance(1), None);
        assert_eq!(c.advance(-1), None);
        assert_eq!(c.index(), None);
    }
}
