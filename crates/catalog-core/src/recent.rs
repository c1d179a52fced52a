//! Bounded most-recent-first list.

use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentList<T> {
    entries: VecDeque<T>,
    cap: usize,
}

impl<T: PartialEq> RecentList<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Move `entry` to the front, evicting the oldest entry past the cap.
    pub fn touch(&mut self, entry: T) {
        if self.cap == 0 {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|e| *e == entry) {
            self.entries.remove(pos);
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
    }

    pub fn remove(&mut self, entry: &T) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_moves_to_front_without_duplicates() {
        let mut recent = RecentList::new(3);
        recent.touch("a");
        recent.touch("b");
        recent.touch("a");
        assert_eq!(recent.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut recent = RecentList::new(2);
        recent.touch(1);
        recent.touch(2);
        recent.touch(3);
        assert_eq!(recent.iter().copied().collect::<Vec<_>>(), vec![3, 2]);
        assert!(recent.remove(&2));
        assert!(!recent.remove(&1));
    }

    #[test]
    fn zero_cap_keeps_nothing() {
        let mut recent = RecentList::new(0);
        recent.touch("a");
        assert!(recent.is_empty());
    }
}
