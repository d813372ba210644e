//! Item trigger logic for item mode.
//!
//! Counts cleared lines and reports when the configured interval is reached.
//! The caller then forces the generator's next piece to be an item.

use tracing::debug;

use crate::types::ITEM_INTERVAL_DEFAULT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemManager {
    interval: u32,
    lines_since_item: u32,
}

impl ItemManager {
    /// `interval` is the number of cleared lines per item; zero is treated as one.
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            lines_since_item: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn lines_since_item(&self) -> u32 {
        self.lines_since_item
    }

    /// Lines still needed before the next item is due.
    pub fn lines_until_item(&self) -> u32 {
        self.interval - self.lines_since_item
    }

    /// Record a line-clear event.
    ///
    /// Returns true when the accumulated count reached the interval; the
    /// counter is then reset to zero and any surplus lines are dropped.
    pub fn on_lines_cleared(&mut self, lines: u32) -> bool {
        if lines == 0 {
            return false;
        }
        self.lines_since_item = self.lines_since_item.saturating_add(lines);
        if self.lines_since_item < self.interval {
            return false;
        }
        debug!(
            lines = self.lines_since_item,
            interval = self.interval,
            "item threshold reached"
        );
        self.lines_since_item = 0;
        true
    }

    pub fn reset(&mut self) {
        self.lines_since_item = 0;
    }
}

impl Default for ItemManager {
    fn default() -> Self {
        Self::new(ITEM_INTERVAL_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_every_two_lines() {
        let mut items = ItemManager::new(2);
        assert!(!items.on_lines_cleared(1));
        assert_eq!(items.lines_until_item(), 1);
        assert!(items.on_lines_cleared(1));
        assert_eq!(items.lines_since_item(), 0);
    }

    #[test]
    fn surplus_lines_are_dropped_on_reset() {
        let mut items = ItemManager::new(10);
        assert!(!items.on_lines_cleared(4));
        assert!(!items.on_lines_cleared(4));
        assert!(items.on_lines_cleared(4));
        assert_eq!(items.lines_since_item(), 0);
        assert_eq!(items.lines_until_item(), 10);
    }

    #[test]
    fn zero_lines_is_not_an_event() {
        let mut items = ItemManager::new(1);
        assert!(!items.on_lines_cleared(0));
        assert!(items.on_lines_cleared(1));
    }

    #[test]
    fn zero_interval_behaves_like_one() {
        let mut items = ItemManager::new(0);
        assert_eq!(items.interval(), 1);
        assert!(items.on_lines_cleared(1));
    }

    #[test]
    fn reset_clears_progress() {
        let mut items = ItemManager::new(10);
        items.on_lines_cleared(3);
        items.reset();
        assert_eq!(items.lines_until_item(), 10);
    }
}
