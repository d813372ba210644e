//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, DEFAULT_KEY_RELEASE_TIMEOUT_MS, SOFT_DROP_ARR_MS,
    SOFT_DROP_DAS_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Delay-then-repeat timer for one held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RepeatTimer {
    delay_ms: u32,
    rate_ms: u32,
    held_ms: u32,
    accumulator_ms: u32,
}

impl RepeatTimer {
    fn new(delay_ms: u32, rate_ms: u32) -> Self {
        Self {
            delay_ms,
            // A zero rate would repeat forever.
            rate_ms: rate_ms.max(1),
            held_ms: 0,
            accumulator_ms: 0,
        }
    }

    fn reset(&mut self) {
        self.held_ms = 0;
        self.accumulator_ms = 0;
    }

    /// Advance by `elapsed_ms` and return how many repeats fired.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.delay_ms {
            return 0;
        }

        // Only time spent past the delay counts towards repeats.
        let counted = if before < self.delay_ms {
            self.held_ms - self.delay_ms
        } else {
            elapsed_ms
        };
        self.accumulator_ms += counted;

        let fired = self.accumulator_ms / self.rate_ms;
        self.accumulator_ms %= self.rate_ms;
        fired
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: RepeatTimer,
    down_repeat: RepeatTimer,
    key_release_timeout_ms: u32,
}

/// Upper bound on actions produced by one `update`.
pub const MAX_ACTIONS_PER_UPDATE: usize = 32;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: RepeatTimer::new(das_delay, arr_rate),
            down_repeat: RepeatTimer::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Register a key press. Returns the immediate action for a newly held
    /// movement key; repeats of an already held key return `None`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let (direction, action) = match code {
            KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => {
                (HorizontalDirection::Left, GameAction::MoveLeft)
            }
            KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => {
                (HorizontalDirection::Right, GameAction::MoveRight)
            }
            KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => {
                self.last_key_time = Instant::now();
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.reset();
                return Some(GameAction::SoftDrop);
            }
            _ => return None,
        };

        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat.reset();
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let released = match code {
            KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => HorizontalDirection::Left,
            KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => HorizontalDirection::Right,
            KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => {
                self.release_down();
                return;
            }
            _ => return,
        };
        if self.horizontal == released {
            self.release_horizontal();
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_repeat.reset();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.reset();
    }

    /// Advance repeat timers by `elapsed_ms` and collect the repeated actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_ACTIONS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        // Auto-release when the terminal does not emit release events.
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        let horizontal_action = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = horizontal_action {
            for _ in 0..self.horizontal_repeat.advance(elapsed_ms) {
                let _ = actions.try_push(action);
            }
        }

        if self.down_held {
            for _ in 0..self.down_repeat.advance(elapsed_ms) {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still nothing accumulated.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_held_key_press_does_not_retrigger() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal, HorizontalDirection::Left);

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDrop));
        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(0, 10).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Right);
        assert_eq!(ih.update(30).len(), 3);

        ih.handle_key_release(KeyCode::Right);
        assert!(ih.update(30).is_empty());
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_press(KeyCode::Down);
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(!ih.down_held());
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let mut timer = RepeatTimer::new(0, 0);
        assert_eq!(timer.advance(5), 5);
    }
}
