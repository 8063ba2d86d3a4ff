//! Keyboard input mapping
//!
//! Event wiring stays with the host; this only turns a snapshot of held
//! keys into a [`TickInput`].
//!
//! Bindings: left paddle W/S, right paddle O/L, Space starts, Enter resets
//! after a match is decided.

use std::collections::HashSet;

use crate::sim::{MatchPhase, TickInput};

/// Normalize a key name so "W" and "w" are the same key
fn normalize(key: &str) -> String {
    match key {
        " " | "Space" | "Spacebar" => "space".to_string(),
        other => other.to_lowercase(),
    }
}

/// Keys currently held plus keys pressed since the last sample
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<String>,
    pressed: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn press(&mut self, key: &str) {
        let key = normalize(key);
        if self.held.insert(key.clone()) {
            self.pressed.insert(key);
        }
    }

    /// Handle key up event
    pub fn release(&mut self, key: &str) {
        self.held.remove(&normalize(key));
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&normalize(key))
    }

    /// Snapshot for one tick. One-shot presses are consumed.
    pub fn sample(&mut self, phase: MatchPhase) -> TickInput {
        let input = TickInput {
            left_up: self.is_held("w"),
            left_down: self.is_held("s"),
            right_up: self.is_held("o"),
            right_down: self.is_held("l"),
            start_pressed: phase == MatchPhase::Start && self.pressed.contains("space"),
            reset_pressed: matches!(phase, MatchPhase::GameOver { .. })
                && self.pressed.contains("enter"),
        };
        self.pressed.clear();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_held_keys_map_to_paddles() {
        let mut keys = HeldKeys::new();
        keys.press("W");
        keys.press("l");
        let input = keys.sample(MatchPhase::Playing);
        assert!(input.left_up);
        assert!(!input.left_down);
        assert!(input.right_down);
        assert!(!input.right_up);

        keys.release("w");
        let input = keys.sample(MatchPhase::Playing);
        assert!(!input.left_up);
        assert!(input.right_down);
    }

    #[test]
    fn test_space_starts_only_once() {
        let mut keys = HeldKeys::new();
        keys.press(" ");
        assert!(keys.sample(MatchPhase::Start).start_pressed);
        // Still held, but the press was consumed
        assert!(!keys.sample(MatchPhase::Start).start_pressed);
    }

    #[test]
    fn test_enter_resets_only_after_game_over() {
        let mut keys = HeldKeys::new();
        keys.press("Enter");
        assert!(!keys.sample(MatchPhase::Playing).reset_pressed);

        keys.release("Enter");
        keys.press("Enter");
        let input = keys.sample(MatchPhase::GameOver { winner: Side::Left });
        assert!(input.reset_pressed);
    }
}
