//! Keyboard Input Module
//!
//! Tracks which driving keys are held so a snapshot can be taken each frame.
//! Decoupled from any windowing system: hosts translate their own key events
//! into [`KeyCode`] (the browser bridge uses [`KeyCode::from_dom_code`]).

use super::InputSnapshot;

/// Generic key codes for the driving controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    R,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    ShiftLeft,
    ShiftRight,
    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string.
    pub fn from_dom_code(code: &str) -> Self {
        match code {
            "KeyW" => KeyCode::W,
            "KeyA" => KeyCode::A,
            "KeyS" => KeyCode::S,
            "KeyD" => KeyCode::D,
            "KeyR" => KeyCode::R,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Space" => KeyCode::Space,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            _ => KeyCode::Unknown,
        }
    }
}

/// Held state of the driving keys.
///
/// WASD and the arrow keys are tracked separately so releasing one does not
/// cancel the other while both are held.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveKeys {
    w: bool,
    a: bool,
    s: bool,
    d: bool,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Space - drift
    pub drift: bool,
    /// Shift - nitro
    pub nitro: bool,
    /// R - restart, armed on the press edge only
    pub restart: bool,
    restart_held: bool,
}

impl DriveKeys {
    /// All keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update key state from a press/release.
    ///
    /// Returns `true` if the key is a driving key.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => self.w = pressed,
            KeyCode::S => self.s = pressed,
            KeyCode::A => self.a = pressed,
            KeyCode::D => self.d = pressed,
            KeyCode::ArrowUp => self.up = pressed,
            KeyCode::ArrowDown => self.down = pressed,
            KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::ArrowRight => self.right = pressed,
            KeyCode::Space => self.drift = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.nitro = pressed,
            KeyCode::R => {
                // Auto-repeat sends more presses while R is held
                if pressed && !self.restart_held {
                    self.restart = true;
                }
                self.restart_held = pressed;
            }
            KeyCode::Unknown => return false,
        }
        true
    }

    /// Release every key (window blur, tab hidden).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sample the held keys into a frame snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            throttle: self.w || self.up,
            brake: self.s || self.down,
            steer_left: self.a || self.left,
            steer_right: self.d || self.right,
            drift: self.drift,
            nitro: self.nitro,
            restart: self.restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_map_to_same_controls() {
        let mut keys = DriveKeys::new();
        assert!(keys.handle_key(KeyCode::W, true));
        assert!(keys.snapshot().throttle);

        keys.handle_key(KeyCode::ArrowUp, true);
        keys.handle_key(KeyCode::W, false);
        assert!(keys.snapshot().throttle, "arrow still held");

        keys.handle_key(KeyCode::ArrowUp, false);
        assert!(!keys.snapshot().throttle);
    }

    #[test]
    fn test_modifier_keys() {
        let mut keys = DriveKeys::new();
        keys.handle_key(KeyCode::Space, true);
        keys.handle_key(KeyCode::ShiftRight, true);
        keys.handle_key(KeyCode::R, true);

        let snapshot = keys.snapshot();
        assert!(snapshot.drift);
        assert!(snapshot.nitro);
        assert!(snapshot.restart);
    }

    #[test]
    fn test_held_restart_key_arms_once() {
        let mut keys = DriveKeys::new();
        keys.handle_key(KeyCode::R, true);
        assert!(keys.snapshot().restart);

        // Host consumed the restart; auto-repeat keeps reporting the press
        keys.restart = false;
        for _ in 0..5 {
            keys.handle_key(KeyCode::R, true);
            assert!(!keys.snapshot().restart);
        }

        keys.handle_key(KeyCode::R, false);
        assert!(!keys.snapshot().restart);
        keys.handle_key(KeyCode::R, true);
        assert!(keys.snapshot().restart, "a fresh press arms it again");
    }

    #[test]
    fn test_unknown_key_not_handled() {
        let mut keys = DriveKeys::new();
        assert!(!keys.handle_key(KeyCode::Unknown, true));
        assert_eq!(keys.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_dom_codes() {
        assert_eq!(KeyCode::from_dom_code("KeyA"), KeyCode::A);
        assert_eq!(KeyCode::from_dom_code("ArrowRight"), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from_dom_code("Space"), KeyCode::Space);
        assert_eq!(KeyCode::from_dom_code("KeyQ"), KeyCode::Unknown);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut keys = DriveKeys::new();
        keys.handle_key(KeyCode::D, true);
        keys.handle_key(KeyCode::Space, true);
        keys.reset();
        assert_eq!(keys.snapshot(), InputSnapshot::default());
    }
}
