//! Held-key tracking with duplicate-press suppression.
//!
//! A key that is already down does not fire `on_key_down` again until it has
//! been released. Terminals that never report releases are handled with a
//! timeout: a key not seen for `release_timeout` is released synthetically.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

/// Maximum number of simultaneously held keys tracked
pub const MAX_HELD_KEYS: usize = 16;

// In terminals without key-release events, a short timeout keeps a single tap
// from leaving the key stuck in the held set.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Receiver of the key-down/key-up callbacks
pub trait KeyListener {
    fn on_key_down(&mut self, key: &str);
    fn on_key_up(&mut self, key: &str);
}

#[derive(Debug, Clone)]
struct HeldKey {
    key: String,
    last_seen: Instant,
}

#[derive(Debug, Clone)]
pub struct Input {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    release_timeout: Duration,
}

impl Input {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Duration::from_millis(timeout_ms as u64),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.held.iter().position(|h| h.key == key)
    }

    /// Key went down (or the terminal repeated it).
    ///
    /// Fires `on_key_down` only for keys not already held; returns whether it fired.
    pub fn press<L: KeyListener + ?Sized>(
        &mut self,
        key: &str,
        now: Instant,
        listener: &mut L,
    ) -> bool {
        if let Some(idx) = self.position(key) {
            self.held[idx].last_seen = now;
            return false;
        }
        if self.held.is_full() {
            // Oldest entry makes room.
            let oldest = self.held.remove(0);
            listener.on_key_up(&oldest.key);
        }
        self.held.push(HeldKey {
            key: key.to_string(),
            last_seen: now,
        });
        listener.on_key_down(key);
        true
    }

    /// Refresh a held key without firing (terminal auto-repeat)
    pub fn touch(&mut self, key: &str, now: Instant) {
        if let Some(idx) = self.position(key) {
            self.held[idx].last_seen = now;
        }
    }

    /// Key went up; fires `on_key_up` only for held keys
    pub fn release<L: KeyListener + ?Sized>(&mut self, key: &str, listener: &mut L) -> bool {
        match self.position(key) {
            Some(idx) => {
                let held = self.held.remove(idx);
                listener.on_key_up(&held.key);
                true
            }
            None => false,
        }
    }

    /// Release every key not seen within the release timeout
    pub fn expire<L: KeyListener + ?Sized>(&mut self, now: Instant, listener: &mut L) -> usize {
        let mut released = 0;
        let mut i = 0;
        while i < self.held.len() {
            if now.saturating_duration_since(self.held[i].last_seen) >= self.release_timeout {
                let held = self.held.remove(i);
                listener.on_key_up(&held.key);
                released += 1;
            } else {
                i += 1;
            }
        }
        released
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forget all held keys without firing callbacks
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keys;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl KeyListener for Log {
        fn on_key_down(&mut self, key: &str) {
            self.0.push(format!("down:{key}"));
        }

        fn on_key_up(&mut self, key: &str) {
            self.0.push(format!("up:{key}"));
        }
    }

    #[test]
    fn test_held_key_does_not_refire() {
        let mut input = Input::new();
        let mut log = Log::default();
        let now = Instant::now();

        assert!(input.press(keys::ARROW_LEFT, now, &mut log));
        assert!(!input.press(keys::ARROW_LEFT, now, &mut log));
        assert!(input.is_down(keys::ARROW_LEFT));

        assert!(input.release(keys::ARROW_LEFT, &mut log));
        assert!(input.press(keys::ARROW_LEFT, now, &mut log));
        assert_eq!(
            log.0,
            vec!["down:ArrowLeft", "up:ArrowLeft", "down:ArrowLeft"]
        );
    }

    #[test]
    fn test_release_of_unheld_key_is_ignored() {
        let mut input = Input::new();
        let mut log = Log::default();
        assert!(!input.release(keys::SPACE, &mut log));
        assert!(log.0.is_empty());
    }

    #[test]
    fn test_expire_releases_stale_keys() {
        let mut input = Input::with_release_timeout_ms(100);
        let mut log = Log::default();
        let t0 = Instant::now();
        input.press(keys::ARROW_LEFT, t0, &mut log);
        input.press(keys::SPACE, t0 + Duration::from_millis(60), &mut log);

        assert_eq!(input.expire(t0 + Duration::from_millis(99), &mut log), 0);
        assert_eq!(input.expire(t0 + Duration::from_millis(100), &mut log), 1);
        assert!(!input.is_down(keys::ARROW_LEFT));
        assert!(input.is_down(keys::SPACE));
    }

    #[test]
    fn test_touch_keeps_key_held() {
        let mut input = Input::with_release_timeout_ms(100);
        let mut log = Log::default();
        let t0 = Instant::now();
        input.press(keys::ARROW_UP, t0, &mut log);
        input.touch(keys::ARROW_UP, t0 + Duration::from_millis(80));
        assert_eq!(input.expire(t0 + Duration::from_millis(150), &mut log), 0);
        assert_eq!(input.held_count(), 1);
    }

    #[test]
    fn test_full_set_evicts_oldest() {
        let mut input = Input::new();
        let mut log = Log::default();
        let now = Instant::now();
        for i in 0..=MAX_HELD_KEYS {
            input.press(&format!("Key{i}"), now, &mut log);
        }
        assert_eq!(input.held_count(), MAX_HELD_KEYS);
        assert!(!input.is_down("Key0"));
        assert!(log.0.contains(&"up:Key0".to_string()));
    }
}
