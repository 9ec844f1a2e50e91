//! Shared keyboard state and its published snapshot.
//!
//! The dispatch engine is the sole writer of [`KeyboardState`]; the transport
//! context only ever sees immutable [`StateSnapshot`] values published through
//! [`crate::channel`]. A snapshot carries at most the 6 lowest active keycodes
//! in ascending order, matching the boot keyboard report limit.

use crate::REPORT_KEYCODES;

/// Membership set over the 8-bit keycode space.
///
/// Keycode 0 is the wire pad value, not a valid keycode, and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeycodeSet {
    words: [u32; 8],
}

impl KeycodeSet {
    pub const fn new() -> Self {
        Self { words: [0; 8] }
    }

    pub fn insert(&mut self, code: u8) {
        if code == 0 {
            return;
        }
        self.words[(code >> 5) as usize] |= 1 << (code & 31);
    }

    pub fn remove(&mut self, code: u8) {
        self.words[(code >> 5) as usize] &= !(1 << (code & 31));
    }

    pub fn contains(&self, code: u8) -> bool {
        self.words[(code >> 5) as usize] & (1 << (code & 31)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Member keycodes in ascending numeric order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u16..=255).map(|code| code as u8).filter(|code| self.contains(*code))
    }
}

impl Default for KeycodeSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of one half's state at a point in time: report keycodes,
/// modifier byte, consumer code and the 16-bit layer-activity bitmask.
///
/// This is also exactly what goes over the split link, see [`crate::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateSnapshot {
    /// Up to 6 active keycodes, ascending, zero-padded.
    pub keycodes: [u8; REPORT_KEYCODES],
    pub modifiers: u8,
    pub consumer: u16,
    pub layers: u16,
}

impl StateSnapshot {
    pub const fn new() -> Self {
        Self {
            keycodes: [0; REPORT_KEYCODES],
            modifiers: 0,
            consumer: 0,
            layers: 0,
        }
    }

    /// The non-pad prefix of the keycode slots.
    pub fn active_keycodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.keycodes.iter().copied().take_while(|code| *code != 0)
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// The mutable record behind the snapshots: active keycodes, modifier bits and
/// the single consumer-control code (last writer wins).
#[derive(Debug, Default)]
pub struct KeyboardState {
    keycodes: KeycodeSet,
    modifiers: u8,
    consumer: u16,
}

impl KeyboardState {
    pub const fn new() -> Self {
        Self {
            keycodes: KeycodeSet::new(),
            modifiers: 0,
            consumer: 0,
        }
    }

    pub fn set_key(&mut self, code: u8, pressed: bool) {
        if pressed {
            self.keycodes.insert(code);
        } else {
            self.keycodes.remove(code);
        }
    }

    /// OR the mask in on press, AND-NOT it out on release.
    pub fn set_modifier_bits(&mut self, mask: u8, pressed: bool) {
        if pressed {
            self.modifiers |= mask;
        } else {
            self.modifiers &= !mask;
        }
    }

    pub fn set_consumer(&mut self, code: u16) {
        self.consumer = code;
    }

    /// Clear the consumer code only if `code` is still the stored one, so a
    /// stale release can't clobber a newer press.
    pub fn clear_consumer(&mut self, code: u16) {
        if self.consumer == code {
            self.consumer = 0;
        }
    }

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    pub fn consumer(&self) -> u16 {
        self.consumer
    }

    pub fn keycodes(&self) -> &KeycodeSet {
        &self.keycodes
    }

    /// Pure read of the current state. More than 6 active keycodes truncate
    /// silently to the 6 lowest-numbered.
    pub fn snapshot(&self, layers: u16) -> StateSnapshot {
        let mut keycodes = [0; REPORT_KEYCODES];
        for (slot, code) in self.keycodes.iter().take(REPORT_KEYCODES).enumerate() {
            keycodes[slot] = code;
        }
        StateSnapshot {
            keycodes,
            modifiers: self.modifiers,
            consumer: self.consumer,
            layers,
        }
    }
}
