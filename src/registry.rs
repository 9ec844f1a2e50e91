//! The key registry: a fixed-capacity arena of per-key binding tables.
//!
//! Each key owns one [`Action`] per layer plus its current pressed flag. The
//! arena is sized at configure time; `CAP` bounds it at compile time so no
//! dynamic growth ever happens after configuration.

use heapless::Vec;

use crate::NUM_LAYERS;
use crate::action::Action;
use crate::error::Error;

/// One physical key: a 16-entry binding table and the stored pressed state.
#[derive(Debug, Clone)]
pub struct Key {
    bindings: [Action; NUM_LAYERS],
    pressed: bool,
}

impl Key {
    const fn new() -> Self {
        Self {
            bindings: [Action::Transparent; NUM_LAYERS],
            pressed: false,
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::new()
    }
}

pub struct KeyRegistry<const CAP: usize> {
    keys: Vec<Key, CAP>,
}

impl<const CAP: usize> KeyRegistry<CAP> {
    /// Allocate `key_count` binding tables, every entry transparent.
    pub fn configure(key_count: usize) -> Result<Self, Error> {
        let mut keys = Vec::new();
        for _ in 0..key_count {
            keys.push(Key::new()).map_err(|_| Error::OutOfMemory)?;
        }
        Ok(Self { keys })
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Replace the binding at one `(key, layer)` slot.
    pub fn bind(&mut self, key_index: usize, layer: u8, action: Action) -> Result<(), Error> {
        if layer as usize >= NUM_LAYERS {
            return Err(Error::InvalidLayer);
        }
        let key = self.keys.get_mut(key_index).ok_or(Error::InvalidKeyIndex)?;
        key.bindings[layer as usize] = action;
        Ok(())
    }

    pub fn binding(&self, key_index: usize, layer: u8) -> Result<Action, Error> {
        if layer as usize >= NUM_LAYERS {
            return Err(Error::InvalidLayer);
        }
        let key = self.keys.get(key_index).ok_or(Error::InvalidKeyIndex)?;
        Ok(key.bindings[layer as usize])
    }

    pub(crate) fn is_pressed(&self, key_index: usize) -> Result<bool, Error> {
        Ok(self.keys.get(key_index).ok_or(Error::InvalidKeyIndex)?.pressed)
    }

    pub(crate) fn set_pressed(&mut self, key_index: usize, pressed: bool) -> Result<(), Error> {
        self.keys.get_mut(key_index).ok_or(Error::InvalidKeyIndex)?.pressed = pressed;
        Ok(())
    }

    /// Tear the registry down. Consuming the handle makes use-after-release
    /// unrepresentable; this exists to support tests, the firmware itself runs
    /// until power loss.
    pub fn release(self) {}
}
