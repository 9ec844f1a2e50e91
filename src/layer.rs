//! The layer stack: 16 activity flags plus the default-layer pointer.
//!
//! Precedence is a fixed total order: the topmost active layer wins, and the
//! default layer is always eligible as the resolution floor even when its own
//! activity flag is clear. Layers below the default are never inspected.

use crate::NUM_LAYERS;
use crate::error::Error;

pub struct LayerStack {
    active: [bool; NUM_LAYERS],
    default_layer: u8,
}

impl LayerStack {
    pub const fn new() -> Self {
        Self {
            active: [false; NUM_LAYERS],
            default_layer: 0,
        }
    }

    fn check(layer: u8) -> Result<(), Error> {
        if (layer as usize) < NUM_LAYERS {
            Ok(())
        } else {
            Err(Error::InvalidLayer)
        }
    }

    /// Whether the layer's activity flag is set. Layers that don't exist are
    /// never active.
    pub fn is_active(&self, layer: u8) -> bool {
        (layer as usize) < NUM_LAYERS && self.active[layer as usize]
    }

    pub fn set_active(&mut self, layer: u8, active: bool) -> Result<(), Error> {
        Self::check(layer)?;
        self.active[layer as usize] = active;
        Ok(())
    }

    pub fn default_layer(&self) -> u8 {
        self.default_layer
    }

    /// Move the resolution floor. Activity flags are left untouched.
    pub fn set_default_layer(&mut self, layer: u8) -> Result<(), Error> {
        Self::check(layer)?;
        self.default_layer = layer;
        Ok(())
    }

    /// The winning layer for the next transition: scan from layer 15 down to
    /// one above the default layer, first active flag wins; the default layer
    /// is the floor when nothing above it is active.
    pub fn resolve(&self) -> u8 {
        let floor = self.default_layer as usize;
        for layer in (floor + 1..NUM_LAYERS).rev() {
            if self.active[layer] {
                return layer as u8;
            }
        }
        self.default_layer
    }

    /// The next eligible layer strictly below `layer`, used by transparent
    /// bindings. The default layer is always eligible as the floor; `None`
    /// only when `layer` is already at or below it.
    pub fn resolve_below(&self, layer: u8) -> Option<u8> {
        let floor = self.default_layer;
        if layer <= floor {
            return None;
        }
        for candidate in (floor + 1..layer).rev() {
            if self.active[candidate as usize] {
                return Some(candidate);
            }
        }
        Some(floor)
    }

    /// Clear every activity flag, then activate the default and target layers.
    pub fn turn_on_exclusive(&mut self, target: u8) -> Result<(), Error> {
        Self::check(target)?;
        self.active = [false; NUM_LAYERS];
        self.active[self.default_layer as usize] = true;
        self.active[target as usize] = true;
        Ok(())
    }

    /// Activity flags packed into 16 bits, bit i = layer i active.
    pub fn bitmask(&self) -> u16 {
        let mut bits = 0;
        for (layer, active) in self.active.iter().enumerate() {
            if *active {
                bits |= 1 << layer;
            }
        }
        bits
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_falls_back_to_default() {
        let layers = LayerStack::new();
        assert_eq!(layers.resolve(), 0);
    }

    #[test]
    fn resolve_prefers_topmost_active() {
        let mut layers = LayerStack::new();
        layers.set_active(3, true).unwrap();
        layers.set_active(7, true).unwrap();
        assert_eq!(layers.resolve(), 7);
        layers.set_active(7, false).unwrap();
        assert_eq!(layers.resolve(), 3);
    }

    #[test]
    fn resolve_never_inspects_below_default() {
        let mut layers = LayerStack::new();
        layers.set_active(1, true).unwrap();
        layers.set_default_layer(2).unwrap();
        // Layer 1 is active but below the floor.
        assert_eq!(layers.resolve(), 2);
    }

    #[test]
    fn resolve_below_includes_default_as_floor() {
        let mut layers = LayerStack::new();
        layers.set_active(5, true).unwrap();
        assert_eq!(layers.resolve_below(5), Some(0));
        layers.set_active(2, true).unwrap();
        assert_eq!(layers.resolve_below(5), Some(2));
        assert_eq!(layers.resolve_below(2), Some(0));
        assert_eq!(layers.resolve_below(0), None);
    }

    #[test]
    fn turn_on_exclusive_leaves_exactly_default_and_target() {
        let mut layers = LayerStack::new();
        layers.set_active(1, true).unwrap();
        layers.set_active(9, true).unwrap();
        layers.turn_on_exclusive(5).unwrap();
        for layer in 0..NUM_LAYERS as u8 {
            assert_eq!(layers.is_active(layer), layer == 0 || layer == 5);
        }
    }

    #[test]
    fn changing_default_preserves_activity_flags() {
        let mut layers = LayerStack::new();
        layers.set_active(4, true).unwrap();
        layers.set_default_layer(1).unwrap();
        assert!(layers.is_active(4));
        assert!(!layers.is_active(1));
        assert_eq!(layers.default_layer(), 1);
    }

    #[test]
    fn out_of_range_layers_are_rejected() {
        let mut layers = LayerStack::new();
        assert_eq!(layers.set_active(16, true), Err(Error::InvalidLayer));
        assert_eq!(layers.set_default_layer(16), Err(Error::InvalidLayer));
        assert_eq!(layers.turn_on_exclusive(255), Err(Error::InvalidLayer));
        assert!(!layers.is_active(16));
    }

    #[test]
    fn bitmask_matches_flags() {
        let mut layers = LayerStack::new();
        layers.set_active(0, true).unwrap();
        layers.set_active(15, true).unwrap();
        assert_eq!(layers.bitmask(), 0x8001);
    }
}
