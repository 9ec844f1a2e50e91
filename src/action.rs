//! Binding-table entries.
//!
//! Every `(key, layer)` slot holds one [`Action`]: a tag over the closed
//! action-kind set plus its single numeric argument. The dispatch engine
//! interprets the tag on both edges of a key transition; layer actions mutate
//! the layer stack, everything else mutates the keyboard state.

/// Modifier bit positions of the boot keyboard report's modifier byte.
pub mod modifier {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_GUI: u8 = 1 << 7;
}

/// One binding-table entry.
///
/// Rising is the press edge, falling the release edge. Actions documented as
/// rising-only are no-ops on the falling edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Unset or corrupted slot; dispatch fails soft with `InvalidBinding`.
    No,
    /// Delegate to the next eligible layer below the resolved one.
    #[default]
    Transparent,
    /// Add (rising) / remove (falling) a keycode in the active set.
    Key(u8),
    /// OR (rising) / AND-NOT (falling) a modifier bitmask.
    Modifier(u8),
    /// Activate a consumer-control usage; on release, clear it only if it is
    /// still the current one.
    Consumer(u16),
    /// Keep the target layer active while the key is held.
    MomentaryLayer(u8),
    /// Switch between the target layer and the default layer (rising only).
    ToggleLayer(u8),
    /// Deactivate every layer, then activate the default and target layers
    /// (rising only).
    LayerOnExclusive(u8),
    /// Move the resolution floor to the target layer (rising only).
    DefaultLayer(u8),
}
