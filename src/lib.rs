#![no_std]

//! Layer-based key dispatch and split-link state synchronization for keyboard firmware.
//!
//! The crate turns debounced key transitions into a host-visible input stream:
//! the [`keyboard::Keyboard`] dispatch engine resolves the winning layer for
//! every transition and executes the bound [`action::Action`] against the
//! shared keyboard state, while the [`reporter`] assembles HID reports from
//! published state snapshots at a fixed cadence. For split keyboards, the
//! [`split`] module carries each half's state over the link as a fixed 11-byte
//! packet and merges the peer's state into the outgoing report.
//!
//! Matrix scanning/debouncing, the USB stack and the keymap tooling are
//! external collaborators: they feed [`channel::KEY_EVENT_CHANNEL`], drain
//! [`channel::KEYBOARD_REPORT_CHANNEL`] and call [`keyboard::Keyboard::bind`].

#[macro_use]
mod fmt;

pub mod action;
pub mod channel;
pub mod error;
pub mod event;
pub mod hid;
pub mod keyboard;
pub mod layer;
pub mod registry;
pub mod reporter;
pub mod split;
pub mod state;

pub use action::Action;
pub use error::Error;
pub use event::KeyEvent;
pub use keyboard::Keyboard;

/// Number of layers in every binding table.
pub const NUM_LAYERS: usize = 16;

/// Keycode slots in a boot keyboard report.
pub const REPORT_KEYCODES: usize = 6;

/// Capacity of the key event channel.
pub const EVENT_CHANNEL_SIZE: usize = 16;

/// Capacity of the report channel.
pub const REPORT_CHANNEL_SIZE: usize = 16;

/// Mutex type used by all shared channels and published state.
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
