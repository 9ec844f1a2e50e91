//! Split-link state synchronization.
//!
//! Each half periodically summarizes its state into a fixed 11-byte packet:
//!
//! | Offset | Size | Content                                        |
//! |--------|------|------------------------------------------------|
//! | 0–5    | 6    | active keycodes, ascending, zero-padded        |
//! | 6      | 1    | modifier bitmask                               |
//! | 7–8    | 2    | consumer-control code, little-endian           |
//! | 9–10   | 2    | layer-activity bitmask, little-endian          |
//!
//! Packets are ephemeral: built fresh for every transmission, consumed fresh
//! on reception. The link has no framing or CRC in scope here, so decoding is
//! total over any 11 bytes. Keycode slots are read until the first zero byte,
//! mirroring the encode truncation rule.

#[cfg(feature = "split")]
pub mod serial;

use crate::REPORT_KEYCODES;
use crate::state::{KeycodeSet, StateSnapshot};

/// Exact wire size of one state packet.
pub const PACKET_SIZE: usize = 11;

/// The peer half's state as last decoded from the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteState {
    pub keycodes: KeycodeSet,
    pub modifiers: u8,
    pub consumer: u16,
    pub layers: u16,
}

impl RemoteState {
    pub const fn new() -> Self {
        Self {
            keycodes: KeycodeSet::new(),
            modifiers: 0,
            consumer: 0,
            layers: 0,
        }
    }
}

impl Default for RemoteState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a snapshot into one wire packet. Total; always succeeds.
pub fn encode(snapshot: &StateSnapshot) -> [u8; PACKET_SIZE] {
    let mut packet = [0; PACKET_SIZE];
    packet[..REPORT_KEYCODES].copy_from_slice(&snapshot.keycodes);
    packet[6] = snapshot.modifiers;
    packet[7..9].copy_from_slice(&snapshot.consumer.to_le_bytes());
    packet[9..11].copy_from_slice(&snapshot.layers.to_le_bytes());
    packet
}

/// Deserialize one wire packet. Total over any 11-byte input.
pub fn decode(packet: &[u8; PACKET_SIZE]) -> RemoteState {
    let mut keycodes = KeycodeSet::new();
    for &code in &packet[..REPORT_KEYCODES] {
        if code == 0 {
            break;
        }
        keycodes.insert(code);
    }
    RemoteState {
        keycodes,
        modifiers: packet[6],
        consumer: u16::from_le_bytes([packet[7], packet[8]]),
        layers: u16::from_le_bytes([packet[9], packet[10]]),
    }
}

/// Fold the remote half into the local snapshot for the combined report:
/// keycode union capped at the 6 lowest, ORed modifiers and layer masks, and
/// the local consumer code unless it is idle.
pub fn merge(local: &StateSnapshot, remote: &RemoteState) -> StateSnapshot {
    let mut union = remote.keycodes;
    for code in local.active_keycodes() {
        union.insert(code);
    }
    let mut keycodes = [0; REPORT_KEYCODES];
    for (slot, code) in union.iter().take(REPORT_KEYCODES).enumerate() {
        keycodes[slot] = code;
    }
    StateSnapshot {
        keycodes,
        modifiers: local.modifiers | remote.modifiers,
        consumer: if local.consumer != 0 { local.consumer } else { remote.consumer },
        layers: local.layers | remote.layers,
    }
}
