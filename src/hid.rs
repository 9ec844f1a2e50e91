//! HID report types handed to the transport collaborator.

use usbd_hid::descriptor::{AsInputReport, BufferOverflow, KeyboardReport, MediaKeyboardReport};

use crate::state::StateSnapshot;

/// A report ready to be written to the host.
pub enum Report {
    /// Boot keyboard report: modifier byte + up to 6 keycodes.
    Keyboard(KeyboardReport),
    /// Consumer-control report.
    MediaKeyboard(MediaKeyboardReport),
}

impl AsInputReport for Report {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, BufferOverflow> {
        match self {
            Report::Keyboard(report) => report.serialize(buf),
            Report::MediaKeyboard(report) => report.serialize(buf),
        }
    }
}

/// Assemble the boot keyboard report from a (merged) snapshot. With nothing
/// active this is the explicit all-zero "key-up" idle report.
pub fn keyboard_report(snapshot: &StateSnapshot) -> KeyboardReport {
    KeyboardReport {
        modifier: snapshot.modifiers,
        reserved: 0,
        leds: 0,
        keycodes: snapshot.keycodes,
    }
}

/// Assemble the consumer-control report from a (merged) snapshot.
pub fn media_report(snapshot: &StateSnapshot) -> MediaKeyboardReport {
    MediaKeyboardReport {
        usage_id: snapshot.consumer,
    }
}
