//! The transport context.
//!
//! At a fixed cadence the reporter reads the published local snapshot, merges
//! the remote half's state and queues the resulting reports for the HID
//! collaborator. It never touches keyboard state directly and never blocks
//! the input context.

use embassy_time::{Duration, Ticker};

use crate::channel::{self, KEYBOARD_REPORT_CHANNEL};
use crate::hid::{self, Report};
use crate::split;

/// Interval between outgoing reports and split packets.
pub const REPORT_INTERVAL_MS: u64 = 10;

/// Run the reporter. Sends a keyboard report every tick, including the
/// all-zero idle report when nothing is active, and a consumer-control report
/// whenever the merged consumer code changes.
pub async fn run_reporter() {
    let mut ticker = Ticker::every(Duration::from_millis(REPORT_INTERVAL_MS));
    let mut last_consumer = 0u16;
    loop {
        ticker.next().await;
        let merged = split::merge(&channel::local_snapshot(), &channel::remote_state());
        KEYBOARD_REPORT_CHANNEL
            .send(Report::Keyboard(hid::keyboard_report(&merged)))
            .await;
        if merged.consumer != last_consumer {
            KEYBOARD_REPORT_CHANNEL
                .send(Report::MediaKeyboard(hid::media_report(&merged)))
                .await;
            last_consumer = merged.consumer;
        }
    }
}
