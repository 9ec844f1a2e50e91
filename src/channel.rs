//! Channels and published state shared between the two execution contexts.
//!
//! The input context (the dispatch engine) is the sole writer of the local
//! snapshot; the transport context (the reporter and the split link) only
//! reads it. Remote state flows the other way: the split link writes, the
//! reporter reads. Both cells hold small `Copy` values behind a blocking
//! mutex, so neither side ever suspends on the other.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;

use crate::event::KeyEvent;
use crate::hid::Report;
use crate::split::RemoteState;
use crate::state::StateSnapshot;
use crate::{EVENT_CHANNEL_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

/// Key transitions from the matrix collaborator to the dispatch engine.
pub static KEY_EVENT_CHANNEL: Channel<RawMutex, KeyEvent, EVENT_CHANNEL_SIZE> = Channel::new();

/// Assembled reports from the reporter to the HID transport collaborator.
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();

static LOCAL_SNAPSHOT: Mutex<RawMutex, Cell<StateSnapshot>> = Mutex::new(Cell::new(StateSnapshot::new()));
static REMOTE_STATE: Mutex<RawMutex, Cell<RemoteState>> = Mutex::new(Cell::new(RemoteState::new()));

/// Publish the latest local snapshot. Called by the dispatch engine only.
pub(crate) fn publish_snapshot(snapshot: StateSnapshot) {
    LOCAL_SNAPSHOT.lock(|cell| cell.set(snapshot));
}

/// The last published local snapshot.
pub fn local_snapshot() -> StateSnapshot {
    LOCAL_SNAPSHOT.lock(|cell| cell.get())
}

/// Replace the remote half's state with a freshly decoded packet.
pub fn update_remote(state: RemoteState) {
    REMOTE_STATE.lock(|cell| cell.set(state));
}

/// The peer half's state as last decoded from the link. Empty for non-split
/// keyboards, which makes the remote merge an identity.
pub fn remote_state() -> RemoteState {
    REMOTE_STATE.lock(|cell| cell.get())
}
