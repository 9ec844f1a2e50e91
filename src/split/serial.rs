//! Serial transport for the split link.
//!
//! Both halves run the same symmetric loop: transmit the local snapshot every
//! tick, fold whatever arrives into the remote state. The half that talks to
//! the host picks the merge up in its reporter; on the other half the remote
//! state simply sits unused.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Ticker};
use embedded_io_async::{Read, Write};

use super::{PACKET_SIZE, RemoteState, decode, encode};
use crate::channel;
use crate::reporter::REPORT_INTERVAL_MS;
use crate::state::StateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplitDriverError {
    SerialError,
}

/// Packet framing over a serial port: every frame is exactly
/// [`PACKET_SIZE`] bytes, no delimiters.
pub struct SerialSplitDriver<S: Read + Write> {
    serial: S,
}

impl<S: Read + Write> SerialSplitDriver<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub async fn read_packet(&mut self) -> Result<RemoteState, SplitDriverError> {
        let mut buf = [0; PACKET_SIZE];
        self.serial
            .read_exact(&mut buf)
            .await
            .map_err(|_| SplitDriverError::SerialError)?;
        Ok(decode(&buf))
    }

    pub async fn write_packet(&mut self, snapshot: &StateSnapshot) -> Result<(), SplitDriverError> {
        self.serial
            .write_all(&encode(snapshot))
            .await
            .map_err(|_| SplitDriverError::SerialError)
    }
}

/// Run the split link over a serial port. Wire errors are logged and the loop
/// keeps going; the link carries no connection state of its own.
pub async fn run_split_link<S: Read + Write>(serial: S) {
    let mut driver = SerialSplitDriver::new(serial);
    let mut ticker = Ticker::every(Duration::from_millis(REPORT_INTERVAL_MS));
    loop {
        match select(driver.read_packet(), ticker.next()).await {
            Either::First(Ok(remote)) => channel::update_remote(remote),
            Either::First(Err(e)) => error!("split link read error: {:?}", e),
            Either::Second(()) => {
                if let Err(e) = driver.write_packet(&channel::local_snapshot()).await {
                    error!("split link write error: {:?}", e);
                }
            }
        }
    }
}
