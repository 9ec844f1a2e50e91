/// Errors surfaced by the key registry, layer stack and dispatch engine.
///
/// Configuration-time errors (`OutOfMemory`) abort configuration. Runtime
/// dispatch errors are contained within a single key event: the dispatch loop
/// logs them and keeps processing subsequent events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The key arena cannot hold the requested number of keys.
    OutOfMemory,
    /// Key index outside `0..key_count`.
    InvalidKeyIndex,
    /// Layer index outside `0..NUM_LAYERS`.
    InvalidLayer,
    /// An unset or corrupted binding slot was hit during dispatch.
    InvalidBinding,
}
