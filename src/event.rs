/// A stable key transition delivered by the matrix collaborator.
///
/// The scanner is responsible for debouncing; by the time an event reaches the
/// dispatch engine `pressed` must be a settled boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Stable key index, `0..key_count`.
    pub key: u16,
    /// New physical state of the key.
    pub pressed: bool,
}
