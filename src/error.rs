//! Unified error type for midi-panel.
//!
//! The menu core never fails: every edit clamps on write. Errors only
//! cross the collaborator seams (persistence, display adapters) and
//! carry no heap data so they stay `Copy` on `no_std` targets.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Persistence
    /// The config store could not read or write its backing medium.
    Storage,

    /// Persisted data was found but rejected (bad version, bad checksum).
    Corrupt,

    // Display
    /// The display surface reported a transfer failure.
    Display,

    // Addressing
    /// Page index outside `0..PAGE_COUNT`.
    InvalidPage,

    /// Control index outside `0..CONTROLS_PER_PAGE`.
    InvalidControl,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Storage => "config storage failure",
            Error::Corrupt => "persisted config rejected",
            Error::Display => "display transfer failure",
            Error::InvalidPage => "page index out of range",
            Error::InvalidControl => "control index out of range",
        };
        f.write_str(msg)
    }
}
