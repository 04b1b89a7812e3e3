use std::fmt;

use crate::backend::PipelineBackend;
use crate::handle::decode_text;

/// Returned when the native side reports no version.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Library version, or `"Unknown"`. Needs no handle.
pub fn version<B: PipelineBackend>(backend: &B) -> String {
    decode_text(backend.version(), UNKNOWN_VERSION)
}

/// `major.minor.patch` as reported by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BridgeVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl BridgeVersion {
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }

    /// Same layout as the library's version word.
    pub fn packed(self) -> u32 {
        (u32::from(self.major) << 16) | (u32::from(self.minor) << 8) | u32::from(self.patch)
    }

    pub fn from_packed(word: u32) -> Self {
        Self {
            major: (word >> 16) as u8,
            minor: (word >> 8) as u8,
            patch: word as u8,
        }
    }
}

impl fmt::Display for BridgeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
