//! Configurable limits for bounded decoding.

/// Envelope-level limits for frame decoding.
///
/// Enforced before a frame is parsed so oversized text never reaches the
/// JSON parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeLimits {
    /// Maximum frame length in bytes.
    pub max_frame_bytes: usize,
}

impl Default for EnvelopeLimits {
    fn default() -> Self {
        Self {
            // Full-terrain ticks after a spawn are the largest frames.
            max_frame_bytes: 1024 * 1024,
        }
    }
}

impl EnvelopeLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
        }
    }
}
