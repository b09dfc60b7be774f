//! Configurable limits for tick assembly.

/// Per-tick record limits.
///
/// Records past a limit are rejected like malformed ones; the tick still
/// assembles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLimits {
    /// Maximum contacts decoded per tick.
    pub max_contacts: usize,
    /// Maximum chunk updates decoded per tick.
    pub max_chunks: usize,
}

impl Default for UpdateLimits {
    fn default() -> Self {
        Self {
            max_contacts: 4096,
            // A spawn can send the whole visible map at once.
            max_chunks: 1024,
        }
    }
}

impl UpdateLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_contacts: 8,
            max_chunks: 4,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_contacts: usize::MAX,
            max_chunks: usize::MAX,
        }
    }
}
