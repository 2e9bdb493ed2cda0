//! Settings for a single framing run

use bytes::Bytes;

use crate::{
    constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY, DEFAULT_SEPARATOR},
    errors::ConfigError,
};

/// Separator and buffer limits for a [`FrameDecoder`][crate::splitter::FrameDecoder].
///
/// The default frames on a blank line (`"\n\n"`) with a 1 KiB starting buffer that may grow to 4 KiB.
/// An event's content can be at most [`max_frame_len`][FrameConfig::max_frame_len] bytes long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    separator: Bytes,
    initial_capacity: usize,
    max_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            separator: Bytes::from_static(DEFAULT_SEPARATOR),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl FrameConfig {
    /// Checks the limits up front so a decoder never has to
    pub fn new(
        separator: impl Into<Bytes>,
        initial_capacity: usize,
        max_capacity: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            separator: separator.into(),
            initial_capacity,
            max_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroInitialCapacity);
        }
        if self.initial_capacity > self.max_capacity {
            return Err(ConfigError::InitialExceedsMax {
                initial: self.initial_capacity,
                max: self.max_capacity,
            });
        }
        if self.max_capacity <= self.separator.len() {
            return Err(ConfigError::MaxTooSmall {
                max: self.max_capacity,
                separator_len: self.separator.len(),
            });
        }
        Ok(())
    }

    pub fn with_initial_capacity(self, initial_capacity: usize) -> Result<Self, ConfigError> {
        Self::new(self.separator, initial_capacity, self.max_capacity)
    }

    /// Changes only the maximum, so lowering it below the initial capacity is an error
    pub fn with_max_capacity(self, max_capacity: usize) -> Result<Self, ConfigError> {
        Self::new(self.separator, self.initial_capacity, max_capacity)
    }

    /// Default limits with a different separator, `"\r\n\r\n"` for instance
    pub fn with_separator(separator: impl Into<Bytes>) -> Result<Self, ConfigError> {
        Self::new(separator, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY)
    }

    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Longest event content that still fits in the buffer next to its separator
    pub fn max_frame_len(&self) -> usize {
        self.max_capacity - self.separator.len()
    }
}
